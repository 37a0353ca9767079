//! Procedural particle generation, one algorithm per species.
//!
//! Every algorithm walks its plant's structure with fixed step counts and
//! emits particles through a shared [`Emitter`], which applies the species
//! particle scale, clamps the growth index into `[0, 1]`, and rolls the
//! per-particle oscillation phase. All randomness flows through the caller's
//! generator, so a seeded generator reproduces a cloud exactly.
//!
//! Growth indices are reveal thresholds: a particle becomes visible once the
//! plant's growth fraction passes its index. Each algorithm lays them out so
//! the plant assembles in a plausible order (stems before leaves, petals
//! last).

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec3;
use rand::Rng;

use crate::particle::{ParticleKind, ParticleSet};
use crate::species::{SpeciesKind, SpeciesProfile};

/// Soil line; every plant is rooted here.
const GROUND_Y: f32 = -4.0;

/// Builds the particle cloud for `profile`.
///
/// The algorithm is selected by the profile's id. An unrecognized id falls
/// back to the fern, so a catalog with experimental entries still renders
/// something instead of failing.
///
/// ### Parameters
/// - `profile`: species record supplying the algorithm choice and the
///   particle scale.
/// - `rng`: random source for all structural jitter and phases.
///
/// ### Returns
/// The completed, immutable particle set.
pub fn generate(profile: &SpeciesProfile, rng: &mut impl Rng) -> ParticleSet {
    let kind = profile.kind().unwrap_or_else(|| {
        tracing::warn!(id = %profile.id, "unknown species id, generating as fern");
        SpeciesKind::Fern
    });

    let mut out = Emitter::new(profile.particle_scale);
    match kind {
        SpeciesKind::Rose => rose(&mut out, rng),
        SpeciesKind::Monstera => monstera(&mut out, rng),
        SpeciesKind::Basil => basil(&mut out, rng),
        SpeciesKind::Fern => fern(&mut out, rng),
        SpeciesKind::Oak => oak(&mut out, rng),
        SpeciesKind::SnakePlant => snake_plant(&mut out, rng),
    }

    tracing::debug!(species = %profile.id, particles = out.set.len(), "generated particle set");
    out.set
}

/// Accumulates particles for one generation pass.
struct Emitter {
    set: ParticleSet,
    scale: f32,
}

impl Emitter {
    fn new(scale: f32) -> Self {
        Self {
            set: ParticleSet::default(),
            scale,
        }
    }

    fn emit(&mut self, position: Vec3, kind: ParticleKind, growth_index: f32, rng: &mut impl Rng) {
        self.set.push(
            position * self.scale,
            kind,
            growth_index.clamp(0.0, 1.0),
            rng.random_range(0.0..TAU),
        );
    }
}

/// Five curved stems with thorns and occasional leaf sprays, each crowned
/// by a spiral flower head. Stems occupy the first 70% of the growth
/// timeline; petals fill the final 30%, so the bloom opens last.
fn rose(out: &mut Emitter, rng: &mut impl Rng) {
    const STEMS: usize = 5;
    const STEP: f32 = 0.02;

    for i in 0..STEMS {
        let angle = i as f32 / STEMS as f32 * TAU;
        let radius = 0.5 + rng.random::<f32>() * 0.5;
        let mut x = angle.cos() * radius;
        let mut z = angle.sin() * radius;
        let mut y = GROUND_Y;
        let height = 6.0 + rng.random::<f32>() * 2.0;
        let steps = (height / STEP) as usize;

        for step in 0..steps {
            let h = step as f32 * STEP;
            // Lateral wander keeps the stems from reading as straight poles.
            x += (h * 0.5 + angle).sin() * 0.01;
            z += (h * 0.5 + angle).cos() * 0.01;
            y += STEP;

            let stem_growth = h / height * 0.7;
            out.emit(Vec3::new(x, y, z), ParticleKind::Wood, stem_growth, rng);

            // Intermittent thorns, flush with their stem segment.
            if rng.random::<f32>() > 0.95 {
                let thorn = rng.random_range(0.0..TAU);
                out.emit(
                    Vec3::new(x + thorn.cos() * 0.15, y, z + thorn.sin() * 0.15),
                    ParticleKind::Wood,
                    stem_growth,
                    rng,
                );
            }

            if h > 1.0 && rng.random::<f32>() > 0.98 {
                rose_leaf(out, Vec3::new(x, y, z), stem_growth, rng);
            }
        }

        rose_flower(out, Vec3::new(x, y, z), rng);
    }
}

/// One oval leaf spray branching sideways off a rose stem. These carry
/// the trunk palette (sepal green), so they stay wood particles.
fn rose_leaf(out: &mut Emitter, base: Vec3, stem_growth: f32, rng: &mut impl Rng) {
    const STEPS: usize = 30;
    const STEP: f32 = 0.05;
    let dir = rng.random_range(0.0..TAU);
    // Each spray unfolds just after the stem segment it grew from.
    let growth = stem_growth + 0.05;

    for step in 0..STEPS {
        let l = step as f32 * STEP;
        let spread = (l * PI).sin() * 0.3;
        for _ in 0..5 {
            out.emit(
                Vec3::new(
                    base.x + dir.cos() * l + (rng.random::<f32>() - 0.5) * spread,
                    base.y + l * 0.5 + (rng.random::<f32>() - 0.5) * 0.1,
                    base.z + dir.sin() * l + (rng.random::<f32>() - 0.5) * spread,
                ),
                ParticleKind::Wood,
                growth,
                rng,
            );
        }
    }
}

/// Spiral flower head at a stem top: a polar sweep whose radius widens
/// with the angle, four jittered petal particles per step.
fn rose_flower(out: &mut Emitter, top: Vec3, rng: &mut impl Rng) {
    const SWEEP: f32 = 25.0;
    const STEP: f32 = 0.05;
    const RADIUS: f32 = 0.8;
    let steps = (SWEEP / STEP) as usize;

    for step in 0..steps {
        let t = step as f32 * STEP;
        let rad = t / SWEEP * RADIUS;
        let ang = t * 2.5;
        let x = top.x + ang.cos() * rad;
        let z = top.z + ang.sin() * rad;
        // The rad^2 term dishes the head so outer petals droop.
        let y = top.y + t / SWEEP * 1.5 - rad * rad;
        let growth = 0.7 + t / SWEEP * 0.3;

        for _ in 0..4 {
            out.emit(
                Vec3::new(
                    x + (rng.random::<f32>() - 0.5) * 0.1,
                    y + (rng.random::<f32>() - 0.5) * 0.1,
                    z + (rng.random::<f32>() - 0.5) * 0.1,
                ),
                ParticleKind::Foliage,
                growth,
                rng,
            );
        }
    }
}

/// Seven stalk/leaf pairs on staggered growth windows: pair `i` owns
/// `[i/7, (i+1)/7)` of the timeline, stalk in the first half of its
/// window, leaf in the second. Leaves are grid-sampled discs clipped to a
/// sheared ellipse and punched with fenestration holes.
fn monstera(out: &mut Emitter, rng: &mut impl Rng) {
    const LEAVES: usize = 7;
    const STEP: f32 = 0.02;
    let window = 1.0 / LEAVES as f32;

    for i in 0..LEAVES {
        let window_start = i as f32 * window;

        let angle = i as f32 / LEAVES as f32 * TAU + rng.random::<f32>() * 0.5;
        let mut x = angle.cos() * 0.5;
        let mut z = angle.sin() * 0.5;
        let mut y = GROUND_Y;
        let stalk_len = 3.0 + i as f32 * 0.8;
        let steps = (stalk_len / STEP) as usize;

        for step in 0..steps {
            let along = step as f32 * STEP / stalk_len;
            x += angle.cos() * 0.01;
            z += angle.sin() * 0.01;
            y += STEP;
            out.emit(
                Vec3::new(x, y, z),
                ParticleKind::Wood,
                window_start + along * (window * 0.5),
                rng,
            );
        }

        monstera_leaf(out, Vec3::new(x, y, z), window_start + window * 0.5, rng);
    }
}

/// One fenestrated monstera leaf at a stalk tip.
fn monstera_leaf(out: &mut Emitter, tip: Vec3, growth_start: f32, rng: &mut impl Rng) {
    const GRID_STEP: f32 = 0.03;
    let tilt = 0.5 + rng.random::<f32>() * 0.5;
    let size = 1.5 + rng.random::<f32>() * 0.5;

    // Leaf plane: lx in [-1, 1], ly in [-0.2, 1.5].
    let cols = (2.0 / GRID_STEP) as usize + 1;
    let rows = (1.7 / GRID_STEP) as usize + 1;

    for col in 0..cols {
        let lx = -1.0 + col as f32 * GRID_STEP;
        for row in 0..rows {
            let ly = -0.2 + row as f32 * GRID_STEP;

            // Ellipse clip in sheared leaf coordinates gives the heart shape.
            let ex = lx * 1.5;
            let ey = ly - lx.abs() * 0.5;
            if ex * ex + ey * ey >= 1.0 {
                continue;
            }

            // A fixed interference pattern punches the fenestration holes,
            // restricted to the upper outer region of the blade.
            let noise = (lx * 10.0).sin() * (ly * 10.0).cos();
            if ly > 0.3 && lx.abs() > 0.3 && noise > 0.6 {
                continue;
            }

            out.emit(
                Vec3::new(
                    tip.x + lx * size,
                    tip.y + tilt.sin() * ly * size,
                    tip.z + tilt.cos() * ly * size,
                ),
                ParticleKind::Foliage,
                growth_start + rng.random::<f32>() * 0.1,
                rng,
            );
        }
    }
}

/// One central stem with opposite leaf pairs at regular branch nodes.
/// Every particle inherits the stem's height fraction, so the whole node
/// (stem segment plus both leaves) appears as one growth band.
fn basil(out: &mut Emitter, rng: &mut impl Rng) {
    const HEIGHT: f32 = 6.0;
    const STEP: f32 = 0.02;
    // One branch node per 1.5 height units, skipping the lowest section.
    const NODE_EVERY: usize = 75;
    let steps = (HEIGHT / STEP) as usize;

    for step in 0..steps {
        let h = step as f32 * STEP;
        let progress = h / HEIGHT;
        out.emit(
            Vec3::new(0.0, GROUND_Y + h, 0.0),
            ParticleKind::Wood,
            progress,
            rng,
        );

        if h > 1.0 && step % NODE_EVERY == 0 {
            // Nodes twist up the stem; opposite leaves share the axis.
            let node_angle = h * 2.0;
            for side in 0..2 {
                basil_leaf(out, node_angle + side as f32 * PI, GROUND_Y + h, progress, rng);
            }
        }
    }
}

/// One cupped basil leaf growing outward from a stem node.
fn basil_leaf(out: &mut Emitter, ang: f32, base_y: f32, growth: f32, rng: &mut impl Rng) {
    const LEAF_LEN: f32 = 0.6;
    const STEP: f32 = 0.02;
    let steps = (LEAF_LEN / STEP) as usize;

    for step in 0..steps {
        let l = step as f32 * STEP;
        let width = (l / LEAF_LEN * PI).sin() * 0.4;
        let cx = ang.cos() * l;
        let cy = l * 0.5;
        let cz = ang.sin() * l;

        // Cross rows; the w^2 term cups the blade downward at the rim.
        let half_rows = (width / STEP) as i32;
        for k in -half_rows..=half_rows {
            let w = k as f32 * STEP;
            let cup = w * w * 2.0;
            out.emit(
                Vec3::new(cx - ang.sin() * w, base_y + cy - cup, cz + ang.cos() * w),
                ParticleKind::Foliage,
                growth,
                rng,
            );
        }
    }
}

/// Twenty-four radial fronds driven by a single sweep variable: radius,
/// arch height, and growth index all derive from `t`, so each frond
/// unfurls from the crown outward like a fiddlehead.
fn fern(out: &mut Emitter, rng: &mut impl Rng) {
    const FRONDS: usize = 24;
    const STEPS: usize = 200;

    for i in 0..FRONDS {
        let angle = i as f32 / FRONDS as f32 * TAU;
        let length = 4.5 + rng.random::<f32>() * 1.5;

        for step in 0..=STEPS {
            let t = step as f32 / STEPS as f32;
            let r = t * length;
            let arch = (t * PI).sin() + t * 2.0;
            let spine = Vec3::new(angle.cos() * r, GROUND_Y + arch, angle.sin() * r);

            let growth = t * 0.8 + rng.random::<f32>() * 0.2;
            out.emit(spine, ParticleKind::Wood, growth, rng);

            // Leaflet scatter around the spine, widest mid-frond.
            let width = (t * PI).sin();
            for _ in 0..8 {
                let side = (rng.random::<f32>() - 0.5) * 2.0 * width;
                out.emit(
                    Vec3::new(
                        spine.x + (angle + FRAC_PI_2).cos() * side,
                        spine.y,
                        spine.z + (angle + FRAC_PI_2).sin() * side,
                    ),
                    ParticleKind::Foliage,
                    growth,
                    rng,
                );
            }
        }
    }
}

const OAK_MAX_DEPTH: u32 = 5;

/// Recursively branching oak. Each depth level owns one fifth of the
/// growth timeline (trunk earliest, twigs last); terminal twigs end in
/// spherical leaf clouds pinned to the final 15%.
fn oak(out: &mut Emitter, rng: &mut impl Rng) {
    oak_branch(
        out,
        Vec3::new(0.0, GROUND_Y, 0.0),
        Vec3::Y,
        3.5,
        OAK_MAX_DEPTH,
        rng,
    );
}

fn oak_branch(
    out: &mut Emitter,
    start: Vec3,
    dir: Vec3,
    len: f32,
    depth: u32,
    rng: &mut impl Rng,
) {
    if depth == 0 {
        return;
    }

    const SEGMENTS: usize = 15;
    let depth_step = 1.0 / OAK_MAX_DEPTH as f32;
    let growth_start = (OAK_MAX_DEPTH - depth) as f32 * depth_step;

    let mut tip = start;
    for seg in 0..SEGMENTS {
        tip += dir * (len / SEGMENTS as f32);
        let growth = growth_start + seg as f32 / SEGMENTS as f32 * depth_step;

        // Thicker, denser wood near the trunk.
        let thickness = depth as f32 * 0.05;
        for _ in 0..depth * 2 {
            out.emit(
                Vec3::new(
                    tip.x + (rng.random::<f32>() - 0.5) * thickness,
                    tip.y,
                    tip.z + (rng.random::<f32>() - 0.5) * thickness,
                ),
                ParticleKind::Wood,
                growth,
                rng,
            );
        }
    }

    if depth > 1 {
        let children: u32 = rng.random_range(2..=3);
        for _ in 0..children {
            const SPREAD: f32 = 0.6;
            let jitter = Vec3::new(
                (rng.random::<f32>() - 0.5) * SPREAD,
                (rng.random::<f32>() - 0.5) * SPREAD,
                (rng.random::<f32>() - 0.5) * SPREAD,
            );
            let child_dir = (dir + jitter).normalize_or_zero();
            oak_branch(out, tip, child_dir, len * 0.7, depth - 1, rng);
        }
    } else {
        oak_leaf_cloud(out, tip, rng);
    }
}

/// Spherical foliage cloud at a twig tip.
fn oak_leaf_cloud(out: &mut Emitter, center: Vec3, rng: &mut impl Rng) {
    const MOTES: usize = 60;
    const RADIUS: f32 = 1.5;

    for _ in 0..MOTES {
        let theta = rng.random_range(0.0..TAU);
        let phi = rng.random_range(0.0..PI);
        let rad = rng.random::<f32>() * RADIUS;
        out.emit(
            center
                + Vec3::new(
                    rad * phi.sin() * theta.cos(),
                    rad * phi.sin() * theta.sin(),
                    rad * phi.cos(),
                ),
            ParticleKind::Foliage,
            0.85 + rng.random::<f32>() * 0.15,
            rng,
        );
    }
}

/// Twelve upright blades with linear taper and a sinusoidal lateral wave.
/// Growth index is simply the height fraction, so every blade rises from
/// the soil line together. Snake plants have no woody parts at all.
fn snake_plant(out: &mut Emitter, rng: &mut impl Rng) {
    const BLADES: usize = 12;
    const STEP: f32 = 0.03;
    const ROW_STEP: f32 = 0.02;
    const BASE_WIDTH: f32 = 0.3;

    for i in 0..BLADES {
        let angle = i as f32 / BLADES as f32 * TAU + rng.random::<f32>() * 0.5;
        let r = rng.random::<f32>() * 0.5;
        let cx = angle.cos() * r;
        let cz = angle.sin() * r;
        let height = 3.0 + rng.random::<f32>() * 4.0;
        let steps = (height / STEP) as usize;

        for step in 0..steps {
            let h = step as f32 * STEP;
            let progress = h / height;
            let width = BASE_WIDTH * (1.0 - progress);
            let wave = (h * 2.0).sin() * 0.1;
            let bx = cx + angle.cos() * wave;
            let bz = cz + angle.sin() * wave;
            let by = GROUND_Y + h;

            let half_rows = (width / ROW_STEP) as i32;
            for k in -half_rows..=half_rows {
                let w = k as f32 * ROW_STEP;
                // The w^2 term curls the blade edges toward the viewer.
                let curl = w * w * 2.0;
                out.emit(
                    Vec3::new(
                        bx + (angle + FRAC_PI_2).cos() * w,
                        by,
                        bz + (angle + FRAC_PI_2).sin() * w + curl,
                    ),
                    ParticleKind::Foliage,
                    progress,
                    rng,
                );
            }
        }
    }
}
