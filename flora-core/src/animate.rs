//! Per-frame animation over a generated particle set.
//!
//! The animator owns three output buffers (positions, colors, visibility)
//! sized to the set it was built for and rewrites them in place every
//! frame. The particle set itself is never mutated; a frame is a pure
//! function of the set, the plant state, the active gesture, the wind
//! sample, and elapsed time, plus the caller's random source for the
//! gesture effects.

use glam::Vec3;
use rand::Rng;

use crate::gesture::Gesture;
use crate::particle::{ParticleKind, ParticleSet};
use crate::plant::PlantState;
use crate::species::{Rgb, SpeciesKind, SpeciesProfile};
use crate::wind::Wind;

/// Trunk color of a fully desiccated plant.
const DEAD_TRUNK: Rgb = Rgb::from_u8(0x4a, 0x3b, 0x32);
/// Foliage color of a fully desiccated plant.
const DEAD_LEAF: Rgb = Rgb::from_u8(0x8b, 0x45, 0x13);
/// Stem green forced onto rose foliage near the base (sepals).
const SEPAL_GREEN: Rgb = Rgb::from_u8(0x22, 0x8b, 0x22);
/// Foliage tint while the watering gesture is active.
const WATER_TINT: Rgb = Rgb::from_u8(0x00, 0xff, 0xff);
/// Foliage tint while the sunlight gesture is active.
const SUN_TINT: Rgb = Rgb::from_u8(0xff, 0xaa, 0x00);

/// Whole-plant scale for a growth fraction: 0.4 as a seedling, 1.0 at
/// full maturity.
pub fn uniform_scale(growth_fraction: f32) -> f32 {
    0.4 + growth_fraction.clamp(0.0, 1.0) * 0.6
}

/// Slow presentation spin around the vertical axis, in radians.
pub fn rotation(time: f32) -> f32 {
    time * 0.05
}

/// Linear blend that reproduces `a` exactly at `t = 0` and `b` exactly
/// at `t = 1`.
fn mix(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a * (1.0 - t) + b * t
}

/// Base colors resolved once per frame.
///
/// Health blending happens here rather than per particle; the hot loop
/// then only picks a column and applies glow and gesture tint.
#[derive(Clone, Copy, Debug)]
pub struct ColorTable {
    pub wood: Vec3,
    pub leaf: Vec3,
    pub sepal: Vec3,
}

impl ColorTable {
    /// Resolves the live palette for `profile` at a health fraction in
    /// `[0, 1]`. Full health reproduces the species colors exactly; zero
    /// health collapses to the fixed dead palette.
    pub fn resolve(profile: &SpeciesProfile, health: f32) -> Self {
        let fade = 1.0 - health.clamp(0.0, 1.0);
        Self {
            wood: mix(profile.trunk_color.0, DEAD_TRUNK.0, fade),
            leaf: mix(profile.leaf_color.0, DEAD_LEAF.0, fade),
            sepal: mix(SEPAL_GREEN.0, DEAD_TRUNK.0, fade),
        }
    }
}

/// Per-frame output buffers for one particle set.
///
/// Buffer length is fixed at construction; a species change swaps in a
/// new animator together with the new set. Nothing here allocates per
/// frame.
#[derive(Debug)]
pub struct Animator {
    positions: Vec<Vec3>,
    colors: Vec<Vec3>,
    visible: Vec<bool>,
}

impl Animator {
    /// Creates output buffers sized for `set`.
    pub fn for_set(set: &ParticleSet) -> Self {
        Self {
            positions: vec![Vec3::ZERO; set.len()],
            colors: vec![Vec3::ONE; set.len()],
            visible: vec![false; set.len()],
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Animated positions for the current frame. Entries whose visibility
    /// flag is off hold stale data and must not be drawn.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Resolved colors for the current frame, same caveat as
    /// [`Animator::positions`].
    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    /// Per-particle visibility flags from the growth mask.
    pub fn visible(&self) -> &[bool] {
        &self.visible
    }

    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|&&v| v).count()
    }

    /// Visible particles as `(position, color)` pairs, in set order.
    pub fn iter_visible(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.visible
            .iter()
            .enumerate()
            .filter(|&(_, visible)| *visible)
            .map(|(i, _)| (self.positions[i], self.colors[i]))
    }

    /// Computes one animation frame.
    ///
    /// Per visible particle, in order: growth mask, breathing, wind sway,
    /// species-specific motion, gesture reaction, then color resolution.
    /// Gesture reactions are per-frame offsets only; nothing accumulates
    /// across frames.
    ///
    /// ### Parameters
    /// - `set`: the generated particles; must be the set this animator was
    ///   built for.
    /// - `profile`: species record for colors and motion dialect.
    /// - `state`: plant vitals; health and growth are read as fractions and
    ///   clamped, so out-of-range meters degrade gracefully.
    /// - `gesture`: the care gesture active this frame.
    /// - `wind`: this frame's shared wind sample.
    /// - `time`: elapsed seconds driving every oscillator.
    /// - `rng`: random source for the weeding jitter and watering droplets.
    pub fn advance(
        &mut self,
        set: &ParticleSet,
        profile: &SpeciesProfile,
        state: &PlantState,
        gesture: Gesture,
        wind: &Wind,
        time: f32,
        rng: &mut impl Rng,
    ) {
        debug_assert_eq!(self.positions.len(), set.len());

        let health = (state.health / 100.0).clamp(0.0, 1.0);
        let growth_fraction = (state.growth / 100.0).clamp(0.0, 1.0);

        // Unknown ids were generated as ferns; animate them the same way.
        let species = profile.kind().unwrap_or(SpeciesKind::Fern);
        let table = ColorTable::resolve(profile, health);
        // Healthy plants sway with the wind; dry plants go stiff.
        let flexibility = 0.2 + health * 0.8;

        let initial = set.initial_positions();
        let kinds = set.kinds();
        let phases = set.phases();
        let growth_indices = set.growth_indices();

        for i in 0..set.len() {
            // Growth mask: particles ahead of the plant's maturity stay
            // hidden. Withering lowers the fraction and re-hides them.
            if growth_indices[i] > growth_fraction {
                self.visible[i] = false;
                continue;
            }
            self.visible[i] = true;

            let home = initial[i];
            let kind = kinds[i];
            let phase = phases[i];
            let mut pos = home;

            // Universal breathing, a gentle radial swell.
            let breath = (time + home.y).sin() * 0.015 * health;
            pos.x += pos.x * breath;
            pos.z += pos.z * breath;

            // Wind sway grows with height above the soil line.
            let height_factor = (home.y + 4.0).max(0.0) / 8.0;
            let sway = wind.strength * height_factor * flexibility;
            pos.x += wind.dir_x * sway;
            pos.z += wind.dir_z * sway;

            match (species, kind) {
                (SpeciesKind::Fern, ParticleKind::Foliage) => {
                    pos.y += (time * 1.5 + pos.x * 0.5).sin() * 0.1 * health;
                }
                (SpeciesKind::Oak, ParticleKind::Foliage) => {
                    pos.x += (time * 3.0 + phase).sin() * 0.03 * health;
                    pos.y += (time * 2.0 + phase).cos() * 0.03 * health;
                }
                (SpeciesKind::Monstera, _) => {
                    pos.x += (time + pos.y).sin() * 0.02 * health;
                }
                _ => {}
            }

            match gesture {
                Gesture::Weeding => {
                    pos.x += (rng.random::<f32>() - 0.5) * 0.2;
                    pos.z += (rng.random::<f32>() - 0.5) * 0.2;
                }
                Gesture::Watering => {
                    // Occasional particle sags under a droplet.
                    if rng.random::<f32>() > 0.98 {
                        pos.y -= 0.3;
                    }
                }
                _ => {}
            }

            self.positions[i] = pos;

            let mut color = match kind {
                ParticleKind::Wood => table.wood,
                ParticleKind::Foliage => {
                    // Rose foliage near the base reads as sepals, not petals.
                    if species == SpeciesKind::Rose && home.y < 1.5 {
                        table.sepal
                    } else {
                        table.leaf
                    }
                }
            };

            let glow = 0.8 + (time * 2.0 + phase).sin() * 0.2 * health;
            color *= glow;

            if kind == ParticleKind::Foliage {
                match gesture {
                    Gesture::Watering => color = mix(color, WATER_TINT.0, 0.3),
                    Gesture::Sunlight => color = mix(color, SUN_TINT.0, 0.3),
                    _ => {}
                }
            }

            self.colors[i] = color;
        }
    }
}
