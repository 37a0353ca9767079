//! Interactive particle garden viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the garden state (particle
//! set, animator, dust field, plant vitals, gesture classifier) and
//! implements [`eframe::App`] to render and control everything through an
//! egui UI. Hands are synthesized from keyboard and pointer input: holding
//! `W` raises the right hand (watering), holding `S` raises the left hand
//! (sunlight), and waving the pointer while a hand is up reads as weeding.

use eframe::App;
use glam::{Mat3, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use flora_core::{
    advice,
    animate::{self, Animator},
    dust::DustField,
    generate::generate,
    gesture::{Gesture, GestureClassifier, HandObservation, HandSide},
    particle::ParticleSet,
    plant::PlantState,
    species::Catalog,
    wind::Wind,
};

/// Seconds between gesture classification ticks.
const CLASSIFY_INTERVAL: f64 = 0.15;
/// Seconds between care-meter ticks while a gesture is held.
const CARE_INTERVAL: f64 = 0.1;
/// Number of ambient dust motes.
const DUST_MOTES: usize = 200;
/// Fixed camera position; the garden rotates, the camera does not.
const EYE: Vec3 = Vec3::new(0.0, 2.0, 12.0);
/// Vertical field of view of the projection, in radians.
const FOV_Y: f32 = std::f32::consts::FRAC_PI_4;
/// Points closer to the camera plane than this are culled.
const NEAR_PLANE: f32 = 0.1;
/// World-space diameter of a plant particle.
const PLANT_POINT_SIZE: f32 = 0.06;
/// World-space diameter of a dust mote.
const DUST_POINT_SIZE: f32 = 0.08;

/// Main application state for the interactive garden.
///
/// [`Viewer`] glues together:
/// - The core garden: [`ParticleSet`], [`Animator`], [`DustField`],
///   [`PlantState`], [`GestureClassifier`].
/// - UI state (species selection, camera, timing).
/// - eframe/egui callbacks for drawing and user interaction.
///
/// The per-frame update is:
/// 1. Classify the synthesized hands on the classification clock.
/// 2. Feed care meters on the care clock while a gesture is held.
/// 3. Advance the animator and the dust field with a shared wind sample.
/// 4. Render panels and project both particle fields to the screen.
///
/// ### Fields
/// - `catalog` - Species library the carousel cycles through.
/// - `species_index` - Currently potted entry of the catalog.
/// - `particles` - Generated particle set for the potted plant.
/// - `animator` - Per-frame position/color/visibility buffers.
/// - `dust` - Ambient dust field sharing the plant's wind.
/// - `state` - Plant vitals and the day counter.
/// - `classifier` - Stateful gesture classifier.
/// - `gesture` - Most recent classification result.
/// - `advice` - Latest message from the plant for the console line.
///
/// - `rng` - Session random stream; seedable from the command line.
///
/// - `zoom` - Zoom factor applied on top of the perspective projection.
/// - `pan` - Screen-space pan offset in pixels.
///
/// - `last_classify_time` - Time stamp of the last classification tick.
/// - `last_care_time` - Time stamp of the last care tick.
pub struct Viewer {
    catalog: Catalog,
    species_index: usize,

    particles: ParticleSet,
    animator: Animator,
    dust: DustField,

    state: PlantState,
    classifier: GestureClassifier,
    gesture: Gesture,
    advice: String,

    rng: ChaCha8Rng,

    zoom: f32,
    pan: egui::Vec2,

    last_classify_time: f64,
    last_care_time: f64,
}

impl Viewer {
    /// Creates a viewer with the first plant already potted.
    ///
    /// ### Parameters
    /// - `catalog`: validated species library; the carousel follows its
    ///   order.
    /// - `species_id`: optional id to pot first; unknown or absent ids
    ///   fall back to the first entry.
    /// - `seed`: optional seed for the session's random stream, so a
    ///   whole session can be replayed; seeded randomly when omitted.
    ///
    /// ### Returns
    /// A fully-initialized [`Viewer`] ready to be passed to
    /// `eframe::run_native`.
    pub fn new(catalog: Catalog, species_id: Option<&str>, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        tracing::info!(seed, "session stream seeded");

        let species_index = species_id
            .and_then(|id| catalog.species.iter().position(|p| p.id == id))
            .unwrap_or(0);

        let profile = &catalog.species[species_index];
        let particles = generate(profile, &mut rng);
        let animator = Animator::for_set(&particles);
        let dust = DustField::new(DUST_MOTES, &mut rng);
        let state = PlantState::planted(profile);
        let advice = advice::planting_message(profile);

        Self {
            catalog,
            species_index,
            particles,
            animator,
            dust,
            state,
            classifier: GestureClassifier::new(),
            gesture: Gesture::None,
            advice,
            rng,
            zoom: 1.0,
            pan: egui::vec2(0.0, 0.0),
            last_classify_time: 0.0,
            last_care_time: 0.0,
        }
    }

    /// Pots the currently selected species from scratch.
    ///
    /// The new particle set and animator are built completely before
    /// anything is swapped in, so a frame never sees a half-replaced
    /// plant. Vitals restart at day 1 and the gesture resets; the camera
    /// and the dust field carry over.
    fn replant(&mut self) {
        let profile = &self.catalog.species[self.species_index];
        let particles = generate(profile, &mut self.rng);
        let animator = Animator::for_set(&particles);
        let state = PlantState::planted(profile);
        let advice = advice::planting_message(profile);
        tracing::info!(species = %profile.id, particles = particles.len(), "potted new plant");

        self.particles = particles;
        self.animator = animator;
        self.state = state;
        self.advice = advice;
        self.gesture = Gesture::None;
    }

    /// Selects the next catalog entry and replants.
    fn next_species(&mut self) {
        self.species_index = (self.species_index + 1) % self.catalog.len();
        self.replant();
    }

    /// Selects the previous catalog entry and replants.
    fn previous_species(&mut self) {
        self.species_index = (self.species_index + self.catalog.len() - 1) % self.catalog.len();
        self.replant();
    }

    /// Puts the plant to sleep: judges the day, settles vitals, and puts
    /// the plant's morning words on the console line.
    fn sleep_cycle(&mut self) {
        let profile = &self.catalog.species[self.species_index];
        let report = self.state.advance_day(profile);
        self.advice = advice::morning_report(&self.state, profile, &report);
    }

    /// Builds this tick's synthetic hand observations from raw input.
    ///
    /// The pointer x position stands in for the index fingertip of
    /// whichever hands are raised, so waving the pointer while holding a
    /// key reads as a wave to the classifier.
    fn observed_hands(ctx: &egui::Context) -> Vec<HandObservation> {
        let tip_x = ctx
            .input(|i| i.pointer.latest_pos())
            .map(|pos| pos.x)
            .unwrap_or(0.0);

        let mut hands = Vec::with_capacity(2);
        if ctx.input(|i| i.key_down(egui::Key::W)) {
            hands.push(HandObservation {
                side: HandSide::Right,
                index_tip_x: tip_x,
            });
        }
        if ctx.input(|i| i.key_down(egui::Key::S)) {
            hands.push(HandObservation {
                side: HandSide::Left,
                index_tip_x: tip_x,
            });
        }
        hands
    }

    /// Runs the fixed-cadence clocks and one animation frame.
    fn tick(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        let time = now as f32;

        // Gestures are classified on a slower clock than the frame rate,
        // mirroring a detector that cannot keep up with vsync.
        if now - self.last_classify_time >= CLASSIFY_INTERVAL {
            let hands = Self::observed_hands(ctx);
            self.gesture = self.classifier.classify(&hands);
            self.last_classify_time = now;
        }

        if now - self.last_care_time >= CARE_INTERVAL {
            self.state.apply_care(self.gesture);
            self.last_care_time = now;
        }

        // One wind sample feeds both fields so they drift together.
        let wind = Wind::at(time);
        let profile = &self.catalog.species[self.species_index];
        self.animator.advance(
            &self.particles,
            profile,
            &self.state,
            self.gesture,
            &wind,
            time,
            &mut self.rng,
        );
        self.dust.advance(&wind, &mut self.rng);
    }

    /// Projects a world point through the fixed camera.
    ///
    /// ### Parameters
    /// - `world` - World-space position.
    /// - `rect` - Screen-space rectangle of the drawing area.
    ///
    /// ### Returns
    /// The screen position and the perspective factor (pixels per world
    /// unit at that depth) used to size points, or `None` when the point
    /// lies behind the near plane.
    fn project(&self, world: Vec3, rect: egui::Rect) -> Option<(egui::Pos2, f32)> {
        let view = world - EYE;
        let depth = -view.z;
        if depth <= NEAR_PLANE {
            return None;
        }

        let focal = 0.5 * rect.height() / (FOV_Y * 0.5).tan() * self.zoom;
        let center = rect.center();
        let factor = focal / depth;
        Some((
            egui::pos2(
                center.x + view.x * factor + self.pan.x,
                center.y - view.y * factor + self.pan.y,
            ),
            factor,
        ))
    }

    /// Builds the top panel UI (title, species carousel, sleep, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("AETHER FLORA");
                ui.separator();

                if ui.button("◀").clicked() {
                    self.previous_species();
                }
                let profile = &self.catalog.species[self.species_index];
                ui.label(egui::RichText::new(&profile.name).strong());
                if ui.button("▶").clicked() {
                    self.next_species();
                }

                ui.separator();
                if ui.button("🌙 Sleep").clicked() {
                    self.sleep_cycle();
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.zoom, 0.2..=3.0).text("Zoom"));
            });
        });
    }

    /// Builds the bottom status bar (particle counts, day, active gesture).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!(
                    "particles = {}/{}",
                    self.animator.visible_count(),
                    self.particles.len()
                ));
                ui.label(format!("dust = {}", self.dust.len()));
                ui.separator();
                ui.label(format!("day = {}", self.state.day));
                ui.label(format!("gesture = {}", self.gesture.label()));
            });
        });
    }

    /// Builds the console line where the plant talks to its caretaker.
    fn ui_console(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("console").show(ctx, |ui| {
            ui.label(
                egui::RichText::new(format!("> {}", self.advice))
                    .monospace()
                    .color(egui::Color32::LIGHT_GREEN),
            );
        });
    }

    /// Builds the right-hand bio-metrics panel.
    fn ui_bio_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("bio_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                let profile = &self.catalog.species[self.species_index];

                ui.heading("Bio-metrics");
                ui.separator();

                ui.label(format!("Stage: {}", self.state.stage));
                ui.label(format!("Day {}", self.state.day));
                ui.add_space(4.0);

                ui.add(
                    egui::ProgressBar::new(self.state.water / 100.0)
                        .text(format!("Water {:.0}%", self.state.water))
                        .fill(egui::Color32::from_rgb(60, 140, 220)),
                );
                ui.weak(format!(
                    "comfort {:.0} ± {:.0}",
                    profile.ideal_water, profile.tolerance
                ));

                ui.add(
                    egui::ProgressBar::new(self.state.sun / 100.0)
                        .text(format!("Sun {:.0}%", self.state.sun))
                        .fill(egui::Color32::from_rgb(220, 170, 40)),
                );
                ui.weak(format!(
                    "comfort {:.0} ± {:.0}",
                    profile.ideal_sun, profile.tolerance
                ));

                ui.add(
                    egui::ProgressBar::new(self.state.health / 100.0)
                        .text(format!("Health {:.0}%", self.state.health))
                        .fill(egui::Color32::from_rgb(90, 180, 90)),
                );
                ui.add_space(4.0);
                ui.label(format!("Growth {:.0}%", self.state.growth));

                ui.separator();
                ui.label(egui::RichText::new(&profile.description).italics());

                ui.separator();
                ui.label("Gesture sensor");
                for (gesture, hint) in [
                    (Gesture::Watering, "hold W"),
                    (Gesture::Sunlight, "hold S"),
                    (Gesture::Weeding, "wave the pointer"),
                ] {
                    let active = self.gesture == gesture;
                    let text = format!("{} ({hint})", gesture.label());
                    if active {
                        ui.label(egui::RichText::new(text).strong());
                    } else {
                        ui.weak(text);
                    }
                }
            });
    }

    /// Builds the central panel where the garden is drawn.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            // Pan with drag, zoom with scroll.
            if response.dragged() {
                self.pan += response.drag_delta();
            }
            let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                self.zoom = (self.zoom * factor).clamp(0.2, 3.0);
            }

            painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(4, 6, 10));

            let time = ctx.input(|i| i.time) as f32;
            let spin = Mat3::from_rotation_y(animate::rotation(time));
            let scale = animate::uniform_scale(self.state.growth / 100.0);

            // Dust first, faint, outside the plant's spin and scale.
            for &mote in self.dust.positions() {
                if let Some((pos, factor)) = self.project(mote, rect) {
                    let radius = (DUST_POINT_SIZE * 0.5 * factor).max(0.5);
                    painter.circle_filled(
                        pos,
                        radius,
                        egui::Color32::from_rgba_unmultiplied(255, 255, 255, 77),
                    );
                }
            }

            for (world, color) in self.animator.iter_visible() {
                let placed = spin * (world * scale);
                if let Some((pos, factor)) = self.project(placed, rect) {
                    let radius = (PLANT_POINT_SIZE * 0.5 * factor).max(0.5);
                    painter.circle_filled(pos, radius, to_color32(color));
                }
            }

            // The garden is always animating.
            ctx.request_repaint();
        });
    }
}

/// Converts a linear RGB triple in `[0, 1]` to a screen color with the
/// plant material's translucency.
fn to_color32(color: Vec3) -> egui::Color32 {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(
        channel(color.x),
        channel(color.y),
        channel(color.z),
        204,
    )
}

impl App for Viewer {
    /// eframe callback that advances the garden and builds all panels.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.tick(ctx);
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_console(ctx);
        self.ui_bio_panel(ctx);
        self.ui_central_panel(ctx);
    }
}
