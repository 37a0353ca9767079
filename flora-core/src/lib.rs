//! Core particle garden library: generative plants, their day-to-day
//! vitals, and the per-frame animation that ties them together.
//!
//! Main components:
//! - [`species`] — species profiles and catalog loading.
//! - [`particle`] — particle storage for one generated plant.
//! - [`generate`] — procedural generation, one algorithm per species.
//! - [`animate`] — per-frame growth/health animation and coloring.
//! - [`wind`] — the shared wind field.
//! - [`dust`] — ambient dust motes.
//! - [`plant`] — plant vitals and the day cycle.
//! - [`gesture`] — care gestures and their classification rule.
//! - [`advice`] — morning status messages.

pub mod advice;
pub mod animate;
pub mod dust;
pub mod generate;
pub mod gesture;
pub mod particle;
pub mod plant;
pub mod species;
pub mod wind;
