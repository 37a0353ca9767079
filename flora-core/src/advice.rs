//! Morning status messages from the plant to its caretaker.
//!
//! Composed locally from the species profile and the overnight report.
//! The plant complains about the specific meter that hurt it, cheers when
//! care was good, and keeps it short. No network, no oracle.

use crate::plant::{DayReport, PlantStage, PlantState};
use crate::species::SpeciesProfile;

/// How one care meter compared to the species' comfort band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Verdict {
    Low,
    Comfortable,
    High,
}

/// Strictly outside the band counts as a miss; the boundary is comfort.
fn judge(value: f32, ideal: f32, tolerance: f32) -> Verdict {
    if value > ideal + tolerance {
        Verdict::High
    } else if value < ideal - tolerance {
        Verdict::Low
    } else {
        Verdict::Comfortable
    }
}

/// Greeting for a freshly potted plant.
pub fn planting_message(profile: &SpeciesProfile) -> String {
    format!("Day 1: You have planted a {}.", profile.name)
}

/// Short first-person status update for the morning after a sleep cycle.
pub fn morning_report(state: &PlantState, profile: &SpeciesProfile, report: &DayReport) -> String {
    let mut parts = vec![format!("Morning of day {}.", report.day)];

    match judge(report.previous_water, profile.ideal_water, profile.tolerance) {
        Verdict::Low => parts.push("The soil ran far too dry yesterday.".to_owned()),
        Verdict::High => parts.push("My soil was waterlogged yesterday.".to_owned()),
        Verdict::Comfortable => {}
    }
    match judge(report.previous_sun, profile.ideal_sun, profile.tolerance) {
        Verdict::Low => parts.push("It was too dark for my leaves.".to_owned()),
        Verdict::High => parts.push("That was too much sun for me.".to_owned()),
        Verdict::Comfortable => {}
    }

    if report.health_change > 0.0 {
        parts.push("Yesterday's care suited me; I feel stronger.".to_owned());
    } else if report.health_change < 0.0 {
        parts.push("I feel weaker this morning.".to_owned());
    } else {
        parts.push("I held steady overnight.".to_owned());
    }

    if state.stage == PlantStage::Flowering && report.growth_change > 0.0 {
        parts.push("My blossoms are opening.".to_owned());
    }

    parts.join(" ")
}
