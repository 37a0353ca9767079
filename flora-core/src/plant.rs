//! Plant vitals and the day-cycle bookkeeping that drives them.
//!
//! Care gestures feed the water and sun meters during the day; the sleep
//! cycle judges the finished day against the species' comfort bands,
//! settles health and growth, and starts the next morning.

use std::fmt;

use crate::gesture::Gesture;
use crate::species::SpeciesProfile;

/// Water or sun gained per care tick while the matching gesture is held.
const CARE_PER_TICK: f32 = 1.0;
/// Soil moisture lost to evaporation overnight.
const EVAPORATION: f32 = 20.0;
/// Health reward for keeping a meter inside its comfort band all day.
const GOOD_CARE_REWARD: f32 = 5.0;
/// Smallest health penalty once a meter leaves its band.
const MIN_PENALTY: f32 = 5.0;
/// Daily growth while the plant is thriving.
const GROWTH_SPURT: f32 = 8.0;
/// Daily shrinkage while the plant is ailing.
const WITHER: f32 = 2.0;
/// Health needed after the nightly judgement to keep growing.
const THRIVING_HEALTH: f32 = 60.0;
/// Growth meter of a freshly potted plant.
const SPROUT_GROWTH: f32 = 15.0;

/// Maturity bands derived from the growth meter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlantStage {
    Seedling,
    Growing,
    Mature,
    Flowering,
}

impl PlantStage {
    /// Step function from the growth meter (0-100) to a maturity band.
    pub fn for_growth(growth: f32) -> Self {
        if growth < 30.0 {
            Self::Seedling
        } else if growth < 70.0 {
            Self::Growing
        } else if growth < 90.0 {
            Self::Mature
        } else {
            Self::Flowering
        }
    }
}

impl fmt::Display for PlantStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Seedling => "Seedling",
            Self::Growing => "Growing",
            Self::Mature => "Mature",
            Self::Flowering => "Flowering",
        };
        f.write_str(label)
    }
}

/// Live vitals for the potted plant. All meters run 0-100.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlantState {
    /// Soil moisture; persists across days, minus evaporation.
    pub water: f32,
    /// Light gathered today; resets every morning.
    pub sun: f32,
    pub health: f32,
    pub growth: f32,
    pub stage: PlantStage,
    pub day: u32,
}

/// What happened overnight, for the morning status message.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DayReport {
    /// The day that has just begun.
    pub day: u32,
    /// Soil moisture when the plant went to sleep.
    pub previous_water: f32,
    /// Light gathered over the finished day.
    pub previous_sun: f32,
    pub health_change: f32,
    pub growth_change: f32,
}

impl PlantState {
    /// Fresh day-1 state for a newly potted plant.
    ///
    /// Soil starts at the species' ideal moisture; light starts at zero
    /// and has to be gathered over the day.
    pub fn planted(profile: &SpeciesProfile) -> Self {
        Self {
            water: profile.ideal_water,
            sun: 0.0,
            health: 100.0,
            growth: SPROUT_GROWTH,
            stage: PlantStage::for_growth(SPROUT_GROWTH),
            day: 1,
        }
    }

    /// Applies one care tick for the active gesture.
    ///
    /// Watering and sunlight fill their meters; weeding is cosmetic and
    /// changes nothing here.
    pub fn apply_care(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::Watering => self.water = (self.water + CARE_PER_TICK).min(100.0),
            Gesture::Sunlight => self.sun = (self.sun + CARE_PER_TICK).min(100.0),
            Gesture::Weeding | Gesture::None => {}
        }
    }

    /// Runs one sleep cycle: judge the finished day's care, settle health
    /// and growth, evaporate soil moisture, reset the sun meter, and
    /// advance the calendar.
    pub fn advance_day(&mut self, profile: &SpeciesProfile) -> DayReport {
        let previous_water = self.water;
        let previous_sun = self.sun;

        let health_change = care_delta(previous_water, profile.ideal_water, profile.tolerance)
            + care_delta(previous_sun, profile.ideal_sun, profile.tolerance);
        let health = (self.health + health_change).clamp(0.0, 100.0);

        let growth_change = if health > THRIVING_HEALTH {
            GROWTH_SPURT
        } else {
            -WITHER
        };
        let growth = (self.growth + growth_change).clamp(0.0, 100.0);

        self.water = (previous_water - EVAPORATION).max(0.0);
        self.sun = 0.0;
        self.health = health;
        self.growth = growth;
        self.stage = PlantStage::for_growth(growth);
        self.day += 1;

        tracing::debug!(
            day = self.day,
            health = self.health,
            growth = self.growth,
            "sleep cycle settled"
        );

        DayReport {
            day: self.day,
            previous_water,
            previous_sun,
            health_change,
            growth_change,
        }
    }
}

/// Health delta contributed by one care meter: a flat reward inside the
/// comfort band, otherwise a penalty growing with the excess deviation
/// but never below the minimum.
fn care_delta(value: f32, ideal: f32, tolerance: f32) -> f32 {
    let deviation = (value - ideal).abs();
    if deviation <= tolerance {
        GOOD_CARE_REWARD
    } else {
        -((deviation - tolerance) / 2.0).floor().max(MIN_PENALTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::Catalog;

    fn basil() -> SpeciesProfile {
        // ideal_water 85, ideal_sun 75, tolerance 10
        Catalog::builtin().find("basil").cloned().unwrap()
    }

    #[test]
    fn stages_follow_growth_bands() {
        assert_eq!(PlantStage::for_growth(0.0), PlantStage::Seedling);
        assert_eq!(PlantStage::for_growth(29.9), PlantStage::Seedling);
        assert_eq!(PlantStage::for_growth(30.0), PlantStage::Growing);
        assert_eq!(PlantStage::for_growth(69.9), PlantStage::Growing);
        assert_eq!(PlantStage::for_growth(70.0), PlantStage::Mature);
        assert_eq!(PlantStage::for_growth(89.9), PlantStage::Mature);
        assert_eq!(PlantStage::for_growth(90.0), PlantStage::Flowering);
        assert_eq!(PlantStage::for_growth(100.0), PlantStage::Flowering);
    }

    #[test]
    fn potting_starts_at_day_one() {
        let state = PlantState::planted(&basil());
        assert_eq!(state.day, 1);
        assert_eq!(state.water, 85.0);
        assert_eq!(state.sun, 0.0);
        assert_eq!(state.health, 100.0);
        assert_eq!(state.growth, 15.0);
        assert_eq!(state.stage, PlantStage::Seedling);
    }

    #[test]
    fn care_ticks_fill_their_meter_and_cap_at_hundred() {
        let mut state = PlantState::planted(&basil());
        state.sun = 99.5;

        state.apply_care(Gesture::Sunlight);
        assert_eq!(state.sun, 100.0);
        state.apply_care(Gesture::Sunlight);
        assert_eq!(state.sun, 100.0);

        let before = state;
        state.apply_care(Gesture::Weeding);
        state.apply_care(Gesture::None);
        assert_eq!(state, before);
    }

    #[test]
    fn perfect_care_rewards_both_meters() {
        let profile = basil();
        let mut state = PlantState::planted(&profile);
        state.health = 80.0;
        state.sun = profile.ideal_sun;

        let report = state.advance_day(&profile);

        assert_eq!(report.health_change, 10.0);
        assert_eq!(state.health, 90.0);
        assert_eq!(report.growth_change, GROWTH_SPURT);
        assert_eq!(state.growth, 23.0);
        assert_eq!(state.day, 2);
        // Overnight housekeeping: evaporation and sun reset.
        assert_eq!(state.water, 65.0);
        assert_eq!(state.sun, 0.0);
    }

    #[test]
    fn neglect_penalizes_scaled_by_deviation() {
        let profile = basil();
        let mut state = PlantState::planted(&profile);
        state.water = 50.0; // deviation 35, past tolerance by 25
        state.sun = profile.ideal_sun;

        let report = state.advance_day(&profile);

        // floor(25 / 2) = 12 water penalty, +5 sun reward.
        assert_eq!(report.health_change, -7.0);
        assert_eq!(state.health, 93.0);
    }

    #[test]
    fn small_misses_still_cost_the_minimum_penalty() {
        let profile = basil();
        let mut state = PlantState::planted(&profile);
        state.water = profile.ideal_water - profile.tolerance - 4.0;
        state.sun = profile.ideal_sun;

        let report = state.advance_day(&profile);

        // floor(4 / 2) = 2 is below the 5-point minimum.
        assert_eq!(report.health_change, 0.0);
        assert_eq!(state.health, 100.0);
    }

    #[test]
    fn boundary_of_the_band_counts_as_good_care() {
        let profile = basil();
        let mut state = PlantState::planted(&profile);
        state.water = profile.ideal_water + profile.tolerance;
        state.sun = profile.ideal_sun - profile.tolerance;
        state.health = 50.0;

        let report = state.advance_day(&profile);
        assert_eq!(report.health_change, 10.0);
    }

    #[test]
    fn ailing_plants_wither_and_floor_at_zero() {
        let profile = basil();
        let mut state = PlantState::planted(&profile);
        state.health = 10.0;
        state.growth = 1.0;
        state.water = 0.0;
        state.sun = 0.0;

        let report = state.advance_day(&profile);

        assert_eq!(report.growth_change, -WITHER);
        assert_eq!(state.growth, 0.0);
        assert!(state.health < 10.0);
        assert_eq!(state.stage, PlantStage::Seedling);
    }

    #[test]
    fn health_clamps_at_both_ends() {
        let profile = basil();

        let mut thriving = PlantState::planted(&profile);
        thriving.sun = profile.ideal_sun;
        thriving.advance_day(&profile);
        assert_eq!(thriving.health, 100.0);

        let mut dying = PlantState::planted(&profile);
        dying.health = 3.0;
        dying.water = 0.0;
        dying.sun = 0.0;
        dying.advance_day(&profile);
        assert_eq!(dying.health, 0.0);
    }

    #[test]
    fn growth_crossing_a_band_updates_the_stage() {
        let profile = basil();
        let mut state = PlantState::planted(&profile);
        state.growth = 88.0;
        state.health = 90.0;
        state.sun = profile.ideal_sun;

        state.advance_day(&profile);

        assert_eq!(state.growth, 96.0);
        assert_eq!(state.stage, PlantStage::Flowering);
    }

    #[test]
    fn evaporation_floors_at_zero() {
        let profile = basil();
        let mut state = PlantState::planted(&profile);
        state.water = 12.0;
        state.advance_day(&profile);
        assert_eq!(state.water, 0.0);
    }
}
