//! End-to-end growth scenarios: generation, animation, and the day cycle
//! working together the way the viewer drives them.

use flora_core::advice;
use flora_core::animate::{self, Animator};
use flora_core::generate::generate;
use flora_core::gesture::Gesture;
use flora_core::particle::{ParticleKind, ParticleSet};
use flora_core::plant::PlantState;
use flora_core::species::{Catalog, SpeciesProfile};
use flora_core::wind::Wind;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn profile(id: &str) -> SpeciesProfile {
    Catalog::builtin().find(id).cloned().unwrap()
}

/// One animation frame in still conditions with no gesture.
fn frame(set: &ParticleSet, species: &SpeciesProfile, state: &PlantState) -> Animator {
    let mut animator = Animator::for_set(set);
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    animator.advance(
        set,
        species,
        state,
        Gesture::None,
        &Wind::at(2.0),
        2.0,
        &mut rng,
    );
    animator
}

#[test]
fn freshly_potted_basil_shows_stem_but_no_leaves() {
    let species = profile("basil");
    let mut rng = ChaCha8Rng::seed_from_u64(21);
    let set = generate(&species, &mut rng);

    // A fresh plant sits at growth 15; basil's first leaf node reveals at 25.
    let state = PlantState::planted(&species);
    let animator = frame(&set, &species, &state);

    let mut visible_wood = 0;
    for i in 0..set.len() {
        if !animator.visible()[i] {
            continue;
        }
        match set.kinds()[i] {
            ParticleKind::Wood => visible_wood += 1,
            ParticleKind::Foliage => panic!("foliage visible on a fresh sprout"),
        }
    }
    assert!(visible_wood > 0);

    let scale = animate::uniform_scale(state.growth / 100.0);
    assert!((scale - 0.49).abs() < 1e-6);
}

#[test]
fn fully_grown_plants_show_every_particle_at_full_scale() {
    for species in &Catalog::builtin().species {
        let mut rng = ChaCha8Rng::seed_from_u64(22);
        let set = generate(species, &mut rng);

        let mut state = PlantState::planted(species);
        state.growth = 100.0;

        let animator = frame(&set, species, &state);
        assert_eq!(
            animator.visible_count(),
            set.len(),
            "{}: particles still hidden at full growth",
            species.id
        );
    }
    assert_eq!(animate::uniform_scale(1.0), 1.0);
}

#[test]
fn visibility_rises_monotonically_with_growth() {
    for species in &Catalog::builtin().species {
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        let set = generate(species, &mut rng);
        let mut state = PlantState::planted(species);

        let mut previous = 0;
        for step in 0..=10 {
            state.growth = step as f32 * 10.0;
            let animator = frame(&set, species, &state);
            let count = animator.visible_count();
            assert!(
                count >= previous,
                "{}: visible count fell from {previous} to {count} at growth {}",
                species.id,
                state.growth
            );
            previous = count;
        }
        assert_eq!(previous, set.len());
    }
}

#[test]
fn a_tended_day_grows_the_plant_and_reads_happy() {
    let species = profile("basil");
    let mut state = PlantState::planted(&species);

    // Gather light up to the ideal; soil is already at the ideal from potting.
    while state.sun < species.ideal_sun {
        state.apply_care(Gesture::Sunlight);
    }

    let report = state.advance_day(&species);

    assert_eq!(state.day, 2);
    assert!(report.health_change > 0.0);
    assert_eq!(state.growth, 23.0);

    let message = advice::morning_report(&state, &species, &report);
    assert!(message.contains("Morning of day 2"));
    assert!(message.contains("stronger"));
}

#[test]
fn neglect_withers_the_plant_and_hides_particles_again() {
    let species = profile("basil");
    let mut rng = ChaCha8Rng::seed_from_u64(24);
    let set = generate(&species, &mut rng);

    let mut state = PlantState::planted(&species);
    state.growth = 60.0;
    let lush = frame(&set, &species, &state).visible_count();

    // Nobody waters, nobody opens the curtains.
    for _ in 0..6 {
        state.advance_day(&species);
    }
    assert!(state.health < 60.0);
    assert!(state.growth < 60.0);

    let withered = frame(&set, &species, &state).visible_count();
    assert!(withered < lush);
}

#[test]
fn unknown_catalog_ids_render_like_ferns() {
    let fern = profile("fern");
    let mut exotic = fern.clone();
    exotic.id = "cactus".to_owned();
    exotic.name = "Mystery Cactus".to_owned();

    let mut rng_a = ChaCha8Rng::seed_from_u64(25);
    let mut rng_b = ChaCha8Rng::seed_from_u64(25);
    let fern_set = generate(&fern, &mut rng_a);
    let exotic_set = generate(&exotic, &mut rng_b);

    assert_eq!(fern_set.len(), exotic_set.len());

    let state = PlantState::planted(&fern);
    assert_eq!(
        frame(&fern_set, &fern, &state).visible_count(),
        frame(&exotic_set, &exotic, &state).visible_count()
    );
}

#[test]
fn equal_seeds_reproduce_identical_frames() {
    let species = profile("monstera");

    let mut rng_a = ChaCha8Rng::seed_from_u64(26);
    let mut rng_b = ChaCha8Rng::seed_from_u64(26);
    let set_a = generate(&species, &mut rng_a);
    let set_b = generate(&species, &mut rng_b);

    let mut state = PlantState::planted(&species);
    state.growth = 80.0;

    let frame_a = frame(&set_a, &species, &state);
    let frame_b = frame(&set_b, &species, &state);

    assert_eq!(frame_a.visible(), frame_b.visible());
    assert_eq!(frame_a.positions(), frame_b.positions());
    assert_eq!(frame_a.colors(), frame_b.colors());
}
