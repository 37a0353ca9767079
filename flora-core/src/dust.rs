//! Ambient dust motes drifting around the plant.
//!
//! Purely cosmetic: the field shares the plant's wind sample but never
//! reads plant state or gestures, and the mote count stays fixed for the
//! life of the field.

use glam::Vec3;
use rand::Rng;

use crate::wind::Wind;

/// Vertical bound below which a settled mote respawns at the ceiling.
const FLOOR_Y: f32 = -8.0;
/// Respawn height for settled motes.
const CEILING_Y: f32 = 8.0;
/// Horizontal wrap bound; crossing one side re-enters from the other.
const WRAP_XZ: f32 = 15.0;
/// Half-extent of the spawn volume on x and z.
const SPAWN_HALF_XZ: f32 = 10.0;
/// Half-extent of the initial spawn volume on y.
const SPAWN_HALF_Y: f32 = 7.5;
/// Downward settling speed per update.
const SETTLE: f32 = 0.01;
/// Dust picks up most of the plant's wind, but not all of it.
const WIND_COUPLING: f32 = 0.8;
/// Brownian jitter span per axis per update.
const JITTER: f32 = 0.02;

/// Fixed-count cosmetic particle field.
#[derive(Debug)]
pub struct DustField {
    positions: Vec<Vec3>,
}

impl DustField {
    /// Spawns `count` motes uniformly inside the dust volume.
    pub fn new(count: usize, rng: &mut impl Rng) -> Self {
        let positions = (0..count)
            .map(|_| {
                Vec3::new(
                    rng.random_range(-SPAWN_HALF_XZ..=SPAWN_HALF_XZ),
                    rng.random_range(-SPAWN_HALF_Y..=SPAWN_HALF_Y),
                    rng.random_range(-SPAWN_HALF_XZ..=SPAWN_HALF_XZ),
                )
            })
            .collect();
        Self { positions }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Current mote positions.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Advances every mote one frame: settle, advect with the wind,
    /// jitter, then respawn or wrap at the volume bounds.
    pub fn advance(&mut self, wind: &Wind, rng: &mut impl Rng) {
        for mote in &mut self.positions {
            mote.y -= SETTLE;
            mote.x += wind.dir_x * wind.strength * WIND_COUPLING;
            mote.z += wind.dir_z * wind.strength * WIND_COUPLING;

            mote.x += (rng.random::<f32>() - 0.5) * JITTER;
            mote.y += (rng.random::<f32>() - 0.5) * JITTER;
            mote.z += (rng.random::<f32>() - 0.5) * JITTER;

            // Settled motes restart at the ceiling in a fresh column.
            if mote.y < FLOOR_Y {
                mote.y = CEILING_Y;
                mote.x = rng.random_range(-SPAWN_HALF_XZ..=SPAWN_HALF_XZ);
                mote.z = rng.random_range(-SPAWN_HALF_XZ..=SPAWN_HALF_XZ);
            }

            if mote.x > WRAP_XZ {
                mote.x = -WRAP_XZ;
            } else if mote.x < -WRAP_XZ {
                mote.x = WRAP_XZ;
            }
            if mote.z > WRAP_XZ {
                mote.z = -WRAP_XZ;
            } else if mote.z < -WRAP_XZ {
                mote.z = WRAP_XZ;
            }
        }
    }
}
