//! Particle storage for one generated plant.

use glam::Vec3;

/// Structural category of a plant particle.
///
/// Wood draws the species trunk color and only moves with wind and
/// breathing; foliage draws the leaf color and additionally picks up the
/// species-specific secondary motion and gesture tinting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    Wood,
    Foliage,
}

/// Structure-of-arrays storage for one generated plant.
///
/// The four columns share one length and ordering; index `i` in any column
/// refers to the same particle. A set is written once by the generator and
/// then only read: the animator keeps its own output buffers, and a species
/// change swaps in a whole new set.
#[derive(Debug, Default)]
pub struct ParticleSet {
    initial_positions: Vec<Vec3>,
    kinds: Vec<ParticleKind>,
    phases: Vec<f32>,
    growth_indices: Vec<f32>,
}

impl ParticleSet {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            initial_positions: Vec::with_capacity(capacity),
            kinds: Vec::with_capacity(capacity),
            phases: Vec::with_capacity(capacity),
            growth_indices: Vec::with_capacity(capacity),
        }
    }

    /// Appends one particle to every column.
    pub(crate) fn push(
        &mut self,
        initial_position: Vec3,
        kind: ParticleKind,
        growth_index: f32,
        phase: f32,
    ) {
        self.initial_positions.push(initial_position);
        self.kinds.push(kind);
        self.phases.push(phase);
        self.growth_indices.push(growth_index);
    }

    pub fn len(&self) -> usize {
        self.initial_positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.initial_positions.is_empty()
    }

    /// Rest positions as generated, before any animation.
    pub fn initial_positions(&self) -> &[Vec3] {
        &self.initial_positions
    }

    pub fn kinds(&self) -> &[ParticleKind] {
        &self.kinds
    }

    /// Fixed per-particle oscillation phases in `[0, 2*pi)`.
    pub fn phases(&self) -> &[f32] {
        &self.phases
    }

    /// Reveal thresholds in `[0, 1]`: a particle shows once the plant's
    /// growth fraction reaches its index.
    pub fn growth_indices(&self) -> &[f32] {
        &self.growth_indices
    }

    /// Number of wood particles in the set.
    pub fn wood_count(&self) -> usize {
        self.kinds
            .iter()
            .filter(|&&kind| kind == ParticleKind::Wood)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_stay_parallel() {
        let mut set = ParticleSet::with_capacity(2);
        set.push(Vec3::new(1.0, 2.0, 3.0), ParticleKind::Wood, 0.25, 0.0);
        set.push(Vec3::new(4.0, 5.0, 6.0), ParticleKind::Foliage, 0.75, 1.0);

        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
        assert_eq!(set.initial_positions().len(), set.len());
        assert_eq!(set.kinds().len(), set.len());
        assert_eq!(set.phases().len(), set.len());
        assert_eq!(set.growth_indices().len(), set.len());

        assert_eq!(set.kinds()[1], ParticleKind::Foliage);
        assert_eq!(set.growth_indices()[0], 0.25);
        assert_eq!(set.wood_count(), 1);
    }

    #[test]
    fn default_set_is_empty() {
        let set = ParticleSet::default();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.wood_count(), 0);
    }
}
