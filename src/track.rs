//! Immutable course description: checkpoints and lap count.

use crate::geometry::Vec2;

/// An immutable course: an ordered checkpoint loop traversed `laps` times.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    checkpoints: Vec<Vec2>,
    laps: u32,
}

impl Track {
    pub fn new(checkpoints: Vec<Vec2>, laps: u32) -> Self {
        debug_assert!(checkpoints.len() >= 2, "a track needs at least two checkpoints");
        debug_assert!(laps >= 1, "a track needs at least one lap");
        Self { checkpoints, laps }
    }

    pub fn checkpoints(&self) -> &[Vec2] {
        &self.checkpoints
    }

    pub fn checkpoint_count(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn checkpoint(&self, idx: usize) -> Vec2 {
        self.checkpoints[idx % self.checkpoints.len()]
    }

    pub fn laps(&self) -> u32 {
        self.laps
    }

    /// Total checkpoints a pod must pass to win the race.
    pub fn max_checkpoints(&self) -> u32 {
        self.checkpoints.len() as u32 * self.laps
    }

    /// The first checkpoint pods should head toward, used to orient them on
    /// the very first turn before any movement has happened.
    pub fn first_checkpoint(&self) -> Vec2 {
        self.checkpoint(1 % self.checkpoints.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_track() -> Track {
        Track::new(
            vec![Vec2::new(0.0, 0.0), Vec2::new(1000.0, 0.0), Vec2::new(1000.0, 1000.0)],
            3,
        )
    }

    #[test]
    fn max_checkpoints_multiplies_laps_by_count() {
        assert_eq!(sample_track().max_checkpoints(), 9);
    }

    #[test]
    fn checkpoint_indexing_wraps() {
        let t = sample_track();
        assert_eq!(t.checkpoint(3), t.checkpoint(0));
    }

    #[test]
    fn first_checkpoint_is_index_one() {
        let t = sample_track();
        assert_eq!(t.first_checkpoint(), t.checkpoint(1));
    }
}
