//! Mutable racer state and the move/turn/plan types the solver searches over.

use crate::constants::{SHIELD_COOLDOWN, SIMULATION_HORIZON};
use crate::geometry::Vec2;

/// One racer's mutable state. Cloned freely; simulation never mutates the
/// authoritative copies held by the driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pod {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Facing angle in degrees, `[0, 360)`.
    pub angle: i32,
    pub next_checkpoint_id: usize,
    pub total_checkpoints_passed: u32,
    pub boost_available: bool,
    /// `0..=SHIELD_COOLDOWN`; `SHIELD_COOLDOWN` means "activated this turn".
    pub shield_cooldown: i32,
    /// Scorer scratch space, recomputed every scoring pass.
    pub score: i64,
}

impl Pod {
    pub fn new() -> Self {
        Self {
            position: Vec2::new(0.0, 0.0),
            velocity: Vec2::new(0.0, 0.0),
            angle: -1,
            next_checkpoint_id: 0,
            total_checkpoints_passed: 0,
            boost_available: true,
            shield_cooldown: 0,
            score: 0,
        }
    }

    /// Effective mass given the current shield state.
    pub fn mass(&self) -> f64 {
        if self.shield_cooldown == SHIELD_COOLDOWN {
            crate::constants::SHIELDED_MASS
        } else {
            crate::constants::UNSHIELDED_MASS
        }
    }

    /// Overwrites position/velocity/angle/checkpoint from a fresh turn's
    /// input line, incrementing the checkpoint counter on a checkpoint change.
    pub fn update_from_input(
        &mut self,
        position: Vec2,
        velocity: Vec2,
        angle: i32,
        next_checkpoint_id: usize,
    ) {
        if next_checkpoint_id != self.next_checkpoint_id {
            self.total_checkpoints_passed += 1;
        }
        self.position = position;
        self.velocity = velocity;
        self.angle = angle;
        self.next_checkpoint_id = next_checkpoint_id;
    }

    /// Applies the cooldown/boost bookkeeping of a committed move, without
    /// touching position or velocity (those come from next turn's input).
    pub fn apply_move_flags(&mut self, mv: &Move) {
        if mv.use_shield {
            self.shield_cooldown = SHIELD_COOLDOWN;
        } else if self.shield_cooldown > 0 {
            self.shield_cooldown -= 1;
        }
        if self.shield_cooldown == 0 && mv.use_boost && self.boost_available {
            self.boost_available = false;
        }
    }
}

impl Default for Pod {
    fn default() -> Self {
        Self::new()
    }
}

/// One racer's command for a single simulated turn.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Move {
    /// `[-ROTATION_MAXIMUM, ROTATION_MAXIMUM]`.
    pub rotation: i32,
    /// `[0, THRUST_MAXIMUM]`.
    pub thrust: i32,
    pub use_boost: bool,
    pub use_shield: bool,
}

/// A pair of moves, one per owned pod, for a single simulated turn.
pub type Turn = [Move; 2];

/// A fixed-length sequence of turns the solver evaluates as one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plan {
    pub turns: [Turn; SIMULATION_HORIZON],
    pub score: i64,
}

impl Plan {
    pub fn empty() -> Self {
        Self {
            turns: [[Move::default(); 2]; SIMULATION_HORIZON],
            score: i64::MIN,
        }
    }
}

impl Default for Plan {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkpoint_change_increments_total_passed() {
        let mut pod = Pod::new();
        pod.next_checkpoint_id = 0;
        pod.update_from_input(Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.0), 0, 1);
        assert_eq!(pod.total_checkpoints_passed, 1);
        pod.update_from_input(Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.0), 0, 1);
        assert_eq!(pod.total_checkpoints_passed, 1, "same checkpoint id does not re-trigger");
    }

    #[test]
    fn shield_activation_sets_cooldown_and_skips_decrement_same_turn() {
        let mut pod = Pod::new();
        let mv = Move { use_shield: true, ..Default::default() };
        pod.apply_move_flags(&mv);
        assert_eq!(pod.shield_cooldown, SHIELD_COOLDOWN);
    }

    #[test]
    fn mass_is_ten_only_while_shield_freshly_active() {
        let mut pod = Pod::new();
        assert_eq!(pod.mass(), crate::constants::UNSHIELDED_MASS);
        pod.shield_cooldown = SHIELD_COOLDOWN;
        assert_eq!(pod.mass(), crate::constants::SHIELDED_MASS);
        pod.shield_cooldown = SHIELD_COOLDOWN - 1;
        assert_eq!(pod.mass(), crate::constants::UNSHIELDED_MASS);
    }

    #[test]
    fn boost_consumed_only_once() {
        let mut pod = Pod::new();
        let mv = Move { use_boost: true, ..Default::default() };
        pod.apply_move_flags(&mv);
        assert!(!pod.boost_available);
    }
}
