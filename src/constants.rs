//! Protocol constants shared by the physics engine and solver.
//!
//! These are part of the game's rules, not tuning knobs — see SPEC_FULL.md §4.9.

/// Disk radius within which a pod is considered to have passed a checkpoint.
pub const CHECKPOINT_RADIUS: f64 = 600.0;
/// Collision radius of a single pod.
pub const POD_RADIUS: f64 = 400.0;

/// Maximum magnitude of a single turn's rotation command, in degrees.
pub const ROTATION_MAXIMUM: i32 = 18;
/// Maximum raw thrust command.
pub const THRUST_MAXIMUM: i32 = 100;
/// Thrust applied in place of the normal command when boosting.
pub const THRUST_BOOST: f64 = 650.0;

/// Turns (inclusive of the activation turn) a shield locks out thrust.
pub const SHIELD_COOLDOWN: i32 = 4;
/// Effective mass of a pod whose shield is active.
pub const SHIELDED_MASS: f64 = 10.0;
/// Effective mass of a pod whose shield is inactive.
pub const UNSHIELDED_MASS: f64 = 1.0;

/// Velocity is scaled by this factor at the end of every simulated turn.
pub const FRICTION_FACTOR: f64 = 0.85;
/// Minimum and maximum rebound impulse magnitude after clamping.
pub const REBOUND_MINIMUM_IMPULSE: f64 = 120.0;

/// Number of future turns a candidate plan simulates.
pub const SIMULATION_HORIZON: usize = 4;
/// Number of incumbent plans kept between improvement rounds.
pub const SOLUTIONS_COUNT: usize = 6;

/// Per-checkpoint score weight used by the scorer (dominates in-track distance).
pub const CHECKPOINT_SCORE_FACTOR: i64 = 30_000;
/// Weight applied to the racer score-gap term in the combined side score.
pub const AHEAD_SCORE_BIAS: i64 = 2;

/// Wall-clock budget for the very first turn, in milliseconds, before the
/// safety factor is applied.
pub const TIMEOUT_FIRST_TURN_MS: u64 = 500;
/// Wall-clock budget for every subsequent turn, in milliseconds, before the
/// safety factor is applied.
pub const TIMEOUT_MS: u64 = 75;
/// Fraction of the nominal budget actually handed to the solver.
pub const TIMEOUT_SAFETY_FACTOR: f64 = 0.95;

/// Tolerance below which a relative-velocity or discriminant term is treated
/// as a physical non-event (no collision).
pub const EPSILON: f64 = 0.00001;

/// Distance projected along the output heading to build a target point.
pub const TARGET_PROJECTION_DISTANCE: f64 = 10_000.0;

/// Squared distance threshold above which the opening boost is considered.
pub const BOOST_DISTANCE_SQUARED_THRESHOLD: f64 = 9_000_000.0;

pub fn clamp_f64(value: f64, lower: f64, upper: f64) -> f64 {
    value.max(lower).min(upper)
}

pub fn clamp_i32(value: i32, lower: i32, upper: i32) -> i32 {
    value.max(lower).min(upper)
}
