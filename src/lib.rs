//! Core library for the pod-racing decision engine: geometry, physics,
//! scoring, the evolutionary solver, and the turn driver that wires them
//! to an input/output channel.

pub mod constants;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod physics;
pub mod pod;
pub mod rng;
pub mod scorer;
pub mod solver;
pub mod track;
