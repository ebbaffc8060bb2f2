//! Deterministic particle simulation
//!
//! The solver core must stay pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, and only in the spawn policy, never in the solver
//! - Stable pair iteration order (ascending index)
//! - No rendering or platform dependencies

pub mod emitter;
pub mod particle;
pub mod solver;

pub use emitter::{Emitter, rainbow};
pub use particle::Particle;
pub use solver::{ParticleId, Solver};
