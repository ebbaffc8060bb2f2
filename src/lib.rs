//! Verlet Arena - a substepped particle solver in a circular arena
//!
//! Core modules:
//! - `sim`: the deterministic solver core (Verlet particles, pairwise
//!   collisions, circular boundary) plus the spawn policy the driver uses
//! - `settings`: data-driven tuning loaded from JSON
//!
//! The crate deliberately ends at the solver boundary: a frontend calls
//! [`Solver::advance`] once per frame, then reads back particle positions,
//! radii and tints to draw them however it likes. No rendering, windowing
//! or persistence lives here.

pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};
pub use sim::{Emitter, Particle, ParticleId, Solver};

use glam::Vec2;

/// Simulation tuning constants
pub mod consts {
    use glam::Vec2;

    /// External update rate (frames per second)
    pub const UPDATE_RATE: u32 = 60;
    /// Substeps per frame
    pub const SUBSTEPS: u32 = 8;

    /// Arena center in window-space pixels
    pub const ARENA_CENTER: Vec2 = Vec2::new(500.0, 500.0);
    /// Arena radius
    pub const ARENA_RADIUS: f32 = 450.0;

    /// Gravity (px/s², y grows downward in window space)
    pub const GRAVITY: Vec2 = Vec2::new(0.0, 4000.0);
    /// Fraction of pair overlap corrected per collision pass; under 1 so a
    /// deep overlap relaxes across substeps instead of exploding
    pub const RESPONSE_COEF: f32 = 0.75;

    /// Seconds between spawns
    pub const SPAWN_INTERVAL: f32 = 0.025;
    /// Launch speed (px/s)
    pub const SPAWN_SPEED: f32 = 1000.0;
    /// Spawn point, above center so particles rain through the arena
    pub const SPAWN_ORIGIN: Vec2 = Vec2::new(500.0, 200.0);
    /// Particle radius jitter range
    pub const MIN_PARTICLE_RADIUS: f32 = 5.0;
    /// Particle radius jitter range
    pub const MAX_PARTICLE_RADIUS: f32 = 20.0;
    /// Population cap
    pub const MAX_PARTICLE_COUNT: usize = 2000;
    /// Half-range of the sine-swept launch angle (radians)
    pub const SPAWN_MAX_ANGLE: f32 = 1.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
