//! Verlet-form particle
//!
//! No explicit velocity field: velocity is implicit as the difference
//! between the current and previous position. Constraint and collision
//! passes can therefore correct positions directly and the next integrate
//! call folds the correction into the motion, which is what keeps the
//! scheme stable under heavy stacking.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A circular point mass stored in Verlet form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    /// Current position
    pub pos: Vec2,
    /// Position one substep ago (implicit velocity baseline)
    pub prev_pos: Vec2,
    /// Acceleration accumulator, cleared by [`Particle::integrate`]
    pub accel: Vec2,
    /// Collision radius; also stands in for mass (larger means heavier)
    pub radius: f32,
    /// Opaque display payload owned by the caller; the solver never reads it
    pub tint: u32,
}

impl Particle {
    /// Create a particle at rest (previous position equals current)
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            prev_pos: pos,
            accel: Vec2::ZERO,
            radius,
            tint: 0xFFFF_FFFF,
        }
    }

    /// Advance one substep of semi-implicit Verlet integration
    ///
    /// Reads the accumulated acceleration and clears it for the next
    /// substep. Positions corrected since the last call (collisions,
    /// boundary) feed into the displacement term here.
    pub fn integrate(&mut self, dt: f32) {
        let displacement = self.pos - self.prev_pos;
        self.prev_pos = self.pos;
        self.pos = self.pos + displacement + self.accel * (dt * dt);
        self.accel = Vec2::ZERO;
    }

    /// Accumulate acceleration for the next integrate call
    pub fn accelerate(&mut self, accel: Vec2) {
        self.accel += accel;
    }

    /// Overwrite the implicit velocity
    pub fn set_velocity(&mut self, velocity: Vec2, dt: f32) {
        self.prev_pos = self.pos - velocity * dt;
    }

    /// Add to the implicit velocity, composing with existing motion
    pub fn add_velocity(&mut self, velocity: Vec2, dt: f32) {
        self.prev_pos -= velocity * dt;
    }

    /// Implicit velocity over the given step (diagnostics only)
    pub fn velocity(&self, dt: f32) -> Vec2 {
        (self.pos - self.prev_pos) / dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 480.0;

    #[test]
    fn ballistic_step_advances_by_velocity() {
        let mut p = Particle::new(Vec2::new(100.0, 100.0), 10.0);
        p.set_velocity(Vec2::new(240.0, -60.0), DT);
        p.integrate(DT);
        let expected = Vec2::new(100.0 + 240.0 * DT, 100.0 - 60.0 * DT);
        assert!((p.pos - expected).length() < 1e-3);
    }

    #[test]
    fn integrate_applies_acceleration_and_clears_it() {
        let mut p = Particle::new(Vec2::ZERO, 10.0);
        p.accelerate(Vec2::new(0.0, 1000.0));
        p.integrate(0.1);
        assert!((p.pos.y - 1000.0 * 0.1 * 0.1).abs() < 1e-4);
        assert_eq!(p.accel, Vec2::ZERO);
    }

    #[test]
    fn velocity_round_trips_through_set() {
        let mut p = Particle::new(Vec2::new(5.0, 5.0), 2.0);
        p.set_velocity(Vec2::new(123.0, -45.0), DT);
        let v = p.velocity(DT);
        assert!((v - Vec2::new(123.0, -45.0)).length() < 1e-2);
    }

    #[test]
    fn add_velocity_composes() {
        let mut p = Particle::new(Vec2::ZERO, 2.0);
        p.set_velocity(Vec2::new(100.0, 0.0), DT);
        p.add_velocity(Vec2::new(0.0, 50.0), DT);
        let v = p.velocity(DT);
        assert!((v - Vec2::new(100.0, 50.0)).length() < 1e-2);
    }
}
