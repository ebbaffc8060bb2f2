//! Substepped Verlet solver for a circular arena
//!
//! Each external `advance()` runs several fixed substeps of
//! gravity → collisions → boundary → integrate. The pass order is
//! load-bearing: collision and boundary corrections move positions
//! directly (never the acceleration accumulator), and the integrate pass
//! that follows bakes those corrections into the implicit velocity.
//!
//! Collision resolution is a brute-force O(n²) pass over all unordered
//! pairs. That is the dominant cost and the scalability ceiling; the
//! design targets populations in the low thousands.

use glam::Vec2;

use super::particle::Particle;
use crate::consts::{ARENA_CENTER, ARENA_RADIUS, GRAVITY, RESPONSE_COEF, SUBSTEPS, UPDATE_RATE};

/// Stable handle to a particle in a [`Solver`]
///
/// A plain index into the solver's collection. Particles are never
/// removed, so a handle stays valid for the life of the solver and
/// survives collection growth, unlike a borrowed reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticleId(u32);

impl ParticleId {
    /// Position of the particle in [`Solver::particles`]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Owns the particle population and advances it at a fixed rate
pub struct Solver {
    particles: Vec<Particle>,
    gravity: Vec2,
    frame_dt: f32,
    time: f32,
    substeps: u32,
    boundary_center: Vec2,
    boundary_radius: f32,
}

impl Solver {
    /// Solver with the reference tuning from [`crate::consts`]
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            gravity: GRAVITY,
            frame_dt: 1.0 / UPDATE_RATE as f32,
            time: 0.0,
            substeps: SUBSTEPS,
            boundary_center: ARENA_CENTER,
            boundary_radius: ARENA_RADIUS,
        }
    }

    /// Append a particle at rest and return its handle
    pub fn add_particle(&mut self, pos: Vec2, radius: f32) -> ParticleId {
        debug_assert!(radius > 0.0, "particle radius must be positive");
        let id = ParticleId(self.particles.len() as u32);
        self.particles.push(Particle::new(pos, radius));
        id
    }

    /// Give a particle a launch velocity, expressed per substep
    pub fn set_particle_velocity(&mut self, id: ParticleId, velocity: Vec2) {
        let dt = self.step_dt();
        self.particles[id.index()].set_velocity(velocity, dt);
    }

    /// Advance the population by one external frame
    pub fn advance(&mut self) {
        self.time += self.frame_dt;
        let dt = self.step_dt();
        for _ in 0..self.substeps {
            self.apply_gravity();
            self.solve_collisions();
            self.apply_boundary();
            self.integrate_all(dt);
        }
    }

    /// Substeps per frame (must be at least 1)
    pub fn set_substeps(&mut self, substeps: u32) {
        debug_assert!(substeps >= 1, "substeps must be at least 1");
        self.substeps = substeps;
    }

    /// External update rate in frames per second (must be positive)
    pub fn set_update_rate(&mut self, rate: u32) {
        debug_assert!(rate > 0, "update rate must be positive");
        self.frame_dt = 1.0 / rate as f32;
    }

    /// Circular boundary particles are kept inside (radius must be positive)
    pub fn set_boundary(&mut self, center: Vec2, radius: f32) {
        debug_assert!(radius > 0.0, "boundary radius must be positive");
        self.boundary_center = center;
        self.boundary_radius = radius;
    }

    /// Constant per-substep gravity
    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Read-only view for rendering; insertion order is creation order
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle(&self, id: ParticleId) -> &Particle {
        &self.particles[id.index()]
    }

    /// Mutable access for caller-owned state (tint, launch tweaks)
    pub fn particle_mut(&mut self, id: ParticleId) -> &mut Particle {
        &mut self.particles[id.index()]
    }

    pub fn boundary(&self) -> (Vec2, f32) {
        (self.boundary_center, self.boundary_radius)
    }

    /// Substep interval, recomputed on demand
    pub fn step_dt(&self) -> f32 {
        self.frame_dt / self.substeps as f32
    }

    /// Simulation clock, advanced once per frame
    pub fn time(&self) -> f32 {
        self.time
    }

    fn apply_gravity(&mut self) {
        for p in &mut self.particles {
            p.accelerate(self.gravity);
        }
    }

    /// Resolve every unordered pair, ascending (i, j) with i < j
    ///
    /// Corrections apply immediately, so later pairs in the same substep
    /// see earlier corrections. The order is part of the observable
    /// numerics and must not change. Mass ratios are radius-proportional:
    /// the larger particle moves less. Coincident centers divide by zero;
    /// callers must not spawn exactly overlapping particles.
    fn solve_collisions(&mut self) {
        let count = self.particles.len();
        for i in 0..count {
            let (head, tail) = self.particles.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                let delta = a.pos - b.pos;
                let dist2 = delta.length_squared();
                let min_dist = a.radius + b.radius;
                if dist2 < min_dist * min_dist {
                    let dist = dist2.sqrt();
                    let n = delta / dist;
                    let ratio_a = a.radius / min_dist;
                    let ratio_b = b.radius / min_dist;
                    // Negative while overlapping; under-corrects per pass
                    let correction = 0.5 * RESPONSE_COEF * (dist - min_dist);
                    a.pos -= n * (ratio_b * correction);
                    b.pos += n * (ratio_a * correction);
                }
            }
        }
    }

    /// Project overshooting particles back onto the rim
    ///
    /// A particle exactly at the boundary center has no projection
    /// direction; that configuration is a caller precondition violation.
    fn apply_boundary(&mut self) {
        for p in &mut self.particles {
            let to_center = self.boundary_center - p.pos;
            let dist = to_center.length();
            if dist > self.boundary_radius - p.radius {
                let n = to_center / dist;
                p.pos = self.boundary_center - n * (self.boundary_radius - p.radius);
            }
        }
    }

    fn integrate_all(&mut self, dt: f32) {
        for p in &mut self.particles {
            p.integrate(dt);
        }
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}
