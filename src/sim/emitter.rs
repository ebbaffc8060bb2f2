//! Spawn policy for the driver loop
//!
//! Owns everything the solver deliberately does not: when to spawn, where,
//! how fast, and what tint each particle gets. Cadence runs on the solver
//! clock and radius jitter comes from a seeded RNG, so identical seeds and
//! frame counts reproduce identical populations.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::solver::{ParticleId, Solver};
use crate::consts::{
    MAX_PARTICLE_COUNT, MAX_PARTICLE_RADIUS, MIN_PARTICLE_RADIUS, SPAWN_INTERVAL, SPAWN_MAX_ANGLE,
    SPAWN_ORIGIN, SPAWN_SPEED,
};
use crate::polar_to_cartesian;

/// Emits particles into a [`Solver`] on a fixed cadence
pub struct Emitter {
    /// Seconds of simulation time between spawns
    pub interval: f32,
    /// Launch speed (px/s)
    pub speed: f32,
    /// Spawn point
    pub origin: Vec2,
    /// Smallest radius the jitter can produce
    pub radius_min: f32,
    /// Largest radius the jitter can produce
    pub radius_max: f32,
    /// Population cap; spawning stops here
    pub max_count: usize,
    /// Half-range of the sine-swept launch angle (radians)
    pub max_angle: f32,
    rng: Pcg32,
    last_spawn: f32,
}

impl Emitter {
    /// Emitter with the reference policy from [`crate::consts`]
    pub fn new(seed: u64) -> Self {
        Self {
            interval: SPAWN_INTERVAL,
            speed: SPAWN_SPEED,
            origin: SPAWN_ORIGIN,
            radius_min: MIN_PARTICLE_RADIUS,
            radius_max: MAX_PARTICLE_RADIUS,
            max_count: MAX_PARTICLE_COUNT,
            max_angle: SPAWN_MAX_ANGLE,
            rng: Pcg32::seed_from_u64(seed),
            last_spawn: 0.0,
        }
    }

    /// Spawn one particle if the cadence allows and the cap is not reached
    ///
    /// The launch angle sweeps back and forth with the solver clock, which
    /// fans consecutive particles across the arena.
    pub fn try_spawn(&mut self, solver: &mut Solver) -> Option<ParticleId> {
        if solver.particle_count() >= self.max_count {
            return None;
        }
        let now = solver.time();
        if now - self.last_spawn < self.interval {
            return None;
        }
        self.last_spawn = now;

        let radius = self.rng.random_range(self.radius_min..=self.radius_max);
        let id = solver.add_particle(self.origin, radius);
        let angle = self.max_angle * now.sin() + FRAC_PI_2;
        solver.set_particle_velocity(id, polar_to_cartesian(self.speed, angle));
        solver.particle_mut(id).tint = rainbow(now);
        Some(id)
    }
}

/// Rainbow tint from the simulation clock, packed 0xRRGGBBAA
pub fn rainbow(t: f32) -> u32 {
    let r = t.sin();
    let g = (t + TAU / 3.0).sin();
    let b = (t + 2.0 * TAU / 3.0).sin();
    let channel = |c: f32| (255.0 * c * c) as u32;
    (channel(r) << 24) | (channel(g) << 16) | (channel(b) << 8) | 0xFF
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_solver() -> Solver {
        let mut solver = Solver::new();
        solver.set_update_rate(60);
        solver.set_substeps(8);
        solver.set_boundary(Vec2::new(500.0, 500.0), 450.0);
        solver
    }

    #[test]
    fn respects_the_cadence() {
        let mut solver = test_solver();
        let mut emitter = Emitter::new(1);
        assert!(emitter.try_spawn(&mut solver).is_none(), "t=0 is too early");
        solver.advance();
        solver.advance();
        assert!(emitter.try_spawn(&mut solver).is_some());
        assert!(
            emitter.try_spawn(&mut solver).is_none(),
            "second spawn in the same frame must wait"
        );
    }

    #[test]
    fn respects_the_population_cap() {
        let mut solver = test_solver();
        let mut emitter = Emitter::new(1);
        emitter.max_count = 3;
        for _ in 0..60 {
            solver.advance();
            emitter.try_spawn(&mut solver);
        }
        assert_eq!(solver.particle_count(), 3);
    }

    #[test]
    fn spawned_particles_launch_at_the_configured_speed() {
        let mut solver = test_solver();
        let mut emitter = Emitter::new(1);
        solver.advance();
        solver.advance();
        let id = emitter.try_spawn(&mut solver).expect("cadence elapsed");
        let v = solver.particle(id).velocity(solver.step_dt());
        assert!((v.length() - emitter.speed).abs() < 0.5);
    }

    #[test]
    fn same_seed_reproduces_the_same_population() {
        let run = |seed: u64| {
            let mut solver = test_solver();
            let mut emitter = Emitter::new(seed);
            for _ in 0..120 {
                emitter.try_spawn(&mut solver);
                solver.advance();
            }
            solver
        };
        let first = run(7);
        let second = run(7);
        assert_eq!(first.particle_count(), second.particle_count());
        for (a, b) in first.particles().iter().zip(second.particles()) {
            assert_eq!(a.pos, b.pos);
            assert_eq!(a.radius, b.radius);
            assert_eq!(a.tint, b.tint);
        }
    }

    #[test]
    fn rainbow_packs_opaque_rgba() {
        for i in 0..50 {
            let tint = rainbow(i as f32 * 0.37);
            assert_eq!(tint & 0xFF, 0xFF, "alpha must be opaque");
        }
        // Channels peak where sin² peaks
        let red_heavy = rainbow(FRAC_PI_2);
        assert!(red_heavy >> 24 >= 254);
    }
}
