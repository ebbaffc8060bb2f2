//! Simulation settings
//!
//! Everything tunable in one serde struct: solver timing, arena geometry
//! and spawn policy. Loaded from JSON with per-field defaults, validated
//! before a solver is built from it.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{Emitter, Solver};

/// Tuning for a solver/emitter pair
///
/// Every field has a default from [`crate::consts`], so a JSON config only
/// needs to name the fields it overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// External update rate (frames per second)
    pub update_rate: u32,
    /// Substeps per frame
    pub substeps: u32,
    /// Gravity (px/s², y-down)
    pub gravity: Vec2,
    /// Arena center
    pub arena_center: Vec2,
    /// Arena radius
    pub arena_radius: f32,
    /// Seconds between spawns
    pub spawn_interval: f32,
    /// Launch speed (px/s)
    pub spawn_speed: f32,
    /// Spawn point
    pub spawn_origin: Vec2,
    /// Smallest spawned radius
    pub radius_min: f32,
    /// Largest spawned radius
    pub radius_max: f32,
    /// Population cap
    pub max_particles: usize,
    /// Half-range of the sine-swept launch angle (radians)
    pub spawn_max_angle: f32,
    /// Seed for the radius jitter RNG
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            update_rate: UPDATE_RATE,
            substeps: SUBSTEPS,
            gravity: GRAVITY,
            arena_center: ARENA_CENTER,
            arena_radius: ARENA_RADIUS,
            spawn_interval: SPAWN_INTERVAL,
            spawn_speed: SPAWN_SPEED,
            spawn_origin: SPAWN_ORIGIN,
            radius_min: MIN_PARTICLE_RADIUS,
            radius_max: MAX_PARTICLE_RADIUS,
            max_particles: MAX_PARTICLE_COUNT,
            spawn_max_angle: SPAWN_MAX_ANGLE,
            seed: 0,
        }
    }
}

impl Settings {
    /// Parse from a JSON document; missing fields fall back to defaults
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Reject values the solver treats as undefined behavior
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.substeps == 0 {
            return Err(SettingsError::ZeroSubsteps);
        }
        if self.update_rate == 0 {
            return Err(SettingsError::ZeroUpdateRate);
        }
        if !self.arena_radius.is_finite() || self.arena_radius <= 0.0 {
            return Err(SettingsError::NonPositive("arena_radius"));
        }
        if !self.radius_min.is_finite() || self.radius_min <= 0.0 {
            return Err(SettingsError::NonPositive("radius_min"));
        }
        if !self.spawn_interval.is_finite() || self.spawn_interval <= 0.0 {
            return Err(SettingsError::NonPositive("spawn_interval"));
        }
        if self.radius_max < self.radius_min {
            return Err(SettingsError::RadiusRange);
        }
        Ok(())
    }

    /// Build a configured solver/emitter pair
    pub fn build(&self) -> Result<(Solver, Emitter), SettingsError> {
        self.validate()?;
        log::debug!("settings validated: {self:?}");

        let mut solver = Solver::new();
        solver.set_update_rate(self.update_rate);
        solver.set_substeps(self.substeps);
        solver.set_gravity(self.gravity);
        solver.set_boundary(self.arena_center, self.arena_radius);

        let mut emitter = Emitter::new(self.seed);
        emitter.interval = self.spawn_interval;
        emitter.speed = self.spawn_speed;
        emitter.origin = self.spawn_origin;
        emitter.radius_min = self.radius_min;
        emitter.radius_max = self.radius_max;
        emitter.max_count = self.max_particles;
        emitter.max_angle = self.spawn_max_angle;

        Ok((solver, emitter))
    }
}

/// Settings rejected by [`Settings::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsError {
    /// `substeps` must be at least 1
    ZeroSubsteps,
    /// `update_rate` must be positive
    ZeroUpdateRate,
    /// The named field must be a positive, finite number
    NonPositive(&'static str),
    /// `radius_min` must not exceed `radius_max`
    RadiusRange,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::ZeroSubsteps => write!(f, "substeps must be at least 1"),
            SettingsError::ZeroUpdateRate => write!(f, "update_rate must be positive"),
            SettingsError::NonPositive(field) => write!(f, "{field} must be positive"),
            SettingsError::RadiusRange => write!(f, "radius_min must not exceed radius_max"),
        }
    }
}

impl std::error::Error for SettingsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn zero_substeps_rejected() {
        let settings = Settings {
            substeps: 0,
            ..Settings::default()
        };
        assert_eq!(settings.validate(), Err(SettingsError::ZeroSubsteps));
    }

    #[test]
    fn inverted_radius_range_rejected() {
        let settings = Settings {
            radius_min: 12.0,
            radius_max: 6.0,
            ..Settings::default()
        };
        assert_eq!(settings.validate(), Err(SettingsError::RadiusRange));
    }

    #[test]
    fn nan_arena_radius_rejected() {
        let settings = Settings {
            arena_radius: f32::NAN,
            ..Settings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::NonPositive("arena_radius"))
        );
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "substeps": 4, "seed": 99 }"#).unwrap();
        assert_eq!(settings.substeps, 4);
        assert_eq!(settings.seed, 99);
        assert_eq!(settings.update_rate, UPDATE_RATE);
        assert_eq!(settings.arena_radius, ARENA_RADIUS);
    }

    #[test]
    fn json_round_trips() {
        let settings = Settings {
            substeps: 2,
            arena_radius: 300.0,
            ..Settings::default()
        };
        let back = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(back.substeps, 2);
        assert_eq!(back.arena_radius, 300.0);
        assert_eq!(back.gravity, settings.gravity);
    }

    #[test]
    fn build_applies_the_timing() {
        let settings = Settings {
            update_rate: 120,
            substeps: 4,
            ..Settings::default()
        };
        let (solver, emitter) = settings.build().unwrap();
        assert!((solver.step_dt() - (1.0 / 120.0) / 4.0).abs() < 1e-7);
        assert_eq!(emitter.max_count, MAX_PARTICLE_COUNT);
    }
}
