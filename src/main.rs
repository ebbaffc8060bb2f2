//! Headless driver
//!
//! Stands in for the window loop the solver does not own: load settings,
//! spawn on cadence, advance at the fixed rate, log progress. A frontend
//! would read back `solver.particles()` after each advance and draw them;
//! here we only report population and clock.

use std::process::ExitCode;

use verlet_arena::Settings;

/// Simulated seconds to run
const DEMO_SECONDS: u32 = 10;

fn main() -> ExitCode {
    env_logger::init();

    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("failed to load settings: {e}");
            return ExitCode::FAILURE;
        }
    };

    let (mut solver, mut emitter) = match settings.build() {
        Ok(pair) => pair,
        Err(e) => {
            log::error!("invalid settings: {e}");
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "arena radius {} at ({}, {}), {} Hz x {} substeps, seed {}",
        settings.arena_radius,
        settings.arena_center.x,
        settings.arena_center.y,
        settings.update_rate,
        settings.substeps,
        settings.seed,
    );

    let frames = settings.update_rate * DEMO_SECONDS;
    let mut next_report = 1.0;
    for _ in 0..frames {
        emitter.try_spawn(&mut solver);
        solver.advance();
        if solver.time() >= next_report {
            log::info!(
                "t={:.2}s particles={}",
                solver.time(),
                solver.particle_count()
            );
            next_report += 1.0;
        }
    }

    log::info!(
        "done: {} particles after {:.2} simulated seconds",
        solver.particle_count(),
        solver.time()
    );
    ExitCode::SUCCESS
}

/// Settings from the JSON path given as the first argument, else defaults
fn load_settings() -> Result<Settings, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)?;
            Ok(Settings::from_json(&text)?)
        }
        None => Ok(Settings::default()),
    }
}
