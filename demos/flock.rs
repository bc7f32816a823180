//! Headless flock demo
//!
//! Spawns a scattered flock around two obstacles, drives it toward a
//! target with a fixed-step clock and prints progress. Pass a path to load
//! tuning from JSON; the tuning in use is written next to it on exit.
//!
//! Run with: RUST_LOG=debug cargo run --example flock [tuning.json]

use flocksteer::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const AGENT_COUNT: usize = 200;
const TICKS: u64 = 600;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let tuning_path = std::env::args().nth(1);
    let tuning = match &tuning_path {
        Some(path) => TuningParameters::load(path)?,
        None => TuningParameters::default(),
    };

    let mut rng = StdRng::seed_from_u64(2024);
    let mut flock = Flock::new()
        .with_obstacle(Vec3::new(600.0, 0.0, 40.0))
        .with_obstacle(Vec3::new(1200.0, 30.0, -60.0));

    for _ in 0..AGENT_COUNT {
        let position = Vec3::new(
            rng.gen_range(-300.0..300.0),
            rng.gen_range(-60.0..60.0),
            rng.gen_range(-300.0..300.0),
        );
        flock.spawn(position, tuning)?;
    }

    let target = Vec3::new(2000.0, 100.0, 0.0);
    let mut clock = TickClock::new();
    clock.set_fixed_delta(Some(1.0 / 60.0));

    println!("Flying {} agents toward {target}", flock.len());
    for _ in 0..TICKS {
        let dt = clock.update();
        let moved = flock.step(dt, target);

        if clock.tick() % 60 == 0 {
            if let Some(centroid) = flock.centroid() {
                println!(
                    "t={:>5.2}s  moved {:>3}/{}  centroid ({:>7.1}, {:>6.1}, {:>6.1})  to target {:>7.1}",
                    clock.elapsed(),
                    moved,
                    flock.len(),
                    centroid.x,
                    centroid.y,
                    centroid.z,
                    centroid.distance(target),
                );
            }
        }
    }

    let raw = flock.raw_transforms();
    let bytes: &[u8] = flocksteer::bytemuck::cast_slice(&raw);
    println!("Final transform buffer: {} bytes", bytes.len());

    if let Some(path) = tuning_path {
        tuning.save(format!("{path}.out"))?;
    }
    Ok(())
}
