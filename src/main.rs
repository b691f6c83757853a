use rocketry::{Config, Phase, Simulation};
use std::{env, error::Error};
use tracing::info;

/// Give up after this many generations without a solution.
const GENERATION_LIMIT: usize = 10_000;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().init();

    let path = env::args().nth(1).unwrap_or_else(|| "config.json".into());
    let mut sim = Simulation::new(Config::from_path(&path)?);

    loop {
        match sim.advance()? {
            Phase::Running => {}
            Phase::Breeding => {
                let frame = sim.snapshot();
                info!(
                    generation = frame.generation,
                    fleet = frame.rockets.len(),
                    peak = frame.peak_fitness,
                    "bred next generation"
                );
                if frame.generation > GENERATION_LIMIT {
                    info!("no solution within {GENERATION_LIMIT} generations");
                    break;
                }
            }
            Phase::Solved => {
                let frame = sim.snapshot();
                info!(
                    generation = frame.generation,
                    tick = frame.tick,
                    peak = frame.peak_fitness,
                    "a rocket reached the goal"
                );
                break;
            }
        }
    }

    Ok(())
}
