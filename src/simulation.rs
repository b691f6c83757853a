//! The generation controller: ticks the fleet, scores it, and turns dead
//! generations into new ones.

use crate::{
    config::Config,
    constants::{ROCKETRY_DEFAULT_TICK_RATE, ROCKETRY_SOLVED_RADIUS, ROCKETRY_THRUST},
    fitness,
    random::{Happens, ProbBinding, ProbStatic, WyRng},
    reproduce::{reproduce, BreedError},
    rocket::{Rocket, RocketFactory, RocketId},
    world::{Point, Rect, World},
};
use serde::Serialize;
use tracing::info;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// What one [Simulation::advance] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// One kinematic tick was simulated
    Running,
    /// The fleet was dead; a new generation was bred and put on the pad
    Breeding,
    /// A rocket is on the goal; everything is frozen until a restart
    Solved,
}

/// The default probability-and-rng stack; see [crate::random].
pub type DefaultHappens = ProbBinding<ProbStatic, WyRng>;

/// Owns the world, the fleet, and the generation state machine.
///
/// Single-threaded and non-blocking: every [Simulation::advance] is one
/// finite step, paced by whatever clock the caller runs.
pub struct Simulation<H: Happens = DefaultHappens> {
    config: Config,
    world: World,
    rockets: Vec<Rocket>,
    factory: RocketFactory,
    rng: H,
    generation: usize,
    tick: usize,
    peak_fitness: f64,
    tick_rate: u32,
}

impl Simulation {
    /// A simulation seeded from the system entropy pool.
    pub fn new(config: Config) -> Self {
        Self::with_rng(config, DefaultHappens::default())
    }
}

impl<H: Happens> Simulation<H> {
    /// A simulation driven by the given probability/rng stack; tests pass a
    /// seeded rng here for reproducible runs.
    pub fn with_rng(config: Config, rng: H) -> Self {
        let mut sim = Self {
            world: config.world(),
            rockets: Vec::new(),
            factory: RocketFactory::new(),
            rng,
            generation: 1,
            tick: 0,
            peak_fitness: 0.0,
            tick_rate: ROCKETRY_DEFAULT_TICK_RATE,
            config,
        };
        sim.populate();
        sim
    }

    fn populate(&mut self) {
        self.rockets = (0..self.config.population)
            .map(|_| {
                let mut rocket = self.factory.spawn(&mut self.rng);
                rocket.launch(self.world.start);
                rocket
            })
            .collect();
    }

    /// Drive the state machine one step: report a solution if any rocket is
    /// on the goal, breed if the fleet is gone, otherwise simulate one tick.
    /// The solved check runs first, so it wins over the breeding trigger
    /// when both hold.
    pub fn advance(&mut self) -> Result<Phase, BreedError> {
        if self.found_solution() {
            return Ok(Phase::Solved);
        }
        if self.alive_count() == 0 {
            self.next_generation()?;
            return Ok(Phase::Breeding);
        }
        self.tick_fleet();
        Ok(Phase::Running)
    }

    /// Whether any rocket, alive or dead, sits within the solved radius of
    /// the current goal.
    pub fn found_solution(&self) -> bool {
        self.rockets
            .iter()
            .any(|r| r.pos.distance(self.world.goal) < ROCKETRY_SOLVED_RADIUS)
    }

    pub fn alive_count(&self) -> usize {
        self.rockets.iter().filter(|r| r.alive).count()
    }

    fn next_generation(&mut self) -> Result<(), BreedError> {
        let fleet = core::mem::take(&mut self.rockets);
        let mut pool = reproduce(fleet, self.config.population, &mut self.factory, &mut self.rng)?;
        for rocket in pool.iter_mut() {
            rocket.launch(self.world.start);
        }
        self.rockets = pool;
        self.generation += 1;
        self.tick = 0;
        info!(
            generation = self.generation,
            fleet = self.rockets.len(),
            "new generation on the pad"
        );
        Ok(())
    }

    /// One tick: every living rocket fires its gene for this tick and
    /// thrusts, then the collision pass, then the scoring pass over the
    /// whole fleet.
    fn tick_fleet(&mut self) {
        let tick = self.tick;
        let Self { rockets, world, .. } = self;

        #[cfg(feature = "parallel")]
        {
            rockets.par_iter_mut().for_each(|rocket| {
                if rocket.alive {
                    let delta = rocket.genome.gene_at(tick);
                    rocket.step(f64::from(delta), ROCKETRY_THRUST);
                }
            });
            rockets.par_iter_mut().for_each(|rocket| {
                if rocket.alive && world.killed(rocket.pos) {
                    rocket.alive = false;
                }
            });
        }

        #[cfg(not(feature = "parallel"))]
        {
            for rocket in rockets.iter_mut() {
                if rocket.alive {
                    let delta = rocket.genome.gene_at(tick);
                    rocket.step(f64::from(delta), ROCKETRY_THRUST);
                }
            }
            for rocket in rockets.iter_mut() {
                if rocket.alive && world.killed(rocket.pos) {
                    rocket.alive = false;
                }
            }
        }

        fitness::score_all(world, rockets);
        self.tick += 1;

        if let Some(best) = self.best_fitness() {
            if best > self.peak_fitness {
                self.peak_fitness = best;
            }
        }
    }

    /// Tear the run down and rebuild it from a freshly parsed configuration,
    /// unconditionally leaving a solved or running state. Rocket ids keep
    /// counting up; everything else starts over.
    pub fn restart(&mut self, config: Config) {
        self.world = config.world();
        self.config = config;
        self.generation = 1;
        self.tick = 0;
        self.peak_fitness = 0.0;
        self.tick_rate = ROCKETRY_DEFAULT_TICK_RATE;
        self.populate();
    }

    /// Move the goal; the next scoring pass and solved check use it as-is.
    pub fn relocate_goal(&mut self, goal: Point) {
        self.world.relocate_goal(goal);
    }

    /// Pacing hint for the boundary clock; no effect on anything simulated.
    pub fn set_tick_rate(&mut self, tick_rate: u32) {
        self.tick_rate = tick_rate;
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn tick(&self) -> usize {
        self.tick
    }

    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    pub fn rockets(&self) -> &[Rocket] {
        &self.rockets
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Best score in the fleet as of the last scoring pass, `None` before
    /// the first pass of a run.
    pub fn best_fitness(&self) -> Option<f64> {
        self.rockets.iter().filter_map(|r| r.fitness).reduce(f64::max)
    }

    /// High-water mark of [Simulation::best_fitness] over the whole run;
    /// reporting only, never consulted by selection.
    pub fn peak_fitness(&self) -> f64 {
        self.peak_fitness
    }

    /// Read-only view of the current tick for render and UI collaborators.
    pub fn snapshot(&self) -> Frame {
        Frame {
            generation: self.generation,
            tick: self.tick,
            tick_rate: self.tick_rate,
            alive: self.alive_count(),
            best_fitness: self.best_fitness(),
            peak_fitness: self.peak_fitness,
            rockets: self
                .rockets
                .iter()
                .map(|r| RocketView {
                    id: r.id,
                    pos: r.pos,
                    heading: r.heading,
                    alive: r.alive,
                    fitness: r.fitness,
                })
                .collect(),
            obstacles: self.world.obstacles.clone(),
            start: self.world.start,
            goal: self.world.goal,
        }
    }
}

/// Per-tick snapshot handed across the render boundary.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub generation: usize,
    pub tick: usize,
    pub tick_rate: u32,
    pub alive: usize,
    pub best_fitness: Option<f64>,
    pub peak_fitness: f64,
    pub rockets: Vec<RocketView>,
    pub obstacles: Vec<Rect>,
    pub start: Point,
    pub goal: Point,
}

/// One rocket as the render boundary sees it.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RocketView {
    pub id: RocketId,
    pub pos: Point,
    pub heading: f64,
    pub alive: bool,
    pub fitness: Option<f64>,
}
