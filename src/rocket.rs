//! Rocket state and kinematics, plus the factory that mints new rockets.

use crate::{
    constants::{ROCKETRY_LAUNCH_HEADING, ROCKETRY_LAUNCH_OFFSET_Y},
    genome::Genome,
    world::Point,
};
use rand::RngCore;
use serde::Serialize;

/// Stable identifier for one rocket within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RocketId(u64);

/// Monotone id source, owned by a [RocketFactory]; never global.
#[derive(Debug, Default)]
pub struct IdGen {
    head: u64,
}

impl IdGen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> RocketId {
        let id = RocketId(self.head);
        self.head += 1;
        id
    }
}

/// One candidate solution: a genome plus the kinematic state it steers.
#[derive(Debug, Clone)]
pub struct Rocket {
    pub id: RocketId,
    pub genome: Genome,
    pub pos: Point,
    pub heading: f64,
    pub alive: bool,
    /// `None` until the first scoring pass of the run touches this rocket.
    pub fitness: Option<f64>,
}

impl Rocket {
    /// Advance one tick: steer by `delta` degrees, then thrust `force` along
    /// the new heading. A dead rocket is frozen and ignores the call.
    pub fn step(&mut self, delta: f64, force: f64) {
        if !self.alive {
            return;
        }
        self.heading += delta;
        let radians = self.heading.to_radians();
        self.pos.x += radians.cos() * force;
        self.pos.y += radians.sin() * force;
    }

    /// Put the rocket back on the pad: a fixed offset above the start point,
    /// pointed at the top of the world, alive again. Fitness is left as-is
    /// until the next scoring pass overwrites it.
    pub fn launch(&mut self, start: Point) {
        self.pos = Point::new(start.x, start.y + ROCKETRY_LAUNCH_OFFSET_Y);
        self.heading = ROCKETRY_LAUNCH_HEADING;
        self.alive = true;
    }
}

/// Mints rockets with unique ids; the only place new rockets come from.
#[derive(Debug, Default)]
pub struct RocketFactory {
    ids: IdGen,
}

impl RocketFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A rocket carrying a freshly drawn genome, parked at the origin.
    pub fn spawn(&mut self, rng: &mut impl RngCore) -> Rocket {
        let genome = Genome::random(rng);
        self.spawn_with(genome)
    }

    /// A rocket carrying `genome`; crossover children come through here.
    pub fn spawn_with(&mut self, genome: Genome) -> Rocket {
        Rocket {
            id: self.ids.next_id(),
            genome,
            pos: Point::new(0.0, 0.0),
            heading: 0.0,
            alive: true,
            fitness: None,
        }
    }
}
