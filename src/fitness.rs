//! Normalized distance-to-goal scoring.

use crate::{
    rocket::Rocket,
    world::{Point, World},
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Score for a rocket sitting at `pos`: 100 at the goal, exactly 0 at the
/// start point, negative beyond it. The scale is the start-to-goal span.
pub fn score(world: &World, pos: Point) -> f64 {
    let span = world.start.distance(world.goal);
    100.0 - (pos.distance(world.goal) / span) * 100.0
}

/// Score every rocket in place, dead ones included; re-scoring a frozen
/// position is idempotent. The whole pass reads one goal value.
pub fn score_all(world: &World, rockets: &mut [Rocket]) {
    #[cfg(feature = "parallel")]
    rockets
        .par_iter_mut()
        .for_each(|rocket| rocket.fitness = Some(score(world, rocket.pos)));

    #[cfg(not(feature = "parallel"))]
    for rocket in rockets.iter_mut() {
        rocket.fitness = Some(score(world, rocket.pos));
    }
}
