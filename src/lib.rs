//! Generational genetic algorithm that steers a fleet of rockets toward a
//! goal: kinematic ticks, collision-based death, normalized distance
//! fitness, and an elitist breed cycle.

pub mod config;
pub mod constants;
pub mod fitness;
pub mod genome;
pub mod random;
pub mod reproduce;
pub mod rocket;
pub mod simulation;
pub mod world;

pub use config::{Config, ConfigError};
pub use genome::{Gene, Genome};
pub use random::{Happens, Probabilities};
pub use reproduce::BreedError;
pub use rocket::{Rocket, RocketFactory, RocketId};
pub use simulation::{Frame, Phase, RocketView, Simulation};
pub use world::{Point, Rect, World};
