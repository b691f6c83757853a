//! Run configuration: the single record read at startup or restart.

use crate::world::{Point, Rect, World};
use serde::Deserialize;
use std::{fs, path::Path};

/// Fatal configuration problems. None of these are retried; a bad record
/// aborts startup or restart and surfaces to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("population must be at least 1")]
    EmptyPopulation,
    #[error("start and goal must be distinct points")]
    DegenerateCourse,
}

/// The startup record: fleet size, obstacle course, launch and goal points.
/// Obstacles arrive as `[x, y, width, height]` arrays.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub population: usize,
    pub obstacles: Vec<Rect>,
    pub start_pos: [i64; 2],
    pub goal: [i64; 2],
}

impl Config {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Parse and validate a record; every field is required.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.population == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        // distinct points keep the fitness scale's denominator nonzero
        if self.start_pos == self.goal {
            return Err(ConfigError::DegenerateCourse);
        }
        Ok(())
    }

    pub fn start(&self) -> Point {
        Point::new(self.start_pos[0] as f64, self.start_pos[1] as f64)
    }

    pub fn goal(&self) -> Point {
        Point::new(self.goal[0] as f64, self.goal[1] as f64)
    }

    /// Build the static world this record describes.
    pub fn world(&self) -> World {
        World::new(self.obstacles.clone(), self.start(), self.goal())
    }
}
