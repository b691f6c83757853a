//! The static course a fleet flies over: world bounds, obstacles, and the
//! start and goal points.

use crate::constants::{ROCKETRY_WORLD_HEIGHT, ROCKETRY_WORLD_WIDTH};
use serde::{Deserialize, Serialize};

/// A position in world coordinates; y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned rectangle. Containment is half-open: the left and top edges
/// are inside, the right and bottom edges are out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]")]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }
}

impl From<[f64; 4]> for Rect {
    fn from([x, y, width, height]: [f64; 4]) -> Self {
        Self::new(x, y, width, height)
    }
}

/// Everything static about a run, plus the one mutable field: the goal,
/// which an input collaborator may relocate between ticks.
#[derive(Debug, Clone)]
pub struct World {
    pub bounds: Rect,
    pub obstacles: Vec<Rect>,
    pub start: Point,
    pub goal: Point,
}

impl World {
    pub fn new(obstacles: Vec<Rect>, start: Point, goal: Point) -> Self {
        Self {
            bounds: Rect::new(0.0, 0.0, ROCKETRY_WORLD_WIDTH, ROCKETRY_WORLD_HEIGHT),
            obstacles,
            start,
            goal,
        }
    }

    /// Whether a rocket sampled at `p` is destroyed there: outside the world
    /// bounds, or inside any obstacle. Only the post-move point is tested,
    /// so a rocket can clear a thin obstacle between two ticks.
    pub fn killed(&self, p: Point) -> bool {
        if p.x < 0.0 || p.x > self.bounds.width || p.y < 0.0 || p.y > self.bounds.height {
            return true;
        }
        self.obstacles.iter().any(|obstacle| obstacle.contains(p))
    }

    /// Move the goal; the next scoring pass and solved check read it as-is.
    pub fn relocate_goal(&mut self, goal: Point) {
        self.goal = goal;
    }
}
