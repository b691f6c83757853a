//! Centralized constants for rocketry evolution parameters.
//!
//! All tunables are defined here with the `ROCKETRY_` prefix. This enables
//! easy identification and future environment variable configuration.

use crate::random::percent;

// ============================================================================
// Genome Parameters
// ============================================================================

/// Number of steering instructions carried by every rocket
pub const ROCKETRY_GENOME_LENGTH: usize = 300;

/// Smallest heading delta a gene may hold, in degrees per tick
pub const ROCKETRY_GENE_MIN: i8 = -7;

/// Largest heading delta a gene may hold, in degrees per tick
pub const ROCKETRY_GENE_MAX: i8 = 7;

/// Probability of redrawing a single gene during the mutation sweep
pub const ROCKETRY_GENE_MUTATE_PROB: u64 = percent(10);

// ============================================================================
// Selection Parameters
// ============================================================================

/// Fraction of the ranked population retained as elites
pub const ROCKETRY_ELITE_FRACTION: f64 = 0.2;

/// Probability of echoing the two least-fit rockets into the ranking
/// scratch space during selection
pub const ROCKETRY_DUPLICATE_WORST_PROB: u64 = percent(10);

// ============================================================================
// Flight Parameters
// ============================================================================

/// Distance travelled along the current heading each tick
pub const ROCKETRY_THRUST: f64 = 3.0;

/// Heading assigned at launch, pointing at the top of the world
pub const ROCKETRY_LAUNCH_HEADING: f64 = 270.0;

/// Vertical offset from the start platform to the launch position
pub const ROCKETRY_LAUNCH_OFFSET_Y: f64 = 3.0 - 50.0;

/// A rocket closer to the goal than this counts as a solution
pub const ROCKETRY_SOLVED_RADIUS: f64 = 10.0;

// ============================================================================
// World Parameters
// ============================================================================

/// Width of the default world bounds
pub const ROCKETRY_WORLD_WIDTH: f64 = 600.0;

/// Height of the default world bounds
pub const ROCKETRY_WORLD_HEIGHT: f64 = 800.0;

/// Pacing hint handed to the boundary clock; no effect on the core
pub const ROCKETRY_DEFAULT_TICK_RATE: u32 = 30;
