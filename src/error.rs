//! Error types for the simulator.
//!
//! Configuration validation is the only fallible step; everything that runs
//! per frame guards its numeric hazards instead of returning errors.

use thiserror::Error;

/// Errors raised while validating a [`SimulationConfig`](crate::config::SimulationConfig).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f32 },
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("{field} must lie in [0, 1], got {value}")]
    OutOfUnitRange { field: &'static str, value: f32 },
    #[error("{field} must be at least 1")]
    ZeroCount { field: &'static str },
    #[error(
        "min_collision_velocity ({min_collision}) must not be below sleep_velocity ({sleep})"
    )]
    VelocityThresholds { sleep: f32, min_collision: f32 },
    #[error("cell_size ({cell_size}) must be at least min_separation ({min_separation})")]
    CellTooSmall { cell_size: f32, min_separation: f32 },
    #[error("world {width}x{height} cannot hold a particle of radius {radius}")]
    WorldTooSmall { width: f32, height: f32, radius: f32 },
    #[error(
        "a {width}x{height} world with cell_size {cell_size} and cell_capacity {capacity} \
         needs more than {limit} grid slots"
    )]
    GridTooLarge {
        width: f32,
        height: f32,
        cell_size: f32,
        capacity: usize,
        limit: usize,
    },
}

/// Convenient result alias for configuration-dependent constructors.
pub type Result<T> = std::result::Result<T, ConfigError>;
