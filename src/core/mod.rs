//! Core data types: particles, their palette, and per-frame statistics.

pub mod particle;
pub mod types;

pub use particle::{Particle, ParticleColor, SAND_PALETTE};
pub use types::FrameStats;
