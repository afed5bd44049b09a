//! Sand Accelerator – a real-time 2D granular particle simulator.
//!
//! The crate integrates circular particles under gravity, resolves
//! particle–particle contacts through a uniform-grid broad phase and an
//! iterative impulse solver, and lets settled particles sleep so they stop
//! costing collision work. Rendering, input and the frame loop live outside
//! the crate; they drive a [`ParticleSystem`] through `spawn`, `step`,
//! `clear` and the read-only accessors.

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod utils;
pub mod world;

pub use glam::Vec2;

pub use collision::{
    broadphase::SpatialGrid,
    narrowphase::{CircleContact, ContactResponse},
};
pub use config::{clamp_frame_dt, SimulationConfig, MAX_FRAME_DT};
pub use crate::core::{
    particle::{Particle, ParticleColor, SAND_PALETTE},
    types::FrameStats,
};
pub use dynamics::{
    boundary::{Boundary, BoundaryContact},
    integrator::Integrator,
    sleep::SleepPolicy,
    solver::CollisionSolver,
};
pub use error::ConfigError;
pub use utils::profiling::StepProfile;
pub use world::ParticleSystem;
