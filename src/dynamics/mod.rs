//! Simulation dynamics: integration, boundaries, sleeping, and the collision solver.

pub mod boundary;
pub mod integrator;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod sleep;
pub mod solver;

pub use boundary::{Boundary, BoundaryContact};
pub use integrator::{IntegrationSummary, Integrator, ParticleSample};
#[cfg(feature = "parallel")]
pub use parallel::ParallelIntegrator;
pub use sleep::{reset_sleep, SleepPolicy};
pub use solver::{pair_mut, CollisionSolver};
