//! Collision detection: the uniform-grid broad phase and the circle-pair narrow phase.

pub mod broadphase;
pub mod narrowphase;

pub use broadphase::{NeighborIter, SpatialGrid};
pub use narrowphase::{CircleContact, ContactResponse};
