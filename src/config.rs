//! Global configuration constants and the validated simulation settings bundle.
//!
//! All distances are in world units (pixels for the stock tuning), time in
//! seconds. The world is Y-down: the floor sits at `y = world_height`.

use serde::{Deserialize, Serialize};

use crate::{
    collision::broadphase::SpatialGrid,
    error::{ConfigError, Result},
};

/// Default world extent along X.
pub const DEFAULT_WORLD_WIDTH: f32 = 1200.0;

/// Default world extent along Y.
pub const DEFAULT_WORLD_HEIGHT: f32 = 800.0;

/// Maximum number of live particles.
pub const DEFAULT_MAX_PARTICLES: usize = 5000;

/// Radius assigned to every particle.
pub const DEFAULT_PARTICLE_RADIUS: f32 = 2.0;

/// Center distance below which two particles overlap.
pub const DEFAULT_MIN_SEPARATION: f32 = 4.0;

/// Downward acceleration (Y-down).
pub const DEFAULT_GRAVITY: f32 = 500.0;

/// Speed cap applied every frame.
pub const DEFAULT_MAX_SPEED: f32 = 500.0;

/// Below this speed a particle races toward sleep.
pub const DEFAULT_SLEEP_VELOCITY: f32 = 5.0;

/// Below this speed a particle slowly accumulates sleep frames.
pub const DEFAULT_MIN_COLLISION_VELOCITY: f32 = 15.0;

/// Sleep counter value a particle must exceed to be considered asleep.
pub const DEFAULT_SLEEP_FRAMES: u32 = 30;

/// Number of collision solver passes per step.
pub const DEFAULT_SOLVER_PASSES: u32 = 3;

/// Fraction of closing speed returned on impact.
pub const DEFAULT_RESTITUTION: f32 = 0.2;

/// Fraction of tangential velocity removed on contact.
pub const DEFAULT_TANGENTIAL_DAMPING: f32 = 0.1;

/// Horizontal velocity multiplier on floor contact.
pub const DEFAULT_FLOOR_FRICTION: f32 = 0.9;

/// Velocity multiplier applied when reflecting off a boundary.
pub const DEFAULT_BOUNCE_DAMPING: f32 = 0.3;

/// Vertical floor-bounce speed below which the bounce is discarded.
pub const DEFAULT_REST_VELOCITY: f32 = 10.0;

/// Edge length of a broad-phase grid cell.
pub const DEFAULT_CELL_SIZE: f32 = 8.0;

/// Maximum particle ids kept per grid cell.
pub const DEFAULT_CELL_CAPACITY: usize = 16;

/// Per-frame horizontal velocity multiplier (air drag).
pub const DEFAULT_AIR_DRAG: f32 = 0.999;

/// Half-width of the uniform spawn jitter on each axis.
pub const DEFAULT_SPAWN_JITTER: f32 = 10.0;

/// Fraction of the overlap corrected per resolved pair and pass.
pub const DEFAULT_POSITION_CORRECTION: f32 = 0.15;

/// Symmetric bound on a single collision impulse.
pub const DEFAULT_MAX_IMPULSE: f32 = 50.0;

/// Squared center distance under which two particles are treated as coincident.
pub const COINCIDENT_DISTANCE_SQ: f32 = 1e-10;

/// Sleep counter increment while below the sleep velocity.
pub const SLEEP_FAST_INCREMENT: u32 = 3;

/// Headroom above the sleep threshold the counter saturates at.
pub const SLEEP_COUNTER_HEADROOM: u32 = 10;

/// Largest frame delta the stock frame loop feeds into a step.
pub const MAX_FRAME_DT: f32 = 0.016;

/// Frame budget used for slow-step warnings, in milliseconds.
pub const FRAME_BUDGET_MS: f32 = 16.67;

/// Upper bound on grid slots (`columns * rows * cell_capacity`) a
/// configuration may request.
pub const MAX_GRID_SLOTS: usize = 1 << 24;

/// Particles reserved up front when building a system. The store grows past
/// this on demand up to `max_particles`.
pub const INITIAL_PARTICLE_RESERVE: usize = 1 << 14;

/// Bounds a measured frame delta the way the stock frame loop does.
///
/// [`ParticleSystem::step`](crate::world::ParticleSystem::step) never clamps
/// its input; hosts that want the stock behavior call this first.
pub fn clamp_frame_dt(dt: f32) -> f32 {
    if dt.is_nan() {
        return 0.0;
    }
    dt.clamp(0.0, MAX_FRAME_DT)
}

/// Tunable parameters for a [`ParticleSystem`](crate::world::ParticleSystem).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub max_particles: usize,
    pub particle_radius: f32,
    pub gravity: f32,
    pub max_speed: f32,
    pub sleep_velocity: f32,
    pub min_collision_velocity: f32,
    pub sleep_frames: u32,
    pub solver_passes: u32,
    pub min_separation: f32,
    pub restitution: f32,
    pub tangential_damping: f32,
    pub floor_friction: f32,
    pub bounce_damping: f32,
    pub rest_velocity: f32,
    pub cell_size: f32,
    pub cell_capacity: usize,
    pub world_width: f32,
    pub world_height: f32,
    pub air_drag: f32,
    pub spawn_jitter: f32,
    pub position_correction: f32,
    pub max_impulse: f32,
    /// Seed for spawn jitter and color selection. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_particles: DEFAULT_MAX_PARTICLES,
            particle_radius: DEFAULT_PARTICLE_RADIUS,
            gravity: DEFAULT_GRAVITY,
            max_speed: DEFAULT_MAX_SPEED,
            sleep_velocity: DEFAULT_SLEEP_VELOCITY,
            min_collision_velocity: DEFAULT_MIN_COLLISION_VELOCITY,
            sleep_frames: DEFAULT_SLEEP_FRAMES,
            solver_passes: DEFAULT_SOLVER_PASSES,
            min_separation: DEFAULT_MIN_SEPARATION,
            restitution: DEFAULT_RESTITUTION,
            tangential_damping: DEFAULT_TANGENTIAL_DAMPING,
            floor_friction: DEFAULT_FLOOR_FRICTION,
            bounce_damping: DEFAULT_BOUNCE_DAMPING,
            rest_velocity: DEFAULT_REST_VELOCITY,
            cell_size: DEFAULT_CELL_SIZE,
            cell_capacity: DEFAULT_CELL_CAPACITY,
            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,
            air_drag: DEFAULT_AIR_DRAG,
            spawn_jitter: DEFAULT_SPAWN_JITTER,
            position_correction: DEFAULT_POSITION_CORRECTION,
            max_impulse: DEFAULT_MAX_IMPULSE,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn with_world_size(mut self, width: f32, height: f32) -> Self {
        self.world_width = width;
        self.world_height = height;
        self
    }

    pub fn with_max_particles(mut self, max_particles: usize) -> Self {
        self.max_particles = max_particles;
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_solver_passes(mut self, passes: u32) -> Self {
        self.solver_passes = passes;
        self
    }

    pub fn with_grid(mut self, cell_size: f32, cell_capacity: usize) -> Self {
        self.cell_size = cell_size;
        self.cell_capacity = cell_capacity;
        self
    }

    pub fn with_spawn_jitter(mut self, jitter: f32) -> Self {
        self.spawn_jitter = jitter;
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_max_impulse(mut self, max_impulse: f32) -> Self {
        self.max_impulse = max_impulse;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks every option once. Called by
    /// [`ParticleSystem::new`](crate::world::ParticleSystem::new).
    pub fn validate(&self) -> Result<()> {
        positive("particle_radius", self.particle_radius)?;
        positive("max_speed", self.max_speed)?;
        positive("sleep_velocity", self.sleep_velocity)?;
        positive("min_collision_velocity", self.min_collision_velocity)?;
        positive("min_separation", self.min_separation)?;
        positive("cell_size", self.cell_size)?;
        positive("world_width", self.world_width)?;
        positive("world_height", self.world_height)?;
        positive("max_impulse", self.max_impulse)?;

        finite("gravity", self.gravity)?;
        non_negative("rest_velocity", self.rest_velocity)?;
        non_negative("spawn_jitter", self.spawn_jitter)?;

        unit_range("restitution", self.restitution)?;
        unit_range("tangential_damping", self.tangential_damping)?;
        unit_range("floor_friction", self.floor_friction)?;
        unit_range("bounce_damping", self.bounce_damping)?;
        unit_range("air_drag", self.air_drag)?;
        unit_range("position_correction", self.position_correction)?;

        nonzero("max_particles", self.max_particles)?;
        nonzero("cell_capacity", self.cell_capacity)?;
        nonzero("solver_passes", self.solver_passes as usize)?;
        nonzero("sleep_frames", self.sleep_frames as usize)?;

        if self.min_collision_velocity < self.sleep_velocity {
            return Err(ConfigError::VelocityThresholds {
                sleep: self.sleep_velocity,
                min_collision: self.min_collision_velocity,
            });
        }

        // A neighbor within min_separation must land in the 3x3 block.
        if self.cell_size < self.min_separation {
            return Err(ConfigError::CellTooSmall {
                cell_size: self.cell_size,
                min_separation: self.min_separation,
            });
        }

        let diameter = self.particle_radius * 2.0;
        if self.world_width <= diameter || self.world_height <= diameter {
            return Err(ConfigError::WorldTooSmall {
                width: self.world_width,
                height: self.world_height,
                radius: self.particle_radius,
            });
        }

        SpatialGrid::layout(
            self.cell_size,
            self.world_width,
            self.world_height,
            self.cell_capacity,
        )?;

        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<()> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn unit_range(field: &'static str, value: f32) -> Result<()> {
    finite(field, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { field, value })
    }
}

fn nonzero(field: &'static str, value: usize) -> Result<()> {
    if value == 0 {
        Err(ConfigError::ZeroCount { field })
    } else {
        Ok(())
    }
}
