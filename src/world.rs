use glam::Vec2;
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Instant;

use crate::{
    collision::broadphase::SpatialGrid,
    config::{SimulationConfig, FRAME_BUDGET_MS, INITIAL_PARTICLE_RESERVE},
    core::{
        particle::{Particle, ParticleColor},
        types::FrameStats,
    },
    dynamics::{
        boundary::Boundary,
        integrator::{IntegrationSummary, Integrator},
        solver::CollisionSolver,
    },
    error::Result,
    utils::{
        logging::warn_if_frame_budget_exceeded,
        profiling::{StageTimer, StepProfile},
    },
};

#[cfg(feature = "parallel")]
use crate::dynamics::parallel::ParallelIntegrator;

/// Owns the particle store and the broad-phase grid and advances them one
/// frame at a time.
///
/// A particle's index in [`ParticleSystem::particles`] is its identity for the
/// current frame. The store only grows through spawning and only shrinks
/// through [`ParticleSystem::clear`].
pub struct ParticleSystem {
    config: SimulationConfig,
    particles: Vec<Particle>,
    grid: SpatialGrid,
    integrator: Integrator,
    solver: CollisionSolver,
    boundary: Boundary,
    stats: FrameStats,
    profile: StepProfile,
    rng: StdRng,
    parallel_enabled: bool,
}

impl ParticleSystem {
    /// Validates `config` and builds an empty system.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let grid = SpatialGrid::from_config(&config)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let (columns, rows) = grid.dimensions();
        debug!(
            "particle system ready: {}x{} world, {columns}x{rows} grid, capacity {}",
            config.world_width, config.world_height, config.max_particles
        );

        Ok(Self {
            integrator: Integrator::from_config(&config),
            solver: CollisionSolver::from_config(&config),
            boundary: Boundary::from_config(&config),
            particles: Vec::with_capacity(config.max_particles.min(INITIAL_PARTICLE_RESERVE)),
            grid,
            stats: FrameStats::default(),
            profile: StepProfile::default(),
            rng,
            parallel_enabled: false,
            config,
        })
    }

    /// Enables or disables the data-parallel integration pass. Has no effect
    /// unless the crate is built with the `parallel` feature.
    pub fn set_parallel_enabled(&mut self, enabled: bool) {
        self.parallel_enabled = enabled;
    }

    pub fn parallel_enabled(&self) -> bool {
        self.parallel_enabled && cfg!(feature = "parallel")
    }

    /// Spawns up to `count` particles around `(x, y)` using the system's own
    /// random source. Returns how many were created.
    pub fn spawn(&mut self, x: f32, y: f32, count: usize) -> usize {
        Self::push_spawned(&mut self.particles, &self.config, x, y, count, &mut self.rng)
    }

    /// Like [`ParticleSystem::spawn`], drawing jitter and colors from `rng`.
    pub fn spawn_with_rng<R: Rng>(&mut self, x: f32, y: f32, count: usize, rng: &mut R) -> usize {
        Self::push_spawned(&mut self.particles, &self.config, x, y, count, rng)
    }

    /// Requests beyond the remaining capacity are clipped, down to zero.
    fn push_spawned<R: Rng>(
        particles: &mut Vec<Particle>,
        config: &SimulationConfig,
        x: f32,
        y: f32,
        count: usize,
        rng: &mut R,
    ) -> usize {
        let remaining = config.max_particles.saturating_sub(particles.len());
        let spawn_count = count.min(remaining);
        if spawn_count < count {
            debug!("spawn clipped to {spawn_count} of {count} requested (capacity reached)");
        }

        let jitter = config.spawn_jitter;
        for _ in 0..spawn_count {
            let offset = if jitter > 0.0 {
                Vec2::new(rng.gen_range(-jitter..=jitter), rng.gen_range(-jitter..=jitter))
            } else {
                Vec2::ZERO
            };
            let color = ParticleColor::random(rng);
            particles.push(Particle::new(Vec2::new(x, y) + offset, config.particle_radius, color));
        }

        spawn_count
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// `dt` is used as given; hosts that want the stock frame bound call
    /// [`clamp_frame_dt`](crate::config::clamp_frame_dt) first.
    pub fn step(&mut self, dt: f32) {
        let frame_start = Instant::now();
        self.stats.reset();
        self.profile.reset();

        let summary = {
            let _stage = StageTimer::new("integrate", &mut self.profile.integration_time);
            Self::integrate(&self.integrator, &mut self.particles, self.parallel_enabled, dt)
        };
        self.stats.avg_speed = summary.avg_speed();
        self.stats.max_speed = summary.max_speed;
        self.stats.active_bodies = summary.active;

        {
            let _stage = StageTimer::new("grid::rebuild", &mut self.profile.broad_phase_time);
            Self::rebuild_grid(&mut self.grid, &self.particles);
        }

        {
            let _stage = StageTimer::new("solver", &mut self.profile.solver_time);
            self.solver
                .solve(&mut self.particles, &self.grid, &mut self.stats);
            for particle in &mut self.particles {
                self.boundary.confine(particle);
            }
        }

        self.profile.total_frame_time = frame_start.elapsed();
        self.profile.particle_count = self.particles.len();
        self.profile.collision_count = self.stats.collisions;
        self.profile.active_count = self.stats.active_bodies;
        if warn_if_frame_budget_exceeded(self.profile.total_frame_time, FRAME_BUDGET_MS) {
            self.profile.report();
        }
    }

    fn integrate(
        integrator: &Integrator,
        particles: &mut [Particle],
        parallel: bool,
        dt: f32,
    ) -> IntegrationSummary {
        #[cfg(feature = "parallel")]
        {
            if parallel {
                return ParallelIntegrator::new(*integrator).step(particles, dt);
            }
        }
        #[cfg(not(feature = "parallel"))]
        let _ = parallel;

        integrator.step(particles, dt)
    }

    /// Re-inserts every particle under its store index. The grid carries
    /// nothing over from the previous frame.
    fn rebuild_grid(grid: &mut SpatialGrid, particles: &[Particle]) {
        grid.clear();
        for (id, particle) in particles.iter().enumerate() {
            grid.insert(id, particle.position.x, particle.position.y);
        }
    }

    /// Removes every particle and zeroes the statistics snapshot.
    pub fn clear(&mut self) {
        debug!("clearing {} particles", self.particles.len());
        self.particles.clear();
        self.stats.reset();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Latest statistics snapshot.
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Stage timings of the latest step.
    pub fn profile(&self) -> &StepProfile {
        &self.profile
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Broad-phase grid as rebuilt by the latest step.
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }
}
