use rayon::prelude::*;

use crate::{
    core::particle::Particle,
    dynamics::integrator::{IntegrationSummary, Integrator},
};

/// Runs the integration pass across the rayon pool.
///
/// Each task owns exactly one particle, so per-particle results match the
/// sequential pass bit for bit; only the order the speed sum is accumulated
/// in can differ.
#[derive(Debug, Clone, Copy)]
pub struct ParallelIntegrator {
    pub integrator: Integrator,
}

impl ParallelIntegrator {
    pub fn new(integrator: Integrator) -> Self {
        Self { integrator }
    }

    pub fn step(&self, particles: &mut [Particle], dt: f32) -> IntegrationSummary {
        particles
            .par_iter_mut()
            .fold(IntegrationSummary::default, |summary, particle| {
                summary.record(self.integrator.integrate_particle(particle, dt))
            })
            .reduce(IntegrationSummary::default, IntegrationSummary::merge)
    }
}
