use crate::{
    collision::{
        broadphase::SpatialGrid,
        narrowphase::{CircleContact, ContactResponse},
    },
    config::SimulationConfig,
    core::{particle::Particle, types::FrameStats},
    dynamics::sleep::{reset_sleep, SleepPolicy},
};

/// Borrows two distinct particles mutably. Requires `i < j < particles.len()`.
pub fn pair_mut(particles: &mut [Particle], i: usize, j: usize) -> (&mut Particle, &mut Particle) {
    debug_assert!(i < j, "pair_mut expects ascending indices, got ({i}, {j})");
    let (head, tail) = particles.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

/// Iterative pairwise collision solver driven by the broad-phase grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionSolver {
    pub passes: u32,
    pub min_separation: f32,
    pub response: ContactResponse,
    pub sleep: SleepPolicy,
}

impl CollisionSolver {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            passes: config.solver_passes,
            min_separation: config.min_separation,
            response: ContactResponse::from_config(config),
            sleep: SleepPolicy::from_config(config),
        }
    }

    /// Runs every pass. Within a pass, awake particles are visited in store
    /// order, so each unordered pair is considered at most once per pass.
    pub fn solve(&self, particles: &mut [Particle], grid: &SpatialGrid, stats: &mut FrameStats) {
        for _ in 0..self.passes {
            for i in 0..particles.len() {
                if !self.sleep.is_sleeping(&particles[i]) {
                    self.resolve_collisions(particles, grid, i, stats);
                }
            }
        }
    }

    /// Resolves particle `i` against every higher-indexed grid neighbor.
    pub fn resolve_collisions(
        &self,
        particles: &mut [Particle],
        grid: &SpatialGrid,
        i: usize,
        stats: &mut FrameStats,
    ) {
        let origin = particles[i].position;

        for j in grid.neighbors(origin.x, origin.y) {
            if j <= i || j >= particles.len() {
                continue;
            }

            let (a, b) = pair_mut(particles, i, j);
            let Some(contact) = CircleContact::between(a.position, b.position, self.min_separation)
            else {
                continue;
            };

            if let Some(impulse) = self.response.resolve(a, b, &contact) {
                reset_sleep(a);
                reset_sleep(b);
                stats.record_impulse(impulse);
            }
        }
    }
}
