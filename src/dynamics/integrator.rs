use crate::{
    config::SimulationConfig,
    core::particle::Particle,
    dynamics::{boundary::Boundary, sleep::SleepPolicy},
};

/// What the integration pass learned about one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSample {
    pub speed: f32,
    pub awake: bool,
}

/// Running totals of an integration pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IntegrationSummary {
    pub count: usize,
    pub speed_sum: f32,
    pub max_speed: f32,
    pub active: usize,
}

impl IntegrationSummary {
    pub fn record(mut self, sample: ParticleSample) -> Self {
        self.count += 1;
        self.speed_sum += sample.speed;
        self.max_speed = self.max_speed.max(sample.speed);
        if sample.awake {
            self.active += 1;
        }
        self
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            count: self.count + other.count,
            speed_sum: self.speed_sum + other.speed_sum,
            max_speed: self.max_speed.max(other.max_speed),
            active: self.active + other.active,
        }
    }

    pub fn avg_speed(&self) -> f32 {
        if self.count == 0 {
            0.0
        } else {
            self.speed_sum / self.count as f32
        }
    }
}

/// Explicit Euler integrator with gravity, horizontal air drag, a speed cap,
/// boundary response and sleep bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Integrator {
    pub gravity: f32,
    pub air_drag: f32,
    pub boundary: Boundary,
    pub sleep: SleepPolicy,
}

impl Integrator {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            gravity: config.gravity,
            air_drag: config.air_drag,
            boundary: Boundary::from_config(config),
            sleep: SleepPolicy::from_config(config),
        }
    }

    /// Advances one particle by `dt`. Sleeping particles are integrated too.
    pub fn integrate_particle(&self, particle: &mut Particle, dt: f32) -> ParticleSample {
        particle.velocity.y += self.gravity * dt;
        particle.velocity.x *= self.air_drag;
        self.boundary.clamp_velocity(&mut particle.velocity);

        particle.position += particle.velocity * dt;
        self.boundary.resolve(particle);

        let speed_sq = particle.velocity.length_squared();
        self.sleep.update(particle, speed_sq);

        ParticleSample {
            speed: speed_sq.sqrt(),
            awake: !self.sleep.is_sleeping(particle),
        }
    }

    pub fn step(&self, particles: &mut [Particle], dt: f32) -> IntegrationSummary {
        particles
            .iter_mut()
            .fold(IntegrationSummary::default(), |summary, particle| {
                summary.record(self.integrate_particle(particle, dt))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::particle::ParticleColor;
    use approx::assert_relative_eq;
    use glam::Vec2;

    #[test]
    fn free_fall_is_explicit_euler() {
        let integrator = Integrator::from_config(&SimulationConfig::default());
        let mut p = Particle::new(Vec2::new(100.0, 100.0), 2.0, ParticleColor::default())
            .with_velocity(Vec2::new(10.0, 0.0));

        let sample = integrator.integrate_particle(&mut p, 0.01);
        assert_relative_eq!(p.velocity.y, 5.0, epsilon = 1e-4);
        assert_relative_eq!(p.velocity.x, 9.99, epsilon = 1e-4);
        assert_relative_eq!(p.position.y, 100.05, epsilon = 1e-4);
        assert_relative_eq!(p.position.x, 100.0999, epsilon = 1e-4);
        assert_relative_eq!(sample.speed, p.speed());
        assert!(sample.awake);
    }

    #[test]
    fn summary_averages_and_tracks_max() {
        let summary = IntegrationSummary::default()
            .record(ParticleSample { speed: 2.0, awake: true })
            .record(ParticleSample { speed: 4.0, awake: false });
        assert_eq!(summary.count, 2);
        assert_eq!(summary.active, 1);
        assert_relative_eq!(summary.avg_speed(), 3.0);
        assert_relative_eq!(summary.max_speed, 4.0);
        assert_eq!(IntegrationSummary::default().avg_speed(), 0.0);

        let merged = summary.merge(summary);
        assert_eq!(merged.count, 4);
        assert_relative_eq!(merged.avg_speed(), 3.0);
    }
}
