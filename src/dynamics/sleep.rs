//! Sleep classification with hysteresis.
//!
//! Sleeping particles are still integrated every frame but skip collision
//! resolution and do not count as active. A particle below the sleep velocity
//! gains three sleep frames per step, one that is merely slow gains one, and
//! anything faster is fully awake again.

use crate::{
    config::{SimulationConfig, SLEEP_COUNTER_HEADROOM, SLEEP_FAST_INCREMENT},
    core::particle::Particle,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SleepPolicy {
    pub sleep_velocity_sq: f32,
    pub min_collision_velocity_sq: f32,
    pub sleep_frames: u32,
}

impl SleepPolicy {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            sleep_velocity_sq: config.sleep_velocity * config.sleep_velocity,
            min_collision_velocity_sq: config.min_collision_velocity * config.min_collision_velocity,
            sleep_frames: config.sleep_frames,
        }
    }

    pub fn is_sleeping(&self, particle: &Particle) -> bool {
        particle.sleep_counter > self.sleep_frames
    }

    /// Advances the particle's sleep counter from its squared speed.
    pub fn update(&self, particle: &mut Particle, speed_sq: f32) {
        if speed_sq < self.sleep_velocity_sq {
            particle.sleep_counter = particle
                .sleep_counter
                .saturating_add(SLEEP_FAST_INCREMENT)
                .min(self.sleep_frames.saturating_add(SLEEP_COUNTER_HEADROOM));
        } else if speed_sq < self.min_collision_velocity_sq {
            particle.sleep_counter = particle.sleep_counter.saturating_add(1);
        } else {
            particle.sleep_counter = 0;
        }
    }
}

/// Wakes the particle.
pub fn reset_sleep(particle: &mut Particle) {
    particle.sleep_counter = 0;
}
