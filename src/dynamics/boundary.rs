use glam::Vec2;

use crate::{config::SimulationConfig, core::particle::Particle, utils::math::clamp_length_in_place};

/// World edge a particle was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryContact {
    Floor,
    LeftWall,
    RightWall,
}

/// Floor and side walls of the world rectangle, plus the speed cap.
///
/// There is no ceiling: particles may travel above `y = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    pub width: f32,
    pub height: f32,
    pub floor_friction: f32,
    pub bounce_damping: f32,
    pub rest_velocity: f32,
    pub max_speed: f32,
}

impl Boundary {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            width: config.world_width,
            height: config.world_height,
            floor_friction: config.floor_friction,
            bounce_damping: config.bounce_damping,
            rest_velocity: config.rest_velocity,
            max_speed: config.max_speed,
        }
    }

    /// Resolves at most one edge contact, checked floor first, then the left
    /// wall, then the right wall. A particle touching a corner only has the
    /// first matching edge applied this frame.
    pub fn resolve(&self, particle: &mut Particle) -> Option<BoundaryContact> {
        let r = particle.radius();

        if particle.position.y + r >= self.height {
            particle.position.y = self.height - r;
            particle.velocity.x *= self.floor_friction;
            particle.velocity.y *= -self.bounce_damping;
            if particle.velocity.y.abs() < self.rest_velocity {
                particle.velocity.y = 0.0;
            }
            return Some(BoundaryContact::Floor);
        }

        if particle.position.x - r <= 0.0 {
            particle.position.x = r;
            particle.velocity.x *= -self.bounce_damping;
            return Some(BoundaryContact::LeftWall);
        }

        if particle.position.x + r >= self.width {
            particle.position.x = self.width - r;
            particle.velocity.x *= -self.bounce_damping;
            return Some(BoundaryContact::RightWall);
        }

        None
    }

    pub fn clamp_velocity(&self, velocity: &mut Vec2) {
        clamp_length_in_place(velocity, self.max_speed);
    }

    /// Pulls the particle's position back inside the floor and walls without
    /// touching its velocity.
    pub fn confine(&self, particle: &mut Particle) {
        let r = particle.radius();
        particle.position.x = particle.position.x.clamp(r, self.width - r);
        particle.position.y = particle.position.y.min(self.height - r);
    }
}
