use glam::Vec2;

use crate::{
    config::{SimulationConfig, COINCIDENT_DISTANCE_SQ},
    core::particle::Particle,
    utils::math::{decompose, normalize_or_zero},
};

/// Overlap between two equal circles, measured from `a`'s point of view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleContact {
    /// Unit vector pointing from `b` toward `a`.
    pub normal: Vec2,
    pub distance: f32,
    pub overlap: f32,
}

impl CircleContact {
    /// Returns the contact between centers `a` and `b`, or `None` when they are
    /// at least `min_separation` apart or (nearly) coincident.
    pub fn between(a: Vec2, b: Vec2, min_separation: f32) -> Option<Self> {
        let delta = a - b;
        let distance_sq = delta.length_squared();
        if distance_sq >= min_separation * min_separation || distance_sq < COINCIDENT_DISTANCE_SQ {
            return None;
        }

        let distance = distance_sq.sqrt();
        Some(Self {
            normal: normalize_or_zero(delta),
            distance,
            overlap: min_separation - distance,
        })
    }
}

/// Soft positional correction plus a clamped, equal-mass restitution impulse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactResponse {
    pub restitution: f32,
    pub tangential_damping: f32,
    pub position_correction: f32,
    pub max_impulse: f32,
}

impl ContactResponse {
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            restitution: config.restitution,
            tangential_damping: config.tangential_damping,
            position_correction: config.position_correction,
            max_impulse: config.max_impulse,
        }
    }

    /// Pushes both particles apart by a fraction of the overlap, then applies
    /// an impulse if they are closing. Returns the impulse magnitude, or
    /// `None` when the pair was already separating.
    pub fn resolve(&self, a: &mut Particle, b: &mut Particle, contact: &CircleContact) -> Option<f32> {
        let normal = contact.normal;

        let correction = normal * (contact.overlap * self.position_correction);
        a.position += correction;
        b.position -= correction;

        let closing = (a.velocity - b.velocity).dot(normal);
        if closing >= 0.0 {
            return None;
        }

        let impulse = (-(1.0 + self.restitution) * closing * 0.5)
            .clamp(-self.max_impulse, self.max_impulse);
        a.velocity += normal * impulse;
        b.velocity -= normal * impulse;

        for particle in [a, b] {
            let (_, tangential) = decompose(particle.velocity, normal);
            particle.velocity -= tangential * self.tangential_damping;
        }

        Some(impulse.abs())
    }
}
