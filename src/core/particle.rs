use glam::Vec2;
use rand::Rng;

/// Sand tones particles are tinted with, as `0xRRGGBB`.
pub const SAND_PALETTE: [u32; 16] = [
    0xD4A574, 0xC19A6B, 0xCD853F, 0xDEB887, 0xD2B48C, 0xB8860B, 0xDAA520, 0xF0E68C,
    0xEDD5B1, 0xFFE4B5, 0xF5DEB3, 0xDEB887, 0xC9B594, 0xB8A282, 0xA39872, 0x8B7D62,
];

/// Index into [`SAND_PALETTE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ParticleColor(u8);

impl ParticleColor {
    /// Returns the palette entry at `index`, wrapping past the end.
    pub fn new(index: usize) -> Self {
        Self((index % SAND_PALETTE.len()) as u8)
    }

    /// Picks a palette entry uniformly at random.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::new(rng.gen_range(0..SAND_PALETTE.len()))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn rgb(self) -> [u8; 3] {
        let packed = SAND_PALETTE[self.index()];
        [(packed >> 16) as u8, (packed >> 8) as u8, packed as u8]
    }

    /// CSS-style `#RRGGBB` string.
    pub fn hex(self) -> String {
        format!("#{:06X}", SAND_PALETTE[self.index()])
    }
}

/// A single sand grain.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: ParticleColor,
    radius: f32,
    /// Frames of accumulated low-speed behavior; see [`crate::dynamics::sleep`].
    pub sleep_counter: u32,
}

impl Particle {
    /// Creates a particle at rest.
    pub fn new(position: Vec2, radius: f32, color: ParticleColor) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            color,
            radius,
            sleep_counter: 0,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn palette_colors_decode() {
        let color = ParticleColor::new(0);
        assert_eq!(color.rgb(), [0xD4, 0xA5, 0x74]);
        assert_eq!(color.hex(), "#D4A574");
        assert_eq!(ParticleColor::new(SAND_PALETTE.len() + 2).index(), 2);
    }

    #[test]
    fn random_colors_stay_in_palette() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert!(ParticleColor::random(&mut rng).index() < SAND_PALETTE.len());
        }
    }
}
