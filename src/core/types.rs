/// Aggregate snapshot of the latest step. Only the most recent frame is kept.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameStats {
    /// Pairs that received a collision impulse this frame.
    pub collisions: usize,
    pub avg_speed: f32,
    pub max_speed: f32,
    /// Particles not classified as sleeping after integration.
    pub active_bodies: usize,
    /// Largest impulse magnitude applied to any pair this frame.
    pub peak_impulse: f32,
}

impl FrameStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn record_impulse(&mut self, magnitude: f32) {
        self.collisions += 1;
        self.peak_impulse = self.peak_impulse.max(magnitude);
    }
}
