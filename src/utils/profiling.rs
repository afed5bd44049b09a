use std::time::{Duration, Instant};

/// Timing and volume figures for the most recent step.
#[derive(Debug, Default, Clone, Copy)]
pub struct StepProfile {
    pub integration_time: Duration,
    pub broad_phase_time: Duration,
    pub solver_time: Duration,
    pub total_frame_time: Duration,

    pub particle_count: usize,
    pub collision_count: usize,
    pub active_count: usize,
}

impl StepProfile {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn report(&self) {
        let total_us = self.total_frame_time.as_micros() as f32;
        if total_us < 1.0 {
            return;
        }

        log::debug!(
            "Particles: {}, Active: {}, Collisions: {}",
            self.particle_count,
            self.active_count,
            self.collision_count
        );
        log::debug!(
            "Total step: {:.2} ms",
            self.total_frame_time.as_secs_f32() * 1000.0
        );
        for (label, duration) in [
            ("Integration", self.integration_time),
            ("Broad phase", self.broad_phase_time),
            ("Solver", self.solver_time),
        ] {
            log::debug!(
                "  {label:<12} {:.2} ms ({:.1}%)",
                duration.as_secs_f32() * 1000.0,
                (duration.as_micros() as f32 / total_us) * 100.0
            );
        }
    }
}

/// Guard around one step stage: traces its start and end and adds its
/// lifetime to the referenced duration on drop.
pub struct StageTimer<'a> {
    label: &'static str,
    start: Instant,
    output: &'a mut Duration,
}

impl<'a> StageTimer<'a> {
    pub fn new(label: &'static str, output: &'a mut Duration) -> Self {
        log::trace!("stage {label} begin");
        Self {
            label,
            start: Instant::now(),
            output,
        }
    }
}

impl Drop for StageTimer<'_> {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        *self.output += elapsed;
        log::trace!("stage {} done in {} us", self.label, elapsed.as_micros());
    }
}
