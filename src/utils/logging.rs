use log::warn;
use std::time::Duration;

/// Emits a warning when a step took longer than the frame budget.
/// Returns whether the budget was exceeded.
pub fn warn_if_frame_budget_exceeded(duration: Duration, budget_ms: f32) -> bool {
    let elapsed_ms = duration.as_secs_f32() * 1000.0;
    if elapsed_ms > budget_ms {
        warn!("Step exceeded frame budget: {elapsed_ms:.2} ms > {budget_ms:.2} ms");
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_check_reports_overruns() {
        assert!(warn_if_frame_budget_exceeded(Duration::from_millis(20), 16.67));
        assert!(!warn_if_frame_budget_exceeded(Duration::from_millis(5), 16.67));
    }
}
