//! Frame clock

/// Turns host frame timestamps into per-frame deltas
///
/// The first timestamp after construction or `reset` yields a zero delta so
/// animations never jump on the first rendered frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame timestamp (milliseconds) and return the delta since the previous one
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last {
            Some(last) => (now_ms - last).max(0.0) as f32,
            None => 0.0,
        };
        self.last = Some(now_ms);
        dt
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(1234.0), 0.0);
        assert_eq!(clock.tick(1250.0), 16.0);
    }

    #[test]
    fn test_deltas_stay_exact_after_long_uptime() {
        let mut clock = FrameClock::new();
        let start = 75.0 * 3_600_000.0;
        clock.tick(start);
        let dt = clock.tick(start + 8.333);
        assert!((dt - 8.333).abs() < 1e-3, "{dt}");
    }

    #[test]
    fn test_time_never_runs_backwards() {
        let mut clock = FrameClock::new();
        clock.tick(100.0);
        assert_eq!(clock.tick(50.0), 0.0);
    }
}
