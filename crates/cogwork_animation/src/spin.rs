//! Continuous rotation

use crate::scheduler::Animation;
use std::f32::consts::TAU;

/// Endless rotation at a fixed rate, reported as an angle in radians
///
/// The angle restarts from `base` after each full turn, which is visually
/// seamless because `base + TAU` and `base` are the same orientation. Elapsed
/// time is kept in `f64` and wrapped to one period, so the spin keeps
/// moving however long it runs.
#[derive(Clone, Debug)]
pub struct Spin {
    base: f32,
    /// Milliseconds per full turn. Infinite for a stationary spin.
    period: f64,
    /// Time into the current turn
    elapsed: f64,
}

impl Spin {
    /// Spin at `rpm` revolutions per minute
    ///
    /// Non-positive or non-finite rates produce a spin that never moves.
    pub fn from_rpm(rpm: f32) -> Self {
        let period = if rpm.is_finite() && rpm > 0.0 {
            60_000.0 / f64::from(rpm)
        } else {
            f64::INFINITY
        };
        Self {
            base: 0.0,
            period,
            elapsed: 0.0,
        }
    }

    /// Start from an existing angle
    pub fn with_base(mut self, angle: f32) -> Self {
        self.base = angle;
        self
    }

    /// Milliseconds per full revolution
    pub fn period_ms(&self) -> f64 {
        self.period
    }

    /// Angle at an absolute time since the spin started
    pub fn angle_at(&self, elapsed_ms: f64) -> f32 {
        if !self.period.is_finite() {
            return self.base;
        }
        let turns = (elapsed_ms.max(0.0) / self.period).fract();
        self.base + TAU * turns as f32
    }
}

impl Animation for Spin {
    fn advance(&mut self, dt_ms: f32) {
        if !self.period.is_finite() {
            return;
        }
        self.elapsed = (self.elapsed + f64::from(dt_ms.max(0.0))) % self.period;
    }

    fn value(&self) -> f32 {
        self.angle_at(self.elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpm_to_period() {
        assert_eq!(Spin::from_rpm(0.5).period_ms(), 120_000.0);
        assert!((Spin::from_rpm(0.8).period_ms() - 75_000.0).abs() < 0.01);
    }

    #[test]
    fn test_quarter_turn() {
        let spin = Spin::from_rpm(1.0);
        assert!((spin.angle_at(15_000.0) - TAU / 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_keeps_turning_after_days() {
        let mut spin = Spin::from_rpm(0.5);
        spin.advance(270_000_000.0);
        let before = spin.value();
        for _ in 0..120 {
            spin.advance(8.333_333);
        }
        let mut moved = spin.value() - before;
        if moved < 0.0 {
            moved += TAU;
        }
        // 0.5 rpm turns TAU / 120 radians per second
        assert!((moved - TAU / 120.0).abs() < 1e-4, "{moved}");
    }

    #[test]
    fn test_stationary_spin() {
        let mut spin = Spin::from_rpm(0.0).with_base(1.0);
        spin.advance(10_000.0);
        assert_eq!(spin.value(), 1.0);
    }
}
