//! Keyframed value tweens
//!
//! A tween walks a list of keyframe values spread evenly over its duration.
//! Each segment between two keyframes is eased independently, so
//! `[0.8, 1.2, 0.8]` with an in-out curve swells and relaxes smoothly.

use crate::easing::Easing;
use crate::scheduler::Animation;
use smallvec::SmallVec;

/// A keyframed `f32` tween with optional delay and looping
#[derive(Clone, Debug)]
pub struct Tween {
    values: SmallVec<[f32; 4]>,
    /// Duration of one pass in milliseconds
    duration: f32,
    /// Delay before the first pass in milliseconds
    delay: f32,
    easing: Easing,
    looping: bool,
    elapsed: f64,
}

impl Tween {
    /// Tween from one value to another
    pub fn new(from: f32, to: f32, duration_ms: f32) -> Self {
        Self::keyframes(&[from, to], duration_ms)
    }

    /// Tween through evenly spaced keyframes
    ///
    /// An empty slice behaves like a constant zero.
    pub fn keyframes(values: &[f32], duration_ms: f32) -> Self {
        let mut values: SmallVec<[f32; 4]> = values.iter().copied().collect();
        if values.is_empty() {
            values.push(0.0);
        }
        Self {
            values,
            duration: duration_ms.max(0.0),
            delay: 0.0,
            easing: Easing::Linear,
            looping: false,
            elapsed: 0.0,
        }
    }

    /// Set easing curve
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set start delay in milliseconds
    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.delay = delay_ms.max(0.0);
        self
    }

    /// Repeat forever
    pub fn looping(mut self) -> Self {
        self.looping = true;
        self
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Value at an absolute time since the tween started
    pub fn sample(&self, elapsed_ms: f64) -> f32 {
        let first = self.values[0];
        let last = self.values[self.values.len() - 1];

        let local = elapsed_ms - f64::from(self.delay);
        if local <= 0.0 {
            return first;
        }
        if self.duration <= 0.0 {
            return last;
        }

        let duration = f64::from(self.duration);
        let progress = if self.looping {
            (local % duration) / duration
        } else if local >= duration {
            return last;
        } else {
            local / duration
        };

        self.value_at_progress(progress as f32)
    }

    fn value_at_progress(&self, progress: f32) -> f32 {
        let segments = self.values.len() - 1;
        if segments == 0 {
            return self.values[0];
        }
        let scaled = progress * segments as f32;
        let index = (scaled.floor() as usize).min(segments - 1);
        let t = self.easing.apply(scaled - index as f32);
        let a = self.values[index];
        let b = self.values[index + 1];
        a + (b - a) * t
    }
}

impl Animation for Tween {
    fn advance(&mut self, dt_ms: f32) {
        let dt = f64::from(dt_ms.max(0.0));
        if self.looping && self.duration > 0.0 {
            // Keep at most one pass past the delay so the phase stays exact
            let delay = f64::from(self.delay);
            let duration = f64::from(self.duration);
            let next = self.elapsed + dt;
            self.elapsed = if next > delay { delay + (next - delay) % duration } else { next };
        } else {
            self.elapsed += dt;
        }
    }

    fn value(&self) -> f32 {
        self.sample(self.elapsed)
    }

    fn is_finished(&self) -> bool {
        !self.looping && self.elapsed >= f64::from(self.delay + self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_holds_first_value_during_delay() {
        let tween = Tween::new(0.0, 1.0, 800.0).delay(400.0);
        assert_eq!(tween.sample(0.0), 0.0);
        assert_eq!(tween.sample(399.0), 0.0);
        assert!(tween.sample(800.0) > 0.0);
    }

    #[test]
    fn test_one_shot_settles_on_last_value() {
        let mut tween = Tween::new(50.0, 0.0, 800.0).easing(Easing::EaseOutCubic);
        tween.advance(500.0);
        assert!(!tween.is_finished());
        tween.advance(500.0);
        assert!(tween.is_finished());
        assert_eq!(tween.value(), 0.0);
    }

    #[test]
    fn test_keyframe_segments() {
        let tween = Tween::keyframes(&[0.3, 1.0, 0.3], 1500.0).easing(Easing::EaseInOutCubic);
        assert!(approx(tween.sample(0.0), 0.3));
        assert!(approx(tween.sample(750.0), 1.0));
        // Halfway through the first segment an in-out curve is at the midpoint
        assert!(approx(tween.sample(375.0), 0.65));
    }

    #[test]
    fn test_looping_wraps() {
        let tween = Tween::keyframes(&[0.8, 1.2, 0.8], 2000.0).looping();
        assert!(approx(tween.sample(500.0), tween.sample(2500.0)));
        assert!(approx(tween.sample(4000.0), 0.8));
        let mut running = tween.clone();
        running.advance(1_000_000.0);
        assert!(!running.is_finished());
    }

    #[test]
    fn test_values_stay_within_keyframe_range() {
        let tween = Tween::keyframes(&[0.8, 1.2, 0.8], 2000.0)
            .easing(Easing::EaseInOutQuad)
            .looping();
        for step in 0..200 {
            let v = tween.sample(f64::from(step) * 37.0);
            assert!((0.8..=1.2 + 1e-6).contains(&v), "{v}");
        }
    }

    #[test]
    fn test_looping_tween_keeps_phase_after_days() {
        let mut tween = Tween::keyframes(&[0.8, 1.2, 0.8], 2000.0)
            .easing(Easing::EaseInOutQuad)
            .looping();
        tween.advance(270_000_000.0);
        assert!(tween.elapsed() < 2000.0);
        assert!(approx(tween.value(), 0.8));
        let start = tween.value();
        for _ in 0..60 {
            tween.advance(8.333_333);
        }
        // A quarter of a second into the swell the scale has grown
        assert!(tween.value() > start + 0.01, "{}", tween.value());
        assert!(approx(tween.value(), tween.sample(500.0)));
    }

    #[test]
    fn test_empty_keyframes_are_constant() {
        let tween = Tween::keyframes(&[], 100.0);
        assert_eq!(tween.sample(50.0), 0.0);
    }
}
