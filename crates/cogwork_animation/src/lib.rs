//! Cogwork Animation System
//!
//! Small, independent animation state machines advanced by an external tick.
//!
//! # Features
//!
//! - **Easing**: the handful of curves the diagram needs
//! - **Tweens**: keyframed `f32` values with delay, easing and looping
//! - **Spin**: continuous rotation expressed in revolutions per minute
//! - **Scheduler**: an explicit owner of running animations; nothing global
//!
//! Time is always supplied by the caller in milliseconds, so an animation
//! can be driven by a display refresh callback or by a test advancing a
//! simulated clock.
//!
//! ```rust
//! use cogwork_animation::{AnimationScheduler, Easing, Tween};
//!
//! let mut scheduler = AnimationScheduler::new();
//! let pulse = scheduler.add(Tween::keyframes(&[0.8, 1.2, 0.8], 2000.0).easing(Easing::EaseInOutQuad).looping());
//! scheduler.tick(1000.0);
//! assert!((scheduler.value(pulse).unwrap() - 1.2).abs() < 1e-5);
//! ```

pub mod clock;
pub mod easing;
pub mod scheduler;
pub mod spin;
pub mod tween;

pub use clock::FrameClock;
pub use easing::Easing;
pub use scheduler::{Animation, AnimationId, AnimationScheduler};
pub use spin::Spin;
pub use tween::Tween;
