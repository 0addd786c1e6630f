//! Animation scheduler
//!
//! Owns every running animation of one scene and advances them together from
//! a single external tick. There is no global instance; whoever owns the
//! scene owns its scheduler.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to an animation registered with a scheduler
    pub struct AnimationId;
}

/// A value that changes over externally supplied time
pub trait Animation {
    /// Advance by `dt_ms` milliseconds
    fn advance(&mut self, dt_ms: f32);

    /// Current value
    fn value(&self) -> f32;

    /// Whether the animation has reached its final value for good
    fn is_finished(&self) -> bool {
        false
    }
}

/// Manages a set of animations and advances them each frame
pub struct AnimationScheduler {
    animations: SlotMap<AnimationId, Box<dyn Animation>>,
    elapsed_ms: f64,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            animations: SlotMap::with_key(),
            elapsed_ms: 0.0,
        }
    }

    /// Register an animation and return its handle
    pub fn add<A: Animation + 'static>(&mut self, animation: A) -> AnimationId {
        self.animations.insert(Box::new(animation))
    }

    /// Current value of an animation
    pub fn value(&self, id: AnimationId) -> Option<f32> {
        self.animations.get(id).map(|a| a.value())
    }

    pub fn is_finished(&self, id: AnimationId) -> bool {
        self.animations.get(id).map_or(true, |a| a.is_finished())
    }

    pub fn remove(&mut self, id: AnimationId) -> bool {
        self.animations.remove(id).is_some()
    }

    /// Advance every animation by `dt_ms` milliseconds
    ///
    /// Returns `true` while at least one animation is still running.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        let dt_ms = dt_ms.max(0.0);
        self.elapsed_ms += dt_ms as f64;
        for (_, animation) in self.animations.iter_mut() {
            if !animation.is_finished() {
                animation.advance(dt_ms);
            }
        }
        self.has_active_animations()
    }

    pub fn has_active_animations(&self) -> bool {
        self.animations.values().any(|a| !a.is_finished())
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Total time advanced since creation, in milliseconds
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Drop every animation
    pub fn clear(&mut self) {
        if !self.animations.is_empty() {
            tracing::debug!(count = self.animations.len(), "clearing animations");
        }
        self.animations.clear();
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
