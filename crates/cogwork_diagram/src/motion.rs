//! Continuous diagram motion
//!
//! Binds scheduler animations to scene objects and materials. The rig never
//! reads a clock; the diagram ticks it with the delta of each frame and then
//! writes the current values back into the scene.

use cogwork_3d::render::CanvasStyle;
use cogwork_3d::scene::{MaterialId, ObjectId, Scene};
use cogwork_animation::{AnimationId, AnimationScheduler, Easing, Spin, Tween};

/// Rotation rate of the first gear in revolutions per minute
pub const GEAR_BASE_RPM: f32 = 0.5;
/// Extra rate for each following gear
pub const GEAR_RPM_STEP: f32 = 0.3;

const NODE_PULSE: [f32; 3] = [0.8, 1.2, 0.8];
const NODE_PULSE_MS: f32 = 2000.0;
const NODE_STAGGER_MS: f32 = 100.0;

const LINE_PULSE: [f32; 3] = [0.3, 1.0, 0.3];
const LINE_PULSE_MS: f32 = 1500.0;

const ENTRANCE_MS: f32 = 800.0;
const ENTRANCE_DELAY_MS: f32 = 400.0;
/// Starting vertical offset of the canvas in CSS pixels
const ENTRANCE_OFFSET: f32 = 50.0;

/// Spin rate of gear `index`
pub fn gear_rpm(index: usize) -> f32 {
    GEAR_BASE_RPM + GEAR_RPM_STEP * index as f32
}

#[derive(Clone, Copy, Debug)]
struct Entrance {
    opacity: AnimationId,
    offset: AnimationId,
}

/// Animations of one mounted diagram and the targets they drive
#[derive(Default)]
pub struct MotionRig {
    scheduler: AnimationScheduler,
    spins: Vec<(ObjectId, AnimationId)>,
    pulses: Vec<(ObjectId, AnimationId)>,
    fades: Vec<(MaterialId, AnimationId)>,
    entrance: Option<Entrance>,
}

impl MotionRig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rotate `object` about Z forever, starting from its current angle
    pub fn spin(&mut self, object: ObjectId, base_angle: f32, rpm: f32) {
        let id = self.scheduler.add(Spin::from_rpm(rpm).with_base(base_angle));
        self.spins.push((object, id));
    }

    /// Pulse the uniform scale of `object`
    pub fn pulse(&mut self, object: ObjectId, index: usize) {
        let tween = Tween::keyframes(&NODE_PULSE, NODE_PULSE_MS)
            .easing(Easing::EaseInOutQuad)
            .delay(NODE_STAGGER_MS * index as f32)
            .looping();
        let id = self.scheduler.add(tween);
        self.pulses.push((object, id));
    }

    /// Pulse the opacity of a line material
    pub fn fade(&mut self, material: MaterialId) {
        let tween = Tween::keyframes(&LINE_PULSE, LINE_PULSE_MS)
            .easing(Easing::EaseInOutCubic)
            .looping();
        let id = self.scheduler.add(tween);
        self.fades.push((material, id));
    }

    /// Fade the canvas in while sliding it up into place
    pub fn entrance(&mut self) {
        let opacity = self.scheduler.add(
            Tween::new(0.0, 1.0, ENTRANCE_MS)
                .delay(ENTRANCE_DELAY_MS)
                .easing(Easing::EaseOutCubic),
        );
        let offset = self.scheduler.add(
            Tween::new(ENTRANCE_OFFSET, 0.0, ENTRANCE_MS)
                .delay(ENTRANCE_DELAY_MS)
                .easing(Easing::EaseOutCubic),
        );
        self.entrance = Some(Entrance { opacity, offset });
    }

    pub fn tick(&mut self, dt_ms: f32) {
        self.scheduler.tick(dt_ms);
    }

    /// Write current values into the scene
    ///
    /// Targets that no longer exist are skipped. Returns the canvas style
    /// while an entrance is registered.
    pub fn apply(&self, scene: &mut Scene) -> Option<CanvasStyle> {
        for &(object, id) in &self.spins {
            if let (Some(angle), Some(transform)) = (self.scheduler.value(id), scene.transform_mut(object)) {
                transform.rotation.z = angle;
            }
        }
        for &(object, id) in &self.pulses {
            if let (Some(scale), Some(transform)) = (self.scheduler.value(id), scene.transform_mut(object)) {
                transform.set_uniform_scale(scale);
            }
        }
        for &(material, id) in &self.fades {
            if let (Some(opacity), Some(target)) = (self.scheduler.value(id), scene.material_mut(material)) {
                target.set_opacity(opacity);
            }
        }

        let entrance = self.entrance?;
        Some(CanvasStyle {
            opacity: self.scheduler.value(entrance.opacity)?,
            translate_y: self.scheduler.value(entrance.offset)?,
        })
    }

    /// Number of running animations
    pub fn len(&self) -> usize {
        self.scheduler.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scheduler.is_empty()
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.scheduler.elapsed_ms()
    }

    /// Stop everything
    pub fn clear(&mut self) {
        self.scheduler.clear();
        self.spins.clear();
        self.pulses.clear();
        self.fades.clear();
        self.entrance = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cogwork_3d::materials::LineMaterial;
    use cogwork_core::Color;

    #[test]
    fn test_gear_rates_differ() {
        assert_eq!(gear_rpm(0), 0.5);
        assert!((gear_rpm(4) - 1.7).abs() < 1e-6);
    }

    #[test]
    fn test_spin_writes_rotation() {
        let mut scene = Scene::new();
        let gear = scene.spawn_group();
        let mut rig = MotionRig::new();
        rig.spin(gear, 0.0, 1.0);

        // One rpm: a quarter turn every fifteen seconds
        rig.tick(15_000.0);
        rig.apply(&mut scene);
        let angle = scene.transform(gear).unwrap().rotation.z;
        assert!((angle - std::f32::consts::FRAC_PI_2).abs() < 1e-3);
    }

    #[test]
    fn test_gears_keep_turning_after_long_uptime() {
        let mut scene = Scene::new();
        let gear = scene.spawn_group();
        let mut rig = MotionRig::new();
        rig.spin(gear, 0.0, gear_rpm(0));

        // Seventy five hours mounted, then one second at 120 Hz
        rig.tick(270_000_000.0);
        rig.apply(&mut scene);
        let before = scene.transform(gear).unwrap().rotation.z;
        for _ in 0..120 {
            rig.tick(8.333_333);
        }
        rig.apply(&mut scene);
        let after = scene.transform(gear).unwrap().rotation.z;
        let moved = (after - before).rem_euclid(std::f32::consts::TAU);
        assert!((moved - std::f32::consts::TAU / 120.0).abs() < 1e-3, "{moved}");
    }

    #[test]
    fn test_pulses_are_staggered() {
        let mut scene = Scene::new();
        let a = scene.spawn_group();
        let b = scene.spawn_group();
        let mut rig = MotionRig::new();
        rig.pulse(a, 0);
        rig.pulse(b, 5);

        rig.tick(250.0);
        rig.apply(&mut scene);
        let scale_a = scene.transform(a).unwrap().scale.x;
        let scale_b = scene.transform(b).unwrap().scale.x;
        assert!(scale_a > 0.8);
        assert!((scale_b - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_fade_and_entrance() {
        let mut scene = Scene::new();
        let material = scene.add_material(LineMaterial::new(Color::WHITE).with_opacity(0.4));
        let mut rig = MotionRig::new();
        rig.fade(material);
        rig.entrance();

        let style = rig.apply(&mut scene).unwrap();
        assert_eq!(style.opacity, 0.0);
        assert_eq!(style.translate_y, 50.0);
        assert!((scene.material(material).unwrap().opacity() - 0.3).abs() < 1e-6);

        rig.tick(750.0);
        let style = rig.apply(&mut scene).unwrap();
        assert!(style.opacity > 0.0 && style.translate_y < 50.0);
        assert!((scene.material(material).unwrap().opacity() - 1.0).abs() < 1e-6);

        rig.tick(1000.0);
        let style = rig.apply(&mut scene).unwrap();
        assert_eq!(style, CanvasStyle::default());
    }

    #[test]
    fn test_missing_targets_are_skipped() {
        let mut scene = Scene::new();
        let gone = scene.spawn_group();
        scene.remove_object(gone);
        let mut rig = MotionRig::new();
        rig.spin(gone, 0.0, 1.0);
        rig.tick(16.0);
        assert!(rig.apply(&mut scene).is_none());

        rig.clear();
        assert!(rig.is_empty());
    }
}
