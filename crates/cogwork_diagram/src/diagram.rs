//! The mechanical diagram component
//!
//! Owns one scene, camera and renderer for as long as it is mounted. The
//! host drives it through four entry points: [`mount`], [`on_animation_frame`],
//! [`on_resize`] and [`unmount`], plus [`set_theme`] whenever the page flips
//! between light and dark.
//!
//! Every failure is absorbed. Setup errors leave the component in
//! [`DiagramState::Error`] with all partial resources released; frame,
//! resize and theme errors are logged and the scene keeps going.
//!
//! [`mount`]: MechanicalDiagram::mount
//! [`on_animation_frame`]: MechanicalDiagram::on_animation_frame
//! [`on_resize`]: MechanicalDiagram::on_resize
//! [`unmount`]: MechanicalDiagram::unmount
//! [`set_theme`]: MechanicalDiagram::set_theme

use crate::config::{DiagramConfig, GearStyle};
use crate::environment::Environment;
use crate::error::{DiagramError, Result};
use crate::host::{FrameHandle, Host, ListenerHandle};
use crate::motion::{gear_rpm, MotionRig};
use crate::state::DiagramState;
use cogwork_3d::factory::{create_gear, create_network, create_simple_gear, GearModel, Network};
use cogwork_3d::render::{create_renderer_with, resize_to_container, Renderer};
use cogwork_3d::scene::{PerspectiveCamera, Scene};
use cogwork_3d::utils::{dispose_object, setup_cad_lighting, setup_isometric_camera, CadLighting, DisposeReport};
use cogwork_animation::FrameClock;
use cogwork_theme::{ColorScheme, DiagramPalette};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Presentation of the element hosting the canvas
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerAttributes {
    /// Always set; the diagram is decorative
    pub aria_hidden: bool,
    pub class_name: String,
    pub min_height_px: u32,
}

impl ContainerAttributes {
    /// Inline style string
    pub fn style(&self) -> String {
        format!("min-height: {}px", self.min_height_px)
    }
}

/// Resources held while mounted
struct Mounted<R: Renderer> {
    scene: Scene,
    camera: PerspectiveCamera,
    renderer: R,
    lighting: Option<CadLighting>,
    gears: Vec<GearModel>,
    network: Option<Network>,
    motion: MotionRig,
    clock: FrameClock,
    frame: Option<FrameHandle>,
    listener: Option<ListenerHandle>,
}

impl<R: Renderer> Mounted<R> {
    fn new(camera: PerspectiveCamera, renderer: R) -> Self {
        Self {
            scene: Scene::new(),
            camera,
            renderer,
            lighting: None,
            gears: Vec::new(),
            network: None,
            motion: MotionRig::new(),
            clock: FrameClock::new(),
            frame: None,
            listener: None,
        }
    }

    /// Write palette colors into every themed material
    fn apply_palette(&mut self, palette: &DiagramPalette) -> usize {
        let mut updated = 0;
        for gear in &self.gears {
            for id in gear.body_materials() {
                if let Some(material) = self.scene.material_mut(id) {
                    material.set_color(palette.gear);
                    updated += 1;
                }
            }
        }
        if let Some(network) = &self.network {
            for node in &network.nodes {
                if let Some(material) = self.scene.material_mut(node.material) {
                    material.set_color(palette.node_active);
                    material.set_emissive(palette.node_active);
                    updated += 1;
                }
            }
            if let Some(material) = self.scene.material_mut(network.connections.material) {
                material.set_color(palette.node_glow);
                updated += 1;
            }
        }
        updated
    }

    fn render(&mut self) -> std::result::Result<(), cogwork_3d::RenderError> {
        self.renderer.render(&self.scene, &self.camera)
    }

    /// Release everything, in the reverse order of acquisition
    ///
    /// The frame is cancelled first so no callback can reach a disposed
    /// renderer.
    fn teardown<H: Host<Renderer = R>>(mut self, host: &mut H) -> DisposeReport {
        if let Some(frame) = self.frame.take() {
            host.cancel_animation_frame(frame);
        }
        if let Some(listener) = self.listener.take() {
            host.remove_resize_listener(listener);
        }
        self.motion.clear();

        let mut report = DisposeReport::default();
        for gear in self.gears.drain(..) {
            report += dispose_object(&mut self.scene, gear.root());
        }
        if let Some(network) = self.network.take() {
            for node in &network.nodes {
                report += dispose_object(&mut self.scene, node.mesh);
            }
            report += dispose_object(&mut self.scene, network.connections.object);
            report += dispose_object(&mut self.scene, network.group);
        }
        if let Some(lighting) = self.lighting.take() {
            for light in [lighting.ambient, lighting.key, lighting.fill] {
                report += dispose_object(&mut self.scene, light);
            }
        }

        self.renderer.dispose();
        host.detach_canvas(&self.renderer);
        report
    }
}

/// Decorative scene of spinning gears under a pulsing node network
///
/// Generic over the host so the same component runs against a browser
/// binding or the [`HeadlessHost`](crate::HeadlessHost).
pub struct MechanicalDiagram<H: Host> {
    config: DiagramConfig,
    class_name: Option<String>,
    env: Environment,
    state: DiagramState,
    loaded: bool,
    mounted: Option<Mounted<H::Renderer>>,
}

impl<H: Host> MechanicalDiagram<H> {
    pub fn new(config: DiagramConfig) -> Self {
        Self {
            config,
            class_name: None,
            env: Environment::default(),
            state: DiagramState::Uninitialized,
            loaded: false,
            mounted: None,
        }
    }

    /// Extra classes appended to the container
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Build the scene and start rendering
    ///
    /// Never fails from the caller's point of view: if WebGL is missing or
    /// setup throws, the diagram moves to [`DiagramState::Error`] and draws
    /// nothing. Mounting twice without an unmount in between is ignored.
    pub fn mount(&mut self, host: &mut H, env: Environment) {
        if !self.state.can_mount() {
            tracing::warn!(state = %self.state, "mount ignored; unmount first");
            return;
        }
        self.env = env;
        self.loaded = false;
        self.state = DiagramState::Initializing;

        match self.build(host) {
            Ok(mounted) => {
                tracing::debug!(
                    gears = mounted.gears.len(),
                    objects = mounted.scene.object_count(),
                    animations = mounted.motion.len(),
                    scheme = %self.env.scheme,
                    "mechanical diagram mounted"
                );
                self.mounted = Some(mounted);
                self.loaded = true;
                self.state = DiagramState::Rendering;
            }
            Err(DiagramError::WebGlUnavailable) => {
                tracing::warn!("WebGL is not available; mechanical diagram disabled");
                self.state = DiagramState::Error;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to initialize mechanical diagram");
                self.state = DiagramState::Error;
            }
        }
    }

    fn build(&self, host: &mut H) -> Result<Mounted<H::Renderer>> {
        if !host.is_webgl_available() {
            return Err(DiagramError::WebGlUnavailable);
        }
        self.config.validate()?;

        let (width, height) = (host.client_width(), host.client_height());
        let aspect = if width > 0 && height > 0 {
            width as f32 / height as f32
        } else {
            1.0
        };
        let camera = setup_isometric_camera(aspect, self.config.camera_position);
        let mut renderer = create_renderer_with(host, &self.config.renderer.options())?;
        renderer.set_size(width, height);
        host.attach_canvas(&renderer);

        let mut mounted = Mounted::new(camera, renderer);
        if let Err(err) = self.populate(&mut mounted, host) {
            let report = mounted.teardown(host);
            tracing::debug!(?report, "released partially built diagram");
            return Err(err);
        }
        Ok(mounted)
    }

    fn populate(&self, mounted: &mut Mounted<H::Renderer>, host: &mut H) -> Result<()> {
        mounted.lighting = Some(setup_cad_lighting(&mut mounted.scene));

        for placement in &self.config.gears {
            let gear = match self.config.gear_style {
                GearStyle::Solid => create_gear(&mut mounted.scene, &placement.options)?,
                GearStyle::Simple => create_simple_gear(&mut mounted.scene, &placement.options)?,
            };
            let root = gear.root();
            mounted.gears.push(gear);
            if let Some(transform) = mounted.scene.transform_mut(root) {
                transform.position = placement.position;
            }
            mounted.scene.add(root);
        }

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let network = create_network(&mut mounted.scene, &self.config.network, &mut rng)?;
        if let Some(transform) = mounted.scene.transform_mut(network.group) {
            transform.position = self.config.network_offset;
        }
        mounted.scene.add(network.group);
        mounted.network = Some(network);

        mounted.apply_palette(self.palette());

        // Render loop: schedule the next frame, then draw this one
        mounted.frame = Some(host.request_animation_frame());
        mounted.render()?;

        mounted.listener = Some(host.add_resize_listener());

        if self.env.motion_allowed() {
            self.start_motion(mounted);
        }
        Ok(())
    }

    fn start_motion(&self, mounted: &mut Mounted<H::Renderer>) {
        for (index, gear) in mounted.gears.iter().enumerate() {
            let root = gear.root();
            let base = mounted.scene.transform(root).map_or(0.0, |t| t.rotation.z);
            mounted.motion.spin(root, base, gear_rpm(index));
        }
        if let Some(network) = &mounted.network {
            for (index, node) in network.nodes.iter().enumerate() {
                mounted.motion.pulse(node.mesh, index);
            }
            mounted.motion.fade(network.connections.material);
        }
        mounted.motion.entrance();
        if let Some(style) = mounted.motion.apply(&mut mounted.scene) {
            mounted.renderer.set_canvas_style(style);
        }
    }

    /// Host callback for a frame scheduled by this diagram
    ///
    /// Schedules the next frame, advances motion by the time since the last
    /// frame and draws. Handles that are not the outstanding one are stale
    /// and ignored. Returns whether a frame was drawn.
    pub fn on_animation_frame(&mut self, host: &mut H, handle: FrameHandle, timestamp_ms: f64) -> bool {
        if self.state != DiagramState::Rendering {
            return false;
        }
        let Some(mounted) = self.mounted.as_mut() else {
            return false;
        };
        if mounted.frame != Some(handle) {
            tracing::debug!(?handle, "ignoring stale animation frame");
            return false;
        }

        mounted.frame = Some(host.request_animation_frame());
        let dt = mounted.clock.tick(timestamp_ms);
        mounted.motion.tick(dt);
        if let Some(style) = mounted.motion.apply(&mut mounted.scene) {
            mounted.renderer.set_canvas_style(style);
        }
        match mounted.render() {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "frame dropped");
                false
            }
        }
    }

    /// Host callback for container resizes
    pub fn on_resize(&mut self, host: &H) -> bool {
        if !self.state.is_live() {
            return false;
        }
        match self.mounted.as_mut() {
            Some(mounted) => resize_to_container(&mut mounted.camera, &mut mounted.renderer, host),
            None => false,
        }
    }

    /// Recolor the scene for a new ambient scheme
    ///
    /// Only material colors change; geometry is untouched. The scheme is
    /// remembered for the next mount even when nothing is mounted.
    pub fn set_theme(&mut self, scheme: ColorScheme) -> bool {
        self.env.scheme = scheme;
        if self.state != DiagramState::Rendering {
            return false;
        }
        let Some(mounted) = self.mounted.as_mut() else {
            return false;
        };

        self.state = DiagramState::ThemeUpdating;
        let palette = *self.config.palettes.for_scheme(scheme);
        let updated = mounted.apply_palette(&palette);
        if updated == 0 {
            tracing::warn!(%scheme, "theme change found no materials to update");
        }
        tracing::debug!(%scheme, materials = updated, "applied theme");
        self.state = DiagramState::Rendering;
        true
    }

    /// Stop rendering and release every resource
    ///
    /// Safe in any state, including after a failed mount; a second call
    /// releases nothing.
    pub fn unmount(&mut self, host: &mut H) -> DisposeReport {
        if self.state == DiagramState::Disposed {
            return DisposeReport::default();
        }
        let report = match self.mounted.take() {
            Some(mounted) => mounted.teardown(host),
            None => DisposeReport::default(),
        };
        tracing::debug!(?report, previous = %self.state, "mechanical diagram unmounted");
        self.loaded = false;
        self.state = DiagramState::Disposed;
        report
    }

    /// Attributes for the hosting element, `None` when nothing should render
    pub fn container_attributes(&self) -> Option<ContainerAttributes> {
        if self.state == DiagramState::Error {
            return None;
        }
        let mut classes = vec!["relative", "w-full", "h-full"];
        if !self.loaded {
            classes.push("opacity-0");
        }
        if let Some(extra) = self.class_name.as_deref() {
            classes.push(extra);
        }
        Some(ContainerAttributes {
            aria_hidden: true,
            class_name: classes.join(" "),
            min_height_px: self.config.min_height_px,
        })
    }

    pub fn state(&self) -> DiagramState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn environment(&self) -> Environment {
        self.env
    }

    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    /// Palette for the current scheme
    pub fn palette(&self) -> &DiagramPalette {
        self.config.palettes.for_scheme(self.env.scheme)
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.mounted.as_ref().map(|m| &m.scene)
    }

    pub fn camera(&self) -> Option<&PerspectiveCamera> {
        self.mounted.as_ref().map(|m| &m.camera)
    }

    pub fn renderer(&self) -> Option<&H::Renderer> {
        self.mounted.as_ref().map(|m| &m.renderer)
    }

    pub fn gears(&self) -> &[GearModel] {
        self.mounted.as_ref().map_or(&[][..], |m| m.gears.as_slice())
    }

    pub fn network(&self) -> Option<&Network> {
        self.mounted.as_ref().and_then(|m| m.network.as_ref())
    }

    /// Current Z rotation of each gear, in build order
    pub fn gear_rotations(&self) -> Vec<f32> {
        let Some(mounted) = self.mounted.as_ref() else {
            return Vec::new();
        };
        mounted
            .gears
            .iter()
            .filter_map(|gear| mounted.scene.transform(gear.root()))
            .map(|t| t.rotation.z)
            .collect()
    }

    /// Number of running animations
    pub fn animation_count(&self) -> usize {
        self.mounted.as_ref().map_or(0, |m| m.motion.len())
    }
}

impl<H: Host> Default for MechanicalDiagram<H> {
    fn default() -> Self {
        Self::new(DiagramConfig::default())
    }
}
