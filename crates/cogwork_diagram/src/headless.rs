//! Headless host
//!
//! Records what a browser would do without drawing anything: renderers
//! created and disposed, canvases attached, frames scheduled and listeners
//! registered. Tests and the CLI drive the diagram against it.

use crate::diagram::MechanicalDiagram;
use crate::host::{FrameHandle, Host, ListenerHandle};
use cogwork_3d::render::{CanvasStyle, Container, RenderBackend, Renderer, RendererOptions};
use cogwork_3d::scene::{NodeKind, PerspectiveCamera, Scene};
use cogwork_3d::RenderError;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

/// Counters shared between a host and the renderers it created
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HostLog {
    pub renderers_created: usize,
    pub renderers_disposed: usize,
    pub canvases_attached: usize,
    pub canvases_detached: usize,
    pub frames_rendered: usize,
    /// Ids of renderers whose canvas is in the container
    pub live_canvases: BTreeSet<u64>,
    pub pending_frames: BTreeSet<FrameHandle>,
    pub live_listeners: BTreeSet<ListenerHandle>,
    pub last_frame: Option<FrameStats>,
    pub canvas_style: Option<CanvasStyle>,
}

impl HostLog {
    pub fn live_renderers(&self) -> usize {
        self.renderers_created - self.renderers_disposed
    }
}

/// What one rendered frame contained
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub meshes: usize,
    pub line_segments: usize,
    pub lights: usize,
}

impl FrameStats {
    fn collect(scene: &Scene) -> Self {
        let mut stats = FrameStats::default();
        scene.traverse(|_, node| {
            if !node.transform.visible {
                return;
            }
            match node.kind {
                NodeKind::Mesh(_) => stats.meshes += 1,
                NodeKind::LineSegments(_) => stats.line_segments += 1,
                NodeKind::Light(_) => stats.lights += 1,
                NodeKind::Group => {}
            }
        });
        stats
    }
}

/// Renderer that counts frames instead of drawing them
#[derive(Debug)]
pub struct HeadlessRenderer {
    id: u64,
    log: Rc<RefCell<HostLog>>,
    pixel_ratio: f32,
    size: (u32, u32),
    style: CanvasStyle,
    options: RendererOptions,
    fail_render: bool,
    disposed: bool,
}

impl HeadlessRenderer {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn options(&self) -> &RendererOptions {
        &self.options
    }

    pub fn canvas_style(&self) -> CanvasStyle {
        self.style
    }
}

impl Renderer for HeadlessRenderer {
    fn set_pixel_ratio(&mut self, ratio: f32) {
        self.pixel_ratio = ratio;
    }

    fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn render(&mut self, scene: &Scene, _camera: &PerspectiveCamera) -> Result<(), RenderError> {
        if self.disposed {
            return Err(RenderError::Frame("renderer has been disposed".into()));
        }
        if self.fail_render {
            return Err(RenderError::Frame("injected failure".into()));
        }
        let mut log = self.log.borrow_mut();
        log.frames_rendered += 1;
        log.last_frame = Some(FrameStats::collect(scene));
        Ok(())
    }

    fn set_canvas_style(&mut self, style: CanvasStyle) {
        self.style = style;
        self.log.borrow_mut().canvas_style = Some(style);
    }

    fn dispose(&mut self) {
        if !self.disposed {
            self.disposed = true;
            self.log.borrow_mut().renderers_disposed += 1;
        }
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

/// In-memory host with a fixed-size container
#[derive(Debug)]
pub struct HeadlessHost {
    log: Rc<RefCell<HostLog>>,
    webgl: bool,
    device_pixel_ratio: f32,
    width: u32,
    height: u32,
    fail_create: bool,
    fail_render: bool,
    next_id: u64,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new(800, 400)
    }
}

impl HeadlessHost {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            log: Rc::new(RefCell::new(HostLog::default())),
            webgl: true,
            device_pixel_ratio: 1.0,
            width,
            height,
            fail_create: false,
            fail_render: false,
            next_id: 1,
        }
    }

    pub fn without_webgl(mut self) -> Self {
        self.webgl = false;
        self
    }

    pub fn with_device_pixel_ratio(mut self, ratio: f32) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    /// Make every renderer creation fail
    pub fn failing_renderer_creation(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Renderers created from now on fail to draw
    pub fn set_render_failure(&mut self, fail: bool) {
        self.fail_render = fail;
    }

    /// Change the container size; call the diagram's resize hook afterwards
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Snapshot of the counters
    pub fn log(&self) -> HostLog {
        self.log.borrow().clone()
    }

    /// Fire the most recently scheduled frame, as a display refresh would
    pub fn take_frame(&mut self) -> Option<FrameHandle> {
        self.log.borrow_mut().pending_frames.pop_last()
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl RenderBackend for HeadlessHost {
    type Renderer = HeadlessRenderer;

    fn is_webgl_available(&self) -> bool {
        self.webgl
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio
    }

    fn create_renderer(&mut self, options: &RendererOptions) -> Result<HeadlessRenderer, RenderError> {
        if !self.webgl {
            return Err(RenderError::ContextUnavailable);
        }
        if self.fail_create {
            return Err(RenderError::Creation("injected failure".into()));
        }
        let id = self.next_id();
        self.log.borrow_mut().renderers_created += 1;
        Ok(HeadlessRenderer {
            id,
            log: Rc::clone(&self.log),
            pixel_ratio: 1.0,
            size: (0, 0),
            style: CanvasStyle::default(),
            options: *options,
            fail_render: self.fail_render,
            disposed: false,
        })
    }
}

impl Container for HeadlessHost {
    fn client_width(&self) -> u32 {
        self.width
    }

    fn client_height(&self) -> u32 {
        self.height
    }
}

impl Host for HeadlessHost {
    fn attach_canvas(&mut self, renderer: &HeadlessRenderer) {
        let mut log = self.log.borrow_mut();
        if log.live_canvases.insert(renderer.id) {
            log.canvases_attached += 1;
        }
    }

    fn detach_canvas(&mut self, renderer: &HeadlessRenderer) {
        let mut log = self.log.borrow_mut();
        if log.live_canvases.remove(&renderer.id) {
            log.canvases_detached += 1;
        }
    }

    fn request_animation_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id());
        self.log.borrow_mut().pending_frames.insert(handle);
        handle
    }

    fn cancel_animation_frame(&mut self, handle: FrameHandle) {
        self.log.borrow_mut().pending_frames.remove(&handle);
    }

    fn add_resize_listener(&mut self) -> ListenerHandle {
        let handle = ListenerHandle(self.next_id());
        self.log.borrow_mut().live_listeners.insert(handle);
        handle
    }

    fn remove_resize_listener(&mut self, handle: ListenerHandle) {
        self.log.borrow_mut().live_listeners.remove(&handle);
    }
}

/// Fire `frames` display refreshes `step_ms` apart, starting at `start_ms`
///
/// Stops early when no frame is pending. Returns the number of frames the
/// diagram rendered.
pub fn drive_frames(
    diagram: &mut MechanicalDiagram<HeadlessHost>,
    host: &mut HeadlessHost,
    frames: usize,
    start_ms: f64,
    step_ms: f64,
) -> usize {
    let mut rendered = 0;
    for i in 0..frames {
        let Some(handle) = host.take_frame() else {
            break;
        };
        if diagram.on_animation_frame(host, handle, start_ms + step_ms * i as f64) {
            rendered += 1;
        }
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispose_counts_once() {
        let mut host = HeadlessHost::default();
        let mut renderer = host.create_renderer(&RendererOptions::default()).unwrap();
        renderer.dispose();
        renderer.dispose();
        assert!(renderer.is_disposed());
        assert_eq!(host.log().renderers_disposed, 1);
        assert_eq!(host.log().live_renderers(), 0);
    }

    #[test]
    fn test_disposed_renderer_refuses_to_draw() {
        let mut host = HeadlessHost::default();
        let mut renderer = host.create_renderer(&RendererOptions::default()).unwrap();
        renderer.dispose();
        let scene = Scene::new();
        assert!(renderer.render(&scene, &PerspectiveCamera::default()).is_err());
        assert_eq!(host.log().frames_rendered, 0);
    }

    #[test]
    fn test_frames_and_listeners() {
        let mut host = HeadlessHost::default();
        let a = host.request_animation_frame();
        let b = host.request_animation_frame();
        host.cancel_animation_frame(a);
        assert_eq!(host.take_frame(), Some(b));
        assert_eq!(host.take_frame(), None);

        let listener = host.add_resize_listener();
        assert_eq!(host.log().live_listeners.len(), 1);
        host.remove_resize_listener(listener);
        assert!(host.log().live_listeners.is_empty());
    }

    #[test]
    fn test_no_webgl_means_no_renderer() {
        let mut host = HeadlessHost::default().without_webgl();
        assert!(matches!(
            host.create_renderer(&RendererOptions::default()),
            Err(RenderError::ContextUnavailable)
        ));
    }
}
