//! Renderer abstraction
//!
//! The scene is drawn by whatever backend the host provides (WebGL in a
//! browser, a recording stub in tests). These traits are the seam.

use crate::error::RenderError;
use crate::scene::{PerspectiveCamera, Scene};

/// Highest device pixel ratio a renderer is allowed to use
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Renderer construction options
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RendererOptions {
    /// Transparent clear color
    pub alpha: bool,
    pub antialias: bool,
    /// Cap applied to the device pixel ratio
    pub max_pixel_ratio: f32,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            alpha: true,
            antialias: true,
            max_pixel_ratio: MAX_PIXEL_RATIO,
        }
    }
}

/// Presentation properties of the renderer's canvas
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasStyle {
    pub opacity: f32,
    /// Vertical offset in CSS pixels
    pub translate_y: f32,
}

impl Default for CanvasStyle {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            translate_y: 0.0,
        }
    }
}

/// A live drawing surface
pub trait Renderer {
    fn set_pixel_ratio(&mut self, ratio: f32);

    fn pixel_ratio(&self) -> f32;

    /// Resize the drawing buffer, in CSS pixels
    fn set_size(&mut self, width: u32, height: u32);

    fn size(&self) -> (u32, u32);

    /// Draw one frame
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), RenderError>;

    fn set_canvas_style(&mut self, style: CanvasStyle);

    /// Release GPU resources; later calls are no-ops
    fn dispose(&mut self);

    fn is_disposed(&self) -> bool;
}

/// Source of renderers
pub trait RenderBackend {
    /// The renderer type this backend creates
    type Renderer: Renderer;

    /// Probe for a working WebGL context
    fn is_webgl_available(&self) -> bool;

    fn device_pixel_ratio(&self) -> f32;

    fn create_renderer(&mut self, options: &RendererOptions) -> Result<Self::Renderer, RenderError>;
}

/// The element the canvas is sized to
pub trait Container {
    fn client_width(&self) -> u32;

    fn client_height(&self) -> u32;
}

/// Whether the backend can render at all
pub fn is_webgl_available<B: RenderBackend + ?Sized>(backend: &B) -> bool {
    backend.is_webgl_available()
}

/// Create a renderer with the device pixel ratio capped at [`MAX_PIXEL_RATIO`]
pub fn create_renderer<B: RenderBackend + ?Sized>(
    backend: &mut B,
    alpha: bool,
    antialias: bool,
) -> Result<B::Renderer, RenderError> {
    create_renderer_with(
        backend,
        &RendererOptions {
            alpha,
            antialias,
            ..Default::default()
        },
    )
}

/// Create a renderer from explicit options
pub fn create_renderer_with<B: RenderBackend + ?Sized>(
    backend: &mut B,
    options: &RendererOptions,
) -> Result<B::Renderer, RenderError> {
    let mut renderer = backend.create_renderer(options)?;
    let ratio = backend.device_pixel_ratio().min(options.max_pixel_ratio);
    renderer.set_pixel_ratio(if ratio.is_finite() && ratio > 0.0 { ratio } else { 1.0 });
    tracing::debug!(
        alpha = options.alpha,
        antialias = options.antialias,
        pixel_ratio = renderer.pixel_ratio(),
        "created renderer"
    );
    Ok(renderer)
}

/// Match camera and renderer to the container's current size
///
/// Returns `false` and leaves everything untouched when the container has
/// no area.
pub fn resize_to_container<R: Renderer + ?Sized, C: Container + ?Sized>(
    camera: &mut PerspectiveCamera,
    renderer: &mut R,
    container: &C,
) -> bool {
    let (width, height) = (container.client_width(), container.client_height());
    if width == 0 || height == 0 {
        tracing::warn!(width, height, "ignoring resize to an empty container");
        return false;
    }
    camera.aspect = width as f32 / height as f32;
    camera.update_projection_matrix();
    renderer.set_size(width, height);
    true
}

/// Closure that re-reads the container size on every call
pub fn create_resize_handler<'a, R: Renderer + ?Sized, C: Container + ?Sized>(
    camera: &'a mut PerspectiveCamera,
    renderer: &'a mut R,
    container: &'a C,
) -> impl FnMut() -> bool + 'a {
    move || resize_to_container(camera, renderer, container)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct Recorder {
        ratio: f32,
        size: (u32, u32),
        disposed: bool,
    }

    impl Renderer for Recorder {
        fn set_pixel_ratio(&mut self, ratio: f32) {
            self.ratio = ratio;
        }
        fn pixel_ratio(&self) -> f32 {
            self.ratio
        }
        fn set_size(&mut self, width: u32, height: u32) {
            self.size = (width, height);
        }
        fn size(&self) -> (u32, u32) {
            self.size
        }
        fn render(&mut self, _: &Scene, _: &PerspectiveCamera) -> Result<(), RenderError> {
            Ok(())
        }
        fn set_canvas_style(&mut self, _: CanvasStyle) {}
        fn dispose(&mut self) {
            self.disposed = true;
        }
        fn is_disposed(&self) -> bool {
            self.disposed
        }
    }

    struct Backend {
        dpr: f32,
    }

    impl RenderBackend for Backend {
        type Renderer = Recorder;
        fn is_webgl_available(&self) -> bool {
            true
        }
        fn device_pixel_ratio(&self) -> f32 {
            self.dpr
        }
        fn create_renderer(&mut self, _: &RendererOptions) -> Result<Recorder, RenderError> {
            Ok(Recorder::default())
        }
    }

    struct Element {
        width: Cell<u32>,
        height: u32,
    }

    impl Container for Element {
        fn client_width(&self) -> u32 {
            self.width.get()
        }
        fn client_height(&self) -> u32 {
            self.height
        }
    }

    #[test]
    fn test_pixel_ratio_is_capped() {
        let renderer = create_renderer(&mut Backend { dpr: 3.0 }, true, true).unwrap();
        assert_eq!(renderer.pixel_ratio(), 2.0);
        let renderer = create_renderer(&mut Backend { dpr: 1.5 }, true, true).unwrap();
        assert_eq!(renderer.pixel_ratio(), 1.5);
    }

    #[test]
    fn test_resize_handler_rereads_container() {
        let mut camera = PerspectiveCamera::default();
        let mut renderer = Recorder::default();
        let element = Element {
            width: Cell::new(800),
            height: 400,
        };
        {
            let mut resize = create_resize_handler(&mut camera, &mut renderer, &element);
            assert!(resize());
            element.width.set(1200);
            assert!(resize());
        }
        assert_eq!(renderer.size(), (1200, 400));
        assert_eq!(camera.aspect, 3.0);
    }

    #[test]
    fn test_empty_container_is_ignored() {
        let mut camera = PerspectiveCamera::default();
        let mut renderer = Recorder::default();
        let element = Element {
            width: Cell::new(0),
            height: 400,
        };
        assert!(!resize_to_container(&mut camera, &mut renderer, &element));
        assert_eq!(renderer.size(), (0, 0));
    }
}
