//! Host environment abstraction
//!
//! A host is whatever embeds the diagram: a browser page, a native window or
//! the headless recorder used in tests. It creates renderers, owns the
//! element the canvas lives in, and delivers frame and resize callbacks.

use cogwork_3d::render::{Container, RenderBackend};

/// Handle of a scheduled animation frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

/// Handle of a registered resize listener
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerHandle(pub u64);

/// Everything the diagram needs from its embedding page
///
/// Callbacks are not stored as closures. The host calls back into
/// [`MechanicalDiagram::on_animation_frame`] with the handle it returned from
/// [`request_animation_frame`](Host::request_animation_frame), and into
/// [`MechanicalDiagram::on_resize`] while a listener is registered.
///
/// [`MechanicalDiagram::on_animation_frame`]: crate::MechanicalDiagram::on_animation_frame
/// [`MechanicalDiagram::on_resize`]: crate::MechanicalDiagram::on_resize
pub trait Host: RenderBackend + Container {
    /// Insert the renderer's canvas into the container
    fn attach_canvas(&mut self, renderer: &Self::Renderer);

    /// Remove the renderer's canvas from the container
    fn detach_canvas(&mut self, renderer: &Self::Renderer);

    /// Schedule one callback for the next display refresh
    fn request_animation_frame(&mut self) -> FrameHandle;

    fn cancel_animation_frame(&mut self, handle: FrameHandle);

    fn add_resize_listener(&mut self) -> ListenerHandle;

    fn remove_resize_listener(&mut self, handle: ListenerHandle);
}
