//! Platform abstraction layer
//!
//! The simulation only sees the page through two seams:
//! - [`Surface`]: container/element geometry, visibility and transform write-back
//! - [`FrameScheduler`]: one-shot "call me on the next frame" requests
//!
//! `headless` implements both in memory (native demo, tests); `web` implements
//! them on the DOM with `requestAnimationFrame`.

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

use glam::Vec2;

use crate::error::HostError;
use crate::sim::Rect;

/// Read/write access to the page hosting the options.
///
/// Rectangles are in viewport coordinates. Positions written back are
/// offsets relative to the container.
pub trait Surface {
    /// Handle identifying one option element
    type Element: Clone + PartialEq;

    /// Container rectangle at call time (`None` if it isn't laid out)
    fn container_rect(&self) -> Option<Rect>;

    /// Rendered rectangle of an element (`None` if it isn't laid out)
    fn element_rect(&self, element: &Self::Element) -> Option<Rect>;

    /// Translation of the element's current visual transform, if it has one
    fn current_translation(&self, element: &Self::Element) -> Option<Vec2>;

    /// Layout offset relative to the element's positioning ancestor
    fn layout_offset(&self, element: &Self::Element) -> Option<Vec2>;

    /// Hidden elements are excluded from the physics
    fn is_hidden(&self, element: &Self::Element) -> bool;

    /// Move the element's visual to `position`
    fn apply_translation(&mut self, element: &Self::Element, position: Vec2);
}

/// Schedules the next simulation frame.
///
/// Each request yields at most one callback; the driver must request again
/// from inside the callback to keep the loop going.
pub trait FrameScheduler {
    /// Token used to cancel a pending request
    type Handle;

    fn request_frame(&mut self) -> Result<Self::Handle, HostError>;

    fn cancel_frame(&mut self, handle: Self::Handle);
}
