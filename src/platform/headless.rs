//! In-memory host for native runs and tests
//!
//! `HeadlessSurface` keeps element geometry in plain structs and records the
//! transforms the manager writes back. `ManualScheduler` queues frame
//! requests until the driver fires them.

use glam::Vec2;

use super::{FrameScheduler, Surface};
use crate::error::HostError;
use crate::sim::effects::EffectSink;
use crate::sim::{PhysicsManager, Rect, TickOutcome};

/// Element handle for the headless surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u32);

/// Geometry and state of one headless element
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessElement {
    pub id: ElementId,
    /// Rendered width and height
    pub size: Vec2,
    /// Current visual translation (as if set through a transform)
    pub translation: Option<Vec2>,
    /// Untransformed top-left inside the container
    pub layout_offset: Vec2,
    pub hidden: bool,
    /// Number of transform writes received
    pub writes: usize,
}

/// In-memory page: one container and its elements
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    /// Container rectangle; `None` simulates a detached container
    pub container: Option<Rect>,
    elements: Vec<HeadlessElement>,
    next_id: u32,
}

impl HeadlessSurface {
    pub fn new(container: Rect) -> Self {
        Self {
            container: Some(container),
            elements: Vec::new(),
            next_id: 1,
        }
    }

    /// Add an element with the given size and optional starting transform
    pub fn add_element(&mut self, size: Vec2, translation: Option<Vec2>) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.push(HeadlessElement {
            id,
            size,
            translation,
            layout_offset: Vec2::ZERO,
            hidden: false,
            writes: 0,
        });
        id
    }

    pub fn element(&self, id: ElementId) -> Option<&HeadlessElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut HeadlessElement> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn set_hidden(&mut self, id: ElementId, hidden: bool) {
        if let Some(e) = self.element_mut(id) {
            e.hidden = hidden;
        }
    }

    /// Last translation written (or the starting one)
    pub fn translation(&self, id: ElementId) -> Option<Vec2> {
        self.element(id).and_then(|e| e.translation)
    }
}

impl Surface for HeadlessSurface {
    type Element = ElementId;

    fn container_rect(&self) -> Option<Rect> {
        self.container
    }

    fn element_rect(&self, element: &ElementId) -> Option<Rect> {
        let container = self.container?;
        let e = self.element(*element)?;
        let translation = e.translation.unwrap_or(Vec2::ZERO);
        Some(Rect {
            min: container.min + e.layout_offset + translation,
            size: e.size,
        })
    }

    fn current_translation(&self, element: &ElementId) -> Option<Vec2> {
        self.translation(*element)
    }

    fn layout_offset(&self, element: &ElementId) -> Option<Vec2> {
        self.element(*element).map(|e| e.layout_offset)
    }

    fn is_hidden(&self, element: &ElementId) -> bool {
        self.element(*element).is_none_or(|e| e.hidden)
    }

    fn apply_translation(&mut self, element: &ElementId, position: Vec2) {
        if let Some(e) = self.element_mut(*element) {
            e.translation = Some(position);
            e.writes += 1;
        }
    }
}

/// Frame scheduler that queues requests until fired by hand
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    next_handle: u64,
    pending: Vec<u64>,
    /// Total requests made
    pub requests: usize,
    /// Total cancellations made
    pub cancellations: usize,
    /// Refuse every request while set
    pub refuse: bool,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks waiting to fire
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Consume the oldest pending request. Returns false if none was queued.
    pub fn fire(&mut self) -> bool {
        if self.pending.is_empty() {
            return false;
        }
        self.pending.remove(0);
        true
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u64;

    fn request_frame(&mut self) -> Result<u64, HostError> {
        if self.refuse {
            return Err(HostError::Scheduler("refused".into()));
        }
        let handle = self.next_handle;
        self.next_handle += 1;
        self.pending.push(handle);
        self.requests += 1;
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: u64) {
        self.pending.retain(|h| *h != handle);
        self.cancellations += 1;
    }
}

/// Drive a headless manager for up to `frames` frames spaced `frame_ms` apart.
///
/// Stops early once no frame is pending. Returns the outcomes in order.
pub fn drive<S, X>(
    manager: &mut PhysicsManager<S, ManualScheduler, X>,
    mut now_ms: f64,
    frame_ms: f64,
    frames: usize,
) -> Vec<TickOutcome>
where
    S: Surface,
    X: EffectSink<S::Element>,
{
    let mut outcomes = Vec::with_capacity(frames);
    for _ in 0..frames {
        if !manager.scheduler_mut().fire() {
            break;
        }
        now_ms += frame_ms;
        outcomes.push(manager.on_frame(now_ms));
    }
    outcomes
}
