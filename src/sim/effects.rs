//! Visual effect hook
//!
//! Purely cosmetic notifications raised by the manager: a spark at each
//! collision and a short highlight on the options involved, plus an edge
//! highlight on boundary bounces. Nothing here feeds back into the physics.

use glam::Vec2;

use super::boundary::Edge;

/// Class toggled on both options of a collision
pub const BOUNCE_CLASS: &str = "bounce";
/// Extra class toggled on both options of a collision
pub const FLASH_CLASS: &str = "collision-flash";

/// Class toggled on an option that bounced off `edge`
pub fn edge_class(edge: Edge) -> &'static str {
    match edge {
        Edge::Left => "bounce-left",
        Edge::Right => "bounce-right",
        Edge::Top => "bounce-top",
        Edge::Bottom => "bounce-bottom",
    }
}

/// A collision worth showing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionFx {
    /// Impact midpoint in viewport coordinates
    pub point: Vec2,
    /// Frame timestamp (ms)
    pub at_ms: f64,
    /// How long highlights should last (ms)
    pub highlight_ms: f64,
}

/// A boundary bounce worth showing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeFx {
    pub edge: Edge,
    pub at_ms: f64,
    pub highlight_ms: f64,
}

/// Receiver for visual effects.
///
/// All methods default to no-ops.
pub trait EffectSink<E> {
    /// Two options collided and were bounced apart
    fn on_collision(&mut self, _a: &E, _b: &E, _fx: &CollisionFx) {}

    /// An option was pushed back from a container edge
    fn on_edge(&mut self, _element: &E, _fx: &EdgeFx) {}
}

/// Sink that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEffects;

impl<E> EffectSink<E> for NoOpEffects {}

/// A timed class on one element
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight<E> {
    pub element: E,
    pub class: &'static str,
    pub until_ms: f64,
}

/// Headless sink that records effects and expires highlights on demand.
#[derive(Debug, Clone)]
pub struct EffectLog<E> {
    /// Every spark requested, oldest first
    pub sparks: Vec<CollisionFx>,
    /// Highlights not yet expired
    pub highlights: Vec<Highlight<E>>,
}

impl<E> Default for EffectLog<E> {
    fn default() -> Self {
        Self {
            sparks: Vec::new(),
            highlights: Vec::new(),
        }
    }
}

impl<E: Clone + PartialEq> EffectLog<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop highlights whose time is up
    pub fn expire(&mut self, now_ms: f64) {
        self.highlights.retain(|h| h.until_ms > now_ms);
    }

    /// True if `element` currently carries `class`
    pub fn is_highlighted(&self, element: &E, class: &str, now_ms: f64) -> bool {
        self.highlights
            .iter()
            .any(|h| &h.element == element && h.class == class && h.until_ms > now_ms)
    }

    fn highlight(&mut self, element: &E, class: &'static str, until_ms: f64) {
        // Re-triggering extends the existing highlight
        if let Some(h) = self
            .highlights
            .iter_mut()
            .find(|h| &h.element == element && h.class == class)
        {
            h.until_ms = h.until_ms.max(until_ms);
            return;
        }
        self.highlights.push(Highlight {
            element: element.clone(),
            class,
            until_ms,
        });
    }
}

impl<E: Clone + PartialEq> EffectSink<E> for EffectLog<E> {
    fn on_collision(&mut self, a: &E, b: &E, fx: &CollisionFx) {
        self.sparks.push(*fx);
        let until = fx.at_ms + fx.highlight_ms;
        for element in [a, b] {
            self.highlight(element, BOUNCE_CLASS, until);
            self.highlight(element, FLASH_CLASS, until);
        }
    }

    fn on_edge(&mut self, element: &E, fx: &EdgeFx) {
        self.highlight(element, edge_class(fx.edge), fx.at_ms + fx.highlight_ms);
    }
}
