//! Container containment
//!
//! Options live inside the container shrunk by the boundary padding. An
//! option crossing an edge is pushed back by its penetration depth and its
//! velocity on that axis is pointed back inward.

use glam::Vec2;

use super::body::{OptionBody, Rect};
use super::config::PhysicsConfig;

/// Container edge an option bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    /// Lowercase edge name
    pub fn as_str(&self) -> &'static str {
        match self {
            Edge::Left => "left",
            Edge::Right => "right",
            Edge::Top => "top",
            Edge::Bottom => "bottom",
        }
    }
}

/// A correction applied to one option
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryHit {
    /// Index of the body
    pub index: usize,
    pub edge: Edge,
    /// How far the option had crossed the edge
    pub penetration: f32,
}

/// Inner rectangle in container coordinates, or `None` if it has no area
pub fn inner_bounds(container_size: Vec2, padding: f32) -> Option<Rect> {
    let inner = Rect {
        min: Vec2::ZERO,
        size: container_size,
    }
    .inset(padding);
    (!inner.is_empty()).then_some(inner)
}

/// Point `v` along `sign` with magnitude `|v|` capped at `cap`
#[inline]
fn inward(v: f32, sign: f32, cap: f32) -> f32 {
    sign * v.abs().min(cap)
}

/// Contain a single body, returning the edges it was corrected on.
///
/// Horizontal and vertical checks are independent; a corner hit corrects both.
/// On each axis the far edge (right/bottom) wins if the body is larger than
/// the inner rectangle.
pub fn contain_body(body: &mut OptionBody, inner: &Rect, cap: f32) -> [Option<(Edge, f32)>; 2] {
    let rect = body.rect();

    let horizontal = if rect.right() > inner.right() {
        let depth = rect.right() - inner.right();
        body.pos.x -= depth;
        body.vel.x = inward(body.vel.x, -1.0, cap);
        Some((Edge::Right, depth))
    } else if rect.left() < inner.left() {
        let depth = inner.left() - rect.left();
        body.pos.x += depth;
        body.vel.x = inward(body.vel.x, 1.0, cap);
        Some((Edge::Left, depth))
    } else {
        None
    };

    let vertical = if rect.bottom() > inner.bottom() {
        let depth = rect.bottom() - inner.bottom();
        body.pos.y -= depth;
        body.vel.y = inward(body.vel.y, -1.0, cap);
        Some((Edge::Bottom, depth))
    } else if rect.top() < inner.top() {
        let depth = inner.top() - rect.top();
        body.pos.y += depth;
        body.vel.y = inward(body.vel.y, 1.0, cap);
        Some((Edge::Top, depth))
    } else {
        None
    };

    [horizontal, vertical]
}

/// Keep every visible body inside the padded container.
///
/// `container_size` is the container's current width and height. Nothing
/// happens if the padded area is empty.
pub fn contain(bodies: &mut [OptionBody], container_size: Vec2, config: &PhysicsConfig) -> Vec<BoundaryHit> {
    let Some(inner) = inner_bounds(container_size, config.boundary_padding) else {
        return Vec::new();
    };
    let cap = config.effective_boundary_cap();

    let mut hits = Vec::new();
    for (index, body) in bodies.iter_mut().enumerate() {
        if body.hidden {
            continue;
        }
        for (edge, penetration) in contain_body(body, &inner, cap).into_iter().flatten() {
            hits.push(BoundaryHit {
                index,
                edge,
                penetration,
            });
        }
    }
    hits
}
