//! Option bodies and box geometry
//!
//! An option is a free-floating box: top-left position relative to its
//! container, a velocity in "velocity units" (scaled by the global speed
//! when integrated) and the size it was last rendered at.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::PhysicsConfig;
use crate::{clamp_components, floor_magnitude};

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(left, top),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    #[inline]
    pub fn half_size(&self) -> Vec2 {
        self.size * 0.5
    }

    /// True if the rectangle covers no area
    pub fn is_empty(&self) -> bool {
        !(self.size.x > 0.0 && self.size.y > 0.0)
    }

    /// Not-disjoint test. Touching edges count as intersecting.
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.right() < other.left()
            || self.left() > other.right()
            || self.bottom() < other.top()
            || self.top() > other.bottom())
    }

    /// Shrink by `inset` on every side
    pub fn inset(&self, inset: f32) -> Rect {
        Rect {
            min: self.min + Vec2::splat(inset),
            size: self.size - Vec2::splat(2.0 * inset),
        }
    }
}

/// Axis selector for single-body bounces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BounceAxis {
    X,
    Y,
    Both,
}

/// A floating option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionBody {
    /// Top-left offset within the container
    pub pos: Vec2,
    /// Velocity (units per second before the speed scale)
    pub vel: Vec2,
    /// Rendered width and height
    pub size: Vec2,
    /// Timestamp (ms) of the last collision response, if any
    pub last_collision_ms: Option<f64>,
    /// Hidden options are frozen and excluded from all physics
    pub hidden: bool,
}

impl OptionBody {
    pub fn new(pos: Vec2, size: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            size,
            last_collision_ms: None,
            hidden: false,
        }
    }

    /// Create a body with a freshly rolled spawn velocity
    pub fn spawn<R: Rng>(pos: Vec2, size: Vec2, config: &PhysicsConfig, rng: &mut R) -> Self {
        Self::new(pos, size, spawn_velocity(config, rng))
    }

    /// Bounding box in container coordinates
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect {
            min: self.pos,
            size: self.size,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// True while a previous collision response is inside the cooldown window
    pub fn cooling_down(&self, now_ms: f64, cooldown_ms: f64) -> bool {
        self.last_collision_ms
            .is_some_and(|last| now_ms - last < cooldown_ms)
    }

    /// Reverse velocity on the given axis.
    ///
    /// Ignored inside the cooldown window. Returns whether the bounce happened.
    pub fn bounce(&mut self, axis: BounceAxis, now_ms: f64, cooldown_ms: f64) -> bool {
        if self.cooling_down(now_ms, cooldown_ms) {
            return false;
        }
        if matches!(axis, BounceAxis::X | BounceAxis::Both) {
            self.vel.x = -self.vel.x;
        }
        if matches!(axis, BounceAxis::Y | BounceAxis::Both) {
            self.vel.y = -self.vel.y;
        }
        self.last_collision_ms = Some(now_ms);
        true
    }
}

/// Roll an initial velocity.
///
/// Each axis starts in `[-spawn_speed, spawn_speed]`, is raised to at least
/// `spawn_min_speed`, gets a random burst in `[1, 2)` and is finally capped
/// at `max_velocity`.
pub fn spawn_velocity<R: Rng>(config: &PhysicsConfig, rng: &mut R) -> Vec2 {
    let mut axis = || {
        let v = rng.random_range(-1.0f32..=1.0) * config.spawn_speed;
        floor_magnitude(v, config.spawn_min_speed)
    };
    let vel = Vec2::new(axis(), axis());

    let burst = 1.0 + rng.random::<f32>();
    clamp_components(vel * burst, config.max_velocity)
}
