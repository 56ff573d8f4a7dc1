//! Collision detection and response between options
//!
//! Options are axis-aligned boxes. Detection is a plain overlap test; the
//! response is an elastic impulse along the line between the two centers,
//! followed by velocity clamping and a push that separates the pair.
//!
//! Every pair is visited once per tick in registration order (`i < j`).
//! Dense clusters can need a few ticks to come fully apart.

use glam::Vec2;

use super::body::{OptionBody, Rect};
use super::config::PhysicsConfig;
use crate::{clamp_components, floor_magnitude};

/// Below this a normal component is treated as zero
const NORMAL_EPSILON: f32 = 1e-6;

/// What the resolver did with an overlapping pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactResponse {
    /// Impulse applied. `separated` is true if the pair was also pushed apart.
    Resolved { separated: bool },
    /// Pair overlaps but is already moving apart; left untouched
    Receding,
    /// One of the pair is inside its collision cooldown; left untouched
    CoolingDown,
}

/// An overlapping pair found during a resolver pass
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    /// Index of the first body (lower registration index)
    pub a: usize,
    /// Index of the second body
    pub b: usize,
    /// Midpoint between the two centers (container coordinates)
    pub point: Vec2,
    /// Unit normal pointing from `b` toward `a` (zero if the centers coincide)
    pub normal: Vec2,
    /// Relative velocity projected on the normal (negative = approaching)
    pub velocity_along_normal: f32,
    pub response: ContactResponse,
}

impl Contact {
    pub fn resolved(&self) -> bool {
        matches!(self.response, ContactResponse::Resolved { .. })
    }
}

/// Normal from `b`'s center toward `a`'s center.
///
/// Coincident centers divide by 1 instead of 0, which yields the zero vector.
pub fn collision_normal(a: &Rect, b: &Rect) -> Vec2 {
    let delta = a.center() - b.center();
    let distance = delta.length();
    let denom = if distance == 0.0 { 1.0 } else { distance };
    delta / denom
}

/// Per-axis overlap of two boxes (positive on both axes when they overlap)
pub fn overlap_depth(a: &Rect, b: &Rect) -> Vec2 {
    a.half_size() + b.half_size() - (a.center() - b.center()).abs()
}

/// Distance the pair must move apart along `normal` to stop overlapping.
///
/// Moving `d` along the normal opens axis `k` by `d * |n_k|`, so the smallest
/// `overlap_k / |n_k|` clears one axis, which is enough for boxes. The result
/// includes the safety margin. `None` when the boxes don't overlap or the
/// normal is degenerate.
pub fn separation_distance(a: &Rect, b: &Rect, normal: Vec2, margin: f32) -> Option<f32> {
    let overlap = overlap_depth(a, b);
    if overlap.x <= 0.0 || overlap.y <= 0.0 {
        return None;
    }

    let along_x = (normal.x.abs() > NORMAL_EPSILON).then(|| overlap.x / normal.x.abs());
    let along_y = (normal.y.abs() > NORMAL_EPSILON).then(|| overlap.y / normal.y.abs());

    let depth = match (along_x, along_y) {
        (Some(x), Some(y)) => x.min(y),
        (Some(x), None) => x,
        (None, Some(y)) => y,
        (None, None) => return None,
    };
    Some(depth * margin)
}

/// Apply an elastic impulse along `normal`, then cap and floor velocities.
///
/// Every moving component is raised to the floor, sign kept. A component that
/// is exactly zero stays zero, so a purely horizontal hit on horizontally
/// moving options keeps them horizontal.
pub fn apply_impulse(
    a: &mut OptionBody,
    b: &mut OptionBody,
    normal: Vec2,
    velocity_along_normal: f32,
    config: &PhysicsConfig,
) {
    let impulse = normal * velocity_along_normal * config.restitution;
    a.vel -= impulse;
    b.vel += impulse;

    let floor = config.min_collision_velocity.min(config.max_velocity);
    for body in [a, b] {
        body.vel = clamp_components(body.vel, config.max_velocity);
        if body.vel.x != 0.0 {
            body.vel.x = floor_magnitude(body.vel.x, floor);
        }
        if body.vel.y != 0.0 {
            body.vel.y = floor_magnitude(body.vel.y, floor);
        }
    }
}

/// Check and respond to a single pair
pub fn resolve_pair(
    a: &mut OptionBody,
    b: &mut OptionBody,
    config: &PhysicsConfig,
    now_ms: f64,
) -> Option<(Vec2, f32, ContactResponse)> {
    let (rect_a, rect_b) = (a.rect(), b.rect());
    if rect_a.is_empty() || rect_b.is_empty() || !rect_a.intersects(&rect_b) {
        return None;
    }

    let normal = collision_normal(&rect_a, &rect_b);
    let velocity_along_normal = (a.vel - b.vel).dot(normal);

    // Only approaching pairs get a response
    if velocity_along_normal >= 0.0 {
        return Some((normal, velocity_along_normal, ContactResponse::Receding));
    }
    let cooldown = config.collision_cooldown_ms;
    if a.cooling_down(now_ms, cooldown) || b.cooling_down(now_ms, cooldown) {
        return Some((normal, velocity_along_normal, ContactResponse::CoolingDown));
    }

    apply_impulse(a, b, normal, velocity_along_normal, config);
    a.last_collision_ms = Some(now_ms);
    b.last_collision_ms = Some(now_ms);

    let separated = match separation_distance(&rect_a, &rect_b, normal, config.separation_margin) {
        Some(distance) => {
            let push = normal * distance * 0.5;
            a.pos += push;
            b.pos -= push;
            true
        }
        None => false,
    };

    Some((normal, velocity_along_normal, ContactResponse::Resolved { separated }))
}

/// One resolver pass over every pair of visible bodies.
///
/// Returns every overlapping pair found, including the ones left untouched.
pub fn resolve_collisions(bodies: &mut [OptionBody], config: &PhysicsConfig, now_ms: f64) -> Vec<Contact> {
    let mut contacts = Vec::new();

    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let (head, tail) = bodies.split_at_mut(j);
            let (a, b) = (&mut head[i], &mut tail[0]);
            if a.hidden || b.hidden {
                continue;
            }

            // Midpoint of the centers as they were on impact
            let point = (a.center() + b.center()) * 0.5;
            if let Some((normal, velocity_along_normal, response)) = resolve_pair(a, b, config, now_ms) {
                contacts.push(Contact {
                    a: i,
                    b: j,
                    point,
                    normal,
                    velocity_along_normal,
                    response,
                });
            }
        }
    }

    contacts
}
