//! Physics limits and timing constants.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Numeric limits read by the integrator, resolver and boundary handler.
///
/// ```
/// use option_drift::PhysicsConfig;
///
/// let config = PhysicsConfig::new()
///     .with_boundary_padding(12.0)
///     .with_boundary_max_velocity(2.0);
/// assert_eq!(config.effective_boundary_cap(), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Per-axis velocity cap applied after collision responses
    pub max_velocity: f32,
    /// Per-axis velocity floor applied after collision responses
    pub min_collision_velocity: f32,
    /// Fraction of approach velocity reflected (1.0 = elastic)
    pub restitution: f32,
    /// Multiplier on the separation push
    pub separation_margin: f32,
    /// Window (ms) during which a recently hit option ignores new collisions
    pub collision_cooldown_ms: f64,
    /// Inset from the container edges
    pub boundary_padding: f32,
    /// Optional extra cap on velocity reflected from the container edges
    #[serde(default)]
    pub boundary_max_velocity: Option<f32>,
    /// Largest integration step (seconds)
    pub max_step_secs: f32,
    /// Frame gaps above this skip physics (seconds)
    pub stall_threshold_secs: f32,
    /// Highlight duration for collision/edge effects (ms)
    pub highlight_ms: f64,
    /// Spawn velocity range per axis
    pub spawn_speed: f32,
    /// Spawn velocity floor per axis
    pub spawn_min_speed: f32,
}

impl PhysicsConfig {
    pub fn new() -> Self {
        Self {
            max_velocity: MAX_VELOCITY,
            min_collision_velocity: MIN_COLLISION_VELOCITY,
            restitution: RESTITUTION,
            separation_margin: SEPARATION_MARGIN,
            collision_cooldown_ms: COLLISION_COOLDOWN_MS,
            boundary_padding: BOUNDARY_PADDING,
            boundary_max_velocity: None,
            max_step_secs: MAX_STEP_SECS,
            stall_threshold_secs: STALL_THRESHOLD_SECS,
            highlight_ms: HIGHLIGHT_MS,
            spawn_speed: SPAWN_SPEED,
            spawn_min_speed: SPAWN_MIN_SPEED,
        }
    }

    pub fn with_max_velocity(mut self, max_velocity: f32) -> Self {
        self.max_velocity = max_velocity.abs();
        self
    }

    pub fn with_min_collision_velocity(mut self, min: f32) -> Self {
        self.min_collision_velocity = min.abs();
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution.clamp(0.0, 1.0);
        self
    }

    /// Set the cooldown window (0 disables it)
    pub fn with_collision_cooldown_ms(mut self, cooldown_ms: f64) -> Self {
        self.collision_cooldown_ms = cooldown_ms.max(0.0);
        self
    }

    pub fn with_boundary_padding(mut self, padding: f32) -> Self {
        self.boundary_padding = padding.max(0.0);
        self
    }

    pub fn with_boundary_max_velocity(mut self, cap: f32) -> Self {
        self.boundary_max_velocity = Some(cap.abs());
        self
    }

    pub fn with_max_step_secs(mut self, secs: f32) -> Self {
        self.max_step_secs = secs.max(0.0);
        self
    }

    pub fn with_stall_threshold_secs(mut self, secs: f32) -> Self {
        self.stall_threshold_secs = secs.max(0.0);
        self
    }

    /// Cap for velocity reflected off an edge: the stricter of both caps
    pub fn effective_boundary_cap(&self) -> f32 {
        match self.boundary_max_velocity {
            Some(cap) => cap.min(self.max_velocity),
            None => self.max_velocity,
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self::new()
    }
}
