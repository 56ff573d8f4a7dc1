//! Option Drift - floating answer options for browser quiz games
//!
//! Core modules:
//! - `sim`: Motion simulation (integration, collisions, container bounces)
//! - `platform`: Browser/headless host abstraction (geometry, frame scheduling)
//! - `layout`: Initial placement of options and transform parsing
//! - `settings`: User-tunable speed and effects preferences

pub mod error;
pub mod layout;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::HostError;
pub use settings::{Settings, SpeedTier};
pub use sim::{OptionBody, PhysicsConfig, PhysicsManager, Rect};

/// Motion tuning constants
pub mod consts {
    /// Baseline speed scale (layout units per second per unit of velocity)
    pub const DEFAULT_SPEED: f32 = 120.0;
    /// Slider range for the speed scale
    pub const MIN_SPEED: f32 = 10.0;
    pub const MAX_SPEED: f32 = 500.0;

    /// Per-axis velocity cap
    pub const MAX_VELOCITY: f32 = 2.5;
    /// Per-axis velocity floor after a collision response
    pub const MIN_COLLISION_VELOCITY: f32 = 0.3;
    /// Elastic bounce, no energy gain
    pub const RESTITUTION: f32 = 1.0;
    /// Extra push applied when separating overlapping options
    pub const SEPARATION_MARGIN: f32 = 1.1;
    /// Debounce window between collision responses for one option (ms)
    pub const COLLISION_COOLDOWN_MS: f64 = 500.0;

    /// Inset from the container edges that options may not cross
    pub const BOUNDARY_PADDING: f32 = 20.0;

    /// Largest integration step (seconds)
    pub const MAX_STEP_SECS: f32 = 0.05;
    /// Frame gaps longer than this are treated as a stall (seconds)
    pub const STALL_THRESHOLD_SECS: f32 = 0.1;

    /// Duration of bounce/flash highlights (ms)
    pub const HIGHLIGHT_MS: f64 = 300.0;

    /// Spawn velocity range per axis before the random burst
    pub const SPAWN_SPEED: f32 = 2.0;
    /// Minimum spawn speed per axis
    pub const SPAWN_MIN_SPEED: f32 = 0.5;

    /// FPS report window (ms)
    pub const FPS_REPORT_MS: f64 = 5000.0;
}

/// Clamp each component of `v` to `[-max, max]`
#[inline]
pub fn clamp_components(v: glam::Vec2, max: f32) -> glam::Vec2 {
    v.clamp(glam::Vec2::splat(-max), glam::Vec2::splat(max))
}

/// Raise a component to at least `floor` in magnitude, keeping its sign.
///
/// Zero is treated as negative, so it becomes `-floor`.
#[inline]
pub fn floor_magnitude(value: f32, floor: f32) -> f32 {
    if value.abs() < floor {
        if value > 0.0 { floor } else { -floor }
    } else {
        value
    }
}
