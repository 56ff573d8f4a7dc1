//! Position integration
//!
//! Plain explicit Euler: velocities never change here, so a single clamped
//! step per frame is enough.

use super::body::OptionBody;
use super::config::PhysicsConfig;

/// Advance every visible body by `vel * speed * min(dt, max_step_secs)`.
///
/// Returns the number of bodies that moved. Hidden bodies stay frozen.
pub fn integrate(bodies: &mut [OptionBody], speed: f32, dt: f32, config: &PhysicsConfig) -> usize {
    // Non-finite or negative gaps (clock went backwards) move nothing
    if !dt.is_finite() || dt <= 0.0 {
        return 0;
    }
    let step = dt.min(config.max_step_secs) * speed;

    let mut moved = 0;
    for body in bodies.iter_mut().filter(|b| !b.hidden) {
        body.pos += body.vel * step;
        moved += 1;
    }
    moved
}
