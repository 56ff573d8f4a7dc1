//! Initial placement of options
//!
//! Options start on a ring around the container center, and registration
//! reads their starting offset back from whatever transform the page gave
//! them.

use glam::Vec2;
use rand::Rng;

/// Containers shorter than this get a minimum height before layout (px)
pub const MIN_CONTAINER_HEIGHT: f32 = 200.0;
/// Height forced on containers that are too short (px)
pub const FALLBACK_CONTAINER_HEIGHT: f32 = 300.0;

/// Ring radius as a fraction of the smaller half-dimension
const ORBIT_RADIUS_FRACTION: f32 = 0.7;
/// Random angular offset per option (radians, each side)
const ORBIT_JITTER: f32 = 0.25;

/// Top-left offsets placing each option on a ring around the container center.
///
/// `sizes[i]` is the rendered size of option `i`; each option is centered on
/// its ring point. Angles are evenly spaced with a little jitter.
pub fn orbit_positions<R: Rng>(container: Vec2, sizes: &[Vec2], rng: &mut R) -> Vec<Vec2> {
    if sizes.is_empty() {
        return Vec::new();
    }

    let center = container * 0.5;
    let radius = center.x.min(center.y).max(0.0) * ORBIT_RADIUS_FRACTION;
    let step = std::f32::consts::TAU / sizes.len() as f32;

    sizes
        .iter()
        .enumerate()
        .map(|(i, size)| {
            let angle = i as f32 * step + rng.random_range(-ORBIT_JITTER..ORBIT_JITTER);
            center + Vec2::from_angle(angle) * radius - *size * 0.5
        })
        .collect()
}

/// Translation of a CSS transform value.
///
/// Understands what `getComputedStyle` reports (`matrix(...)`, `matrix3d(...)`)
/// and inline `translate(...)`/`translate3d(...)` in px. Returns `None` for
/// `none` or anything unparseable.
pub fn parse_translation(transform: &str) -> Option<Vec2> {
    let transform = transform.trim();
    let (name, args) = transform.split_once('(')?;
    let args = args.strip_suffix(')')?;
    let values: Vec<&str> = args.split(',').map(str::trim).collect();

    let (x, y) = match name.trim() {
        "matrix" if values.len() == 6 => (number(values[4])?, number(values[5])?),
        "matrix3d" if values.len() == 16 => (number(values[12])?, number(values[13])?),
        "translate" | "translate3d" => {
            let x = length(values.first()?)?;
            let y = match values.get(1) {
                Some(v) => length(v)?,
                None => 0.0,
            };
            (x, y)
        }
        _ => return None,
    };

    let t = Vec2::new(x, y);
    t.is_finite().then_some(t)
}

fn number(s: &str) -> Option<f32> {
    s.parse().ok()
}

/// A px length (a bare `0` is allowed)
fn length(s: &str) -> Option<f32> {
    match s.strip_suffix("px") {
        Some(v) => number(v.trim()),
        None if s == "0" => Some(0.0),
        None => None,
    }
}

/// CSS value for a translation
pub fn translate_css(position: Vec2) -> String {
    format!("translate({}px, {}px)", position.x, position.y)
}
