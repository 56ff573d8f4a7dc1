//! Option motion simulation
//!
//! Everything that moves options lives here. The physics functions are pure:
//! they work on `&mut [OptionBody]` and return what they did. Only the
//! manager talks to the host, through the `platform` traits.
//!
//! Per tick, in order:
//! 1. `integrate` - advance positions
//! 2. `resolve_collisions` - bounce overlapping pairs apart
//! 3. `contain` - keep options inside the padded container

pub mod body;
pub mod boundary;
pub mod collision;
pub mod config;
pub mod effects;
pub mod integrate;
pub mod manager;

pub use body::{BounceAxis, OptionBody, Rect, spawn_velocity};
pub use boundary::{BoundaryHit, Edge, contain, inner_bounds};
pub use collision::{Contact, ContactResponse, resolve_collisions};
pub use config::PhysicsConfig;
pub use effects::{CollisionFx, EdgeFx, EffectLog, EffectSink, NoOpEffects};
pub use integrate::integrate;
pub use manager::{FrameStats, PhysicsManager, RunState, TickOutcome, TickReport};
