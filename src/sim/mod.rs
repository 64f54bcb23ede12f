//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (platform list order)
//! - No rendering or platform dependencies

pub mod geometry;
pub mod input;
pub mod level;
pub mod state;
pub mod tick;

pub use geometry::{Penetration, Rect, overlaps, penetration};
pub use input::InputSnapshot;
pub use level::{ReachEnvelope, RouteStep, generate_level, route_steps};
pub use state::{
    Bullet, Flame, GameEvent, GamePhase, GameState, Platform, PlatformKind, PlatformView, Player,
    World,
};
pub use tick::{check_win, tick};
