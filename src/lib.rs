//! Flame Climb - a side-scrolling platformer racing a rising flame
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, level generation)
//! - `driver`: Fixed-step accumulator that turns wall-clock frames into ticks
//! - `tuning`: Data-driven physics and generation constants

pub mod driver;
pub mod error;
pub mod sim;
pub mod tuning;

pub use driver::{Accumulator, FrameReport, GameLoop};
pub use error::TuningError;
pub use tuning::{RespawnMode, Tuning};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const FIXED_DT: f32 = 1.0 / 60.0;
    /// Longest wall-clock gap a single frame may feed the accumulator (ms)
    pub const MAX_FRAME_MS: f64 = 250.0;

    /// Thickness of the full-width ground strip
    pub const GROUND_THICKNESS: f32 = 40.0;
    /// Thickness of generated platforms
    pub const PLATFORM_THICKNESS: f32 = 20.0;

    /// How far below the world floor the actor may drop before respawning
    pub const FALL_OUT_MARGIN: f32 = 400.0;
    /// Slack when deciding whether the previous bottom edge was above a platform top
    pub const LAND_EPSILON: f32 = 0.5;

    /// Bullet dimensions
    pub const BULLET_WIDTH: f32 = 8.0;
    pub const BULLET_HEIGHT: f32 = 4.0;

    /// Goal region dimensions
    pub const GOAL_WIDTH: f32 = 64.0;
    pub const GOAL_HEIGHT: f32 = 96.0;
}
