//! Data-driven game balance
//!
//! Every physics and generation constant lives here so a level designer can
//! tweak feel from a JSON file without touching the simulation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{FIXED_DT, PLATFORM_THICKNESS};
use crate::error::TuningError;

/// What a respawn does to the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RespawnMode {
    /// Throw the level away and generate a fresh one
    #[default]
    Regenerate,
    /// Keep the level, put the actor back on its start position
    ResetToStart,
}

/// Physics, actor, world and generator constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Movement ===
    /// Downward acceleration (units/s², +y is down)
    pub gravity: f32,
    /// Horizontal run speed (units/s)
    pub run_speed: f32,
    /// Vertical velocity applied by a jump (negative = up)
    pub jump_speed: f32,
    /// Jump charges restored on landing (ground jump + air jumps)
    pub max_jumps: u8,
    /// Seconds after leaving the ground during which a jump still counts as grounded
    pub coyote_time: f32,
    /// Seconds a jump press stays pending
    pub jump_buffer_time: f32,
    /// Run speed multiplier while crouched
    pub crouch_speed_factor: f32,
    /// Terminal fall velocity
    pub max_fall_speed: f32,

    // === Actor ===
    pub player_width: f32,
    pub player_height: f32,

    // === World ===
    pub world_width: f32,
    pub world_height: f32,

    // === Platforms ===
    /// Seconds a breakable platform survives after first being stood on
    pub fade_duration: f32,
    /// Chance a main-route platform is breakable
    pub breakable_chance: f64,
    /// Chance of an extra fall-only platform under a route platform
    pub branch_chance: f64,
    /// Shrinks the horizontal reach envelope to leave room for player error
    pub reach_safety: f32,

    // === Flame ===
    /// Seconds before the flame starts rising
    pub flame_delay: f32,
    /// Rise speed (units/s)
    pub flame_speed: f32,
    /// Stop in `FirePause` on flame contact instead of respawning at once
    pub pause_on_death: bool,
    pub respawn_mode: RespawnMode,

    // === Shooting ===
    pub shoot_cooldown: f32,
    pub bullet_speed: f32,
    pub bullet_life: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 2200.0,
            run_speed: 360.0,
            jump_speed: -740.0,
            max_jumps: 2,
            coyote_time: 0.10,
            jump_buffer_time: 0.10,
            crouch_speed_factor: 0.6,
            max_fall_speed: 1050.0,

            player_width: 36.0,
            player_height: 72.0,

            world_width: 3200.0,
            world_height: 1600.0,

            fade_duration: 1.0,
            breakable_chance: 0.25,
            branch_chance: 0.3,
            reach_safety: 0.9,

            flame_delay: 3.0,
            flame_speed: 24.0,
            pause_on_death: true,
            respawn_mode: RespawnMode::Regenerate,

            shoot_cooldown: 0.18,
            bullet_speed: 900.0,
            bullet_life: 2.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Read and parse a tuning file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load a tuning file, falling back to defaults if it is missing or broken
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_path(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(err) => {
                log::warn!("Using default tuning ({}): {err}", path.display());
                Self::default()
            }
        }
    }

    /// Largest fall speed that still cannot skip over a platform in one fixed step
    pub fn fall_speed_limit() -> f32 {
        0.9 * PLATFORM_THICKNESS / FIXED_DT
    }

    /// Clamp every value into a range the simulation can handle
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        fn fix<T: PartialEq + Copy + std::fmt::Debug>(name: &str, value: T, fixed: T) -> T {
            if value != fixed {
                log::warn!("tuning.{name} = {value:?} out of range, using {fixed:?}");
            }
            fixed
        }

        let positive = |v: f32, fallback: f32| if v.is_finite() && v > 0.0 { v } else { fallback };
        let unit = |v: f64| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };

        self.gravity = fix("gravity", self.gravity, positive(self.gravity, defaults.gravity));
        self.run_speed = fix(
            "run_speed",
            self.run_speed,
            positive(self.run_speed, defaults.run_speed),
        );
        let jump = if self.jump_speed.is_finite() && self.jump_speed < 0.0 {
            self.jump_speed
        } else if self.jump_speed.is_finite() && self.jump_speed > 0.0 {
            -self.jump_speed
        } else {
            defaults.jump_speed
        };
        self.jump_speed = fix("jump_speed", self.jump_speed, jump);
        self.max_jumps = fix("max_jumps", self.max_jumps, self.max_jumps.max(1));
        self.coyote_time = fix("coyote_time", self.coyote_time, self.coyote_time.max(0.0));
        self.jump_buffer_time = fix(
            "jump_buffer_time",
            self.jump_buffer_time,
            self.jump_buffer_time.max(0.0),
        );
        self.crouch_speed_factor = fix(
            "crouch_speed_factor",
            self.crouch_speed_factor,
            self.crouch_speed_factor.clamp(0.0, 1.0),
        );
        let fall =
            positive(self.max_fall_speed, defaults.max_fall_speed).min(Self::fall_speed_limit());
        self.max_fall_speed = fix("max_fall_speed", self.max_fall_speed, fall);

        self.player_width = fix(
            "player_width",
            self.player_width,
            positive(self.player_width, defaults.player_width),
        );
        self.player_height = fix(
            "player_height",
            self.player_height,
            positive(self.player_height, defaults.player_height),
        );

        self.world_width = fix("world_width", self.world_width, self.world_width.max(800.0));
        self.world_height = fix("world_height", self.world_height, self.world_height.max(600.0));

        self.fade_duration = fix(
            "fade_duration",
            self.fade_duration,
            positive(self.fade_duration, defaults.fade_duration),
        );
        self.breakable_chance = fix(
            "breakable_chance",
            self.breakable_chance,
            unit(self.breakable_chance),
        );
        self.branch_chance = fix("branch_chance", self.branch_chance, unit(self.branch_chance));
        let safety = if self.reach_safety.is_finite() {
            self.reach_safety.clamp(0.5, 0.95)
        } else {
            defaults.reach_safety
        };
        self.reach_safety = fix("reach_safety", self.reach_safety, safety);

        self.flame_delay = fix("flame_delay", self.flame_delay, self.flame_delay.max(0.0));
        self.flame_speed = fix("flame_speed", self.flame_speed, self.flame_speed.max(0.0));

        self.shoot_cooldown = fix(
            "shoot_cooldown",
            self.shoot_cooldown,
            self.shoot_cooldown.max(0.0),
        );
        self.bullet_speed = fix(
            "bullet_speed",
            self.bullet_speed,
            positive(self.bullet_speed, defaults.bullet_speed),
        );
        self.bullet_life = fix(
            "bullet_life",
            self.bullet_life,
            positive(self.bullet_life, defaults.bullet_life),
        );

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_survive_sanitize() {
        let tuning = Tuning::default();
        assert_eq!(tuning.clone().sanitized(), tuning);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 1800.0, "max_jumps": 3 }"#).unwrap();
        assert_eq!(tuning.gravity, 1800.0);
        assert_eq!(tuning.max_jumps, 3);
        assert_eq!(tuning.run_speed, Tuning::default().run_speed);
    }

    #[test]
    fn test_invalid_values_are_clamped() {
        let tuning = Tuning::from_json(
            r#"{
                "gravity": -5.0,
                "jump_speed": 600.0,
                "max_jumps": 0,
                "max_fall_speed": 99999.0
            }"#,
        )
        .unwrap();
        assert_eq!(tuning.gravity, 2200.0);
        assert_eq!(tuning.jump_speed, -600.0);
        assert_eq!(tuning.max_jumps, 1);
        assert!(tuning.max_fall_speed * FIXED_DT < PLATFORM_THICKNESS);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(Tuning::from_json("{ nope"), Err(TuningError::Parse(_))));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tuning = Tuning::load("/definitely/not/here/tuning.json");
        assert_eq!(tuning, Tuning::default());
    }
}
