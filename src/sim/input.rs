//! Pressed-key snapshots fed to the simulation once per step

use serde::{Deserialize, Serialize};

/// Logical key state for a single step
///
/// Anything the input layer never reported is simply `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub crouch: bool,
    pub shoot: bool,
    /// Restart request (only honoured from `FirePause` or `Won`)
    pub restart: bool,
}

impl InputSnapshot {
    /// Build a snapshot from the names of the currently held keys
    ///
    /// Names follow browser `KeyboardEvent.key` values and are matched
    /// case-insensitively; unknown names are ignored.
    pub fn from_pressed<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut input = Self::default();
        for key in keys {
            match key.as_ref().to_lowercase().as_str() {
                "arrowleft" | "a" => input.left = true,
                "arrowright" | "d" => input.right = true,
                "arrowup" | "w" | " " | "space" => input.jump = true,
                "arrowdown" | "s" => input.crouch = true,
                "z" | "k" => input.shoot = true,
                "r" | "enter" => input.restart = true,
                _ => {}
            }
        }
        input
    }

    /// -1, 0 or +1 from the left/right keys
    pub fn move_axis(&self) -> f32 {
        let mut axis = 0.0;
        if self.left {
            axis -= 1.0;
        }
        if self.right {
            axis += 1.0;
        }
        axis
    }

    /// Jump went down this step
    #[inline]
    pub fn jump_edge(&self, prev: &InputSnapshot) -> bool {
        self.jump && !prev.jump
    }

    #[inline]
    pub fn restart_edge(&self, prev: &InputSnapshot) -> bool {
        self.restart && !prev.restart
    }
}
