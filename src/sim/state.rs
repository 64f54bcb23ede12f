//! Game state and core simulation types
//!
//! Everything the physics step mutates lives in [`GameState`]; renderers and
//! overlays only read it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, overlaps};
use super::input::InputSnapshot;
use super::level::generate_level;
use crate::tuning::{RespawnMode, Tuning};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// The flame caught the actor; waiting for a restart
    FirePause,
    /// Actor reached the goal; frozen until a restart
    Won,
}

/// Platform material, doubles as the renderer's color tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlatformKind {
    /// The full-width floor strip
    Ground,
    #[default]
    Stone,
    /// Crumbles a fixed time after first being stood on
    Breakable,
}

/// A solid (or formerly solid) rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    pub kind: PlatformKind,
    pub solid: bool,
    /// Seconds left before the platform breaks, only set while decaying
    pub fade_timer: Option<f32>,
    pub is_fading: bool,
}

impl Platform {
    pub fn new(rect: Rect, kind: PlatformKind) -> Self {
        Self {
            rect,
            kind,
            solid: true,
            fade_timer: None,
            is_fading: false,
        }
    }

    /// Start the break countdown; only the first landing counts
    pub fn arm(&mut self, duration: f32) -> bool {
        if self.kind != PlatformKind::Breakable || self.fade_timer.is_some() || !self.solid {
            return false;
        }
        self.fade_timer = Some(duration);
        self.is_fading = true;
        true
    }

    /// Count the break timer down. Returns true on the step the platform breaks.
    pub fn decay(&mut self, dt: f32) -> bool {
        let Some(timer) = self.fade_timer.as_mut() else {
            return false;
        };
        *timer -= dt;
        // Tolerate float residue so `duration / dt` steps break exactly on time
        if *timer <= 1e-4 {
            self.solid = false;
            self.fade_timer = None;
            self.is_fading = false;
            return true;
        }
        false
    }

    /// Opacity for rendering: 1.0 when intact, shrinking to 0.0 as it fades
    pub fn fade_alpha(&self, duration: f32) -> f32 {
        match self.fade_timer {
            _ if !self.solid => 0.0,
            Some(timer) => (timer / duration).clamp(0.0, 1.0),
            None => 1.0,
        }
    }
}

/// The player actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Standing size, restored after crouching
    pub original_size: Vec2,
    /// -1.0 (left) or +1.0 (right)
    pub facing: f32,
    pub on_ground: bool,
    /// Jumps left before the next landing
    pub jump_count: u8,
    /// Remaining coyote window (seconds)
    pub coyote: f32,
    /// Remaining buffered-jump window (seconds)
    pub jump_buffer: f32,
    pub crouched: bool,
    /// Seconds until the next shot is allowed
    pub shoot_cooldown: f32,
}

impl Player {
    /// Create a standing player whose feet rest at `feet` (left edge, bottom edge)
    pub fn new(tuning: &Tuning, feet: Vec2) -> Self {
        let size = Vec2::new(tuning.player_width, tuning.player_height);
        Self {
            pos: Vec2::new(feet.x, feet.y - size.y),
            vel: Vec2::ZERO,
            size,
            original_size: size,
            facing: 1.0,
            on_ground: true,
            jump_count: tuning.max_jumps,
            coyote: 0.0,
            jump_buffer: 0.0,
            crouched: false,
            shoot_cooldown: 0.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Resize keeping the bottom edge and horizontal center fixed
    pub fn resize_anchored(&mut self, size: Vec2) {
        self.pos.x += (self.size.x - size.x) / 2.0;
        self.pos.y += self.size.y - size.y;
        self.size = size;
    }

    /// Crouching squashes the actor into a square half its standing height
    pub fn crouch_size(&self) -> Vec2 {
        Vec2::splat((self.original_size.y / 2.0).floor())
    }

    /// Update the standing reference size (e.g. after a viewport resize)
    pub fn set_reference_size(&mut self, w: f32, h: f32) {
        self.original_size = Vec2::new(w, h);
        if !self.crouched {
            self.resize_anchored(self.original_size);
        }
    }

    /// Put the player back on its feet at `feet` with fresh jump resources
    pub fn reset(&mut self, feet: Vec2, max_jumps: u8) {
        self.crouched = false;
        self.size = self.original_size;
        self.pos = Vec2::new(feet.x, feet.y - self.size.y);
        self.vel = Vec2::ZERO;
        self.facing = 1.0;
        self.on_ground = true;
        self.jump_count = max_jumps;
        self.coyote = 0.0;
        self.jump_buffer = 0.0;
        self.shoot_cooldown = 0.0;
    }
}

/// A player projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds left before it expires
    pub life: f32,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        use crate::consts::{BULLET_HEIGHT, BULLET_WIDTH};
        Rect::new(self.pos.x, self.pos.y, BULLET_WIDTH, BULLET_HEIGHT)
    }
}

/// The rising flame
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Flame {
    /// Distance risen above the world floor
    pub height: f32,
    /// Seconds left before it starts rising
    pub delay: f32,
}

impl Flame {
    pub fn new(delay: f32) -> Self {
        Self { height: 0.0, delay }
    }

    /// World-space y of the flame's top edge
    pub fn top(&self, world_height: f32) -> f32 {
        world_height - self.height
    }

    /// Advance the flame by one step; height never decreases
    pub fn advance(&mut self, speed: f32, dt: f32) {
        if self.delay > 0.0 {
            self.delay = (self.delay - dt).max(0.0);
            return;
        }
        self.height += speed * dt;
    }
}

/// The level: bounding box, platforms and goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub width: f32,
    pub height: f32,
    /// Index 0 is always the ground strip
    pub platforms: Vec<Platform>,
    /// Main-route platform indices in generation order (ground first)
    pub route: Vec<usize>,
    /// Reaching this region wins the level
    pub goal: Rect,
    /// Where the actor's feet start (left edge, bottom edge)
    pub spawn: Vec2,
}

impl World {
    pub fn ground(&self) -> &Platform {
        &self.platforms[0]
    }

    pub fn solid_platforms(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter().filter(|p| p.solid)
    }

    /// True if `rect` overlaps any solid platform
    pub fn blocked(&self, rect: &Rect) -> bool {
        self.solid_platforms().any(|p| overlaps(rect, &p.rect))
    }
}

/// Something the core wants the outer layers (overlay, audio) to know about
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped { air: bool, vy: f32 },
    Landed,
    PlatformArmed { index: usize },
    PlatformBroken { index: usize },
    Shot,
    FlameDeath,
    FellOutOfWorld,
    Won,
    Respawned { attempt: u32 },
}

/// Read-only view of a platform for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlatformView {
    pub rect: Rect,
    pub kind: PlatformKind,
    pub solid: bool,
    pub alpha: f32,
}

/// Complete simulation context, owned by the loop driver
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed; each attempt derives its own level seed from it
    pub seed: u64,
    /// Number of level (re)builds so far
    pub attempt: u32,
    pub tuning: Tuning,
    pub world: World,
    pub player: Player,
    pub flame: Flame,
    pub phase: GamePhase,
    pub bullets: Vec<Bullet>,
    /// Input seen by the previous step, for edge detection
    pub prev_input: InputSnapshot,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let world = generate_level(&mut Self::level_rng(seed, 0), &tuning);
        let player = Player::new(&tuning, world.spawn);
        log::info!(
            "Session {seed}: {} platforms, goal at ({:.0}, {:.0})",
            world.platforms.len(),
            world.goal.x,
            world.goal.y
        );
        Self {
            seed,
            attempt: 0,
            flame: Flame::new(tuning.flame_delay),
            tuning,
            world,
            player,
            phase: GamePhase::Playing,
            bullets: Vec::new(),
            prev_input: InputSnapshot::default(),
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Production default: a fresh random session seed
    pub fn from_entropy(tuning: Tuning) -> Self {
        Self::new(rand::random(), tuning)
    }

    /// RNG for the level built on `attempt`
    pub fn level_rng(seed: u64, attempt: u32) -> Pcg32 {
        let offset = (attempt as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        Pcg32::seed_from_u64(seed.wrapping_add(offset))
    }

    /// Reset the attempt: new level (or back to start), zeroed actor and flame
    pub fn respawn(&mut self) {
        self.attempt += 1;
        if self.tuning.respawn_mode == RespawnMode::Regenerate {
            let mut rng = Self::level_rng(self.seed, self.attempt);
            self.world = generate_level(&mut rng, &self.tuning);
        } else {
            for platform in &mut self.world.platforms {
                *platform = Platform::new(platform.rect, platform.kind);
            }
        }
        self.player.reset(self.world.spawn, self.tuning.max_jumps);
        self.flame = Flame::new(self.tuning.flame_delay);
        self.bullets.clear();
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Respawned {
            attempt: self.attempt,
        });
        log::info!(
            "Respawn #{} ({:?}), {} platforms",
            self.attempt,
            self.tuning.respawn_mode,
            self.world.platforms.len()
        );
    }

    /// External restart command; ignored while still playing
    pub fn request_restart(&mut self) -> bool {
        match self.phase {
            GamePhase::FirePause | GamePhase::Won => {
                self.respawn();
                true
            }
            GamePhase::Playing => false,
        }
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn platform_views(&self) -> impl Iterator<Item = PlatformView> + '_ {
        let duration = self.tuning.fade_duration;
        self.world.platforms.iter().map(move |p| PlatformView {
            rect: p.rect,
            kind: p.kind,
            solid: p.solid,
            alpha: p.fade_alpha(duration),
        })
    }

    /// World-space y of the flame's top edge
    pub fn flame_top(&self) -> f32 {
        self.flame.top(self.world.height)
    }
}
