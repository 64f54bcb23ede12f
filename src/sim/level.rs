//! Procedural level generation
//!
//! Platforms are laid out left to right. Before placing anything the
//! generator derives how high and how far the actor can jump, and every
//! generated step is clamped into that envelope, so an unfinishable level
//! cannot be produced.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::geometry::{Rect, overlaps};
use super::state::{Platform, PlatformKind, World};
use crate::consts::{GOAL_HEIGHT, GOAL_WIDTH, GROUND_THICKNESS, PLATFORM_THICKNESS};
use crate::tuning::Tuning;

/// Actor feet start this far from the left wall
pub const SPAWN_X: f32 = 80.0;
/// Highest platform top allowed (distance from the world top)
pub const TOP_MARGIN: f32 = 160.0;
/// Room kept free at the right edge for the goal
pub const END_MARGIN: f32 = 240.0;
/// Absolute minimum platform width
pub const MIN_PLATFORM_WIDTH: f32 = 60.0;
/// Fraction of the physical jump height a generated step may use
pub const VERTICAL_SAFETY: f32 = 0.85;
/// Extra vertical room between a fall-only branch and the platform above it
pub const BRANCH_CLEARANCE: f32 = 12.0;

/// How far the actor can travel in one jump
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReachEnvelope {
    /// Apex of a standing jump: `v² / 2g`
    pub max_jump_height: f32,
    /// Horizontal distance over a full arc, shrunk by the safety factor
    pub horizontal_reach: f32,
    jump_speed: f32,
    gravity: f32,
    run_speed: f32,
    safety: f32,
}

impl ReachEnvelope {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        let v = tuning.jump_speed.abs();
        let g = tuning.gravity;
        let air_time = 2.0 * v / g;
        Self {
            max_jump_height: v * v / (2.0 * g),
            horizontal_reach: tuning.run_speed * air_time * tuning.reach_safety,
            jump_speed: v,
            gravity: g,
            run_speed: tuning.run_speed,
            safety: tuning.reach_safety,
        }
    }

    /// Largest rise a generated step may ask for
    pub fn max_step_rise(&self) -> f32 {
        self.max_jump_height * VERTICAL_SAFETY
    }

    /// Horizontal reach when landing `rise` above the take-off height
    ///
    /// Landing higher cuts the descent short, so the reach shrinks. Drops are
    /// capped at the flat-arc reach.
    pub fn reach_for_rise(&self, rise: f32) -> f32 {
        let rise = rise.clamp(0.0, self.max_jump_height);
        let v = self.jump_speed;
        let disc = (v * v - 2.0 * self.gravity * rise).max(0.0);
        let time = (v + disc.sqrt()) / self.gravity;
        (self.run_speed * time * self.safety).min(self.horizontal_reach)
    }
}

/// One hop along the main route
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteStep {
    /// Edge-to-edge distance from the take-off platform to the next one
    /// (negative when they overlap horizontally)
    pub horizontal_gap: f32,
    /// How far the next platform's top sits above the current one (negative = drop)
    pub rise: f32,
}

impl RouteStep {
    pub fn between(from: &Rect, to: &Rect) -> Self {
        Self {
            horizontal_gap: to.left() - from.right(),
            rise: from.top() - to.top(),
        }
    }

    pub fn reachable(&self, envelope: &ReachEnvelope) -> bool {
        self.horizontal_gap <= envelope.horizontal_reach
            && self.rise.abs() <= envelope.max_jump_height
    }
}

/// Every hop from the ground through the route platforms to the goal
pub fn route_steps(world: &World) -> Vec<RouteStep> {
    let rects: Vec<Rect> = world.route.iter().map(|&i| world.platforms[i].rect).collect();
    let mut steps: Vec<RouteStep> = rects
        .windows(2)
        .map(|w| RouteStep::between(&w[0], &w[1]))
        .collect();
    if let Some(last) = rects.last() {
        // The goal is a region, not a floor: what matters is reaching its bottom edge
        let goal_floor = Rect::new(world.goal.x, world.goal.bottom(), world.goal.w, 0.0);
        steps.push(RouteStep::between(last, &goal_floor));
    }
    steps
}

/// Pacing state for the ascent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SegmentKind {
    /// Mandatory opening climb away from the ground
    Climb,
    /// Near-level run following the midline
    Flat,
    /// Steeper section chasing the midline, biased upward
    Ramp,
}

struct Segment {
    kind: SegmentKind,
    remaining: u32,
}

impl Segment {
    fn opening<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            kind: SegmentKind::Climb,
            remaining: rng.random_range(3..=4),
        }
    }

    /// Consume one platform, switching segment when this one runs out
    fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SegmentKind {
        if self.remaining == 0 {
            self.kind = match self.kind {
                SegmentKind::Climb | SegmentKind::Ramp => SegmentKind::Flat,
                SegmentKind::Flat => SegmentKind::Ramp,
            };
            self.remaining = rng.random_range(2..=4);
        }
        self.remaining -= 1;
        self.kind
    }
}

/// Sinusoidal target height that trends upward across the level
struct Midline {
    ground_top: f32,
    climb_span: f32,
    amplitude: f32,
    wavelength: f32,
    phase: f32,
    world_width: f32,
}

impl Midline {
    fn y_at(&self, x: f32) -> f32 {
        let progress = (x / self.world_width).clamp(0.0, 1.0);
        self.ground_top - progress * self.climb_span
            - self.amplitude * (self.phase + x * TAU / self.wavelength).sin()
    }
}

/// Build a fresh level
///
/// Invariant: consecutive route platforms (ground first, goal last) are
/// always within [`ReachEnvelope`] of each other.
pub fn generate_level<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning) -> World {
    let envelope = ReachEnvelope::from_tuning(tuning);
    let max_rise = envelope.max_step_rise();
    let player = Vec2::new(tuning.player_width, tuning.player_height);

    let width = tuning.world_width;
    let height = tuning.world_height;
    let ground_top = height - GROUND_THICKNESS;
    let min_y = TOP_MARGIN;
    let max_y = ground_top - 0.5 * max_rise;

    let min_w = MIN_PLATFORM_WIDTH.max(2.6 * player.x);
    let max_w = (min_w * 1.5).max(6.0 * player.x);

    let mut platforms = vec![Platform::new(
        Rect::new(0.0, ground_top, width, GROUND_THICKNESS),
        PlatformKind::Ground,
    )];
    let mut route = vec![0];

    // Aim for an ascent the route can actually keep up with, so the
    // midline's dips show up as real descents
    let avg_step = (min_w + max_w) / 2.0 + 0.5 * envelope.horizontal_reach;
    let expected_steps = (width - END_MARGIN - SPAWN_X).max(0.0) / avg_step;
    let midline = Midline {
        ground_top,
        climb_span: ((ground_top - min_y) * 0.85).min(expected_steps * max_rise * 0.45),
        amplitude: max_rise * 0.8,
        wavelength: rng.random_range(900.0..=1400.0),
        phase: rng.random_range(0.0..TAU),
        world_width: width,
    };
    let mut segment = Segment::opening(rng);

    // Take-off point: the actor standing at spawn
    let mut prev_top = ground_top;
    let mut prev_right = SPAWN_X + player.x;
    let mut prev_breakable = false;
    let mut pending_branch: Option<Platform> = None;

    loop {
        let kind = segment.next(rng);
        // Distance along the route doubles as the midline's x
        let sample_x = prev_right + envelope.horizontal_reach * 0.5;
        let toward_midline = prev_top - midline.y_at(sample_x);

        let wanted_rise = match kind {
            SegmentKind::Climb => max_rise * rng.random_range(0.55..=0.9),
            SegmentKind::Flat => {
                toward_midline.clamp(-0.15 * max_rise, 0.15 * max_rise)
                    + max_rise * rng.random_range(-0.1..=0.1)
            }
            SegmentKind::Ramp => toward_midline.clamp(-0.5 * max_rise, max_rise) + 0.3 * max_rise,
        };

        // Clamp into the jump envelope and the playable band
        let lo = (prev_top - max_rise).max(min_y);
        let hi = (prev_top + max_rise).min(max_y);
        let y = (prev_top - wanted_rise).clamp(lo.min(hi), hi);
        let rise = prev_top - y;

        let reach = envelope.reach_for_rise(rise);
        let gap = reach * rng.random_range(0.35..=0.95);
        let w = match kind {
            SegmentKind::Flat => rng.random_range((min_w * 1.2).min(max_w)..=max_w),
            _ => rng.random_range(min_w..=(max_w * 0.75).max(min_w)),
        };
        let x = prev_right + gap;
        if x + w > width - END_MARGIN {
            break;
        }

        let rect = Rect::new(x, y, w, PLATFORM_THICKNESS);
        debug_assert!(rise.abs() <= envelope.max_jump_height);
        debug_assert!(gap <= envelope.horizontal_reach);

        if let Some(branch) = pending_branch.take() {
            if !overlaps(&branch.rect, &rect.inflate(4.0, player.y + BRANCH_CLEARANCE)) {
                platforms.push(branch);
            }
        }

        let breakable =
            route.len() >= 2 && !prev_breakable && rng.random_bool(tuning.breakable_chance);
        let kind_tag = if breakable {
            PlatformKind::Breakable
        } else {
            PlatformKind::Stone
        };
        route.push(platforms.len());
        platforms.push(Platform::new(rect, kind_tag));

        if route.len() > 2 && rng.random_bool(tuning.branch_chance) {
            pending_branch =
                place_branch(rng, &rect, &platforms, player, min_w, &envelope, ground_top);
        }

        prev_top = y;
        prev_right = x + w;
        prev_breakable = breakable;
    }

    // The goal jump must never start from a crumbling platform
    if let Some(&last) = route.last() {
        if platforms[last].kind == PlatformKind::Breakable {
            platforms[last].kind = PlatformKind::Stone;
        }
    }

    let last_rect = platforms[route[route.len() - 1]].rect;
    let goal_rise = max_rise * 0.3;
    let goal_gap = 0.5 * envelope.reach_for_rise(goal_rise);
    let goal_x = (last_rect.right() + goal_gap).min(width - GOAL_WIDTH - 16.0);
    let goal_bottom = last_rect.top() - goal_rise;
    let goal = Rect::new(goal_x, goal_bottom - GOAL_HEIGHT, GOAL_WIDTH, GOAL_HEIGHT);

    if let Some(branch) = pending_branch {
        if !overlaps(&branch.rect, &goal) {
            platforms.push(branch);
        }
    }

    let world = World {
        width,
        height,
        platforms,
        route,
        goal,
        spawn: Vec2::new(SPAWN_X, ground_top),
    };
    log::debug!(
        "Generated {} platforms ({} on route), reach {:.0}x{:.0}",
        world.platforms.len(),
        world.route.len(),
        envelope.horizontal_reach,
        envelope.max_jump_height
    );
    world
}

/// Fall-only platform tucked under `above`, poking out past its right edge
fn place_branch<R: Rng + ?Sized>(
    rng: &mut R,
    above: &Rect,
    existing: &[Platform],
    player: Vec2,
    min_w: f32,
    envelope: &ReachEnvelope,
    ground_top: f32,
) -> Option<Platform> {
    // Room for the actor between the two, and still climbable back up
    let min_drop = above.h + player.y + BRANCH_CLEARANCE;
    let max_drop = envelope.max_jump_height * 0.98;
    if min_drop > max_drop {
        return None;
    }
    let drop = rng.random_range(min_drop..=max_drop);
    let w = rng.random_range(min_w..=min_w * 1.3);
    let x = above.right() - w * rng.random_range(0.3..=0.6);
    let rect = Rect::new(x, above.top() + drop, w, PLATFORM_THICKNESS);

    if rect.bottom() > ground_top - player.y - BRANCH_CLEARANCE {
        return None;
    }
    let clearance = rect.inflate(4.0, player.y + BRANCH_CLEARANCE);
    let crowded = existing
        .iter()
        .skip(1)
        .filter(|p| p.rect != *above)
        .any(|p| overlaps(&clearance, &p.rect));
    if crowded {
        return None;
    }
    Some(Platform::new(rect, PlatformKind::Stone))
}
