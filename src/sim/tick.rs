//! Fixed timestep simulation tick
//!
//! One call advances the game by exactly one fixed step. The phases below run
//! in a fixed order; moving them around changes jump feel and can let the
//! actor tunnel through platforms.

use glam::Vec2;

use super::geometry::{overlaps, penetration};
use super::input::InputSnapshot;
use super::state::{Bullet, GameEvent, GamePhase, GameState, Player, World};
use crate::consts::{FALL_OUT_MARGIN, LAND_EPSILON};
use crate::tuning::Tuning;

/// Advance the game state by one fixed timestep
///
/// Events pile up in `state.events` until [`GameState::drain_events`] is
/// called. [`GameLoop`](crate::GameLoop) drains them every frame; callers
/// stepping `tick` themselves must drain them too.
pub fn tick(state: &mut GameState, input: &InputSnapshot, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.time_ticks += 1;

    let tuning = &state.tuning;
    let player = &mut state.player;
    let was_on_ground = player.on_ground;

    // Intent, jump-assist timers and jump resolution
    let jump_edge = input.jump_edge(&state.prev_input);
    update_jump_timers(player, tuning, jump_edge, dt);
    if let Some(event) = resolve_jump(player, tuning, jump_edge) {
        log::debug!("{event:?}, {} jumps left", player.jump_count);
        state.events.push(event);
    }

    // Crouch and run
    update_crouch(player, &state.world, input.crouch);
    let axis = input.move_axis();
    let speed = if player.crouched {
        tuning.run_speed * tuning.crouch_speed_factor
    } else {
        tuning.run_speed
    };
    player.vel.x = axis * speed;
    if axis != 0.0 {
        player.facing = axis.signum();
    }

    // Integrate
    player.vel.y = (player.vel.y + tuning.gravity * dt).min(tuning.max_fall_speed);
    player.pos.x += player.vel.x * dt;
    let prev_bottom = player.bottom();
    player.pos.y += player.vel.y * dt;

    // World bounds
    player.pos.x = player.pos.x.clamp(0.0, (state.world.width - player.size.x).max(0.0));
    if player.pos.y > state.world.height + FALL_OUT_MARGIN {
        log::info!("Fell out of the world at x={:.0}", player.pos.x);
        state.events.push(GameEvent::FellOutOfWorld);
        state.prev_input = *input;
        state.respawn();
        return;
    }

    resolve_collisions(
        player,
        &mut state.world,
        prev_bottom,
        tuning.fade_duration,
        &mut state.events,
    );

    // Jump charges only come back on the step the actor touches down
    if player.on_ground && !was_on_ground {
        player.jump_count = tuning.max_jumps;
        state.events.push(GameEvent::Landed);
    }

    // Shooting
    player.shoot_cooldown = (player.shoot_cooldown - dt).max(0.0);
    if input.shoot && player.shoot_cooldown <= 0.0 {
        let center = player.rect().center();
        state.bullets.push(Bullet {
            pos: center,
            vel: Vec2::new(player.facing * tuning.bullet_speed, 0.0),
            life: tuning.bullet_life,
        });
        player.shoot_cooldown = tuning.shoot_cooldown;
        state.events.push(GameEvent::Shot);
    }
    update_bullets(&mut state.bullets, &state.world, dt);

    // Platform decay
    for (index, platform) in state.world.platforms.iter_mut().enumerate() {
        if platform.decay(dt) {
            log::debug!("Platform {index} crumbled");
            state.events.push(GameEvent::PlatformBroken { index });
        }
    }

    // Flame
    state.flame.advance(tuning.flame_speed, dt);
    let flame_top = state.flame_top();
    state.prev_input = *input;

    if state.player.bottom() > flame_top {
        log::info!(
            "Caught by the flame at height {:.0} (attempt {})",
            state.flame.height,
            state.attempt
        );
        state.events.push(GameEvent::FlameDeath);
        if state.tuning.pause_on_death {
            state.player.vel = Vec2::ZERO;
            state.phase = GamePhase::FirePause;
        } else {
            state.respawn();
        }
    }
}

/// Win check, run once per rendered frame. Returns true on the frame the goal is reached.
pub fn check_win(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing || !overlaps(&state.player.rect(), &state.world.goal) {
        return false;
    }
    state.phase = GamePhase::Won;
    state.player.vel = Vec2::ZERO;
    state.events.push(GameEvent::Won);
    log::info!(
        "Goal reached after {} ticks (attempt {})",
        state.time_ticks,
        state.attempt
    );
    true
}

fn update_jump_timers(player: &mut Player, tuning: &Tuning, jump_edge: bool, dt: f32) {
    player.coyote = (player.coyote - dt).max(0.0);
    player.jump_buffer = (player.jump_buffer - dt).max(0.0);
    if player.on_ground {
        player.coyote = tuning.coyote_time;
    }
    if jump_edge {
        player.jump_buffer = tuning.jump_buffer_time;
    }
}

/// Ground/coyote jump first, air jump second; a single press never fires both
fn resolve_jump(player: &mut Player, tuning: &Tuning, jump_edge: bool) -> Option<GameEvent> {
    if player.jump_count == 0 {
        return None;
    }
    let grounded = player.on_ground || player.coyote > 0.0;
    let air = if player.jump_buffer > 0.0 && grounded {
        player.on_ground = false;
        player.coyote = 0.0;
        false
    } else if jump_edge {
        true
    } else {
        return None;
    };
    player.vel.y = tuning.jump_speed;
    player.jump_buffer = 0.0;
    player.jump_count -= 1;
    Some(GameEvent::Jumped {
        air,
        vy: tuning.jump_speed,
    })
}

fn update_crouch(player: &mut Player, world: &World, crouch: bool) {
    if crouch && !player.crouched {
        player.resize_anchored(player.crouch_size());
        player.crouched = true;
    } else if !crouch && player.crouched {
        // Stand up only if there is headroom
        let mut standing = player.clone();
        standing.resize_anchored(player.original_size);
        if !world.blocked(&standing.rect()) {
            player.pos = standing.pos;
            player.size = standing.size;
            player.crouched = false;
        }
    }
}

/// Push the actor out of every solid platform along the shallower axis
fn resolve_collisions(
    player: &mut Player,
    world: &mut World,
    prev_bottom: f32,
    fade_duration: f32,
    events: &mut Vec<GameEvent>,
) {
    player.on_ground = false;
    for index in 0..world.platforms.len() {
        let platform = &world.platforms[index];
        if !platform.solid {
            continue;
        }
        let rect = platform.rect;
        let Some(pen) = penetration(&player.rect(), &rect) else {
            continue;
        };

        if pen.is_horizontal() {
            push_out_horizontally(player, pen.x, pen.offset.x);
            continue;
        }

        let landed = prev_bottom <= rect.top() + LAND_EPSILON || pen.offset.y < 0.0;
        if landed {
            player.pos.y = rect.top() - player.size.y;
            player.vel.y = 0.0;
            player.on_ground = true;
            if world.platforms[index].arm(fade_duration) {
                events.push(GameEvent::PlatformArmed { index });
            }
            continue;
        }

        // Bonked the underside, unless the gap below is too short to fit in
        let mut below = player.rect();
        below.y = rect.bottom();
        if world.blocked(&below) {
            push_out_horizontally(player, pen.x, pen.offset.x);
        } else {
            player.pos.y = rect.bottom();
            player.vel.y = player.vel.y.max(0.0);
        }
    }
}

fn push_out_horizontally(player: &mut Player, depth: f32, offset_x: f32) {
    player.pos.x += if offset_x > 0.0 { depth } else { -depth };
    player.vel.x = 0.0;
}

fn update_bullets(bullets: &mut Vec<Bullet>, world: &World, dt: f32) {
    bullets.retain_mut(|bullet| {
        bullet.pos += bullet.vel * dt;
        bullet.life -= dt;
        bullet.life > 0.0
            && bullet.pos.x >= 0.0
            && bullet.pos.x <= world.width
            && !world.blocked(&bullet.rect())
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FIXED_DT, GROUND_THICKNESS};
    use crate::sim::geometry::Rect;
    use crate::sim::state::{Platform, PlatformKind};

    const JUMP: InputSnapshot = InputSnapshot {
        left: false,
        right: false,
        jump: true,
        crouch: false,
        shoot: false,
        restart: false,
    };
    const IDLE: InputSnapshot = InputSnapshot {
        left: false,
        right: false,
        jump: false,
        crouch: false,
        shoot: false,
        restart: false,
    };

    /// Flat arena: ground plus `extra`, flame far away
    fn arena(extra: Vec<Platform>) -> GameState {
        let tuning = Tuning {
            flame_delay: 1000.0,
            ..Tuning::default()
        };
        let mut state = GameState::new(1, tuning);
        let ground_top = state.world.height - GROUND_THICKNESS;
        let mut platforms = vec![Platform::new(
            Rect::new(0.0, ground_top, state.world.width, GROUND_THICKNESS),
            PlatformKind::Ground,
        )];
        platforms.extend(extra);
        state.world.platforms = platforms;
        state.world.route = vec![0];
        state.world.goal = Rect::new(state.world.width - 80.0, 100.0, 64.0, 96.0);
        state.world.spawn = Vec2::new(100.0, ground_top);
        state.player = Player::new(&state.tuning, state.world.spawn);
        state
    }

    fn ground_top(state: &GameState) -> f32 {
        state.world.height - GROUND_THICKNESS
    }

    fn run(state: &mut GameState, input: &InputSnapshot, steps: usize) {
        for _ in 0..steps {
            tick(state, input, FIXED_DT);
        }
    }

    fn jumps(events: &[GameEvent]) -> Vec<bool> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::Jumped { air, .. } => Some(*air),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_grounded_jump_from_rest() {
        let mut state = arena(vec![]);
        assert_eq!(state.player.pos.y, ground_top(&state) - state.player.size.y);
        assert_eq!(state.player.jump_count, 2);

        tick(&mut state, &JUMP, FIXED_DT);

        assert_eq!(
            state.events,
            vec![GameEvent::Jumped {
                air: false,
                vy: -740.0
            }]
        );
        // Gravity has already been integrated for this step
        assert!((state.player.vel.y - (-740.0 + 2200.0 * FIXED_DT)).abs() < 1e-3);
        assert!(!state.player.on_ground);
        assert_eq!(state.player.jump_count, 1);
    }

    #[test]
    fn test_holding_jump_does_not_repeat() {
        let mut state = arena(vec![]);
        run(&mut state, &JUMP, 90);

        assert_eq!(jumps(&state.events), vec![false]);
        // Landed again and the held key did not re-trigger
        assert!(state.player.on_ground);
        assert_eq!(state.player.jump_count, 2);
    }

    #[test]
    fn test_double_jump_then_nothing() {
        let mut state = arena(vec![]);
        for _ in 0..3 {
            tick(&mut state, &JUMP, FIXED_DT);
            run(&mut state, &IDLE, 4);
        }
        assert_eq!(jumps(&state.events), vec![false, true]);
        assert_eq!(state.player.jump_count, 0);
    }

    #[test]
    fn test_landing_refills_once_per_touchdown() {
        let mut state = arena(vec![]);
        state.player.pos.y -= 100.0;
        state.player.on_ground = false;
        state.player.jump_count = 0;

        run(&mut state, &IDLE, 60);
        let landings = state
            .events
            .iter()
            .filter(|e| **e == GameEvent::Landed)
            .count();
        assert_eq!(landings, 1);
        assert_eq!(state.player.jump_count, 2);

        // Standing still does not keep topping up charges
        state.player.jump_count = 1;
        run(&mut state, &IDLE, 30);
        assert!(state.player.on_ground);
        assert_eq!(state.player.jump_count, 1);
    }

    /// Actor just past the right edge of a ledge, grounded as of the last step
    fn off_ledge() -> GameState {
        let ledge = Platform::new(Rect::new(0.0, 1000.0, 400.0, 20.0), PlatformKind::Stone);
        let mut state = arena(vec![ledge]);
        state.player.pos = Vec2::new(400.5, 1000.0 - state.player.size.y);
        state.player.on_ground = true;
        // First step refreshes coyote time and starts the fall
        tick(&mut state, &IDLE, FIXED_DT);
        assert!(!state.player.on_ground);
        state
    }

    #[test]
    fn test_coyote_jump_inside_window() {
        let mut state = off_ledge();
        // ~0.08 s after leaving the ledge
        run(&mut state, &IDLE, 4);
        tick(&mut state, &JUMP, FIXED_DT);

        assert_eq!(jumps(&state.events), vec![false]);
        assert_eq!(state.player.jump_count, 1);
        assert!(state.player.vel.y < 0.0);
    }

    #[test]
    fn test_late_press_is_an_air_jump() {
        let mut state = off_ledge();
        run(&mut state, &IDLE, 7);
        tick(&mut state, &JUMP, FIXED_DT);

        assert_eq!(jumps(&state.events), vec![true]);
        assert_eq!(state.player.jump_count, 1);
    }

    #[test]
    fn test_late_press_without_charges_does_nothing() {
        let mut state = off_ledge();
        state.player.jump_count = 0;
        run(&mut state, &IDLE, 7);
        tick(&mut state, &JUMP, FIXED_DT);

        assert!(jumps(&state.events).is_empty());
        assert!(state.player.vel.y > 0.0);
    }

    #[test]
    fn test_buffered_jump_fires_on_landing() {
        let mut state = arena(vec![]);
        state.player.pos.y -= 10.0;
        state.player.vel.y = 300.0;
        state.player.on_ground = false;
        state.player.jump_count = 0;

        tick(&mut state, &JUMP, FIXED_DT);
        assert!(jumps(&state.events).is_empty());
        run(&mut state, &IDLE, 3);

        assert_eq!(jumps(&state.events), vec![false]);
        assert_eq!(state.player.jump_count, 1);
    }

    #[test]
    fn test_run_sets_facing() {
        let mut state = arena(vec![]);
        let left = InputSnapshot {
            left: true,
            ..IDLE
        };
        run(&mut state, &left, 10);
        assert_eq!(state.player.vel.x, -360.0);
        assert_eq!(state.player.facing, -1.0);

        run(&mut state, &IDLE, 1);
        assert_eq!(state.player.vel.x, 0.0);
        assert_eq!(state.player.facing, -1.0);
    }

    #[test]
    fn test_world_bounds_clamp_x() {
        let mut state = arena(vec![]);
        let left = InputSnapshot {
            left: true,
            ..IDLE
        };
        run(&mut state, &left, 60);
        assert_eq!(state.player.pos.x, 0.0);
    }

    #[test]
    fn test_crouch_shrinks_and_slows() {
        let mut state = arena(vec![]);
        let crouch_right = InputSnapshot {
            right: true,
            crouch: true,
            ..IDLE
        };
        tick(&mut state, &crouch_right, FIXED_DT);
        assert!(state.player.crouched);
        assert_eq!(state.player.size, Vec2::splat(36.0));
        assert!((state.player.vel.x - 216.0).abs() < 1e-3);
        assert!((state.player.bottom() - ground_top(&state)).abs() < 1e-3);

        run(&mut state, &IDLE, 1);
        assert!(!state.player.crouched);
        assert_eq!(state.player.size, Vec2::new(36.0, 72.0));
    }

    #[test]
    fn test_no_standing_up_under_a_ceiling() {
        let mut state = arena(vec![]);
        let top = ground_top(&state);
        let crouch = InputSnapshot {
            crouch: true,
            ..IDLE
        };
        tick(&mut state, &crouch, FIXED_DT);

        // Low ceiling 50 units above the floor, over the crouched actor
        let ceiling = Rect::new(0.0, top - 70.0, 400.0, 20.0);
        state.world.platforms.push(Platform::new(ceiling, PlatformKind::Stone));

        run(&mut state, &IDLE, 5);
        assert!(state.player.crouched);
        assert_eq!(state.player.size, Vec2::splat(36.0));
    }

    #[test]
    fn test_wall_stops_horizontal_motion() {
        let mut state = arena(vec![]);
        let top = ground_top(&state);
        let wall = Rect::new(200.0, top - 200.0, 40.0, 200.0);
        state.world.platforms.push(Platform::new(wall, PlatformKind::Stone));
        state.player.pos.x = 150.0;

        let right = InputSnapshot {
            right: true,
            ..IDLE
        };
        run(&mut state, &right, 20);
        assert!((state.player.pos.x - (200.0 - 36.0)).abs() < 1e-3);
        assert_eq!(state.player.vel.x, 0.0);
        assert!(state.player.on_ground);
    }

    #[test]
    fn test_head_bonk_stops_rise() {
        let mut state = arena(vec![]);
        let top = ground_top(&state);
        // Underside 40 units above the actor's head
        let ceiling = Rect::new(0.0, top - 72.0 - 60.0, 400.0, 20.0);
        state.world.platforms.push(Platform::new(ceiling, PlatformKind::Stone));

        tick(&mut state, &JUMP, FIXED_DT);
        let mut highest = state.player.pos.y;
        for _ in 0..30 {
            tick(&mut state, &IDLE, FIXED_DT);
            highest = highest.min(state.player.pos.y);
        }
        assert!(highest >= ceiling.bottom() - 1e-3);
        assert!(state.player.on_ground);
    }

    #[test]
    fn test_gap_lower_than_actor_blocks_walking() {
        let mut state = arena(vec![]);
        let top = ground_top(&state);
        // Underside 71 above the floor, one short of standing height
        let ledge = Rect::new(200.0, top - 91.0, 200.0, 20.0);
        state.world.platforms.push(Platform::new(ledge, PlatformKind::Stone));
        state.player.pos.x = 150.0;

        let right = InputSnapshot {
            right: true,
            ..IDLE
        };
        for _ in 0..40 {
            tick(&mut state, &right, FIXED_DT);
            assert!((state.player.bottom() - top).abs() < 1e-3);
            assert!(state.player.rect().right() <= ledge.left() + 1e-3);
        }
        assert!(state.player.on_ground);

        // Crouched it fits through
        let crouch_right = InputSnapshot {
            crouch: true,
            ..right
        };
        run(&mut state, &crouch_right, 80);
        assert!(state.player.pos.x > ledge.right());
        assert!((state.player.bottom() - top).abs() < 1e-3);
    }

    #[test]
    fn test_reference_resize_waits_for_standing_up() {
        let mut state = arena(vec![]);
        let top = ground_top(&state);
        let crouch = InputSnapshot {
            crouch: true,
            ..IDLE
        };
        tick(&mut state, &crouch, FIXED_DT);
        state.player.set_reference_size(40.0, 80.0);
        assert_eq!(state.player.size, Vec2::splat(36.0));

        run(&mut state, &crouch, 3);
        assert_eq!(state.player.size, Vec2::splat(36.0));

        tick(&mut state, &IDLE, FIXED_DT);
        assert!(!state.player.crouched);
        assert_eq!(state.player.size, Vec2::new(40.0, 80.0));
        assert!((state.player.bottom() - top).abs() < 1e-3);
    }

    #[test]
    fn test_breakable_platform_breaks_on_schedule() {
        let slab = Rect::new(0.0, 1200.0, 400.0, 20.0);
        let mut state = arena(vec![Platform::new(slab, PlatformKind::Breakable)]);
        state.player.pos = Vec2::new(100.0, slab.top() - state.player.size.y);

        tick(&mut state, &IDLE, FIXED_DT);
        assert!(state.events.contains(&GameEvent::PlatformArmed { index: 1 }));

        run(&mut state, &IDLE, 58);
        assert!(state.world.platforms[1].solid);
        run(&mut state, &IDLE, 1);
        assert!(!state.world.platforms[1].solid);
        assert!(state.world.platforms[1].fade_timer.is_none());

        // Standing on it again changes nothing
        state.player.pos = Vec2::new(100.0, slab.top() - state.player.size.y);
        state.player.vel = Vec2::ZERO;
        run(&mut state, &IDLE, 120);
        assert!(!state.world.platforms[1].solid);
        assert!(state.player.pos.y > slab.bottom());
    }

    #[test]
    fn test_flame_rises_monotonically_then_freezes() {
        let mut state = arena(vec![]);
        state.tuning.flame_speed = 10.0;
        state.flame.delay = 0.0;

        let mut last = state.flame.height;
        for _ in 0..120 {
            tick(&mut state, &IDLE, FIXED_DT);
            assert!(state.flame.height >= last);
            last = state.flame.height;
        }
        assert!((last - 20.0).abs() < 1e-2);

        state.phase = GamePhase::FirePause;
        run(&mut state, &IDLE, 60);
        assert_eq!(state.flame.height, last);

        assert!(state.request_restart());
        assert_eq!(state.flame.height, 0.0);
    }

    #[test]
    fn test_flame_contact_pauses() {
        let mut state = arena(vec![]);
        state.flame.delay = 0.0;
        state.flame.height = GROUND_THICKNESS + 10.0;

        tick(&mut state, &IDLE, FIXED_DT);
        assert_eq!(state.phase, GamePhase::FirePause);
        assert!(state.events.contains(&GameEvent::FlameDeath));
        assert_eq!(state.player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_flame_contact_respawns_without_pause() {
        let mut state = arena(vec![]);
        state.tuning.pause_on_death = false;
        state.flame.delay = 0.0;
        state.flame.height = GROUND_THICKNESS + 10.0;

        tick(&mut state, &IDLE, FIXED_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.attempt, 1);
        assert_eq!(state.flame.height, 0.0);
        assert_eq!(state.player.jump_count, state.tuning.max_jumps);
    }

    #[test]
    fn test_falling_out_of_world_respawns() {
        let mut state = arena(vec![]);
        state.player.pos.y = state.world.height + FALL_OUT_MARGIN + 1.0;
        tick(&mut state, &IDLE, FIXED_DT);
        assert!(state.events.contains(&GameEvent::FellOutOfWorld));
        assert_eq!(state.attempt, 1);
        assert!(state.player.on_ground);
    }

    #[test]
    fn test_goal_overlap_wins_and_freezes() {
        let mut state = arena(vec![]);
        let goal = state.world.goal;
        state.player.pos = Vec2::new(goal.x + 10.0, goal.y + 10.0);
        state.player.vel = Vec2::new(360.0, -200.0);

        assert!(check_win(&mut state));
        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(state.player.vel, Vec2::ZERO);

        let pos = state.player.pos;
        run(&mut state, &JUMP, 30);
        assert_eq!(state.player.pos, pos);
        assert!(!check_win(&mut state));
    }

    #[test]
    fn test_shooting_respects_cooldown() {
        let mut state = arena(vec![]);
        let shoot = InputSnapshot {
            shoot: true,
            ..IDLE
        };
        run(&mut state, &shoot, 11);
        assert_eq!(state.bullets.len(), 1);
        run(&mut state, &shoot, 1);
        assert_eq!(state.bullets.len(), 2);
        assert!(state.bullets.iter().all(|b| b.vel.x > 0.0));
    }

    #[test]
    fn test_bullets_stop_at_platforms() {
        let mut state = arena(vec![]);
        let top = ground_top(&state);
        let wall = Rect::new(300.0, top - 200.0, 40.0, 200.0);
        state.world.platforms.push(Platform::new(wall, PlatformKind::Stone));
        let shoot = InputSnapshot {
            shoot: true,
            ..IDLE
        };
        tick(&mut state, &shoot, FIXED_DT);
        assert_eq!(state.bullets.len(), 1);
        run(&mut state, &IDLE, 20);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_bullets_expire_in_open_air() {
        let mut state = arena(vec![]);
        state.tuning.bullet_life = 0.1;
        let shoot = InputSnapshot {
            shoot: true,
            ..IDLE
        };
        tick(&mut state, &shoot, FIXED_DT);
        run(&mut state, &IDLE, 3);
        assert_eq!(state.bullets.len(), 1);
        run(&mut state, &IDLE, 3);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_bullets_leave_the_world_edge() {
        let mut state = arena(vec![]);
        state.player.pos.x = 10.0;
        let shoot_left = InputSnapshot {
            left: true,
            shoot: true,
            ..IDLE
        };
        tick(&mut state, &shoot_left, FIXED_DT);
        assert_eq!(state.bullets.len(), 1);
        assert!(state.bullets[0].vel.x < 0.0);

        run(&mut state, &IDLE, 2);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_events_collect_until_drained() {
        let mut state = arena(vec![]);
        tick(&mut state, &JUMP, FIXED_DT);
        run(&mut state, &IDLE, 60);
        assert_eq!(jumps(&state.events), vec![false]);
        assert!(state.events.contains(&GameEvent::Landed));

        let drained = state.drain_events();
        assert!(!drained.is_empty());
        assert!(state.events.is_empty());
        run(&mut state, &IDLE, 5);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999, Tuning::default());
        let mut b = GameState::new(99999, Tuning::default());
        let script = [
            InputSnapshot { right: true, ..IDLE },
            InputSnapshot { right: true, jump: true, ..IDLE },
            InputSnapshot { right: true, ..IDLE },
            IDLE,
        ];
        for _ in 0..50 {
            for input in &script {
                tick(&mut a, input, FIXED_DT);
                tick(&mut b, input, FIXED_DT);
            }
        }
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.player.vel, b.player.vel);
        assert_eq!(a.events, b.events);
    }
}
