//! Flame Climb entry point
//!
//! There is no renderer in this crate; the native binary plays a headless
//! session with a simple autopilot and logs how far it got.
//!
//! Usage: `flame-climb [seed] [tuning.json]`

use flame_climb::sim::{GameEvent, GamePhase, GameState, InputSnapshot};
use flame_climb::{GameLoop, Tuning};

/// Simulated display refresh rate
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Give up after this much simulated time
const MAX_SECONDS: f64 = 120.0;
/// Restart this many times before giving up
const MAX_ATTEMPTS: u32 = 5;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse::<u64>().ok());
    let tuning = args.next().map(Tuning::load).unwrap_or_default();

    let mut state = match seed {
        Some(seed) => GameState::new(seed, tuning),
        None => GameState::from_entropy(tuning),
    };
    log::info!("Flame Climb (headless) starting, seed {}", state.seed);

    let mut game_loop = GameLoop::new();
    let mut now = 0.0;
    let mut frame: u64 = 0;
    let mut furthest: f32 = 0.0;

    while now < MAX_SECONDS * 1000.0 {
        let input = autopilot(&state, frame);
        let report = game_loop.frame(&mut state, now, &input);
        furthest = furthest.max(state.player.pos.x);

        for event in &report.events {
            match event {
                GameEvent::PlatformBroken { index } => log::debug!("platform {index} broke"),
                GameEvent::Respawned { attempt } => log::info!("attempt {attempt} begins"),
                _ => {}
            }
        }

        match report.phase {
            GamePhase::Won => break,
            GamePhase::FirePause if state.attempt + 1 >= MAX_ATTEMPTS => break,
            _ => {}
        }

        now += FRAME_MS;
        frame += 1;
    }

    println!(
        "seed {}: {:?} after {} attempt(s), {:.1}s simulated, furthest x {:.0} of {:.0}",
        state.seed,
        state.phase,
        state.attempt + 1,
        now / 1000.0,
        furthest,
        state.world.width
    );
}

/// Run right, hop whenever grounded, spend the air jump on the way down
fn autopilot(state: &GameState, frame: u64) -> InputSnapshot {
    let player = &state.player;
    let tap = frame % 2 == 0;
    let falling = !player.on_ground && player.vel.y > 0.0;
    InputSnapshot {
        right: true,
        jump: tap && (player.on_ground || (falling && player.jump_count > 0)),
        restart: state.phase == GamePhase::FirePause && tap,
        ..Default::default()
    }
}
