//! Game loop driver
//!
//! Turns per-frame wall-clock timestamps into a whole number of fixed
//! simulation steps, so the simulation runs the same at any refresh rate.

use crate::consts::{FIXED_DT, MAX_FRAME_MS};
use crate::sim::{GameEvent, GamePhase, GameState, InputSnapshot, check_win, tick};

/// Slack (seconds) absorbing float residue when comparing against one step
const STEP_EPSILON: f64 = 1e-6;

/// Unconsumed simulation time
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    pending: f64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_ms(&mut self, elapsed_ms: f64) {
        if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            self.pending += elapsed_ms / 1000.0;
        }
    }

    /// Take one step of `dt` seconds if that much time is pending
    pub fn consume(&mut self, dt: f32) -> bool {
        let dt = dt as f64;
        if self.pending + STEP_EPSILON < dt {
            return false;
        }
        self.pending = (self.pending - dt).max(0.0);
        true
    }

    pub fn pending_ms(&self) -> f64 {
        self.pending * 1000.0
    }

    pub fn clear(&mut self) {
        self.pending = 0.0;
    }
}

/// What happened during one rendered frame
#[derive(Debug, Clone)]
pub struct FrameReport {
    /// Physics steps run this frame
    pub steps: u32,
    /// Events raised by those steps, in order
    pub events: Vec<GameEvent>,
    /// Phase after the frame; overlays show/hide panels from this
    pub phase: GamePhase,
}

/// Fixed-step scheduler, called once per rendered frame
#[derive(Debug, Clone)]
pub struct GameLoop {
    accumulator: Accumulator,
    last_time_ms: Option<f64>,
    pub fixed_dt: f32,
    pub max_frame_ms: f64,
}

impl Default for GameLoop {
    fn default() -> Self {
        Self {
            accumulator: Accumulator::new(),
            last_time_ms: None,
            fixed_dt: FIXED_DT,
            max_frame_ms: MAX_FRAME_MS,
        }
    }
}

impl GameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one rendered frame at monotonic time `now_ms`
    ///
    /// The first call only records the clock. Non-finite timestamps count as
    /// zero elapsed time and are not recorded.
    pub fn frame(
        &mut self,
        state: &mut GameState,
        now_ms: f64,
        input: &InputSnapshot,
    ) -> FrameReport {
        let mut elapsed = 0.0;
        if now_ms.is_finite() {
            if let Some(last) = self.last_time_ms {
                elapsed = (now_ms - last).clamp(0.0, self.max_frame_ms);
            }
            self.last_time_ms = Some(now_ms);
        }

        let mut steps = 0;
        if state.phase != GamePhase::Playing {
            // Restart is the only thing that reacts while paused or won
            let restart = input.restart_edge(&state.prev_input);
            state.prev_input = *input;
            if restart && state.request_restart() {
                self.accumulator.clear();
            }
        } else {
            self.accumulator.add_ms(elapsed);
            while self.accumulator.consume(self.fixed_dt) {
                tick(state, input, self.fixed_dt);
                steps += 1;
                if state.phase != GamePhase::Playing {
                    break;
                }
            }
            check_win(state);
            if state.phase != GamePhase::Playing {
                self.accumulator.clear();
            }
        }

        FrameReport {
            steps,
            events: state.drain_events(),
            phase: state.phase,
        }
    }

    pub fn pending_ms(&self) -> f64 {
        self.accumulator.pending_ms()
    }
}
