//! Frame driver
//!
//! Converts variable frame times into fixed simulation ticks, feeds answers
//! from the prompt host into the simulation and routes the resulting events
//! back out to the prompt host and notifier.

use crate::consts::*;
use crate::platform::{Banner, Notifier, PromptHost, PromptRequest};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Rolling frames-per-second estimate over the last 60 frames
#[derive(Debug, Clone)]
pub struct FpsMeter {
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FpsMeter {
    /// Record a frame timestamp in milliseconds
    pub fn record(&mut self, time_ms: f64) {
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        // Oldest sample is the one we will overwrite next
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = time_ms - oldest;
            if elapsed > 0.0 {
                let intervals = (self.frame_times.len() - 1) as f64;
                self.fps = (intervals * 1000.0 / elapsed).round() as u32;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

/// One running game plus its collaborators
pub struct Session<P, N> {
    pub state: GameState,
    /// Input for the next tick (keys persist, one-shots are cleared)
    pub input: TickInput,
    accumulator: f32,
    prompt: P,
    notifier: N,
}

impl<P: PromptHost, N: Notifier> Session<P, N> {
    pub fn new(seed: u64, settings: Settings, prompt: P, notifier: N) -> Self {
        Self::from_state(GameState::new(seed, settings), prompt, notifier)
    }

    pub fn from_state(state: GameState, prompt: P, notifier: N) -> Self {
        Self {
            state,
            input: TickInput::default(),
            accumulator: 0.0,
            prompt,
            notifier,
        }
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Forward a DOM key event. Returns true if the key steers the player.
    pub fn key_event(&mut self, key: &str, held: bool) -> bool {
        self.input.keys.apply_key(key, held)
    }

    pub fn request_pause(&mut self) {
        self.input.pause = true;
    }

    /// Pause only if currently playing (tab hidden, window blur)
    pub fn auto_pause(&mut self) {
        self.input.keys.release_all();
        if self.state.phase == GamePhase::Playing {
            self.input.pause = true;
        }
    }

    pub fn request_restart(&mut self, seed: u64) {
        self.input.restart = Some(seed);
    }

    /// Advance by a frame's worth of time. Returns the number of ticks run.
    pub fn update(&mut self, dt: f32) -> u32 {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        if self.input.answer.is_none() {
            self.input.answer = self.prompt.poll();
        }

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let events = tick(&mut self.state, &self.input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing. An answer that found the
            // game paused stays queued until a playing tick resolves it.
            if !self.state.challenge.is_awaiting() {
                self.input.answer = None;
            }
            self.input.pause = false;
            self.input.restart = None;

            for event in &events {
                self.route(event);
            }
        }

        // Drop backlog we could not simulate rather than spiralling
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        substeps
    }

    fn route(&mut self, event: &GameEvent) {
        match event {
            GameEvent::ChallengeStarted { question } => {
                self.prompt.present(&PromptRequest::for_question(question.clone()));
            }
            GameEvent::Restarted => self.prompt.close(),
            _ => {
                if let Some(banner) = Banner::for_event(event) {
                    self.notifier.notify(&banner);
                }
            }
        }
    }
}
