//! Game state and simulation events
//!
//! Everything one run needs lives in [`GameState`]; `tick` is the only
//! thing that mutates it during play.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::actor::{Enemy, Player};
use super::challenge::ChallengePhase;
use super::effects::Effects;
use super::progress::Progress;
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay (including while a challenge is open)
    Playing,
    /// Frozen, effects included
    Paused,
    /// Health ran out
    GameOver,
}

/// Things that happened during a tick, for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Player and enemy collided; the question must be shown
    ChallengeStarted { question: String },
    Correct { points: u32 },
    Wrong { damage: u32, health: u32 },
    LevelUp { level: u32 },
    /// Streak cleared at the top level; progress starts over
    Won,
    /// Health reached zero
    Defeated { score: u64, level: u32 },
    Paused,
    Resumed,
    Restarted,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub settings: Settings,
    /// Play area size in pixels
    pub bounds: Vec2,
    pub player: Player,
    pub enemy: Enemy,
    pub progress: Progress,
    pub challenge: ChallengePhase,
    /// Visual effects (not gameplay-affecting)
    pub effects: Effects,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Challenges opened this run
    pub challenges: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, settings: Settings) -> Self {
        Self::with_bounds(seed, settings, Vec2::new(PLAY_WIDTH, PLAY_HEIGHT))
    }

    pub fn with_bounds(seed: u64, settings: Settings, bounds: Vec2) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut player = Player::new(settings.player_speed, settings.starting_health);
        player.rect.clamp_into(bounds);
        let enemy = Enemy::spawn(settings.enemy_speed, bounds, &mut rng);
        let effects = Effects::new(settings.max_effects());

        Self {
            seed,
            rng,
            settings,
            bounds,
            player,
            enemy,
            progress: Progress::default(),
            challenge: ChallengePhase::Idle,
            effects,
            phase: GamePhase::Playing,
            time_ticks: 0,
            challenges: 0,
        }
    }

    /// Fresh run with the same settings and play area
    pub fn restarted(&self, seed: u64) -> Self {
        Self::with_bounds(seed, self.settings.clone(), self.bounds)
    }

    /// Swap preferences mid-run. Actor tuning takes effect on the next reset.
    pub fn apply_settings(&mut self, settings: Settings) {
        self.effects.cap = settings.max_effects();
        if !settings.effects {
            self.effects.clear();
        }
        self.enemy.speed_range = settings.enemy_speed;
        self.settings = settings;
    }
}
