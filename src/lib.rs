//! Mathfall - a falling-block arcade game with arithmetic challenges
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (actors, collisions, challenges, effects)
//! - `renderer`: Display surface abstraction and frame drawing
//! - `platform`: Prompt and notification collaborators (browser / headless)
//! - `session`: Frame driver that feeds the simulation and routes its events
//! - `settings`: Ruleset and tuning, persisted in LocalStorage on the web

pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::Session;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one "frame" of game logic)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame delta the driver will accumulate (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Play area dimensions
    pub const PLAY_WIDTH: f32 = 800.0;
    pub const PLAY_HEIGHT: f32 = 500.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const PLAYER_START_X: f32 = 375.0;
    pub const PLAYER_START_Y: f32 = 450.0;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 50.0;

    /// Effect fade per tick
    pub const EFFECT_FADE: f32 = 0.02;
    /// Floating text upward drift per tick
    pub const TEXT_DRIFT: f32 = 1.0;
    /// Opacity at or below this is treated as fully faded
    pub const FADE_EPSILON: f32 = 1e-4;
}
