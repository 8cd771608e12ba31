//! Platform abstraction layer
//!
//! The game talks to the outside world through two collaborators:
//! - [`PromptHost`]: shows a question and later hands back the answer
//! - [`Notifier`]: fire-and-forget banners (correct, wrong, level up, ...)
//!
//! `web` implements both with DOM elements; `headless` implements them for
//! the native demo and tests.

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::sim::{GameEvent, Response};

/// Declarative description of the answer modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub title: String,
    pub question: String,
    pub placeholder: String,
}

impl PromptRequest {
    pub fn for_question(question: impl Into<String>) -> Self {
        Self {
            title: "Solve".to_string(),
            question: question.into(),
            placeholder: "Your answer".to_string(),
        }
    }
}

/// Collects an answer without blocking the frame loop
pub trait PromptHost {
    /// Show the question. Called once per challenge.
    fn present(&mut self, request: &PromptRequest);
    /// Take the answer if the player has given one
    fn poll(&mut self) -> Option<Response>;
    /// Hide any open prompt without producing an answer
    fn close(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Failure,
    LevelUp,
    Win,
    GameOver,
}

impl BannerKind {
    /// CSS class for the DOM banner
    pub fn css_class(&self) -> &'static str {
        match self {
            BannerKind::Success => "banner-success",
            BannerKind::Failure => "banner-failure",
            BannerKind::LevelUp => "banner-level",
            BannerKind::Win => "banner-win",
            BannerKind::GameOver => "banner-over",
        }
    }
}

/// A short message for the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
}

impl Banner {
    /// Banner text for an event, if it deserves one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        let (kind, text) = match event {
            GameEvent::Correct { points } => {
                (BannerKind::Success, format!("Correct! +{} points", points))
            }
            GameEvent::Wrong { damage, .. } => {
                (BannerKind::Failure, format!("Wrong! -{} HP", damage))
            }
            GameEvent::LevelUp { level } => {
                (BannerKind::LevelUp, format!("Level Up! Now Level {}", level))
            }
            GameEvent::Won => (
                BannerKind::Win,
                "You cleared the final level! Starting over.".to_string(),
            ),
            GameEvent::Defeated { score, level } => (
                BannerKind::GameOver,
                format!("Game over! Score {} on level {}", score, level),
            ),
            GameEvent::ChallengeStarted { .. }
            | GameEvent::Paused
            | GameEvent::Resumed
            | GameEvent::Restarted => return None,
        };
        Some(Self { kind, text })
    }
}

/// Shows banners; nothing flows back into the game
pub trait Notifier {
    fn notify(&mut self, banner: &Banner);
}
