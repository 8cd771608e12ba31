//! Fixed-step simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod actor;
pub mod challenge;
pub mod collision;
pub mod effects;
pub mod input;
pub mod problem;
pub mod progress;
pub mod state;
pub mod tick;

pub use actor::{Enemy, Player, Rect, SpeedRange};
pub use challenge::{ChallengePhase, Response, Verdict};
pub use collision::collides;
pub use effects::{Effect, Effects, FloatingText, Particle, Tint};
pub use input::{Direction, KeyState};
pub use problem::{OperandRange, Operator, OperatorSet, Problem, ProblemRules, generate};
pub use progress::{Advance, LevelUpPolicy, Progress};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
