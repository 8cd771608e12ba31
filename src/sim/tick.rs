//! Fixed timestep simulation tick
//!
//! One call advances the game by one frame of logic and reports what
//! happened as [`GameEvent`]s.

use glam::Vec2;

use super::actor::Rect;
use super::challenge::{Response, Verdict};
use super::collision::collides;
use super::effects::Tint;
use super::input::KeyState;
use super::problem;
use super::progress::Advance;
use super::state::{GameEvent, GamePhase, GameState};

/// Nominal spark count for an answer burst
const FEEDBACK_BURST: usize = 20;
/// Nominal spark count for the bonus burst
const BONUS_BURST: usize = 30;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held steering keys
    pub keys: KeyState,
    /// Answer to the open challenge, if one arrived
    pub answer: Option<Response>,
    /// Pause toggle
    pub pause: bool,
    /// Start a new run with this seed
    pub restart: Option<u64>,
}

/// Advance the game state by one fixed step
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if let Some(seed) = input.restart {
        *state = state.restarted(seed);
        log::info!("Run restarted with seed {}", seed);
        events.push(GameEvent::Restarted);
        return events;
    }

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                events.push(GameEvent::Paused);
                return events;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                events.push(GameEvent::Resumed);
            }
            GamePhase::GameOver => {}
        }
    }

    match state.phase {
        GamePhase::Paused => return events,
        GamePhase::GameOver => {
            // Let the last bursts finish fading
            state.effects.update();
            return events;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    // The tick that resolves a challenge leaves the freshly reset enemy at the top
    let mut resolved = false;
    if let Some(response) = &input.answer {
        if let Some(verdict) = state.challenge.resolve(response) {
            apply_verdict(state, verdict, &mut events);
            resolved = true;
        }
    }

    if state.phase == GamePhase::Playing && !resolved && !state.challenge.is_awaiting() {
        state.player.step(&input.keys, state.bounds);
        state.enemy.step(state.bounds, &mut state.rng);

        if collides(&state.player.rect, &state.enemy.rect) {
            start_challenge(state, &mut events);
        }
    }

    state.effects.update();

    events
}

fn start_challenge(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let problem = problem::generate(
        state.progress.level,
        &state.settings.problems,
        &mut state.rng,
    );
    let question = problem.question();
    if state.challenge.begin(problem) {
        state.challenges += 1;
        log::debug!(
            "Challenge #{} at level {}: {}",
            state.challenges,
            state.progress.level,
            question
        );
        events.push(GameEvent::ChallengeStarted { question });
    }
}

fn apply_verdict(state: &mut GameState, verdict: Verdict, events: &mut Vec<GameEvent>) {
    let Verdict { problem, correct } = verdict;
    let player_rect = state.player.rect;

    if correct {
        log::debug!("Correct: {} = {}", problem.question(), problem.answer);
        events.push(GameEvent::Correct {
            points: problem.reward,
        });

        let burst = state.settings.burst_count(FEEDBACK_BURST);
        state
            .effects
            .burst(state.enemy.rect.center(), burst, Tint::Gold, &mut state.rng);
        state.effects.float_text(
            text_anchor(&player_rect),
            format!("+{}", problem.reward),
            Tint::Gold,
        );
        if problem.operator.is_bonus() {
            let bonus = state.settings.burst_count(BONUS_BURST);
            state
                .effects
                .scatter(state.bounds, bonus, Tint::Gold, &mut state.rng);
        }

        match state
            .progress
            .record_correct(problem.reward, &state.settings.level_up)
        {
            Advance::LevelUp(level) => {
                log::info!("Level up! Now level {}", level);
                events.push(GameEvent::LevelUp { level });
            }
            Advance::Won => {
                log::info!("Game won, progress reset");
                events.push(GameEvent::Won);
            }
            Advance::None => {}
        }
    } else {
        log::debug!("Wrong answer for {} (was {})", problem.question(), problem.answer);
        state.player.take_damage(problem.penalty);
        state.progress.record_wrong();
        events.push(GameEvent::Wrong {
            damage: problem.penalty,
            health: state.player.health,
        });

        let burst = state.settings.burst_count(FEEDBACK_BURST);
        state
            .effects
            .burst(player_rect.center(), burst, Tint::Red, &mut state.rng);
        state.effects.float_text(
            text_anchor(&player_rect),
            format!("-{} HP", problem.penalty),
            Tint::Red,
        );

        if state.player.is_defeated() {
            state.phase = GamePhase::GameOver;
            log::info!(
                "Game over: score {} at level {}",
                state.progress.score,
                state.progress.level
            );
            events.push(GameEvent::Defeated {
                score: state.progress.score,
                level: state.progress.level,
            });
        }
    }

    state.enemy.reset(state.bounds, &mut state.rng);
}

/// Floating text starts just above the player
fn text_anchor(rect: &Rect) -> Vec2 {
    rect.top_left() - Vec2::new(0.0, 20.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::progress::LevelUpPolicy;

    /// Enemy hovering right on top of the player
    fn collision_setup(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Settings::default());
        state.player.rect = Rect::new(100.0, 400.0, 50.0, 50.0);
        state.enemy.rect = Rect::new(100.0, 390.0, 50.0, 50.0);
        state
    }

    fn pending_answer(state: &GameState) -> i64 {
        state.challenge.pending().expect("challenge open").answer
    }

    #[test]
    fn test_collision_starts_exactly_one_challenge() {
        let mut state = collision_setup(1);
        let events = tick(&mut state, &TickInput::default());
        assert!(matches!(events[..], [GameEvent::ChallengeStarted { .. }]));
        assert!(state.challenge.is_awaiting());

        // Still overlapping, but no second challenge while awaiting
        for _ in 0..30 {
            let events = tick(&mut state, &TickInput::default());
            assert!(events.is_empty());
        }
        assert_eq!(state.challenges, 1);
    }

    #[test]
    fn test_actors_hold_still_while_awaiting() {
        let mut state = collision_setup(2);
        tick(&mut state, &TickInput::default());
        let enemy = state.enemy.rect;
        let player = state.player.rect;

        let input = TickInput {
            keys: KeyState {
                left: true,
                ..Default::default()
            },
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.enemy.rect, enemy);
        assert_eq!(state.player.rect, player);
    }

    #[test]
    fn test_correct_answer_scores_and_resets_enemy() {
        let mut state = collision_setup(3);
        tick(&mut state, &TickInput::default());
        let reward = state.challenge.pending().unwrap().reward;
        let answer = pending_answer(&state).to_string();

        let input = TickInput {
            answer: Some(Response::Text(answer)),
            ..Default::default()
        };
        let events = tick(&mut state, &input);

        assert!(events.contains(&GameEvent::Correct { points: reward }));
        assert_eq!(state.progress.score, reward as u64);
        assert_eq!(state.player.health, 100);
        assert!(!state.challenge.is_awaiting());
        assert_eq!(state.enemy.rect.y, 0.0);
        assert!(!state.effects.is_empty());
    }

    #[test]
    fn test_wrong_answer_damages_and_resets_enemy() {
        let mut state = collision_setup(4);
        tick(&mut state, &TickInput::default());
        let penalty = state.challenge.pending().unwrap().penalty;

        let input = TickInput {
            answer: Some(Response::text("not a number")),
            ..Default::default()
        };
        let events = tick(&mut state, &input);

        assert!(events.contains(&GameEvent::Wrong {
            damage: penalty,
            health: 100 - penalty,
        }));
        assert_eq!(state.progress.score, 0);
        assert_eq!(state.enemy.rect.y, 0.0);

        // Descent resumes on the following tick
        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemy.rect.y, state.enemy.speed);
    }

    #[test]
    fn test_dismissed_prompt_is_wrong() {
        let mut state = collision_setup(5);
        tick(&mut state, &TickInput::default());
        let input = TickInput {
            answer: Some(Response::Dismissed),
            ..Default::default()
        };
        let events = tick(&mut state, &input);
        assert!(events.iter().any(|e| matches!(e, GameEvent::Wrong { .. })));
    }

    #[test]
    fn test_level_up_on_score_threshold() {
        let mut state = collision_setup(6);
        state.progress.score = 49;
        tick(&mut state, &TickInput::default());
        let answer = pending_answer(&state).to_string();

        let events = tick(
            &mut state,
            &TickInput {
                answer: Some(Response::Text(answer)),
                ..Default::default()
            },
        );
        assert!(events.contains(&GameEvent::LevelUp { level: 2 }));
        assert_eq!(state.progress.level, 2);
    }

    #[test]
    fn test_streak_win_emits_event() {
        let settings = Settings {
            level_up: LevelUpPolicy::streak(),
            ..Default::default()
        };
        let mut state = GameState::new(7, settings);
        state.progress.level = 10;
        state.progress.streak = 7;
        state.progress.score = 500;
        state.player.rect = Rect::new(100.0, 400.0, 50.0, 50.0);
        state.enemy.rect = Rect::new(100.0, 390.0, 50.0, 50.0);

        tick(&mut state, &TickInput::default());
        let answer = pending_answer(&state).to_string();
        let events = tick(
            &mut state,
            &TickInput {
                answer: Some(Response::Text(answer)),
                ..Default::default()
            },
        );
        assert!(events.contains(&GameEvent::Won));
        assert_eq!(
            (state.progress.level, state.progress.score, state.progress.streak),
            (1, 0, 0)
        );
    }

    #[test]
    fn test_defeat_ends_run() {
        let mut state = collision_setup(8);
        state.player.health = 3;
        tick(&mut state, &TickInput::default());

        let events = tick(
            &mut state,
            &TickInput {
                answer: Some(Response::Dismissed),
                ..Default::default()
            },
        );
        assert_eq!(state.player.health, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(events.contains(&GameEvent::Defeated { score: 0, level: 1 }));

        // Nothing moves after game over
        let enemy = state.enemy.rect;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemy.rect, enemy);

        let events = tick(
            &mut state,
            &TickInput {
                restart: Some(99),
                ..Default::default()
            },
        );
        assert_eq!(events, vec![GameEvent::Restarted]);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.health, 100);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut state = GameState::new(9, Settings::default());
        state.effects.float_text(Vec2::ZERO, "+5", Tint::Gold);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        assert_eq!(tick(&mut state, &pause), vec![GameEvent::Paused]);
        let enemy = state.enemy.rect;
        let ticks = state.time_ticks;
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.enemy.rect, enemy);
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.effects.len(), 1);

        let events = tick(&mut state, &pause);
        assert_eq!(events, vec![GameEvent::Resumed]);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_answer_held_back_while_paused() {
        let mut state = collision_setup(10);
        tick(&mut state, &TickInput::default());
        let answer = Some(Response::Text(pending_answer(&state).to_string()));

        // Pause and answer arrive together: the pause wins, nothing resolves
        let events = tick(
            &mut state,
            &TickInput {
                answer: answer.clone(),
                pause: true,
                ..Default::default()
            },
        );
        assert_eq!(events, vec![GameEvent::Paused]);
        assert!(state.challenge.is_awaiting());

        // Still paused
        let events = tick(
            &mut state,
            &TickInput {
                answer: answer.clone(),
                ..Default::default()
            },
        );
        assert!(events.is_empty());
        assert!(state.challenge.is_awaiting());

        // Resume and answer in one tick
        let events = tick(
            &mut state,
            &TickInput {
                answer,
                pause: true,
                ..Default::default()
            },
        );
        assert_eq!(events[0], GameEvent::Resumed);
        assert!(matches!(events[1], GameEvent::Correct { .. }));
        assert!(!state.challenge.is_awaiting());
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999, Settings::default());
        let mut state2 = GameState::new(99999, Settings::default());

        let input = TickInput {
            keys: KeyState {
                right: true,
                ..Default::default()
            },
            ..Default::default()
        };
        for _ in 0..300 {
            let e1 = tick(&mut state1, &input);
            let e2 = tick(&mut state2, &input);
            assert_eq!(e1, e2);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.enemy, state2.enemy);
        assert_eq!(state1.player, state2.player);
    }
}
