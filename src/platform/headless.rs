//! Headless collaborators
//!
//! Used by the native demo binary and by tests: a prompt that answers from a
//! script, a notifier that logs, and a simple autopilot for the keys.

use std::collections::VecDeque;

use super::{Banner, Notifier, PromptHost, PromptRequest};
use crate::sim::{GameState, KeyState, Operator, Response};

/// Prompt host that answers through a callback after a fixed delay
pub struct ScriptedPrompt<F> {
    respond: F,
    /// Polls to wait before the answer is handed back
    pub delay_polls: u32,
    pending: Option<(u32, Response)>,
    /// Every request presented so far
    pub presented: Vec<PromptRequest>,
}

impl<F> ScriptedPrompt<F>
where
    F: FnMut(&PromptRequest) -> Response,
{
    pub fn new(delay_polls: u32, respond: F) -> Self {
        Self {
            respond,
            delay_polls,
            pending: None,
            presented: Vec::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }
}

impl<F> PromptHost for ScriptedPrompt<F>
where
    F: FnMut(&PromptRequest) -> Response,
{
    fn present(&mut self, request: &PromptRequest) {
        let response = (self.respond)(request);
        self.pending = Some((self.delay_polls, response));
        self.presented.push(request.clone());
    }

    fn poll(&mut self) -> Option<Response> {
        match self.pending.take() {
            Some((0, response)) => Some(response),
            Some((wait, response)) => {
                self.pending = Some((wait - 1, response));
                None
            }
            None => None,
        }
    }

    fn close(&mut self) {
        self.pending = None;
    }
}

/// Responses replayed in order; dismisses once the script runs out
pub fn replay(script: impl IntoIterator<Item = Response>) -> impl FnMut(&PromptRequest) -> Response {
    let mut queue: VecDeque<Response> = script.into_iter().collect();
    move |_req| queue.pop_front().unwrap_or(Response::Dismissed)
}

/// Read a question of the form `"a op b = ?"` and work out the answer
pub fn solve_question(question: &str) -> Option<i64> {
    let mut parts = question.split_whitespace();
    let lhs = parts.next()?.parse::<i64>().ok()?;
    let op = Operator::from_symbol(parts.next()?)?;
    let rhs = parts.next()?.parse::<i64>().ok()?;
    Some(op.apply(lhs, rhs))
}

/// Notifier that logs banners and keeps them for inspection
#[derive(Debug, Default)]
pub struct LogNotifier {
    pub history: Vec<Banner>,
}

impl Notifier for LogNotifier {
    fn notify(&mut self, banner: &Banner) {
        log::info!("[{:?}] {}", banner.kind, banner.text);
        self.history.push(banner.clone());
    }
}

/// Steers the player under the falling enemy
pub fn autopilot(state: &GameState) -> KeyState {
    let player = state.player.rect.center();
    let enemy = state.enemy.rect.center();
    let dead_zone = state.player.speed;
    KeyState {
        left: enemy.x < player.x - dead_zone,
        right: enemy.x > player.x + dead_zone,
        up: false,
        down: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_scripted_prompt_delay() {
        let mut prompt = ScriptedPrompt::new(2, |_req: &PromptRequest| Response::text("7"));
        assert!(prompt.poll().is_none());

        prompt.present(&PromptRequest::for_question("3 + 4 = ?"));
        assert!(prompt.is_open());
        assert!(prompt.poll().is_none());
        assert!(prompt.poll().is_none());
        assert_eq!(prompt.poll(), Some(Response::text("7")));
        assert!(prompt.poll().is_none());
        assert_eq!(prompt.presented.len(), 1);
    }

    #[test]
    fn test_close_drops_pending_answer() {
        let mut prompt = ScriptedPrompt::new(0, replay([Response::text("1")]));
        prompt.present(&PromptRequest::for_question("1 * 1 = ?"));
        prompt.close();
        assert!(prompt.poll().is_none());
    }

    #[test]
    fn test_replay_runs_out() {
        let mut respond = replay([Response::text("1")]);
        let req = PromptRequest::for_question("q");
        assert_eq!(respond(&req), Response::text("1"));
        assert_eq!(respond(&req), Response::Dismissed);
    }

    #[test]
    fn test_solve_question() {
        assert_eq!(solve_question("12 / 5 = ?"), Some(2));
        assert_eq!(solve_question("3 - 9 = ?"), Some(-6));
        assert_eq!(solve_question("2 ^ 3 = ?"), Some(8));
        assert_eq!(solve_question("what?"), None);
    }

    #[test]
    fn test_autopilot_follows_enemy() {
        let mut state = GameState::new(5, Settings::default());
        state.enemy.rect.x = 10.0;
        let keys = autopilot(&state);
        assert!(keys.left && !keys.right);

        state.enemy.rect.x = state.player.rect.x;
        assert_eq!(autopilot(&state), KeyState::default());
    }
}
