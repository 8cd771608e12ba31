//! Challenge lifecycle: Idle -> AwaitingAnswer -> Idle
//!
//! Only one challenge can be open at a time. The answer arrives later as a
//! [`Response`] from whatever prompt host is showing the question.

use super::problem::Problem;

/// What the prompt host collected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Raw text typed by the player
    Text(String),
    /// The prompt was closed without an answer
    Dismissed,
}

impl Response {
    pub fn text(s: impl Into<String>) -> Self {
        Response::Text(s.into())
    }
}

/// Outcome of judging a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub problem: Problem,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChallengePhase {
    #[default]
    Idle,
    AwaitingAnswer(Problem),
}

impl ChallengePhase {
    pub fn is_awaiting(&self) -> bool {
        matches!(self, ChallengePhase::AwaitingAnswer(_))
    }

    pub fn pending(&self) -> Option<&Problem> {
        match self {
            ChallengePhase::AwaitingAnswer(p) => Some(p),
            ChallengePhase::Idle => None,
        }
    }

    /// Open a challenge. Refused (returns false) while one is already open.
    pub fn begin(&mut self, problem: Problem) -> bool {
        if self.is_awaiting() {
            return false;
        }
        *self = ChallengePhase::AwaitingAnswer(problem);
        true
    }

    /// Judge a response and return to Idle. Responses with nothing pending
    /// are ignored.
    pub fn resolve(&mut self, response: &Response) -> Option<Verdict> {
        let ChallengePhase::AwaitingAnswer(problem) = std::mem::take(self) else {
            return None;
        };
        let correct = match response {
            Response::Text(raw) => problem.is_correct(raw),
            Response::Dismissed => false,
        };
        Some(Verdict { problem, correct })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::problem::Operator;

    #[test]
    fn test_single_open_challenge() {
        let mut phase = ChallengePhase::default();
        assert!(phase.begin(Problem::new(Operator::Add, 2, 2)));
        assert!(!phase.begin(Problem::new(Operator::Mul, 3, 3)));
        assert_eq!(phase.pending().map(|p| p.answer), Some(4));
    }

    #[test]
    fn test_resolve_correct_and_wrong() {
        let mut phase = ChallengePhase::default();
        phase.begin(Problem::new(Operator::Mul, 6, 7));
        let verdict = phase.resolve(&Response::text(" 42 ")).unwrap();
        assert!(verdict.correct);
        assert!(!phase.is_awaiting());

        phase.begin(Problem::new(Operator::Mul, 6, 7));
        let verdict = phase.resolve(&Response::text("forty-two")).unwrap();
        assert!(!verdict.correct);

        phase.begin(Problem::new(Operator::Mul, 6, 7));
        let verdict = phase.resolve(&Response::Dismissed).unwrap();
        assert!(!verdict.correct);
    }

    #[test]
    fn test_resolve_when_idle_is_ignored() {
        let mut phase = ChallengePhase::Idle;
        assert!(phase.resolve(&Response::text("1")).is_none());
    }
}
