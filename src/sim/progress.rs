//! Score, level and the level-up rules

use serde::{Deserialize, Serialize};

/// How the level advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelUpPolicy {
    /// Level up once `score >= level * points_per_level`
    ScoreThreshold { points_per_level: u64 },
    /// Level up every `required` consecutive correct answers; clearing the
    /// streak at `max_level` wins the game and starts over
    Streak { required: u32, max_level: u32 },
}

impl Default for LevelUpPolicy {
    fn default() -> Self {
        LevelUpPolicy::ScoreThreshold {
            points_per_level: 50,
        }
    }
}

impl LevelUpPolicy {
    pub fn streak() -> Self {
        LevelUpPolicy::Streak {
            required: 8,
            max_level: 10,
        }
    }
}

/// What a correct answer did to the level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    None,
    LevelUp(u32),
    Won,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub score: u64,
    pub level: u32,
    /// Consecutive correct answers (streak policy only)
    pub streak: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            streak: 0,
        }
    }
}

impl Progress {
    /// Bank a correct answer's reward and apply the level-up rule
    pub fn record_correct(&mut self, reward: u32, policy: &LevelUpPolicy) -> Advance {
        self.score += reward as u64;

        match *policy {
            LevelUpPolicy::ScoreThreshold { points_per_level } => {
                if self.score >= self.level as u64 * points_per_level {
                    self.level += 1;
                    Advance::LevelUp(self.level)
                } else {
                    Advance::None
                }
            }
            LevelUpPolicy::Streak {
                required,
                max_level,
            } => {
                self.streak += 1;
                if self.streak < required {
                    return Advance::None;
                }
                self.streak = 0;
                if self.level < max_level {
                    self.level += 1;
                    Advance::LevelUp(self.level)
                } else {
                    *self = Self::default();
                    Advance::Won
                }
            }
        }
    }

    /// A wrong answer breaks the streak; the score stays
    pub fn record_wrong(&mut self) {
        self.streak = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_threshold() {
        let policy = LevelUpPolicy::default();
        let mut progress = Progress {
            score: 44,
            ..Default::default()
        };

        assert_eq!(progress.record_correct(5, &policy), Advance::None);
        assert_eq!(progress.score, 49);
        assert_eq!(progress.level, 1);

        assert_eq!(progress.record_correct(5, &policy), Advance::LevelUp(2));
        assert_eq!(progress.level, 2);

        // Level 2 needs 100
        assert_eq!(progress.record_correct(15, &policy), Advance::None);
        assert_eq!(progress.level, 2);
    }

    #[test]
    fn test_streak_levels_up_after_eight() {
        let policy = LevelUpPolicy::streak();
        for level in 1..=9 {
            let mut progress = Progress {
                level,
                ..Default::default()
            };
            for _ in 0..7 {
                assert_eq!(progress.record_correct(5, &policy), Advance::None);
            }
            assert_eq!(progress.record_correct(5, &policy), Advance::LevelUp(level + 1));
            assert_eq!(progress.streak, 0);
            assert_eq!(progress.score, 40);
        }
    }

    #[test]
    fn test_streak_win_resets() {
        let policy = LevelUpPolicy::streak();
        let mut progress = Progress {
            score: 900,
            level: 10,
            streak: 7,
        };
        assert_eq!(progress.record_correct(10, &policy), Advance::Won);
        assert_eq!(progress, Progress::default());
        assert_eq!((progress.level, progress.score, progress.streak), (1, 0, 0));
    }

    #[test]
    fn test_wrong_answer_breaks_streak_only() {
        let policy = LevelUpPolicy::streak();
        let mut progress = Progress::default();
        for _ in 0..5 {
            progress.record_correct(5, &policy);
        }
        progress.record_wrong();
        assert_eq!(progress.streak, 0);
        assert_eq!(progress.score, 25);
        assert_eq!(progress.level, 1);
    }
}
