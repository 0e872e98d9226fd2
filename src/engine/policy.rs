//! Maximum-guess policy
//!
//! The guess budget may depend on how much help the player was given up
//! front. Both variants are selectable from settings.

use serde::{Deserialize, Serialize};

/// Default number of guesses per puzzle
pub const DEFAULT_MAX_GUESSES: usize = 6;

/// Rule deciding how many attempts a puzzle allows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GuessPolicy {
    /// Same budget regardless of pre-reveals
    Fixed { max_guesses: usize },
    /// Budget shifted by the number of pre-revealed letters
    ///
    /// A negative `per_reveal` takes guesses away for every letter shown up
    /// front; a positive one hands out bonus guesses. Never drops below one.
    RevealAdjusted { base: usize, per_reveal: i32 },
}

impl Default for GuessPolicy {
    fn default() -> Self {
        Self::Fixed {
            max_guesses: DEFAULT_MAX_GUESSES,
        }
    }
}

impl GuessPolicy {
    /// Maximum number of attempts given the count of pre-revealed letters
    #[must_use]
    pub fn max_guesses(&self, prerevealed: usize) -> usize {
        match *self {
            Self::Fixed { max_guesses } => max_guesses.max(1),
            Self::RevealAdjusted { base, per_reveal } => {
                let shift = i64::from(per_reveal) * prerevealed as i64;
                let adjusted = base as i64 + shift;
                adjusted.max(1) as usize
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_ignores_reveals() {
        let policy = GuessPolicy::default();
        assert_eq!(policy.max_guesses(0), 6);
        assert_eq!(policy.max_guesses(3), 6);
    }

    #[test]
    fn reveal_penalty_reduces_budget() {
        let policy = GuessPolicy::RevealAdjusted {
            base: 6,
            per_reveal: -1,
        };
        assert_eq!(policy.max_guesses(2), 4);
        assert_eq!(policy.max_guesses(10), 1);
    }

    #[test]
    fn reveal_bonus_increases_budget() {
        let policy = GuessPolicy::RevealAdjusted {
            base: 6,
            per_reveal: 1,
        };
        assert_eq!(policy.max_guesses(1), 7);
    }

    #[test]
    fn policy_round_trips_through_json() {
        let json = r#"{"kind":"reveal_adjusted","base":6,"per_reveal":-1}"#;
        let policy: GuessPolicy = serde_json::from_str(json).unwrap();
        assert_eq!(
            policy,
            GuessPolicy::RevealAdjusted {
                base: 6,
                per_reveal: -1
            }
        );
    }
}
