//! Property tests for scoring, locking and keyboard aggregation

use daily_wordle::core::{LetterStatus, Word, evaluate};
use daily_wordle::engine::{GameState, LockedLetters, Lexicon, aggregate};
use proptest::prelude::*;

/// Accepts every well-formed word
struct AnyWord;

impl Lexicon for AnyWord {
    fn contains(&self, _word: &str) -> bool {
        true
    }
}

/// Words over a small alphabet so duplicate letters are common
fn word(length: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(proptest::sample::select(vec!['a', 'b', 'c', 'd', 'e']), length)
        .prop_map(|chars| chars.into_iter().collect())
}

fn word_pair() -> impl Strategy<Value = (String, String)> {
    (5usize..=7).prop_flat_map(|length| (word(length), word(length)))
}

fn game() -> impl Strategy<Value = (String, Vec<String>)> {
    (5usize..=7).prop_flat_map(|length| {
        (
            word(length),
            proptest::collection::vec(word(length), 1..8),
        )
    })
}

proptest! {
    #[test]
    fn scoring_never_overcounts_a_letter((guess, secret) in word_pair()) {
        let feedback = evaluate(&guess, &secret).unwrap();
        for letter in guess.chars() {
            let credited = guess
                .chars()
                .zip(feedback.statuses())
                .filter(|&(c, &status)| c == letter && status != LetterStatus::Absent)
                .count();
            let available = secret.chars().filter(|&c| c == letter).count();
            prop_assert!(credited <= available, "{guess} vs {secret}: {letter} credited {credited} times");
        }
    }

    #[test]
    fn correct_marks_match_positions((guess, secret) in word_pair()) {
        let feedback = evaluate(&guess, &secret).unwrap();
        for (i, (g, s)) in guess.chars().zip(secret.chars()).enumerate() {
            prop_assert_eq!(feedback.status_at(i) == LetterStatus::Correct, g == s);
        }
    }

    #[test]
    fn a_word_scores_all_correct_against_itself(secret in (5usize..=7).prop_flat_map(word)) {
        let feedback = evaluate(&secret, &secret).unwrap();
        prop_assert!(feedback.is_perfect());
    }

    #[test]
    fn locks_only_grow((secret, guesses) in game()) {
        let mut state = GameState::new(Word::new(&secret).unwrap(), None, LockedLetters::new(), 6);
        let mut previous = state.locked().clone();

        for guess in &guesses {
            let Ok(transition) = state.submit_guess(guess, &AnyWord) else {
                prop_assert!(state.status().is_terminal());
                continue;
            };

            for (position, letter) in previous.iter() {
                prop_assert_eq!(state.locked().get(position), Some(letter));
            }
            for position in transition.feedback.correct_positions() {
                prop_assert!(state.locked().contains(position));
            }
            prop_assert_eq!(state.attempt_index(), state.attempts().len());
            previous = state.locked().clone();
        }
    }

    #[test]
    fn keyboard_never_downgrades((secret, guesses) in game()) {
        let mut state = GameState::new(Word::new(&secret).unwrap(), None, LockedLetters::new(), 8);
        for guess in &guesses {
            let _ = state.submit_guess(guess, &AnyWord);
        }

        let attempts = state.attempts();
        let mut earlier = aggregate(
            &LockedLetters::new(),
            state.revealed(),
            state.secret(),
            &[],
        );
        for end in 1..=attempts.len() {
            let later = aggregate(
                &LockedLetters::new(),
                state.revealed(),
                state.secret(),
                &attempts[..end],
            );
            for letter in 'a'..='e' {
                if let Some(before) = earlier.status(letter) {
                    let after = later.status(letter);
                    prop_assert!(after >= Some(before), "{letter} went from {before:?} to {after:?}");
                }
            }
            earlier = later;
        }

        // Folding attempts in reverse gives the same keyboard
        let reversed: Vec<_> = attempts.iter().rev().cloned().collect();
        let forward = aggregate(state.locked(), state.revealed(), state.secret(), attempts);
        let backward = aggregate(state.locked(), state.revealed(), state.secret(), &reversed);
        prop_assert_eq!(forward, backward);
    }
}
