//! Game state machine
//!
//! Owns attempts, locked and revealed letters, the lifeline budget and the
//! game status. The only mutations are guess submission, lifeline reveals and
//! edits to the in-progress input row.

use super::error::GuessError;
use super::letters::{LockedLetters, RevealedLetters};
use super::policy::GuessPolicy;
use super::reveal::{LIFELINE_BUDGET, RevealSettings, compute_initial_locks, pick_lifeline_position};
use super::Lexicon;
use crate::core::{Feedback, Word};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Characters accepted as an empty slot in positional input
const BLANKS: &[char] = &['_', '.', ' ', '?'];

/// Lifecycle of a single puzzle
///
/// `Playing` moves to exactly one of `Won` or `Lost`, and never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Playing)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Playing => "playing",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }
}

/// One submitted guess with its feedback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub word: Word,
    pub feedback: Feedback,
}

/// The committed result of an accepted guess
///
/// Presentation (tile flips, toasts) is sequenced off this value after the
/// state has already changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Number of attempts made, including this one
    pub attempt_index: usize,
    pub guess: Word,
    pub feedback: Feedback,
    /// Positions that became locked because of this guess
    pub newly_locked: Vec<usize>,
    pub status: GameStatus,
}

/// Everything needed to rebuild a state from storage
pub(crate) struct StateParts {
    pub secret: Word,
    pub clue: Option<String>,
    pub attempts: Vec<Attempt>,
    pub locked: LockedLetters,
    pub revealed: RevealedLetters,
    pub status: GameStatus,
    pub reveals_remaining: u8,
    pub max_guesses: usize,
    pub current_guess: Vec<Option<char>>,
}

/// Full engine state for one puzzle
#[derive(Debug, Clone)]
pub struct GameState {
    secret: Word,
    clue: Option<String>,
    attempts: Vec<Attempt>,
    locked: LockedLetters,
    revealed: RevealedLetters,
    status: GameStatus,
    reveals_remaining: u8,
    max_guesses: usize,
    current_guess: Vec<Option<char>>,
    last_error: Option<GuessError>,
}

impl GameState {
    /// Start a puzzle with explicit initial locks
    #[must_use]
    pub fn new(
        secret: Word,
        clue: Option<String>,
        initial_locks: LockedLetters,
        max_guesses: usize,
    ) -> Self {
        let length = secret.len();
        Self {
            secret,
            clue,
            attempts: Vec::new(),
            locked: initial_locks,
            revealed: RevealedLetters::new(),
            status: GameStatus::Playing,
            reveals_remaining: LIFELINE_BUDGET,
            max_guesses: max_guesses.max(1),
            current_guess: vec![None; length],
            last_error: None,
        }
    }

    /// Start a puzzle, computing pre-reveals and the guess budget from settings
    #[must_use]
    pub fn fresh(
        secret: Word,
        clue: Option<String>,
        reveal: &RevealSettings,
        policy: &GuessPolicy,
    ) -> Self {
        let locks = compute_initial_locks(&secret, reveal);
        let max_guesses = policy.max_guesses(locks.len());
        Self::new(secret, clue, locks, max_guesses)
    }

    pub(crate) fn from_parts(parts: StateParts) -> Self {
        let length = parts.secret.len();
        let mut current_guess = parts.current_guess;
        current_guess.resize(length, None);
        Self {
            secret: parts.secret,
            clue: parts.clue,
            attempts: parts.attempts,
            locked: parts.locked,
            revealed: parts.revealed,
            status: parts.status,
            reveals_remaining: parts.reveals_remaining,
            max_guesses: parts.max_guesses.max(1),
            current_guess,
            last_error: None,
        }
    }

    #[must_use]
    pub fn secret(&self) -> &Word {
        &self.secret
    }

    #[must_use]
    pub fn word_length(&self) -> usize {
        self.secret.len()
    }

    #[must_use]
    pub fn clue(&self) -> Option<&str> {
        self.clue.as_deref()
    }

    #[must_use]
    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    /// Number of accepted guesses so far
    #[must_use]
    pub fn attempt_index(&self) -> usize {
        self.attempts.len()
    }

    #[must_use]
    pub fn locked(&self) -> &LockedLetters {
        &self.locked
    }

    #[must_use]
    pub fn revealed(&self) -> &RevealedLetters {
        &self.revealed
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn reveals_remaining(&self) -> u8 {
        self.reveals_remaining
    }

    #[must_use]
    pub fn max_guesses(&self) -> usize {
        self.max_guesses
    }

    #[must_use]
    pub fn guesses_left(&self) -> usize {
        self.max_guesses.saturating_sub(self.attempts.len())
    }

    /// Transient error from the last rejected action, if any
    #[must_use]
    pub fn last_error(&self) -> Option<&GuessError> {
        self.last_error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Letter the player does not need to type at `position`
    ///
    /// Locked letters come first; a lifeline reveal fills the slot otherwise.
    #[must_use]
    pub fn fixed_letter(&self, position: usize) -> Option<char> {
        self.locked.get(position).or_else(|| {
            self.revealed
                .contains(position)
                .then(|| char::from(self.secret.char_at(position)))
        })
    }

    fn open_positions(&self) -> Vec<usize> {
        (0..self.word_length())
            .filter(|&i| self.fixed_letter(i).is_none())
            .collect()
    }

    /// In-progress input, one slot per position (fixed positions are `None`)
    #[must_use]
    pub fn current_guess(&self) -> &[Option<char>] {
        &self.current_guess
    }

    /// Input row as displayed: fixed letters overlaid on typed ones
    #[must_use]
    pub fn display_row(&self) -> Vec<Option<char>> {
        (0..self.word_length())
            .map(|i| self.fixed_letter(i).or(self.current_guess[i]))
            .collect()
    }

    /// Type a letter into the next open slot
    ///
    /// Returns false when the row is full, the key is not a letter, or the
    /// game is over.
    pub fn type_letter(&mut self, letter: char) -> bool {
        if self.status.is_terminal() || !letter.is_ascii_alphabetic() {
            return false;
        }
        let next = self
            .open_positions()
            .into_iter()
            .find(|&i| self.current_guess[i].is_none());
        match next {
            Some(i) => {
                self.current_guess[i] = Some(letter.to_ascii_lowercase());
                self.last_error = None;
                true
            }
            None => false,
        }
    }

    /// Remove the most recently typed letter
    pub fn backspace(&mut self) -> bool {
        let last = self
            .open_positions()
            .into_iter()
            .rev()
            .find(|&i| self.current_guess[i].is_some());
        match last {
            Some(i) => {
                self.current_guess[i] = None;
                true
            }
            None => false,
        }
    }

    pub fn clear_input(&mut self) {
        self.current_guess.iter_mut().for_each(|slot| *slot = None);
    }

    /// Build the complete guess by overlaying typed input onto fixed letters
    ///
    /// `raw` is either positional (exactly one character per position, with
    /// `_`, `.`, `?` or space for a blank) or just the letters for the open
    /// positions, in order. Fixed letters always win at their position.
    ///
    /// # Errors
    /// Returns `GuessError` if a slot is left empty, too many letters are
    /// typed, or a non-letter shows up.
    pub fn compose_guess(&self, raw: &str) -> Result<String, GuessError> {
        let length = self.word_length();
        let typed: Vec<char> = raw.trim_end_matches('\n').chars().collect();

        if let Some(&bad) = typed
            .iter()
            .find(|c| !c.is_ascii_alphabetic() && !BLANKS.contains(c))
        {
            return Err(GuessError::InvalidCharacter(bad));
        }

        let mut slots: Vec<Option<char>> = (0..length).map(|i| self.fixed_letter(i)).collect();
        let open = self.open_positions();

        if typed.len() == length {
            for (i, ch) in typed.into_iter().enumerate() {
                if slots[i].is_none() && ch.is_ascii_alphabetic() {
                    slots[i] = Some(ch);
                }
            }
        } else {
            let letters: Vec<char> = typed.into_iter().filter(char::is_ascii_alphabetic).collect();
            if letters.len() > open.len() {
                return Err(GuessError::TooManyLetters {
                    typed: letters.len(),
                    open: open.len(),
                });
            }
            for (&pos, ch) in open.iter().zip(letters) {
                slots[pos] = Some(ch);
            }
        }

        let missing: Vec<usize> = slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_none())
            .map(|(i, _)| i)
            .collect();
        if !missing.is_empty() {
            return Err(GuessError::IncompleteGuess { missing });
        }

        Ok(slots
            .into_iter()
            .flatten()
            .map(|c| c.to_ascii_lowercase())
            .collect())
    }

    /// Submit the in-progress input row
    ///
    /// # Errors
    /// See [`GameState::submit_guess`].
    pub fn submit_current<L: Lexicon + ?Sized>(
        &mut self,
        lexicon: &L,
    ) -> Result<Transition, GuessError> {
        let raw: String = self
            .current_guess
            .iter()
            .map(|slot| slot.unwrap_or('_'))
            .collect();
        self.submit_guess(&raw, lexicon)
    }

    /// Submit a guess
    ///
    /// On success the guess is scored, recorded, correct positions are locked
    /// and the status is advanced. On failure nothing but the transient error
    /// changes.
    ///
    /// # Errors
    /// Returns `GuessError` for incomplete input, words missing from the
    /// lexicon, or a game that is already over.
    pub fn submit_guess<L: Lexicon + ?Sized>(
        &mut self,
        raw: &str,
        lexicon: &L,
    ) -> Result<Transition, GuessError> {
        match self.accept(raw, lexicon) {
            Ok(transition) => {
                self.last_error = None;
                Ok(transition)
            }
            Err(err) => {
                log::debug!("guess rejected: {err}");
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    fn accept<L: Lexicon + ?Sized>(
        &mut self,
        raw: &str,
        lexicon: &L,
    ) -> Result<Transition, GuessError> {
        if self.status.is_terminal() {
            return Err(GuessError::GameOver);
        }

        let text = self.compose_guess(raw)?;
        let guess = Word::new(&text).map_err(|_| GuessError::NotInDictionary(text.clone()))?;

        if guess != self.secret && !lexicon.contains(guess.text()) {
            return Err(GuessError::NotInDictionary(text));
        }

        let feedback = Feedback::calculate(&guess, &self.secret)
            .map_err(|_| GuessError::NotInDictionary(text.clone()))?;

        let newly_locked: Vec<usize> = feedback
            .correct_positions()
            .filter(|&i| self.locked.lock(i, char::from(guess.char_at(i))))
            .collect();

        self.attempts.push(Attempt {
            word: guess.clone(),
            feedback: feedback.clone(),
        });
        self.clear_input();

        if feedback.is_perfect() {
            self.status = GameStatus::Won;
        } else if self.attempts.len() >= self.max_guesses {
            self.status = GameStatus::Lost;
        }

        log::debug!(
            "attempt {} {} -> {} ({})",
            self.attempts.len(),
            guess,
            feedback,
            self.status.as_str()
        );

        Ok(Transition {
            attempt_index: self.attempts.len(),
            guess,
            feedback,
            newly_locked,
            status: self.status,
        })
    }

    /// Spend the lifeline on a random unknown position
    ///
    /// No-op when the budget is spent, the game is over, or every position is
    /// already known. Returns the revealed position.
    pub fn request_lifeline_reveal<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<usize> {
        if self.reveals_remaining == 0 || self.status.is_terminal() {
            return None;
        }

        let position =
            pick_lifeline_position(self.word_length(), &self.locked, &self.revealed, rng)?;

        self.revealed.insert(position);
        self.reveals_remaining -= 1;
        self.current_guess[position] = None;
        log::debug!("lifeline revealed position {position}");
        Some(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LetterStatus;
    use crate::engine::reveal::VowelSelection;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const WORDS: &[&str] = &[
        "crane", "slate", "bunny", "pious", "might", "world", "fjord", "adieu", "stare",
        "trace", "crate",
    ];

    fn game(secret: &str) -> GameState {
        GameState::new(Word::new(secret).unwrap(), None, LockedLetters::new(), 6)
    }

    #[test]
    fn crane_is_won_on_second_guess() {
        let mut state = game("crane");

        let first = state.submit_guess("slate", WORDS).unwrap();
        assert_eq!(
            first.feedback.statuses(),
            &[
                LetterStatus::Absent,
                LetterStatus::Absent,
                LetterStatus::Correct,
                LetterStatus::Absent,
                LetterStatus::Correct
            ]
        );
        assert_eq!(first.newly_locked, vec![2, 4]);
        assert_eq!(state.status(), GameStatus::Playing);

        let second = state.submit_guess("CRANE", WORDS).unwrap();
        assert!(second.feedback.is_perfect());
        assert_eq!(state.status(), GameStatus::Won);
        assert_eq!(state.attempt_index(), 2);
        assert!(state.locked().covers(5));
    }

    #[test]
    fn bunny_is_lost_after_six_misses() {
        let mut state = game("bunny");
        for (i, guess) in ["crane", "slate", "pious", "might", "world", "fjord"]
            .iter()
            .enumerate()
        {
            assert_eq!(state.status(), GameStatus::Playing);
            state.submit_guess(guess, WORDS).unwrap();
            assert_eq!(state.attempt_index(), i + 1);
        }
        assert_eq!(state.status(), GameStatus::Lost);
        assert_eq!(
            state.submit_guess("bunny", WORDS),
            Err(GuessError::GameOver)
        );
        assert_eq!(state.attempt_index(), 6);
    }

    #[test]
    fn unknown_word_is_not_recorded() {
        let mut state = game("crane");
        let err = state.submit_guess("zzzzz", WORDS).unwrap_err();
        assert_eq!(err, GuessError::NotInDictionary("zzzzz".to_string()));
        assert_eq!(state.attempt_index(), 0);
        assert_eq!(state.last_error(), Some(&err));
        assert_eq!(state.status(), GameStatus::Playing);
    }

    #[test]
    fn incomplete_guess_is_not_recorded() {
        let mut state = game("crane");
        assert_eq!(
            state.submit_guess("cra", WORDS),
            Err(GuessError::IncompleteGuess {
                missing: vec![3, 4]
            })
        );
        assert_eq!(
            state.submit_guess("cr_ne", WORDS),
            Err(GuessError::IncompleteGuess { missing: vec![2] })
        );
        assert_eq!(state.attempt_index(), 0);
    }

    #[test]
    fn secret_is_always_accepted() {
        let mut state = game("fjord");
        assert!(state.submit_guess("fjord", &[] as &[&str]).is_ok());
        assert_eq!(state.status(), GameStatus::Won);
    }

    #[test]
    fn locked_letters_overlay_typed_input() {
        let locks: LockedLetters = [(2, 'a'), (4, 'e')].into_iter().collect();
        let mut state = GameState::new(Word::new("crane").unwrap(), None, locks, 6);

        // Only the open positions typed
        assert_eq!(state.compose_guess("crn").unwrap(), "crane");
        // Positional input: locked wins over whatever was typed there
        assert_eq!(state.compose_guess("srxtx").unwrap(), "srate");
        assert_eq!(
            state.compose_guess("crnxxx"),
            Err(GuessError::TooManyLetters { typed: 6, open: 3 })
        );

        let err = state.submit_guess("stt", WORDS).unwrap_err();
        assert_eq!(err, GuessError::NotInDictionary("state".to_string()));
    }

    #[test]
    fn relocking_same_letter_is_idempotent() {
        let mut state = game("crane");
        state.submit_guess("slate", WORDS).unwrap();
        let locked_before = state.locked().clone();

        let transition = state.submit_guess("trace", WORDS).unwrap();
        assert!(transition.feedback.status_at(2) == LetterStatus::Correct);
        assert!(!transition.newly_locked.contains(&2));
        for (pos, letter) in locked_before.iter() {
            assert_eq!(state.locked().get(pos), Some(letter));
        }
    }

    #[test]
    fn locked_count_never_decreases() {
        let mut state = game("crane");
        let mut previous = 0;
        for guess in ["crate", "slate", "adieu", "stare"] {
            state.submit_guess(guess, WORDS).unwrap();
            assert!(state.locked().len() >= previous);
            previous = state.locked().len();
        }
    }

    #[test]
    fn lifeline_budget_is_single_use() {
        let mut state = game("crane");
        let mut rng = StdRng::seed_from_u64(42);

        let position = state.request_lifeline_reveal(&mut rng).unwrap();
        assert!(state.revealed().contains(position));
        assert_eq!(state.reveals_remaining(), 0);

        let snapshot = state.revealed().clone();
        assert_eq!(state.request_lifeline_reveal(&mut rng), None);
        assert_eq!(state.revealed(), &snapshot);
    }

    #[test]
    fn lifeline_fills_the_slot_but_does_not_lock() {
        let mut state = game("crane");
        let mut rng = StdRng::seed_from_u64(3);
        let position = state.request_lifeline_reveal(&mut rng).unwrap();

        assert!(!state.locked().contains(position));
        assert_eq!(
            state.fixed_letter(position),
            Some(char::from(b"crane"[position]))
        );
        assert_eq!(state.compose_guess("crane").unwrap(), "crane");
    }

    #[test]
    fn lifeline_refused_after_game_over() {
        let mut state = game("crane");
        state.submit_guess("crane", WORDS).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(state.request_lifeline_reveal(&mut rng), None);
        assert_eq!(state.reveals_remaining(), 1);
    }

    #[test]
    fn typing_skips_fixed_positions() {
        let reveal = RevealSettings {
            reveal_vowels: true,
            vowel_count: 2,
            selection: VowelSelection::Leftmost,
        };
        let mut state = GameState::fresh(
            Word::new("crane").unwrap(),
            None,
            &reveal,
            &GuessPolicy::default(),
        );
        for c in ['c', 'r', 'n', 'x'] {
            state.type_letter(c);
        }
        assert_eq!(
            state.display_row(),
            vec![Some('c'), Some('r'), Some('a'), Some('n'), Some('e')]
        );
        assert!(state.backspace());
        assert_eq!(state.current_guess()[3], None);

        state.type_letter('n');
        let transition = state.submit_current(WORDS).unwrap();
        assert!(transition.feedback.is_perfect());
        assert!(state.current_guess().iter().all(Option::is_none));
    }

    #[test]
    fn invalid_character_rejected() {
        let state = game("crane");
        assert_eq!(
            state.compose_guess("cr4ne"),
            Err(GuessError::InvalidCharacter('4'))
        );
    }
}
