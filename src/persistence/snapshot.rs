//! Stored snapshot schema and versioned migration
//!
//! Snapshots are JSON objects with camelCase keys. Version 1 snapshots have no
//! `version` field, may name the date `currentDay`, may store
//! `revealedLetters` as an object keyed by position (`{"2": true}`), may
//! store `lockedLetters` as an array, and may carry uppercase letters.
//! [`Snapshot::from_json`] rewrites those shapes into the current one before
//! the typed schema is parsed, so the rest of the crate only ever sees integer
//! positions and lowercase letters.

use crate::core::{Feedback, Word};
use crate::engine::policy::DEFAULT_MAX_GUESSES;
use crate::engine::reveal::LIFELINE_BUDGET;
use crate::engine::{
    Attempt, GameState, GameStatus, LockedLetters, RevealedLetters, StateParts,
};
use crate::puzzle::PuzzleDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 2;

/// Why a stored snapshot could not be used
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u64, supported: u32 },

    #[error("invalid snapshot: {0}")]
    Invalid(String),
}

fn invalid(message: impl Into<String>) -> SnapshotError {
    SnapshotError::Invalid(message.into())
}

fn default_reveals() -> u8 {
    LIFELINE_BUDGET
}

/// Persisted form of a daily game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub version: u32,
    pub word_length: usize,
    pub secret_word: String,
    #[serde(default)]
    pub clue: Option<String>,
    #[serde(default)]
    pub attempts: Vec<String>,
    #[serde(default)]
    pub locked_letters: LockedLetters,
    #[serde(default)]
    pub revealed_letters: RevealedLetters,
    pub game_status: GameStatus,
    #[serde(default)]
    pub attempt_index: usize,
    #[serde(default = "default_reveals")]
    pub letter_reveals_remaining: u8,
    /// Puzzle day the snapshot belongs to
    pub date: PuzzleDate,
    /// In-progress input, one entry per position (`""` for an empty slot)
    #[serde(default)]
    pub current_guess: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_guesses: Option<usize>,
}

impl Snapshot {
    /// Capture a game for `date`
    #[must_use]
    pub fn capture(state: &GameState, date: PuzzleDate) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            word_length: state.word_length(),
            secret_word: state.secret().text().to_string(),
            clue: state.clue().map(str::to_string),
            attempts: state
                .attempts()
                .iter()
                .map(|a| a.word.text().to_string())
                .collect(),
            locked_letters: state.locked().clone(),
            revealed_letters: state.revealed().clone(),
            game_status: state.status(),
            attempt_index: state.attempt_index(),
            letter_reveals_remaining: state.reveals_remaining(),
            date,
            current_guess: state
                .current_guess()
                .iter()
                .map(|slot| slot.map(String::from).unwrap_or_default())
                .collect(),
            max_guesses: Some(state.max_guesses()),
        }
    }

    /// Parse stored text, migrating older formats first
    ///
    /// # Errors
    /// Returns `SnapshotError` for invalid JSON, an unknown version, or a
    /// shape that cannot be migrated.
    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        let value: Value = serde_json::from_str(raw)?;
        let value = migrate(value)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Serialize in the current format
    ///
    /// # Errors
    /// Returns `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Rebuild the game, repairing what can be repaired
    ///
    /// Attempts are re-scored against the secret and every correct position is
    /// locked. A stored result is kept even when the attempts do not explain
    /// it, and a won game always ends up with the full solution locked.
    ///
    /// # Errors
    /// Returns `SnapshotError::Invalid` when the snapshot contradicts itself
    /// in a way that cannot be repaired.
    pub fn into_state(self) -> Result<GameState, SnapshotError> {
        let secret = Word::new(self.secret_word.as_str())
            .map_err(|e| invalid(format!("secret word: {e}")))?;
        let length = secret.len();
        if length != self.word_length {
            return Err(invalid(format!(
                "secret has {length} letters, snapshot says {}",
                self.word_length
            )));
        }

        let mut attempts = Vec::with_capacity(self.attempts.len());
        for text in &self.attempts {
            let word = Word::new(text.as_str()).map_err(|e| invalid(format!("attempt: {e}")))?;
            let feedback = Feedback::calculate(&word, &secret)
                .map_err(|e| invalid(format!("attempt {text}: {e}")))?;
            attempts.push(Attempt { word, feedback });
        }

        if let Some(won_at) = attempts.iter().position(|a| a.feedback.is_perfect())
            && won_at + 1 != attempts.len()
        {
            return Err(invalid("attempts continue after a win"));
        }
        let solved = attempts.last().is_some_and(|a| a.feedback.is_perfect());

        let mut locked = LockedLetters::new();
        for (position, letter) in self.locked_letters.iter() {
            if position >= length {
                return Err(invalid(format!("locked position {position} out of range")));
            }
            let letter = letter.to_ascii_lowercase();
            if letter != char::from(secret.char_at(position)) {
                return Err(invalid(format!(
                    "locked letter {letter:?} at {position} disagrees with the secret"
                )));
            }
            locked.lock(position, letter);
        }
        for attempt in &attempts {
            for position in attempt.feedback.correct_positions() {
                locked.lock(position, char::from(attempt.word.char_at(position)));
            }
        }

        if let Some(position) = self.revealed_letters.iter().find(|&p| p >= length) {
            return Err(invalid(format!("revealed position {position} out of range")));
        }
        let revealed = self.revealed_letters;

        if self.attempt_index != attempts.len() {
            log::warn!(
                "snapshot attempt index {} disagrees with {} attempts, using attempts",
                self.attempt_index,
                attempts.len()
            );
        }

        let max_guesses = self.max_guesses.unwrap_or(DEFAULT_MAX_GUESSES).max(1);
        let status = match self.game_status {
            GameStatus::Lost if solved => {
                return Err(invalid("marked lost with a solving attempt"));
            }
            GameStatus::Playing if solved => {
                log::warn!("snapshot was still playing after a solving attempt, marking won");
                GameStatus::Won
            }
            GameStatus::Playing if attempts.len() >= max_guesses => {
                log::warn!("snapshot was still playing with no guesses left, marking lost");
                GameStatus::Lost
            }
            GameStatus::Lost if attempts.len() < max_guesses => {
                log::warn!(
                    "snapshot was lost after {} of {max_guesses} guesses, keeping it lost",
                    attempts.len()
                );
                GameStatus::Lost
            }
            stored => stored,
        };

        if status == GameStatus::Won && !locked.covers(length) {
            log::warn!("won snapshot had incomplete locks, relocking the solution");
            locked = LockedLetters::complete(&secret);
        }

        let budget_left = LIFELINE_BUDGET
            .saturating_sub(u8::try_from(revealed.len()).unwrap_or(u8::MAX));
        let reveals_remaining = self.letter_reveals_remaining.min(budget_left);

        let current_guess = if status.is_terminal() {
            Vec::new()
        } else {
            self.current_guess
                .iter()
                .enumerate()
                .map(|(i, slot)| {
                    slot.chars()
                        .next()
                        .filter(|c| c.is_ascii_alphabetic())
                        .filter(|_| !locked.contains(i) && !revealed.contains(i))
                        .map(|c| c.to_ascii_lowercase())
                })
                .collect()
        };

        Ok(GameState::from_parts(StateParts {
            secret,
            clue: self.clue,
            attempts,
            locked,
            revealed,
            status,
            reveals_remaining,
            max_guesses,
            current_guess,
        }))
    }
}

/// Bring a raw snapshot up to the current version
fn migrate(mut value: Value) -> Result<Value, SnapshotError> {
    let Some(object) = value.as_object_mut() else {
        return Err(invalid("snapshot is not an object"));
    };

    let version = match object.get("version") {
        None | Some(Value::Null) => 1,
        Some(v) => v.as_u64().ok_or_else(|| invalid("version is not a number"))?,
    };
    if version > u64::from(SNAPSHOT_VERSION) {
        return Err(SnapshotError::UnsupportedVersion {
            found: version,
            supported: SNAPSHOT_VERSION,
        });
    }
    if version < 2 {
        log::info!("migrating version {version} snapshot");
        migrate_v1(object)?;
    }

    Ok(value)
}

/// Version 1: loose collection shapes and letter case
fn migrate_v1(object: &mut Map<String, Value>) -> Result<(), SnapshotError> {
    // `currentDay` is the old name of `date`; `date` wins when both exist
    if let Some(day) = object.remove("currentDay")
        && !object.contains_key("date")
    {
        object.insert("date".into(), day);
    }

    let revealed = match object.remove("revealedLetters") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items,
        Some(Value::Object(map)) => {
            let mut positions = Vec::new();
            for (key, flag) in map {
                if !matches!(flag, Value::Null | Value::Bool(false)) {
                    positions.push(Value::from(parse_position(&key)?));
                }
            }
            positions
        }
        Some(_) => return Err(invalid("revealedLetters has an unknown shape")),
    };
    object.insert("revealedLetters".into(), Value::Array(revealed));

    let mut locked = Map::new();
    match object.remove("lockedLetters") {
        None | Some(Value::Null) => {}
        Some(Value::Object(map)) => {
            for (key, letter) in map {
                let letter = letter
                    .as_str()
                    .ok_or_else(|| invalid("locked letter is not a string"))?;
                locked.insert(parse_position(&key)?.to_string(), lowercase(letter));
            }
        }
        Some(Value::Array(items)) => {
            for (position, letter) in items.iter().enumerate() {
                if let Some(letter) = letter.as_str().filter(|s| !s.is_empty()) {
                    locked.insert(position.to_string(), lowercase(letter));
                }
            }
        }
        Some(_) => return Err(invalid("lockedLetters has an unknown shape")),
    }
    object.insert("lockedLetters".into(), Value::Object(locked));

    match object.get_mut("currentGuess") {
        Some(Value::Array(slots)) => {
            for slot in slots.iter_mut() {
                let normalized = match &*slot {
                    Value::String(s) => lowercase(s),
                    _ => Value::String(String::new()),
                };
                *slot = normalized;
            }
        }
        // Typed text as one string, blanks as `_` or space
        Some(Value::String(text)) => {
            let slots = text
                .chars()
                .map(|c| {
                    if c.is_ascii_alphabetic() {
                        Value::String(c.to_ascii_lowercase().to_string())
                    } else {
                        Value::String(String::new())
                    }
                })
                .collect();
            object.insert("currentGuess".into(), Value::Array(slots));
        }
        Some(Value::Null) => {
            object.remove("currentGuess");
        }
        _ => {}
    }

    if let Some(Value::String(status)) = object.get_mut("gameStatus") {
        *status = status.to_lowercase();
    }
    for key in ["secretWord", "attempts"] {
        lowercase_in_place(object.get_mut(key));
    }

    object.insert("version".into(), Value::from(SNAPSHOT_VERSION));
    Ok(())
}

fn parse_position(key: &str) -> Result<usize, SnapshotError> {
    key.trim()
        .parse()
        .map_err(|_| invalid(format!("position key {key:?} is not an integer")))
}

fn lowercase(s: &str) -> Value {
    Value::String(s.to_lowercase())
}

fn lowercase_in_place(value: Option<&mut Value>) {
    match value {
        Some(Value::String(s)) => *s = s.to_lowercase(),
        Some(Value::Array(items)) => {
            for item in items {
                lowercase_in_place(Some(item));
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORDS: &[&str] = &["crane", "slate", "trace", "bunny"];

    fn day() -> PuzzleDate {
        PuzzleDate::from_ymd(2025, 5, 10).unwrap()
    }

    fn played(secret: &str, guesses: &[&str]) -> GameState {
        let mut state = GameState::new(Word::new(secret).unwrap(), None, LockedLetters::new(), 6);
        for guess in guesses {
            state.submit_guess(guess, WORDS).unwrap();
        }
        state
    }

    #[test]
    fn capture_then_parse_is_equivalent() {
        let mut state = played("crane", &["slate"]);
        state.type_letter('x');
        let snapshot = Snapshot::capture(&state, day());
        let json = snapshot.to_json().unwrap();

        let parsed = Snapshot::from_json(&json).unwrap();
        assert_eq!(parsed, snapshot);

        let restored = parsed.into_state().unwrap();
        assert_eq!(restored.attempts(), state.attempts());
        assert_eq!(restored.locked(), state.locked());
        assert_eq!(restored.status(), state.status());
        assert_eq!(restored.current_guess(), state.current_guess());
        assert_eq!(restored.max_guesses(), 6);
    }

    #[test]
    fn legacy_object_reveals_and_string_keys() {
        let raw = r#"{
            "wordLength": 5,
            "secretWord": "CRANE",
            "attempts": ["SLATE"],
            "lockedLetters": {"2": "A", "4": "e"},
            "revealedLetters": {"1": true, "3": false},
            "gameStatus": "playing",
            "attemptIndex": 1,
            "letterRevealsRemaining": 0,
            "currentDay": "2025-05-10",
            "currentGuess": ["", null, "", "", ""]
        }"#;

        let snapshot = Snapshot::from_json(raw).unwrap();
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.date, day());
        assert_eq!(snapshot.revealed_letters.iter().collect::<Vec<_>>(), vec![1]);
        assert_eq!(snapshot.locked_letters.get(2), Some('a'));

        let state = snapshot.into_state().unwrap();
        assert_eq!(state.secret().text(), "crane");
        assert!(state.revealed().contains(1));
        assert_eq!(state.reveals_remaining(), 0);
        assert_eq!(state.fixed_letter(1), Some('r'));
    }

    #[test]
    fn legacy_array_locks() {
        let raw = r#"{
            "wordLength": 5, "secretWord": "crane", "attempts": [],
            "lockedLetters": [null, "", "a", null, "E"],
            "revealedLetters": [],
            "gameStatus": "playing", "date": "2025-05-10"
        }"#;
        let state = Snapshot::from_json(raw).unwrap().into_state().unwrap();
        assert_eq!(state.locked().len(), 2);
        assert_eq!(state.locked().get(4), Some('e'));
    }

    #[test]
    fn won_game_gets_full_locks() {
        let raw = r#"{
            "version": 2, "wordLength": 5, "secretWord": "crane",
            "attempts": ["crane"], "lockedLetters": {"0": "c"},
            "revealedLetters": [], "gameStatus": "won", "attemptIndex": 1,
            "date": "2025-05-10"
        }"#;
        let state = Snapshot::from_json(raw).unwrap().into_state().unwrap();
        assert_eq!(state.status(), GameStatus::Won);
        assert!(state.locked().covers(5));
    }

    #[test]
    fn playing_with_solving_attempt_is_marked_won() {
        let mut snapshot = Snapshot::capture(&played("crane", &["slate", "crane"]), day());
        snapshot.game_status = GameStatus::Playing;
        let state = snapshot.into_state().unwrap();
        assert_eq!(state.status(), GameStatus::Won);
    }

    #[test]
    fn won_without_solving_attempt_is_repaired() {
        let raw = r#"{
            "version": 2, "wordLength": 5, "secretWord": "crane",
            "attempts": ["slate"], "lockedLetters": {"2": "a"},
            "revealedLetters": [], "gameStatus": "won", "attemptIndex": 1,
            "date": "2025-05-10"
        }"#;
        let state = Snapshot::from_json(raw).unwrap().into_state().unwrap();
        assert_eq!(state.status(), GameStatus::Won);
        assert_eq!(state.locked(), &LockedLetters::complete(&Word::new("crane").unwrap()));
        assert_eq!(state.attempts().len(), 1);
    }

    #[test]
    fn early_loss_stays_lost() {
        let mut snapshot = Snapshot::capture(&played("crane", &["slate", "trace"]), day());
        snapshot.game_status = GameStatus::Lost;
        let state = snapshot.into_state().unwrap();
        assert_eq!(state.status(), GameStatus::Lost);
        assert!(state.current_guess().iter().all(Option::is_none));
    }

    #[test]
    fn legacy_date_keys_are_merged() {
        let with_both = r#"{
            "wordLength": 5, "secretWord": "crane", "attempts": ["slate"],
            "gameStatus": "playing", "attemptIndex": 1,
            "date": "2025-05-10", "currentDay": "2025-05-09"
        }"#;
        let snapshot = Snapshot::from_json(with_both).unwrap();
        assert_eq!(snapshot.date, day());

        let day_only = r#"{
            "wordLength": 5, "secretWord": "crane", "attempts": [],
            "gameStatus": "playing", "currentDay": "2025-05-10"
        }"#;
        let snapshot = Snapshot::from_json(day_only).unwrap();
        assert_eq!(snapshot.date, day());
        assert!(!snapshot.to_json().unwrap().contains("currentDay"));
    }

    #[test]
    fn locked_letter_must_match_secret() {
        let mut snapshot = Snapshot::capture(&played("crane", &[]), day());
        snapshot.locked_letters = [(0, 'x')].into_iter().collect();
        assert!(matches!(snapshot.into_state(), Err(SnapshotError::Invalid(_))));
    }

    #[test]
    fn secret_length_must_match() {
        let mut snapshot = Snapshot::capture(&played("crane", &[]), day());
        snapshot.word_length = 6;
        assert!(snapshot.into_state().is_err());
    }

    #[test]
    fn attempt_index_is_derived_from_attempts() {
        let mut snapshot = Snapshot::capture(&played("crane", &["slate"]), day());
        snapshot.attempt_index = 4;
        assert_eq!(snapshot.into_state().unwrap().attempt_index(), 1);
    }

    #[test]
    fn future_version_is_rejected() {
        let raw = r#"{"version": 99, "wordLength": 5}"#;
        assert!(matches!(
            Snapshot::from_json(raw),
            Err(SnapshotError::UnsupportedVersion { found: 99, .. })
        ));
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(
            Snapshot::from_json("{not json"),
            Err(SnapshotError::Malformed(_))
        ));
        assert!(matches!(
            Snapshot::from_json("[1, 2]"),
            Err(SnapshotError::Invalid(_))
        ));
        assert!(Snapshot::from_json(r#"{"revealedLetters": "x"}"#).is_err());
    }
}
