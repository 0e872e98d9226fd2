//! Player settings
//!
//! Persisted as `settings.json` in the data directory, separately from the
//! game snapshot and stats. An unreadable or invalid file falls back to the
//! defaults.

use crate::core::{MAX_LENGTH, MIN_LENGTH, is_supported_length};
use crate::engine::{GuessPolicy, RevealSettings, VowelSelection};
use crate::puzzle::{Calendar, GameMode, PuzzleDate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Settings file name inside the data directory
pub const SETTINGS_FILE: &str = "settings.json";

/// Application name used for platform directories
pub const APP_NAME: &str = "daily_wordle";

/// Why settings could not be loaded or saved
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("unsupported word length {0} (expected {MIN_LENGTH}-{MAX_LENGTH})")]
    UnsupportedLength(usize),

    #[error("vowel count {count} exceeds word length {length}")]
    VowelCountTooLarge { count: usize, length: usize },

    #[error("guess policy allows no guesses")]
    NoGuesses,

    #[error("UTC offset of {0} minutes is out of range")]
    OffsetOutOfRange(i32),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Player settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Letters per puzzle (5-7)
    pub word_length: usize,
    /// Lock some vowels before the first guess
    pub reveal_vowels: bool,
    /// How many vowels to lock when `reveal_vowels` is on
    pub vowel_count: usize,
    pub vowel_selection: VowelSelection,
    pub guess_policy: GuessPolicy,
    /// Play a random puzzle instead of the daily one
    pub random_mode: bool,
    /// Timezone of the daily rollover, minutes east of UTC
    pub utc_offset_minutes: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            word_length: MIN_LENGTH,
            reveal_vowels: false,
            vowel_count: 1,
            vowel_selection: VowelSelection::default(),
            guess_policy: GuessPolicy::default(),
            random_mode: false,
            utc_offset_minutes: 0,
        }
    }
}

impl Settings {
    /// Check that the settings describe a playable puzzle
    ///
    /// # Errors
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !is_supported_length(self.word_length) {
            return Err(SettingsError::UnsupportedLength(self.word_length));
        }
        if self.reveal_vowels && self.vowel_count > self.word_length {
            return Err(SettingsError::VowelCountTooLarge {
                count: self.vowel_count,
                length: self.word_length,
            });
        }
        let no_guesses = match self.guess_policy {
            GuessPolicy::Fixed { max_guesses } => max_guesses == 0,
            GuessPolicy::RevealAdjusted { base, .. } => base == 0,
        };
        if no_guesses {
            return Err(SettingsError::NoGuesses);
        }
        if self.utc_offset_minutes.unsigned_abs() >= 24 * 60 {
            return Err(SettingsError::OffsetOutOfRange(self.utc_offset_minutes));
        }
        Ok(())
    }

    #[must_use]
    pub fn reveal(&self) -> RevealSettings {
        RevealSettings {
            reveal_vowels: self.reveal_vowels,
            vowel_count: self.vowel_count,
            selection: self.vowel_selection,
        }
    }

    #[must_use]
    pub fn calendar(&self) -> Calendar {
        Calendar::with_offset_minutes(self.utc_offset_minutes)
    }

    /// Puzzle mode these settings select, given an optional archive date
    #[must_use]
    pub fn mode(&self, archive: Option<PuzzleDate>) -> GameMode {
        match archive {
            Some(date) => GameMode::Archive(date),
            None if self.random_mode => GameMode::Random,
            None => GameMode::Daily,
        }
    }

    /// True if switching from `self` to `next` invalidates the current game
    ///
    /// Word length, puzzle mode and anything that changes the starting
    /// board or guess budget all start a new game.
    #[must_use]
    pub fn requires_reset(&self, next: &Self) -> bool {
        self.word_length != next.word_length
            || self.random_mode != next.random_mode
            || self.reveal() != next.reveal()
            || self.guess_policy != next.guess_policy
            || self.utc_offset_minutes != next.utc_offset_minutes
    }

    /// Load settings from a file, defaults if it does not exist
    ///
    /// # Errors
    /// Returns `SettingsError` if the file exists but cannot be read, parsed
    /// or validated.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let settings: Self = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, logging and falling back to defaults on any problem
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("using default settings: {e}");
            Self::default()
        })
    }

    /// Write settings to a file
    ///
    /// # Errors
    /// Returns `SettingsError` if validation or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        self.validate()?;
        let json = serde_json::to_string_pretty(self)?;
        let io_error = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, json).map_err(io_error)?;
        fs::rename(&temp_path, path).map_err(io_error)?;
        log::debug!("saved settings to {}", path.display());
        Ok(())
    }
}

/// Platform data directory for snapshots, settings, stats and logs
///
/// - Linux: `~/.local/share/daily_wordle` (or `$XDG_DATA_HOME/daily_wordle`)
/// - macOS: `~/Library/Application Support/daily_wordle`
/// - Windows: `%APPDATA%\daily_wordle`
/// - Fallback: `./save_data`
#[must_use]
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.word_length, 5);
        assert_eq!(settings.mode(None), GameMode::Daily);
    }

    #[test]
    fn rejects_bad_values() {
        let mut settings = Settings {
            word_length: 8,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::UnsupportedLength(8))
        ));

        settings.word_length = 5;
        settings.reveal_vowels = true;
        settings.vowel_count = 6;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::VowelCountTooLarge { count: 6, length: 5 })
        ));

        settings.vowel_count = 1;
        settings.guess_policy = GuessPolicy::Fixed { max_guesses: 0 };
        assert!(matches!(settings.validate(), Err(SettingsError::NoGuesses)));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join(SETTINGS_FILE)).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join(SETTINGS_FILE);
        let settings = Settings {
            word_length: 7,
            reveal_vowels: true,
            vowel_count: 2,
            vowel_selection: VowelSelection::Leftmost,
            guess_policy: GuessPolicy::RevealAdjusted {
                base: 6,
                per_reveal: -1,
            },
            random_mode: true,
            utc_offset_minutes: -300,
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{"word_length": 6}"#).unwrap();
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.word_length, 6);
        assert!(!settings.reveal_vowels);
    }

    #[test]
    fn invalid_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{"word_length": 12}"#).unwrap();
        assert!(Settings::load(&path).is_err());
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }

    #[test]
    fn reset_triggers() {
        let base = Settings::default();
        assert!(!base.requires_reset(&base));
        assert!(base.requires_reset(&Settings {
            word_length: 6,
            ..base
        }));
        assert!(base.requires_reset(&Settings {
            random_mode: true,
            ..base
        }));
    }
}
