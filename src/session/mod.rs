//! A game in progress together with everything it touches
//!
//! The session wires the engine to its collaborators: it picks between a
//! restored snapshot and a fresh puzzle at start, and after every accepted
//! action recomputes the keyboard, saves the daily game and records finished
//! daily games in the stats.

pub mod loader;

pub use loader::{LoadRequest, LoadedPuzzle, PendingLoad, load_puzzle};

use crate::config::Settings;
use crate::engine::{GameState, GameStatus, GuessError, KeyboardState, Transition, aggregate};
use crate::persistence::{PersistenceController, SnapshotStore};
use crate::puzzle::{Dictionary, GameMode, PuzzleDate, PuzzleError, PuzzleSource};
use crate::stats::{GameRecord, StatsSink};
use rand::Rng;

/// Collaborators a session writes to
pub struct SessionSinks {
    pub store: Box<dyn SnapshotStore>,
    pub stats: Option<Box<dyn StatsSink>>,
}

/// A game being played
pub struct GameSession {
    settings: Settings,
    mode: GameMode,
    today: PuzzleDate,
    puzzle_date: PuzzleDate,
    dictionary: Dictionary,
    state: GameState,
    keyboard: KeyboardState,
    persistence: PersistenceController<Box<dyn SnapshotStore>>,
    stats: Option<Box<dyn StatsSink>>,
    used_fallback: bool,
    restored: bool,
    recorded: bool,
}

impl GameSession {
    /// Load a puzzle synchronously and start playing it
    ///
    /// # Errors
    /// Returns `PuzzleError` if neither the puzzle nor a fallback exists for
    /// the configured word length.
    pub fn start<P: PuzzleSource + ?Sized>(
        settings: Settings,
        mode: GameMode,
        today: PuzzleDate,
        source: &P,
        sinks: SessionSinks,
    ) -> Result<Self, PuzzleError> {
        let request = LoadRequest {
            mode,
            word_length: settings.word_length,
        };
        let loaded = load_puzzle(source, request, today)?;
        Ok(Self::from_loaded(settings, mode, today, loaded, sinks))
    }

    /// Start playing an already loaded puzzle
    ///
    /// For daily games a snapshot saved today for the same puzzle is resumed.
    /// A snapshot for another puzzle or word length is discarded. When the
    /// load fell back to the hardcoded puzzle, today's snapshot wins since it
    /// holds the real puzzle.
    #[must_use]
    pub fn from_loaded(
        settings: Settings,
        mode: GameMode,
        today: PuzzleDate,
        loaded: LoadedPuzzle,
        sinks: SessionSinks,
    ) -> Self {
        let mut persistence = PersistenceController::new(sinks.store);
        let LoadedPuzzle {
            puzzle,
            dictionary,
            used_fallback,
        } = loaded;

        let restored = if mode.is_persistent() {
            persistence.restore(today).filter(|state| {
                let usable = state.word_length() == settings.word_length
                    && (used_fallback || state.secret() == &puzzle.word);
                if !usable {
                    log::info!("saved game belongs to a different puzzle, starting fresh");
                }
                usable
            })
        } else {
            None
        };

        let (state, restored) = match restored {
            Some(state) => (state, true),
            None => {
                if mode.is_persistent() {
                    persistence.clear();
                }
                let state = GameState::fresh(
                    puzzle.word,
                    puzzle.clue,
                    &settings.reveal(),
                    &settings.guess_policy,
                );
                (state, false)
            }
        };

        let keyboard = aggregate(
            state.locked(),
            state.revealed(),
            state.secret(),
            state.attempts(),
        );
        let recorded = state.status().is_terminal();
        let mut session = Self {
            settings,
            mode,
            today,
            puzzle_date: puzzle.date,
            dictionary,
            state,
            keyboard,
            persistence,
            stats: sinks.stats,
            used_fallback: used_fallback && !restored,
            restored,
            recorded,
        };
        // Rewrites a restored snapshot in the current format
        session.persist();
        session
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub fn today(&self) -> PuzzleDate {
        self.today
    }

    /// Day the puzzle belongs to (the archive day for archive games)
    #[must_use]
    pub fn puzzle_date(&self) -> PuzzleDate {
        self.puzzle_date
    }

    #[must_use]
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// The hardcoded puzzle is being played because loading failed
    #[must_use]
    pub fn used_fallback(&self) -> bool {
        self.used_fallback
    }

    /// The game was resumed from today's snapshot
    #[must_use]
    pub fn was_restored(&self) -> bool {
        self.restored
    }

    /// Submit a typed guess
    ///
    /// # Errors
    /// Returns the engine's `GuessError`; the game is unchanged apart from
    /// the transient error.
    pub fn submit(&mut self, raw: &str) -> Result<Transition, GuessError> {
        let transition = self.state.submit_guess(raw, &self.dictionary)?;
        self.after_change();
        Ok(transition)
    }

    /// Submit the in-progress input row
    ///
    /// # Errors
    /// See [`GameSession::submit`].
    pub fn submit_current(&mut self) -> Result<Transition, GuessError> {
        let transition = self.state.submit_current(&self.dictionary)?;
        self.after_change();
        Ok(transition)
    }

    /// Spend the lifeline
    pub fn reveal(&mut self) -> Option<usize> {
        self.reveal_with(&mut rand::rng())
    }

    /// Spend the lifeline with a specific random source
    pub fn reveal_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<usize> {
        let position = self.state.request_lifeline_reveal(rng)?;
        self.after_change();
        Some(position)
    }

    pub fn type_letter(&mut self, letter: char) -> bool {
        let typed = self.state.type_letter(letter);
        if typed {
            self.persist();
        }
        typed
    }

    pub fn backspace(&mut self) -> bool {
        let removed = self.state.backspace();
        if removed {
            self.persist();
        }
        removed
    }

    pub fn clear_error(&mut self) {
        self.state.clear_error();
    }

    /// Throw the current game away and start the same puzzle over
    pub fn reset(&mut self) {
        log::info!("resetting {} game", self.mode);
        if self.mode.is_persistent() {
            self.persistence.clear();
        }
        self.state = GameState::fresh(
            self.state.secret().clone(),
            self.state.clue().map(str::to_string),
            &self.settings.reveal(),
            &self.settings.guess_policy,
        );
        self.recorded = false;
        self.restored = false;
        self.after_change();
    }

    /// Switch to new settings
    ///
    /// Changes that alter the board (word length, puzzle mode, reveals,
    /// guess budget) discard the current game, including today's snapshot,
    /// and load a new puzzle. Returns true if a new game was started.
    ///
    /// # Errors
    /// Returns `PuzzleError` if no puzzle exists for the new settings; the
    /// current game is kept in that case.
    pub fn apply_settings<P: PuzzleSource + ?Sized>(
        &mut self,
        next: Settings,
        source: &P,
    ) -> Result<bool, PuzzleError> {
        if !self.settings.requires_reset(&next) {
            self.settings = next;
            return Ok(false);
        }

        let mode = match self.mode {
            GameMode::Archive(date) => GameMode::Archive(date),
            GameMode::Daily | GameMode::Random => next.mode(None),
        };
        let request = LoadRequest {
            mode,
            word_length: next.word_length,
        };
        let loaded = load_puzzle(source, request, self.today)?;

        if self.mode.is_persistent() {
            self.persistence.clear();
        }
        log::info!("settings changed, starting a new {mode} game");

        self.settings = next;
        self.mode = mode;
        self.puzzle_date = loaded.puzzle.date;
        self.dictionary = loaded.dictionary;
        self.used_fallback = loaded.used_fallback;
        self.state = GameState::fresh(
            loaded.puzzle.word,
            loaded.puzzle.clue,
            &self.settings.reveal(),
            &self.settings.guess_policy,
        );
        self.recorded = false;
        self.restored = false;
        self.after_change();
        Ok(true)
    }

    fn after_change(&mut self) {
        self.keyboard = aggregate(
            self.state.locked(),
            self.state.revealed(),
            self.state.secret(),
            self.state.attempts(),
        );
        self.persist();
        self.record_if_finished();
    }

    fn persist(&mut self) {
        self.persistence.save(&self.state, self.mode, self.today);
    }

    fn record_if_finished(&mut self) {
        if self.recorded || !self.state.status().is_terminal() || !self.mode.is_persistent() {
            return;
        }
        self.recorded = true;

        let record = GameRecord {
            date: self.puzzle_date,
            word_length: self.state.word_length(),
            won: self.state.status() == GameStatus::Won,
            guess_count: self.state.attempt_index(),
            solution: self.state.secret().text().to_string(),
            reveal_vowels: self.settings.reveal_vowels,
            lifeline_used: !self.state.revealed().is_empty(),
        };
        if let Some(stats) = self.stats.as_mut() {
            stats.record_result(record);
        }
    }
}
