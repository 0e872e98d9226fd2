//! Puzzle loading
//!
//! A load fetches the puzzle and its dictionary together. When the puzzle
//! cannot be produced the hardcoded fallback for the word length is used
//! instead, so a load only fails for an unsupported length.
//!
//! [`PendingLoad`] runs a load on a worker thread. It cannot be cancelled
//! mid-flight; dropping or cancelling it clears a liveness flag and the
//! worker throws its result away.

use crate::puzzle::{
    Dictionary, GameMode, Puzzle, PuzzleDate, PuzzleError, PuzzleSource, fallback_puzzle,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// What to load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadRequest {
    pub mode: GameMode,
    pub word_length: usize,
}

/// A puzzle ready to play
#[derive(Debug, Clone)]
pub struct LoadedPuzzle {
    pub puzzle: Puzzle,
    pub dictionary: Dictionary,
    /// The hardcoded puzzle stands in for the real one
    pub used_fallback: bool,
}

/// Load a puzzle and dictionary synchronously
///
/// # Errors
/// Returns `PuzzleError::UnsupportedLength` when no fallback exists either.
pub fn load_puzzle<P: PuzzleSource + ?Sized>(
    source: &P,
    request: LoadRequest,
    today: PuzzleDate,
) -> Result<LoadedPuzzle, PuzzleError> {
    let length = request.word_length;
    let loaded = match request.mode {
        GameMode::Daily => source.load_daily(length, false),
        GameMode::Random => source.load_daily(length, true),
        GameMode::Archive(date) => source.load_by_date(date, length),
    };

    let (puzzle, used_fallback) = match loaded {
        Ok(puzzle) => (puzzle, false),
        Err(e) => {
            log::warn!("puzzle load failed ({e}), using the fallback puzzle");
            let date = match request.mode {
                GameMode::Archive(date) => date,
                GameMode::Daily | GameMode::Random => today,
            };
            (fallback_puzzle(length, date)?, true)
        }
    };

    let dictionary = match Dictionary::embedded(length) {
        Ok(dictionary) => dictionary,
        Err(e) => {
            log::warn!("dictionary load failed ({e}), accepting only the answer");
            Dictionary::from_words(length, [puzzle.word.text()])?
        }
    };

    log::info!(
        "loaded {} puzzle for {} ({} letters, {} dictionary words)",
        request.mode,
        puzzle.date,
        length,
        dictionary.len()
    );

    Ok(LoadedPuzzle {
        puzzle,
        dictionary,
        used_fallback,
    })
}

/// A load running on a worker thread
#[derive(Debug)]
pub struct PendingLoad {
    alive: Arc<AtomicBool>,
    receiver: Receiver<Result<LoadedPuzzle, PuzzleError>>,
}

impl PendingLoad {
    /// Start loading in the background
    #[must_use]
    pub fn spawn(
        source: Arc<dyn PuzzleSource + Send + Sync>,
        request: LoadRequest,
        today: PuzzleDate,
    ) -> Self {
        let alive = Arc::new(AtomicBool::new(true));
        let (sender, receiver) = mpsc::channel();

        let flag = Arc::clone(&alive);
        thread::spawn(move || {
            let result = load_puzzle(source.as_ref(), request, today);
            if flag.load(Ordering::Acquire) {
                // The receiver may already be gone; nothing to do then
                let _ = sender.send(result);
            } else {
                log::debug!("discarding puzzle load that finished after teardown");
            }
        });

        Self { alive, receiver }
    }

    /// The result if the load has finished, without blocking
    ///
    /// Returns `None` while the load is still running, and after the result
    /// has been taken or the load was cancelled.
    pub fn try_take(&self) -> Option<Result<LoadedPuzzle, PuzzleError>> {
        if !self.is_alive() {
            return None;
        }
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Block until the load finishes
    ///
    /// Returns `None` if it was cancelled.
    #[must_use]
    pub fn wait(self) -> Option<Result<LoadedPuzzle, PuzzleError>> {
        if !self.is_alive() {
            return None;
        }
        self.receiver.recv().ok()
    }

    /// Discard the result once it arrives
    pub fn cancel(&self) {
        self.alive.store(false, Ordering::Release);
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }
}

impl Drop for PendingLoad {
    fn drop(&mut self) {
        self.cancel();
    }
}
