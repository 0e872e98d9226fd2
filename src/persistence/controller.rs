//! Save and restore of the daily game
//!
//! Writes are fire-and-forget: a failed save is logged and play continues.
//! Restore never fails either. A snapshot from another day, or one that
//! cannot be parsed or rebuilt, is deleted and `None` is returned so the
//! caller starts fresh.

use super::snapshot::Snapshot;
use super::store::SnapshotStore;
use crate::engine::GameState;
use crate::puzzle::{GameMode, PuzzleDate};

/// Day-keyed persistence over a [`SnapshotStore`]
#[derive(Debug)]
pub struct PersistenceController<S> {
    store: S,
}

impl<S: SnapshotStore> PersistenceController<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist `state` as the game for `today`
    ///
    /// Only daily games are written; random and archive games are skipped.
    /// Returns true if the snapshot was written.
    pub fn save(&mut self, state: &GameState, mode: GameMode, today: PuzzleDate) -> bool {
        if !mode.is_persistent() {
            log::debug!("not saving {mode} game");
            return false;
        }

        let snapshot = Snapshot::capture(state, today);
        let json = match snapshot.to_json() {
            Ok(json) => json,
            Err(e) => {
                log::warn!("could not serialize snapshot: {e}");
                return false;
            }
        };

        match self.store.save(&json) {
            Ok(()) => {
                log::debug!(
                    "saved {today} at attempt {} ({})",
                    state.attempt_index(),
                    state.status().as_str()
                );
                true
            }
            Err(e) => {
                log::warn!("could not save game: {e}");
                false
            }
        }
    }

    /// Today's saved game, if there is a trustworthy one
    pub fn restore(&mut self, today: PuzzleDate) -> Option<GameState> {
        let snapshot = self.read()?;

        if snapshot.date != today {
            log::info!("discarding snapshot from {} (today is {today})", snapshot.date);
            self.clear();
            return None;
        }

        match snapshot.into_state() {
            Ok(state) => {
                log::info!(
                    "restored {today} at attempt {} ({})",
                    state.attempt_index(),
                    state.status().as_str()
                );
                Some(state)
            }
            Err(e) => {
                log::warn!("discarding corrupt snapshot: {e}");
                self.clear();
                None
            }
        }
    }

    /// Stored snapshot without the day check, for reporting
    ///
    /// A snapshot that cannot be parsed is deleted.
    pub fn peek(&mut self) -> Option<Snapshot> {
        self.read()
    }

    /// Delete any stored snapshot
    pub fn clear(&mut self) {
        if let Err(e) = self.store.delete() {
            log::warn!("could not delete snapshot: {e}");
        }
    }

    fn read(&mut self) -> Option<Snapshot> {
        let raw = match self.store.load() {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("could not read snapshot: {e}");
                return None;
            }
        };

        match Snapshot::from_json(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                log::warn!("discarding unreadable snapshot: {e}");
                self.clear();
                None
            }
        }
    }
}
