//! Inspect today's saved game

use crate::persistence::{PersistenceController, Snapshot, SnapshotStore};
use crate::puzzle::PuzzleDate;

/// What the snapshot store holds relative to today
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavedGame {
    Nothing,
    /// A snapshot from an earlier day, cleared at the next start
    Stale(PuzzleDate),
    Today(Box<Snapshot>),
}

/// Look at the stored snapshot without starting a game
///
/// An unreadable snapshot is deleted and reported as `Nothing`.
pub fn saved_game<S: SnapshotStore>(
    controller: &mut PersistenceController<S>,
    today: PuzzleDate,
) -> SavedGame {
    match controller.peek() {
        None => SavedGame::Nothing,
        Some(snapshot) if snapshot.date != today => SavedGame::Stale(snapshot.date),
        Some(snapshot) => SavedGame::Today(Box::new(snapshot)),
    }
}
