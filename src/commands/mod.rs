//! Command implementations

pub mod score;
pub mod simple;
pub mod status;
pub mod verify;

pub use score::{ScoreResult, score_guess};
pub use simple::{run_simple, run_simple_with};
pub use status::{SavedGame, saved_game};
pub use verify::{LengthReport, VerifyReport, run_verify};
