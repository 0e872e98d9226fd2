//! Formatting utilities for terminal output

use crate::core::Feedback;
use crate::engine::{GameState, GameStatus};
use crate::puzzle::{GameMode, PuzzleDate};

/// Emoji row for one attempt
#[must_use]
pub fn feedback_to_emoji(feedback: &Feedback) -> String {
    feedback.to_emoji()
}

/// Shareable result: a header line and one emoji row per attempt
///
/// The header carries the puzzle day, the attempt count (`X` for a loss) and
/// the guess budget. A spent lifeline is marked with `*`.
#[must_use]
pub fn share_text(state: &GameState, mode: GameMode, date: PuzzleDate) -> String {
    let score = match state.status() {
        GameStatus::Won => state.attempt_index().to_string(),
        GameStatus::Lost => "X".to_string(),
        GameStatus::Playing => "-".to_string(),
    };
    let marker = if state.revealed().is_empty() { "" } else { "*" };
    let label = match mode {
        GameMode::Daily | GameMode::Archive(_) => date.to_string(),
        GameMode::Random => "random".to_string(),
    };

    let mut text = format!(
        "Daily Wordle {label} ({} letters) {score}/{}{marker}",
        state.word_length(),
        state.max_guesses()
    );
    for attempt in state.attempts() {
        text.push('\n');
        text.push_str(&feedback_to_emoji(&attempt.feedback));
    }
    text
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
