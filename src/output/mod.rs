//! Terminal output formatting
//!
//! Display utilities for CLI results and the line-mode board.

pub mod display;
pub mod formatters;

pub use display::{
    print_board, print_game_over, print_keyboard, print_saved_game, print_score_result,
    print_stats_summary, print_verify_report,
};
pub use formatters::share_text;
