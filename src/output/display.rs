//! Display functions for command results and the line-mode board

use super::formatters::{create_progress_bar, feedback_to_emoji};
use crate::commands::{LengthReport, SavedGame, ScoreResult, VerifyReport};
use crate::core::LetterStatus;
use crate::engine::{GameState, GameStatus, KeyboardState};
use crate::stats::StatsSummary;
use colored::{ColoredString, Colorize};

const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

fn tile(letter: char, status: Option<LetterStatus>) -> ColoredString {
    let text = format!(" {} ", letter.to_ascii_uppercase());
    match status {
        Some(LetterStatus::Correct) => text.black().on_green().bold(),
        Some(LetterStatus::Present) => text.black().on_yellow().bold(),
        Some(LetterStatus::Absent) => text.white().on_bright_black(),
        None => text.bold(),
    }
}

/// Print the board: past attempts, the input row, and empty rows
pub fn print_board(state: &GameState) {
    println!();
    for attempt in state.attempts() {
        let row: Vec<String> = attempt
            .word
            .chars()
            .iter()
            .zip(attempt.feedback.statuses())
            .map(|(&b, &status)| tile(char::from(b), Some(status)).to_string())
            .collect();
        println!("  {}", row.join(" "));
    }

    let mut rows_left = state.guesses_left();
    if state.status() == GameStatus::Playing && rows_left > 0 {
        let row: Vec<String> = (0..state.word_length())
            .map(|i| {
                if let Some(letter) = state.locked().get(i) {
                    tile(letter, Some(LetterStatus::Correct)).to_string()
                } else if let Some(letter) = state.fixed_letter(i) {
                    format!(" {} ", letter.to_ascii_uppercase())
                        .black()
                        .on_cyan()
                        .to_string()
                } else {
                    match state.current_guess()[i] {
                        Some(letter) => tile(letter, None).to_string(),
                        None => " _ ".bright_black().to_string(),
                    }
                }
            })
            .collect();
        println!("  {}", row.join(" "));
        rows_left -= 1;
    }

    for _ in 0..rows_left {
        let row = vec![" · ".bright_black().to_string(); state.word_length()];
        println!("  {}", row.join(" "));
    }
    println!();
}

/// Print the on-screen keyboard with the best known status of each letter
pub fn print_keyboard(keyboard: &KeyboardState) {
    for (indent, row) in KEYBOARD_ROWS.iter().enumerate() {
        let keys: Vec<String> = row
            .chars()
            .map(|c| match keyboard.status(c) {
                Some(status) => tile(c, Some(status)).to_string(),
                None => format!(" {} ", c.to_ascii_uppercase()),
            })
            .collect();
        println!("  {}{}", "  ".repeat(indent), keys.join(""));
    }
    println!();
}

/// Print the end of game banner and share text
pub fn print_game_over(state: &GameState, share: &str) {
    println!("{}", "═".repeat(50).bright_cyan());
    match state.status() {
        GameStatus::Won => {
            let praise = match state.attempt_index() {
                1 => "🏆 Hole in one!",
                2 => "⭐ Magnificent!",
                3 => "💫 Splendid!",
                4 => "✨ Great!",
                5 => "👍 Nice!",
                _ => "😅 Phew!",
            };
            println!("  {}", praise.bright_green().bold());
            println!(
                "  Solved in {} of {}",
                state.attempt_index().to_string().bright_cyan().bold(),
                state.max_guesses()
            );
        }
        GameStatus::Lost => {
            println!("  {}", "Out of guesses".red().bold());
            println!(
                "  The word was {}",
                state.secret().text().to_uppercase().bright_yellow().bold()
            );
        }
        GameStatus::Playing => {}
    }
    println!("{}", "═".repeat(50).bright_cyan());
    println!("\n{share}\n");
}

/// Print the result of scoring a guess
pub fn print_score_result(result: &ScoreResult) {
    println!(
        "\n{} vs {}",
        result.guess.text().to_uppercase().bright_white().bold(),
        result.secret.text().to_uppercase().bright_yellow().bold()
    );
    let row: Vec<String> = result
        .guess
        .chars()
        .iter()
        .zip(result.feedback.statuses())
        .map(|(&b, &status)| tile(char::from(b), Some(status)).to_string())
        .collect();
    println!("  {}", row.join(" "));
    println!(
        "  {}  ({} correct, {} present)",
        feedback_to_emoji(&result.feedback),
        result.feedback.count_correct(),
        result.feedback.count_present()
    );
}

fn print_problems(label: &str, words: &[String]) {
    if words.is_empty() {
        return;
    }
    println!(
        "     {} {}: {}",
        "✗".red(),
        label,
        words.join(", ").yellow()
    );
}

fn print_length_report(report: &LengthReport) {
    let status = if report.is_clean() {
        "✓ clean".green().bold()
    } else {
        "✗ problems".red().bold()
    };
    println!(
        "\n  {} {}",
        format!("{} letters:", report.length).bright_cyan().bold(),
        status
    );
    println!(
        "     Dictionary: {} words | Clues: {} words | Schedule: {} days",
        report.dictionary.total, report.clues.total, report.schedule_days
    );
    print_problems("duplicate dictionary entries", &report.dictionary.duplicates);
    print_problems("wrong-length dictionary entries", &report.dictionary.wrong_length);
    print_problems("invalid dictionary entries", &report.dictionary.invalid);
    print_problems("duplicate clue words", &report.clues.duplicates);
    print_problems("wrong-length clue words", &report.clues.wrong_length);
    print_problems("invalid clue words", &report.clues.invalid);
    print_problems("clue words missing from dictionary", &report.missing_from_dictionary);
}

/// Print word list verification results
pub fn print_verify_report(report: &VerifyReport) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "WORD LIST VERIFICATION".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    for length in &report.lengths {
        print_length_report(length);
    }

    println!(
        "\n  Checked in {:.1}ms",
        report.duration.as_secs_f64() * 1000.0
    );
}

/// Print play statistics for one word length
pub fn print_stats_summary(summary: &StatsSummary, word_length: usize) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} ",
        format!("STATISTICS ({word_length} letters)").bright_cyan().bold()
    );
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Overall:".bright_cyan().bold());
    println!("   Played:           {}", summary.played);
    println!(
        "   Win %:            {}",
        summary.win_percent().to_string().bright_yellow().bold()
    );
    println!("   Current streak:   {}", summary.current_streak);
    println!("   Max streak:       {}", summary.max_streak);

    if summary.distribution.is_empty() {
        return;
    }

    println!("\n📈 {}", "Guess Distribution:".bright_cyan().bold());
    let max_count = summary.distribution.values().copied().max().unwrap_or(1);
    let last = summary.distribution.keys().copied().max().unwrap_or(0);
    for guesses in 1..=last {
        let count = summary.distribution.get(&guesses).copied().unwrap_or(0);
        let bar = create_progress_bar(count as f64, max_count as f64, 30);
        println!("   {guesses}: {} {count:4}", bar.green());
    }
}

/// Print what the snapshot store holds
pub fn print_saved_game(saved: &SavedGame) {
    match saved {
        SavedGame::Nothing => println!("No saved game."),
        SavedGame::Stale(date) => {
            println!("Saved game is from {date}; it will be discarded at the next start.");
        }
        SavedGame::Today(snapshot) => {
            println!(
                "\n{} {} ({} letters)",
                "Today's game:".bright_cyan().bold(),
                snapshot.date,
                snapshot.word_length
            );
            println!("   Status:    {}", snapshot.game_status.as_str());
            let max = snapshot
                .max_guesses
                .map_or_else(|| "?".to_string(), |m| m.to_string());
            println!("   Attempts:  {}/{max}", snapshot.attempts.len());
            println!(
                "   Lifeline:  {}",
                if snapshot.letter_reveals_remaining > 0 {
                    "available"
                } else {
                    "used"
                }
            );
            if snapshot.game_status.is_terminal() {
                println!(
                    "   Solution:  {}",
                    snapshot.secret_word.to_uppercase().bright_yellow()
                );
            }
        }
    }
}
