//! Line-mode game
//!
//! Plays the session on plain stdin/stdout, for terminals without raw mode
//! or for piping guesses in.

use crate::output::{print_board, print_game_over, print_keyboard, share_text};
use crate::session::GameSession;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, BufRead, Write};

const HELP: &str = "\
Type a guess and press Enter. Locked letters are filled in for you, so you
can type just the letters for the open slots, or the whole word with `_`
in the locked positions.

Commands:
  !, reveal   use the one-time lifeline to uncover a letter
  keys        show the keyboard
  share       print the shareable result
  reset       start this puzzle over
  help        show this message
  quit        leave (today's game is saved)";

/// Run the line-mode game until the player quits or input ends
///
/// # Errors
///
/// Returns an error if reading stdin or writing stdout fails.
pub fn run_simple(session: &mut GameSession) -> Result<()> {
    let stdin = io::stdin();
    run_simple_with(session, &mut stdin.lock())
}

/// Run the line-mode game reading commands from `input`
///
/// # Errors
///
/// Returns an error if reading input or writing stdout fails.
pub fn run_simple_with<R: BufRead>(session: &mut GameSession, input: &mut R) -> Result<()> {
    print_banner(session);
    print_board(session.state());

    if session.state().status().is_terminal() {
        print_game_over(session.state(), &current_share(session));
    }

    loop {
        let Some(line) = read_line(input, &prompt(session))? else {
            println!();
            break;
        };

        match line.to_lowercase().as_str() {
            "" => {}
            "quit" | "q" | "exit" => break,
            "help" | "h" => println!("{HELP}\n"),
            "keys" | "k" => print_keyboard(session.keyboard()),
            "share" => println!("\n{}\n", current_share(session)),
            "reset" => {
                session.reset();
                println!("\n🔄 Starting over.");
                print_board(session.state());
            }
            "!" | "reveal" => match session.reveal() {
                Some(position) => {
                    println!(
                        "\n💡 Position {} revealed.",
                        (position + 1).to_string().bright_cyan().bold()
                    );
                    print_board(session.state());
                }
                None if session.state().status().is_terminal() => {
                    println!("{}", "The game is over.".yellow());
                }
                None => println!("{}", "No lifeline left.".yellow()),
            },
            guess => match session.submit(guess) {
                Ok(transition) => {
                    print_board(session.state());
                    if transition.status.is_terminal() {
                        print_game_over(session.state(), &current_share(session));
                    }
                }
                Err(e) => {
                    log::debug!("rejected guess {guess:?}: {e}");
                    println!("❌ {}", e.notice().red());
                    session.clear_error();
                }
            },
        }
    }

    println!("👋 See you tomorrow!\n");
    Ok(())
}

fn print_banner(session: &GameSession) {
    let state = session.state();
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                        Daily Wordle                          ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!(
        "  {} game for {} ({} letters, {} guesses)",
        session.mode(),
        session.puzzle_date(),
        state.word_length(),
        state.max_guesses()
    );
    if let Some(clue) = state.clue() {
        println!("  Clue: {}", clue.bright_yellow());
    }
    if session.used_fallback() {
        println!(
            "  {}",
            "Today's puzzle could not be loaded; playing a backup word.".yellow()
        );
    }
    if session.was_restored() {
        println!("  {}", "Resuming today's game.".bright_black());
    }
    println!("  Type 'help' for commands.");
}

fn prompt(session: &GameSession) -> String {
    let state = session.state();
    if state.status().is_terminal() {
        return "Command".to_string();
    }
    format!("Guess {}/{}", state.attempt_index() + 1, state.max_guesses())
}

fn current_share(session: &GameSession) -> String {
    share_text(session.state(), session.mode(), session.puzzle_date())
}

/// Prompt and read one trimmed line, `None` at end of input
fn read_line<R: BufRead>(input: &mut R, prompt: &str) -> Result<Option<String>> {
    print!("{prompt}: ");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Failed to read input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
