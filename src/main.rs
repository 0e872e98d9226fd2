//! Daily Wordle - CLI
//!
//! Daily word puzzle with TUI and line modes, saved progress and statistics.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use daily_wordle::{
    commands::{run_simple, run_verify, saved_game, score_guess},
    config::{self, SETTINGS_FILE, Settings},
    interactive::{App, AppConfig, run_tui},
    logging::{self, LogTarget},
    output::{print_saved_game, print_score_result, print_stats_summary, print_verify_report},
    persistence::{FileSnapshotStore, PersistenceController, SnapshotStore},
    puzzle::{EmbeddedPuzzles, GameMode, PuzzleDate, PuzzleSource},
    session::{GameSession, SessionSinks},
    stats::{FileStats, StatsSink},
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "daily_wordle",
    about = "A new word to guess every day, in 5, 6 or 7 letters",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Word length: 5, 6 or 7 (default from settings)
    #[arg(short, long, global = true)]
    length: Option<usize>,

    /// Lock vowels of the answer before the first guess
    #[arg(long, global = true)]
    reveal_vowels: bool,

    /// How many vowels --reveal-vowels locks
    #[arg(long, global = true)]
    vowels: Option<usize>,

    /// Play a random puzzle instead of today's (not saved)
    #[arg(short, long, global = true)]
    random: bool,

    /// Play the puzzle of a past day, YYYY-MM-DD (not saved)
    #[arg(short, long, global = true)]
    date: Option<PuzzleDate>,

    /// Directory for saved games, settings, stats and logs
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Debug logging (to stderr, or to the log file in the TUI)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Subcommand)]
enum Commands {
    /// Full-screen game (default)
    Play,

    /// Line-by-line game without the full-screen interface
    Simple,

    /// Show today's saved game
    Status,

    /// Delete the saved game
    Reset,

    /// Show win rate, streaks and guess distribution
    Stats,

    /// Check the embedded word lists
    Verify,

    /// Score a single guess against a secret word
    Score {
        /// The guessed word
        guess: String,

        /// The secret word
        secret: String,
    },
}

impl Cli {
    fn has_overrides(&self) -> bool {
        self.length.is_some()
            || self.reveal_vowels
            || self.vowels.is_some()
            || self.random
            || self.date.is_some()
    }

    /// Settings for this run: the saved file with flags on top
    fn settings(&self, data_dir: &Path) -> Result<Settings> {
        let mut settings = Settings::load_or_default(&data_dir.join(SETTINGS_FILE));
        if let Some(length) = self.length {
            settings.word_length = length;
        }
        if self.reveal_vowels {
            settings.reveal_vowels = true;
        }
        if let Some(vowels) = self.vowels {
            settings.vowel_count = vowels;
        }
        if self.random {
            settings.random_mode = true;
        }
        settings.validate().context("Invalid options")?;
        Ok(settings)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = cli.data_dir.clone().unwrap_or_else(config::data_dir);

    // Default to Play mode if no command given
    let command = cli.command.clone().unwrap_or(Commands::Play);

    let target = if matches!(command, Commands::Play) {
        LogTarget::File(&data_dir)
    } else {
        LogTarget::Stderr
    };
    logging::init(target, cli.verbose)?;
    log::debug!("data directory: {}", data_dir.display());

    let settings = cli.settings(&data_dir)?;
    let calendar = settings.calendar();
    let today = calendar.today();
    let source = EmbeddedPuzzles::new(calendar);

    match command {
        Commands::Play => run_play_command(&cli, settings, today, source, &data_dir),
        Commands::Simple => run_simple_command(&cli, settings, today, &source, &data_dir),
        Commands::Status => run_status_command(today, &data_dir),
        Commands::Reset => run_reset_command(&data_dir),
        Commands::Stats => run_stats_command(&settings, today, &data_dir),
        Commands::Verify => run_verify_command(&source),
        Commands::Score { guess, secret } => run_score_command(&guess, &secret),
    }
}

/// Snapshot store and stats file in the data directory
///
/// Stats are optional: an unreadable stats file is logged and play goes on.
fn open_sinks(data_dir: &Path) -> Result<SessionSinks> {
    let store = FileSnapshotStore::new(data_dir)
        .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;
    let stats = match FileStats::open(data_dir) {
        Ok(stats) => Some(Box::new(stats) as Box<dyn StatsSink>),
        Err(e) => {
            log::warn!("stats disabled: {e}");
            None
        }
    };
    Ok(SessionSinks {
        store: Box::new(store) as Box<dyn SnapshotStore>,
        stats,
    })
}

/// Puzzle mode for this run, rejecting archive dates with no puzzle
fn game_mode<P: PuzzleSource + ?Sized>(
    cli: &Cli,
    settings: &Settings,
    today: PuzzleDate,
    source: &P,
) -> Result<GameMode> {
    if let Some(date) = cli.date {
        if date > today {
            bail!("The puzzle for {date} is not out yet");
        }
        source
            .load_by_date(date, settings.word_length)
            .with_context(|| format!("No archived puzzle for {date}"))?;
    }
    Ok(settings.mode(cli.date))
}

fn run_play_command(
    cli: &Cli,
    settings: Settings,
    today: PuzzleDate,
    source: EmbeddedPuzzles,
    data_dir: &Path,
) -> Result<()> {
    let mode = game_mode(cli, &settings, today, &source)?;
    let app = App::new(AppConfig {
        settings,
        mode,
        today,
        source: Arc::new(source),
        sinks: open_sinks(data_dir)?,
        // Flags apply to this run only, so in-game changes are not saved over them
        settings_path: (!cli.has_overrides()).then(|| data_dir.join(SETTINGS_FILE)),
    });
    run_tui(app).context("The game stopped unexpectedly; run it again to pick up where you left off")
}

fn run_simple_command(
    cli: &Cli,
    settings: Settings,
    today: PuzzleDate,
    source: &EmbeddedPuzzles,
    data_dir: &Path,
) -> Result<()> {
    let mode = game_mode(cli, &settings, today, source)?;
    let mut session = GameSession::start(settings, mode, today, source, open_sinks(data_dir)?)
        .context("Failed to load a puzzle")?;
    run_simple(&mut session)
}

fn run_status_command(today: PuzzleDate, data_dir: &Path) -> Result<()> {
    let store = FileSnapshotStore::new(data_dir)
        .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;
    let mut controller = PersistenceController::new(store);
    print_saved_game(&saved_game(&mut controller, today));
    Ok(())
}

fn run_reset_command(data_dir: &Path) -> Result<()> {
    let store = FileSnapshotStore::new(data_dir)
        .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;
    let mut controller = PersistenceController::new(store);
    match controller.peek() {
        Some(snapshot) => {
            controller.clear();
            println!("Deleted the saved game for {}.", snapshot.date);
        }
        None => println!("No saved game."),
    }
    Ok(())
}

fn run_stats_command(settings: &Settings, today: PuzzleDate, data_dir: &Path) -> Result<()> {
    let stats = FileStats::open(data_dir).context("Failed to read stats")?;
    print_stats_summary(&stats.summary(settings.word_length, today), settings.word_length);
    Ok(())
}

fn run_verify_command(source: &EmbeddedPuzzles) -> Result<()> {
    let report = run_verify(source);
    print_verify_report(&report);
    if !report.is_clean() {
        bail!("Word lists have problems");
    }
    Ok(())
}

fn run_score_command(guess: &str, secret: &str) -> Result<()> {
    let result = score_guess(guess, secret)?;
    print_score_result(&result);
    Ok(())
}
