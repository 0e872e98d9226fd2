//! TUI application state and logic

use super::timeline::RevealTimeline;
use crate::config::Settings;
use crate::core::{MAX_LENGTH, MIN_LENGTH};
use crate::engine::GameStatus;
use crate::output::share_text;
use crate::puzzle::{GameMode, PuzzleDate, PuzzleSource};
use crate::session::{GameSession, LoadRequest, PendingLoad, SessionSinks};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Redraw interval while waiting for input
const TICK: Duration = Duration::from_millis(50);

/// Messages kept on screen
const MAX_MESSAGES: usize = 5;

/// Where the app is in its lifecycle
pub enum Phase {
    /// The puzzle is loading on a worker thread
    Loading(PendingLoad),
    Playing(Box<GameSession>),
    /// Loading failed; `r` retries
    Failed(String),
}

/// Everything the app needs to load and play a puzzle
pub struct AppConfig {
    pub settings: Settings,
    pub mode: GameMode,
    pub today: PuzzleDate,
    pub source: Arc<dyn PuzzleSource + Send + Sync>,
    pub sinks: SessionSinks,
    /// Settings changed in the app are written here
    pub settings_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

/// Application state
pub struct App {
    pub phase: Phase,
    pub messages: Vec<Message>,
    pub timeline: Option<RevealTimeline>,
    pub show_help: bool,
    pub should_quit: bool,
    settings: Settings,
    mode: GameMode,
    today: PuzzleDate,
    source: Arc<dyn PuzzleSource + Send + Sync>,
    sinks: Option<SessionSinks>,
    settings_path: Option<PathBuf>,
}

impl App {
    /// Create the app and start loading the puzzle
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let AppConfig {
            settings,
            mode,
            today,
            source,
            sinks,
            settings_path,
        } = config;

        let mut app = Self {
            phase: Phase::Failed(String::new()),
            messages: Vec::new(),
            timeline: None,
            show_help: false,
            should_quit: false,
            settings,
            mode,
            today,
            source,
            sinks: Some(sinks),
            settings_path,
        };
        app.start_loading();
        app
    }

    #[must_use]
    pub fn session(&self) -> Option<&GameSession> {
        match &self.phase {
            Phase::Playing(session) => Some(&**session),
            Phase::Loading(_) | Phase::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// True while the newest row is still flipping
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.timeline.is_some()
    }

    fn start_loading(&mut self) {
        let request = LoadRequest {
            mode: self.mode,
            word_length: self.settings.word_length,
        };
        log::info!("loading {} puzzle for {}", self.mode, self.today);
        self.phase = Phase::Loading(PendingLoad::spawn(
            Arc::clone(&self.source),
            request,
            self.today,
        ));
    }

    /// Advance background work: finished loads and finished animations
    pub fn tick(&mut self, now: Instant) {
        self.poll_load();

        let finished = self
            .timeline
            .as_ref()
            .filter(|timeline| timeline.is_done(now))
            .map(RevealTimeline::outcome);
        if let Some(outcome) = finished {
            self.timeline = None;
            self.announce(outcome);
        }
    }

    fn poll_load(&mut self) {
        let result = match &self.phase {
            Phase::Loading(pending) => pending.try_take(),
            Phase::Playing(_) | Phase::Failed(_) => return,
        };
        let Some(result) = result else {
            return;
        };

        match result {
            Ok(loaded) => {
                let Some(sinks) = self.sinks.take() else {
                    self.phase = Phase::Failed("Storage is unavailable".to_string());
                    return;
                };
                let session =
                    GameSession::from_loaded(self.settings, self.mode, self.today, loaded, sinks);
                if session.used_fallback() {
                    self.add_message(
                        "Today's puzzle could not be loaded; playing a backup word.",
                        MessageStyle::Error,
                    );
                }
                if session.was_restored() {
                    self.add_message("Welcome back! Resuming today's game.", MessageStyle::Info);
                } else {
                    self.add_message(
                        "Type a word and press Enter. Tab uses your lifeline.",
                        MessageStyle::Info,
                    );
                }
                if session.state().status().is_terminal() {
                    self.add_message("Today's puzzle is done. Come back tomorrow!", MessageStyle::Info);
                }
                self.phase = Phase::Playing(Box::new(session));
            }
            Err(e) => {
                log::warn!("puzzle load failed: {e}");
                self.phase = Phase::Failed(e.to_string());
                self.add_message("Could not load a puzzle. Press r to retry.", MessageStyle::Error);
            }
        }
    }

    fn announce(&mut self, outcome: GameStatus) {
        let Some(session) = self.session() else {
            return;
        };
        let state = session.state();
        let (text, style) = match outcome {
            GameStatus::Won => {
                let praise = match state.attempt_index() {
                    1 => "🎯 HOLE IN ONE!",
                    2 => "🔥 Magnificent!",
                    3 => "✨ Splendid!",
                    4 => "👏 Great!",
                    5 => "🎉 Nice!",
                    _ => "😅 Phew!",
                };
                (
                    format!("{praise} Solved in {}.", state.attempt_index()),
                    MessageStyle::Success,
                )
            }
            GameStatus::Lost => (
                format!(
                    "Out of guesses. The word was {}.",
                    state.secret().text().to_uppercase()
                ),
                MessageStyle::Error,
            ),
            GameStatus::Playing => return,
        };
        self.add_message(&text, style);
    }

    /// Share text for the current game, if one is loaded
    #[must_use]
    pub fn share(&self) -> Option<String> {
        self.session()
            .map(|s| share_text(s.state(), s.mode(), s.puzzle_date()))
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        if self.messages.len() > MAX_MESSAGES {
            self.messages.remove(0);
        }
    }

    /// Handle one key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                return;
            }
            KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::F(1) => {
                self.show_help = !self.show_help;
                return;
            }
            _ => {}
        }

        match self.phase {
            Phase::Loading(_) => {}
            Phase::Failed(_) => {
                if key.code == KeyCode::Char('r') {
                    self.add_message("Retrying...", MessageStyle::Info);
                    self.start_loading();
                }
            }
            Phase::Playing(_) => self.handle_game_key(key, ctrl),
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent, ctrl: bool) {
        match key.code {
            KeyCode::Char('r') if ctrl => self.reset(),
            KeyCode::F(2) => {
                let word_length = if self.settings.word_length >= MAX_LENGTH {
                    MIN_LENGTH
                } else {
                    self.settings.word_length + 1
                };
                self.change_settings(Settings {
                    word_length,
                    ..self.settings
                });
            }
            KeyCode::F(3) => self.change_settings(Settings {
                reveal_vowels: !self.settings.reveal_vowels,
                ..self.settings
            }),
            KeyCode::F(4) => self.change_settings(Settings {
                random_mode: !self.settings.random_mode,
                ..self.settings
            }),
            KeyCode::Tab => self.use_lifeline(),
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                if let Phase::Playing(session) = &mut self.phase {
                    session.backspace();
                }
            }
            KeyCode::Char(c) if c.is_ascii_alphabetic() && !ctrl => {
                if let Phase::Playing(session) = &mut self.phase {
                    session.type_letter(c);
                }
            }
            _ => {}
        }
    }

    fn submit(&mut self) {
        let Phase::Playing(session) = &mut self.phase else {
            return;
        };
        match session.submit_current() {
            Ok(transition) => {
                self.timeline = Some(RevealTimeline::start(&transition, Instant::now()));
            }
            Err(e) => {
                let notice = e.notice();
                self.add_message(notice, MessageStyle::Error);
            }
        }
    }

    fn use_lifeline(&mut self) {
        let Phase::Playing(session) = &mut self.phase else {
            return;
        };
        let message = match session.reveal() {
            Some(position) => (
                format!("💡 Revealed position {}.", position + 1),
                MessageStyle::Success,
            ),
            None if session.state().status().is_terminal() => {
                ("The game is over.".to_string(), MessageStyle::Info)
            }
            None => ("No lifeline left.".to_string(), MessageStyle::Error),
        };
        self.add_message(&message.0, message.1);
    }

    fn reset(&mut self) {
        let Phase::Playing(session) = &mut self.phase else {
            return;
        };
        session.reset();
        self.timeline = None;
        self.add_message("🔄 Starting over.", MessageStyle::Info);
    }

    fn change_settings(&mut self, next: Settings) {
        if let Err(e) = next.validate() {
            self.add_message(&e.to_string(), MessageStyle::Error);
            return;
        }
        let Phase::Playing(session) = &mut self.phase else {
            return;
        };

        match session.apply_settings(next, self.source.as_ref()) {
            Ok(restarted) => {
                self.settings = next;
                self.mode = session.mode();
                if restarted {
                    self.timeline = None;
                    let text = format!(
                        "New {} game: {} letters{}.",
                        self.mode,
                        next.word_length,
                        if next.reveal_vowels { ", vowels shown" } else { "" }
                    );
                    self.add_message(&text, MessageStyle::Info);
                }
                self.save_settings();
            }
            Err(e) => {
                log::warn!("could not apply settings: {e}");
                self.add_message(&e.to_string(), MessageStyle::Error);
            }
        }
    }

    fn save_settings(&self) {
        if let Some(path) = &self.settings_path
            && let Err(e) = self.settings.save(path)
        {
            log::warn!("could not save settings: {e}");
        }
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling. The terminal is restored first.
pub fn run_tui(app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if event::poll(TICK)?
            && let Event::Key(key) = event::read()?
            // Key release and repeat events are ignored
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key);
        }

        if app.should_quit {
            break;
        }
    }

    if let Some(share) = app.share()
        && app
            .session()
            .is_some_and(|s| s.state().status().is_terminal())
    {
        log::info!("finished game:\n{share}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemorySnapshotStore;
    use crate::puzzle::{Calendar, EmbeddedPuzzles};
    use std::thread;

    fn today() -> PuzzleDate {
        PuzzleDate::from_ymd(2025, 4, 1).unwrap()
    }

    fn loaded_app(store: &MemorySnapshotStore) -> App {
        let mut app = App::new(AppConfig {
            settings: Settings::default(),
            mode: GameMode::Daily,
            today: today(),
            source: Arc::new(EmbeddedPuzzles::new(Calendar::pinned(today()))),
            sinks: SessionSinks {
                store: Box::new(store.clone()),
                stats: None,
            },
            settings_path: None,
        });
        for _ in 0..200 {
            app.tick(Instant::now());
            if app.session().is_some() {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }
        assert!(app.session().is_some(), "puzzle did not load");
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_word(app: &mut App, word: &str) {
        for c in word.chars() {
            press(app, KeyCode::Char(c));
        }
        press(app, KeyCode::Enter);
    }

    #[test]
    fn typing_and_submitting_a_win() {
        let store = MemorySnapshotStore::new();
        let mut app = loaded_app(&store);
        let secret = app.session().unwrap().state().secret().text().to_string();

        type_word(&mut app, &secret);
        assert!(app.is_animating());
        assert_eq!(
            app.session().unwrap().state().status(),
            GameStatus::Won
        );

        app.tick(Instant::now() + Duration::from_secs(5));
        assert!(!app.is_animating());
        assert_eq!(app.messages.last().unwrap().style, MessageStyle::Success);
        assert!(app.share().unwrap().contains(" 1/6"));
    }

    #[test]
    fn incomplete_guess_shows_notice() {
        let store = MemorySnapshotStore::new();
        let mut app = loaded_app(&store);
        type_word(&mut app, "ab");
        let last = app.messages.last().unwrap();
        assert_eq!(last.text, "Not enough letters");
        assert_eq!(app.session().unwrap().state().attempt_index(), 0);
    }

    #[test]
    fn lifeline_only_once() {
        let store = MemorySnapshotStore::new();
        let mut app = loaded_app(&store);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.messages.last().unwrap().style, MessageStyle::Success);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.messages.last().unwrap().text, "No lifeline left.");
    }

    #[test]
    fn cycling_length_starts_a_new_game() {
        let store = MemorySnapshotStore::new();
        let mut app = loaded_app(&store);
        press(&mut app, KeyCode::F(2));
        assert_eq!(app.settings().word_length, 6);
        assert_eq!(app.session().unwrap().state().word_length(), 6);
    }

    #[test]
    fn escape_quits() {
        let store = MemorySnapshotStore::new();
        let mut app = loaded_app(&store);
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }
}
