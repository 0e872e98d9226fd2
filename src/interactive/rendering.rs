//! TUI rendering with ratatui
//!
//! Board, keyboard and side panels for the puzzle screen.

use super::app::{App, MessageStyle, Phase};
use super::timeline::RevealTimeline;
use crate::core::LetterStatus;
use crate::engine::{GameState, KeyboardState};
use crate::session::GameSession;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, List, ListItem, Paragraph, Wrap},
};
use std::time::Instant;

const KEYBOARD_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Main content
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    match &app.phase {
        Phase::Playing(session) => {
            let main_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Percentage(55), // Board
                    Constraint::Percentage(45), // Side panel
                ])
                .split(chunks[1]);

            render_board(f, app, session, main_chunks[0]);
            render_side_panel(f, app, session, main_chunks[1]);
        }
        Phase::Loading(_) => render_notice(f, "Loading today's puzzle...", Color::Cyan, chunks[1]),
        Phase::Failed(reason) => render_notice(
            f,
            &format!("Could not load a puzzle: {reason}\n\nPress r to retry or Esc to quit."),
            Color::Red,
            chunks[1],
        ),
    }

    render_status(f, app, chunks[2]);

    if app.show_help {
        let area = f.area();
        render_help(f, area);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let title = match app.session() {
        Some(session) => format!(
            "🟩 DAILY WORDLE  {} · {} · {} letters",
            session.puzzle_date(),
            session.mode(),
            session.state().word_length()
        ),
        None => "🟩 DAILY WORDLE".to_string(),
    };
    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_notice(f: &mut Frame, text: &str, color: Color, area: Rect) {
    let notice = Paragraph::new(text.to_string())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(notice, area);
}

fn status_style(status: LetterStatus) -> Style {
    let bg = match status {
        LetterStatus::Correct => Color::Green,
        LetterStatus::Present => Color::Yellow,
        LetterStatus::Absent => Color::DarkGray,
    };
    Style::default()
        .fg(Color::Black)
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}

fn tile(letter: char, style: Style) -> Span<'static> {
    Span::styled(format!(" {} ", letter.to_ascii_uppercase()), style)
}

fn gap() -> Span<'static> {
    Span::raw(" ")
}

/// Rows of tiles: scored attempts, the input row, then empty rows
fn board_lines(
    state: &GameState,
    timeline: Option<&RevealTimeline>,
    now: Instant,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let face_down = Style::default().fg(Color::White).bg(Color::Gray);

    for (row, attempt) in state.attempts().iter().enumerate() {
        let flipping = timeline.filter(|t| t.row() == row);
        let mut spans = Vec::new();
        for (i, &b) in attempt.word.chars().iter().enumerate() {
            let status = match flipping {
                Some(t) => t.visible_status(i, now),
                None => Some(attempt.feedback.status_at(i)),
            };
            let style = status.map_or(face_down, status_style);
            spans.push(tile(char::from(b), style));
            spans.push(gap());
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    let mut rows_left = state.guesses_left();
    if !state.status().is_terminal() && rows_left > 0 {
        let locked_style = status_style(LetterStatus::Correct);
        let revealed_style = Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let typed_style = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let mut spans = Vec::new();
        for i in 0..state.word_length() {
            let span = if let Some(letter) = state.locked().get(i) {
                tile(letter, locked_style)
            } else if let Some(letter) = state.fixed_letter(i) {
                tile(letter, revealed_style)
            } else {
                match state.current_guess()[i] {
                    Some(letter) => tile(letter, typed_style),
                    None => Span::styled(" _ ", Style::default().fg(Color::DarkGray)),
                }
            };
            spans.push(span);
            spans.push(gap());
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
        rows_left -= 1;
    }

    for _ in 0..rows_left {
        let mut spans = Vec::new();
        for _ in 0..state.word_length() {
            spans.push(Span::styled(" · ", Style::default().fg(Color::DarkGray)));
            spans.push(gap());
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }
    lines
}

fn render_board(f: &mut Frame, app: &App, session: &GameSession, area: Rect) {
    let state = session.state();
    let mut lines = Vec::new();
    if let Some(clue) = state.clue() {
        lines.push(Line::from(vec![
            Span::raw("Clue: "),
            Span::styled(
                clue.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ),
        ]));
        lines.push(Line::from(""));
    }
    lines.extend(board_lines(state, app.timeline.as_ref(), Instant::now()));

    let board = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Board ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(board, area);
}

fn keyboard_lines(keyboard: &KeyboardState) -> Vec<Line<'static>> {
    KEYBOARD_ROWS
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .chars()
                .map(|c| {
                    let style = keyboard
                        .status(c)
                        .map_or_else(|| Style::default().fg(Color::White), status_style);
                    tile(c, style)
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn render_side_panel(f: &mut Frame, app: &App, session: &GameSession, area: Rect) {
    let finished = session.state().status().is_terminal() && !app.is_animating();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                          // Guesses gauge
            Constraint::Length(5),                          // Keyboard
            Constraint::Min(4),                             // Messages
            Constraint::Length(if finished { 10 } else { 0 }), // Share text
        ])
        .split(area);

    render_progress(f, session, chunks[0]);

    let keyboard = Paragraph::new(keyboard_lines(session.keyboard()))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" Keyboard ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(keyboard, chunks[1]);

    render_messages(f, app, chunks[2]);

    if finished && let Some(share) = app.share() {
        let share = Paragraph::new(share).block(
            Block::default()
                .title(" Share ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Green)),
        );
        f.render_widget(share, chunks[3]);
    }
}

fn render_progress(f: &mut Frame, session: &GameSession, area: Rect) {
    let state = session.state();
    let used = state.attempt_index();
    let max = state.max_guesses().max(1);
    let percent = u16::try_from(used * 100 / max).unwrap_or(100).min(100);
    let lifeline = if state.reveals_remaining() > 0 {
        "lifeline ready"
    } else {
        "lifeline used"
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Guesses ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(percent)
        .label(format!("{used}/{max} | {lifeline}"));

    f.render_widget(gauge, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    // Newest first
    let items: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|message| {
            let color = match message.style {
                MessageStyle::Info => Color::Gray,
                MessageStyle::Success => Color::LightGreen,
                MessageStyle::Error => Color::LightRed,
            };
            ListItem::new(Line::from(vec![
                Span::styled("› ", Style::default().fg(Color::DarkGray)),
                Span::styled(message.text.clone(), Style::default().fg(color)),
            ]))
        })
        .collect();

    let log = List::new(items).block(
        Block::default()
            .title(" Log ")
            .borders(Borders::TOP | Borders::BOTTOM),
    );
    f.render_widget(log, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let help_text = match &app.phase {
        Phase::Playing(session) if session.state().status().is_terminal() => {
            "Esc: Quit | Ctrl-R: Replay | F2: Length | F4: Random | F1: Help"
        }
        Phase::Playing(_) => "Enter: Submit | Tab: Lifeline | Ctrl-R: Reset | F1: Help | Esc: Quit",
        Phase::Loading(_) => "Esc: Quit",
        Phase::Failed(_) => "r: Retry | Esc: Quit",
    };

    let settings = app.settings();
    let settings_text = format!(
        "{} letters | vowels {} | {}",
        settings.word_length,
        if settings.reveal_vowels { "on" } else { "off" },
        app.mode()
    );

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    let settings = Paragraph::new(settings_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(settings, chunks[0]);

    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(help, chunks[1]);
}

fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered(area, 60, 16);
    let lines = vec![
        Line::from("Guess the hidden word. After each guess:"),
        Line::from(vec![
            tile('g', status_style(LetterStatus::Correct)),
            Span::raw(" right letter, right spot (locked for later guesses)"),
        ]),
        Line::from(vec![
            tile('y', status_style(LetterStatus::Present)),
            Span::raw(" in the word, elsewhere"),
        ]),
        Line::from(vec![
            tile('x', status_style(LetterStatus::Absent)),
            Span::raw(" not in the word"),
        ]),
        Line::from(""),
        Line::from("Enter      submit the row"),
        Line::from("Tab        lifeline: reveal one letter (once)"),
        Line::from("Ctrl-R     start this puzzle over"),
        Line::from("F2         cycle word length 5-7"),
        Line::from("F3         toggle vowel pre-reveal"),
        Line::from("F4         toggle random puzzles"),
        Line::from("Esc        quit (today's game is saved)"),
    ];
    let help = Paragraph::new(lines).block(
        Block::default()
            .title(" Help (F1 to close) ")
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(Clear, popup);
    f.render_widget(help, popup);
}

/// Rectangle of at most `width` x `height` centered in `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
