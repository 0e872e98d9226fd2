//! End-to-end game scenarios through the session and persistence layers

use daily_wordle::config::Settings;
use daily_wordle::core::{LetterStatus, Word, evaluate};
use daily_wordle::engine::{GameState, GameStatus, GuessError, LockedLetters};
use daily_wordle::persistence::{
    FileSnapshotStore, MemorySnapshotStore, PersistenceController, SnapshotStore,
};
use daily_wordle::puzzle::{Dictionary, GameMode, Puzzle, PuzzleDate, PuzzleError, PuzzleSource};
use daily_wordle::session::{GameSession, SessionSinks};
use daily_wordle::stats::{FileStats, StatsSummary};

/// Serves one fixed word for every day
struct FixedPuzzle(&'static str);

impl PuzzleSource for FixedPuzzle {
    fn load_daily(&self, _word_length: usize, random_mode: bool) -> Result<Puzzle, PuzzleError> {
        Ok(Puzzle {
            word: Word::new(self.0).unwrap(),
            clue: Some("test clue".to_string()),
            date: day(10),
            is_today: !random_mode,
        })
    }

    fn load_by_date(&self, date: PuzzleDate, _word_length: usize) -> Result<Puzzle, PuzzleError> {
        Ok(Puzzle {
            word: Word::new(self.0).unwrap(),
            clue: None,
            date,
            is_today: false,
        })
    }
}

fn day(d: u32) -> PuzzleDate {
    PuzzleDate::from_ymd(2025, 6, d).unwrap()
}

fn dictionary() -> Dictionary {
    Dictionary::embedded(5).unwrap()
}

fn session(secret: &'static str, store: Box<dyn SnapshotStore>, today: PuzzleDate) -> GameSession {
    GameSession::start(
        Settings::default(),
        GameMode::Daily,
        today,
        &FixedPuzzle(secret),
        SessionSinks { store, stats: None },
    )
    .unwrap()
}

#[test]
fn crane_is_solved_on_the_second_guess() {
    let mut state = GameState::new(Word::new("crane").unwrap(), None, LockedLetters::new(), 6);
    let dictionary = dictionary();

    let first = state.submit_guess("slate", &dictionary).unwrap();
    use LetterStatus::{Absent, Correct};
    assert_eq!(
        first.feedback.statuses(),
        &[Absent, Absent, Correct, Absent, Correct]
    );
    assert_eq!(first.newly_locked, vec![2, 4]);
    assert_eq!(state.status(), GameStatus::Playing);

    let second = state.submit_guess("crane", &dictionary).unwrap();
    assert!(second.feedback.is_perfect());
    assert_eq!(state.status(), GameStatus::Won);
    assert_eq!(state.attempt_index(), 2);
    assert!(state.locked().covers(5));
}

#[test]
fn bunny_is_lost_after_six_misses() {
    let mut state = GameState::new(Word::new("bunny").unwrap(), None, LockedLetters::new(), 6);
    let dictionary = dictionary();

    for (i, guess) in ["crane", "slate", "ghost", "light", "pious", "world"]
        .into_iter()
        .enumerate()
    {
        assert_eq!(state.status(), GameStatus::Playing, "before guess {}", i + 1);
        state.submit_guess(guess, &dictionary).unwrap();
    }

    assert_eq!(state.status(), GameStatus::Lost);
    assert_eq!(state.attempt_index(), 6);
    assert_eq!(
        state.submit_guess("bunny", &dictionary),
        Err(GuessError::GameOver)
    );
}

#[test]
fn duplicate_letters_are_not_overcounted() {
    let feedback = evaluate("erase", "speed").unwrap();
    assert_eq!(feedback.to_string(), "Y--YY");
}

#[test]
fn rejected_guesses_leave_no_trace() {
    let mut state = GameState::new(Word::new("crane").unwrap(), None, LockedLetters::new(), 6);
    let dictionary = dictionary();

    assert!(matches!(
        state.submit_guess("cra", &dictionary),
        Err(GuessError::IncompleteGuess { .. })
    ));
    assert!(matches!(
        state.submit_guess("qqqqq", &dictionary),
        Err(GuessError::NotInDictionary(_))
    ));
    assert_eq!(state.attempt_index(), 0);
    assert!(state.last_error().is_some());

    state.submit_guess("slate", &dictionary).unwrap();
    assert!(state.last_error().is_none());
}

#[test]
fn file_store_restores_the_same_day() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSnapshotStore::new(dir.path()).unwrap();

    let mut first = session("crane", Box::new(store.clone()), day(10));
    first.submit("slate").unwrap();
    first.type_letter('c');
    let expected = first.state().clone();
    drop(first);

    let resumed = session("crane", Box::new(store), day(10));
    assert!(resumed.was_restored());
    let state = resumed.state();
    assert_eq!(state.attempts(), expected.attempts());
    assert_eq!(state.locked(), expected.locked());
    assert_eq!(state.status(), expected.status());
    assert_eq!(state.current_guess(), expected.current_guess());
}

#[test]
fn rollover_discards_yesterdays_game() {
    let store = MemorySnapshotStore::new();
    let mut yesterday = session("crane", Box::new(store.clone()), day(10));
    yesterday.submit("slate").unwrap();
    drop(yesterday);

    let mut controller = PersistenceController::new(store.clone());
    assert!(controller.restore(day(11)).is_none());
    assert_eq!(store.contents(), None);

    let today = session("crane", Box::new(store.clone()), day(11));
    assert!(!today.was_restored());
    assert_eq!(today.state().attempt_index(), 0);
}

#[test]
fn legacy_snapshot_is_migrated_on_start() {
    let store = MemorySnapshotStore::with_contents(
        r#"{
            "wordLength": 5,
            "secretWord": "CRANE",
            "clue": "test clue",
            "attempts": ["SLATE"],
            "lockedLetters": {"2": "A", "4": "E"},
            "revealedLetters": {"0": true},
            "gameStatus": "playing",
            "attemptIndex": 1,
            "letterRevealsRemaining": 0,
            "currentDay": "2025-06-10",
            "currentGuess": ""
        }"#,
    );

    let session = session("crane", Box::new(store.clone()), day(10));
    assert!(session.was_restored());
    assert_eq!(session.state().attempt_index(), 1);
    assert_eq!(session.state().fixed_letter(0), Some('c'));
    assert_eq!(session.state().reveals_remaining(), 0);
    assert_eq!(session.keyboard().status('c'), Some(LetterStatus::Correct));

    // The store now holds the current format
    let saved = store.contents().unwrap();
    assert!(saved.contains("\"version\""));
    assert!(saved.contains("\"date\""));
}

#[test]
fn won_snapshot_shows_the_whole_word() {
    let store = MemorySnapshotStore::with_contents(
        r#"{
            "wordLength": 5, "secretWord": "crane",
            "attempts": ["slate", "crane"],
            "lockedLetters": {"2": "a"},
            "revealedLetters": [],
            "gameStatus": "won",
            "attemptIndex": 2,
            "date": "2025-06-10"
        }"#,
    );

    let mut controller = PersistenceController::new(store);
    let state = controller.restore(day(10)).unwrap();
    assert_eq!(state.status(), GameStatus::Won);
    for (i, letter) in "crane".chars().enumerate() {
        assert_eq!(state.locked().get(i), Some(letter));
    }
}

#[test]
fn snapshot_for_another_puzzle_is_replaced() {
    let store = MemorySnapshotStore::new();
    let mut old = session("crane", Box::new(store.clone()), day(10));
    old.submit("slate").unwrap();
    drop(old);

    let fresh = session("bunny", Box::new(store), day(10));
    assert!(!fresh.was_restored());
    assert_eq!(fresh.state().secret().text(), "bunny");
    assert_eq!(fresh.state().attempt_index(), 0);
}

#[test]
fn finished_daily_game_is_recorded_once() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSnapshotStore::new(dir.path()).unwrap();

    let start = |store: FileSnapshotStore| {
        GameSession::start(
            Settings::default(),
            GameMode::Daily,
            day(10),
            &FixedPuzzle("crane"),
            SessionSinks {
                store: Box::new(store),
                stats: Some(Box::new(FileStats::open(dir.path()).unwrap())),
            },
        )
        .unwrap()
    };

    let mut game = start(store.clone());
    game.submit("slate").unwrap();
    game.submit("crane").unwrap();
    drop(game);

    // Restarting a finished day restores it without recording it again
    let replay = start(store);
    assert!(replay.was_restored());
    assert_eq!(replay.state().status(), GameStatus::Won);
    drop(replay);

    let stats = FileStats::open(dir.path()).unwrap();
    assert_eq!(stats.records().len(), 1);
    let summary: StatsSummary = stats.summary(5, day(10));
    assert_eq!(summary.won, 1);
    assert_eq!(summary.current_streak, 1);
    assert_eq!(summary.distribution.get(&2), Some(&1));
}

#[test]
fn random_games_leave_the_store_alone() {
    let store = MemorySnapshotStore::new();
    let mut game = GameSession::start(
        Settings::default(),
        GameMode::Random,
        day(10),
        &FixedPuzzle("crane"),
        SessionSinks {
            store: Box::new(store.clone()),
            stats: None,
        },
    )
    .unwrap();
    game.submit("crane").unwrap();
    assert_eq!(game.state().status(), GameStatus::Won);
    assert_eq!(store.contents(), None);
}
