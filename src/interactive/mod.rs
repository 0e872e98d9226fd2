//! Full-screen terminal game

pub mod app;
pub mod rendering;
pub mod timeline;

pub use app::{App, AppConfig, run_tui};
pub use timeline::RevealTimeline;
