//! Tile flip sequencing for a committed guess
//!
//! The game state is already final when a timeline starts. The timeline
//! only decides how much of the newest row the screen shows at a given
//! instant, so dropping or skipping it never changes the game.

use crate::core::{Feedback, LetterStatus};
use crate::engine::{GameStatus, Transition};
use std::time::{Duration, Instant};

/// Delay between consecutive tile flips
pub const FLIP_STEP: Duration = Duration::from_millis(220);

/// Presentation of one accepted guess
#[derive(Debug, Clone)]
pub struct RevealTimeline {
    row: usize,
    feedback: Feedback,
    outcome: GameStatus,
    started: Instant,
    step: Duration,
}

impl RevealTimeline {
    #[must_use]
    pub fn start(transition: &Transition, now: Instant) -> Self {
        Self::with_step(transition, now, FLIP_STEP)
    }

    #[must_use]
    pub fn with_step(transition: &Transition, now: Instant, step: Duration) -> Self {
        Self {
            row: transition.attempt_index.saturating_sub(1),
            feedback: transition.feedback.clone(),
            outcome: transition.status,
            started: now,
            step,
        }
    }

    /// Board row being flipped
    #[must_use]
    pub fn row(&self) -> usize {
        self.row
    }

    /// Game status to announce once the last tile has flipped
    #[must_use]
    pub fn outcome(&self) -> GameStatus {
        self.outcome
    }

    /// Number of tiles flipped at `now`
    #[must_use]
    pub fn flipped(&self, now: Instant) -> usize {
        let elapsed = now.saturating_duration_since(self.started);
        let steps = elapsed.as_millis() / self.step.as_millis().max(1);
        usize::try_from(steps)
            .unwrap_or(usize::MAX)
            .saturating_add(1)
            .min(self.feedback.len())
    }

    /// Status to paint at `position`, `None` while the tile is still face down
    #[must_use]
    pub fn visible_status(&self, position: usize, now: Instant) -> Option<LetterStatus> {
        (position < self.flipped(now)).then(|| self.feedback.status_at(position))
    }

    #[must_use]
    pub fn is_done(&self, now: Instant) -> bool {
        self.flipped(now) >= self.feedback.len()
            && now.saturating_duration_since(self.started)
                >= self.step * u32::try_from(self.feedback.len()).unwrap_or(u32::MAX)
    }
}
