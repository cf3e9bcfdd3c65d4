use std::time::Instant;

use crate::difficulty::Difficulty;
use crate::session::Session;

/// Floor applied to the typing time before any rate is derived
pub const MIN_ELAPSED_SECS: f64 = 1.0;

/// Scored outcome of a finished session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Results {
    pub elapsed_secs: f64,
    pub wpm: i64,
    pub accuracy: u32,
    pub mistakes: usize,
    pub chars: usize,
    pub difficulty: Difficulty,
}

impl Results {
    /// Score a session. `None` until the whole passage has been typed.
    pub fn from_session(session: &Session) -> Option<Self> {
        if !session.is_complete() {
            return None;
        }
        let (start, end) = (session.started_at?, session.finished_at?);
        let elapsed = elapsed_secs(start, end);
        let chars = session.target_len();

        Some(Self {
            elapsed_secs: elapsed,
            wpm: wpm(chars, elapsed),
            accuracy: accuracy(chars, session.mistakes()),
            mistakes: session.mistakes(),
            chars,
            difficulty: session.difficulty(),
        })
    }
}

pub fn elapsed_secs(start: Instant, end: Instant) -> f64 {
    end.saturating_duration_since(start)
        .as_secs_f64()
        .max(MIN_ELAPSED_SECS)
}

/// Words per minute with the usual five-chars-per-word convention.
///
/// Not clamped: a very short passage typed in the minimum time can exceed any
/// human rate.
pub fn wpm(chars: usize, elapsed_secs: f64) -> i64 {
    let elapsed = elapsed_secs.max(MIN_ELAPSED_SECS);
    ((chars as f64 / 5.0) / (elapsed / 60.0)).round() as i64
}

/// Percentage of the passage typed without a counted mistake, floored at 0
pub fn accuracy(chars: usize, mistakes: usize) -> u32 {
    if chars == 0 {
        return 0;
    }
    let pct = ((chars as f64 - mistakes as f64) / chars as f64 * 100.0).round();
    pct.max(0.0) as u32
}
