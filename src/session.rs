use std::time::Instant;

use thiserror::Error;
use tracing::debug;

use crate::classify::{classify, CharacterCell};
use crate::difficulty::Difficulty;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    InProgress,
    Complete,
}

/// A snapshot change the session refuses to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputRejected {
    #[error("input grew by {added} characters at once")]
    BulkInsert { added: usize },
    #[error("previously typed text was rewritten")]
    Rewritten,
}

/// One memorize-then-type attempt at a passage
#[derive(Debug, Clone)]
pub struct Session {
    target: Vec<char>,
    input: Vec<char>,
    difficulty: Difficulty,
    pub started_at: Option<Instant>,
    pub finished_at: Option<Instant>,
    mistakes: usize,
}

impl Session {
    pub fn new(text: &str, difficulty: Difficulty) -> Self {
        Self {
            target: text.chars().collect(),
            input: Vec::new(),
            difficulty,
            started_at: None,
            finished_at: None,
            mistakes: 0,
        }
    }

    pub fn target(&self) -> String {
        self.target.iter().collect()
    }

    pub fn input(&self) -> String {
        self.input.iter().collect()
    }

    pub fn target_len(&self) -> usize {
        self.target.len()
    }

    pub fn input_len(&self) -> usize {
        self.input.len()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn mistakes(&self) -> usize {
        self.mistakes
    }

    pub fn phase(&self) -> Phase {
        if self.is_complete() {
            Phase::Complete
        } else if self.started_at.is_some() {
            Phase::InProgress
        } else {
            Phase::NotStarted
        }
    }

    pub fn is_complete(&self) -> bool {
        self.input.len() == self.target.len()
    }

    /// Fraction of the passage typed, in `[0, 1]`
    pub fn progress(&self) -> f64 {
        if self.target.is_empty() {
            return 0.0;
        }
        self.input.len() as f64 / self.target.len() as f64
    }

    /// Append one typed character.
    ///
    /// Only the new character is compared; a mistake stays counted even if it is
    /// later deleted and retyped correctly.
    pub fn push(&mut self, c: char, now: Instant) {
        if self.is_complete() {
            return;
        }

        if self.started_at.is_none() {
            debug!("typing started");
            self.started_at = Some(now);
        }

        let idx = self.input.len();
        if self.target[idx] != c {
            self.mistakes += 1;
            debug!(idx, expected = %self.target[idx], typed = %c, mistakes = self.mistakes, "mistake");
        }
        self.input.push(c);

        if self.is_complete() {
            debug!(mistakes = self.mistakes, "typing finished");
            self.finished_at = Some(now);
        }
    }

    pub fn backspace(&mut self) {
        if self.is_complete() {
            return;
        }
        self.input.pop();
    }

    /// Apply a full snapshot of everything typed so far.
    ///
    /// Only single-character growth of an unchanged prefix or deletion from the end
    /// is accepted; anything else looks like a paste and is rejected untouched.
    /// Snapshots longer than the passage are cut to its length.
    pub fn observe(&mut self, snapshot: &str, now: Instant) -> Result<(), InputRejected> {
        if self.is_complete() {
            return Ok(());
        }

        let next: Vec<char> = snapshot.chars().take(self.target.len()).collect();
        let prev_len = self.input.len();

        if next.len() > prev_len {
            let added = next.len() - prev_len;
            if added > 1 {
                return Err(InputRejected::BulkInsert { added });
            }
            if next[..prev_len] != self.input[..] {
                return Err(InputRejected::Rewritten);
            }
            self.push(next[prev_len], now);
        } else {
            if next[..] != self.input[..next.len()] {
                return Err(InputRejected::Rewritten);
            }
            self.input.truncate(next.len());
        }

        Ok(())
    }

    pub fn cells(&self) -> Vec<CharacterCell> {
        classify(&self.target(), &self.input(), self.difficulty)
    }
}
