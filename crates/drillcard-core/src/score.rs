//! Running score for a drill session.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Correct answers out of counted attempts.
///
/// `correct <= total` always holds; the only way to change a score is
/// through [`Score::record`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    correct: u32,
    total: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Count one attempt, crediting it only when `correct` is true.
    pub fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }

    /// Whole-number percentage, rounding halves up. Zero when nothing has
    /// been attempted.
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let (c, t) = (u64::from(self.correct), u64::from(self.total));
        ((200 * c + t) / (2 * t)) as u32
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({}%)", self.correct, self.total, self.percentage())
    }
}
