//! Streak records

use serde::{Deserialize, Serialize};

use crate::types::PerParticipant;

/// A run of consecutive active days
///
/// Dates are "YYYY-MM-DD", earliest first. An empty record has length 0
/// and empty dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRecord {
    pub length: usize,
    pub start_date: String,
    pub end_date: String,
}

impl StreakRecord {
    pub fn new(length: usize, start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            length,
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }

    /// No streak
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// Longest streaks per subject
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    pub a: StreakRecord,
    pub b: StreakRecord,
    pub overall: StreakRecord,
    /// Messages left out because their timestamp did not parse
    pub skipped: usize,
}

impl StreakSummary {
    /// Streak lengths of A and B
    pub fn per_participant(&self) -> PerParticipant<usize> {
        PerParticipant::new(self.a.length, self.b.length)
    }
}
