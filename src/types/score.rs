//! Relationship score types

use serde::{Deserialize, Serialize};

use crate::types::{DayOfWeek, PerParticipant};

/// Everything the scorer reads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreInputs {
    /// Messages sent (m1, m2)
    pub messages: PerParticipant<usize>,
    /// Longest streak per participant (c1, c2)
    pub streaks: PerParticipant<usize>,
    /// Longest overall streak (cOverall)
    pub overall_streak: usize,
    /// Distinct active dates (D)
    pub active_days: usize,
    /// Busiest weekday per participant
    pub weekdays: PerParticipant<Option<DayOfWeek>>,
    /// Overall average reply time in minutes (R)
    pub average_reply_minutes: f64,
    /// Average words per message (w1, w2); 0 for an empty group
    pub words_per_message: PerParticipant<f64>,
    /// Average messages per active day (a1, a2)
    pub messages_per_day: PerParticipant<f64>,
}

impl ScoreInputs {
    /// Same inputs with A and B exchanged
    pub fn swapped(&self) -> Self {
        Self {
            messages: self.messages.swapped(),
            streaks: self.streaks.swapped(),
            overall_streak: self.overall_streak,
            active_days: self.active_days,
            weekdays: self.weekdays.swapped(),
            average_reply_minutes: self.average_reply_minutes,
            words_per_message: self.words_per_message.swapped(),
            messages_per_day: self.messages_per_day.swapped(),
        }
    }
}

/// The seven sub-scores
///
/// s4 is a bonus; every other term is a penalty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    /// Message share imbalance
    pub s1: f64,
    /// Streak imbalance
    pub s2: f64,
    /// Overall streak against active days
    pub s3: f64,
    /// Shared busiest weekday
    pub s4: f64,
    /// Reply time
    pub s5: f64,
    /// Words-per-message imbalance
    pub s6: f64,
    /// Daily activity imbalance
    pub s7: f64,
}

impl ScoreComponents {
    /// Penalties minus the weekday bonus
    pub fn net_penalty(&self) -> f64 {
        self.s1 + self.s2 + self.s3 - self.s4 + self.s5 + self.s6 + self.s7
    }
}

/// Final score together with its breakdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelationshipScore {
    /// Rounded, nominally within [0, 100] but not clamped
    pub score: f64,
    pub components: ScoreComponents,
}
