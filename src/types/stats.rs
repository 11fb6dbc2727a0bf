//! Result types for the lexical and temporal statistics

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

use crate::types::PerParticipant;

/// Day of the week, ordered Monday first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Lowercase English name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

impl std::fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Calendar date ("YYYY-MM-DD") → messages sent that day
pub type DayBucket = BTreeMap<String, PerParticipant<usize>>;

/// Fixed-key histogram of per-participant message counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram<K: Ord> {
    pub buckets: BTreeMap<K, PerParticipant<usize>>,
    /// Messages left out because their timestamp did not parse
    pub skipped: usize,
}

impl<K: Ord> Histogram<K> {
    /// Histogram with every key present and zeroed
    pub fn zeroed(keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            buckets: keys.into_iter().map(|k| (k, PerParticipant::default())).collect(),
            skipped: 0,
        }
    }

    /// Messages counted across all buckets
    pub fn counted(&self) -> usize {
        self.buckets.values().map(|c| c.a + c.b).sum()
    }
}

/// Message totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageCounts {
    pub total: usize,
    pub a: usize,
    pub b: usize,
}

impl MessageCounts {
    pub fn per_participant(&self) -> PerParticipant<usize> {
        PerParticipant::new(self.a, self.b)
    }
}

/// Alphanumeric token totals and per-message averages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordCounts {
    pub totals: PerParticipant<usize>,
    /// `None` when the participant sent no messages
    pub averages: PerParticipant<Option<f64>>,
}

/// One entry of the top-words ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopWord {
    pub word: String,
    pub counts: PerParticipant<usize>,
}

impl TopWord {
    /// Combined count used for ranking
    pub fn total(&self) -> usize {
        self.counts.a + self.counts.b
    }
}

/// Character length statistics over plain-text messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LengthStats {
    /// Messages that carried plain text
    pub text_messages: usize,
    pub total: usize,
    pub min: usize,
    pub max: usize,
    /// 0 when there is no text at all
    pub average: f64,
}

/// Days opened by each participant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarterCounts {
    pub counts: PerParticipant<usize>,
    /// Messages left out because their timestamp did not parse
    pub skipped: usize,
}

/// Messages per active day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityAverages {
    pub a: f64,
    pub b: f64,
    pub overall: f64,
}

/// Busiest weekday; `None` when there is nothing to count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MostActiveWeekday {
    pub a: Option<DayOfWeek>,
    pub b: Option<DayOfWeek>,
    pub overall: Option<DayOfWeek>,
}
