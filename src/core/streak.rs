//! Streak Detector: longest and current runs of consecutive active days
//!
//! Runs over the sorted, deduplicated active dates of a subject. Each date
//! is represented by its earliest message. Two neighbouring dates continue
//! a run when their representatives are at most 24h apart (timestamp delta),
//! or, in calendar mode, when the dates are one day apart.
//!
//! Timestamp-delta mode is the historical behaviour: day N 08:00 followed by
//! day N+1 09:00 is 25h and breaks the run.

use std::collections::BTreeMap;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

use crate::config::{AnalysisConfig, StreakAdjacency};
use crate::types::{Message, Participant, ResolvedChat, StreakRecord, StreakSummary, DATE_FORMAT};
use crate::{MAX_STREAK_WINDOW_HOURS, STREAK_WINDOW_HOURS};

/// One active calendar date and its earliest message time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveDay {
    date: NaiveDate,
    first_at: NaiveDateTime,
}

/// Streak detection over active days
#[derive(Debug, Clone)]
pub struct StreakDetector {
    window: Duration,
    adjacency: StreakAdjacency,
}

impl Default for StreakDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl StreakDetector {
    /// Create detector with the 24h timestamp-delta rule
    pub fn new() -> Self {
        Self {
            window: Duration::hours(STREAK_WINDOW_HOURS),
            adjacency: StreakAdjacency::TimestampDelta,
        }
    }

    /// Create detector from configuration
    ///
    /// The window is clamped to `1..=MAX_STREAK_WINDOW_HOURS` for configs
    /// that skipped validation.
    pub fn from_config(config: &AnalysisConfig) -> Self {
        let hours = config.streak_window_hours.clamp(1, MAX_STREAK_WINDOW_HOURS);
        Self {
            window: Duration::hours(hours),
            adjacency: config.streak_adjacency,
        }
    }

    /// Longest streak of A, of B and of both together
    pub fn longest_streaks(&self, chat: &ResolvedChat) -> StreakSummary {
        let (days, skipped) = active_days(chat.messages().iter());
        if skipped > 0 {
            warn!(skipped, "streaks: skipped messages with malformed timestamps");
        }

        let summary = StreakSummary {
            a: self.longest(chat.group(Participant::A).iter().copied()),
            b: self.longest(chat.group(Participant::B).iter().copied()),
            overall: self.longest_run(&days),
            skipped,
        };
        debug!(
            a = summary.a.length,
            b = summary.b.length,
            overall = summary.overall.length,
            skipped,
            "longest streaks"
        );
        summary
    }

    /// Longest run over a set of messages; malformed timestamps are ignored
    pub fn longest<'a>(&self, messages: impl Iterator<Item = &'a Message>) -> StreakRecord {
        let (days, _) = active_days(messages);
        self.longest_run(&days)
    }

    fn longest_run(&self, days: &[ActiveDay]) -> StreakRecord {
        let Some(last) = days.len().checked_sub(1) else {
            return StreakRecord::none();
        };

        let mut best = StreakRecord::none();
        let mut start = 0;

        for i in 1..days.len() {
            if !self.adjacent(&days[i - 1], &days[i]) {
                let run = record(days, start, i - 1);
                if run.length > best.length {
                    best = run;
                }
                start = i;
            }
        }

        // The trailing run wins ties
        let run = record(days, start, last);
        if run.length >= best.length {
            best = run;
        }
        best
    }

    /// Run ending today, walking back from the most recent active day
    ///
    /// Empty when the most recent message is not from `today`.
    pub fn current_streak<'a>(
        &self,
        messages: impl Iterator<Item = &'a Message>,
        today: NaiveDate,
    ) -> StreakRecord {
        let (days, _) = active_days(messages);
        let Some(last) = days.len().checked_sub(1) else {
            return StreakRecord::none();
        };
        if days[last].date != today {
            return StreakRecord::none();
        }

        let mut start = last;
        while start > 0 && self.adjacent(&days[start - 1], &days[start]) {
            start -= 1;
        }
        record(&days, start, last)
    }

    /// Current streak over the whole chat
    pub fn current_overall(&self, chat: &ResolvedChat, today: NaiveDate) -> StreakRecord {
        self.current_streak(chat.messages().iter(), today)
    }

    fn adjacent(&self, earlier: &ActiveDay, later: &ActiveDay) -> bool {
        match self.adjacency {
            StreakAdjacency::TimestampDelta => later.first_at - earlier.first_at <= self.window,
            StreakAdjacency::CalendarDay => (later.date - earlier.date).num_days() <= 1,
        }
    }
}

/// Sorted distinct active days, and how many messages had no usable timestamp
fn active_days<'a>(messages: impl Iterator<Item = &'a Message>) -> (Vec<ActiveDay>, usize) {
    let mut firsts: BTreeMap<NaiveDate, NaiveDateTime> = BTreeMap::new();
    let mut skipped = 0usize;

    for message in messages {
        let Ok(at) = message.parsed_timestamp() else {
            skipped += 1;
            continue;
        };
        firsts
            .entry(at.date())
            .and_modify(|first| *first = (*first).min(at))
            .or_insert(at);
    }

    let days = firsts
        .into_iter()
        .map(|(date, first_at)| ActiveDay { date, first_at })
        .collect();
    (days, skipped)
}

fn record(days: &[ActiveDay], start: usize, end: usize) -> StreakRecord {
    StreakRecord::new(
        end - start + 1,
        days[start].date.format(DATE_FORMAT).to_string(),
        days[end].date.format(DATE_FORMAT).to_string(),
    )
}

// =============================================================================
// TESTS
// =============================================================================
