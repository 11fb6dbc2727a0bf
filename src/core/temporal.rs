//! Temporal Aggregator: day, weekday and hour buckets
//!
//! Timestamps are local wall-clock time; nothing is shifted to UTC.
//! A message whose timestamp does not parse is skipped by the component
//! that needed the parse and counted in that component's `skipped`.

use std::collections::{BTreeMap, HashSet};
use chrono::{Datelike, NaiveDateTime, NaiveTime, Timelike};
use tracing::{debug, warn};

use crate::types::{
    ActivityAverages, AnalysisError, DayBucket, DayOfWeek, Histogram, LengthStats, Message,
    MessageCounts, MostActiveWeekday, Participant, PerParticipant, ResolvedChat, StarterCounts,
};

/// Time-bucketed activity statistics
#[derive(Debug, Clone, Default)]
pub struct TemporalAggregator;

impl TemporalAggregator {
    /// Create new aggregator
    pub fn new() -> Self {
        Self
    }

    /// Messages per participant and in total
    pub fn message_counts(&self, chat: &ResolvedChat) -> MessageCounts {
        let a = chat.group(Participant::A).len();
        let b = chat.group(Participant::B).len();
        MessageCounts { total: a + b, a, b }
    }

    /// Distinct calendar dates with at least one message
    pub fn total_active_days(&self, messages: &[Message]) -> usize {
        messages
            .iter()
            .map(Message::date_key)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Per-date counts, zero-filled for the quiet participant
    pub fn messages_per_day(&self, chat: &ResolvedChat) -> DayBucket {
        let mut days = DayBucket::new();
        for (participant, message) in chat.labelled() {
            let counts = days.entry(message.date_key().to_string()).or_default();
            *counts.get_mut(participant) += 1;
        }
        days
    }

    /// Monday..Sunday histogram, weekday taken from the date alone
    pub fn weekly_histogram(&self, chat: &ResolvedChat) -> Histogram<DayOfWeek> {
        let mut histogram = Histogram::zeroed(DayOfWeek::ALL);

        for (participant, message) in chat.labelled() {
            match message.parsed_date() {
                Ok(date) => {
                    let day = DayOfWeek::from(date.weekday());
                    if let Some(counts) = histogram.buckets.get_mut(&day) {
                        *counts.get_mut(participant) += 1;
                    }
                }
                Err(_) => histogram.skipped += 1,
            }
        }

        log_skipped("weekly histogram", histogram.skipped);
        histogram
    }

    /// "00".."23" histogram by wall-clock hour
    pub fn hourly_histogram(&self, chat: &ResolvedChat) -> Histogram<String> {
        let mut histogram = Histogram::zeroed((0..24).map(|h| format!("{:02}", h)));

        for (participant, message) in chat.labelled() {
            let hour = message
                .time_part()
                .and_then(|t| NaiveTime::parse_from_str(t, "%H:%M:%S").ok())
                .map(|t| t.hour());

            match hour {
                Some(hour) => {
                    if let Some(counts) = histogram.buckets.get_mut(&format!("{:02}", hour)) {
                        *counts.get_mut(participant) += 1;
                    }
                }
                None => histogram.skipped += 1,
            }
        }

        log_skipped("hourly histogram", histogram.skipped);
        histogram
    }

    /// Busiest weekday per participant and overall
    pub fn most_active_weekday(&self, chat: &ResolvedChat) -> MostActiveWeekday {
        let weekly = self.weekly_histogram(chat);
        let days = || weekly.buckets.iter().map(|(day, counts)| (*day, *counts));

        MostActiveWeekday {
            a: busiest(days().map(|(day, c)| (day, c.a))),
            b: busiest(days().map(|(day, c)| (day, c.b))),
            overall: busiest(days().map(|(day, c)| (day, c.a + c.b))),
        }
    }

    /// Messages per active day
    pub fn average_messages_per_active_day(
        &self,
        chat: &ResolvedChat,
    ) -> Result<ActivityAverages, AnalysisError> {
        let days = self.total_active_days(chat.messages());
        if days == 0 {
            return Err(AnalysisError::DivisionByZero {
                quantity: "average messages per active day",
            });
        }

        let counts = self.message_counts(chat);
        let days = days as f64;
        Ok(ActivityAverages {
            a: counts.a as f64 / days,
            b: counts.b as f64 / days,
            overall: counts.total as f64 / days,
        })
    }

    /// Character length statistics of plain-text messages
    pub fn message_length_statistics(&self, chat: &ResolvedChat) -> PerParticipant<LengthStats> {
        chat.groups.map(|group| length_stats(group))
    }

    /// One starter credit per date to whoever sent its earliest message
    pub fn conversation_starters(&self, chat: &ResolvedChat) -> StarterCounts {
        let mut firsts: BTreeMap<&str, (NaiveDateTime, Participant)> = BTreeMap::new();
        let mut skipped = 0;

        for (participant, message) in chat.labelled() {
            let Ok(at) = message.parsed_timestamp() else {
                skipped += 1;
                continue;
            };
            firsts
                .entry(message.date_key())
                .and_modify(|first| {
                    if at < first.0 {
                        *first = (at, participant);
                    }
                })
                .or_insert((at, participant));
        }

        log_skipped("conversation starters", skipped);

        let mut counts = PerParticipant::default();
        for (_, participant) in firsts.values() {
            *counts.get_mut(*participant) += 1;
        }
        StarterCounts { counts, skipped }
    }
}

/// Highest count wins; ties go to the alphabetically first name
fn busiest(counts: impl Iterator<Item = (DayOfWeek, usize)>) -> Option<DayOfWeek> {
    counts
        .filter(|(_, count)| *count > 0)
        .max_by(|x, y| x.1.cmp(&y.1).then_with(|| y.0.name().cmp(x.0.name())))
        .map(|(day, _)| day)
}

fn length_stats(messages: &[&Message]) -> LengthStats {
    let lengths: Vec<usize> = messages
        .iter()
        .filter_map(|m| m.text())
        .map(|t| t.chars().count())
        .collect();

    if lengths.is_empty() {
        return LengthStats::default();
    }

    let total: usize = lengths.iter().sum();
    LengthStats {
        text_messages: lengths.len(),
        total,
        min: lengths.iter().copied().min().unwrap_or(0),
        max: lengths.iter().copied().max().unwrap_or(0),
        average: total as f64 / lengths.len() as f64,
    }
}

fn log_skipped(component: &str, skipped: usize) {
    if skipped > 0 {
        warn!(component, skipped, "skipped messages with malformed timestamps");
    } else {
        debug!(component, "all timestamps parsed");
    }
}

// =============================================================================
// TESTS
// =============================================================================
