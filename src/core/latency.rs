//! Reply-Latency Analyzer: gaps between alternating senders
//!
//! Within each calendar date, every chronologically adjacent pair with
//! different senders is a reply candidate. Candidates touching the sleep
//! window (23:00-04:00) or longer than the cap (300 min) are dropped.

use std::collections::BTreeMap;
use chrono::{NaiveDateTime, Timelike};
use tracing::{debug, warn};

use crate::config::AnalysisConfig;
use crate::types::{Message, ReplyAnalysis, ReplyStats, DATE_FORMAT};
use crate::{MAX_REPLY_GAP_MINUTES, SLEEP_END_HOUR, SLEEP_START_HOUR};

/// Reply time statistics
#[derive(Debug, Clone)]
pub struct ReplyLatencyAnalyzer {
    sleep_start_hour: u32,
    sleep_end_hour: u32,
    max_gap_minutes: f64,
}

impl Default for ReplyLatencyAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplyLatencyAnalyzer {
    /// Create analyzer with the standard sleep window and cap
    pub fn new() -> Self {
        Self {
            sleep_start_hour: SLEEP_START_HOUR,
            sleep_end_hour: SLEEP_END_HOUR,
            max_gap_minutes: MAX_REPLY_GAP_MINUTES,
        }
    }

    /// Create analyzer from configuration
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            sleep_start_hour: config.sleep_start_hour,
            sleep_end_hour: config.sleep_end_hour,
            max_gap_minutes: config.max_reply_gap_minutes,
        }
    }

    /// Whether a time of day falls in the sleep window
    ///
    /// The window may wrap midnight (23..4) or not (1..6).
    pub fn is_sleep_hour(&self, at: &NaiveDateTime) -> bool {
        let hour = at.hour();
        if self.sleep_start_hour <= self.sleep_end_hour {
            hour >= self.sleep_start_hour && hour < self.sleep_end_hour
        } else {
            hour >= self.sleep_start_hour || hour < self.sleep_end_hour
        }
    }

    /// Gap between two messages, if it counts as a reply
    fn reply_gap(&self, prev: &NaiveDateTime, curr: &NaiveDateTime) -> Option<f64> {
        if self.is_sleep_hour(prev) || self.is_sleep_hour(curr) {
            return None;
        }
        let minutes = (*curr - *prev).num_seconds() as f64 / 60.0;
        (minutes <= self.max_gap_minutes).then_some(minutes)
    }

    /// Overall and per-day reply statistics
    pub fn analyze(&self, messages: &[Message]) -> ReplyAnalysis {
        let mut by_day: BTreeMap<String, Vec<(NaiveDateTime, &str)>> = BTreeMap::new();
        let mut skipped = 0;

        for message in messages {
            match message.parsed_timestamp() {
                Ok(at) => by_day
                    .entry(at.date().format(DATE_FORMAT).to_string())
                    .or_default()
                    .push((at, message.sender_id.as_str())),
                Err(_) => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!(skipped, "reply times: skipped messages with malformed timestamps");
        }

        let mut all_gaps = Vec::new();
        let mut per_day = BTreeMap::new();

        for (day, mut day_messages) in by_day {
            // Stable: equal timestamps keep transcript order
            day_messages.sort_by_key(|(at, _)| *at);

            let gaps: Vec<f64> = day_messages
                .windows(2)
                .filter(|pair| pair[0].1 != pair[1].1)
                .filter_map(|pair| self.reply_gap(&pair[0].0, &pair[1].0))
                .collect();

            all_gaps.extend_from_slice(&gaps);
            per_day.insert(day, ReplyStats::from_samples(&gaps));
        }

        let overall = ReplyStats::from_samples(&all_gaps);
        debug!(
            samples = overall.samples,
            average = overall.average,
            days = per_day.len(),
            "reply times"
        );

        ReplyAnalysis {
            overall,
            per_day,
            skipped,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(sender: &str, ts: &str) -> Message {
        Message::new(0, sender, sender, ts, "x")
    }

    #[test]
    fn test_ten_minute_reply() {
        let analyzer = ReplyLatencyAnalyzer::new();
        let result = analyzer.analyze(&[
            msg("user1", "2024-01-01T14:00:00"),
            msg("user2", "2024-01-01T14:10:00"),
        ]);

        assert_eq!(result.overall.samples, 1);
        assert_eq!(result.overall.average, 10.0);
        assert_eq!(result.per_day["2024-01-01"].max, 10.0);
    }

    #[test]
    fn test_sleep_hours_excluded() {
        let analyzer = ReplyLatencyAnalyzer::new();
        let result = analyzer.analyze(&[
            msg("user1", "2024-01-01T23:30:00"),
            msg("user2", "2024-01-01T23:40:00"),
            msg("user1", "2024-01-02T03:59:00"),
            msg("user2", "2024-01-02T04:05:00"),
        ]);

        assert!(result.overall.is_empty());
        assert_eq!(result.overall.average, 0.0);
    }

    #[test]
    fn test_outlier_excluded() {
        let analyzer = ReplyLatencyAnalyzer::new();
        let result = analyzer.analyze(&[
            msg("user1", "2024-01-01T05:00:00"),
            msg("user2", "2024-01-01T11:40:00"),
        ]);
        assert!(result.overall.is_empty());

        // Exactly at the cap still counts
        let result = analyzer.analyze(&[
            msg("user1", "2024-01-01T05:00:00"),
            msg("user2", "2024-01-01T10:00:00"),
        ]);
        assert_eq!(result.overall.samples, 1);
        assert_eq!(result.overall.max, 300.0);
    }

    #[test]
    fn test_same_sender_not_a_reply() {
        let analyzer = ReplyLatencyAnalyzer::new();
        let result = analyzer.analyze(&[
            msg("user1", "2024-01-01T14:00:00"),
            msg("user1", "2024-01-01T14:05:00"),
            msg("user2", "2024-01-01T14:06:00"),
            msg("user1", "2024-01-01T14:09:30"),
        ]);

        assert_eq!(result.overall.samples, 2);
        assert_eq!(result.overall.min, 1.0);
        assert_eq!(result.overall.max, 3.5);
        assert_eq!(result.overall.average, 2.25);
    }

    #[test]
    fn test_pairs_do_not_cross_days() {
        let analyzer = ReplyLatencyAnalyzer::new();
        let result = analyzer.analyze(&[
            msg("user1", "2024-01-01T22:50:00"),
            msg("user2", "2024-01-02T05:00:00"),
        ]);
        assert!(result.overall.is_empty());
        assert_eq!(result.per_day.len(), 2);
    }

    #[test]
    fn test_out_of_order_messages_sorted_within_day() {
        let analyzer = ReplyLatencyAnalyzer::new();
        let result = analyzer.analyze(&[
            msg("user2", "2024-01-01T14:10:00"),
            msg("user1", "2024-01-01T14:00:00"),
        ]);
        assert_eq!(result.overall.average, 10.0);
    }

    #[test]
    fn test_malformed_skipped() {
        let analyzer = ReplyLatencyAnalyzer::new();
        let result = analyzer.analyze(&[
            msg("user1", "2024-01-01T14:00:00"),
            msg("user2", "14:05"),
            msg("user2", "2024-01-01T14:10:00"),
        ]);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.overall.average, 10.0);
    }

    #[test]
    fn test_non_wrapping_sleep_window() {
        let config = AnalysisConfig {
            sleep_start_hour: 1,
            sleep_end_hour: 6,
            ..AnalysisConfig::default()
        };
        let analyzer = ReplyLatencyAnalyzer::from_config(&config);
        let result = analyzer.analyze(&[
            msg("user1", "2024-01-01T23:30:00"),
            msg("user2", "2024-01-01T23:40:00"),
        ]);
        assert_eq!(result.overall.samples, 1);
    }
}
