//! Integration tests for the full analysis report
//!
//! Runs every statistic family over a small exported chat and checks the
//! numbers by hand.

use chrono::NaiveDate;
use duolog::config::{AnalysisConfig, StreakAdjacency};
use duolog::core::ChatAnalyzer;
use duolog::types::{
    AnalysisReport, DayOfWeek, MessageCounts, MessageText, PerParticipant, StreakRecord,
    Transcript,
};
use pretty_assertions::assert_eq;

const CHAT: &str = include_str!("fixtures/chat.json");

fn chat() -> Transcript {
    Transcript::from_json(CHAT).unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn report() -> AnalysisReport {
    ChatAnalyzer::new().analyze(&chat(), day(2024, 3, 10)).unwrap()
}

#[test]
fn test_fixture_loads_rich_text() {
    let transcript = chat();
    assert_eq!(transcript.len(), 9);
    assert_eq!(transcript.owner_id(), "user42");

    let rich = &transcript.messages[3];
    assert!(matches!(rich.text, MessageText::NonText(_)));
    assert_eq!(rich.text(), None);
    assert_eq!(transcript.messages[1].reply_to_id, Some(1));
}

#[test]
fn test_participants_and_counts() {
    let report = report();
    assert_eq!(report.participants, PerParticipant::new("Ann".to_string(), "Bob".to_string()));
    assert_eq!(report.message_counts, MessageCounts { total: 9, a: 5, b: 4 });
    assert_eq!(report.active_days, 4);
}

#[test]
fn test_lexical_statistics() {
    let report = report();

    let words: Vec<&str> = report.top_words.iter().map(|w| w.word.as_str()).collect();
    assert_eq!(words, vec!["coffee", "morning", "again?", "always", "ann", "bob"]);
    assert_eq!(report.top_words[0].counts, PerParticipant::new(2, 1));

    assert_eq!(report.shared_vocabulary, vec!["coffee".to_string(), "morning".to_string()]);

    assert_eq!(report.word_counts.totals, PerParticipant::new(13, 7));
    assert_eq!(report.word_counts.averages.a, Some(2.6));
    // The rich-text message counts in the denominator
    assert_eq!(report.word_counts.averages.b, Some(1.75));
}

#[test]
fn test_temporal_statistics() {
    let report = report();

    assert_eq!(report.messages_per_day.len(), 4);
    assert_eq!(report.messages_per_day["2024-03-01"], PerParticipant::new(2, 1));
    assert_eq!(report.messages_per_day["2024-03-10"], PerParticipant::new(1, 1));

    assert_eq!(report.average_messages_per_day.a, 1.25);
    assert_eq!(report.average_messages_per_day.b, 1.0);
    assert_eq!(report.average_messages_per_day.overall, 2.25);

    // 2024-03-01 is a Friday
    assert_eq!(report.weekly.buckets[&DayOfWeek::Friday], PerParticipant::new(2, 1));
    assert_eq!(report.weekly.buckets[&DayOfWeek::Sunday], PerParticipant::new(2, 2));
    assert_eq!(report.weekly.buckets[&DayOfWeek::Monday], PerParticipant::new(0, 0));
    assert_eq!(report.weekly.buckets.len(), 7);

    assert_eq!(report.hourly.buckets.len(), 24);
    assert_eq!(report.hourly.buckets["08"], PerParticipant::new(2, 2));
    assert_eq!(report.hourly.buckets["09"], PerParticipant::new(2, 1));
    assert_eq!(report.hourly.buckets["23"], PerParticipant::new(1, 0));

    // Ann ties Friday and Sunday; Friday sorts first
    assert_eq!(report.most_active_weekday.a, Some(DayOfWeek::Friday));
    assert_eq!(report.most_active_weekday.b, Some(DayOfWeek::Sunday));
    assert_eq!(report.most_active_weekday.overall, Some(DayOfWeek::Sunday));

    assert_eq!(report.conversation_starters.counts, PerParticipant::new(2, 2));
    assert_eq!(report.conversation_starters.skipped, 0);
}

#[test]
fn test_message_lengths() {
    let report = report();
    let lengths = report.message_lengths;

    assert_eq!(lengths.a.text_messages, 5);
    assert_eq!(lengths.a.total, 76);
    assert_eq!(lengths.a.min, 13);
    assert_eq!(lengths.a.max, 19);
    assert_eq!(lengths.a.average, 15.2);

    assert_eq!(lengths.b.text_messages, 3);
    assert_eq!(lengths.b.min, 8);
    assert_eq!(lengths.b.max, 20);
}

#[test]
fn test_reply_times() {
    let report = report();
    let overall = &report.reply_times.overall;

    // 4, 6, 5 and 15 minutes; the 23:30 answer falls in the sleep window
    assert_eq!(overall.samples, 4);
    assert_eq!(overall.average, 7.5);
    assert_eq!(overall.min, 4.0);
    assert_eq!(overall.max, 15.0);
    assert_eq!(report.reply_times.per_day["2024-03-01"].average, 5.0);
    assert!(report.reply_times.per_day["2024-03-10"].is_empty());
    assert_eq!(report.reply_times.skipped, 0);
}

#[test]
fn test_streaks() {
    let report = report();

    assert_eq!(report.streaks.overall, StreakRecord::new(3, "2024-03-01", "2024-03-03"));
    assert_eq!(report.streaks.a.length, 3);
    assert_eq!(report.streaks.b.length, 3);
    assert_eq!(report.streaks.skipped, 0);
    assert_eq!(report.current_streak, StreakRecord::new(1, "2024-03-10", "2024-03-10"));

    let later = ChatAnalyzer::new().analyze(&chat(), day(2024, 3, 11)).unwrap();
    assert_eq!(later.current_streak, StreakRecord::none());
}

#[test]
fn test_relationship_score() {
    let report = report();
    let c = &report.relationship.components;

    assert!((c.s1 - 3.0).abs() < 1e-9);
    assert_eq!(c.s2, 0.0);
    assert!((c.s3 - 0.5).abs() < 1e-9);
    assert_eq!(c.s4, 0.0);
    assert!((c.s5 - 1.875).abs() < 1e-9);
    assert!((c.s6 - (1.0 - 1.75 / 2.6) * 5.0).abs() < 1e-9);
    assert!((c.s7 - 20.0 / 9.0).abs() < 1e-9);
    assert_eq!(report.relationship.score, 91.0);
}

#[test]
fn test_config_changes_results() {
    let config = AnalysisConfig {
        top_n: 2,
        max_reply_gap_minutes: 5.0,
        streak_adjacency: StreakAdjacency::CalendarDay,
        ..AnalysisConfig::default()
    };
    let report = ChatAnalyzer::from_config(config)
        .analyze(&chat(), day(2024, 3, 10))
        .unwrap();

    assert_eq!(report.top_words.len(), 2);
    // Only the 4 and 5 minute replies stay under the cap
    assert_eq!(report.reply_times.overall.samples, 2);
    assert_eq!(report.streaks.overall.length, 3);
}

#[test]
fn test_report_serializes() {
    let report = report();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["participants"]["a"], "Ann");
    assert_eq!(json["message_counts"]["total"], 9);
    assert_eq!(json["weekly"]["buckets"]["friday"]["a"], 2);
    assert_eq!(json["relationship"]["score"], 91.0);
    assert_eq!(json["current_streak"]["start_date"], "2024-03-10");
    assert_eq!(json["hourly"]["buckets"].as_object().unwrap().len(), 24);
}
