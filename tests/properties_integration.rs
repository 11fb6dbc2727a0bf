//! Cross-component properties
//!
//! Relations that must hold between statistic families on any transcript.

use chrono::NaiveDate;
use duolog::core::ChatAnalyzer;
use duolog::types::{AnalysisError, Message, PerParticipant, Transcript};
use pretty_assertions::assert_eq;

const CHAT: &str = include_str!("fixtures/chat.json");

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
}

fn fixture() -> Transcript {
    Transcript::from_json(CHAT).unwrap()
}

/// Generated chat with uneven activity over a few weeks
fn generated() -> Transcript {
    let mut messages = Vec::new();
    let mut id = 0;
    for day in 1..=20u32 {
        if day % 7 == 3 {
            continue;
        }
        for slot in 0..(day % 4 + 1) {
            id += 1;
            let (sender, name) = if (day + slot) % 3 == 0 { ("user99", "Zed") } else { ("user5", "Kim") };
            let hour = 7 + slot * 4 + day % 3;
            messages.push(Message::new(
                id,
                sender,
                name,
                format!("2024-05-{:02}T{:02}:{:02}:00", day, hour, (day * 7) % 60),
                format!("message {} on day {} hi", slot, day),
            ));
        }
    }
    Transcript::new("Kim", 99, messages)
}

fn samples() -> Vec<Transcript> {
    vec![fixture(), generated()]
}

#[test]
fn test_counts_sum_to_total() {
    let analyzer = ChatAnalyzer::new();
    for transcript in samples() {
        let chat = analyzer.resolve(&transcript).unwrap();
        let counts = analyzer.message_counts(&chat);
        assert_eq!(counts.a + counts.b, counts.total);
        assert_eq!(counts.total, transcript.len());
    }
}

#[test]
fn test_active_days_match_day_buckets() {
    let analyzer = ChatAnalyzer::new();
    for transcript in samples() {
        let chat = analyzer.resolve(&transcript).unwrap();
        let days = analyzer.active_days(&chat);
        let buckets = analyzer.messages_per_day(&chat);
        assert_eq!(days, buckets.len());

        let bucketed: usize = buckets.values().map(|c| c.a + c.b).sum();
        assert_eq!(bucketed, transcript.len());
    }
}

#[test]
fn test_histograms_cover_every_message() {
    let analyzer = ChatAnalyzer::new();
    for transcript in samples() {
        let chat = analyzer.resolve(&transcript).unwrap();
        let weekly = analyzer.weekly_stats(&chat);
        let hourly = analyzer.hourly_stats(&chat);
        assert_eq!(weekly.counted() + weekly.skipped, transcript.len());
        assert_eq!(hourly.counted() + hourly.skipped, transcript.len());
    }
}

#[test]
fn test_starters_one_per_active_day() {
    let analyzer = ChatAnalyzer::new();
    for transcript in samples() {
        let chat = analyzer.resolve(&transcript).unwrap();
        let starters = analyzer.conversation_starters(&chat);
        let days = analyzer.active_days(&chat);
        assert_eq!(starters.skipped, 0);
        assert_eq!(starters.counts.a + starters.counts.b, days);
    }
}

#[test]
fn test_streaks_bounded() {
    let analyzer = ChatAnalyzer::new();
    for transcript in samples() {
        let chat = analyzer.resolve(&transcript).unwrap();
        let streaks = analyzer.streaks(&chat);
        let days = analyzer.active_days(&chat);
        assert!(streaks.overall.length >= 1);
        assert!(streaks.overall.length <= days);
        assert!(streaks.a.length <= days);
        assert!(streaks.b.length <= days);
        assert!(streaks.overall.start_date <= streaks.overall.end_date);
    }
}

#[test]
fn test_reply_statistics_ordered() {
    let analyzer = ChatAnalyzer::new();
    for transcript in samples() {
        let chat = analyzer.resolve(&transcript).unwrap();
        let replies = analyzer.reply_times(&chat);
        let overall = replies.overall;
        if overall.samples > 0 {
            assert!(overall.min <= overall.average);
            assert!(overall.average <= overall.max);
            assert!(overall.max <= 300.0);
        }
        let per_day: usize = replies.per_day.values().map(|s| s.samples).sum();
        assert_eq!(per_day, overall.samples);
    }
}

#[test]
fn test_score_invariant_under_relabel() {
    let analyzer = ChatAnalyzer::new();
    for transcript in samples() {
        let counterpart_id = transcript
            .messages
            .iter()
            .find(|m| m.sender_id != transcript.owner_id())
            .map(|m| m.sender_id.trim_start_matches("user").parse::<i64>().unwrap())
            .unwrap();

        let mut relabelled = transcript.clone();
        relabelled.id = counterpart_id;

        let original = analyzer.analyze(&transcript, today()).unwrap();
        let swapped = analyzer.analyze(&relabelled, today()).unwrap();

        assert_eq!(swapped.participants, original.participants.clone().swapped());
        assert_eq!(
            PerParticipant::new(swapped.message_counts.b, swapped.message_counts.a),
            PerParticipant::new(original.message_counts.a, original.message_counts.b)
        );
        assert_eq!(swapped.relationship.score, original.relationship.score);
    }
}

#[test]
fn test_analysis_is_idempotent() {
    let analyzer = ChatAnalyzer::new();
    for transcript in samples() {
        let first = analyzer.analyze(&transcript, today()).unwrap();
        let second = analyzer.analyze(&transcript, today()).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_message_order_does_not_change_report() {
    let analyzer = ChatAnalyzer::new();
    let transcript = generated();
    let mut reversed = transcript.clone();
    reversed.messages.reverse();

    let forward = analyzer.analyze(&transcript, today()).unwrap();
    let backward = analyzer.analyze(&reversed, today()).unwrap();

    assert_eq!(forward.message_counts, backward.message_counts);
    assert_eq!(forward.messages_per_day, backward.messages_per_day);
    assert_eq!(forward.streaks, backward.streaks);
    assert_eq!(forward.reply_times, backward.reply_times);
    assert_eq!(forward.conversation_starters, backward.conversation_starters);
}

#[test]
fn test_three_day_streak_then_gap() {
    let transcript = Transcript::new(
        "Ann",
        2,
        vec![
            Message::new(1, "user1", "Ann", "2024-03-01T10:00:00", "a"),
            Message::new(2, "user2", "Bob", "2024-03-02T10:00:00", "b"),
            Message::new(3, "user1", "Ann", "2024-03-03T10:00:00", "c"),
            Message::new(4, "user2", "Bob", "2024-03-07T10:00:00", "d"),
        ],
    );
    let analyzer = ChatAnalyzer::new();
    let chat = analyzer.resolve(&transcript).unwrap();
    let streaks = analyzer.streaks(&chat);

    assert_eq!(streaks.overall.length, 3);
    assert_eq!(streaks.overall.start_date, "2024-03-01");
    assert_eq!(streaks.overall.end_date, "2024-03-03");
    assert_eq!(streaks.a.length, 1);
    assert_eq!(streaks.b.length, 1);

    let current = analyzer.current_streak(&chat, NaiveDate::from_ymd_opt(2024, 3, 8).unwrap());
    assert_eq!(current.length, 0);
}

#[test]
fn test_malformed_timestamp_reported_by_every_dated_family() {
    let transcript = Transcript::new(
        "Ann",
        2,
        vec![
            Message::new(1, "user1", "Ann", "2024-03-01T10:00:00", "a"),
            Message::new(2, "user2", "Bob", "yesterday", "b"),
            Message::new(3, "user1", "Ann", "2024-03-02T10:00:00", "c"),
        ],
    );
    let report = ChatAnalyzer::new().analyze(&transcript, today()).unwrap();

    assert_eq!(report.weekly.skipped, 1);
    assert_eq!(report.hourly.skipped, 1);
    assert_eq!(report.streaks.skipped, 1);
    assert_eq!(report.conversation_starters.skipped, 1);
    assert_eq!(report.conversation_starters.counts, PerParticipant::new(2, 0));
    assert_eq!(report.streaks.overall.length, 2);
    assert_eq!(report.streaks.b.length, 0);
}

#[test]
fn test_single_sided_chat() {
    let transcript = Transcript::new(
        "Ann",
        2,
        vec![
            Message::new(1, "user2", "Bob", "2024-03-01T10:00:00", "anyone there"),
            Message::new(2, "user2", "Bob", "2024-03-01T10:05:00", "hello"),
        ],
    );
    let report = ChatAnalyzer::new().analyze(&transcript, today()).unwrap();

    // No counterpart message: A keeps an empty name, B is the owner
    assert_eq!(report.participants.a, "");
    assert_eq!(report.participants.b, "Bob");
    assert_eq!(report.word_counts.averages.a, None);
    assert_eq!(report.reply_times.overall.samples, 0);
    assert!(report.relationship.score.is_finite());
}

#[test]
fn test_empty_transcript_fails() {
    let transcript = Transcript::new("Ann", 2, Vec::new());
    let err = ChatAnalyzer::new().analyze(&transcript, today()).unwrap_err();
    assert_eq!(err, AnalysisError::EmptyTranscript);
    assert_eq!(err.code(), "E101_EMPTY_TRANSCRIPT");
}
