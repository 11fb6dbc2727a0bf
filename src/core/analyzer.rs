//! Chat Analyzer: one entry point over every statistic family
//!
//! `resolve` validates the transcript and labels its messages once; every
//! family method then works on the resolved chat. `analyze` computes every
//! family and feeds the results into the scorer.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::core::{
    LexicalAnalyzer, ParticipantResolver, RelationshipScorer, ReplyLatencyAnalyzer,
    StreakDetector, TemporalAggregator,
};
use crate::types::{
    ActivityAverages, AnalysisError, AnalysisReport, DayBucket, DayOfWeek, Histogram,
    LengthStats, MessageCounts, MostActiveWeekday, PerParticipant, RelationshipScore,
    ReplyAnalysis, ResolvedChat, ScoreInputs, StarterCounts, StreakRecord, StreakSummary,
    TopWord, Transcript, WordCounts,
};

/// Facade over the analysis engines
#[derive(Debug, Clone)]
pub struct ChatAnalyzer {
    config: AnalysisConfig,
    resolver: ParticipantResolver,
    lexical: LexicalAnalyzer,
    temporal: TemporalAggregator,
    streaks: StreakDetector,
    latency: ReplyLatencyAnalyzer,
    scorer: RelationshipScorer,
}

impl Default for ChatAnalyzer {
    fn default() -> Self {
        Self::from_config(AnalysisConfig::default())
    }
}

impl ChatAnalyzer {
    /// Create analyzer with default tuning
    pub fn new() -> Self {
        Self::default()
    }

    /// Create analyzer from configuration
    pub fn from_config(config: AnalysisConfig) -> Self {
        Self {
            resolver: ParticipantResolver::new(),
            lexical: LexicalAnalyzer::from_config(&config),
            temporal: TemporalAggregator::new(),
            streaks: StreakDetector::from_config(&config),
            latency: ReplyLatencyAnalyzer::from_config(&config),
            scorer: RelationshipScorer::new(),
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Validate and split the transcript into A and B
    pub fn resolve<'a>(&self, transcript: &'a Transcript) -> Result<ResolvedChat<'a>, AnalysisError> {
        self.resolver.resolve(transcript)
    }

    pub fn top_words(&self, chat: &ResolvedChat) -> Vec<TopWord> {
        self.lexical.top_n_words(chat)
    }

    pub fn message_counts(&self, chat: &ResolvedChat) -> MessageCounts {
        self.temporal.message_counts(chat)
    }

    pub fn word_counts(&self, chat: &ResolvedChat) -> WordCounts {
        self.lexical.word_counts(chat)
    }

    pub fn shared_vocabulary(&self, chat: &ResolvedChat) -> Vec<String> {
        self.lexical.shared_vocabulary_for(chat)
    }

    pub fn active_days(&self, chat: &ResolvedChat) -> usize {
        self.temporal.total_active_days(chat.messages())
    }

    pub fn messages_per_day(&self, chat: &ResolvedChat) -> DayBucket {
        self.temporal.messages_per_day(chat)
    }

    pub fn average_messages_per_day(&self, chat: &ResolvedChat) -> Result<ActivityAverages, AnalysisError> {
        self.temporal.average_messages_per_active_day(chat)
    }

    pub fn weekly_stats(&self, chat: &ResolvedChat) -> Histogram<DayOfWeek> {
        self.temporal.weekly_histogram(chat)
    }

    pub fn hourly_stats(&self, chat: &ResolvedChat) -> Histogram<String> {
        self.temporal.hourly_histogram(chat)
    }

    pub fn most_active_weekday(&self, chat: &ResolvedChat) -> MostActiveWeekday {
        self.temporal.most_active_weekday(chat)
    }

    pub fn message_length_stats(&self, chat: &ResolvedChat) -> PerParticipant<LengthStats> {
        self.temporal.message_length_statistics(chat)
    }

    pub fn reply_times(&self, chat: &ResolvedChat) -> ReplyAnalysis {
        self.latency.analyze(chat.messages())
    }

    pub fn conversation_starters(&self, chat: &ResolvedChat) -> StarterCounts {
        self.temporal.conversation_starters(chat)
    }

    pub fn streaks(&self, chat: &ResolvedChat) -> StreakSummary {
        self.streaks.longest_streaks(chat)
    }

    /// Overall streak ending on `today`
    pub fn current_streak(&self, chat: &ResolvedChat, today: NaiveDate) -> StreakRecord {
        self.streaks.current_overall(chat, today)
    }

    pub fn relationship_score(&self, chat: &ResolvedChat) -> RelationshipScore {
        let streaks = self.streaks(chat);
        let inputs = ScoreInputs {
            messages: self.message_counts(chat).per_participant(),
            streaks: streaks.per_participant(),
            overall_streak: streaks.overall.length,
            active_days: self.active_days(chat),
            weekdays: weekday_inputs(&self.most_active_weekday(chat)),
            average_reply_minutes: self.reply_times(chat).overall.average,
            words_per_message: word_inputs(&self.word_counts(chat)),
            messages_per_day: daily_inputs(self.average_messages_per_day(chat)),
        };
        self.scorer.score(&inputs)
    }

    /// Every statistic family plus the composite score
    pub fn analyze(&self, transcript: &Transcript, today: NaiveDate) -> Result<AnalysisReport, AnalysisError> {
        let chat = self.resolve(transcript)?;

        let message_counts = self.message_counts(&chat);
        let word_counts = self.word_counts(&chat);
        let active_days = self.active_days(&chat);
        let averages = self.average_messages_per_day(&chat);
        let most_active_weekday = self.most_active_weekday(&chat);
        let reply_times = self.reply_times(&chat);
        let streaks = self.streaks(&chat);

        let inputs = ScoreInputs {
            messages: message_counts.per_participant(),
            streaks: streaks.per_participant(),
            overall_streak: streaks.overall.length,
            active_days,
            weekdays: weekday_inputs(&most_active_weekday),
            average_reply_minutes: reply_times.overall.average,
            words_per_message: word_inputs(&word_counts),
            messages_per_day: daily_inputs(averages.clone()),
        };
        let relationship = self.scorer.score(&inputs);

        debug!(?inputs, "score inputs");
        info!(
            chat = %transcript.name,
            messages = message_counts.total,
            active_days,
            score = relationship.score,
            "analysis complete"
        );

        Ok(AnalysisReport {
            message_counts,
            top_words: self.top_words(&chat),
            word_counts,
            shared_vocabulary: self.shared_vocabulary(&chat),
            active_days,
            messages_per_day: self.messages_per_day(&chat),
            average_messages_per_day: averages.unwrap_or_default(),
            weekly: self.weekly_stats(&chat),
            hourly: self.hourly_stats(&chat),
            most_active_weekday,
            message_lengths: self.message_length_stats(&chat),
            reply_times,
            conversation_starters: self.conversation_starters(&chat),
            current_streak: self.current_streak(&chat, today),
            streaks,
            relationship,
            participants: chat.names,
        })
    }
}

fn weekday_inputs(weekday: &MostActiveWeekday) -> PerParticipant<Option<DayOfWeek>> {
    PerParticipant::new(weekday.a, weekday.b)
}

/// An empty group contributes 0 words per message
fn word_inputs(counts: &WordCounts) -> PerParticipant<f64> {
    counts.averages.map(|average| average.unwrap_or(0.0))
}

/// No active days contributes 0 messages per day
fn daily_inputs(averages: Result<ActivityAverages, AnalysisError>) -> PerParticipant<f64> {
    averages
        .map(|averages| PerParticipant::new(averages.a, averages.b))
        .unwrap_or_default()
}

// =============================================================================
// TESTS
// =============================================================================
