//! Full analysis report

use serde::{Deserialize, Serialize};

use crate::types::{
    ActivityAverages, DayBucket, DayOfWeek, Histogram, LengthStats, MessageCounts,
    MostActiveWeekday, ParticipantNames, PerParticipant, RelationshipScore, ReplyAnalysis,
    StarterCounts, StreakRecord, StreakSummary, TopWord, WordCounts,
};

/// Every statistic family for one transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub participants: ParticipantNames,
    pub message_counts: MessageCounts,
    pub top_words: Vec<TopWord>,
    pub word_counts: WordCounts,
    pub shared_vocabulary: Vec<String>,
    pub active_days: usize,
    pub messages_per_day: DayBucket,
    pub average_messages_per_day: ActivityAverages,
    pub weekly: Histogram<DayOfWeek>,
    pub hourly: Histogram<String>,
    pub most_active_weekday: MostActiveWeekday,
    pub message_lengths: PerParticipant<LengthStats>,
    pub reply_times: ReplyAnalysis,
    pub conversation_starters: StarterCounts,
    pub streaks: StreakSummary,
    pub current_streak: StreakRecord,
    pub relationship: RelationshipScore,
}
