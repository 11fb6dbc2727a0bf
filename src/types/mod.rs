//! Core types for Duolog

mod transcript;
mod participant;
mod error;
mod stats;
mod streak;
mod reply;
mod score;
mod report;

pub use transcript::{Message, MessageText, Transcript, TIMESTAMP_FORMAT, DATE_FORMAT};
pub use participant::{Participant, ParticipantNames, ParticipantGroups, ResolvedChat, PerParticipant};
pub use error::AnalysisError;
pub use stats::{
    DayOfWeek, DayBucket, Histogram, MessageCounts, WordCounts, TopWord,
    LengthStats, ActivityAverages, MostActiveWeekday, StarterCounts,
};
pub use streak::{StreakRecord, StreakSummary};
pub use reply::{ReplyStats, ReplyAnalysis};
pub use score::{ScoreComponents, ScoreInputs, RelationshipScore};
pub use report::AnalysisReport;
