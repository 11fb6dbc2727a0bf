//! Core modules for Duolog

pub mod resolver;
pub mod lexical;
pub mod temporal;
pub mod streak;
pub mod latency;
pub mod scorer;
pub mod analyzer;
pub mod api;

pub use resolver::ParticipantResolver;
pub use lexical::{LexicalAnalyzer, WordFrequency};
pub use temporal::TemporalAggregator;
pub use streak::StreakDetector;
pub use latency::ReplyLatencyAnalyzer;
pub use scorer::RelationshipScorer;
pub use analyzer::ChatAnalyzer;
pub use api::{create_router, run_server};
