//! Duolog: statistics engine for two-person chat transcripts
//!
//! Transcript → ParticipantResolver → {Lexical, Temporal, Streak, ReplyLatency}
//! → RelationshipScorer

pub mod config;
pub mod core;
pub mod types;

// =============================================================================
// LEXICAL
// =============================================================================

/// Number of entries returned by the top-words ranking
pub const TOP_N_WORDS: usize = 6;

/// Characters stripped from both ends of a whitespace token
pub const STRIP_CHARS: &str = ".,!\"";

// =============================================================================
// REPLY LATENCY
// =============================================================================

/// First hour of the sleep window (inclusive)
pub const SLEEP_START_HOUR: u32 = 23;

/// Last hour of the sleep window (exclusive)
pub const SLEEP_END_HOUR: u32 = 4;

/// Gaps longer than this are a conversation break, not a reply
pub const MAX_REPLY_GAP_MINUTES: f64 = 300.0;

// =============================================================================
// STREAKS
// =============================================================================

/// Two representative timestamps at most this far apart continue a streak
pub const STREAK_WINDOW_HOURS: i64 = 24;

/// Largest accepted streak window (one leap year)
pub const MAX_STREAK_WINDOW_HOURS: i64 = 24 * 366;

// =============================================================================
// RELATIONSHIP SCORE WEIGHTS
// =============================================================================

/// s1: message share imbalance
pub const SCORE_WEIGHT_MESSAGE_SHARE: f64 = 15.0;
/// s2: |f1 - f2| term of the streak imbalance
pub const SCORE_WEIGHT_STREAK_GAP: f64 = 10.0;
/// s2: distance of each participant's streak from the overall streak
pub const SCORE_WEIGHT_STREAK_SHORTFALL: f64 = 5.0;
/// s3: overall streak against active days
pub const SCORE_WEIGHT_CONSISTENCY: f64 = 2.0;
/// s3 is dropped once the chat spans more active days than this
pub const SCORE_CONSISTENCY_MAX_DAYS: usize = 365;
/// s4: bonus when both participants share a busiest weekday
pub const SCORE_WEEKDAY_BONUS: f64 = 1.0;
/// s5: penalty per minute of average reply time
pub const SCORE_WEIGHT_REPLY_MINUTES: f64 = 0.25;
/// s6: words-per-message imbalance
pub const SCORE_WEIGHT_WORDS: f64 = 5.0;
/// s7: messages-per-day imbalance
pub const SCORE_WEIGHT_DAILY_SHARE: f64 = 20.0;

/// Score every penalty is subtracted from
pub const SCORE_BASE: f64 = 100.0;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
