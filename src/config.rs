//! Analysis configuration
//!
//! Every field defaults to the constants in the crate root, so an empty
//! JSON object (or no file at all) yields the standard behaviour.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    MAX_REPLY_GAP_MINUTES, MAX_STREAK_WINDOW_HOURS, SLEEP_END_HOUR, SLEEP_START_HOUR,
    STREAK_WINDOW_HOURS, STRIP_CHARS, TOP_N_WORDS,
};

/// How two active days are judged adjacent by the streak detector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum StreakAdjacency {
    /// Representative timestamps at most `streak_window_hours` apart
    #[default]
    TimestampDelta,
    /// Calendar dates exactly one day apart
    CalendarDay,
}

/// Tunables for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Size of the top-words ranking
    pub top_n: usize,
    /// Characters trimmed from both ends of each token
    pub strip_chars: String,
    /// Sleep window start hour (inclusive)
    pub sleep_start_hour: u32,
    /// Sleep window end hour (exclusive)
    pub sleep_end_hour: u32,
    /// Reply gaps above this are ignored
    pub max_reply_gap_minutes: f64,
    /// Streak continuation window
    pub streak_window_hours: i64,
    pub streak_adjacency: StreakAdjacency,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_n: TOP_N_WORDS,
            strip_chars: STRIP_CHARS.to_string(),
            sleep_start_hour: SLEEP_START_HOUR,
            sleep_end_hour: SLEEP_END_HOUR,
            max_reply_gap_minutes: MAX_REPLY_GAP_MINUTES,
            streak_window_hours: STREAK_WINDOW_HOURS,
            streak_adjacency: StreakAdjacency::default(),
        }
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl AnalysisConfig {
    /// Parse from a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Reject values the engines cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sleep_start_hour > 23 || self.sleep_end_hour > 23 {
            return Err(ConfigError::Invalid(format!(
                "sleep hours must be within 0..=23, got {}..{}",
                self.sleep_start_hour, self.sleep_end_hour
            )));
        }
        if self.max_reply_gap_minutes.is_nan() || self.max_reply_gap_minutes < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "max_reply_gap_minutes must be non-negative, got {}",
                self.max_reply_gap_minutes
            )));
        }
        if !(1..=MAX_STREAK_WINDOW_HOURS).contains(&self.streak_window_hours) {
            return Err(ConfigError::Invalid(format!(
                "streak_window_hours must be within 1..={}, got {}",
                MAX_STREAK_WINDOW_HOURS, self.streak_window_hours
            )));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
