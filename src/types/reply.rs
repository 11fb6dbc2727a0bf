//! Reply latency aggregates

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// Aggregate over reply gaps, in minutes
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplyStats {
    pub average: f64,
    pub min: f64,
    pub max: f64,
    /// Number of gaps aggregated; 0 means nothing to measure, not instant replies
    pub samples: usize,
}

impl ReplyStats {
    /// Aggregate a set of gaps; all zeros when empty
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let sum: f64 = samples.iter().sum();
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            average: sum / samples.len() as f64,
            min,
            max,
            samples: samples.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples == 0
    }
}

/// Reply latency for the whole transcript and per calendar date
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplyAnalysis {
    pub overall: ReplyStats,
    pub per_day: BTreeMap<String, ReplyStats>,
    /// Messages left out because their timestamp did not parse
    pub skipped: usize,
}
