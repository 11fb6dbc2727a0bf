//! Relationship Scorer: folds the other statistics into one number
//!
//! score = round(100 - (s1 + s2 + s3 - s4 + s5 + s6 + s7))
//!
//! Every ratio puts the smaller operand on top, so the score does not
//! change when A and B are exchanged. A zero denominator zeroes its term.

use tracing::debug;

use crate::types::{RelationshipScore, ScoreComponents, ScoreInputs};
use crate::{
    SCORE_BASE, SCORE_CONSISTENCY_MAX_DAYS, SCORE_WEEKDAY_BONUS, SCORE_WEIGHT_CONSISTENCY,
    SCORE_WEIGHT_DAILY_SHARE, SCORE_WEIGHT_MESSAGE_SHARE, SCORE_WEIGHT_REPLY_MINUTES,
    SCORE_WEIGHT_STREAK_GAP, SCORE_WEIGHT_STREAK_SHORTFALL, SCORE_WEIGHT_WORDS,
};

/// Composite relationship scorer
#[derive(Debug, Clone, Default)]
pub struct RelationshipScorer;

impl RelationshipScorer {
    /// Create new scorer
    pub fn new() -> Self {
        Self
    }

    /// Score with full breakdown
    pub fn score(&self, inputs: &ScoreInputs) -> RelationshipScore {
        let components = self.components(inputs);
        let score = (SCORE_BASE - components.net_penalty()).round();

        debug!(score, ?components, "relationship score");
        RelationshipScore { score, components }
    }

    /// The seven sub-scores
    pub fn components(&self, inputs: &ScoreInputs) -> ScoreComponents {
        ScoreComponents {
            s1: message_share(inputs),
            s2: streak_balance(inputs),
            s3: consistency(inputs),
            s4: weekday_bonus(inputs),
            s5: SCORE_WEIGHT_REPLY_MINUTES * inputs.average_reply_minutes,
            s6: imbalance(inputs.words_per_message.a, inputs.words_per_message.b) * SCORE_WEIGHT_WORDS,
            s7: daily_share(inputs),
        }
    }
}

/// 1 - min/max, or 0 when both are zero
fn imbalance(x: f64, y: f64) -> f64 {
    let (low, high) = if x < y { (x, y) } else { (y, x) };
    if high == 0.0 {
        return 0.0;
    }
    1.0 - low / high
}

fn message_share(inputs: &ScoreInputs) -> f64 {
    let total = (inputs.messages.a + inputs.messages.b) as f64;
    if total == 0.0 {
        return 0.0;
    }
    let p1 = inputs.messages.a as f64 * 100.0 / total;
    let p2 = inputs.messages.b as f64 * 100.0 / total;
    imbalance(p1, p2) * SCORE_WEIGHT_MESSAGE_SHARE
}

fn streak_balance(inputs: &ScoreInputs) -> f64 {
    if inputs.overall_streak == 0 {
        return 0.0;
    }
    let overall = inputs.overall_streak as f64;
    let f1 = inputs.streaks.a as f64 / overall;
    let f2 = inputs.streaks.b as f64 / overall;
    (f1 - f2).abs() * SCORE_WEIGHT_STREAK_GAP
        + ((1.0 - f1).abs() + (1.0 - f2).abs()) * SCORE_WEIGHT_STREAK_SHORTFALL
}

fn consistency(inputs: &ScoreInputs) -> f64 {
    if inputs.active_days > SCORE_CONSISTENCY_MAX_DAYS || inputs.active_days == 0 {
        return 0.0;
    }
    (1.0 - inputs.overall_streak as f64 / inputs.active_days as f64) * SCORE_WEIGHT_CONSISTENCY
}

fn weekday_bonus(inputs: &ScoreInputs) -> f64 {
    let days = &inputs.weekdays;
    if days.a.is_some() && days.a == days.b {
        SCORE_WEEKDAY_BONUS
    } else {
        0.0
    }
}

fn daily_share(inputs: &ScoreInputs) -> f64 {
    let (a1, a2) = (inputs.messages_per_day.a, inputs.messages_per_day.b);
    let total = a1 + a2;
    if total == 0.0 {
        return 0.0;
    }
    (a1 / total - a2 / total).abs() * SCORE_WEIGHT_DAILY_SHARE
}

// =============================================================================
// TESTS
// =============================================================================
