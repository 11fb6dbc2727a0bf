//! Analysis errors with stable reason codes

use serde::Serialize;
use thiserror::Error;

/// Errors raised by the analysis engine
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisError {
    /// Transcript has no messages; nothing is computed
    #[error("transcript contains no messages")]
    EmptyTranscript,

    /// A ratio had a zero denominator
    #[error("division by zero while computing {quantity}")]
    DivisionByZero { quantity: &'static str },

    /// A timestamp did not match `YYYY-MM-DDTHH:MM:SS`
    #[error("message {message_id} has malformed timestamp {value:?}")]
    MalformedTimestamp { message_id: i64, value: String },
}

impl AnalysisError {
    /// Get reason code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyTranscript => "E101_EMPTY_TRANSCRIPT",
            Self::DivisionByZero { .. } => "E102_DIVISION_BY_ZERO",
            Self::MalformedTimestamp { .. } => "E103_MALFORMED_TIMESTAMP",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_messages() {
        let err = AnalysisError::DivisionByZero { quantity: "average words per message" };
        assert_eq!(err.code(), "E102_DIVISION_BY_ZERO");
        assert_eq!(err.to_string(), "division by zero while computing average words per message");
        assert_eq!(AnalysisError::EmptyTranscript.code(), "E101_EMPTY_TRANSCRIPT");
    }
}
