//! Transcript model
//!
//! Mirrors the messenger's JSON chat export:
//! - Transcript = chat identity + ordered messages
//! - Message text is either a plain string or a rich-text structure

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::types::AnalysisError;

/// Timestamp layout used by the export (no timezone)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Calendar date layout (date portion of a timestamp)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Message body
///
/// Rich-text bodies (arrays of spans), stickers and media placeholders land
/// in `NonText` and are kept verbatim so they serialize back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageText {
    Text(String),
    NonText(serde_json::Value),
}

impl Default for MessageText {
    fn default() -> Self {
        Self::NonText(serde_json::Value::Null)
    }
}

impl MessageText {
    /// Plain text, if any
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::NonText(_) => None,
        }
    }
}

impl From<&str> for MessageText {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for MessageText {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<serde_json::Value> for MessageText {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => Self::Text(text),
            other => Self::NonText(other),
        }
    }
}

/// A single exported message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Sender identifier, e.g. "user123"
    #[serde(rename = "from_id", default)]
    pub sender_id: String,
    /// Sender display name (the export writes null for deleted accounts)
    #[serde(rename = "from", default)]
    pub sender_name: Option<String>,
    /// ISO-8601 local wall-clock time, e.g. "2024-03-01T14:05:00"
    #[serde(rename = "date")]
    pub timestamp: String,
    /// Export-side epoch seconds, kept as written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_unixtime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_unixtime: Option<String>,
    #[serde(default)]
    pub text: MessageText,
    #[serde(rename = "reply_to_message_id", default, skip_serializing_if = "Option::is_none")]
    pub reply_to_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub text_entities: Vec<serde_json::Value>,
}

impl Message {
    /// Create a plain message
    pub fn new(
        id: i64,
        sender_id: impl Into<String>,
        sender_name: impl Into<String>,
        timestamp: impl Into<String>,
        text: impl Into<MessageText>,
    ) -> Self {
        Self {
            id,
            kind: "message".to_string(),
            sender_id: sender_id.into(),
            sender_name: Some(sender_name.into()),
            timestamp: timestamp.into(),
            date_unixtime: None,
            edited: None,
            edited_unixtime: None,
            text: text.into(),
            reply_to_id: None,
            text_entities: Vec::new(),
        }
    }

    /// Plain text body, `None` for media and rich text
    pub fn text(&self) -> Option<&str> {
        self.text.as_text()
    }

    /// Display name, empty when the export has none
    pub fn display_name(&self) -> &str {
        self.sender_name.as_deref().unwrap_or("")
    }

    /// Date portion of the timestamp, taken verbatim
    pub fn date_key(&self) -> &str {
        self.timestamp.split('T').next().unwrap_or("")
    }

    /// Time-of-day portion of the timestamp, if present
    pub fn time_part(&self) -> Option<&str> {
        self.timestamp.split('T').nth(1)
    }

    /// Full timestamp, parsed as local wall-clock time
    pub fn parsed_timestamp(&self) -> Result<NaiveDateTime, AnalysisError> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT)
            .map_err(|_| self.malformed())
    }

    /// Calendar date only; the time of day is not looked at
    pub fn parsed_date(&self) -> Result<NaiveDate, AnalysisError> {
        NaiveDate::parse_from_str(self.date_key(), DATE_FORMAT).map_err(|_| self.malformed())
    }

    fn malformed(&self) -> AnalysisError {
        AnalysisError::MalformedTimestamp {
            message_id: self.id,
            value: self.timestamp.clone(),
        }
    }
}

/// An exported two-person chat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Declared chat name (the counterpart's name in a personal chat)
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Numeric chat id; the owner's sender id is "user" + id
    pub id: i64,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Transcript {
    /// Create a transcript
    pub fn new(name: impl Into<String>, id: i64, messages: Vec<Message>) -> Self {
        Self {
            name: name.into(),
            kind: "personal_chat".to_string(),
            id,
            messages,
        }
    }

    /// Parse an export document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reject transcripts the engine cannot analyze
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.messages.is_empty() {
            return Err(AnalysisError::EmptyTranscript);
        }
        Ok(())
    }

    /// Synthetic sender id of the transcript owner
    pub fn owner_id(&self) -> String {
        format!("user{}", self.id)
    }

    /// Message count
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
