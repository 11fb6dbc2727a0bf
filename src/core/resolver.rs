//! Participant Resolver: labels every message A (counterpart) or B (owner)
//!
//! The owner is recognised by the synthetic sender id "user" + chat id.
//! Single pass, first match wins; this is not a majority vote.

use tracing::debug;

use crate::types::{AnalysisError, Participant, ParticipantNames, ResolvedChat, Transcript};

/// Splits a transcript into the two participant groups
#[derive(Debug, Clone, Default)]
pub struct ParticipantResolver;

impl ParticipantResolver {
    /// Create new resolver
    pub fn new() -> Self {
        Self
    }

    /// Validate and label the transcript
    pub fn resolve<'a>(&self, transcript: &'a Transcript) -> Result<ResolvedChat<'a>, AnalysisError> {
        transcript.validate()?;

        let owner_id = transcript.owner_id();
        let mut name_a: Option<String> = None;
        let mut name_b: Option<String> = None;
        let mut labels = Vec::with_capacity(transcript.len());

        for message in &transcript.messages {
            if message.sender_id == owner_id {
                if name_b.is_none() {
                    name_b = Some(message.display_name().to_string());
                }
                labels.push(Participant::B);
            } else {
                if name_a.is_none() {
                    name_a = Some(message.display_name().to_string());
                }
                labels.push(Participant::A);
            }
        }

        let names = ParticipantNames {
            a: name_a.unwrap_or_default(),
            b: name_b.unwrap_or_else(|| transcript.name.trim().to_lowercase()),
        };

        debug!(
            owner_id = %owner_id,
            a = %names.a,
            b = %names.b,
            "resolved participants"
        );

        Ok(ResolvedChat::new(names, &transcript.messages, labels))
    }
}

// =============================================================================
// TESTS
// =============================================================================
