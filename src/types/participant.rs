//! Participant labels and per-participant grouping

use serde::{Deserialize, Serialize};

use crate::types::Message;

/// Canonical participant label
///
/// A is the counterpart, B is the transcript owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Participant {
    A,
    B,
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// One value per participant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerParticipant<T> {
    pub a: T,
    pub b: T,
}

impl<T> PerParticipant<T> {
    pub fn new(a: T, b: T) -> Self {
        Self { a, b }
    }

    pub fn get(&self, participant: Participant) -> &T {
        match participant {
            Participant::A => &self.a,
            Participant::B => &self.b,
        }
    }

    pub fn get_mut(&mut self, participant: Participant) -> &mut T {
        match participant {
            Participant::A => &mut self.a,
            Participant::B => &mut self.b,
        }
    }

    /// Apply `f` to both values
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> PerParticipant<U> {
        PerParticipant {
            a: f(&self.a),
            b: f(&self.b),
        }
    }

    /// Swap A and B
    pub fn swapped(self) -> Self {
        Self { a: self.b, b: self.a }
    }
}

/// Display names of both participants; A may be empty
pub type ParticipantNames = PerParticipant<String>;

/// Messages of each participant, in transcript order
pub type ParticipantGroups<'a> = PerParticipant<Vec<&'a Message>>;

/// A transcript whose messages have been labelled A or B
///
/// Borrowed from the transcript and rebuilt on every analysis call.
#[derive(Debug, Clone)]
pub struct ResolvedChat<'a> {
    pub names: ParticipantNames,
    pub groups: ParticipantGroups<'a>,
    messages: &'a [Message],
    labels: Vec<Participant>,
}

impl<'a> ResolvedChat<'a> {
    /// Build from messages and one label per message
    pub fn new(names: ParticipantNames, messages: &'a [Message], labels: Vec<Participant>) -> Self {
        debug_assert_eq!(messages.len(), labels.len());
        let mut groups = ParticipantGroups::default();
        for (message, label) in messages.iter().zip(&labels) {
            groups.get_mut(*label).push(message);
        }
        Self {
            names,
            groups,
            messages,
            labels,
        }
    }

    /// All messages, in transcript order
    pub fn messages(&self) -> &'a [Message] {
        self.messages
    }

    /// Messages paired with their label, in transcript order
    pub fn labelled(&self) -> impl Iterator<Item = (Participant, &'a Message)> + '_ {
        self.labels.iter().copied().zip(self.messages.iter())
    }

    /// Messages of one participant
    pub fn group(&self, participant: Participant) -> &[&'a Message] {
        self.groups.get(participant)
    }

    /// Total message count
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
