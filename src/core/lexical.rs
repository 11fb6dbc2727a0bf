//! Lexical Analyzer: word frequencies, top words, shared vocabulary
//!
//! Two tokenizers are in play:
//! - frequency tokens: whitespace split, configured punctuation trimmed, lowercased
//! - length tokens: runs of ASCII letters and digits

use std::collections::BTreeMap;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::types::{AnalysisError, Message, Participant, PerParticipant, ResolvedChat, TopWord, WordCounts};
use crate::{STRIP_CHARS, TOP_N_WORDS};

lazy_static! {
    static ref RE_ALNUM_TOKEN: Regex = Regex::new(r"[A-Za-z0-9]+").unwrap();
}

/// Word → occurrences
pub type WordFrequency = BTreeMap<String, usize>;

/// Lexical statistics over message text
#[derive(Debug, Clone)]
pub struct LexicalAnalyzer {
    strip_chars: Vec<char>,
    top_n: usize,
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexicalAnalyzer {
    /// Create analyzer with the standard punctuation set and top 6
    pub fn new() -> Self {
        Self {
            strip_chars: STRIP_CHARS.chars().collect(),
            top_n: TOP_N_WORDS,
        }
    }

    /// Create analyzer from configuration
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            strip_chars: config.strip_chars.chars().collect(),
            top_n: config.top_n,
        }
    }

    /// Normalize one whitespace token; may come back empty
    fn clean_word(&self, word: &str) -> String {
        word.trim_matches(|c: char| self.strip_chars.contains(&c)).to_lowercase()
    }

    /// Frequency table over plain-text messages
    pub fn word_frequency(&self, messages: &[&Message]) -> WordFrequency {
        let mut counts = WordFrequency::new();

        for text in messages.iter().filter_map(|m| m.text()) {
            for word in text.split_whitespace() {
                let cleaned = self.clean_word(word);
                if cleaned.is_empty() {
                    continue;
                }
                *counts.entry(cleaned).or_insert(0) += 1;
            }
        }

        counts
    }

    /// Rank words by combined count; ties broken alphabetically
    pub fn top_words(&self, a: &WordFrequency, b: &WordFrequency) -> Vec<TopWord> {
        let mut combined: BTreeMap<&str, PerParticipant<usize>> = BTreeMap::new();
        for (word, count) in a {
            combined.entry(word.as_str()).or_default().a = *count;
        }
        for (word, count) in b {
            combined.entry(word.as_str()).or_default().b = *count;
        }

        let mut ranked: Vec<TopWord> = combined
            .into_iter()
            .map(|(word, counts)| TopWord {
                word: word.to_string(),
                counts,
            })
            .collect();

        ranked.sort_by(|x, y| y.total().cmp(&x.total()).then_with(|| x.word.cmp(&y.word)));
        ranked.truncate(self.top_n);
        ranked
    }

    /// Top words of a resolved chat
    pub fn top_n_words(&self, chat: &ResolvedChat) -> Vec<TopWord> {
        let a = self.word_frequency(chat.group(Participant::A));
        let b = self.word_frequency(chat.group(Participant::B));
        self.top_words(&a, &b)
    }

    /// Alphanumeric token count of one text
    pub fn token_count(text: &str) -> usize {
        RE_ALNUM_TOKEN.find_iter(text).count()
    }

    /// Alphanumeric tokens over all plain-text messages
    pub fn total_words(&self, messages: &[&Message]) -> usize {
        messages
            .iter()
            .filter_map(|m| m.text())
            .map(Self::token_count)
            .sum()
    }

    /// Tokens per message; non-text messages count in the denominator
    pub fn average_words_per_message(&self, messages: &[&Message]) -> Result<f64, AnalysisError> {
        if messages.is_empty() {
            return Err(AnalysisError::DivisionByZero {
                quantity: "average words per message",
            });
        }
        Ok(self.total_words(messages) as f64 / messages.len() as f64)
    }

    /// Token totals and averages for both participants
    pub fn word_counts(&self, chat: &ResolvedChat) -> WordCounts {
        let groups = &chat.groups;
        WordCounts {
            totals: groups.map(|g| self.total_words(g)),
            averages: groups.map(|g| self.average_words_per_message(g).ok()),
        }
    }

    /// Words used by both, most used first; ties broken alphabetically
    pub fn shared_vocabulary(&self, a: &WordFrequency, b: &WordFrequency) -> Vec<String> {
        let mut shared: Vec<(&String, usize)> = a
            .iter()
            .filter_map(|(word, count_a)| b.get(word).map(|count_b| (word, count_a + count_b)))
            .collect();

        shared.sort_by(|x, y| y.1.cmp(&x.1).then_with(|| x.0.cmp(y.0)));
        shared.into_iter().map(|(word, _)| word.clone()).collect()
    }

    /// Shared vocabulary of a resolved chat
    pub fn shared_vocabulary_for(&self, chat: &ResolvedChat) -> Vec<String> {
        let a = self.word_frequency(chat.group(Participant::A));
        let b = self.word_frequency(chat.group(Participant::B));
        let shared = self.shared_vocabulary(&a, &b);
        debug!(vocab_a = a.len(), vocab_b = b.len(), shared = shared.len(), "shared vocabulary");
        shared
    }
}

// =============================================================================
// TESTS
// =============================================================================
