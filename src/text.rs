//! Text normalization and tokenization
//!
//! Produces the lightweight document value every downstream analyzer reuses.
//! A `Document` is immutable once built and carries no identity beyond the
//! scoring call that created it.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub raw: String,
    pub normalized: String,
    pub tokens: Vec<String>,
}

impl Document {
    pub fn new(text: &str) -> Self {
        let raw = text.to_string();
        let normalized = text.trim().to_lowercase();
        let tokens = tokenize(&normalized);

        Self {
            raw,
            normalized,
            tokens,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.tokens.len()
    }

    /// Token set for membership tests. Built on demand; callers that need
    /// repeated lookups should hold on to the returned set.
    pub fn token_set(&self) -> HashSet<&str> {
        self.tokens.iter().map(|t| t.as_str()).collect()
    }
}

/// Tokenize normalized text on Unicode word boundaries. Dotted or slashed
/// skill names ("node.js", "ci/cd") split into parts here; matching those is
/// the character-level scan layer's job, not the tokenizer's.
pub fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words()
        .filter(|w| w.chars().any(|c| c.is_alphanumeric()))
        .map(|w| w.to_lowercase())
        .collect()
}
