//! Feature extraction
//!
//! Derives the fixed, named feature vector every scoring call is keyed by.
//! All values are normalized into [0, 1]; that bound is what keeps cache keys
//! stable at two decimal places, so it is a correctness requirement rather
//! than a cosmetic one.

use crate::impact::ImpactMetrics;
use crate::text;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

pub const FEATURE_TEXT_LENGTH: &str = "text_length";
pub const FEATURE_WORD_COUNT: &str = "word_count";
pub const FEATURE_HAS_EMAIL: &str = "has_email";
pub const FEATURE_HAS_PHONE: &str = "has_phone";
pub const FEATURE_SECTION_BREAKS: &str = "section_breaks";
pub const FEATURE_BULLET_DENSITY: &str = "bullet_density";
pub const FEATURE_JD_OVERLAP: &str = "jd_overlap";
pub const FEATURE_UPPERCASE_RATIO: &str = "uppercase_ratio";
pub const FEATURE_NUMBER_DENSITY: &str = "number_density";

/// Fixed-shape numeric summary of a document. Backed by a sorted map so two
/// vectors built from identical text serialize identically regardless of the
/// order features were computed in.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureVector {
    values: BTreeMap<String, f64>,
}

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> f64 {
        self.values.get(name).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Canonical cache key: names in lexicographic order, values fixed to two
    /// decimal places, joined by `|`. Near-identical inputs map to the same
    /// key only when every feature rounds to the same hundredth.
    pub fn canonical_key(&self) -> String {
        self.values
            .iter()
            .map(|(name, value)| format!("{}:{:.2}", name, value))
            .collect::<Vec<_>>()
            .join("|")
    }
}

pub struct FeatureExtractor {
    email_regex: Regex,
    phone_regex: Regex,
    bullet_regex: Regex,
}

impl FeatureExtractor {
    pub fn new() -> Self {
        let email_regex = Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
            .expect("Invalid email regex");
        let phone_regex =
            Regex::new(r"\b(?:\+?1[-. ]?)?\(?[0-9]{3}\)?[-. ]?[0-9]{3}[-. ]?[0-9]{4}\b")
                .expect("Invalid phone regex");
        let bullet_regex = Regex::new(r"(?m)^\s*[•\-\*–]").expect("Invalid bullet regex");

        Self {
            email_regex,
            phone_regex,
            bullet_regex,
        }
    }

    /// Pure function of its inputs: no side effects, no hidden state.
    pub fn extract(&self, text: &str, job_description: Option<&str>) -> FeatureVector {
        let mut features = FeatureVector::new();

        let char_count = text.chars().count();
        let word_count = text.split_whitespace().count();
        let line_count = text.lines().count().max(1);

        features.set(
            FEATURE_TEXT_LENGTH,
            (char_count as f64 / 10_000.0).min(1.0),
        );
        features.set(FEATURE_WORD_COUNT, (word_count as f64 / 1_000.0).min(1.0));
        features.set(
            FEATURE_HAS_EMAIL,
            if self.email_regex.is_match(text) { 1.0 } else { 0.0 },
        );
        features.set(
            FEATURE_HAS_PHONE,
            if self.phone_regex.is_match(text) { 1.0 } else { 0.0 },
        );

        // Densities are per line so duplicated content leaves them unchanged.
        let section_breaks = text
            .split('\n')
            .collect::<Vec<_>>()
            .windows(2)
            .filter(|w| w[0].trim().is_empty() && !w[1].trim().is_empty())
            .count();
        features.set(
            FEATURE_SECTION_BREAKS,
            (section_breaks as f64 / line_count as f64).min(1.0),
        );

        let bullet_lines = self.bullet_regex.find_iter(text).count();
        features.set(
            FEATURE_BULLET_DENSITY,
            (bullet_lines as f64 / line_count as f64).min(1.0),
        );

        features.set(
            FEATURE_JD_OVERLAP,
            job_description
                .map(|jd| self.jd_overlap(text, jd))
                .unwrap_or(0.0),
        );

        let uppercase = text.chars().filter(|c| c.is_uppercase()).count();
        let digits = text.chars().filter(|c| c.is_ascii_digit()).count();
        let denom = char_count.max(1) as f64;
        features.set(FEATURE_UPPERCASE_RATIO, uppercase as f64 / denom);
        features.set(FEATURE_NUMBER_DENSITY, digits as f64 / denom);

        features
    }

    /// Fraction of JD words longer than 3 characters that appear in the
    /// resume's token set. Set membership, not frequency: repeating a word in
    /// the JD (or the resume) cannot inflate the ratio.
    fn jd_overlap(&self, text: &str, job_description: &str) -> f64 {
        let resume_words: HashSet<String> =
            text::tokenize(&text.to_lowercase()).into_iter().collect();
        let jd_words: Vec<String> = text::tokenize(&job_description.to_lowercase())
            .into_iter()
            .filter(|w| w.chars().count() > 3)
            .collect();

        if jd_words.is_empty() {
            return 0.0;
        }

        let unique_jd: HashSet<&String> = jd_words.iter().collect();
        let matched = unique_jd
            .iter()
            .filter(|w| resume_words.contains(w.as_str()))
            .count();

        (matched as f64 / unique_jd.len() as f64).min(1.0)
    }

    /// Structural format score in [0, 100]: a simple weighted tally over
    /// contact markers, section structure, and layout sanity.
    pub fn format_score(&self, features: &FeatureVector, text: &str) -> f64 {
        let mut score = 0.0;

        if features.get(FEATURE_HAS_EMAIL) > 0.0 {
            score += 25.0;
        }
        if features.get(FEATURE_HAS_PHONE) > 0.0 {
            score += 15.0;
        }
        if features.get(FEATURE_SECTION_BREAKS) > 0.0 {
            score += 25.0;
        }
        if features.get(FEATURE_BULLET_DENSITY) > 0.0 {
            score += 20.0;
        }
        // Runs of spaces usually mean a multi-column layout that ATS parsers
        // mangle.
        if !text.contains("     ") {
            score += 15.0;
        }

        score
    }

    /// Completeness score in [0, 100]: quantification quality plus document
    /// length adequacy. Kept architecturally separate from the keyword
    /// dimension.
    pub fn completeness_score(&self, features: &FeatureVector, impact: &ImpactMetrics) -> f64 {
        let quantification = impact.quantification_rate * 60.0;
        let length_adequacy = (features.get(FEATURE_WORD_COUNT) / 0.4).min(1.0) * 40.0;
        quantification + length_adequacy
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}
