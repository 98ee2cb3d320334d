//! Weak-phrase ("fluff") detection
//!
//! Scans the whole document for a catalog of weak phrases — passive
//! constructions, vague quantifiers, weak qualifiers, jargon, clichés — and
//! reports counts, suggested replacements, and a severity tier. The catalog
//! is a data table loaded at construction so it can be tested independently
//! of the scanning algorithm. Matching is case-insensitive whole-phrase
//! matching over the full text; this is unrelated to the keyword trie, which
//! matches prefixes against a per-industry catalog.

use crate::catalog::KeywordCategory;
use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FluffCategory {
    Passive,
    Vague,
    Qualifier,
    Jargon,
    Cliche,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FluffSeverity {
    Good,
    Warning,
    Critical,
}

/// One catalog row: the phrase to find, how bad it is (1-10), and what to
/// say instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeakPhrase {
    pub phrase: String,
    pub category: FluffCategory,
    pub severity: u8,
    pub replacement: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeakPhraseHit {
    pub phrase: String,
    pub category: FluffCategory,
    pub severity: u8,
    pub count: usize,
    pub replacement: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerVerbGroup {
    pub category: KeywordCategory,
    pub verbs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluffReport {
    /// 0-100, higher is better.
    pub fluff_score: u8,
    pub total_words: usize,
    pub weak_phrases: Vec<WeakPhraseHit>,
    /// Share of document words covered by flagged phrases, in percent.
    pub fluff_percentage: f64,
    pub severity: FluffSeverity,
    pub power_verbs: Vec<PowerVerbGroup>,
}

pub struct FluffDetector {
    catalog: Vec<WeakPhrase>,
    automaton: AhoCorasick,
}

/// Weighted-fluff ceiling the 0-100 score is normalized against.
const MAX_WEIGHTED_FLUFF: f64 = 200.0;

impl FluffDetector {
    pub fn new() -> Self {
        Self::with_catalog(default_catalog())
    }

    /// Build a detector over a custom phrase catalog.
    pub fn with_catalog(catalog: Vec<WeakPhrase>) -> Self {
        let patterns: Vec<&str> = catalog.iter().map(|w| w.phrase.as_str()).collect();
        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&patterns)
            .expect("Failed to build fluff automaton");

        Self { catalog, automaton }
    }

    pub fn detect(&self, text: &str) -> FluffReport {
        let total_words = text.split_whitespace().count();
        if total_words == 0 {
            return FluffReport {
                fluff_score: 100,
                total_words: 0,
                weak_phrases: Vec::new(),
                fluff_percentage: 0.0,
                severity: FluffSeverity::Good,
                power_verbs: power_verb_groups(),
            };
        }

        let mut counts = vec![0usize; self.catalog.len()];
        for mat in self.automaton.find_overlapping_iter(text) {
            if is_whole_phrase(text, mat.start(), mat.end()) {
                counts[mat.pattern().as_usize()] += 1;
            }
        }

        let mut weak_phrases = Vec::new();
        let mut weighted_fluff = 0.0;
        let mut flagged_words = 0usize;

        for (entry, count) in self.catalog.iter().zip(counts) {
            if count == 0 {
                continue;
            }
            weighted_fluff += entry.severity as f64 * count as f64;
            flagged_words += entry.phrase.split_whitespace().count() * count;
            weak_phrases.push(WeakPhraseHit {
                phrase: entry.phrase.clone(),
                category: entry.category,
                severity: entry.severity,
                count,
                replacement: entry.replacement.clone(),
            });
        }

        weak_phrases.sort_by(|a, b| b.severity.cmp(&a.severity).then(a.phrase.cmp(&b.phrase)));

        let fluff_score =
            (100.0 - (weighted_fluff / MAX_WEIGHTED_FLUFF) * 100.0).clamp(0.0, 100.0);
        let fluff_percentage = flagged_words as f64 / total_words as f64 * 100.0;

        let severity = if fluff_percentage < 5.0 {
            FluffSeverity::Good
        } else if fluff_percentage < 15.0 {
            FluffSeverity::Warning
        } else {
            FluffSeverity::Critical
        };

        FluffReport {
            fluff_score: fluff_score.round() as u8,
            total_words,
            weak_phrases,
            fluff_percentage,
            severity,
            power_verbs: power_verb_groups(),
        }
    }

    pub fn catalog(&self) -> &[WeakPhrase] {
        &self.catalog
    }
}

impl Default for FluffDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Whole-phrase check: the match must not sit inside a larger word, so
/// "many" never fires inside "Germany".
fn is_whole_phrase(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();

    !before.map(|c| c.is_alphanumeric()).unwrap_or(false)
        && !after.map(|c| c.is_alphanumeric()).unwrap_or(false)
}

fn weak(phrase: &str, category: FluffCategory, severity: u8, replacement: &str) -> WeakPhrase {
    WeakPhrase {
        phrase: phrase.to_string(),
        category,
        severity,
        replacement: replacement.to_string(),
    }
}

fn default_catalog() -> Vec<WeakPhrase> {
    use FluffCategory::*;

    vec![
        // Passive constructions, the worst offenders
        weak("responsible for", Passive, 10, "Led, Managed, Drove"),
        weak("in charge of", Passive, 10, "Led, Managed, Drove"),
        weak("assisted with", Passive, 9, "Supported, Enabled, Partnered"),
        weak("assisted in", Passive, 9, "Supported, Enabled, Partnered"),
        weak("helped with", Passive, 9, "Supported, Enabled, Partnered"),
        weak("helped to", Passive, 9, "Supported, Enabled, Partnered"),
        weak("worked on", Passive, 9, "Built, Developed, Implemented"),
        weak("worked with", Passive, 9, "Built, Developed, Implemented"),
        weak("involved in", Passive, 8, "Contributed, Executed, Delivered"),
        weak("participated in", Passive, 8, "Contributed, Executed, Delivered"),
        weak("contributed to", Passive, 8, "Achieved, Accomplished, Delivered"),
        weak("duties included", Passive, 8, "Achieved, Accomplished, Delivered"),
        weak("tasked with", Passive, 8, "Achieved, Accomplished, Delivered"),
        // Vague quantifiers
        weak("various", Vague, 7, "an exact count (8 projects, 5 clients)"),
        weak("several", Vague, 7, "an exact count (8 projects, 5 clients)"),
        weak("multiple", Vague, 7, "an exact count (8 projects, 5 clients)"),
        weak("numerous", Vague, 7, "an exact count (8 projects, 5 clients)"),
        weak("some", Vague, 6, "specific numbers (5, 10, 15+)"),
        weak("many", Vague, 6, "specific numbers (5, 10, 15+)"),
        weak("a lot of", Vague, 6, "specific numbers (5, 10, 15+)"),
        // Weak qualifiers
        weak("tried to", Qualifier, 7, "Successfully executed, Achieved"),
        weak("attempted to", Qualifier, 7, "Successfully executed, Achieved"),
        weak("sought to", Qualifier, 7, "Successfully executed, Achieved"),
        weak("focused on", Qualifier, 5, "Delivered, Executed, Completed"),
        weak("concentrated on", Qualifier, 5, "Delivered, Executed, Completed"),
        // Corporate jargon without substance
        weak("synergy", Jargon, 6, "collaborated, unified, integrated"),
        weak("synergize", Jargon, 6, "collaborated, unified, integrated"),
        weak("leveraging", Jargon, 5, "used, applied (with metrics)"),
        weak("leverage", Jargon, 5, "used, applied (with metrics)"),
        weak("facilitated", Jargon, 5, "enabled, streamlined"),
        weak("utilize", Jargon, 4, "used, applied"),
        weak("utilization", Jargon, 4, "used, applied"),
        // Empty descriptors
        weak("hard worker", Cliche, 8, "quantify your work ethic with metrics"),
        weak("hardworking", Cliche, 8, "quantify your work ethic with metrics"),
        weak("team player", Cliche, 8, "collaborated with an N-person team"),
        weak("fast learner", Cliche, 7, "mastered X in Y weeks"),
        weak("quick learner", Cliche, 7, "mastered X in Y weeks"),
        weak("detail-oriented", Cliche, 7, "reduced errors by X%"),
        weak("detail oriented", Cliche, 7, "reduced errors by X%"),
        weak("results-driven", Cliche, 7, "achieved X% improvement"),
        weak("results-oriented", Cliche, 7, "achieved X% improvement"),
        weak("self-starter", Cliche, 6, "initiated N projects independently"),
        weak("self-motivated", Cliche, 6, "initiated N projects independently"),
        weak("go-getter", Cliche, 8, "proactively delivered X outcomes"),
        weak("think outside the box", Cliche, 7, "pioneered a unique solution"),
    ]
}

fn power_verb_groups() -> Vec<PowerVerbGroup> {
    use KeywordCategory::*;

    let groups: [(KeywordCategory, &[&str]); 5] = [
        (
            Technical,
            &["Engineered", "Architected", "Developed", "Built", "Deployed"],
        ),
        (
            Leadership,
            &["Led", "Directed", "Spearheaded", "Orchestrated", "Championed"],
        ),
        (
            Analytical,
            &["Analyzed", "Evaluated", "Quantified", "Measured", "Modeled"],
        ),
        (
            Results,
            &["Achieved", "Increased", "Reduced", "Improved", "Accelerated"],
        ),
        (
            Creative,
            &["Designed", "Created", "Pioneered", "Launched", "Introduced"],
        ),
    ];

    groups
        .into_iter()
        .map(|(category, verbs)| PowerVerbGroup {
            category,
            verbs: verbs.iter().map(|v| v.to_string()).collect(),
        })
        .collect()
}
