//! Keyword saturation analysis
//!
//! Compares job-description keyword frequency against resume keyword
//! frequency, restricted to an industry's weighted catalog. Both sides are
//! profiled with the same trie scan; a keyword present in the JD and the
//! resume is matched, present in the JD alone is missing.

use crate::catalog::{KeywordCatalog, KeywordCategory};
use crate::trie::KeywordTrie;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strsim::jaro_winkler;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaturationReport {
    /// Weighted match ratio scaled to [0, 100].
    pub overall_score: f64,
    pub matched_keywords: Vec<MatchedKeyword>,
    pub missing_keywords: Vec<MissingKeyword>,
    pub industry: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedKeyword {
    /// Original casing as it appears in the job description.
    pub term: String,
    pub category: KeywordCategory,
    pub weight: f64,
    pub resume_count: usize,
    pub jd_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingKeyword {
    /// Original casing as it appears in the job description.
    pub term: String,
    pub category: KeywordCategory,
    pub weight: f64,
    pub jd_count: usize,
}

pub struct SaturationAnalyzer<'a> {
    catalog: &'a KeywordCatalog,
    /// Word-level similarity floor for the fuzzy fallback; short terms use a
    /// stricter floor to avoid false positives.
    fuzzy_threshold: f64,
    fuzzy_threshold_short: f64,
}

impl<'a> SaturationAnalyzer<'a> {
    pub fn new(catalog: &'a KeywordCatalog) -> Self {
        Self {
            catalog,
            fuzzy_threshold: 0.88,
            fuzzy_threshold_short: 0.92,
        }
    }

    pub fn analyze(&self, resume_text: &str, jd_text: &str, industry: &str) -> SaturationReport {
        let keywords = self.catalog.keywords_for(industry);
        let trie = KeywordTrie::build(keywords.iter().map(|k| k.term.as_str()));

        let resume_counts = count_by_term(&trie, resume_text);
        let jd_counts = count_by_term(&trie, jd_text);

        let resume_words: Vec<String> = crate::text::tokenize(&resume_text.to_lowercase());

        let mut matched_keywords = Vec::new();
        let mut missing_keywords = Vec::new();
        let mut matched_weight = 0.0;
        let mut present_weight = 0.0;

        for keyword in keywords {
            let term_key = keyword.term.to_lowercase();
            let jd_count = jd_counts.get(&term_key).copied().unwrap_or(0);
            if jd_count == 0 {
                continue;
            }

            present_weight += keyword.weight;

            let mut resume_count = resume_counts.get(&term_key).copied().unwrap_or(0);
            if resume_count == 0 && self.fuzzy_hit(&keyword.term, &resume_words) {
                resume_count = 1;
            }

            let display_term = original_casing(jd_text, &keyword.term);
            if resume_count >= 1 {
                matched_weight += keyword.weight;
                matched_keywords.push(MatchedKeyword {
                    term: display_term,
                    category: keyword.category,
                    weight: keyword.weight,
                    resume_count,
                    jd_count,
                });
            } else {
                missing_keywords.push(MissingKeyword {
                    term: display_term,
                    category: keyword.category,
                    weight: keyword.weight,
                    jd_count,
                });
            }
        }

        let overall_score = if present_weight > 0.0 {
            (matched_weight / present_weight * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };

        log::debug!(
            "Saturation [{}]: {} matched, {} missing, score {:.1}",
            industry,
            matched_keywords.len(),
            missing_keywords.len(),
            overall_score
        );

        SaturationReport {
            overall_score,
            matched_keywords,
            missing_keywords,
            industry: industry.to_string(),
        }
    }

    /// Typo tolerance: a single resume word close enough to a single-word
    /// catalog term still counts as one occurrence. Multi-word terms only
    /// match exactly.
    fn fuzzy_hit(&self, term: &str, resume_words: &[String]) -> bool {
        let term_lower = term.to_lowercase();
        if term_lower.contains(' ') {
            return false;
        }

        let threshold = if term_lower.chars().count() < 5 {
            self.fuzzy_threshold_short
        } else {
            self.fuzzy_threshold
        };

        resume_words.iter().any(|word| {
            word.chars().count() >= 3 && jaro_winkler(&term_lower, word) >= threshold
        })
    }
}

fn count_by_term(trie: &KeywordTrie, text: &str) -> HashMap<String, usize> {
    trie.scan(text)
        .into_iter()
        .map(|m| (m.term, m.count))
        .collect()
}

/// Recover the casing a term carries in the job description for display.
/// Falls back to the catalog spelling when the term only matched fuzzily or
/// via normalization.
fn original_casing(jd_text: &str, term: &str) -> String {
    let pattern = format!("(?i){}", regex::escape(term));
    match Regex::new(&pattern) {
        Ok(re) => re
            .find(jd_text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| term.to_string()),
        Err(_) => term.to_string(),
    }
}
