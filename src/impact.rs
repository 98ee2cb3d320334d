//! Impact metrics: bullet quantification and verb strength
//!
//! Scans bullet-like lines for quantification markers and grades the action
//! verbs that open them. The quantification ratio feeds the completeness
//! dimension of the final score, never the keyword dimension.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactMetrics {
    pub quantified_bullets: usize,
    pub total_bullets: usize,
    /// quantified / total, 0 when the document has no bullets.
    pub quantification_rate: f64,
    /// Average strength of recognized leading verbs, 0.5 when none found.
    pub verb_strength: f64,
}

pub struct ImpactAnalyzer {
    percentage_regex: Regex,
    currency_regex: Regex,
    number_regex: Regex,
    verb_strengths: HashMap<&'static str, f64>,
}

impl ImpactAnalyzer {
    pub fn new() -> Self {
        let percentage_regex = Regex::new(r"\d+(?:\.\d+)?%").expect("Invalid percentage regex");
        let currency_regex =
            Regex::new(r"[$€£]\s?\d[\d,]*(?:\.\d+)?\s?(?:[kKmMbB])?").expect("Invalid currency regex");
        let number_regex = Regex::new(r"\b\d{2,}\b").expect("Invalid number regex");

        Self {
            percentage_regex,
            currency_regex,
            number_regex,
            verb_strengths: Self::verb_strength_table(),
        }
    }

    pub fn analyze(&self, text: &str) -> ImpactMetrics {
        let bullets: Vec<&str> = text
            .lines()
            .filter(|line| self.is_bullet_line(line))
            .collect();

        let total_bullets = bullets.len();
        let quantified_bullets = bullets
            .iter()
            .filter(|line| self.is_quantified(line))
            .count();

        let quantification_rate = if total_bullets == 0 {
            0.0
        } else {
            quantified_bullets as f64 / total_bullets as f64
        };

        ImpactMetrics {
            quantified_bullets,
            total_bullets,
            quantification_rate,
            verb_strength: self.average_verb_strength(&bullets),
        }
    }

    /// A line counts as bullet-like when it carries a bullet marker or opens
    /// with a capitalized known action verb.
    fn is_bullet_line(&self, line: &str) -> bool {
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            return false;
        }

        if trimmed.starts_with(['•', '-', '*', '–']) {
            return true;
        }

        let first_word = trimmed.split_whitespace().next().unwrap_or("");
        let mut chars = first_word.chars();
        let capitalized = chars.next().map(|c| c.is_uppercase()).unwrap_or(false);

        capitalized
            && self
                .verb_strengths
                .contains_key(first_word.to_lowercase().as_str())
    }

    /// Quantified means at least one of: percentage, currency amount, or a
    /// standalone multi-digit number.
    fn is_quantified(&self, line: &str) -> bool {
        self.percentage_regex.is_match(line)
            || self.currency_regex.is_match(line)
            || self.number_regex.is_match(line)
    }

    fn average_verb_strength(&self, bullets: &[&str]) -> f64 {
        let mut strengths = Vec::new();

        for line in bullets {
            // The verb usually sits in the first few words, after any marker.
            let words = line
                .trim_start_matches(['•', '-', '*', '–', ' ', '\t'])
                .split_whitespace()
                .take(3);

            for word in words {
                let cleaned: String = word
                    .chars()
                    .filter(|c| c.is_alphabetic())
                    .collect::<String>()
                    .to_lowercase();
                if let Some(strength) = self.verb_strengths.get(cleaned.as_str()) {
                    strengths.push(*strength);
                    break;
                }
            }
        }

        if strengths.is_empty() {
            0.5
        } else {
            strengths.iter().sum::<f64>() / strengths.len() as f64
        }
    }

    fn verb_strength_table() -> HashMap<&'static str, f64> {
        let entries: [(&str, f64); 28] = [
            ("achieved", 0.95),
            ("led", 0.95),
            ("spearheaded", 0.98),
            ("pioneered", 0.96),
            ("transformed", 0.93),
            ("architected", 0.92),
            ("drove", 0.90),
            ("delivered", 0.90),
            ("engineered", 0.88),
            ("launched", 0.87),
            ("optimized", 0.85),
            ("executed", 0.85),
            ("established", 0.82),
            ("designed", 0.80),
            ("implemented", 0.80),
            ("built", 0.78),
            ("increased", 0.78),
            ("reduced", 0.78),
            ("developed", 0.75),
            ("created", 0.75),
            ("improved", 0.75),
            ("managed", 0.70),
            ("contributed", 0.40),
            ("supported", 0.35),
            ("assisted", 0.35),
            ("helped", 0.30),
            ("participated", 0.30),
            ("worked", 0.25),
        ];
        entries.into_iter().collect()
    }
}

impl Default for ImpactAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
