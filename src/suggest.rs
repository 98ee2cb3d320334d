//! Missing-keyword suggestions
//!
//! Ranks the missing set from the saturation analyzer and attaches a short
//! templated example phrase per keyword, phrased for the keyword's category.
//! Deterministic: same missing set and templates, same output.

use crate::catalog::{CategoryWeights, KeywordCategory};
use crate::saturation::MissingKeyword;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub term: String,
    pub category: KeywordCategory,
    pub jd_count: usize,
    pub example: String,
}

pub struct SuggestionGenerator {
    category_weights: CategoryWeights,
}

impl SuggestionGenerator {
    pub fn new(category_weights: CategoryWeights) -> Self {
        Self { category_weights }
    }

    /// Sort by (category weight, JD frequency) descending, truncate, and
    /// attach example phrasing. Ties break on the term itself to keep the
    /// ordering stable.
    pub fn suggest(&self, missing: &[MissingKeyword], max_count: usize) -> Vec<Suggestion> {
        let mut ranked: Vec<&MissingKeyword> = missing.iter().collect();
        ranked.sort_by(|a, b| {
            let weight_a = self.category_weights.weight(a.category);
            let weight_b = self.category_weights.weight(b.category);
            weight_b
                .partial_cmp(&weight_a)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(b.jd_count.cmp(&a.jd_count))
                .then(a.term.cmp(&b.term))
        });

        ranked
            .into_iter()
            .take(max_count)
            .map(|keyword| Suggestion {
                term: keyword.term.clone(),
                category: keyword.category,
                jd_count: keyword.jd_count,
                example: example_phrase(&keyword.term, keyword.category),
            })
            .collect()
    }
}

/// Example phrasing per category, always including a metric placeholder so
/// the rewritten bullet stays quantifiable.
fn example_phrase(term: &str, category: KeywordCategory) -> String {
    match category {
        KeywordCategory::Technical => format!(
            "Engineered {} solutions that cut processing time by X%",
            term
        ),
        KeywordCategory::Leadership => format!(
            "Led a cross-functional team applying {} to deliver the initiative X weeks early",
            term
        ),
        KeywordCategory::Analytical => format!(
            "Analyzed {} data across N sources, surfacing insights that drove an X% improvement",
            term
        ),
        KeywordCategory::Results => format!(
            "Achieved measurable {} gains, exceeding the target by X%",
            term
        ),
        KeywordCategory::Creative => format!(
            "Designed a {} approach adopted by N teams within one quarter",
            term
        ),
        KeywordCategory::Industry => format!(
            "Applied {} expertise to deliver X% cost savings year over year",
            term
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::KeywordCategory::*;

    fn missing(term: &str, category: KeywordCategory, jd_count: usize) -> MissingKeyword {
        MissingKeyword {
            term: term.to_string(),
            category,
            weight: 1.0,
            jd_count,
        }
    }

    #[test]
    fn test_ordering_by_category_then_frequency() {
        let generator = SuggestionGenerator::new(Default::default());
        let input = vec![
            missing("storytelling", Creative, 9),
            missing("kubernetes", Technical, 1),
            missing("python", Technical, 4),
        ];

        let suggestions = generator.suggest(&input, 10);
        let terms: Vec<&str> = suggestions.iter().map(|s| s.term.as_str()).collect();
        // Technical outranks Creative regardless of frequency; within
        // Technical the more frequent JD term comes first.
        assert_eq!(terms, vec!["python", "kubernetes", "storytelling"]);
    }

    #[test]
    fn test_truncation() {
        let generator = SuggestionGenerator::new(Default::default());
        let input = vec![
            missing("python", Technical, 3),
            missing("docker", Technical, 2),
            missing("rust", Technical, 1),
        ];

        let suggestions = generator.suggest(&input, 2);
        assert_eq!(suggestions.len(), 2);
    }

    #[test]
    fn test_example_mentions_term() {
        let generator = SuggestionGenerator::new(Default::default());
        let suggestions = generator.suggest(&[missing("Leadership", Leadership, 2)], 5);

        assert_eq!(suggestions.len(), 1);
        assert!(suggestions[0].example.contains("Leadership"));
    }

    #[test]
    fn test_deterministic_on_ties() {
        let generator = SuggestionGenerator::new(Default::default());
        let input = vec![
            missing("zig", Technical, 2),
            missing("ada", Technical, 2),
        ];

        let first = generator.suggest(&input, 2);
        let second = generator.suggest(&input, 2);
        assert_eq!(first, second);
        assert_eq!(first[0].term, "ada");
    }

    #[test]
    fn test_empty_missing_set() {
        let generator = SuggestionGenerator::new(Default::default());
        assert!(generator.suggest(&[], 5).is_empty());
    }
}
