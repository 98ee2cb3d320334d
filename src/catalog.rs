//! Industry keyword catalogs
//!
//! A catalog is the weighted keyword inventory the saturation analyzer is
//! restricted to. Catalogs are loaded once at engine initialization (from the
//! compiled-in defaults or from TOML) and are read-only afterwards. An
//! unrecognized industry tag falls back to the generic catalog rather than
//! erroring.

use crate::error::{AtsEngineError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordCategory {
    Technical,
    Leadership,
    Analytical,
    Results,
    Creative,
    Industry,
}

impl KeywordCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeywordCategory::Technical => "technical",
            KeywordCategory::Leadership => "leadership",
            KeywordCategory::Analytical => "analytical",
            KeywordCategory::Results => "results",
            KeywordCategory::Creative => "creative",
            KeywordCategory::Industry => "industry",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub term: String,
    pub category: KeywordCategory,
    pub weight: f64,
}

impl Keyword {
    pub fn new(term: &str, category: KeywordCategory, weight: f64) -> Self {
        Self {
            term: term.to_string(),
            category,
            weight,
        }
    }
}

/// Ordering weight per category, used when ranking missing-keyword
/// suggestions. Separate from per-keyword weights: a category weight says how
/// valuable the *kind* of keyword is to surface to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub technical: f64,
    pub leadership: f64,
    pub analytical: f64,
    pub results: f64,
    pub creative: f64,
    pub industry: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            technical: 1.0,
            leadership: 0.9,
            results: 0.85,
            analytical: 0.8,
            industry: 0.7,
            creative: 0.6,
        }
    }
}

impl CategoryWeights {
    pub fn weight(&self, category: KeywordCategory) -> f64 {
        match category {
            KeywordCategory::Technical => self.technical,
            KeywordCategory::Leadership => self.leadership,
            KeywordCategory::Analytical => self.analytical,
            KeywordCategory::Results => self.results,
            KeywordCategory::Creative => self.creative,
            KeywordCategory::Industry => self.industry,
        }
    }
}

/// The complete keyword inventory: one generic catalog plus any number of
/// industry-specific ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordCatalog {
    pub generic: Vec<Keyword>,
    #[serde(default)]
    pub industries: HashMap<String, Vec<Keyword>>,
    #[serde(default)]
    pub category_weights: CategoryWeights,
}

impl KeywordCatalog {
    /// Load a catalog from a TOML string, validating it eagerly.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let catalog: KeywordCatalog = toml::from_str(content)
            .map_err(|e| AtsEngineError::Catalog(format!("Failed to parse catalog: {}", e)))?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Keywords for an industry tag. Unknown tags resolve to the generic
    /// catalog; this never fails.
    pub fn keywords_for(&self, industry: &str) -> &[Keyword] {
        self.industries
            .get(&industry.to_lowercase())
            .map(|kws| kws.as_slice())
            .unwrap_or(&self.generic)
    }

    pub fn known_industries(&self) -> Vec<&str> {
        self.industries.keys().map(|k| k.as_str()).collect()
    }

    /// A malformed catalog is a configuration-time failure.
    pub fn validate(&self) -> Result<()> {
        if self.generic.is_empty() {
            return Err(AtsEngineError::Catalog(
                "Generic catalog must contain at least one keyword".to_string(),
            ));
        }

        let all = self
            .generic
            .iter()
            .chain(self.industries.values().flatten());
        for keyword in all {
            if keyword.term.trim().is_empty() {
                return Err(AtsEngineError::Catalog(
                    "Catalog contains an empty keyword term".to_string(),
                ));
            }
            if !(keyword.weight > 0.0 && keyword.weight <= 10.0) {
                return Err(AtsEngineError::Catalog(format!(
                    "Keyword '{}' has weight {} outside (0, 10]",
                    keyword.term, keyword.weight
                )));
            }
        }

        Ok(())
    }
}

impl Default for KeywordCatalog {
    fn default() -> Self {
        use KeywordCategory::*;

        let generic = vec![
            Keyword::new("leadership", Leadership, 1.0),
            Keyword::new("communication", Leadership, 0.8),
            Keyword::new("mentoring", Leadership, 0.7),
            Keyword::new("project management", Leadership, 0.9),
            Keyword::new("stakeholder management", Leadership, 0.7),
            Keyword::new("problem solving", Analytical, 0.9),
            Keyword::new("data analysis", Analytical, 0.8),
            Keyword::new("research", Analytical, 0.6),
            Keyword::new("forecasting", Analytical, 0.5),
            Keyword::new("delivered", Results, 0.7),
            Keyword::new("increased", Results, 0.7),
            Keyword::new("reduced", Results, 0.7),
            Keyword::new("optimized", Results, 0.8),
            Keyword::new("design", Creative, 0.6),
            Keyword::new("innovation", Creative, 0.6),
            Keyword::new("strategy", Industry, 0.7),
            Keyword::new("operations", Industry, 0.6),
            Keyword::new("compliance", Industry, 0.5),
        ];

        let software = vec![
            Keyword::new("python", Technical, 1.0),
            Keyword::new("javascript", Technical, 1.0),
            Keyword::new("typescript", Technical, 0.9),
            Keyword::new("rust", Technical, 0.9),
            Keyword::new("java", Technical, 0.9),
            Keyword::new("react", Technical, 0.9),
            Keyword::new("node.js", Technical, 0.8),
            Keyword::new("sql", Technical, 0.9),
            Keyword::new("postgresql", Technical, 0.8),
            Keyword::new("aws", Technical, 0.9),
            Keyword::new("docker", Technical, 0.8),
            Keyword::new("kubernetes", Technical, 0.8),
            Keyword::new("terraform", Technical, 0.7),
            Keyword::new("microservices", Technical, 0.8),
            Keyword::new("rest api", Technical, 0.8),
            Keyword::new("graphql", Technical, 0.7),
            Keyword::new("ci/cd", Technical, 0.8),
            Keyword::new("agile", Industry, 0.8),
            Keyword::new("scrum", Industry, 0.7),
            Keyword::new("code review", Industry, 0.6),
            Keyword::new("leadership", Leadership, 1.0),
            Keyword::new("mentoring", Leadership, 0.7),
            Keyword::new("cross-functional", Leadership, 0.6),
            Keyword::new("debugging", Analytical, 0.7),
            Keyword::new("performance optimization", Analytical, 0.8),
            Keyword::new("scalability", Results, 0.8),
            Keyword::new("test automation", Results, 0.7),
            Keyword::new("system design", Creative, 0.8),
        ];

        let data = vec![
            Keyword::new("python", Technical, 1.0),
            Keyword::new("sql", Technical, 1.0),
            Keyword::new("machine learning", Technical, 1.0),
            Keyword::new("deep learning", Technical, 0.8),
            Keyword::new("pandas", Technical, 0.8),
            Keyword::new("tensorflow", Technical, 0.7),
            Keyword::new("pytorch", Technical, 0.7),
            Keyword::new("spark", Technical, 0.7),
            Keyword::new("tableau", Technical, 0.7),
            Keyword::new("etl", Technical, 0.7),
            Keyword::new("statistics", Analytical, 0.9),
            Keyword::new("data analysis", Analytical, 1.0),
            Keyword::new("a/b testing", Analytical, 0.8),
            Keyword::new("data visualization", Creative, 0.7),
            Keyword::new("data pipeline", Industry, 0.8),
            Keyword::new("leadership", Leadership, 0.8),
            Keyword::new("forecasting", Results, 0.7),
        ];

        let marketing = vec![
            Keyword::new("seo", Technical, 0.9),
            Keyword::new("google analytics", Technical, 0.8),
            Keyword::new("content marketing", Industry, 0.9),
            Keyword::new("brand strategy", Industry, 0.8),
            Keyword::new("campaign management", Industry, 0.9),
            Keyword::new("social media", Industry, 0.7),
            Keyword::new("market research", Analytical, 0.8),
            Keyword::new("conversion rate", Results, 0.9),
            Keyword::new("roi", Results, 0.8),
            Keyword::new("copywriting", Creative, 0.8),
            Keyword::new("storytelling", Creative, 0.6),
            Keyword::new("leadership", Leadership, 0.8),
        ];

        let mut industries = HashMap::new();
        industries.insert("software".to_string(), software);
        industries.insert("data".to_string(), data);
        industries.insert("marketing".to_string(), marketing);

        Self {
            generic,
            industries,
            category_weights: CategoryWeights::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = KeywordCatalog::default();
        assert!(catalog.validate().is_ok());
        assert!(!catalog.generic.is_empty());
    }

    #[test]
    fn test_unknown_industry_falls_back_to_generic() {
        let catalog = KeywordCatalog::default();
        let keywords = catalog.keywords_for("underwater-basket-weaving");
        assert_eq!(keywords, catalog.generic.as_slice());
    }

    #[test]
    fn test_industry_lookup_is_case_insensitive() {
        let catalog = KeywordCatalog::default();
        let keywords = catalog.keywords_for("Software");
        assert!(keywords.iter().any(|k| k.term == "rust"));
    }

    #[test]
    fn test_empty_generic_catalog_rejected() {
        let catalog = KeywordCatalog {
            generic: Vec::new(),
            industries: HashMap::new(),
            category_weights: CategoryWeights::default(),
        };
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_bad_weight_rejected() {
        let catalog = KeywordCatalog {
            generic: vec![Keyword::new("leadership", KeywordCategory::Leadership, 0.0)],
            industries: HashMap::new(),
            category_weights: CategoryWeights::default(),
        };
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_catalog_toml_round_trip() {
        let catalog = KeywordCatalog::default();
        let serialized = toml::to_string(&catalog).unwrap();
        let parsed = KeywordCatalog::from_toml_str(&serialized).unwrap();
        assert_eq!(parsed.generic, catalog.generic);
    }
}
