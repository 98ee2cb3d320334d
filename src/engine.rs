//! Analysis engine: the functional surface exposed to the host application
//!
//! Owns the configuration, keyword catalogs, pattern tables, and the
//! prediction cache. Everything except the cache is pure over its inputs, so
//! a shared engine reference can serve many threads; batch scoring fans out
//! over a rayon thread pool.

use crate::cache::{CacheStats, Clock, PredictionCache};
use crate::catalog::KeywordCatalog;
use crate::config::EngineConfig;
use crate::contact::{ContactExtractor, ContactInfo};
use crate::error::Result;
use crate::features::{FeatureExtractor, FeatureVector};
use crate::fluff::{FluffDetector, FluffReport};
use crate::impact::{ImpactAnalyzer, ImpactMetrics};
use crate::saturation::{MissingKeyword, SaturationAnalyzer, SaturationReport};
use crate::scorer::{CompatibilityScorer, ScoreBreakdown};
use crate::suggest::{Suggestion, SuggestionGenerator};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Default number of missing-keyword suggestions attached to a full report.
const DEFAULT_SUGGESTION_COUNT: usize = 10;

pub struct AnalysisEngine {
    config: EngineConfig,
    catalog: KeywordCatalog,
    features: FeatureExtractor,
    impact: ImpactAnalyzer,
    contact: ContactExtractor,
    fluff: FluffDetector,
    scorer: CompatibilityScorer,
    suggestions: SuggestionGenerator,
    cache: PredictionCache<ScoreBreakdown>,
}

/// Complete result of matching one resume against one job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub features: FeatureVector,
    pub saturation: SaturationReport,
    pub impact: ImpactMetrics,
    pub suggestions: Vec<Suggestion>,
    pub contact: ContactInfo,
    pub fluff: FluffReport,
    pub breakdown: ScoreBreakdown,
}

impl AnalysisEngine {
    /// Engine with compiled-in defaults.
    pub fn new() -> Result<Self> {
        Self::with_config(EngineConfig::default(), KeywordCatalog::default())
    }

    /// Engine with caller-supplied configuration and catalogs. Validation
    /// failures surface here, at initialization, never per request.
    pub fn with_config(config: EngineConfig, catalog: KeywordCatalog) -> Result<Self> {
        config.validate()?;
        catalog.validate()?;

        let cache = PredictionCache::new(&config.cache);
        Ok(Self::assemble(config, catalog, cache))
    }

    /// Like [`with_config`](Self::with_config) but with an injected clock,
    /// so tests can drive cache expiry deterministically.
    pub fn with_clock(config: EngineConfig, catalog: KeywordCatalog, clock: Clock) -> Result<Self> {
        config.validate()?;
        catalog.validate()?;

        let cache = PredictionCache::with_clock(&config.cache, clock);
        Ok(Self::assemble(config, catalog, cache))
    }

    fn assemble(
        config: EngineConfig,
        catalog: KeywordCatalog,
        cache: PredictionCache<ScoreBreakdown>,
    ) -> Self {
        let scorer = CompatibilityScorer::new(config.scoring.clone());
        let suggestions = SuggestionGenerator::new(catalog.category_weights.clone());

        Self {
            config,
            catalog,
            features: FeatureExtractor::new(),
            impact: ImpactAnalyzer::new(),
            contact: ContactExtractor::new(),
            fluff: FluffDetector::new(),
            scorer,
            suggestions,
            cache,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn extract_features(&self, text: &str, job_description: Option<&str>) -> FeatureVector {
        self.features.extract(text, job_description)
    }

    pub fn analyze_keyword_saturation(
        &self,
        resume_text: &str,
        jd_text: &str,
        industry: &str,
    ) -> SaturationReport {
        SaturationAnalyzer::new(&self.catalog).analyze(resume_text, jd_text, industry)
    }

    pub fn analyze_impact_metrics(&self, resume_text: &str) -> ImpactMetrics {
        self.impact.analyze(resume_text)
    }

    pub fn suggest_missing_keywords(
        &self,
        missing: &[MissingKeyword],
        max_count: usize,
    ) -> Vec<Suggestion> {
        self.suggestions.suggest(missing, max_count)
    }

    pub fn score_compatibility(
        &self,
        keyword_score: f64,
        format_score: f64,
        completeness_score: f64,
        is_premium: bool,
        ml_boost: Option<f64>,
    ) -> u8 {
        self.scorer.score(
            keyword_score,
            format_score,
            completeness_score,
            is_premium,
            ml_boost,
        )
    }

    pub fn extract_contact_info(&self, text: &str) -> ContactInfo {
        self.contact.extract(text)
    }

    pub fn detect_weak_phrases(&self, text: &str) -> FluffReport {
        self.fluff.detect(text)
    }

    /// Cache wrapper: cached-or-fresh breakdown for this feature vector.
    pub fn get_or_compute<F>(&self, features: &FeatureVector, compute: F) -> ScoreBreakdown
    where
        F: FnOnce() -> ScoreBreakdown,
    {
        self.cache.get_or_compute(features, compute)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Full pipeline: features → saturation and impact → suggestions →
    /// compatibility score, with the final breakdown memoized on the feature
    /// vector. Contact extraction and fluff detection run alongside but do
    /// not participate in scoring.
    pub fn analyze(
        &self,
        resume_text: &str,
        jd_text: &str,
        industry: &str,
        is_premium: bool,
        ml_boost: Option<f64>,
    ) -> MatchReport {
        let features = self.features.extract(resume_text, Some(jd_text));
        let saturation = self.analyze_keyword_saturation(resume_text, jd_text, industry);
        let impact = self.impact.analyze(resume_text);

        let format_score = self.features.format_score(&features, resume_text);
        let completeness_score = self.features.completeness_score(&features, &impact);
        let keyword_score = saturation.overall_score;

        let breakdown = self.cache.get_or_compute(&features, || {
            self.scorer.score_breakdown(
                keyword_score,
                format_score,
                completeness_score,
                is_premium,
                ml_boost,
            )
        });

        let suggestions = self
            .suggestions
            .suggest(&saturation.missing_keywords, DEFAULT_SUGGESTION_COUNT);

        log::info!(
            "Analyzed resume against JD [{}]: final score {}",
            industry,
            breakdown.final_score
        );

        MatchReport {
            features,
            saturation,
            impact,
            suggestions,
            contact: self.contact.extract(resume_text),
            fluff: self.fluff.detect(resume_text),
            breakdown,
        }
    }

    /// Score many resumes against one job description. Embarrassingly
    /// parallel; output order mirrors input order.
    pub fn analyze_batch(
        &self,
        resumes: &[&str],
        jd_text: &str,
        industry: &str,
        is_premium: bool,
    ) -> Vec<MatchReport> {
        resumes
            .par_iter()
            .map(|resume| self.analyze(resume, jd_text, industry, is_premium, None))
            .collect()
    }
}
