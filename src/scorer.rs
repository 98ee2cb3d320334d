//! ATS compatibility scoring
//!
//! Pure function over the three sub-scores. The weight tables, early-exit
//! thresholds, floors, and ML blend split all come from `ScoringConfig`.

use crate::config::{ScoringConfig, TierWeights};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub keyword_score: f64,
    pub format_score: f64,
    pub completeness_score: f64,
    pub final_score: u8,
    pub weights: TierWeights,
    pub early_exit: bool,
    pub ml_boost: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct CompatibilityScorer {
    config: ScoringConfig,
}

impl CompatibilityScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn score(
        &self,
        keyword_score: f64,
        format_score: f64,
        completeness_score: f64,
        is_premium: bool,
        ml_boost: Option<f64>,
    ) -> u8 {
        self.score_breakdown(
            keyword_score,
            format_score,
            completeness_score,
            is_premium,
            ml_boost,
        )
        .final_score
    }

    pub fn score_breakdown(
        &self,
        keyword_score: f64,
        format_score: f64,
        completeness_score: f64,
        is_premium: bool,
        ml_boost: Option<f64>,
    ) -> ScoreBreakdown {
        let weights = if is_premium {
            self.config.premium_tier
        } else {
            self.config.free_tier
        };

        let exit = &self.config.early_exit;
        // Near-empty documents short-circuit to a fixed floor; pushing them
        // through the weighted formula would only amplify noise.
        if keyword_score < exit.keyword_below && format_score < exit.format_below {
            let floor = if is_premium {
                exit.premium_floor
            } else {
                exit.free_floor
            };
            return ScoreBreakdown {
                keyword_score,
                format_score,
                completeness_score,
                final_score: clamp_to_score(floor),
                weights,
                early_exit: true,
                ml_boost,
            };
        }

        let mut score = keyword_score * weights.keyword
            + format_score * weights.format
            + completeness_score * weights.completeness;

        let boost = ml_boost.filter(|b| is_premium && *b > 0.0);
        if let Some(boost) = boost {
            let blend = &self.config.ml_blend;
            score = score * blend.base_weight + boost * blend.boost_weight;
        }

        ScoreBreakdown {
            keyword_score,
            format_score,
            completeness_score,
            final_score: clamp_to_score(score),
            weights,
            early_exit: false,
            ml_boost: boost,
        }
    }
}

fn clamp_to_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
