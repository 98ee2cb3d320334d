//! Configuration management for the ATS engine
//!
//! Every tunable in the scoring pipeline lives here: tier weight tables,
//! early-exit floors, the ML blend split, and cache sizing. The defaults are
//! product-tuned values; they are configuration, not algorithmic truths, so
//! deployments can override them via TOML without touching the engine.

use crate::error::{AtsEngineError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    pub scoring: ScoringConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub free_tier: TierWeights,
    pub premium_tier: TierWeights,
    pub early_exit: EarlyExitConfig,
    pub ml_blend: MlBlendConfig,
}

/// Relative weight of each sub-score in the final compatibility formula.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TierWeights {
    pub keyword: f64,
    pub format: f64,
    pub completeness: f64,
}

/// Short-circuit for near-empty documents: when both the keyword and format
/// sub-scores fall below their thresholds, the weighted formula would only
/// amplify noise, so a fixed floor is returned instead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EarlyExitConfig {
    pub keyword_below: f64,
    pub format_below: f64,
    pub free_floor: f64,
    pub premium_floor: f64,
}

/// Blend applied when a premium caller supplies an external ML boost signal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MlBlendConfig {
    pub base_weight: f64,
    pub boost_weight: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CacheConfig {
    pub ttl_secs: u64,
    pub capacity: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            free_tier: TierWeights {
                keyword: 0.40,
                format: 0.35,
                completeness: 0.25,
            },
            premium_tier: TierWeights {
                keyword: 0.45,
                format: 0.30,
                completeness: 0.25,
            },
            early_exit: EarlyExitConfig {
                keyword_below: 20.0,
                format_below: 30.0,
                free_floor: 25.0,
                premium_floor: 35.0,
            },
            ml_blend: MlBlendConfig {
                base_weight: 0.7,
                boost_weight: 0.3,
            },
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 3600,
            capacity: 1000,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)
            .map_err(|e| AtsEngineError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration values. Bad configuration is a programmer
    /// error and must fail at engine initialization, not per request.
    pub fn validate(&self) -> Result<()> {
        if self.cache.ttl_secs == 0 {
            return Err(AtsEngineError::Configuration(
                "Cache TTL must be greater than zero".to_string(),
            ));
        }
        if self.cache.capacity == 0 {
            return Err(AtsEngineError::Configuration(
                "Cache capacity must be greater than zero".to_string(),
            ));
        }

        for (name, weights) in [
            ("free_tier", &self.scoring.free_tier),
            ("premium_tier", &self.scoring.premium_tier),
        ] {
            weights.validate(name)?;
        }

        let blend = &self.scoring.ml_blend;
        if blend.base_weight < 0.0 || blend.boost_weight < 0.0 {
            return Err(AtsEngineError::Configuration(
                "ML blend weights must be non-negative".to_string(),
            ));
        }
        if (blend.base_weight + blend.boost_weight - 1.0).abs() > 1e-6 {
            return Err(AtsEngineError::Configuration(format!(
                "ML blend weights must sum to 1.0, got {}",
                blend.base_weight + blend.boost_weight
            )));
        }

        let exit = &self.scoring.early_exit;
        for (name, value) in [
            ("free_floor", exit.free_floor),
            ("premium_floor", exit.premium_floor),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(AtsEngineError::Configuration(format!(
                    "Early-exit {} must be within [0, 100], got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

impl TierWeights {
    fn validate(&self, tier: &str) -> Result<()> {
        for (name, value) in [
            ("keyword", self.keyword),
            ("format", self.format),
            ("completeness", self.completeness),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(AtsEngineError::Configuration(format!(
                    "{} weight '{}' must be within [0, 1], got {}",
                    tier, name, value
                )));
            }
        }

        let total = self.keyword + self.format + self.completeness;
        if (total - 1.0).abs() > 1e-6 {
            return Err(AtsEngineError::Configuration(format!(
                "{} weights must sum to 1.0, got {}",
                tier, total
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cache.capacity, 1000);
        assert_eq!(config.cache.ttl_secs, 3600);
    }

    #[test]
    fn test_default_tier_weights() {
        let scoring = ScoringConfig::default();
        assert_eq!(scoring.free_tier.keyword, 0.40);
        assert_eq!(scoring.free_tier.format, 0.35);
        assert_eq!(scoring.premium_tier.keyword, 0.45);
        assert_eq!(scoring.premium_tier.format, 0.30);
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let mut config = EngineConfig::default();
        config.cache.ttl_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unbalanced_weights_rejected() {
        let mut config = EngineConfig::default();
        config.scoring.free_tier.keyword = 0.9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let parsed = EngineConfig::from_toml_str(&serialized).unwrap();
        assert_eq!(parsed.scoring.free_tier, config.scoring.free_tier);
    }
}
