//! Immutable scoring configuration.
//!
//! Every weight and threshold table lives here as a plain struct with
//! documented defaults, passed by reference into the pure scoring functions.
//! An optional YAML overlay file can adjust individual values; a missing,
//! empty, or invalid file falls back to the defaults.

use std::fs;
use std::path::Path;

use serde::Deserialize;

const ENV_CONFIG_PATH: &str = "UNDERWRITING_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "underwriting.yaml";

/// Per-factor similarity weights. The defaults sum to exactly 1.0, which
/// keeps the combined score in [0, 1].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimilarityWeights {
    pub case_type: f64,
    pub injury_severity: f64,
    pub liability_clarity: f64,
    pub jurisdiction: f64,
    pub case_age: f64,
    pub funding_amount: f64,
    pub law_firm: f64,
    pub damages_type: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            case_type: 0.25,
            injury_severity: 0.20,
            liability_clarity: 0.15,
            jurisdiction: 0.10,
            case_age: 0.10,
            funding_amount: 0.10,
            law_firm: 0.05,
            damages_type: 0.05,
        }
    }
}

impl SimilarityWeights {
    pub fn total(&self) -> f64 {
        self.case_type
            + self.injury_severity
            + self.liability_clarity
            + self.jurisdiction
            + self.case_age
            + self.funding_amount
            + self.law_firm
            + self.damages_type
    }
}

/// Comparable-case search parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ComparableSearchConfig {
    /// Candidates below this similarity are discarded.
    pub min_similarity: f64,
    /// At most this many comparables are kept, best first.
    pub max_results: usize,
}

impl Default for ComparableSearchConfig {
    fn default() -> Self {
        Self {
            min_similarity: 0.3,
            max_results: 10,
        }
    }
}

/// Requested-amount staircase boundaries for the financial risk sub-score.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FinancialRiskThresholds {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl Default for FinancialRiskThresholds {
    fn default() -> Self {
        Self {
            low: 5_000.0,
            medium: 25_000.0,
            high: 100_000.0,
        }
    }
}

/// Underwriting criteria applied by the decision engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UnderwritingCriteria {
    pub minimum_case_value: f64,
    /// Maximum funding as a fraction of estimated case value.
    pub maximum_funding_ratio: f64,
    pub minimum_liability_confidence: f64,
    pub maximum_acceptable_risk: f64,
}

impl Default for UnderwritingCriteria {
    fn default() -> Self {
        Self {
            minimum_case_value: 10_000.0,
            maximum_funding_ratio: 0.15,
            minimum_liability_confidence: 60.0,
            maximum_acceptable_risk: 70.0,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub similarity: SimilarityWeights,
    pub search: ComparableSearchConfig,
    pub financial_risk: FinancialRiskThresholds,
    pub underwriting: UnderwritingCriteria,
}

impl EngineConfig {
    /// Load configuration, applying the YAML overlay named by
    /// `UNDERWRITING_CONFIG_PATH` (default `underwriting.yaml`) when present.
    pub fn from_env() -> Self {
        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_config_file(&config_path).unwrap_or_default()
    }

    fn load_config_file(path: &str) -> Option<Self> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                let contents = contents.trim();
                if contents.is_empty() {
                    tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
                    return Some(Self::default());
                }

                match serde_yaml::from_str(contents) {
                    Ok(config) => {
                        tracing::info!(path = %path.display(), "Loaded scoring configuration from file");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }
}
