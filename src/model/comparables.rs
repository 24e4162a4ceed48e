use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::case::CaseType;

/// A historical case scored against the target case.
///
/// Immutable once produced by the similarity scorer; ranked by
/// `similarity_score` descending with settlement amount breaking ties so
/// rankings are deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparableCase {
    pub case_id: String,
    pub case_type: CaseType,
    pub settlement_amount: f64,
    pub funding_amount: f64,
    pub case_duration_months: u32,
    pub outcome: String,
    pub jurisdiction: String,
    pub key_factors: Vec<String>,
    /// Age of the historical case, used by the recency confidence signal.
    pub case_age_days: Option<i64>,
    /// Weighted multi-factor similarity to the target, in [0, 1].
    pub similarity_score: f64,
}

/// Settlement distribution over the comparable set (positive amounts only).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettlementStatistics {
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation (divide by N) for determinism.
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

/// Estimated settlement range, mean ± one standard deviation clamped at 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettlementRange {
    pub low: f64,
    pub high: f64,
}

/// Distribution of normalized outcome labels across the comparable set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutcomeDistribution {
    pub counts: BTreeMap<String, usize>,
    pub percentages: BTreeMap<String, f64>,
    pub total_cases: usize,
}

/// Trust grade for the aggregate statistics, derived from four additive
/// signals (case count, average similarity, settlement variation, recency).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

/// Aggregate outcome statistics over a comparable-case set.
///
/// Recomputed fresh on every valuation call; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeStatistics {
    pub case_count: usize,
    pub settlements: SettlementStatistics,
    pub estimated_settlement_range: SettlementRange,
    /// Fraction of outcomes in {settled, judgment_plaintiff, favorable}.
    pub success_probability: f64,
    pub average_duration_months: f64,
    pub outcome_distribution: OutcomeDistribution,
    pub confidence: ConfidenceLevel,
}

impl OutcomeStatistics {
    /// The explicit "no data" result for an empty comparable set.
    pub fn no_data() -> Self {
        Self {
            case_count: 0,
            settlements: SettlementStatistics::default(),
            estimated_settlement_range: SettlementRange::default(),
            success_probability: 0.5,
            average_duration_months: 18.0,
            outcome_distribution: OutcomeDistribution::default(),
            confidence: ConfidenceLevel::Low,
        }
    }
}
