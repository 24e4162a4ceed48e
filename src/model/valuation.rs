use serde::{Deserialize, Serialize};

use crate::model::risk::RiskLevel;

/// Dollar value range.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValueRange {
    pub low: f64,
    pub high: f64,
}

/// Which sources fed the base estimate, making the "no data" fallback
/// explicit in the output rather than implied by magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationBasis {
    /// Comparable-case mean blended with the external estimate (0.6 / 0.4).
    Blended,
    ComparablesOnly,
    ExternalOnly,
    /// Neither source available; fixed per-case-type default applied.
    CaseTypeDefault,
}

/// Risk-adjusted case valuation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseValuation {
    /// Base estimate after risk adjustment.
    pub estimated_value: f64,
    /// Base estimate before risk adjustment.
    pub base_valuation: f64,
    /// Fixed ±30% band around the risk-adjusted value. A documented design
    /// simplification, not statistically derived.
    pub confidence_range: ValueRange,
    /// Multiplier applied to the base estimate (success probability ×
    /// case-strength adjustment).
    pub risk_adjustment: f64,
    pub basis: ValuationBasis,
}

/// Funding-ratio guidance derived from the valuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FundingRecommendation {
    Approve,
    Conditional,
    ReduceAmount,
}

/// Advisory funding recommendation based on the requested amount relative to
/// the estimated case value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundingGuidance {
    pub recommendation: FundingRecommendation,
    pub risk_level: RiskLevel,
    /// Maximum recommended funding (10-12% of estimated case value).
    pub max_recommended_amount: f64,
    /// Requested amount as a percentage of estimated case value.
    pub funding_ratio_percent: f64,
    pub success_probability: f64,
    pub rationale: String,
}
