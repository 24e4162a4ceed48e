use serde::{Deserialize, Serialize};

/// Final underwriting decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnderwritingDecision {
    Approve,
    Conditional,
    NeedsReview,
    Decline,
}

/// Terminal output of the decision engine; never mutated after construction
/// (the pipeline only appends explainability entries to `reasoning`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnderwritingRecommendation {
    pub decision: UnderwritingDecision,
    /// Confidence in the decision, in [0, 1].
    pub confidence: f64,
    /// Why the decision was reached, including which inputs were defaulted.
    pub reasoning: Vec<String>,
    /// Conditions attached to CONDITIONAL approvals.
    pub conditions: Vec<String>,
    pub additional_info_needed: Vec<String>,
    /// Recommended funding amount; absent for DECLINE and NEEDS_REVIEW.
    pub recommended_amount: Option<f64>,
    pub risk_mitigation: Vec<String>,
}

impl UnderwritingRecommendation {
    /// The only path producing confidence 0: catastrophic input absence.
    pub fn manual_review(reason: impl Into<String>) -> Self {
        Self {
            decision: UnderwritingDecision::NeedsReview,
            confidence: 0.0,
            reasoning: vec![reason.into()],
            conditions: vec!["Manual underwriter review required".to_string()],
            additional_info_needed: vec!["Complete case file review".to_string()],
            recommended_amount: None,
            risk_mitigation: vec!["Comprehensive manual analysis required".to_string()],
        }
    }
}

/// Statute-of-limitations urgency classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatuteRiskLevel {
    Critical,
    High,
    Medium,
    Low,
}

/// Advisory statute-of-limitations context attached to the recommendation's
/// reasoning; not a separate gating decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatuteAssessment {
    pub risk_level: StatuteRiskLevel,
    pub risk_score: f64,
    pub days_remaining: i64,
    pub statute_limit_days: i64,
}
