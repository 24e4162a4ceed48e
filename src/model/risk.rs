use serde::{Deserialize, Serialize};

/// One scored risk factor with its human-readable justification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskFactorEntry {
    pub name: String,
    /// 0-100 where 100 is highest risk.
    pub score: f64,
    /// The concrete value the score was derived from (amount, age, ...).
    pub factor_value: String,
    pub reasoning: String,
}

/// Overall risk classification with its canned recommendation list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    /// Level thresholds: ≤30 LOW, ≤50 MEDIUM, ≤70 HIGH, else VERY_HIGH.
    pub fn from_score(score: f64) -> Self {
        if score <= 30.0 {
            RiskLevel::Low
        } else if score <= 50.0 {
            RiskLevel::Medium
        } else if score <= 70.0 {
            RiskLevel::High
        } else {
            RiskLevel::VeryHigh
        }
    }

    pub fn recommendations(&self) -> &'static [&'static str] {
        match self {
            RiskLevel::Low => &[
                "Proceed with standard processing",
                "Monitor for any changes in case status",
                "Consider expedited review for quick approval",
            ],
            RiskLevel::Medium => &[
                "Proceed with enhanced due diligence",
                "Request additional documentation",
                "Monitor case progress closely",
            ],
            RiskLevel::High => &[
                "Require additional approvals",
                "Consider reduced funding amount",
                "Implement enhanced monitoring",
                "Request legal opinion on case strength",
            ],
            RiskLevel::VeryHigh => &[
                "Consider declining funding",
                "If proceeding, require senior management approval",
                "Significantly reduce funding amount",
                "Implement maximum monitoring protocols",
            ],
        }
    }
}

/// Blended risk score: qualitative sub-scores (weight 0.6) combined with the
/// four rule-based sub-scores (weight 0.4).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskScore {
    pub overall_score: f64,
    pub risk_level: RiskLevel,
    /// Average of the externally-derived qualitative sub-scores (50 when absent).
    pub external_contribution: f64,
    /// Average of the rule-based sub-scores.
    pub rules_contribution: f64,
    pub factors: Vec<RiskFactorEntry>,
    pub recommendations: Vec<String>,
    /// Confidence in the analysis, grows with the number of scored factors.
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_thresholds() {
        assert_eq!(RiskLevel::from_score(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(30.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(30.1), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(50.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(70.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(70.1), RiskLevel::VeryHigh);
    }

    #[test]
    fn test_every_level_carries_recommendations() {
        for level in [
            RiskLevel::Low,
            RiskLevel::Medium,
            RiskLevel::High,
            RiskLevel::VeryHigh,
        ] {
            assert!(!level.recommendations().is_empty());
        }
    }
}
