//! Strongly-typed payloads returned by the semantic extraction service.
//!
//! These are tagged records with explicit optional fields and documented
//! neutral defaults, never free-form maps threaded through scoring math.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Qualitative case features extracted from free-text case notes.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedCaseFeatures {
    pub injury_severity: ExtractedSeverity,

    pub liability_clarity: ExtractedLiability,

    /// Damage categories present in the case
    #[schemars(
        description = "Damage categories present in the case (e.g. medical, lost_wages, pain_suffering, property, punitive)"
    )]
    pub damages_type: Vec<String>,

    pub case_complexity: ExtractedComplexity,

    /// Important case characteristics for similarity comparison
    #[schemars(description = "Short list of the most important case characteristics")]
    pub key_factors: Vec<String>,

    #[schemars(description = "Venue character: urban, suburban, or rural (optional)")]
    pub venue_characteristics: Option<String>,

    #[schemars(
        description = "Primary defendant type: individual, corporation, government, or insurance (optional)"
    )]
    pub defendant_type: Option<String>,

    /// Overall case strength on a 0-100 scale
    #[schemars(description = "Estimated overall case strength, 0-100")]
    pub estimated_case_strength: f64,
}

impl ExtractedCaseFeatures {
    /// Neutral defaults substituted when extraction is unavailable.
    pub fn neutral() -> Self {
        Self {
            injury_severity: ExtractedSeverity::Moderate,
            liability_clarity: ExtractedLiability::Disputed,
            damages_type: vec!["medical".to_string(), "pain_suffering".to_string()],
            case_complexity: ExtractedComplexity::Moderate,
            key_factors: vec!["Standard personal injury case".to_string()],
            venue_characteristics: None,
            defendant_type: None,
            estimated_case_strength: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExtractedSeverity {
    Minor,
    Moderate,
    Severe,
    Catastrophic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExtractedLiability {
    Clear,
    Disputed,
    Unclear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExtractedComplexity {
    Simple,
    Moderate,
    Complex,
}

/// One qualitative risk sub-score with its supporting rationale.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedRiskFactor {
    /// Risk score, 0-100 where 100 is highest risk
    #[schemars(description = "Risk score on a 0-100 scale where 100 is highest risk")]
    pub score: f64,

    #[schemars(description = "Brief explanation of the score")]
    pub reasoning: Option<String>,

    #[schemars(description = "Concerning issues identified for this factor")]
    pub red_flags: Vec<String>,

    #[schemars(description = "Favorable aspects identified for this factor")]
    pub positive_indicators: Vec<String>,
}

/// The seven qualitative risk sub-scores assessed from case data.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedRiskAssessment {
    /// Clarity of defendant liability, contributory negligence exposure
    pub liability_risk: ExtractedRiskFactor,

    /// Whether damages justify the requested funding
    pub damages_risk: ExtractedRiskFactor,

    /// Likelihood the defendant or insurer can pay a judgment
    pub collectibility_risk: ExtractedRiskFactor,

    /// Expected time to resolution
    pub time_risk: ExtractedRiskFactor,

    /// Quality and experience of the representing law firm
    pub legal_representation_risk: ExtractedRiskFactor,

    /// Plaintiff responsiveness and cooperation
    pub communication_risk: ExtractedRiskFactor,

    /// Availability and completeness of key documents
    pub documentation_risk: ExtractedRiskFactor,

    #[schemars(description = "Summary of the case risk profile")]
    pub overall_assessment: Option<String>,

    #[schemars(description = "Top risk concerns, most significant first")]
    pub key_concerns: Vec<String>,

    #[schemars(description = "Suggestions to reduce risk")]
    pub mitigation_strategies: Vec<String>,
}

impl ExtractedRiskAssessment {
    /// Named sub-scores in a fixed order for deterministic averaging.
    pub fn subscores(&self) -> [(&'static str, &ExtractedRiskFactor); 7] {
        [
            ("liability_risk", &self.liability_risk),
            ("damages_risk", &self.damages_risk),
            ("collectibility_risk", &self.collectibility_risk),
            ("time_risk", &self.time_risk),
            ("legal_representation_risk", &self.legal_representation_risk),
            ("communication_risk", &self.communication_risk),
            ("documentation_risk", &self.documentation_risk),
        ]
    }
}

/// Independently-derived valuation estimate for the target case.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedValuation {
    /// Estimated settlement value range in dollars
    pub estimated_range: ExtractedValueRange,

    /// Strength of the target case relative to its comparables
    pub relative_strength: ExtractedRelativeStrength,

    #[schemars(description = "Explanation of the relative-strength judgment")]
    pub strength_reasoning: Option<String>,

    #[schemars(description = "Factors driving value up")]
    pub value_drivers: Vec<String>,

    #[schemars(description = "Factors dragging value down")]
    pub value_detractors: Vec<String>,

    #[schemars(description = "Detailed valuation reasoning")]
    pub valuation_reasoning: Option<String>,

    #[schemars(description = "Factors supporting confidence in the valuation")]
    pub confidence_factors: Vec<String>,
}

impl ExtractedValuation {
    /// Midpoint of the estimated range; 0 when no usable range was produced.
    pub fn point_estimate(&self) -> f64 {
        (self.estimated_range.low + self.estimated_range.high) / 2.0
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedValueRange {
    pub low: f64,
    pub high: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExtractedRelativeStrength {
    Stronger,
    Similar,
    Weaker,
}
