//! Conversions from extraction payloads into the scoring model.

use chrono::{DateTime, Utc};

use crate::model::case::{
    CaseFeatureSet, CaseRecord, InjurySeverity, LiabilityClarity, DEFAULT_CASE_AGE_DAYS,
};
use crate::model::extraction::{ExtractedCaseFeatures, ExtractedLiability, ExtractedSeverity};

impl From<ExtractedSeverity> for InjurySeverity {
    fn from(value: ExtractedSeverity) -> Self {
        match value {
            ExtractedSeverity::Minor => InjurySeverity::Minor,
            ExtractedSeverity::Moderate => InjurySeverity::Moderate,
            ExtractedSeverity::Severe => InjurySeverity::Severe,
            ExtractedSeverity::Catastrophic => InjurySeverity::Catastrophic,
        }
    }
}

impl From<ExtractedLiability> for LiabilityClarity {
    fn from(value: ExtractedLiability) -> Self {
        match value {
            ExtractedLiability::Clear => LiabilityClarity::Clear,
            ExtractedLiability::Disputed => LiabilityClarity::Disputed,
            ExtractedLiability::Unclear => LiabilityClarity::Unclear,
        }
    }
}

/// Combine the raw intake with the extracted qualitative features into the
/// normalized feature set the similarity scorer consumes.
pub fn build_feature_set(
    case: &CaseRecord,
    extracted: &ExtractedCaseFeatures,
    now: DateTime<Utc>,
) -> CaseFeatureSet {
    CaseFeatureSet {
        case_type: case.case_type_or_default(),
        injury_severity: extracted.injury_severity.into(),
        liability_clarity: extracted.liability_clarity.into(),
        jurisdiction: case
            .jurisdiction
            .clone()
            .filter(|j| !j.trim().is_empty())
            .unwrap_or_else(|| "unknown".to_string()),
        case_age_days: case
            .case_age_days(now)
            .unwrap_or(DEFAULT_CASE_AGE_DAYS)
            .max(0),
        funding_amount: case.requested_amount,
        law_firm_id: case.law_firm_id.clone(),
        damages_type: extracted.damages_type.iter().cloned().collect(),
        key_factors: extracted.key_factors.clone(),
    }
}
