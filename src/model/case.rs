use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Case age assumed when the incident date is missing (days).
pub const DEFAULT_CASE_AGE_DAYS: i64 = 365;

/// Number of intake fields tracked for information completeness.
pub const REQUIRED_INTAKE_FIELDS: usize = 6;

/// Closed set of case types the engine scores.
///
/// Each type carries the fixed per-type constants used across the scoring
/// stages: base risk weight, fallback settlement value, statute-of-limitations
/// period, and base liability prospects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseType {
    #[serde(rename = "Auto Accident")]
    AutoAccident,
    #[serde(rename = "Slip and Fall")]
    SlipAndFall,
    #[serde(rename = "Medical Malpractice")]
    MedicalMalpractice,
    #[serde(rename = "Workers Compensation")]
    WorkersCompensation,
    #[serde(rename = "Product Liability")]
    ProductLiability,
    #[default]
    #[serde(rename = "Other")]
    Other,
}

impl CaseType {
    /// Base risk contribution on a 0-100 scale.
    pub fn base_risk_score(&self) -> f64 {
        match self {
            CaseType::AutoAccident => 30.0,
            CaseType::SlipAndFall => 50.0,
            CaseType::MedicalMalpractice => 70.0,
            CaseType::WorkersCompensation => 40.0,
            CaseType::ProductLiability => 60.0,
            CaseType::Other => 50.0,
        }
    }

    /// Fallback settlement value used when neither comparable cases nor an
    /// external estimate are available.
    pub fn default_settlement_value(&self) -> f64 {
        match self {
            CaseType::AutoAccident => 45_000.0,
            CaseType::SlipAndFall => 35_000.0,
            CaseType::MedicalMalpractice => 125_000.0,
            CaseType::WorkersCompensation => 25_000.0,
            CaseType::ProductLiability => 85_000.0,
            CaseType::Other => 50_000.0,
        }
    }

    /// Simplified statute-of-limitations period in days.
    pub fn statute_limit_days(&self) -> i64 {
        match self {
            CaseType::MedicalMalpractice => 730,
            CaseType::WorkersCompensation => 365,
            _ => 1095,
        }
    }

    /// Rule-based baseline for liability prospects (0-100).
    pub fn base_liability_score(&self) -> f64 {
        match self {
            CaseType::AutoAccident => 70.0,
            CaseType::SlipAndFall => 55.0,
            CaseType::MedicalMalpractice => 45.0,
            CaseType::WorkersCompensation => 75.0,
            CaseType::ProductLiability => 60.0,
            CaseType::Other => 50.0,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            CaseType::AutoAccident => "Auto Accident",
            CaseType::SlipAndFall => "Slip and Fall",
            CaseType::MedicalMalpractice => "Medical Malpractice",
            CaseType::WorkersCompensation => "Workers Compensation",
            CaseType::ProductLiability => "Product Liability",
            CaseType::Other => "Other",
        }
    }
}

impl fmt::Display for CaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Injury severity on a fixed 1-4 ordinal scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjurySeverity {
    Minor,
    #[default]
    Moderate,
    Severe,
    Catastrophic,
}

impl InjurySeverity {
    /// Fixed integer scale; missing labels default to the middle value
    /// (Moderate = 2) before this is called.
    pub fn ordinal(&self) -> i64 {
        match self {
            InjurySeverity::Minor => 1,
            InjurySeverity::Moderate => 2,
            InjurySeverity::Severe => 3,
            InjurySeverity::Catastrophic => 4,
        }
    }
}

/// Liability clarity on a fixed 1-3 ordinal scale (clear is best).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiabilityClarity {
    Clear,
    #[default]
    Disputed,
    Unclear,
}

impl LiabilityClarity {
    pub fn ordinal(&self) -> i64 {
        match self {
            LiabilityClarity::Clear => 3,
            LiabilityClarity::Disputed => 2,
            LiabilityClarity::Unclear => 1,
        }
    }
}

/// A funding application as supplied by the persistence/API layer.
///
/// Every field may be absent; scoring substitutes documented defaults instead
/// of rejecting incomplete records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseRecord {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub case_type: Option<CaseType>,
    pub incident_date: Option<DateTime<Utc>>,
    /// Requested funding amount; 0 means unspecified.
    #[serde(default)]
    pub requested_amount: f64,
    /// Free-text case notes fed to the semantic extraction service.
    #[serde(default)]
    pub case_notes: String,
    pub jurisdiction: Option<String>,
    pub law_firm_id: Option<String>,
}

impl CaseRecord {
    /// Days since the incident, relative to an explicit `now` so scoring
    /// stays clock-independent. `None` when no incident date was supplied.
    pub fn case_age_days(&self, now: DateTime<Utc>) -> Option<i64> {
        self.incident_date.map(|d| (now - d).num_days())
    }

    pub fn case_type_or_default(&self) -> CaseType {
        self.case_type.unwrap_or_default()
    }

    /// How many of the tracked intake fields are present
    /// (out of [`REQUIRED_INTAKE_FIELDS`]).
    pub fn intake_fields_present(&self) -> usize {
        let non_empty = |f: &Option<String>| f.as_deref().is_some_and(|v| !v.trim().is_empty());
        [
            non_empty(&self.first_name),
            non_empty(&self.last_name),
            non_empty(&self.phone),
            non_empty(&self.email),
            non_empty(&self.address),
            self.case_type.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }
}

/// A resolved case from the historical corpus.
///
/// Qualitative fields are optional; feature-set construction applies the
/// mid-scale defaults so incomplete records are never systematically
/// penalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalCase {
    pub id: String,
    pub case_type: CaseType,
    #[serde(default)]
    pub settlement_amount: f64,
    #[serde(default)]
    pub funding_amount: f64,
    #[serde(default)]
    pub duration_months: u32,
    #[serde(default)]
    pub outcome: String,
    pub jurisdiction: Option<String>,
    pub injury_severity: Option<InjurySeverity>,
    pub liability_clarity: Option<LiabilityClarity>,
    #[serde(default)]
    pub damages_type: Vec<String>,
    pub case_age_days: Option<i64>,
    pub law_firm_id: Option<String>,
    #[serde(default)]
    pub key_factors: Vec<String>,
}

impl HistoricalCase {
    /// Normalized scoring features with documented defaults for missing data.
    pub fn feature_set(&self) -> CaseFeatureSet {
        CaseFeatureSet {
            case_type: self.case_type,
            injury_severity: self.injury_severity.unwrap_or_default(),
            liability_clarity: self.liability_clarity.unwrap_or_default(),
            jurisdiction: self
                .jurisdiction
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
            case_age_days: self.case_age_days.unwrap_or(DEFAULT_CASE_AGE_DAYS).max(0),
            funding_amount: self.funding_amount,
            law_firm_id: self.law_firm_id.clone(),
            damages_type: self.damages_type.iter().cloned().collect(),
            key_factors: self.key_factors.clone(),
        }
    }
}

/// Normalized representation of a case's scoring-relevant attributes.
///
/// Ordinal fields are always populated (mid-scale when the raw label was
/// missing) and `case_age_days` is clamped non-negative at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseFeatureSet {
    pub case_type: CaseType,
    pub injury_severity: InjurySeverity,
    pub liability_clarity: LiabilityClarity,
    pub jurisdiction: String,
    pub case_age_days: i64,
    pub funding_amount: f64,
    pub law_firm_id: Option<String>,
    pub damages_type: BTreeSet<String>,
    pub key_factors: Vec<String>,
}
