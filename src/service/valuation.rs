//! Risk-adjusted case valuation.
//!
//! Blends comparable-case statistics with the independently-derived estimate,
//! falling back to fixed per-case-type defaults so a valuation is always
//! produced. The ±30% confidence band is a fixed, documented constant rather
//! than a statistically derived interval.

use crate::model::case::CaseType;
use crate::model::comparables::OutcomeStatistics;
use crate::model::extraction::{ExtractedRelativeStrength, ExtractedValuation};
use crate::model::risk::RiskLevel;
use crate::model::valuation::{
    CaseValuation, FundingGuidance, FundingRecommendation, ValuationBasis, ValueRange,
};

/// Weight of the comparable-case mean in the base estimate.
const COMPARABLES_WEIGHT: f64 = 0.6;
/// Weight of the external point estimate in the base estimate.
const EXTERNAL_WEIGHT: f64 = 0.4;

/// Fixed confidence band around the risk-adjusted value.
const CONFIDENCE_BAND_LOW: f64 = 0.7;
const CONFIDENCE_BAND_HIGH: f64 = 1.3;

/// Case-strength adjustment when assessed stronger/weaker than comparables.
const STRONGER_ADJUSTMENT: f64 = 1.1;
const WEAKER_ADJUSTMENT: f64 = 0.9;

/// Produce the risk-adjusted valuation for a case.
pub fn value(
    case_type: CaseType,
    stats: &OutcomeStatistics,
    external: Option<&ExtractedValuation>,
) -> CaseValuation {
    let comparables_mean = stats.settlements.mean;
    let external_estimate = external.map(ExtractedValuation::point_estimate).unwrap_or(0.0);

    let (base_valuation, basis) = if comparables_mean > 0.0 && external_estimate > 0.0 {
        (
            comparables_mean * COMPARABLES_WEIGHT + external_estimate * EXTERNAL_WEIGHT,
            ValuationBasis::Blended,
        )
    } else if comparables_mean > 0.0 {
        (comparables_mean, ValuationBasis::ComparablesOnly)
    } else if external_estimate > 0.0 {
        (external_estimate, ValuationBasis::ExternalOnly)
    } else {
        (
            case_type.default_settlement_value(),
            ValuationBasis::CaseTypeDefault,
        )
    };

    let strength_adjustment = match external.map(|e| e.relative_strength) {
        Some(ExtractedRelativeStrength::Stronger) => STRONGER_ADJUSTMENT,
        Some(ExtractedRelativeStrength::Weaker) => WEAKER_ADJUSTMENT,
        Some(ExtractedRelativeStrength::Similar) | None => 1.0,
    };
    let risk_adjustment = stats.success_probability * strength_adjustment;
    let estimated_value = round2(base_valuation * risk_adjustment);

    tracing::debug!(
        case_type = %case_type,
        base_valuation = base_valuation,
        basis = ?basis,
        risk_adjustment = risk_adjustment,
        estimated_value = estimated_value,
        "Calculated risk-adjusted valuation"
    );

    CaseValuation {
        estimated_value,
        base_valuation: round2(base_valuation),
        confidence_range: ValueRange {
            low: round2(estimated_value * CONFIDENCE_BAND_LOW),
            high: round2(estimated_value * CONFIDENCE_BAND_HIGH),
        },
        risk_adjustment: round3(risk_adjustment),
        basis,
    }
}

/// Advisory funding guidance from the valuation and comparable outcomes.
///
/// The maximum recommended funding is 12% of estimated value for cases with
/// strong success prospects (≥0.7), 10% otherwise.
pub fn funding_guidance(
    valuation: &CaseValuation,
    stats: &OutcomeStatistics,
    requested_amount: f64,
) -> FundingGuidance {
    let estimated_value = valuation.estimated_value;
    let success_probability = stats.success_probability;

    let max_funding_ratio = if success_probability >= 0.7 { 0.12 } else { 0.10 };
    let max_recommended_amount = round2(estimated_value * max_funding_ratio);

    let (recommendation, risk_level) = if requested_amount <= max_recommended_amount {
        (FundingRecommendation::Approve, RiskLevel::Low)
    } else if requested_amount <= estimated_value * 0.20 {
        (FundingRecommendation::Conditional, RiskLevel::Medium)
    } else {
        (FundingRecommendation::ReduceAmount, RiskLevel::High)
    };

    let funding_ratio_percent = if estimated_value > 0.0 {
        round1(requested_amount / estimated_value * 100.0)
    } else {
        0.0
    };

    let rationale = match recommendation {
        FundingRecommendation::Approve => format!(
            "Requested amount (${requested_amount:.2}) is within acceptable range for estimated case value (${estimated_value:.2}) with {:.1}% success probability.",
            success_probability * 100.0
        ),
        FundingRecommendation::Conditional => format!(
            "Requested amount (${requested_amount:.2}) is moderate relative to estimated case value (${estimated_value:.2}). Recommend enhanced monitoring."
        ),
        FundingRecommendation::ReduceAmount => format!(
            "Requested amount (${requested_amount:.2}) exceeds recommended funding ratio for estimated case value (${estimated_value:.2}). Suggest reducing to maximum recommended amount."
        ),
    };

    FundingGuidance {
        recommendation,
        risk_level,
        max_recommended_amount,
        funding_ratio_percent,
        success_probability,
        rationale,
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}
