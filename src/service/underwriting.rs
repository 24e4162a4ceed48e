//! Final underwriting decision synthesis.
//!
//! A single-shot weighted classification over five signals (liability, risk,
//! financial acceptability, law-firm quality, case age) with threshold-driven
//! branching, plus the advisory statute-of-limitations overlay. Missing
//! upstream signals arrive already defaulted; this stage always returns a
//! decision.

use crate::model::case::CaseType;
use crate::model::config::UnderwritingCriteria;
use crate::model::recommendation::{
    StatuteAssessment, StatuteRiskLevel, UnderwritingDecision, UnderwritingRecommendation,
};

/// Factor weights of the overall decision score.
const LIABILITY_WEIGHT: f64 = 0.30;
const RISK_WEIGHT: f64 = 0.25;
const FINANCIAL_WEIGHT: f64 = 0.20;
const LAW_FIRM_WEIGHT: f64 = 0.15;
const CASE_AGE_WEIGHT: f64 = 0.10;

/// Risk-adjustment multiplier floor: even the riskiest case keeps 30% of the
/// requested amount before the funding-ratio cap.
const RISK_MULTIPLIER_FLOOR: f64 = 0.3;

/// External quality signals about the representing law firm.
#[derive(Debug, Clone, Default)]
pub struct LawFirmProfile {
    pub employee_count: usize,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
}

/// Financial viability of the requested funding against the valuation.
#[derive(Debug, Clone)]
pub struct FinancialAssessment {
    pub requested_amount: f64,
    pub estimated_case_value: f64,
    pub funding_ratio: f64,
    pub max_recommended_funding: f64,
    pub funding_ratio_acceptable: bool,
    pub risk_adjusted_amount: f64,
}

/// Evaluate the financial factors of a funding decision.
pub fn evaluate_financial(
    requested_amount: f64,
    estimated_case_value: f64,
    risk_score: f64,
    criteria: &UnderwritingCriteria,
) -> FinancialAssessment {
    let funding_ratio = if estimated_case_value > 0.0 {
        requested_amount / estimated_case_value
    } else {
        1.0
    };
    // Cases below the minimum fundable value fail the financial check
    // regardless of ratio.
    let acceptable = funding_ratio <= criteria.maximum_funding_ratio
        && estimated_case_value >= criteria.minimum_case_value;
    FinancialAssessment {
        requested_amount,
        estimated_case_value,
        funding_ratio: round3(funding_ratio),
        max_recommended_funding: round2(estimated_case_value * criteria.maximum_funding_ratio),
        funding_ratio_acceptable: acceptable,
        risk_adjusted_amount: risk_adjusted_amount(
            requested_amount,
            risk_score,
            estimated_case_value,
            criteria,
        ),
    }
}

/// Requested amount scaled by max(0.3, 1 − risk/200), capped at the maximum
/// funding ratio of the estimated case value.
pub fn risk_adjusted_amount(
    requested_amount: f64,
    risk_score: f64,
    estimated_case_value: f64,
    criteria: &UnderwritingCriteria,
) -> f64 {
    let risk_multiplier = (1.0 - risk_score / 200.0).max(RISK_MULTIPLIER_FLOOR);
    let risk_adjusted = requested_amount * risk_multiplier;
    let max_funding = estimated_case_value * criteria.maximum_funding_ratio;
    round2(risk_adjusted.min(max_funding))
}

/// Rule-based law-firm quality score with the factors that contributed.
/// A missing profile yields the neutral 50.
pub fn law_firm_quality(profile: Option<&LawFirmProfile>) -> (f64, Vec<String>) {
    let Some(profile) = profile else {
        return (50.0, vec!["No law firm data available".to_string()]);
    };

    let mut score: f64 = 50.0;
    let mut factors = Vec::new();

    if profile.employee_count > 10 {
        score += 10.0;
        factors.push("Large firm with substantial resources".to_string());
    } else if profile.employee_count > 5 {
        score += 5.0;
        factors.push("Medium-sized firm".to_string());
    }

    let complete_contacts = [
        &profile.phone,
        &profile.email,
        &profile.website,
        &profile.address,
    ]
    .iter()
    .filter(|field| field.is_some())
    .count();
    if complete_contacts >= 3 {
        score += 5.0;
        factors.push("Complete contact information".to_string());
    }

    if profile.website.is_some() {
        score += 5.0;
        factors.push("Professional web presence".to_string());
    }

    (score.min(100.0), factors)
}

/// Liability prospects: per-type rule baseline adjusted by the risk score,
/// blended 0.7 external case strength / 0.3 rules, clamped to [0, 100].
pub fn liability_score(case_type: CaseType, external_strength: f64, risk_score: f64) -> f64 {
    let rules = (case_type.base_liability_score() + (50.0 - risk_score) * 0.3).clamp(0.0, 100.0);
    round1((external_strength * 0.7 + rules * 0.3).clamp(0.0, 100.0))
}

/// Case-age staircase favouring younger cases.
pub fn case_age_score(case_age_days: i64) -> f64 {
    if case_age_days <= 180 {
        90.0
    } else if case_age_days <= 365 {
        80.0
    } else if case_age_days <= 730 {
        60.0
    } else if case_age_days <= 1095 {
        40.0
    } else {
        20.0
    }
}

/// Statute-of-limitations urgency from the per-type limitation period.
pub fn statute_assessment(case_type: CaseType, case_age_days: i64) -> StatuteAssessment {
    let statute_limit_days = case_type.statute_limit_days();
    let days_remaining = statute_limit_days - case_age_days;

    let (risk_level, risk_score) = if days_remaining <= 0 {
        (StatuteRiskLevel::Critical, 100.0)
    } else if days_remaining <= 90 {
        (StatuteRiskLevel::High, 80.0)
    } else if days_remaining <= 180 {
        (StatuteRiskLevel::Medium, 60.0)
    } else {
        (StatuteRiskLevel::Low, 20.0)
    };

    StatuteAssessment {
        risk_level,
        risk_score,
        days_remaining: days_remaining.max(0),
        statute_limit_days,
    }
}

/// The upstream signals the decision engine consumes.
#[derive(Debug, Clone)]
pub struct DecisionInputs {
    pub case_type: CaseType,
    /// Liability prospects, 0-100.
    pub liability_score: f64,
    /// Overall risk score, 0-100 (higher is riskier).
    pub risk_score: f64,
    /// Law-firm quality, 0-100.
    pub law_firm_quality: f64,
    pub case_age_days: i64,
}

/// Synthesize the final recommendation from the weighted overall score.
pub fn decide(
    inputs: &DecisionInputs,
    financial: &FinancialAssessment,
    criteria: &UnderwritingCriteria,
) -> UnderwritingRecommendation {
    let financial_score = if financial.funding_ratio_acceptable {
        100.0
    } else {
        30.0
    };
    let age_score = case_age_score(inputs.case_age_days);

    let overall_score = inputs.liability_score * LIABILITY_WEIGHT
        + (100.0 - inputs.risk_score) * RISK_WEIGHT
        + financial_score * FINANCIAL_WEIGHT
        + inputs.law_firm_quality * LAW_FIRM_WEIGHT
        + age_score * CASE_AGE_WEIGHT;

    let (decision, confidence) = if overall_score >= 75.0 {
        (UnderwritingDecision::Approve, 0.85)
    } else if overall_score >= 60.0 {
        (UnderwritingDecision::Conditional, 0.70)
    } else if overall_score >= 40.0 {
        (UnderwritingDecision::NeedsReview, 0.60)
    } else {
        (UnderwritingDecision::Decline, 0.80)
    };

    tracing::debug!(
        overall_score = overall_score,
        decision = ?decision,
        liability = inputs.liability_score,
        risk = inputs.risk_score,
        "Synthesized underwriting decision"
    );

    let mut reasoning = build_reasoning(inputs, financial);
    reasoning.push(statute_reasoning(inputs));

    let conditions = if decision == UnderwritingDecision::Conditional {
        build_conditions(inputs, financial, criteria)
    } else {
        Vec::new()
    };

    let mut additional_info_needed = Vec::new();
    if inputs.liability_score < criteria.minimum_liability_confidence {
        additional_info_needed.push("Additional evidence of defendant liability".to_string());
    }
    if matches!(
        decision,
        UnderwritingDecision::Conditional | UnderwritingDecision::NeedsReview
    ) {
        additional_info_needed.push("Updated case status and settlement discussions".to_string());
    }

    let risk_mitigation = build_risk_mitigation(inputs.risk_score, decision, criteria);

    let recommended_amount = match decision {
        UnderwritingDecision::Decline | UnderwritingDecision::NeedsReview => None,
        _ => Some(if financial.risk_adjusted_amount > 0.0 {
            financial.requested_amount.min(financial.risk_adjusted_amount)
        } else {
            financial.requested_amount
        }),
    };

    UnderwritingRecommendation {
        decision,
        confidence,
        reasoning,
        conditions,
        additional_info_needed,
        recommended_amount,
        risk_mitigation,
    }
}

fn build_reasoning(inputs: &DecisionInputs, financial: &FinancialAssessment) -> Vec<String> {
    let mut reasoning = Vec::new();

    if inputs.liability_score >= 70.0 {
        reasoning.push("Strong liability prospects based on case analysis".to_string());
    } else if inputs.liability_score >= 50.0 {
        reasoning.push("Moderate liability prospects - case has merit".to_string());
    } else {
        reasoning.push("Weak liability prospects - significant concerns identified".to_string());
    }

    if inputs.risk_score <= 40.0 {
        reasoning.push("Low risk profile - good funding candidate".to_string());
    } else if inputs.risk_score <= 60.0 {
        reasoning.push("Moderate risk profile - acceptable with monitoring".to_string());
    } else {
        reasoning.push("High risk profile - requires careful consideration".to_string());
    }

    if financial.funding_ratio_acceptable {
        reasoning.push("Requested amount within acceptable funding parameters".to_string());
    } else {
        reasoning.push("Requested amount exceeds recommended funding ratio".to_string());
    }

    if inputs.case_age_days > 730 {
        reasoning.push("Case age raises statute of limitations concerns".to_string());
    } else if inputs.case_age_days < 30 {
        reasoning.push("Recent case with fresh evidence".to_string());
    }

    reasoning
}

fn statute_reasoning(inputs: &DecisionInputs) -> String {
    let statute = statute_assessment(inputs.case_type, inputs.case_age_days);
    format!(
        "Statute of limitations outlook: {:?} ({} of {} days remaining for {} cases)",
        statute.risk_level, statute.days_remaining, statute.statute_limit_days, inputs.case_type
    )
}

fn build_conditions(
    inputs: &DecisionInputs,
    financial: &FinancialAssessment,
    criteria: &UnderwritingCriteria,
) -> Vec<String> {
    let mut conditions = Vec::new();

    if !financial.funding_ratio_acceptable {
        conditions.push(format!(
            "Reduce funding amount to ${:.2}",
            financial.risk_adjusted_amount
        ));
    }
    if inputs.risk_score > 60.0 {
        conditions.push("Enhanced monitoring and progress reporting required".to_string());
    }
    if inputs.liability_score < criteria.minimum_liability_confidence {
        conditions.push("Additional liability documentation required".to_string());
    }

    conditions
}

fn build_risk_mitigation(
    risk_score: f64,
    decision: UnderwritingDecision,
    criteria: &UnderwritingCriteria,
) -> Vec<String> {
    let mut mitigation = Vec::new();

    if risk_score > 50.0 {
        mitigation.push("Regular case progress monitoring".to_string());
    }
    if risk_score > criteria.maximum_acceptable_risk {
        mitigation.extend([
            "Quarterly attorney communication".to_string(),
            "Medical record updates as available".to_string(),
            "Settlement negotiation status updates".to_string(),
        ]);
    }
    if decision == UnderwritingDecision::Conditional {
        mitigation.push("Approval contingent on meeting specified conditions".to_string());
    }

    mitigation
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
