//! Blended risk scoring: rule-derived sub-scores combined with the
//! externally-supplied qualitative assessment.
//!
//! The four rule-based sub-scores are independent and each carries a
//! human-readable reasoning string. Missing external sub-scores default the
//! qualitative contribution to a neutral 50 rather than failing the analysis.

use chrono::{DateTime, Utc};

use crate::model::case::{CaseRecord, REQUIRED_INTAKE_FIELDS};
use crate::model::config::FinancialRiskThresholds;
use crate::model::extraction::ExtractedRiskAssessment;
use crate::model::risk::{RiskFactorEntry, RiskLevel, RiskScore};

/// Weight of the externally-derived qualitative sub-scores.
const EXTERNAL_WEIGHT: f64 = 0.6;
/// Weight of the rule-based sub-scores.
const RULES_WEIGHT: f64 = 0.4;
/// Neutral qualitative contribution when extraction was unavailable.
const NEUTRAL_EXTERNAL_SCORE: f64 = 50.0;

/// Score a case's risk from rules plus the optional qualitative assessment.
///
/// Always returns a fully-formed result; every missing input has a documented
/// default.
pub fn score(
    case: &CaseRecord,
    external: Option<&ExtractedRiskAssessment>,
    thresholds: &FinancialRiskThresholds,
    now: DateTime<Utc>,
) -> RiskScore {
    let rule_factors = rule_based_factors(case, thresholds, now);
    let rules_contribution =
        rule_factors.iter().map(|f| f.score).sum::<f64>() / rule_factors.len() as f64;

    let mut factors = rule_factors;
    let (external_contribution, external_count) = match external {
        Some(assessment) => {
            let subscores = assessment.subscores();
            let average = subscores
                .iter()
                .map(|(_, factor)| factor.score.clamp(0.0, 100.0))
                .sum::<f64>()
                / subscores.len() as f64;
            for (name, factor) in subscores {
                factors.push(RiskFactorEntry {
                    name: name.to_string(),
                    score: factor.score.clamp(0.0, 100.0),
                    factor_value: "qualitative assessment".to_string(),
                    reasoning: factor
                        .reasoning
                        .clone()
                        .unwrap_or_else(|| "No reasoning provided".to_string()),
                });
            }
            (average, subscores.len())
        }
        None => (NEUTRAL_EXTERNAL_SCORE, 0),
    };

    let overall_score =
        round1(external_contribution * EXTERNAL_WEIGHT + rules_contribution * RULES_WEIGHT);
    let risk_level = RiskLevel::from_score(overall_score);
    let rules_count = 4;
    let confidence = (50.0 + 5.0 * external_count as f64 + 3.0 * rules_count as f64).min(100.0);

    tracing::debug!(
        overall_score = overall_score,
        risk_level = ?risk_level,
        external_contribution = external_contribution,
        rules_contribution = rules_contribution,
        "Combined risk assessments"
    );

    RiskScore {
        overall_score,
        risk_level,
        external_contribution: round1(external_contribution),
        rules_contribution: round1(rules_contribution),
        factors,
        recommendations: risk_level
            .recommendations()
            .iter()
            .map(ToString::to_string)
            .collect(),
        confidence,
    }
}

fn rule_based_factors(
    case: &CaseRecord,
    thresholds: &FinancialRiskThresholds,
    now: DateTime<Utc>,
) -> Vec<RiskFactorEntry> {
    vec![
        case_type_risk(case),
        financial_risk(case, thresholds),
        time_risk(case, now),
        information_completeness_risk(case),
    ]
}

fn case_type_risk(case: &CaseRecord) -> RiskFactorEntry {
    let case_type = case.case_type_or_default();
    RiskFactorEntry {
        name: "case_type_risk".to_string(),
        score: case_type.base_risk_score(),
        factor_value: case_type.to_string(),
        reasoning: format!("Base risk level for {case_type} cases"),
    }
}

/// Staircase on the requested amount; an unspecified amount is treated as
/// high uncertainty, not low risk.
fn financial_risk(case: &CaseRecord, thresholds: &FinancialRiskThresholds) -> RiskFactorEntry {
    let amount = case.requested_amount;
    let (score, reasoning) = if amount <= 0.0 {
        (70.0, "No funding amount specified - high uncertainty")
    } else if amount < thresholds.low {
        (30.0, "Low funding amount - manageable risk")
    } else if amount < thresholds.medium {
        (50.0, "Moderate funding amount - standard risk")
    } else if amount < thresholds.high {
        (70.0, "High funding amount - increased risk")
    } else {
        (85.0, "Very high funding amount - significant risk")
    };
    RiskFactorEntry {
        name: "financial_risk".to_string(),
        score,
        factor_value: format!("${amount:.2}"),
        reasoning: reasoning.to_string(),
    }
}

/// Staircase on days since the incident; the 30-180 day window is optimal.
fn time_risk(case: &CaseRecord, now: DateTime<Utc>) -> RiskFactorEntry {
    match case.case_age_days(now) {
        Some(days) => {
            let (score, reasoning) = if days < 30 {
                (40.0, "Recent incident - likely good documentation")
            } else if days < 180 {
                (30.0, "Optimal timeframe for case development")
            } else if days < 365 {
                (50.0, "Case aging - may face statute of limitations pressure")
            } else if days < 730 {
                (70.0, "Older case - higher statute of limitations risk")
            } else {
                (85.0, "Very old case - high statute of limitations risk")
            };
            RiskFactorEntry {
                name: "time_risk".to_string(),
                score,
                factor_value: format!("{days} days"),
                reasoning: reasoning.to_string(),
            }
        }
        None => RiskFactorEntry {
            name: "time_risk".to_string(),
            score: 65.0,
            factor_value: "Not provided".to_string(),
            reasoning: "No incident date provided - moderate-high risk".to_string(),
        },
    }
}

fn information_completeness_risk(case: &CaseRecord) -> RiskFactorEntry {
    let provided = case.intake_fields_present();
    let ratio = provided as f64 / REQUIRED_INTAKE_FIELDS as f64;
    RiskFactorEntry {
        name: "information_completeness_risk".to_string(),
        score: (1.0 - ratio) * 100.0,
        factor_value: format!("{provided}/{REQUIRED_INTAKE_FIELDS} fields"),
        reasoning: format!("Information completeness: {:.1}%", ratio * 100.0),
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::case::CaseType;
    use crate::model::extraction::ExtractedRiskFactor;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn factor(score: f64) -> ExtractedRiskFactor {
        ExtractedRiskFactor {
            score,
            reasoning: Some("test".to_string()),
            red_flags: vec![],
            positive_indicators: vec![],
        }
    }

    fn assessment(score: f64) -> ExtractedRiskAssessment {
        ExtractedRiskAssessment {
            liability_risk: factor(score),
            damages_risk: factor(score),
            collectibility_risk: factor(score),
            time_risk: factor(score),
            legal_representation_risk: factor(score),
            communication_risk: factor(score),
            documentation_risk: factor(score),
            overall_assessment: None,
            key_concerns: vec![],
            mitigation_strategies: vec![],
        }
    }

    #[test]
    fn test_degenerate_record_stays_between_fifty_and_hundred() {
        // No amount, no incident date, no intake fields at all.
        let case = CaseRecord::default();
        let result = score(&case, None, &FinancialRiskThresholds::default(), now());

        let by_name = |name: &str| {
            result
                .factors
                .iter()
                .find(|f| f.name == name)
                .map(|f| f.score)
                .unwrap()
        };
        assert_eq!(by_name("financial_risk"), 70.0);
        assert_eq!(by_name("time_risk"), 65.0);
        assert_eq!(by_name("information_completeness_risk"), 100.0);
        assert_eq!(by_name("case_type_risk"), CaseType::Other.base_risk_score());

        assert!(result.overall_score > 50.0);
        assert!(result.overall_score < 100.0);
        // External side defaulted to neutral.
        assert_eq!(result.external_contribution, 50.0);
    }

    #[test]
    fn test_blend_weights_external_over_rules() {
        let case = CaseRecord {
            case_type: Some(CaseType::AutoAccident),
            requested_amount: 10_000.0,
            incident_date: Some(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap()),
            first_name: Some("A".to_string()),
            last_name: Some("B".to_string()),
            phone: Some("555".to_string()),
            email: Some("a@b.c".to_string()),
            address: Some("1 Main St".to_string()),
            ..CaseRecord::default()
        };
        // Rules: case_type 30, financial 50, time 30 (61 days), info 0.
        let result = score(
            &case,
            Some(&assessment(80.0)),
            &FinancialRiskThresholds::default(),
            now(),
        );
        assert_eq!(result.rules_contribution, 27.5);
        assert_eq!(result.external_contribution, 80.0);
        assert_eq!(result.overall_score, 59.0);
        assert_eq!(result.risk_level, RiskLevel::High);
        // 7 external factors + 4 rule factors in the breakdown.
        assert_eq!(result.factors.len(), 11);
    }

    #[test]
    fn test_confidence_grows_with_scored_factors() {
        let case = CaseRecord::default();
        let without = score(&case, None, &FinancialRiskThresholds::default(), now());
        let with = score(
            &case,
            Some(&assessment(40.0)),
            &FinancialRiskThresholds::default(),
            now(),
        );
        assert_eq!(without.confidence, 62.0);
        assert_eq!(with.confidence, 97.0);
    }

    #[test]
    fn test_financial_staircase_boundaries() {
        let thresholds = FinancialRiskThresholds::default();
        let score_for = |amount: f64| {
            financial_risk(
                &CaseRecord {
                    requested_amount: amount,
                    ..CaseRecord::default()
                },
                &thresholds,
            )
            .score
        };
        assert_eq!(score_for(0.0), 70.0);
        assert_eq!(score_for(4_999.0), 30.0);
        assert_eq!(score_for(5_000.0), 50.0);
        assert_eq!(score_for(99_999.0), 70.0);
        assert_eq!(score_for(100_000.0), 85.0);
    }

    #[test]
    fn test_time_staircase_optimal_window() {
        let score_for = |days: i64| {
            time_risk(
                &CaseRecord {
                    incident_date: Some(now() - chrono::Duration::days(days)),
                    ..CaseRecord::default()
                },
                now(),
            )
            .score
        };
        assert_eq!(score_for(10), 40.0);
        assert_eq!(score_for(90), 30.0);
        assert_eq!(score_for(200), 50.0);
        assert_eq!(score_for(400), 70.0);
        assert_eq!(score_for(800), 85.0);
    }
}
