//! End-to-end underwriting pipeline.
//!
//! Orchestrates semantic extraction, comparable-case search, outcome
//! statistics, risk scoring, valuation, and the final decision. Extraction
//! failures never abort an evaluation; the affected stage falls back to its
//! neutral default and the recommendation records that the inputs were
//! degraded.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::case::{CaseRecord, HistoricalCase, DEFAULT_CASE_AGE_DAYS};
use crate::model::comparables::{ComparableCase, OutcomeStatistics};
use crate::model::config::EngineConfig;
use crate::model::extraction::ExtractedCaseFeatures;
use crate::model::risk::RiskScore;
use crate::model::recommendation::UnderwritingRecommendation;
use crate::model::valuation::{CaseValuation, FundingGuidance};
use crate::service::extraction::converters::build_feature_set;
use crate::service::extraction::SemanticExtractor;
use crate::service::underwriting::{self, DecisionInputs, LawFirmProfile};
use crate::service::{risk, similarity, statistics, valuation};

/// Complete evaluation output for one funding application.
///
/// The intermediate artifacts are `None` only on the catastrophic path (no
/// case record at all); a normal evaluation always populates them.
#[derive(Debug, Clone, Serialize)]
pub struct CaseEvaluation {
    pub comparable_cases: Vec<ComparableCase>,
    pub outcome_statistics: OutcomeStatistics,
    pub valuation: Option<CaseValuation>,
    pub funding_guidance: Option<FundingGuidance>,
    pub risk: Option<RiskScore>,
    pub recommendation: UnderwritingRecommendation,
}

/// Orchestrates the full evaluation of a funding application.
pub struct UnderwritingPipeline {
    extractor: Arc<dyn SemanticExtractor>,
    config: EngineConfig,
}

impl UnderwritingPipeline {
    pub fn new(extractor: Arc<dyn SemanticExtractor>, config: EngineConfig) -> Self {
        Self { extractor, config }
    }

    /// Evaluate a funding application against the historical corpus.
    ///
    /// `case` is `None` when the application could not be loaded at all; that
    /// path yields the fixed manual-review recommendation instead of scores
    /// computed from fabricated data.
    pub async fn evaluate(
        &self,
        case: Option<&CaseRecord>,
        corpus: &[HistoricalCase],
        law_firm: Option<&LawFirmProfile>,
        now: DateTime<Utc>,
    ) -> CaseEvaluation {
        let Some(case) = case else {
            tracing::warn!("Case data unavailable, returning manual-review recommendation");
            return CaseEvaluation {
                comparable_cases: Vec::new(),
                outcome_statistics: OutcomeStatistics::no_data(),
                valuation: None,
                funding_guidance: None,
                risk: None,
                recommendation: UnderwritingRecommendation::manual_review(
                    "Case data unavailable for automated analysis",
                ),
            };
        };

        let mut degraded_inputs = Vec::new();

        let features = match self.extractor.case_features(case, now).await {
            Ok(features) => features,
            Err(e) => {
                tracing::warn!(error = %e, "Feature extraction failed, using neutral defaults");
                degraded_inputs.push("case feature extraction".to_string());
                ExtractedCaseFeatures::neutral()
            }
        };
        let feature_set = build_feature_set(case, &features, now);

        let comparable_cases = similarity::find_comparable_cases(
            &feature_set,
            corpus,
            &self.config.similarity,
            &self.config.search,
        );
        let outcome_statistics = statistics::aggregate(&comparable_cases);

        let external_risk = match self.extractor.risk_assessment(case, now).await {
            Ok(assessment) => Some(assessment),
            Err(e) => {
                tracing::warn!(error = %e, "Risk extraction failed, using neutral contribution");
                degraded_inputs.push("qualitative risk assessment".to_string());
                None
            }
        };
        let risk_score = risk::score(
            case,
            external_risk.as_ref(),
            &self.config.financial_risk,
            now,
        );

        let external_valuation = match self
            .extractor
            .case_valuation(case, &comparable_cases)
            .await
        {
            Ok(estimate) => Some(estimate),
            Err(e) => {
                tracing::warn!(error = %e, "Valuation extraction failed, using comparables only");
                degraded_inputs.push("qualitative valuation".to_string());
                None
            }
        };
        let case_valuation = valuation::value(
            feature_set.case_type,
            &outcome_statistics,
            external_valuation.as_ref(),
        );
        let guidance = valuation::funding_guidance(
            &case_valuation,
            &outcome_statistics,
            case.requested_amount,
        );

        let financial = underwriting::evaluate_financial(
            case.requested_amount,
            case_valuation.estimated_value,
            risk_score.overall_score,
            &self.config.underwriting,
        );
        let (law_firm_quality, _) = underwriting::law_firm_quality(law_firm);
        let inputs = DecisionInputs {
            case_type: feature_set.case_type,
            liability_score: underwriting::liability_score(
                feature_set.case_type,
                features.estimated_case_strength,
                risk_score.overall_score,
            ),
            risk_score: risk_score.overall_score,
            law_firm_quality,
            case_age_days: case
                .case_age_days(now)
                .unwrap_or(DEFAULT_CASE_AGE_DAYS)
                .max(0),
        };
        let mut recommendation = underwriting::decide(&inputs, &financial, &self.config.underwriting);

        for degraded in &degraded_inputs {
            recommendation
                .reasoning
                .push(format!("Note: {degraded} was unavailable; neutral defaults applied"));
        }

        tracing::info!(
            decision = ?recommendation.decision,
            comparables = comparable_cases.len(),
            estimated_value = case_valuation.estimated_value,
            overall_risk = risk_score.overall_score,
            degraded_inputs = degraded_inputs.len(),
            "Case evaluation complete"
        );

        CaseEvaluation {
            comparable_cases,
            outcome_statistics,
            valuation: Some(case_valuation),
            funding_guidance: Some(guidance),
            risk: Some(risk_score),
            recommendation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::case::{CaseType, InjurySeverity, LiabilityClarity};
    use crate::model::extraction::{
        ExtractedLiability, ExtractedRelativeStrength, ExtractedRiskAssessment,
        ExtractedRiskFactor, ExtractedSeverity, ExtractedValuation, ExtractedValueRange,
    };
    use crate::model::recommendation::UnderwritingDecision;
    use crate::service::extraction::ExtractionError;
    use async_trait::async_trait;
    use chrono::TimeZone;

    /// Extractor returning fixed favorable payloads, or failing every call.
    struct StubExtractor {
        fail: bool,
    }

    fn risk_factor(score: f64) -> ExtractedRiskFactor {
        ExtractedRiskFactor {
            score,
            reasoning: Some("stubbed".to_string()),
            red_flags: vec![],
            positive_indicators: vec![],
        }
    }

    #[async_trait]
    impl SemanticExtractor for StubExtractor {
        async fn case_features(
            &self,
            _case: &CaseRecord,
            _now: DateTime<Utc>,
        ) -> Result<ExtractedCaseFeatures, ExtractionError> {
            if self.fail {
                return Err(ExtractionError::Unavailable("stub failure".to_string()));
            }
            Ok(ExtractedCaseFeatures {
                injury_severity: ExtractedSeverity::Moderate,
                liability_clarity: ExtractedLiability::Clear,
                damages_type: vec!["medical".to_string(), "pain_suffering".to_string()],
                case_complexity: crate::model::extraction::ExtractedComplexity::Simple,
                key_factors: vec!["clear fault".to_string()],
                venue_characteristics: None,
                defendant_type: Some("insurance".to_string()),
                estimated_case_strength: 80.0,
            })
        }

        async fn risk_assessment(
            &self,
            _case: &CaseRecord,
            _now: DateTime<Utc>,
        ) -> Result<ExtractedRiskAssessment, ExtractionError> {
            if self.fail {
                return Err(ExtractionError::Timeout(30));
            }
            Ok(ExtractedRiskAssessment {
                liability_risk: risk_factor(20.0),
                damages_risk: risk_factor(25.0),
                collectibility_risk: risk_factor(15.0),
                time_risk: risk_factor(30.0),
                legal_representation_risk: risk_factor(20.0),
                communication_risk: risk_factor(25.0),
                documentation_risk: risk_factor(20.0),
                overall_assessment: Some("Low-risk case".to_string()),
                key_concerns: vec![],
                mitigation_strategies: vec![],
            })
        }

        async fn case_valuation(
            &self,
            _case: &CaseRecord,
            _comparables: &[ComparableCase],
        ) -> Result<ExtractedValuation, ExtractionError> {
            if self.fail {
                return Err(ExtractionError::Unavailable("stub failure".to_string()));
            }
            Ok(ExtractedValuation {
                estimated_range: ExtractedValueRange {
                    low: 40_000.0,
                    high: 60_000.0,
                },
                relative_strength: ExtractedRelativeStrength::Similar,
                strength_reasoning: None,
                value_drivers: vec!["clear liability".to_string()],
                value_detractors: vec![],
                valuation_reasoning: None,
                confidence_factors: vec![],
            })
        }
    }

    fn sample_case() -> CaseRecord {
        CaseRecord {
            first_name: Some("Ana".to_string()),
            last_name: Some("Reyes".to_string()),
            phone: Some("555-0100".to_string()),
            email: Some("ana@example.com".to_string()),
            address: Some("1 Main St".to_string()),
            case_type: Some(CaseType::AutoAccident),
            incident_date: Some(Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap()),
            requested_amount: 5_000.0,
            case_notes: "Rear-end collision, defendant cited at scene.".to_string(),
            jurisdiction: Some("CA".to_string()),
            law_firm_id: Some("firm-9".to_string()),
        }
    }

    fn sample_corpus() -> Vec<HistoricalCase> {
        (0..6)
            .map(|i| HistoricalCase {
                id: format!("h-{i}"),
                case_type: CaseType::AutoAccident,
                settlement_amount: 45_000.0 + i as f64 * 1_000.0,
                funding_amount: 5_000.0,
                duration_months: 14,
                outcome: "settled".to_string(),
                jurisdiction: Some("CA".to_string()),
                injury_severity: Some(InjurySeverity::Moderate),
                liability_clarity: Some(LiabilityClarity::Clear),
                damages_type: vec!["medical".to_string(), "pain_suffering".to_string()],
                case_age_days: Some(120),
                law_firm_id: Some("firm-9".to_string()),
                key_factors: vec!["clear fault".to_string()],
            })
            .collect()
    }

    fn pipeline(fail: bool) -> UnderwritingPipeline {
        UnderwritingPipeline::new(
            Arc::new(StubExtractor { fail }),
            EngineConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_missing_case_yields_manual_review() {
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        let evaluation = pipeline(false).evaluate(None, &[], None, now).await;

        assert_eq!(
            evaluation.recommendation.decision,
            UnderwritingDecision::NeedsReview
        );
        assert_eq!(evaluation.recommendation.confidence, 0.0);
        assert!(evaluation.valuation.is_none());
        assert!(evaluation.risk.is_none());
        assert!(evaluation.comparable_cases.is_empty());
        assert_eq!(evaluation.outcome_statistics.case_count, 0);
    }

    #[tokio::test]
    async fn test_strong_case_approved_end_to_end() {
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        let case = sample_case();
        let corpus = sample_corpus();
        let firm = LawFirmProfile {
            employee_count: 15,
            phone: Some("555".to_string()),
            email: Some("firm@example.com".to_string()),
            website: Some("https://example.com".to_string()),
            address: Some("2 Court St".to_string()),
        };

        let evaluation = pipeline(false)
            .evaluate(Some(&case), &corpus, Some(&firm), now)
            .await;

        assert!(!evaluation.comparable_cases.is_empty());
        assert_eq!(evaluation.outcome_statistics.success_probability, 1.0);
        let risk = evaluation.risk.as_ref().unwrap();
        assert!(risk.overall_score < 50.0);
        let valuation = evaluation.valuation.as_ref().unwrap();
        assert!(valuation.estimated_value > 0.0);
        assert_eq!(
            evaluation.recommendation.decision,
            UnderwritingDecision::Approve
        );
        assert!(evaluation.recommendation.recommended_amount.is_some());
        // No degraded-input notes on the happy path.
        assert!(!evaluation
            .recommendation
            .reasoning
            .iter()
            .any(|line| line.starts_with("Note:")));
    }

    #[tokio::test]
    async fn test_extraction_failures_degrade_to_defaults() {
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        let case = sample_case();
        let corpus = sample_corpus();

        let evaluation = pipeline(true)
            .evaluate(Some(&case), &corpus, None, now)
            .await;

        // All three extraction stages were reported as degraded.
        let notes: Vec<&String> = evaluation
            .recommendation
            .reasoning
            .iter()
            .filter(|line| line.starts_with("Note:"))
            .collect();
        assert_eq!(notes.len(), 3);

        // Scoring still ran on neutral defaults.
        let risk = evaluation.risk.as_ref().unwrap();
        assert_eq!(risk.external_contribution, 50.0);
        assert!(evaluation.valuation.is_some());
        assert!(evaluation.funding_guidance.is_some());
        assert_ne!(evaluation.recommendation.confidence, 0.0);
    }
}
