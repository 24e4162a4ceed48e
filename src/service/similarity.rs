//! Weighted multi-factor case similarity and comparable-case search.
//!
//! Each factor is normalized to [0, 1] and combined through a fixed weight
//! table summing to 1.0. Missing raw fields are defaulted to the mid-scale
//! value *before* scoring so incomplete records are not systematically
//! penalized.

use std::collections::BTreeSet;

use crate::model::case::{CaseFeatureSet, HistoricalCase};
use crate::model::comparables::ComparableCase;
use crate::model::config::{ComparableSearchConfig, SimilarityWeights};

/// Age differences are normalized over three years.
const CASE_AGE_NORMALIZATION_DAYS: f64 = 1095.0;

/// Weighted similarity between two feature sets, rounded to 3 decimals.
pub fn similarity(
    target: &CaseFeatureSet,
    candidate: &CaseFeatureSet,
    weights: &SimilarityWeights,
) -> f64 {
    let case_type = if target.case_type == candidate.case_type {
        1.0
    } else {
        0.0
    };

    let severity_diff = (target.injury_severity.ordinal() - candidate.injury_severity.ordinal())
        .unsigned_abs() as f64;
    let injury_severity = (1.0 - severity_diff / 3.0).max(0.0);

    let liability_diff = (target.liability_clarity.ordinal() - candidate.liability_clarity.ordinal())
        .unsigned_abs() as f64;
    let liability_clarity = (1.0 - liability_diff / 2.0).max(0.0);

    // Partial credit: different venues still share procedural context.
    let jurisdiction = if target.jurisdiction == candidate.jurisdiction {
        1.0
    } else {
        0.3
    };

    let age_diff = (target.case_age_days - candidate.case_age_days).unsigned_abs() as f64;
    let case_age = (1.0 - age_diff / CASE_AGE_NORMALIZATION_DAYS).max(0.0);

    // Ratio of the smaller to the larger amount, floored at 1 to avoid
    // divide-by-zero on unfunded records.
    let a = target.funding_amount.max(1.0);
    let b = candidate.funding_amount.max(1.0);
    let funding_amount = a.min(b) / a.max(b);

    let law_firm = if target.law_firm_id == candidate.law_firm_id {
        1.0
    } else {
        0.5
    };

    let damages_type = jaccard(&target.damages_type, &candidate.damages_type);

    let overall = case_type * weights.case_type
        + injury_severity * weights.injury_severity
        + liability_clarity * weights.liability_clarity
        + jurisdiction * weights.jurisdiction
        + case_age * weights.case_age
        + funding_amount * weights.funding_amount
        + law_firm * weights.law_firm
        + damages_type * weights.damages_type;

    round3(overall)
}

/// Jaccard index of the damage-type sets; 0.5 when both are empty.
fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.5;
    }
    let intersection = a.intersection(b).count() as f64;
    let union = a.union(b).count() as f64;
    intersection / union
}

/// Score the historical corpus against the target, keep candidates at or
/// above the similarity threshold, and return the top results ranked by
/// similarity descending (settlement amount descending breaks ties so the
/// ranking is deterministic). An empty pool yields an empty result.
pub fn find_comparable_cases(
    target: &CaseFeatureSet,
    corpus: &[HistoricalCase],
    weights: &SimilarityWeights,
    search: &ComparableSearchConfig,
) -> Vec<ComparableCase> {
    let mut comparables: Vec<ComparableCase> = corpus
        .iter()
        .filter_map(|historical| {
            let features = historical.feature_set();
            let score = similarity(target, &features, weights);
            if score < search.min_similarity {
                return None;
            }
            Some(ComparableCase {
                case_id: historical.id.clone(),
                case_type: historical.case_type,
                settlement_amount: historical.settlement_amount,
                funding_amount: historical.funding_amount,
                case_duration_months: historical.duration_months,
                outcome: historical.outcome.clone(),
                jurisdiction: features.jurisdiction,
                key_factors: features.key_factors,
                case_age_days: historical.case_age_days,
                similarity_score: score,
            })
        })
        .collect();

    comparables.sort_by(|a, b| {
        b.similarity_score
            .total_cmp(&a.similarity_score)
            .then(b.settlement_amount.total_cmp(&a.settlement_amount))
    });
    comparables.truncate(search.max_results);

    tracing::debug!(
        corpus_size = corpus.len(),
        matched = comparables.len(),
        min_similarity = search.min_similarity,
        "Comparable-case search completed"
    );

    comparables
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::case::{CaseType, InjurySeverity, LiabilityClarity};

    fn feature_set() -> CaseFeatureSet {
        CaseFeatureSet {
            case_type: CaseType::AutoAccident,
            injury_severity: InjurySeverity::Moderate,
            liability_clarity: LiabilityClarity::Clear,
            jurisdiction: "CA".to_string(),
            case_age_days: 200,
            funding_amount: 10_000.0,
            law_firm_id: Some("firm-1".to_string()),
            damages_type: ["medical".to_string(), "lost_wages".to_string()]
                .into_iter()
                .collect(),
            key_factors: vec![],
        }
    }

    fn historical(id: &str, similarity_tweak: impl FnOnce(&mut HistoricalCase)) -> HistoricalCase {
        let mut case = HistoricalCase {
            id: id.to_string(),
            case_type: CaseType::AutoAccident,
            settlement_amount: 50_000.0,
            funding_amount: 10_000.0,
            duration_months: 14,
            outcome: "settled".to_string(),
            jurisdiction: Some("CA".to_string()),
            injury_severity: Some(InjurySeverity::Moderate),
            liability_clarity: Some(LiabilityClarity::Clear),
            damages_type: vec!["medical".to_string(), "lost_wages".to_string()],
            case_age_days: Some(200),
            law_firm_id: Some("firm-1".to_string()),
            key_factors: vec![],
        };
        similarity_tweak(&mut case);
        case
    }

    #[test]
    fn test_identical_feature_sets_score_one() {
        let fs = feature_set();
        assert_eq!(similarity(&fs, &fs, &SimilarityWeights::default()), 1.0);
    }

    #[test]
    fn test_two_step_severity_gap_costs_exactly_its_weight_share() {
        let target = feature_set();
        let mut candidate = feature_set();
        candidate.injury_severity = InjurySeverity::Catastrophic;
        // Severity contributes 0.20 × (1 − 2/3); everything else matches.
        let expected: f64 = 1.0 - 0.20 * (2.0 / 3.0);
        assert_eq!(
            similarity(&target, &candidate, &SimilarityWeights::default()),
            (expected * 1000.0).round() / 1000.0
        );
        assert_eq!(
            similarity(&target, &candidate, &SimilarityWeights::default()),
            0.867
        );
    }

    #[test]
    fn test_jurisdiction_mismatch_gets_partial_credit() {
        let target = feature_set();
        let mut candidate = feature_set();
        candidate.jurisdiction = "NY".to_string();
        // 1.0 − 0.10 × (1 − 0.3)
        assert_eq!(
            similarity(&target, &candidate, &SimilarityWeights::default()),
            0.93
        );
    }

    #[test]
    fn test_empty_damage_sets_get_neutral_credit() {
        let mut target = feature_set();
        let mut candidate = feature_set();
        target.damages_type.clear();
        candidate.damages_type.clear();
        // Both empty: 0.5 on the 0.05 weight, so 1.0 − 0.05 × 0.5.
        assert_eq!(
            similarity(&target, &candidate, &SimilarityWeights::default()),
            0.975
        );
    }

    #[test]
    fn test_funding_floor_avoids_divide_by_zero() {
        let mut target = feature_set();
        let mut candidate = feature_set();
        target.funding_amount = 0.0;
        candidate.funding_amount = 0.0;
        let score = similarity(&target, &candidate, &SimilarityWeights::default());
        assert!(score.is_finite());
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_empty_corpus_yields_empty_result() {
        let result = find_comparable_cases(
            &feature_set(),
            &[],
            &SimilarityWeights::default(),
            &ComparableSearchConfig::default(),
        );
        assert!(result.is_empty());
    }

    #[test]
    fn test_search_filters_below_threshold() {
        let corpus = vec![historical("far", |c| {
            c.case_type = CaseType::MedicalMalpractice;
            c.jurisdiction = Some("TX".to_string());
            c.injury_severity = Some(InjurySeverity::Catastrophic);
            c.liability_clarity = Some(LiabilityClarity::Unclear);
            c.damages_type = vec!["punitive".to_string()];
            c.funding_amount = 900_000.0;
            c.law_firm_id = None;
            c.case_age_days = Some(3_000);
        })];
        let search = ComparableSearchConfig {
            min_similarity: 0.5,
            max_results: 10,
        };
        let result =
            find_comparable_cases(&feature_set(), &corpus, &SimilarityWeights::default(), &search);
        assert!(result.is_empty());
    }

    #[test]
    fn test_ranking_is_deterministic_with_settlement_tie_break() {
        let corpus = vec![
            historical("small", |c| c.settlement_amount = 10_000.0),
            historical("large", |c| c.settlement_amount = 90_000.0),
            historical("close", |c| {
                c.injury_severity = Some(InjurySeverity::Severe);
            }),
        ];
        let result = find_comparable_cases(
            &feature_set(),
            &corpus,
            &SimilarityWeights::default(),
            &ComparableSearchConfig::default(),
        );
        let ids: Vec<&str> = result.iter().map(|c| c.case_id.as_str()).collect();
        // Equal-similarity pair ordered by settlement descending, then the
        // lower-similarity case.
        assert_eq!(ids, vec!["large", "small", "close"]);
    }

    #[test]
    fn test_search_caps_results() {
        let corpus: Vec<HistoricalCase> = (0..25)
            .map(|i| historical(&format!("h-{i}"), |_| {}))
            .collect();
        let result = find_comparable_cases(
            &feature_set(),
            &corpus,
            &SimilarityWeights::default(),
            &ComparableSearchConfig::default(),
        );
        assert_eq!(result.len(), 10);
    }
}
