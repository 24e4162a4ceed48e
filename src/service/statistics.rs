//! Outcome aggregation over a comparable-case set plus confidence grading.
//!
//! The confidence grade is additive across four independent signals (case
//! count, average similarity, settlement variation, recency) so that no
//! single statistic determines trust in the estimate.

use std::collections::BTreeMap;

use crate::model::comparables::{
    ComparableCase, ConfidenceLevel, OutcomeDistribution, OutcomeStatistics, SettlementRange,
    SettlementStatistics,
};

/// Outcome labels counted as plaintiff success.
const SUCCESSFUL_OUTCOMES: [&str; 3] = ["settled", "judgment_plaintiff", "favorable"];

/// Assumed duration when no comparable carries one (months).
const DEFAULT_DURATION_MONTHS: f64 = 18.0;

/// A comparable is "recent" when its case age is within three years.
const RECENT_CASE_MAX_AGE_DAYS: i64 = 1095;

/// Aggregate settlement, duration, and outcome data into distribution
/// statistics with a confidence grade. An empty comparable set yields the
/// explicit no-data result, never an error.
pub fn aggregate(comparables: &[ComparableCase]) -> OutcomeStatistics {
    if comparables.is_empty() {
        return OutcomeStatistics::no_data();
    }

    let settlements: Vec<f64> = comparables
        .iter()
        .map(|c| c.settlement_amount)
        .filter(|amount| *amount > 0.0)
        .collect();
    let settlement_stats = settlement_statistics(&settlements);

    let estimated_settlement_range = SettlementRange {
        low: (settlement_stats.mean - settlement_stats.std).max(0.0),
        high: settlement_stats.mean + settlement_stats.std,
    };

    let durations: Vec<f64> = comparables
        .iter()
        .map(|c| f64::from(c.case_duration_months))
        .filter(|months| *months > 0.0)
        .collect();
    let average_duration_months = if durations.is_empty() {
        DEFAULT_DURATION_MONTHS
    } else {
        round1(durations.iter().sum::<f64>() / durations.len() as f64)
    };

    let successful = comparables
        .iter()
        .filter(|c| SUCCESSFUL_OUTCOMES.contains(&c.outcome.trim().to_lowercase().as_str()))
        .count();
    let success_probability = round3(successful as f64 / comparables.len() as f64);

    let outcome_distribution = outcome_distribution(comparables);

    let confidence = grade_confidence(comparables, &settlement_stats, !settlements.is_empty());

    tracing::debug!(
        case_count = comparables.len(),
        settlement_mean = settlement_stats.mean,
        success_probability = success_probability,
        confidence = ?confidence,
        "Aggregated comparable-case outcomes"
    );

    OutcomeStatistics {
        case_count: comparables.len(),
        settlements: settlement_stats,
        estimated_settlement_range,
        success_probability,
        average_duration_months,
        outcome_distribution,
        confidence,
    }
}

/// Distribution statistics over positive settlements; all zeros when none
/// qualify.
fn settlement_statistics(settlements: &[f64]) -> SettlementStatistics {
    if settlements.is_empty() {
        return SettlementStatistics::default();
    }

    let n = settlements.len() as f64;
    let mean = settlements.iter().sum::<f64>() / n;

    let mut sorted = settlements.to_vec();
    sorted.sort_by(f64::total_cmp);
    let median = sorted[sorted.len() / 2];

    // Population formula (divide by N) for determinism.
    let variance = settlements.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt();

    SettlementStatistics {
        mean,
        median,
        std,
        min: sorted[0],
        max: sorted[sorted.len() - 1],
    }
}

fn outcome_distribution(comparables: &[ComparableCase]) -> OutcomeDistribution {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for case in comparables {
        *counts
            .entry(case.outcome.trim().to_lowercase())
            .or_default() += 1;
    }
    let total = comparables.len();
    let percentages = counts
        .iter()
        .map(|(outcome, count)| (outcome.clone(), (*count as f64 / total as f64) * 100.0))
        .collect();
    OutcomeDistribution {
        counts,
        percentages,
        total_cases: total,
    }
}

/// Additive four-signal confidence grading.
///
/// - case count: ≥10 → +30, ≥5 → +20, ≥3 → +10
/// - average similarity: ≥0.7 → +30, ≥0.5 → +20, ≥0.3 → +10
/// - coefficient of variation (std/mean): ≤0.5 → +25, ≤1.0 → +15, else +5,
///   skipped entirely when the mean is 0 to avoid a division error
/// - recency: +15 when ≥70% of comparables are at most three years old
///
/// Final score ≥80 → high, ≥50 → medium, else low.
fn grade_confidence(
    comparables: &[ComparableCase],
    settlements: &SettlementStatistics,
    has_settlements: bool,
) -> ConfidenceLevel {
    let mut score = 0u32;

    let case_count = comparables.len();
    if case_count >= 10 {
        score += 30;
    } else if case_count >= 5 {
        score += 20;
    } else if case_count >= 3 {
        score += 10;
    }

    let avg_similarity =
        comparables.iter().map(|c| c.similarity_score).sum::<f64>() / comparables.len() as f64;
    if avg_similarity >= 0.7 {
        score += 30;
    } else if avg_similarity >= 0.5 {
        score += 20;
    } else if avg_similarity >= 0.3 {
        score += 10;
    }

    if has_settlements && settlements.mean > 0.0 {
        let cv = settlements.std / settlements.mean;
        if cv <= 0.5 {
            score += 25;
        } else if cv <= 1.0 {
            score += 15;
        } else {
            score += 5;
        }
    }

    let recent = comparables
        .iter()
        .filter(|c| {
            c.case_age_days
                .is_some_and(|age| age <= RECENT_CASE_MAX_AGE_DAYS)
        })
        .count();
    if recent as f64 >= comparables.len() as f64 * 0.7 {
        score += 15;
    }

    tracing::debug!(
        case_count = case_count,
        avg_similarity = avg_similarity,
        confidence_score = score,
        "Graded prediction confidence"
    );

    if score >= 80 {
        ConfidenceLevel::High
    } else if score >= 50 {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::case::CaseType;

    fn comparable(settlement: f64, outcome: &str, similarity: f64) -> ComparableCase {
        ComparableCase {
            case_id: "c".to_string(),
            case_type: CaseType::AutoAccident,
            settlement_amount: settlement,
            funding_amount: 5_000.0,
            case_duration_months: 12,
            outcome: outcome.to_string(),
            jurisdiction: "CA".to_string(),
            key_factors: vec![],
            case_age_days: Some(400),
            similarity_score: similarity,
        }
    }

    #[test]
    fn test_settlement_statistics_reference_values() {
        let comparables = vec![
            comparable(10_000.0, "settled", 0.8),
            comparable(20_000.0, "settled", 0.8),
            comparable(30_000.0, "dismissed", 0.8),
        ];
        let stats = aggregate(&comparables);
        assert_eq!(stats.settlements.mean, 20_000.0);
        assert_eq!(stats.settlements.median, 20_000.0);
        assert!((stats.settlements.std - 8_164.97).abs() < 0.01);
        assert_eq!(stats.settlements.min, 10_000.0);
        assert_eq!(stats.settlements.max, 30_000.0);
        // Range is mean ± one std, clamped at zero on the low end.
        assert!((stats.estimated_settlement_range.low - 11_835.03).abs() < 0.01);
        assert!((stats.estimated_settlement_range.high - 28_164.97).abs() < 0.01);
        assert_eq!(stats.success_probability, 0.667);
    }

    #[test]
    fn test_empty_set_returns_no_data_defaults() {
        let stats = aggregate(&[]);
        assert_eq!(stats.case_count, 0);
        assert_eq!(stats.settlements.mean, 0.0);
        assert_eq!(stats.estimated_settlement_range.low, 0.0);
        assert_eq!(stats.estimated_settlement_range.high, 0.0);
        assert_eq!(stats.success_probability, 0.5);
        assert_eq!(stats.average_duration_months, 18.0);
        assert_eq!(stats.confidence, ConfidenceLevel::Low);
    }

    #[test]
    fn test_confidence_high_with_all_four_signals() {
        // 12 comparables, average similarity 0.8, CV 0.4, all recent:
        // 30 + 30 + 25 + 15 = 100.
        let mut comparables: Vec<ComparableCase> = Vec::new();
        for i in 0..12 {
            // Two alternating settlement values giving std/mean = 0.4.
            let settlement = if i % 2 == 0 { 60_000.0 } else { 140_000.0 };
            comparables.push(comparable(settlement, "settled", 0.8));
        }
        let stats = aggregate(&comparables);
        let cv = stats.settlements.std / stats.settlements.mean;
        assert!((cv - 0.4).abs() < 1e-9);
        assert_eq!(stats.confidence, ConfidenceLevel::High);
    }

    #[test]
    fn test_confidence_skips_variation_signal_when_mean_is_zero() {
        // No positive settlements: mean stays 0 and the CV signal must be
        // skipped rather than dividing by zero. Count (+10) and similarity
        // (+30) alone keep the grade low.
        let comparables = vec![
            comparable(0.0, "dismissed", 0.9),
            comparable(0.0, "dismissed", 0.9),
            comparable(0.0, "dismissed", 0.9),
        ];
        let stats = aggregate(&comparables);
        assert_eq!(stats.settlements.mean, 0.0);
        assert_eq!(stats.confidence, ConfidenceLevel::Low);
        assert_eq!(stats.success_probability, 0.0);
    }

    #[test]
    fn test_outcome_labels_normalized_case_insensitively() {
        let comparables = vec![
            comparable(10_000.0, " Settled ", 0.6),
            comparable(12_000.0, "JUDGMENT_PLAINTIFF", 0.6),
            comparable(0.0, "dismissed", 0.6),
            comparable(0.0, "withdrawn", 0.6),
        ];
        let stats = aggregate(&comparables);
        assert_eq!(stats.success_probability, 0.5);
        assert_eq!(stats.outcome_distribution.counts["settled"], 1);
        assert_eq!(stats.outcome_distribution.total_cases, 4);
        assert!((stats.outcome_distribution.percentages["dismissed"] - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_duration_defaults_when_absent() {
        let mut one = comparable(10_000.0, "settled", 0.6);
        one.case_duration_months = 0;
        let stats = aggregate(&[one]);
        assert_eq!(stats.average_duration_months, 18.0);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let comparables = vec![
            comparable(10_000.0, "settled", 0.71),
            comparable(25_000.0, "dismissed", 0.44),
        ];
        let a = serde_json::to_string(&aggregate(&comparables)).unwrap();
        let b = serde_json::to_string(&aggregate(&comparables)).unwrap();
        assert_eq!(a, b);
    }
}
