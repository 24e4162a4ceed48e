//! Prompt construction for the semantic extraction layer
//!
//! System prompts set the analyst persona and output discipline; the user
//! prompts serialize the case intake (and comparables, for valuation) into
//! the document the extractor analyzes.

use chrono::{DateTime, Utc};

use crate::model::case::CaseRecord;
use crate::model::comparables::ComparableCase;

/// Comparables included in the valuation prompt, by descending similarity.
const VALUATION_PROMPT_COMPARABLES: usize = 5;

/// System prompt for case feature extraction
pub const FEATURE_SYSTEM_PROMPT: &str = r#"You are a litigation analyst for a pre-settlement funding company. Your task is to extract structured case features from unstructured intake notes.

## Rules

1. **Ground every feature in the notes.** Do not infer facts the notes do not support. When the notes are silent on a feature, choose the neutral value (moderate severity, disputed liability).
2. **Injury severity** reflects the most serious documented injury: minor (soft tissue, full recovery expected), moderate (fractures, ongoing treatment), severe (surgery, permanent impairment), catastrophic (paralysis, traumatic brain injury, wrongful death).
3. **Liability clarity** reflects how contested fault is: clear (admitted or well-documented fault), disputed (contested but arguable), unclear (little evidence either way).
4. **Damages types** are the compensable categories the notes support: medical, lost_wages, pain_suffering, property, punitive.
5. **Case strength** is a 0-100 holistic estimate of plaintiff prospects; 50 means no signal either way.
6. **Key factors** are short phrases naming the facts that most move the assessment.

Prefer fewer, well-grounded factors over speculation."#;

/// System prompt for qualitative risk assessment
pub const RISK_SYSTEM_PROMPT: &str = r#"You are a risk underwriter for a pre-settlement funding company. Your task is to assess the funding risk of a litigation case from its intake notes.

## Rules

1. Score every factor from 0 (minimal risk) to 100 (severe risk). A factor the notes say nothing about scores 50.
2. **liability_risk**: risk that the underlying claim fails on the merits (contested fault, contributory negligence).
3. **damages_risk**: risk that damages do not justify the requested funding.
4. **collectibility_risk**: risk that a judgment or settlement cannot be collected (defendant solvency, insurance coverage).
5. **time_risk**: risk that resolution takes materially longer than typical for this case type.
6. **legal_representation_risk**: risk from counsel's apparent experience and engagement.
7. **communication_risk**: risk from plaintiff responsiveness, credibility, or cooperation concerns.
8. **documentation_risk**: risk from missing or inconsistent records.
9. For each factor, give concise reasoning plus any red flags and positive indicators found in the notes.
10. The overall assessment is a short narrative; key concerns and mitigation strategies are short actionable phrases.

Be conservative: when evidence is thin, say so rather than guessing."#;

/// System prompt for qualitative case valuation
pub const VALUATION_SYSTEM_PROMPT: &str = r#"You are a settlement valuation analyst for a pre-settlement funding company. Your task is to estimate the likely settlement value of a case from its intake notes and a set of resolved comparable cases.

## Rules

1. Anchor the estimate on the comparable settlements; adjust for documented differences in severity, liability, and venue.
2. **estimated_range** is the plausible settlement band in dollars; the range must be positive and low must not exceed high.
3. **relative_strength** states whether this case is stronger, similar, or weaker than the typical comparable provided.
4. Name the specific value drivers and value risks found in the notes.
5. If the comparables are a poor match for this case, say so in the reasoning and widen the range.

Do not consider funding amounts when valuing the case; value the underlying claim."#;

/// Build the user prompt for feature extraction from a case intake.
pub fn build_feature_prompt(case: &CaseRecord, now: DateTime<Utc>) -> String {
    format!(
        r#"Analyze this pre-settlement funding intake.

Case type: {case_type}
Jurisdiction: {jurisdiction}
Case age: {age}
Requested funding: ${amount:.2}

Intake notes:
---
{notes}
---

Extract the structured case features."#,
        case_type = case.case_type_or_default(),
        jurisdiction = display_or_unknown(case.jurisdiction.as_deref()),
        age = format_case_age(case.case_age_days(now)),
        amount = case.requested_amount,
        notes = notes_or_placeholder(&case.case_notes),
    )
}

/// Build the user prompt for the qualitative risk assessment.
pub fn build_risk_prompt(case: &CaseRecord, now: DateTime<Utc>) -> String {
    format!(
        r#"Assess the funding risk of this pre-settlement funding case.

Case type: {case_type}
Jurisdiction: {jurisdiction}
Case age: {age}
Requested funding: ${amount:.2}
Law firm on record: {law_firm}

Intake notes:
---
{notes}
---

Score each risk factor and summarize the overall risk posture."#,
        case_type = case.case_type_or_default(),
        jurisdiction = display_or_unknown(case.jurisdiction.as_deref()),
        age = format_case_age(case.case_age_days(now)),
        amount = case.requested_amount,
        law_firm = display_or_unknown(case.law_firm_id.as_deref()),
        notes = notes_or_placeholder(&case.case_notes),
    )
}

/// Build the user prompt for qualitative valuation, including the top
/// comparables serialized as JSON.
pub fn build_valuation_prompt(case: &CaseRecord, comparables: &[ComparableCase]) -> String {
    let top: Vec<&ComparableCase> = comparables
        .iter()
        .take(VALUATION_PROMPT_COMPARABLES)
        .collect();
    let comparables_json =
        serde_json::to_string_pretty(&top).unwrap_or_else(|_| "[]".to_string());

    format!(
        r#"Estimate the settlement value of this pre-settlement funding case.

Case type: {case_type}
Jurisdiction: {jurisdiction}

Intake notes:
---
{notes}
---

Resolved comparable cases (most similar first):
{comparables_json}

Provide the valuation with an estimated settlement range."#,
        case_type = case.case_type_or_default(),
        jurisdiction = display_or_unknown(case.jurisdiction.as_deref()),
        notes = notes_or_placeholder(&case.case_notes),
    )
}

fn display_or_unknown(value: Option<&str>) -> &str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => "unknown",
    }
}

fn format_case_age(age_days: Option<i64>) -> String {
    match age_days {
        Some(days) => format!("{days} days"),
        None => "unknown".to_string(),
    }
}

fn notes_or_placeholder(notes: &str) -> &str {
    let trimmed = notes.trim();
    if trimmed.is_empty() {
        "(no intake notes provided)"
    } else {
        trimmed
    }
}
