//! Funding-decision support core for a litigation-finance business.
//!
//! Given a case record and a corpus of historical case outcomes, this crate
//! produces a similarity-ranked set of comparable cases, a statistically
//! grounded valuation and success-probability estimate, a blended risk score,
//! and a final underwriting recommendation with explicit conditions and a
//! risk-adjusted funding amount.
//!
//! Every scoring stage is a pure function of its inputs; the only suspension
//! point is the semantic extraction service ([`service::SemanticExtractor`]),
//! which turns free-text case notes into structured qualitative features and
//! sub-scores. Extraction failures never abort an evaluation: each failed
//! signal is replaced by its documented neutral default and the substitution
//! is named in the recommendation's reasoning.

pub mod model;
pub mod service;

pub use model::config::EngineConfig;
pub use model::{
    CaseRecord, CaseType, ComparableCase, HistoricalCase, OutcomeStatistics, RiskScore,
    UnderwritingDecision, UnderwritingRecommendation,
};
pub use service::pipeline::{CaseEvaluation, UnderwritingPipeline};
pub use service::underwriting::LawFirmProfile;
pub use service::{ExtractionError, LlmClient, LlmExtractor, SemanticExtractor};
