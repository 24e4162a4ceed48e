//! Semantic extraction service
//!
//! Turns free-text case intakes into the strongly-typed qualitative payloads
//! the scoring stages consume, using rig-core typed extractors. The service is
//! a trait seam so the pipeline can run against a stub in tests and degrade to
//! neutral defaults when the LLM is unavailable.

pub mod converters;
pub mod error;
pub mod prompts;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rig::client::CompletionClient;
use rig::providers::openai;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::model::case::CaseRecord;
use crate::model::comparables::ComparableCase;
use crate::model::extraction::{
    ExtractedCaseFeatures, ExtractedRiskAssessment, ExtractedValuation,
};
use crate::service::llm::LlmClient;

pub use error::ExtractionError;

/// Environment variable overriding the extraction model.
const ENV_EXTRACTION_MODEL: &str = "UNDERWRITING_EXTRACTION_MODEL";

/// Environment variable overriding the extraction timeout in seconds.
const ENV_EXTRACTION_TIMEOUT_SECS: &str = "UNDERWRITING_EXTRACTION_TIMEOUT_SECS";

/// Default model to use for extraction
const DEFAULT_MODEL: &str = openai::GPT_4O_MINI;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Qualitative analysis of a case intake. Every method is fallible; callers
/// substitute documented neutral defaults on error.
#[async_trait]
pub trait SemanticExtractor: Send + Sync {
    /// Extract structured case features from the intake notes.
    async fn case_features(
        &self,
        case: &CaseRecord,
        now: DateTime<Utc>,
    ) -> Result<ExtractedCaseFeatures, ExtractionError>;

    /// Assess the seven qualitative risk factors from the intake notes.
    async fn risk_assessment(
        &self,
        case: &CaseRecord,
        now: DateTime<Utc>,
    ) -> Result<ExtractedRiskAssessment, ExtractionError>;

    /// Estimate settlement value from the intake notes and comparables.
    async fn case_valuation(
        &self,
        case: &CaseRecord,
        comparables: &[ComparableCase],
    ) -> Result<ExtractedValuation, ExtractionError>;
}

/// [`SemanticExtractor`] backed by rig-core typed extractors.
pub struct LlmExtractor {
    llm_client: LlmClient,
    model: String,
    timeout_secs: u64,
}

impl LlmExtractor {
    /// Create an extractor with the default model and timeout, honoring the
    /// environment overrides.
    pub fn new(llm_client: LlmClient) -> Self {
        let model =
            std::env::var(ENV_EXTRACTION_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let timeout_secs = std::env::var(ENV_EXTRACTION_TIMEOUT_SECS)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            llm_client,
            model,
            timeout_secs,
        }
    }

    /// Run one typed extraction with the shared timeout.
    async fn extract<T>(&self, preamble: &str, prompt: &str) -> Result<T, ExtractionError>
    where
        T: JsonSchema + DeserializeOwned + Serialize + Send + Sync + 'static,
    {
        let extractor = self
            .llm_client
            .openai_client()
            .extractor::<T>(&self.model)
            .preamble(preamble)
            .build();

        let started = std::time::Instant::now();
        let result = tokio::time::timeout(
            std::time::Duration::from_secs(self.timeout_secs),
            extractor.extract(prompt),
        )
        .await
        .map_err(|_| ExtractionError::Timeout(self.timeout_secs))?
        .map_err(|e| ExtractionError::Unavailable(e.to_string()));

        tracing::debug!(
            model = %self.model,
            elapsed_ms = started.elapsed().as_millis() as u64,
            success = result.is_ok(),
            "Semantic extraction call finished"
        );

        result
    }
}

#[async_trait]
impl SemanticExtractor for LlmExtractor {
    async fn case_features(
        &self,
        case: &CaseRecord,
        now: DateTime<Utc>,
    ) -> Result<ExtractedCaseFeatures, ExtractionError> {
        let prompt = prompts::build_feature_prompt(case, now);
        self.extract(prompts::FEATURE_SYSTEM_PROMPT, &prompt).await
    }

    async fn risk_assessment(
        &self,
        case: &CaseRecord,
        now: DateTime<Utc>,
    ) -> Result<ExtractedRiskAssessment, ExtractionError> {
        let prompt = prompts::build_risk_prompt(case, now);
        self.extract(prompts::RISK_SYSTEM_PROMPT, &prompt).await
    }

    async fn case_valuation(
        &self,
        case: &CaseRecord,
        comparables: &[ComparableCase],
    ) -> Result<ExtractedValuation, ExtractionError> {
        let prompt = prompts::build_valuation_prompt(case, comparables);
        self.extract(prompts::VALUATION_SYSTEM_PROMPT, &prompt)
            .await
    }
}
