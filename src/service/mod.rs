pub mod extraction;
pub mod llm;
pub mod pipeline;
pub mod risk;
pub mod similarity;
pub mod statistics;
pub mod underwriting;
pub mod valuation;

pub use extraction::{ExtractionError, LlmExtractor, SemanticExtractor};
pub use llm::LlmClient;
pub use pipeline::{CaseEvaluation, UnderwritingPipeline};
