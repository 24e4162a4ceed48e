//! Shared LLM client wrapper
//!
//! Provides a common interface for OpenAI API interactions used by the
//! semantic extraction layer.

use rig::providers::openai;

/// Environment variable holding the OpenAI API key.
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Shared LLM client wrapper
#[derive(Clone)]
pub struct LlmClient {
    client: openai::Client,
}

impl LlmClient {
    /// Create a new LLM client with the provided API key
    pub fn new(api_key: &str) -> Result<Self, String> {
        let client = openai::Client::new(api_key);

        Ok(Self { client })
    }

    /// Create a client from the `OPENAI_API_KEY` environment variable
    pub fn from_env() -> Result<Self, String> {
        let api_key = std::env::var(ENV_OPENAI_API_KEY)
            .map_err(|_| format!("{} is not set", ENV_OPENAI_API_KEY))?;
        Self::new(&api_key)
    }

    /// Get a reference to the underlying OpenAI client
    /// Use this to create extractors with custom configuration
    pub fn openai_client(&self) -> &openai::Client {
        &self.client
    }
}
