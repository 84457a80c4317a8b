//! LLM — generative-language client used by every AI tool.
//!
//! DESIGN
//! ======
//! A single provider, configured from environment variables. Tools depend on
//! the [`LlmGenerate`] trait rather than the concrete client so tests can
//! script replies without a network.

pub mod config;
pub mod gemini;
pub mod types;

use std::time::Instant;

use tracing::{info, warn};

use crate::error::ErrorCode;
use config::LlmConfig;
pub use types::{Content, InlineImage, LlmError, LlmGenerate, Part, Role};

// =============================================================================
// CLIENT
// =============================================================================

/// Concrete client bound to one model.
///
/// Configured from environment variables by [`LlmClient::from_env`].
pub struct LlmClient {
    inner: gemini::GeminiClient,
    model: String,
}

impl LlmClient {
    /// Build a client from environment variables. See [`LlmConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Returns an error if a config value is malformed or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        let config = LlmConfig::from_env()?;
        Self::from_config(config)
    }

    /// Build a client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let inner = gemini::GeminiClient::new(config.api_key, config.base_url, config.timeouts)?;
        Ok(Self { inner, model: config.model })
    }

    /// Return the configured model name (e.g. `"gemini-2.0-flash"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl LlmGenerate for LlmClient {
    async fn generate(&self, contents: &[Content]) -> Result<String, LlmError> {
        let started = Instant::now();
        info!(model = %self.model, turns = contents.len(), "llm: request");

        let result = self.inner.generate(&self.model, contents).await;
        let elapsed_ms = started.elapsed().as_millis();
        match &result {
            Ok(text) => info!(elapsed_ms, response_len = text.len(), "llm: response"),
            Err(e) => warn!(elapsed_ms, code = e.error_code(), error = %e, "llm: request failed"),
        }
        result
    }
}
