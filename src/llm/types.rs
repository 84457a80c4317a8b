//! LLM types — request contents, inline attachments, and errors.
//!
//! These mirror the generative-language `generateContent` wire shapes closely
//! enough that they serialize directly into the request body.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The HTTP request to the provider failed before a response arrived.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The provider returned a non-success status without an error object.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The provider reported an error object (quota, invalid key, ...).
    #[error("provider error (status {status}): {message}")]
    Provider { status: u16, message: String },

    /// The response envelope could not be deserialized or held no text.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ErrorCode for LlmError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
            Self::ApiRequest(_) => "E_API_REQUEST",
            Self::ApiResponse { .. } => "E_API_RESPONSE",
            Self::Provider { .. } => "E_PROVIDER",
            Self::ApiParse(_) => "E_API_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    fn retryable(&self) -> bool {
        matches!(
            self,
            Self::ApiRequest(_)
                | Self::ApiResponse { status: 429 | 500..=599, .. }
                | Self::Provider { status: 429 | 500..=599, .. }
        )
    }
}

// =============================================================================
// CONTENT
// =============================================================================

/// Author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// Base64 payload attached inline next to the prompt text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// One part of a content turn: either text or an inline attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

impl Part {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Encode raw bytes as a base64 inline attachment.
    #[must_use]
    pub fn inline(image: &InlineImage) -> Self {
        Self::InlineData {
            inline_data: InlineData { mime_type: image.mime_type.clone(), data: BASE64.encode(&image.bytes) },
        }
    }
}

/// A single turn sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub parts: Vec<Part>,
}

impl Content {
    /// Single-shot prompt turn with an optional inline image after the text.
    #[must_use]
    pub fn prompt(prompt: &str, image: Option<&InlineImage>) -> Self {
        let mut parts = vec![Part::text(prompt)];
        if let Some(image) = image {
            parts.push(Part::inline(image));
        }
        Self { role: None, parts }
    }

    #[must_use]
    pub fn turn(role: Role, text: impl Into<String>) -> Self {
        Self { role: Some(role), parts: vec![Part::text(text)] }
    }
}

/// Raw image bytes plus their MIME type, before base64 encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

// =============================================================================
// LLM GENERATE TRAIT
// =============================================================================

/// Provider-neutral async trait for content generation. Enables mocking in tests.
#[async_trait::async_trait]
pub trait LlmGenerate: Send + Sync {
    /// Send the given turns and return the model's raw text.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] on transport failure, a non-success status, a
    /// provider-reported error, or an envelope with no candidate text.
    async fn generate(&self, contents: &[Content]) -> Result<String, LlmError>;

    /// Single prompt, optionally with one inline image. One network call.
    ///
    /// # Errors
    ///
    /// Same as [`LlmGenerate::generate`].
    async fn submit(&self, prompt: &str, image: Option<&InlineImage>) -> Result<String, LlmError> {
        let contents = [Content::prompt(prompt, image)];
        self.generate(&contents).await
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
