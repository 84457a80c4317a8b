//! Generative-language `generateContent` client.
//!
//! Thin HTTP wrapper: one POST per call, no retry, no streaming. The API key
//! travels as the `key` query parameter. Pure parsing in `parse_response` for
//! testability.

use std::time::Duration;

use super::config::LlmTimeouts;
use super::types::{Content, LlmError};

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// # Errors
    ///
    /// Returns [`LlmError::HttpClientBuild`] if the TLS backend fails to initialize.
    pub fn new(api_key: String, base_url: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeouts.request_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = timeouts.connect_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url })
    }

    /// # Errors
    ///
    /// See [`parse_response`] for the status/body classification.
    pub async fn generate(&self, model: &str, contents: &[Content]) -> Result<String, LlmError> {
        let body = ApiRequest { contents };

        let response = self
            .http
            .post(endpoint_url(&self.base_url, model))
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(request_error)?;

        parse_response(status, &text)
    }
}

/// The request URL carries the API key, so it never reaches the message.
fn request_error(e: reqwest::Error) -> LlmError {
    LlmError::ApiRequest(e.without_url().to_string())
}

fn endpoint_url(base_url: &str, model: &str) -> String {
    format!("{base_url}/models/{model}:generateContent")
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    contents: &'a [Content],
}

#[derive(serde::Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ApiErrorBody>,
}

#[derive(serde::Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(serde::Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(serde::Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(serde::Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

// =============================================================================
// PARSING
// =============================================================================

/// Classify a provider response.
///
/// An `error` object wins over everything else and becomes
/// [`LlmError::Provider`]. A non-2xx status without one is
/// [`LlmError::ApiResponse`]. A 2xx body with no candidate text is
/// [`LlmError::ApiParse`]. Otherwise the text parts of the first candidate
/// are concatenated.
fn parse_response(status: u16, body: &str) -> Result<String, LlmError> {
    let success = (200..300).contains(&status);

    let api: ApiResponse = match serde_json::from_str(body) {
        Ok(api) => api,
        Err(_) if !success => return Err(LlmError::ApiResponse { status, body: body.to_string() }),
        Err(e) => return Err(LlmError::ApiParse(e.to_string())),
    };

    if let Some(error) = api.error {
        return Err(LlmError::Provider { status, message: error.message });
    }
    if !success {
        return Err(LlmError::ApiResponse { status, body: body.to_string() });
    }

    let text: String = api
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(LlmError::ApiParse("response has no candidate text".into()));
    }
    Ok(text)
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
