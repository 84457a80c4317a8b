//! LLM configuration parsed from environment variables.

use tracing::warn;

use super::types::LlmError;

pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Optional HTTP timeouts. `None` leaves the HTTP stack default in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request_secs: Option<u64>,
    pub connect_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeouts: LlmTimeouts,
}

impl LlmConfig {
    /// Build typed LLM config from environment variables.
    ///
    /// - `LLM_API_KEY_ENV`: names the env var holding the key (default `GEMINI_API_KEY`)
    /// - `LLM_MODEL`: default `gemini-2.0-flash`
    /// - `LLM_BASE_URL`: default generative-language `v1beta` endpoint
    /// - `LLM_REQUEST_TIMEOUT_SECS`, `LLM_CONNECT_TIMEOUT_SECS`: unset by default
    ///
    /// A missing key is not an error here: the provider rejects the call.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigParse`] if a timeout value is not an integer.
    pub fn from_env() -> Result<Self, LlmError> {
        let key_var = std::env::var("LLM_API_KEY_ENV").unwrap_or_else(|_| DEFAULT_API_KEY_ENV.to_string());
        let api_key = std::env::var(&key_var).unwrap_or_else(|_| {
            warn!(var = %key_var, "API key not set; provider calls will be rejected");
            String::new()
        });

        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url = std::env::var("LLM_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let timeouts = LlmTimeouts {
            request_secs: env_parse_opt_u64("LLM_REQUEST_TIMEOUT_SECS")?,
            connect_secs: env_parse_opt_u64("LLM_CONNECT_TIMEOUT_SECS")?,
        };

        Ok(Self { api_key, model, base_url, timeouts })
    }
}

fn env_parse_opt_u64(key: &str) -> Result<Option<u64>, LlmError> {
    let Ok(raw) = std::env::var(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|_| LlmError::ConfigParse(format!("{key} must be a whole number of seconds, got '{raw}'")))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
