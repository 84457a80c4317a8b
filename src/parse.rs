//! Response parser: pulls a typed result out of loosely formatted model text.
//!
//! DESIGN
//! ======
//! Models are told to answer with JSON only but often wrap it in a fenced
//! block anyway. The parser therefore trims the text, prefers the first
//! fenced block tagged `json` (or untagged), and otherwise parses the whole
//! trimmed text. The decoded value is deserialized into the task's result
//! type and then checked by its [`Validate`] impl. Any failure along the way
//! is one [`ParseError`]; no partially filled result ever escapes.
//!
//! User content is interpolated into prompts unescaped, so a fence typed by
//! the user and echoed back by the model can be picked up here. Known gap.

use serde::de::DeserializeOwned;

use crate::error::ErrorCode;

const FENCE: &str = "```";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("response is empty")]
    Empty,

    #[error("response is not valid JSON: {0}")]
    NotJson(String),

    #[error("response JSON does not match the expected shape: {0}")]
    Shape(String),

    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "E_EMPTY_RESPONSE",
            Self::NotJson(_) => "E_NOT_JSON",
            Self::Shape(_) => "E_SHAPE",
            Self::Invalid { .. } => "E_INVALID_FIELD",
        }
    }

    fn retryable(&self) -> bool {
        true
    }
}

/// Post-deserialization checks serde cannot express (ranges, lengths).
pub trait Validate {
    /// # Errors
    ///
    /// Returns [`ParseError::Invalid`] naming the first offending field.
    fn validate(&self) -> Result<(), ParseError>;
}

/// Interior of the first fenced block tagged `json` or untagged.
///
/// An opening fence is three backticks followed by a bare language tag (or
/// nothing) and a newline. Backticks inside prose are stepped over; blocks
/// tagged with any other language are skipped whole.
#[must_use]
pub fn extract_fenced(text: &str) -> Option<&str> {
    let mut rest = text;
    while let Some(open) = rest.find(FENCE) {
        let after_open = &rest[open + FENCE.len()..];
        let Some(newline) = after_open.find('\n') else {
            break;
        };
        let tag = after_open[..newline].trim_end();
        if !is_fence_tag(tag) {
            rest = after_open;
            continue;
        }

        let body = &after_open[newline + 1..];
        let Some(close) = body.find(FENCE) else {
            break;
        };
        if tag.is_empty() || tag.eq_ignore_ascii_case("json") {
            return Some(body[..close].trim());
        }
        rest = &body[close + FENCE.len()..];
    }
    None
}

fn is_fence_tag(tag: &str) -> bool {
    tag.bytes().all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'+' | b'-'))
}

/// Decode the JSON payload of a raw response, fenced or bare.
///
/// # Errors
///
/// [`ParseError::Empty`] for blank input, [`ParseError::NotJson`] otherwise.
pub fn extract_json(raw: &str) -> Result<serde_json::Value, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    let payload = extract_fenced(trimmed).unwrap_or(trimmed);
    serde_json::from_str(payload).map_err(|e| ParseError::NotJson(e.to_string()))
}

/// Decode, deserialize, and validate a structured result.
///
/// # Errors
///
/// Any decode, shape, or validation failure.
pub fn parse_structured<T>(raw: &str) -> Result<T, ParseError>
where
    T: DeserializeOwned + Validate,
{
    let value = extract_json(raw)?;
    let parsed: T = serde_json::from_value(value).map_err(|e| ParseError::Shape(e.to_string()))?;
    parsed.validate()?;
    Ok(parsed)
}

/// Free-text tasks: the trimmed response is the result.
///
/// # Errors
///
/// [`ParseError::Empty`] when nothing but whitespace came back.
pub fn parse_text(raw: &str) -> Result<String, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(trimmed.to_string())
}

/// Range check shared by every 0–100 score field.
///
/// # Errors
///
/// [`ParseError::Invalid`] when `value` exceeds 100.
pub fn check_percent(field: &'static str, value: u32) -> Result<(), ParseError> {
    if value > 100 {
        return Err(ParseError::Invalid { field, reason: format!("{value} is outside 0..=100") });
    }
    Ok(())
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
