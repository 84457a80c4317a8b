//! AI tools: prompt builders, result shapes, and the shared request path.
//!
//! DESIGN
//! ======
//! Every tool follows the same four steps: check input, build a prompt,
//! call the provider once, parse the reply. A tool only describes its own
//! prompt and result shape through [`Task`]; [`run_task`] is the single
//! implementation of the steps. The chatbot is the one exception: it sends
//! a multi-turn history and never fails into an error state, see [`chat`].

pub mod catalog;
pub mod chat;
pub mod code;
pub mod essay;
pub mod handwriting;
pub mod homework;
pub mod quiz;
pub mod summary;

use std::time::Duration;

use tracing::{debug, info};

use crate::error::ErrorCode;
use crate::llm::{InlineImage, LlmError, LlmGenerate};
use crate::parse::ParseError;
use crate::scores::{ScoreEntry, ScoreLog};
use catalog::ToolKind;

// =============================================================================
// ERROR
// =============================================================================

/// Widget-facing error taxonomy. Each variant renders its own user message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    /// Rejected before any network call. The string is the inline message.
    #[error("invalid input: {0}")]
    Invalid(String),

    /// A request from this widget is still outstanding.
    #[error("a request is already in progress")]
    Busy,

    /// Transport failure talking to the provider.
    #[error("network error: {0}")]
    Network(String),

    /// The provider reported an error object; its message is shown as-is.
    #[error("provider error: {message}")]
    Provider { message: String, retryable: bool },

    /// Non-success status or an envelope without candidate text.
    #[error("unexpected provider response: {0}")]
    Unexpected(String),

    /// The model's text did not parse into the expected result shape.
    #[error("malformed output: {0}")]
    Malformed(#[from] ParseError),
}

impl ToolError {
    /// Message suitable for showing to the user. Raw model text never
    /// appears here; it goes to `debug` logs only.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Invalid(message) => message.clone(),
            Self::Busy => "A request is already in progress. Please wait for it to finish.".into(),
            Self::Network(_) => {
                "Failed to connect to the AI service. Please check your network connection and try again.".into()
            }
            Self::Provider { message, .. } => {
                format!("AI Error: {message}. Please check your API key and try again.")
            }
            Self::Unexpected(_) => "Received an unexpected response from the AI. Please try again.".into(),
            Self::Malformed(_) => {
                "The AI returned its answer in an unexpected format. Please try again or simplify your request."
                    .into()
            }
        }
    }
}

impl ErrorCode for ToolError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Invalid(_) => "E_INVALID_INPUT",
            Self::Busy => "E_BUSY",
            Self::Network(_) => "E_NETWORK",
            Self::Provider { .. } => "E_PROVIDER",
            Self::Unexpected(_) => "E_UNEXPECTED_RESPONSE",
            Self::Malformed(_) => "E_MALFORMED_OUTPUT",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Invalid(_) => false,
            Self::Provider { retryable, .. } => *retryable,
            Self::Busy | Self::Network(_) | Self::Unexpected(_) | Self::Malformed(_) => true,
        }
    }
}

impl From<LlmError> for ToolError {
    fn from(e: LlmError) -> Self {
        let retryable = e.retryable();
        match e {
            LlmError::ApiRequest(m) | LlmError::HttpClientBuild(m) | LlmError::ConfigParse(m) => Self::Network(m),
            LlmError::Provider { message, .. } => Self::Provider { message, retryable },
            LlmError::ApiResponse { status, .. } => Self::Unexpected(format!("status {status}")),
            LlmError::ApiParse(m) => Self::Unexpected(m),
        }
    }
}

// =============================================================================
// TASK
// =============================================================================

/// One single-shot AI tool: how to build its prompt and read its answer.
pub trait Task: Send + Sync {
    type Output: Send;

    const KIND: ToolKind;

    /// Input guard run before any network call.
    ///
    /// # Errors
    ///
    /// [`ToolError::Invalid`] with the inline message to show.
    fn check_input(&self) -> Result<(), ToolError>;

    /// Full instruction text with the user's content embedded verbatim.
    fn prompt(&self) -> String;

    /// Inline attachment sent after the prompt text.
    fn image(&self) -> Option<&InlineImage> {
        None
    }

    /// Parse the raw model text into this tool's result.
    ///
    /// # Errors
    ///
    /// Any [`ParseError`]; the widget keeps no partial result.
    fn parse(raw: &str) -> Result<Self::Output, ParseError>;

    /// Score log entry recorded when a submission succeeds.
    fn score_entry(&self, _output: &Self::Output, _elapsed: Duration) -> Option<(ScoreLog, ScoreEntry)> {
        None
    }
}

/// Check input, send exactly one request, parse the reply.
///
/// # Errors
///
/// Input, transport, provider, or parse failures as [`ToolError`].
pub async fn run_task<T: Task>(llm: &dyn LlmGenerate, task: &T) -> Result<T::Output, ToolError> {
    task.check_input()?;

    let prompt = task.prompt();
    info!(tool = T::KIND.id(), prompt_len = prompt.len(), has_image = task.image().is_some(), "tool: submit");

    let raw = llm.submit(&prompt, task.image()).await?;
    T::parse(&raw).map_err(|e| {
        debug!(tool = T::KIND.id(), error = %e, raw = %raw, "tool: unparseable response");
        ToolError::Malformed(e)
    })
}

/// Shared guard for text inputs: whitespace-only counts as empty.
pub(crate) fn require_text(input: &str, message: &str) -> Result<(), ToolError> {
    if input.trim().is_empty() {
        return Err(ToolError::Invalid(message.to_string()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
