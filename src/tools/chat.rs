//! Chatbot: multi-turn study assistant.
//!
//! Unlike the single-shot tools, a failed request never leaves the chat in an
//! error state: the failure becomes the assistant's reply and the
//! conversation carries on.

use tracing::{info, warn};

use super::{ToolError, require_text};
use crate::error::ErrorCode;
use crate::llm::{Content, LlmError, LlmGenerate, Role};

pub const GREETING: &str = "Hello! I'm your AI assistant. How can I help you with your studies today?";
pub const THINKING: &str = "Thinking...";
pub const FALLBACK_REPLY: &str = "I'm sorry, I couldn't process that. Please try again.";
pub const FAILURE_REPLY: &str = "Oops! Something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

#[derive(Debug)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    pending: bool,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    #[must_use]
    pub fn new() -> Self {
        Self { messages: vec![ChatMessage { sender: Sender::Ai, text: GREETING.into() }], pending: false }
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// While a reply is outstanding the host shows [`THINKING`]; the
    /// placeholder is never part of the history sent upstream.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Append the user's turn and return the full history to send.
    ///
    /// # Errors
    ///
    /// [`ToolError::Invalid`] for blank input, [`ToolError::Busy`] while a
    /// reply is still outstanding.
    pub fn begin(&mut self, input: &str) -> Result<Vec<Content>, ToolError> {
        if self.pending {
            return Err(ToolError::Busy);
        }
        require_text(input, "Please type a message first.")?;

        self.messages.push(ChatMessage { sender: Sender::User, text: input.to_string() });
        self.pending = true;
        Ok(self.history())
    }

    /// Record the assistant's turn for the outstanding request.
    pub fn finish(&mut self, result: Result<String, LlmError>) -> &ChatMessage {
        self.pending = false;
        let text = reply_text(result);
        self.messages.push(ChatMessage { sender: Sender::Ai, text });
        &self.messages[self.messages.len() - 1]
    }

    /// Send one user turn and wait for the reply.
    ///
    /// # Errors
    ///
    /// Only the input guards of [`Conversation::begin`]; request failures
    /// become the reply text.
    pub async fn send(&mut self, llm: &dyn LlmGenerate, input: &str) -> Result<&ChatMessage, ToolError> {
        let contents = self.begin(input)?;
        info!(turns = contents.len(), "chat: send");
        let result = llm.generate(&contents).await;
        Ok(self.finish(result))
    }

    fn history(&self) -> Vec<Content> {
        self.messages
            .iter()
            .map(|m| {
                let role = match m.sender {
                    Sender::User => Role::User,
                    Sender::Ai => Role::Model,
                };
                Content::turn(role, m.text.clone())
            })
            .collect()
    }
}

fn reply_text(result: Result<String, LlmError>) -> String {
    match result {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => FALLBACK_REPLY.into(),
        Err(LlmError::Provider { message, .. }) => format!("Error: {message}"),
        Err(e @ (LlmError::ApiParse(_) | LlmError::ApiResponse { .. })) => {
            warn!(code = e.error_code(), error = %e, "chat: unusable reply");
            FALLBACK_REPLY.into()
        }
        Err(e) => {
            warn!(code = e.error_code(), error = %e, "chat: request failed");
            FAILURE_REPLY.into()
        }
    }
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
