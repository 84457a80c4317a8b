//! Homework helper: free-text explanation, rendered as Markdown by the host.

use super::catalog::ToolKind;
use super::{Task, ToolError, require_text};
use crate::parse::{self, ParseError};

#[derive(Debug, Clone)]
pub struct HomeworkTask {
    pub question: String,
}

impl Task for HomeworkTask {
    type Output = String;

    const KIND: ToolKind = ToolKind::Homework;

    fn check_input(&self) -> Result<(), ToolError> {
        require_text(&self.question, "Please enter your homework question or a topic to get an explanation.")
    }

    fn prompt(&self) -> String {
        let question = &self.question;
        format!(
            r#"Please explain the following concept, question, or paragraph in a clear, comprehensive, and understandable way, suitable for a student. Provide a detailed explanation, avoiding quiz questions or multiple-choice options.

If the explanation naturally divides into multiple points or paragraphs, please separate them clearly. Use bolding for key terms or section headlines within the explanation where appropriate.

Input: "{question}""#
        )
    }

    fn parse(raw: &str) -> Result<String, ParseError> {
        parse::parse_text(raw)
    }
}
