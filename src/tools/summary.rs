//! Content summarizer: concise key points of an article or notes.

use serde::{Deserialize, Serialize};

use super::catalog::ToolKind;
use super::{Task, ToolError, require_text};
use crate::parse::{self, ParseError, Validate};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub summary_points: Vec<String>,
}

impl Validate for Summary {
    fn validate(&self) -> Result<(), ParseError> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SummaryTask {
    pub content: String,
}

impl Task for SummaryTask {
    type Output = Summary;

    const KIND: ToolKind = ToolKind::Summarizer;

    fn check_input(&self) -> Result<(), ToolError> {
        require_text(&self.content, "Please paste some content to summarize.")
    }

    fn prompt(&self) -> String {
        let content = &self.content;
        format!(
            r#"Your task is to summarize the following article/notes into a concise list of key bullet points.
Your entire response MUST be a single, valid JSON object, and nothing else.
The JSON object MUST contain a single key "summary_points" which is an array of strings.
Each string in the array should be a concise summary point.

Example JSON structure:
{{
  "summary_points": [
    "First key point of the summary.",
    "Second key point, very concise.",
    "Third key insight or conclusion."
  ]
}}

Here is the content to summarize:
"{content}""#
        )
    }

    fn parse(raw: &str) -> Result<Summary, ParseError> {
        parse::parse_structured(raw)
    }
}
