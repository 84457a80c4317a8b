//! Essay grader: scores out of 100 plus categorized feedback.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::catalog::ToolKind;
use super::{Task, ToolError, require_text};
use crate::error::ErrorCode;
use crate::parse::{self, ParseError, Validate, check_percent};
use crate::scores::{ScoreEntry, ScoreLog};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubScores {
    pub clarity: u32,
    pub structure: u32,
    pub grammar: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub good_points: Vec<String>,
    pub suggestions: Vec<String>,
    pub blunders: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EssayGrade {
    pub overall_score: u32,
    pub scores: SubScores,
    pub feedback: Feedback,
}

impl Validate for EssayGrade {
    fn validate(&self) -> Result<(), ParseError> {
        check_percent("overall_score", self.overall_score)?;
        check_percent("scores.clarity", self.scores.clarity)?;
        check_percent("scores.structure", self.scores.structure)?;
        check_percent("scores.grammar", self.scores.grammar)
    }
}

#[derive(Debug, Clone)]
pub struct EssayTask {
    pub essay: String,
}

impl Task for EssayTask {
    type Output = EssayGrade;

    const KIND: ToolKind = ToolKind::Grading;

    fn check_input(&self) -> Result<(), ToolError> {
        require_text(&self.essay, "Please paste your essay or paragraph to get a grade.")
    }

    fn prompt(&self) -> String {
        let essay = &self.essay;
        format!(
            r#"Your task is to act as an AI Essay Grader.
You will receive an essay or paragraph.
You MUST analyze it and provide a grade out of 100 for:
- Overall Score
- Clarity
- Structure
- Grammar

Additionally, you MUST provide specific feedback categorized into three arrays:
- "good_points": Strengths of the essay.
- "suggestions": Areas for minor improvement or minor issues.
- "blunders": Significant errors or major weaknesses.

Your entire response MUST be a single, valid JSON object, and nothing else. Do not include any conversational text, introductory phrases, or explanations outside the JSON. Ensure all scores are integers (0-100). If a feedback category has no points, provide an empty array.

Here is the EXACT JSON structure you MUST adhere to:
{{
  "overall_score": <integer>,
  "scores": {{
    "clarity": <integer>,
    "structure": <integer>,
    "grammar": <integer>
  }},
  "feedback": {{
    "good_points": ["<string>"],
    "suggestions": ["<string>"],
    "blunders": ["<string>"]
  }}
}}

Essay/Paragraph to grade:
"{essay}""#
        )
    }

    fn parse(raw: &str) -> Result<EssayGrade, ParseError> {
        parse::parse_structured(raw)
    }

    fn score_entry(&self, output: &EssayGrade, elapsed: Duration) -> Option<(ScoreLog, ScoreEntry)> {
        match ScoreEntry::now(output.overall_score, elapsed, None) {
            Ok(entry) => Some((ScoreLog::Essays, entry)),
            Err(e) => {
                warn!(code = e.error_code(), error = %e, "essay: score entry not recorded");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "essay_test.rs"]
mod tests;
