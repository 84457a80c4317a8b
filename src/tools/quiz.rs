//! Quiz generator: multiple-choice questions from a topic or paragraph.
//!
//! Generation goes through the shared request path. Answering and scoring
//! happen locally in a [`QuizSession`], which also writes the quiz score log
//! entry when answers are checked.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::catalog::ToolKind;
use super::{Task, ToolError, require_text};
use crate::error::ErrorCode;
use crate::parse::{self, ParseError, Validate};
use crate::scores::{ScoreEntry, ScoreLog, ScoreStore};

pub const OPTIONS_PER_QUESTION: usize = 4;

// =============================================================================
// PARAMETERS
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        })
    }
}

impl FromStr for Difficulty {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(ToolError::Invalid(format!("Difficulty must be Easy, Medium, or Hard (got '{s}')."))),
        }
    }
}

/// Number of questions to request. Only the sizes the picker offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionCount(u8);

impl QuestionCount {
    pub const ALLOWED: [u8; 4] = [3, 5, 10, 15];

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for QuestionCount {
    fn default() -> Self {
        Self(5)
    }
}

impl TryFrom<u8> for QuestionCount {
    type Error = ToolError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        if Self::ALLOWED.contains(&n) {
            Ok(Self(n))
        } else {
            Err(ToolError::Invalid(format!("Number of questions must be one of 3, 5, 10, or 15 (got {n}).")))
        }
    }
}

impl FromStr for QuestionCount {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u8 = s
            .trim()
            .parse()
            .map_err(|_| ToolError::Invalid(format!("Number of questions must be a number (got '{s}').")))?;
        Self::try_from(n)
    }
}

// =============================================================================
// RESULT SHAPE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: [String; OPTIONS_PER_QUESTION],
    /// 0-based index into `options`.
    pub correct_answer_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub quiz: Vec<QuizQuestion>,
}

impl Validate for Quiz {
    fn validate(&self) -> Result<(), ParseError> {
        if self.quiz.is_empty() {
            return Err(ParseError::Invalid { field: "quiz", reason: "no questions".into() });
        }
        for (i, q) in self.quiz.iter().enumerate() {
            if q.correct_answer_index >= OPTIONS_PER_QUESTION {
                return Err(ParseError::Invalid {
                    field: "correct_answer_index",
                    reason: format!("question {i} points at option {}", q.correct_answer_index),
                });
            }
        }
        Ok(())
    }
}

// =============================================================================
// TASK
// =============================================================================

#[derive(Debug, Clone)]
pub struct QuizTask {
    pub topic: String,
    pub count: QuestionCount,
    pub difficulty: Difficulty,
}

impl Task for QuizTask {
    type Output = Quiz;

    const KIND: ToolKind = ToolKind::Quiz;

    fn check_input(&self) -> Result<(), ToolError> {
        require_text(&self.topic, "Please enter a topic or paste a paragraph to generate a quiz.")
    }

    fn prompt(&self) -> String {
        let topic = &self.topic;
        let difficulty = self.difficulty;
        let count = self.count.get();
        format!(
            r#"Generate a multiple-choice quiz based on the following text/topic: "{topic}".
Difficulty: {difficulty}.
Number of questions: {count}.

Provide the output in a strict JSON format, ensuring that the "correct_answer_index" refers to the 0-based index of the correct option in the "options" array. Each question must have exactly 4 options.

Example JSON structure:
{{
  "quiz": [
    {{
      "question": "What is the capital of France?",
      "options": ["Berlin", "Madrid", "Paris", "Rome"],
      "correct_answer_index": 2
    }},
    {{
      "question": "Which planet is known as the Red Planet?",
      "options": ["Earth", "Mars", "Jupiter", "Venus"],
      "correct_answer_index": 1
    }}
  ]
}}

Respond with the JSON object only, with no text before or after it."#
        )
    }

    fn parse(raw: &str) -> Result<Quiz, ParseError> {
        parse::parse_structured(raw)
    }
}

// =============================================================================
// SESSION
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOutcome {
    pub correct: usize,
    pub total: usize,
}

impl QuizOutcome {
    /// Share of correct answers out of 100, rounded half up.
    #[must_use]
    pub fn percent(self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let rounded = (self.correct * 200 + self.total) / (self.total * 2);
        u32::try_from(rounded).unwrap_or(100)
    }
}

/// A generated quiz being answered.
#[derive(Debug)]
pub struct QuizSession {
    topic: String,
    questions: Vec<QuizQuestion>,
    answers: Vec<Option<usize>>,
    started: Instant,
    outcome: Option<QuizOutcome>,
}

impl QuizSession {
    /// `started` is when generation was submitted; the logged duration runs
    /// from there to the answer check.
    #[must_use]
    pub fn new(topic: impl Into<String>, quiz: Quiz, started: Instant) -> Self {
        let answers = vec![None; quiz.quiz.len()];
        Self { topic: topic.into(), questions: quiz.quiz, answers, started, outcome: None }
    }

    #[must_use]
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    /// Stable per-question id, `q0`, `q1`, ...
    #[must_use]
    pub fn question_id(index: usize) -> String {
        format!("q{index}")
    }

    #[must_use]
    pub fn selection(&self, question: usize) -> Option<usize> {
        self.answers.get(question).copied().flatten()
    }

    /// Record (or change) the selected option for one question.
    ///
    /// # Errors
    ///
    /// [`ToolError::Invalid`] for an unknown question or option, or once the
    /// answers have been checked.
    pub fn select(&mut self, question: usize, option: usize) -> Result<(), ToolError> {
        if self.outcome.is_some() {
            return Err(ToolError::Invalid("Answers are locked once they have been checked.".into()));
        }
        if option >= OPTIONS_PER_QUESTION {
            return Err(ToolError::Invalid(format!("Option {} does not exist.", option + 1)));
        }
        let slot = self
            .answers
            .get_mut(question)
            .ok_or_else(|| ToolError::Invalid(format!("Question {} does not exist.", question + 1)))?;
        *slot = Some(option);
        Ok(())
    }

    /// "Check answers" is enabled once every question has a selection.
    #[must_use]
    pub fn can_check(&self) -> bool {
        self.outcome.is_none() && self.answers.iter().all(Option::is_some)
    }

    /// Count of selections equal to the correct index. No partial credit.
    #[must_use]
    pub fn score(&self) -> usize {
        self.questions
            .iter()
            .zip(&self.answers)
            .filter(|(q, a)| **a == Some(q.correct_answer_index))
            .count()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<QuizOutcome> {
        self.outcome
    }

    /// Whether the answer to `question` was right, once checked.
    #[must_use]
    pub fn is_correct(&self, question: usize) -> Option<bool> {
        self.outcome?;
        let q = self.questions.get(question)?;
        Some(self.selection(question) == Some(q.correct_answer_index))
    }

    /// Score the quiz and append a `quizzes_results` entry.
    ///
    /// A failed log write is reported in the logs but does not undo the score.
    ///
    /// # Errors
    ///
    /// [`ToolError::Invalid`] if a question is unanswered or the quiz was
    /// already checked.
    pub async fn check(&mut self, scores: &dyn ScoreStore) -> Result<QuizOutcome, ToolError> {
        if !self.can_check() {
            return Err(ToolError::Invalid("Please answer every question before checking.".into()));
        }
        let outcome = QuizOutcome { correct: self.score(), total: self.questions.len() };
        self.outcome = Some(outcome);
        info!(correct = outcome.correct, total = outcome.total, "quiz: checked");

        let saved = match ScoreEntry::now(outcome.percent(), self.started.elapsed(), Some(self.topic.clone())) {
            Ok(entry) => scores.append(ScoreLog::Quizzes, entry).await,
            Err(e) => Err(e),
        };
        if let Err(e) = saved {
            warn!(code = e.error_code(), error = %e, "quiz: failed to save result");
        }
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "quiz_test.rs"]
mod tests;
