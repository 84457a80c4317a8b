//! Code explainer: one bullet per line or logical block of a snippet.

use serde::{Deserialize, Serialize};

use super::catalog::ToolKind;
use super::{Task, ToolError, require_text};
use crate::parse::{self, ParseError, Validate};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeExplanation {
    pub explanation_points: Vec<String>,
}

impl Validate for CodeExplanation {
    fn validate(&self) -> Result<(), ParseError> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CodeTask {
    pub code: String,
}

impl Task for CodeTask {
    type Output = CodeExplanation;

    const KIND: ToolKind = ToolKind::Code;

    fn check_input(&self) -> Result<(), ToolError> {
        require_text(&self.code, "Please paste some code to explain.")
    }

    fn prompt(&self) -> String {
        let code = &self.code;
        format!(
            r#"Your task is to explain the provided code snippet in clear, concise bullet points.
For each line of code or logical block, provide a separate explanation bullet point.
Your entire response MUST be a single, valid JSON object, and nothing else.
The JSON object MUST contain a single key "explanation_points" which is an array of strings.
Each string in the array should represent one explanation bullet point, prefixed with a blue diamond emoji (🔹).

Example JSON structure:
{{
  "explanation_points": [
    "🔹 This line declares a variable.",
    "🔹 This block performs a calculation.",
    "🔹 This function returns a value."
  ]
}}

Here is the code snippet to explain:
```
{code}
```"#
        )
    }

    fn parse(raw: &str) -> Result<CodeExplanation, ParseError> {
        parse::parse_structured(raw)
    }
}

/// Display label for a snippet, by first matching keyword. Order matters:
/// `const` in C++ still reads as javascript.
#[must_use]
pub fn guess_language(code: &str) -> &'static str {
    let has = |needles: &[&str]| needles.iter().any(|n| code.contains(n));

    if has(&["function", "console.log", "const", "let", "var"]) {
        "javascript"
    } else if has(&["#include", "main()", "printf"]) {
        "c"
    } else if has(&["public static void main", "System.out.println"]) {
        "java"
    } else if has(&["def ", "print(", "import "]) {
        "python"
    } else if has(&["<?php"]) {
        "php"
    } else if has(&["<html"]) {
        "html"
    } else if has(&["body {"]) {
        "css"
    } else {
        "plaintext"
    }
}

#[cfg(test)]
#[path = "code_test.rs"]
mod tests;
