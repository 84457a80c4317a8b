use super::*;

#[test]
fn prompt_wraps_code_in_fence() {
    let task = CodeTask { code: "x = 1".into() };
    let prompt = task.prompt();
    assert!(prompt.ends_with("```\nx = 1\n```"));
    assert!(prompt.contains("\"explanation_points\""));
}

#[test]
fn empty_code_is_rejected() {
    assert!(CodeTask { code: String::new() }.check_input().is_err());
}

#[test]
fn parse_points() {
    let raw = "```json\n{\"explanation_points\": [\"🔹 Declares x.\", \"🔹 Prints x.\"]}\n```";
    let parsed = CodeTask::parse(raw).unwrap();
    assert_eq!(parsed.explanation_points.len(), 2);
    assert_eq!(parsed.explanation_points[0], "🔹 Declares x.");
}

#[test]
fn parse_rejects_non_string_points() {
    let raw = r#"{"explanation_points": ["ok", 3]}"#;
    assert!(matches!(CodeTask::parse(raw), Err(ParseError::Shape(_))));
}

#[test]
fn parse_rejects_prose() {
    assert!(matches!(CodeTask::parse("This code prints hello."), Err(ParseError::NotJson(_))));
}

#[test]
fn guess_language_by_keyword() {
    assert_eq!(guess_language("function hi() { console.log('hi'); }"), "javascript");
    assert_eq!(guess_language("#include <stdio.h>\nint main() { printf(\"x\"); }"), "c");
    assert_eq!(guess_language("public static void main(String[] a) {}"), "java");
    assert_eq!(guess_language("def f():\n    return 1"), "python");
    assert_eq!(guess_language("<?php echo 1; ?>"), "php");
    assert_eq!(guess_language("<html><body></body></html>"), "html");
    assert_eq!(guess_language("body { color: red; }"), "css");
    assert_eq!(guess_language("SELECT * FROM t;"), "plaintext");
}
