use super::*;
use serde::Deserialize;

#[derive(Debug, PartialEq, Deserialize)]
struct Points {
    points: Vec<String>,
    score: u32,
}

impl Validate for Points {
    fn validate(&self) -> Result<(), ParseError> {
        check_percent("score", self.score)
    }
}

// =============================================================================
// extract_fenced
// =============================================================================

#[test]
fn fenced_json_block() {
    let raw = "```json\n{\"a\": 1}\n```";
    assert_eq!(extract_fenced(raw), Some("{\"a\": 1}"));
}

#[test]
fn fenced_untagged_block() {
    let raw = "Here you go:\n```\n[1, 2]\n```\nEnjoy!";
    assert_eq!(extract_fenced(raw), Some("[1, 2]"));
}

#[test]
fn fenced_tag_is_case_insensitive() {
    assert_eq!(extract_fenced("```JSON\n{}\n```"), Some("{}"));
}

#[test]
fn fenced_ignores_backticks_inside_prose() {
    let raw = "Here is the grade for your ``` snippet:\n```json\n{\"a\": 1}\n```";
    assert_eq!(extract_fenced(raw), Some("{\"a\": 1}"));
    assert_eq!(extract_json(raw).unwrap(), serde_json::json!({ "a": 1 }));
}

#[test]
fn fenced_inline_backticks_without_newline_do_not_stop_scan() {
    let raw = "Use ```code``` spans.\n```\n{\"b\": 2}\n```";
    assert_eq!(extract_fenced(raw), Some("{\"b\": 2}"));
}

#[test]
fn fenced_skips_other_languages() {
    let raw = "```python\nprint('x')\n```\n```json\n{\"ok\": true}\n```";
    assert_eq!(extract_fenced(raw), Some("{\"ok\": true}"));
}

#[test]
fn fenced_unterminated_is_none() {
    assert_eq!(extract_fenced("```json\n{\"a\": 1}"), None);
}

#[test]
fn fenced_without_newline_is_none() {
    assert_eq!(extract_fenced("```{\"a\": 1}```"), None);
}

#[test]
fn no_fence_is_none() {
    assert_eq!(extract_fenced("{\"a\": 1}"), None);
}

// =============================================================================
// extract_json
// =============================================================================

#[test]
fn fenced_interior_equals_direct_decode() {
    let interior = r#"{"points": ["a", "b"], "score": 85}"#;
    let fenced = format!("```json\n{interior}\n```");
    let expected: serde_json::Value = serde_json::from_str(interior).unwrap();
    assert_eq!(extract_json(&fenced).unwrap(), expected);
}

#[test]
fn bare_json_decodes_directly() {
    let raw = "  \n{\"points\": [], \"score\": 0}\n ";
    assert_eq!(extract_json(raw).unwrap(), serde_json::json!({ "points": [], "score": 0 }));
}

#[test]
fn prose_is_not_json() {
    assert!(matches!(extract_json("Sure! Here is your quiz."), Err(ParseError::NotJson(_))));
}

#[test]
fn blank_is_empty() {
    assert_eq!(extract_json("   \n"), Err(ParseError::Empty));
}

#[test]
fn broken_json_inside_fence_is_not_json() {
    assert!(matches!(extract_json("```json\n{\"a\": \n```"), Err(ParseError::NotJson(_))));
}

// =============================================================================
// parse_structured
// =============================================================================

#[test]
fn structured_from_fence() {
    let raw = "```json\n{\"points\": [\"x\"], \"score\": 85}\n```";
    let parsed: Points = parse_structured(raw).unwrap();
    assert_eq!(parsed, Points { points: vec!["x".into()], score: 85 });
}

#[test]
fn structured_missing_field_is_shape_error() {
    let err = parse_structured::<Points>(r#"{"points": []}"#).unwrap_err();
    assert!(matches!(err, ParseError::Shape(ref msg) if msg.contains("score")));
}

#[test]
fn structured_wrong_type_is_shape_error() {
    let err = parse_structured::<Points>(r#"{"points": "nope", "score": 1}"#).unwrap_err();
    assert!(matches!(err, ParseError::Shape(_)));
}

#[test]
fn structured_fractional_score_is_shape_error() {
    let err = parse_structured::<Points>(r#"{"points": [], "score": 85.5}"#).unwrap_err();
    assert!(matches!(err, ParseError::Shape(_)));
}

#[test]
fn structured_out_of_range_is_invalid() {
    let err = parse_structured::<Points>(r#"{"points": [], "score": 140}"#).unwrap_err();
    assert!(matches!(err, ParseError::Invalid { field: "score", .. }));
}

// =============================================================================
// parse_text
// =============================================================================

#[test]
fn text_is_trimmed() {
    assert_eq!(parse_text("\n  Photosynthesis is...  \n").unwrap(), "Photosynthesis is...");
}

#[test]
fn text_keeps_fences_verbatim() {
    let raw = "Example:\n```\nx = 1\n```";
    assert_eq!(parse_text(raw).unwrap(), raw);
}

#[test]
fn text_blank_is_empty() {
    assert_eq!(parse_text("  "), Err(ParseError::Empty));
}
