use super::*;

const GRADE_JSON: &str = r#"{
  "overall_score": 85,
  "scores": { "clarity": 90, "structure": 80, "grammar": 88 },
  "feedback": {
    "good_points": ["Clear thesis"],
    "suggestions": ["Vary sentence length"],
    "blunders": []
  }
}"#;

#[test]
fn empty_essay_is_rejected() {
    let task = EssayTask { essay: "\t \n".into() };
    let err = task.check_input().unwrap_err();
    assert_eq!(err.user_message(), "Please paste your essay or paragraph to get a grade.");
}

#[test]
fn prompt_embeds_essay_verbatim() {
    let task = EssayTask { essay: "Dogs are \"loyal\".\n```json".into() };
    let prompt = task.prompt();
    assert!(prompt.ends_with("\"Dogs are \"loyal\".\n```json\""));
    assert!(prompt.contains("\"overall_score\": <integer>"));
    assert!(prompt.contains("MUST be a single, valid JSON object"));
}

#[test]
fn parse_fenced_grade() {
    let raw = format!("```json\n{GRADE_JSON}\n```");
    let grade = EssayTask::parse(&raw).unwrap();
    assert_eq!(grade.overall_score, 85);
    assert_eq!(grade.scores, SubScores { clarity: 90, structure: 80, grammar: 88 });
    assert_eq!(grade.feedback.good_points, vec!["Clear thesis".to_string()]);
    assert!(grade.feedback.blunders.is_empty());
}

#[test]
fn parse_bare_grade() {
    assert_eq!(EssayTask::parse(GRADE_JSON).unwrap().overall_score, 85);
}

#[test]
fn parse_rejects_missing_feedback_list() {
    let raw = r#"{"overall_score": 70, "scores": {"clarity": 1, "structure": 2, "grammar": 3},
                 "feedback": {"good_points": [], "suggestions": []}}"#;
    assert!(matches!(EssayTask::parse(raw), Err(ParseError::Shape(ref m)) if m.contains("blunders")));
}

#[test]
fn parse_rejects_string_score() {
    let raw = GRADE_JSON.replace("\"overall_score\": 85", "\"overall_score\": \"85\"");
    assert!(matches!(EssayTask::parse(&raw), Err(ParseError::Shape(_))));
}

#[test]
fn parse_rejects_sub_score_over_100() {
    let raw = GRADE_JSON.replace("\"grammar\": 88", "\"grammar\": 188");
    assert!(matches!(EssayTask::parse(&raw), Err(ParseError::Invalid { field: "scores.grammar", .. })));
}

#[test]
fn score_entry_uses_overall_score() {
    let task = EssayTask { essay: "text".into() };
    let grade = EssayTask::parse(GRADE_JSON).unwrap();
    let (log, entry) = task.score_entry(&grade, Duration::from_secs(95)).unwrap();
    assert_eq!(log, ScoreLog::Essays);
    assert_eq!(entry.score, 85);
    assert_eq!(entry.duration, 2);
    assert_eq!(entry.subject, None);
}
