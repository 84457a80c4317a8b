use super::*;

fn make_response(parts: serde_json::Value) -> String {
    serde_json::json!({
        "candidates": [{
            "content": { "role": "model", "parts": parts },
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 30 }
    })
    .to_string()
}

#[test]
fn endpoint_url_embeds_model() {
    assert_eq!(
        endpoint_url("https://generativelanguage.googleapis.com/v1beta", "gemini-2.0-flash"),
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
    );
}

#[test]
fn parse_text_response() {
    let json = make_response(serde_json::json!([{ "text": "Hello world" }]));
    assert_eq!(parse_response(200, &json).unwrap(), "Hello world");
}

#[test]
fn parse_concatenates_text_parts() {
    let json = make_response(serde_json::json!([{ "text": "Hello " }, { "text": "world" }]));
    assert_eq!(parse_response(200, &json).unwrap(), "Hello world");
}

#[test]
fn parse_uses_first_candidate_only() {
    let json = serde_json::json!({
        "candidates": [
            { "content": { "parts": [{ "text": "first" }] } },
            { "content": { "parts": [{ "text": "second" }] } }
        ]
    })
    .to_string();
    assert_eq!(parse_response(200, &json).unwrap(), "first");
}

#[test]
fn parse_provider_error_object() {
    let json = serde_json::json!({
        "error": { "code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT" }
    })
    .to_string();
    let err = parse_response(400, &json).unwrap_err();
    assert!(
        matches!(err, LlmError::Provider { status: 400, ref message } if message.starts_with("API key not valid"))
    );
}

#[test]
fn parse_provider_error_object_wins_even_on_200() {
    let json = serde_json::json!({ "error": { "message": "quota" } }).to_string();
    assert!(matches!(parse_response(200, &json), Err(LlmError::Provider { .. })));
}

#[test]
fn parse_non_json_error_status() {
    let err = parse_response(502, "<html>Bad Gateway</html>").unwrap_err();
    assert!(matches!(err, LlmError::ApiResponse { status: 502, ref body } if body.contains("Bad Gateway")));
}

#[test]
fn parse_json_error_status_without_error_object() {
    let err = parse_response(503, "{}").unwrap_err();
    assert!(matches!(err, LlmError::ApiResponse { status: 503, .. }));
}

#[test]
fn parse_invalid_json_on_success() {
    let err = parse_response(200, "not json").unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

#[test]
fn parse_no_candidates() {
    let err = parse_response(200, r#"{"candidates": []}"#).unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

#[test]
fn parse_candidate_without_content() {
    let json = serde_json::json!({ "candidates": [{ "finishReason": "SAFETY" }] }).to_string();
    assert!(matches!(parse_response(200, &json), Err(LlmError::ApiParse(_))));
}

#[tokio::test]
async fn transport_error_does_not_expose_api_key() {
    let client = GeminiClient::new(
        "SECRET-KEY-123".into(),
        "http://127.0.0.1:9".into(),
        LlmTimeouts { request_secs: Some(5), connect_secs: Some(5) },
    )
    .unwrap();
    let contents = [Content::prompt("hello", None)];

    let err = client.generate("m", &contents).await.unwrap_err();
    assert!(matches!(err, LlmError::ApiRequest(_)));
    assert!(!err.to_string().contains("SECRET-KEY-123"));
    assert!(!format!("{err:?}").contains("SECRET-KEY-123"));
}
