use super::*;

#[derive(Debug)]
struct Plain;

impl std::fmt::Display for Plain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("plain")
    }
}

impl ErrorCode for Plain {
    fn error_code(&self) -> &'static str {
        "E_PLAIN"
    }
}

#[test]
fn retryable_defaults_to_false() {
    assert!(!Plain.retryable());
    assert_eq!(Plain.error_code(), "E_PLAIN");
}
