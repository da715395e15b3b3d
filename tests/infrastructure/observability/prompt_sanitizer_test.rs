use chat_relay::infrastructure::observability::sanitize_prompt;

#[test]
fn given_blank_prompt_when_sanitizing_then_marks_empty() {
    assert_eq!(sanitize_prompt("   "), "[EMPTY]");
}

#[test]
fn given_short_prompt_when_sanitizing_then_keeps_it() {
    assert_eq!(sanitize_prompt("  What is Rust?  "), "What is Rust?");
}

#[test]
fn given_long_prompt_when_sanitizing_then_truncates_with_total_length() {
    let prompt = "a".repeat(150);

    let sanitized = sanitize_prompt(&prompt);

    assert_eq!(sanitized, format!("{}... (150 chars total)", "a".repeat(100)));
}

#[test]
fn given_multibyte_prompt_when_truncating_then_cuts_on_char_boundary() {
    let prompt = "é".repeat(120);

    let sanitized = sanitize_prompt(&prompt);

    assert!(sanitized.starts_with(&"é".repeat(100)));
    assert!(sanitized.ends_with("(120 chars total)"));
}

#[test]
fn given_data_uri_when_sanitizing_then_collapses_to_mime_and_length() {
    let uri = "data:image/png;base64,iVBORw==";

    assert_eq!(sanitize_prompt(uri), format!("[INLINE image/png {} chars]", uri.len()));
}

#[test]
fn given_secrets_when_sanitizing_then_redacts_them() {
    let sanitized = sanitize_prompt("use Bearer abc123 and api_key=xyz&other=1 with pplx-0123456789");

    assert!(!sanitized.contains("abc123"));
    assert!(!sanitized.contains("xyz"));
    assert!(!sanitized.contains("0123456789"));
    assert!(sanitized.contains("Bearer [REDACTED]"));
    assert!(sanitized.contains("api_key=[REDACTED]&other=1"));
    assert!(sanitized.contains("pplx-[REDACTED]"));
}
