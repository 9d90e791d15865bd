//! Maps transport/HTTP failures to a human-readable message. These never
//! become a Rust `Err` from `generate` — they're folded into
//! `LLMResponse::error` at the call site, per this workspace's failure
//! semantics (construction-time `ConfigError` is the one exception).

pub(crate) fn map_http_status(status: reqwest::StatusCode, body: &str) -> String {
    match status.as_u16() {
        401 => format!("authentication failed: {body}"),
        400 => format!("invalid request: {body}"),
        404 => format!("model not found: {body}"),
        429 => "rate limited by provider".to_string(),
        529 => "provider overloaded".to_string(),
        500..=599 => format!("provider service error: {body}"),
        _ => format!("HTTP {status}: {body}"),
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else {
        format!("network error: {err}")
    }
}
