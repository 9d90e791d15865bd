//! Maps transport/HTTP failures to a human-readable message, folded into
//! `LLMResponse::error` at the call site rather than propagated.

pub(crate) fn map_http_status(status: reqwest::StatusCode, body: &str) -> String {
    match status.as_u16() {
        401 => format!("authentication failed: {body}"),
        400 => format!("invalid request: {body}"),
        404 => format!("model not found: {body}"),
        429 => "rate limited by provider".to_string(),
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
