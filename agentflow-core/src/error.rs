use thiserror::Error;

/// Failures that prevent a turn from starting at all.
///
/// Every other failure mode in this workspace — a bad tool call, a provider
/// timeout, an empty memory search — is represented as in-band data instead
/// of an `Err`. `ConfigError` is the one exception: it means the caller asked
/// for something the core cannot even attempt.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    #[error("agent {agent_id} is missing required field: {field}")]
    MissingField { agent_id: i64, field: &'static str },

    #[error("invalid base_url: {0}")]
    InvalidBaseUrl(String),

    #[error("empty api key")]
    EmptyApiKey,
}
