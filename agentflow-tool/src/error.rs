use thiserror::Error;

/// Failures from registry bookkeeping. Never surfaced to the model — unlike
/// [`agentflow_core::ConfigError`], these are the implementer's own mistake
/// (registering the same tool twice), not something a caller's runtime input
/// can trigger.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("tool already registered: {0}")]
    DuplicateName(String),
}
