//! Tool Registry (C2): the object-safe tool trait, the name → instance
//! registry, parameter validation, and provider-dialect rendering of tool
//! schemas, plus the workspace's standard built-in tools.

pub mod builtin;
mod dialect;
mod error;
mod registry;
mod validate;

pub use dialect::{render_for_anthropic, render_for_gemini, render_for_ollama, render_for_openai};
pub use error::ToolError;
pub use registry::{ToolDyn, ToolRegistry};
pub use validate::validate_params;
