//! OpenAI-compatible Chat Completions API adapter (C1).

mod client;
mod error;
mod mapping;

pub use client::OpenAiCompat;
