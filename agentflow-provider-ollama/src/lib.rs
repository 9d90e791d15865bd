//! Ollama `/api/chat` adapter (C1).

mod client;
mod error;
mod mapping;

pub use client::Ollama;
