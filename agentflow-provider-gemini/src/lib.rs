//! Gemini `generateContent` API adapter (C1).

mod client;
mod error;
mod mapping;

pub use client::Gemini;
