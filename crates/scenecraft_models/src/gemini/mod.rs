//! Google Gemini REST client.
//!
//! Text generation uses `models/{model}:generateContent` with a JSON
//! response schema. Image generation uses the Imagen
//! `models/{model}:predict` endpoint. Both authenticate with the
//! `x-goog-api-key` header and share one bounded retry policy.

mod client;
mod config;
mod dto;

pub use client::GeminiClient;
pub use config::GeminiConfig;
