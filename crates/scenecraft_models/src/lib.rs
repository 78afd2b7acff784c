//! Generation engine providers for scenecraft.
//!
//! Each provider lives behind its own feature flag and implements the
//! [`TextEngine`](scenecraft_interface::TextEngine) and
//! [`ImageEngine`](scenecraft_interface::ImageEngine) traits.
//!
//! # Available Providers
//!
//! - **Gemini** (Google) - text via `generateContent`, images via Imagen
//!   `predict`. Enabled by the default `gemini` feature.
//!
//! # Example
//!
//! ```no_run
//! use scenecraft_core::{ApiKey, TextRequest};
//! use scenecraft_interface::TextEngine;
//! use scenecraft_models::{GeminiClient, GeminiConfig};
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new(GeminiConfig::default())?;
//! let key = ApiKey::parse("your-key").ok_or("blank key")?;
//! let request = TextRequest::builder()
//!     .system_instruction("Answer in JSON.")
//!     .user_query("Name three colors.")
//!     .schema(json!({"type": "ARRAY", "items": {"type": "STRING"}}))
//!     .build()?;
//! let text = client.generate_text(&key, &request).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "gemini")]
mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::{GeminiClient, GeminiConfig};
