//! Scenecraft - story premise to production-ready video script
//!
//! Scenecraft turns a loosely specified story idea into a structured,
//! scene-by-scene script with consistent character "visual DNA", paced
//! dialogue and an SEO bundle (titles, description, thumbnail prompts, tags),
//! alongside a generated concept image. Single SEO fields can be regenerated
//! later without touching the rest of the script.
//!
//! # Quick Start
//!
//! ```no_run
//! use scenecraft::{
//!     GeminiClient, GenerationGateway, JsonFileHistoryStore, FileCredentialStore,
//!     ScenecraftConfig, ScriptOrchestrator, StoryInputs, Workspace,
//! };
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ScenecraftConfig::load()?;
//! let client = Arc::new(GeminiClient::new(config.gemini.clone())?);
//! let credentials = Arc::new(FileCredentialStore::new(config.storage.credential_path()?));
//! let gateway = GenerationGateway::new(client.clone(), client, credentials);
//!
//! let history = Arc::new(JsonFileHistoryStore::new(config.storage.history_path()?));
//! let mut workspace = Workspace::open(history).await?;
//!
//! let inputs = StoryInputs::builder().story_idea("Daniel in the lions' den").build()?;
//! let outcome = ScriptOrchestrator::new(gateway).generate(&inputs).await?;
//! workspace.record(inputs, outcome).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Cargo Features
//!
//! - `gemini` (default) - Google Gemini text and Imagen image generation
//!
//! # Architecture
//!
//! - `scenecraft_error` - Error types
//! - `scenecraft_core` - Script model, inputs, sessions, requests
//! - `scenecraft_interface` - Text and image engine traits
//! - `scenecraft_models` - Engine implementations
//! - `scenecraft_storage` - Credential and history stores
//! - `scenecraft_pipeline` - Prompting, contracts, orchestration, workspace
//!
//! This crate (`scenecraft`) re-exports everything for convenience.

mod config;

pub use config::{ScenecraftConfig, StorageConfig};

pub use scenecraft_core::*;
pub use scenecraft_error::*;
pub use scenecraft_interface::*;
pub use scenecraft_pipeline::*;
pub use scenecraft_storage::*;

#[cfg(feature = "gemini")]
pub use scenecraft_models::{GeminiClient, GeminiConfig};
