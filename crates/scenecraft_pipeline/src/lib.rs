//! Generation and reconciliation pipeline for scenecraft.
//!
//! Turns [`StoryInputs`](scenecraft_core::StoryInputs) into a validated
//! [`Script`](scenecraft_core::Script) and concept image, records completed
//! runs as sessions, and regenerates single SEO fields of a working script.
//!
//! # Flow
//!
//! ```text
//! StoryInputs -> PromptBuilder -> GenerationGateway (image + script, joined)
//!             -> ScriptOrchestrator -> Workspace::record -> SessionStore
//!
//! working script + instructions -> RegenerationOrchestrator
//!             -> GenerationGateway (single-field schema) -> Workspace::apply_patch
//! ```
//!
//! # Example
//!
//! ```no_run
//! use scenecraft_core::StoryInputs;
//! use scenecraft_interface::{ImageEngine, TextEngine};
//! use scenecraft_pipeline::{GenerationGateway, ScriptOrchestrator, Workspace};
//! use scenecraft_storage::{InMemoryCredentialStore, InMemoryHistoryStore};
//! use std::sync::Arc;
//!
//! # async fn run(
//! #     text: Arc<dyn TextEngine>,
//! #     image: Arc<dyn ImageEngine>,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = Arc::new(InMemoryCredentialStore::with_key("my-key"));
//! let gateway = GenerationGateway::new(text, image, credentials);
//! let orchestrator = ScriptOrchestrator::new(gateway);
//! let mut workspace = Workspace::open(Arc::new(InMemoryHistoryStore::new())).await?;
//!
//! let inputs = StoryInputs::builder().story_idea("The fall of Jericho").build()?;
//! let outcome = orchestrator.generate(&inputs).await?;
//! let report = workspace.record(inputs, outcome).await?;
//! println!("recorded: {}", report.created_session());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
pub mod contract;
mod extraction;
mod gateway;
mod orchestrator;
mod prompt;
mod regeneration;
mod schema;
mod session_store;
mod workspace;

pub use config::{ImageOptions, PipelineConfig};
pub use contract::{ContractRules, check_patch, check_script};
pub use extraction::{extract_json, parse_json};
pub use gateway::{GenerationGateway, normalize};
pub use orchestrator::{GenerationOutcome, ScriptOrchestrator};
pub use prompt::{PromptBuilder, RegenerationPrompt, ScriptPrompt};
pub use regeneration::RegenerationOrchestrator;
pub use schema::{SCHEMA_VERSION, SchemaContract};
pub use session_store::SessionStore;
pub use workspace::{GenerationReport, Workspace, WorkingArea};
