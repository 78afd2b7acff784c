//! Error types for the scenecraft pipeline.
//!
//! This crate provides the error types shared by every scenecraft crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! [`GenerationError`] is the closed taxonomy the generation pipeline reports
//! to its callers. [`EngineError`] describes raw conditions coming back from a
//! generation engine and never leaves the gateway that normalizes it.
//!
//! # Examples
//!
//! ```
//! use scenecraft_error::{GenerationError, GenerationErrorKind, ScenecraftResult};
//!
//! fn generate() -> ScenecraftResult<String> {
//!     Err(GenerationError::new(GenerationErrorKind::MissingCredential))?
//! }
//!
//! match generate() {
//!     Ok(script) => println!("Got: {}", script),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod engine;
mod error;
mod generation;
mod json;
mod storage;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use engine::{EngineError, EngineErrorKind, EngineResult, RetryableError};
pub use error::{ScenecraftError, ScenecraftErrorKind, ScenecraftResult};
pub use generation::{GenerationError, GenerationErrorKind, GenerationResult, OVERLOAD_HINT};
pub use json::JsonError;
pub use storage::{StorageError, StorageErrorKind, StorageResult};
