//! Credential and session history persistence for scenecraft.
//!
//! The generation pipeline never reaches for ambient state: it is handed a
//! [`CredentialStore`] and a [`HistoryStore`] at construction time.
//!
//! # Backends
//!
//! - [`FileCredentialStore`] / [`JsonFileHistoryStore`] - on-disk, atomic
//!   temp-file + rename writes
//! - [`InMemoryCredentialStore`] / [`InMemoryHistoryStore`] - process-local,
//!   for tests and ephemeral runs
//!
//! # Example
//!
//! ```no_run
//! use scenecraft_storage::{CredentialStore, FileCredentialStore};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FileCredentialStore::new("/tmp/scenecraft/credentials");
//! store.set("  my-api-key  ").await?;
//! assert!(store.get().await?.is_some());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod atomic;
mod credential;
mod history;
mod memory;
mod storage;

pub use credential::FileCredentialStore;
pub use history::{HISTORY_FORMAT_VERSION, JsonFileHistoryStore};
pub use memory::{InMemoryCredentialStore, InMemoryHistoryStore};
pub use storage::{CredentialStore, HistoryStore};
