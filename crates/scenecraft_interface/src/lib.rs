//! Generation engine traits for the scenecraft pipeline.
//!
//! The pipeline treats text and image generation as opaque capabilities.
//! Providers implement these traits; the pipeline only ever talks to them
//! through `Arc<dyn TextEngine>` and `Arc<dyn ImageEngine>`.

mod traits;

pub use traits::{ImageEngine, TextEngine};
