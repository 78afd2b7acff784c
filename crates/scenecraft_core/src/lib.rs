//! Core data types for the scenecraft script generation pipeline.
//!
//! This crate holds the script document model, the user-facing input
//! catalogues, session records and the request types handed to generation
//! engines. It contains no I/O.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod credential;
mod inputs;
mod media;
mod request;
mod script;
mod seo;
mod session;
mod telemetry;

pub use credential::ApiKey;
pub use inputs::{
    LengthMode, SeoInstructions, StoryInputs, StoryInputsBuilder, Theme, VisualStyle,
    DEFAULT_DESCRIPTION_INSTRUCTION, DEFAULT_THUMBNAIL_INSTRUCTION, DEFAULT_TITLE_INSTRUCTION,
};
pub use media::GeneratedImage;
pub use request::{ImageRequest, ImageRequestBuilder, TextRequest, TextRequestBuilder};
pub use script::{
    word_count, Character, Scene, SceneDetail, Script, SeoBundle, DIALOGUE_WORDS_PER_BEAT,
    THUMBNAIL_PROMPT_COUNT, TITLE_COUNT,
};
pub use seo::{SeoField, SeoPatch};
pub use session::{Session, SessionId};
pub use telemetry::init_logging;
