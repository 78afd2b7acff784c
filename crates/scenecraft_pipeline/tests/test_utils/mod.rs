//! Test utilities for scenecraft pipeline tests.
//!
//! This module provides mock engines and canned engine responses.

pub mod mock_engine;

#[allow(unused_imports)]
pub use mock_engine::{MockBehavior, MockImageEngine, MockResponse, MockTextEngine, png};

use scenecraft_core::{LengthMode, StoryInputs};
use scenecraft_pipeline::{GenerationGateway, PipelineConfig};
use scenecraft_storage::{InMemoryCredentialStore, InMemoryHistoryStore};
use serde_json::json;
use std::sync::Arc;

pub const DESCRIPTOR: &str =
    "a towering warrior in bronze scale armor with a scarred jaw and a crimson cloak";

/// A contract-abiding script response with `scenes` scenes.
pub fn script_json(scenes: usize) -> String {
    let scene = |i: usize| {
        json!({
            "label": format!("Scene {}", i + 1),
            "dialogue": "GOLIATH: Send me a man to fight!",
            "details": [{
                "storyBeat": "Goliath taunts the army of Israel",
                "imagePrompt": format!("Wide shot of {DESCRIPTOR} on the valley floor"),
                "videoPrompt": format!("Low angle, {DESCRIPTOR} shouting. GOLIATH: speak in Brazilian Portuguese: \"Send me a man!\"")
            }]
        })
    };

    json!({
        "characters": [{"name": "Goliath", "descriptor": DESCRIPTOR}],
        "scenes": (0..scenes).map(scene).collect::<Vec<_>>(),
        "seo": {
            "titles": ["The Giant Falls", "One Stone", "Faith vs Steel", "The Shepherd King", "Valley of Elah"],
            "description": "A shepherd boy faces a giant. Subscribe for more!",
            "thumbnailPrompts": ["giant silhouette", "sling mid-swing", "fallen helmet"],
            "tags": ["david", "goliath", "bible"]
        }
    })
    .to_string()
}

/// Inputs for a short story about David and Goliath.
pub fn inputs() -> StoryInputs {
    inputs_with_length(LengthMode::Short)
}

#[allow(dead_code)]
pub fn inputs_with_length(length: LengthMode) -> StoryInputs {
    StoryInputs::builder()
        .project_name("Valley of Elah")
        .story_idea("David defeats Goliath with a sling")
        .length(length)
        .build()
        .expect("Failed to build test inputs")
}

/// Gateway over the given engines with a configured credential.
pub fn gateway(text: &MockTextEngine, image: &MockImageEngine) -> GenerationGateway {
    GenerationGateway::new(
        Arc::new(text.clone()),
        Arc::new(image.clone()),
        Arc::new(InMemoryCredentialStore::with_key("test-key")),
    )
}

/// Gateway with no saved credential.
#[allow(dead_code)]
pub fn gateway_without_key(text: &MockTextEngine, image: &MockImageEngine) -> GenerationGateway {
    GenerationGateway::new(
        Arc::new(text.clone()),
        Arc::new(image.clone()),
        Arc::new(InMemoryCredentialStore::new()),
    )
}

/// Pipeline settings with a single script attempt.
#[allow(dead_code)]
pub fn single_attempt() -> PipelineConfig {
    PipelineConfig::default().with_generation_attempts(1)
}

#[allow(dead_code)]
pub fn history() -> Arc<InMemoryHistoryStore> {
    Arc::new(InMemoryHistoryStore::new())
}
