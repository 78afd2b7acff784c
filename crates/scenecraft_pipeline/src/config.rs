//! Pipeline and image settings.

use serde::{Deserialize, Serialize};

/// Tunables for prompt building, contract enforcement and regeneration.
///
/// # Examples
///
/// ```
/// use scenecraft_pipeline::PipelineConfig;
///
/// let config = PipelineConfig::default();
/// assert_eq!(*config.generation_attempts(), 2);
/// assert!(*config.enforce_visual_dna());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct PipelineConfig {
    /// Language spoken lines are rendered in inside video prompts
    dialogue_language: String,
    /// Total script attempts when a response breaks a contract
    generation_attempts: usize,
    /// Reject scenes whose dialogue exceeds the per-beat word budget
    enforce_dialogue_pacing: bool,
    /// Reject prompts that omit a present character's descriptor
    enforce_visual_dna: bool,
    /// Scenes included as context when regenerating an SEO field
    regeneration_context_scenes: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            dialogue_language: "Brazilian Portuguese".to_string(),
            generation_attempts: 2,
            enforce_dialogue_pacing: true,
            enforce_visual_dna: true,
            regeneration_context_scenes: 3,
        }
    }
}

impl PipelineConfig {
    /// Set the number of script attempts (at least one is always made).
    pub fn with_generation_attempts(mut self, attempts: usize) -> Self {
        self.generation_attempts = attempts;
        self
    }

    /// Toggle the dialogue pacing contract.
    pub fn with_dialogue_pacing(mut self, enforce: bool) -> Self {
        self.enforce_dialogue_pacing = enforce;
        self
    }

    /// Toggle the visual DNA contract.
    pub fn with_visual_dna(mut self, enforce: bool) -> Self {
        self.enforce_visual_dna = enforce;
        self
    }
}

/// Concept image request settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct ImageOptions {
    /// Aspect ratio such as `16:9`
    aspect_ratio: String,
    /// Images requested per generation; the first one is kept
    count: u32,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            aspect_ratio: "16:9".to_string(),
            count: 1,
        }
    }
}
