//! Business rules a schema-valid script must also satisfy.
//!
//! Each check returns human-readable breach descriptions; [`check_script`]
//! and [`check_patch`] fold every breach of one response into a single
//! `ContractViolation`.

use crate::PipelineConfig;
use regex::Regex;
use scenecraft_core::{
    LengthMode, Script, SeoBundle, SeoPatch, THUMBNAIL_PROMPT_COUNT, TITLE_COUNT,
};
use scenecraft_error::{GenerationError, GenerationErrorKind, GenerationResult};

/// Which optional contracts are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractRules {
    /// Dialogue word budget per scene
    pub dialogue_pacing: bool,
    /// Verbatim descriptor injection
    pub visual_dna: bool,
}

impl Default for ContractRules {
    fn default() -> Self {
        Self {
            dialogue_pacing: true,
            visual_dna: true,
        }
    }
}

impl From<&PipelineConfig> for ContractRules {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            dialogue_pacing: *config.enforce_dialogue_pacing(),
            visual_dna: *config.enforce_visual_dna(),
        }
    }
}

fn violation(breaches: Vec<String>) -> GenerationResult<()> {
    if breaches.is_empty() {
        Ok(())
    } else {
        Err(GenerationError::new(GenerationErrorKind::ContractViolation(
            breaches.join("; "),
        )))
    }
}

/// Scene count must match the length mode's contractual count, if any.
pub fn scene_count_breaches(script: &Script, length: &LengthMode) -> Vec<String> {
    match length.required_scene_count() {
        Some(required) if script.scenes.len() != required => vec![format!(
            "expected exactly {} scenes for {}, got {}",
            required,
            length,
            script.scenes.len()
        )],
        _ => Vec::new(),
    }
}

/// Fixed SEO cardinalities: 5 titles, 3 thumbnail prompts, non-empty tags
/// and description.
pub fn seo_breaches(seo: &SeoBundle) -> Vec<String> {
    let mut breaches = Vec::new();
    if seo.titles.len() != TITLE_COUNT {
        breaches.push(format!(
            "seo.titles: expected {} entries, got {}",
            TITLE_COUNT,
            seo.titles.len()
        ));
    }
    if seo.thumbnail_prompts.len() != THUMBNAIL_PROMPT_COUNT {
        breaches.push(format!(
            "seo.thumbnailPrompts: expected {} entries, got {}",
            THUMBNAIL_PROMPT_COUNT,
            seo.thumbnail_prompts.len()
        ));
    }
    if seo.tags.iter().all(|t| t.trim().is_empty()) {
        breaches.push("seo.tags: expected at least one tag".to_string());
    }
    if seo.description.trim().is_empty() {
        breaches.push("seo.description: must not be empty".to_string());
    }
    breaches
}

/// Each scene's dialogue must fit 12 words per beat, and have beats.
pub fn dialogue_breaches(script: &Script) -> Vec<String> {
    script
        .scenes
        .iter()
        .enumerate()
        .filter_map(|(i, scene)| {
            if scene.details.is_empty() {
                Some(format!("scenes[{i}] ({}): no beats", scene.label))
            } else if scene.dialogue_words() > scene.dialogue_budget() {
                Some(format!(
                    "scenes[{i}] ({}): {} dialogue words exceed the {}-word budget of {} beat(s)",
                    scene.label,
                    scene.dialogue_words(),
                    scene.dialogue_budget(),
                    scene.details.len()
                ))
            } else {
                None
            }
        })
        .collect()
}

/// Matches a character name as a whole word, case-insensitively.
fn name_matcher(name: &str) -> Option<Regex> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Regex::new(&format!(r"(?i)(?:^|\W){}(?:$|\W)", regex::escape(name))).ok()
}

/// Beats that mention a character must carry its exact descriptor in both
/// prompts.
pub fn visual_dna_breaches(script: &Script) -> Vec<String> {
    let matchers: Vec<_> = script
        .characters
        .iter()
        .filter(|c| !c.descriptor.trim().is_empty())
        .filter_map(|c| name_matcher(&c.name).map(|re| (c, re)))
        .collect();

    let mut breaches = Vec::new();
    for (s, scene) in script.scenes.iter().enumerate() {
        for (d, detail) in scene.details.iter().enumerate() {
            for (character, matcher) in &matchers {
                if !matcher.is_match(&detail.story_beat) {
                    continue;
                }
                for (prompt_name, prompt) in [
                    ("imagePrompt", &detail.image_prompt),
                    ("videoPrompt", &detail.video_prompt),
                ] {
                    if !prompt.contains(&character.descriptor) {
                        breaches.push(format!(
                            "scenes[{s}].details[{d}].{prompt_name}: missing the descriptor of {}",
                            character.name
                        ));
                    }
                }
            }
        }
    }
    breaches
}

/// Run every applicable contract against a freshly generated script.
///
/// # Errors
///
/// Returns one `ContractViolation` listing every breach.
pub fn check_script(
    script: &Script,
    length: &LengthMode,
    rules: ContractRules,
) -> GenerationResult<()> {
    let mut breaches = scene_count_breaches(script, length);
    breaches.extend(seo_breaches(&script.seo));
    if rules.dialogue_pacing {
        breaches.extend(dialogue_breaches(script));
    }
    if rules.visual_dna {
        breaches.extend(visual_dna_breaches(script));
    }
    violation(breaches)
}

/// Cardinality check for a regenerated SEO fragment.
///
/// # Errors
///
/// Returns a `ContractViolation` if the fragment has the wrong number of
/// entries or no content.
pub fn check_patch(patch: &SeoPatch) -> GenerationResult<()> {
    let breaches = match patch {
        SeoPatch::Titles(titles) if titles.len() != TITLE_COUNT => vec![format!(
            "titles: expected {} entries, got {}",
            TITLE_COUNT,
            titles.len()
        )],
        SeoPatch::ThumbnailPrompts(prompts) if prompts.len() != THUMBNAIL_PROMPT_COUNT => {
            vec![format!(
                "thumbnailPrompts: expected {} entries, got {}",
                THUMBNAIL_PROMPT_COUNT,
                prompts.len()
            )]
        }
        patch if patch.is_empty() => vec![format!("{}: no content", patch.field())],
        _ => Vec::new(),
    };
    violation(breaches)
}
