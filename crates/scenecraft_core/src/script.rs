//! The structured script document returned by the text engine.

use crate::{SeoField, SeoPatch};
use serde::{Deserialize, Serialize};

/// Maximum dialogue words allowed per beat of a scene.
pub const DIALOGUE_WORDS_PER_BEAT: usize = 12;

/// Number of title candidates an SEO bundle carries.
pub const TITLE_COUNT: usize = 5;

/// Number of thumbnail prompts an SEO bundle carries.
pub const THUMBNAIL_PROMPT_COUNT: usize = 3;

/// Count whitespace-separated words.
///
/// # Examples
///
/// ```
/// use scenecraft_core::word_count;
///
/// assert_eq!(word_count("NARRATOR:  The storm  arrives."), 4);
/// assert_eq!(word_count("   "), 0);
/// ```
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// A principal character and its visual DNA.
///
/// The `descriptor` is kept in English and is repeated verbatim in every
/// prompt that shows the character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Character {
    /// Display name used in beats and dialogue
    pub name: String,
    /// Exhaustive visual description
    pub descriptor: String,
}

/// One visual take of roughly four seconds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDetail {
    /// What happens in this beat
    pub story_beat: String,
    /// Still-image prompt
    pub image_prompt: String,
    /// Video prompt, starting with a camera angle
    pub video_prompt: String,
}

/// A scene: a label, its dialogue, and the beats it is shot in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scene {
    /// Scene heading
    pub label: String,
    /// All spoken lines of the scene
    pub dialogue: String,
    /// Visual beats, never empty in a valid script
    pub details: Vec<SceneDetail>,
}

impl Scene {
    /// Words of dialogue in this scene.
    pub fn dialogue_words(&self) -> usize {
        word_count(&self.dialogue)
    }

    /// Maximum dialogue words the scene's beats can carry.
    ///
    /// # Examples
    ///
    /// ```
    /// use scenecraft_core::{Scene, SceneDetail};
    ///
    /// let beat = SceneDetail {
    ///     story_beat: "Rain".into(),
    ///     image_prompt: "Rain on glass".into(),
    ///     video_prompt: "Close-up of rain on glass".into(),
    /// };
    /// let scene = Scene {
    ///     label: "Opening".into(),
    ///     dialogue: "NARRATOR: It began with rain.".into(),
    ///     details: vec![beat.clone(), beat],
    /// };
    /// assert_eq!(scene.dialogue_budget(), 24);
    /// assert!(scene.dialogue_words() <= scene.dialogue_budget());
    /// ```
    pub fn dialogue_budget(&self) -> usize {
        DIALOGUE_WORDS_PER_BEAT * self.details.len()
    }
}

/// Marketing material accompanying a script.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoBundle {
    /// Video title candidates
    pub titles: Vec<String>,
    /// Video description ending in a call to action
    pub description: String,
    /// Thumbnail image prompts
    pub thumbnail_prompts: Vec<String>,
    /// Search tags
    pub tags: Vec<String>,
}

impl SeoBundle {
    /// Current value of one key, in patch form.
    ///
    /// # Examples
    ///
    /// ```
    /// use scenecraft_core::{SeoBundle, SeoField, SeoPatch};
    ///
    /// let seo = SeoBundle { tags: vec!["noir".into()], ..Default::default() };
    /// assert_eq!(seo.value_of(SeoField::Tags), SeoPatch::Tags(vec!["noir".into()]));
    /// ```
    pub fn value_of(&self, field: SeoField) -> SeoPatch {
        match field {
            SeoField::Titles => SeoPatch::Titles(self.titles.clone()),
            SeoField::Description => SeoPatch::Description(self.description.clone()),
            SeoField::ThumbnailPrompts => SeoPatch::ThumbnailPrompts(self.thumbnail_prompts.clone()),
            SeoField::Tags => SeoPatch::Tags(self.tags.clone()),
        }
    }

    /// Return a copy with exactly the patched key replaced.
    pub fn with_patch(&self, patch: SeoPatch) -> SeoBundle {
        let mut next = self.clone();
        match patch {
            SeoPatch::Titles(titles) => next.titles = titles,
            SeoPatch::Description(description) => next.description = description,
            SeoPatch::ThumbnailPrompts(prompts) => next.thumbnail_prompts = prompts,
            SeoPatch::Tags(tags) => next.tags = tags,
        }
        next
    }
}

/// The complete generated document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Script {
    /// Principal characters
    pub characters: Vec<Character>,
    /// Scenes in screen order
    pub scenes: Vec<Scene>,
    /// Marketing bundle
    pub seo: SeoBundle,
}

impl Script {
    /// Look up a character by exact name.
    pub fn character(&self, name: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.name == name)
    }

    /// Total number of beats across all scenes.
    pub fn beat_count(&self) -> usize {
        self.scenes.iter().map(|s| s.details.len()).sum()
    }

    /// Return a copy whose SEO bundle has one key replaced.
    ///
    /// Characters, scenes and every other SEO key are carried over unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use scenecraft_core::{Script, SeoPatch};
    ///
    /// let script = Script::default();
    /// let patched = script.with_seo_patch(SeoPatch::Tags(vec!["storm".into()]));
    /// assert_eq!(patched.seo.tags, vec!["storm".to_string()]);
    /// assert_eq!(patched.scenes, script.scenes);
    /// ```
    pub fn with_seo_patch(&self, patch: SeoPatch) -> Script {
        Script {
            characters: self.characters.clone(),
            scenes: self.scenes.clone(),
            seo: self.seo.with_patch(patch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Script {
        Script {
            characters: vec![Character {
                name: "Mara".into(),
                descriptor: "a woman with silver braids".into(),
            }],
            scenes: vec![Scene {
                label: "Harbor".into(),
                dialogue: "MARA: The tide is late.".into(),
                details: vec![SceneDetail {
                    story_beat: "Mara watches the harbor".into(),
                    image_prompt: "a woman with silver braids at a harbor".into(),
                    video_prompt: "Wide shot, a woman with silver braids at a harbor".into(),
                }],
            }],
            seo: SeoBundle {
                titles: vec!["One".into(), "Two".into()],
                description: "A harbor story.".into(),
                thumbnail_prompts: vec!["silver braids at dusk".into()],
                tags: vec!["harbor".into()],
            },
        }
    }

    #[test]
    fn test_wire_keys_are_camel_case() {
        let value = serde_json::to_value(sample()).expect("serialize");
        assert!(value["scenes"][0]["details"][0]["storyBeat"].is_string());
        assert!(value["scenes"][0]["details"][0]["imagePrompt"].is_string());
        assert!(value["seo"]["thumbnailPrompts"].is_array());
    }

    #[test]
    fn test_description_patch_touches_only_description() {
        let script = sample();
        let patched = script.with_seo_patch(SeoPatch::Description("New copy".into()));

        assert_eq!(patched.seo.description, "New copy");
        assert_eq!(patched.seo.titles, script.seo.titles);
        assert_eq!(patched.seo.thumbnail_prompts, script.seo.thumbnail_prompts);
        assert_eq!(patched.seo.tags, script.seo.tags);
        assert_eq!(patched.characters, script.characters);
        assert_eq!(patched.scenes, script.scenes);
    }

    #[test]
    fn test_character_lookup() {
        let script = sample();
        assert!(script.character("Mara").is_some());
        assert!(script.character("mara").is_none());
        assert_eq!(script.beat_count(), 1);
    }
}
