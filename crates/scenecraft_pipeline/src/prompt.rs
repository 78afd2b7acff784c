//! Prompt composition for script, image and SEO regeneration requests.

use crate::{PipelineConfig, SchemaContract};
use scenecraft_core::{
    DIALOGUE_WORDS_PER_BEAT, LengthMode, Script, SeoField, SeoInstructions, StoryInputs,
    THUMBNAIL_PROMPT_COUNT, TITLE_COUNT, TextRequest, Theme,
};
use scenecraft_error::{GenerationError, GenerationErrorKind, GenerationResult};
use serde_json::json;
use tracing::debug;

const SOURCE_FIDELITY_OVERLAY: &str = "\
**MANDATORY FOUNDATION: BIBLICAL SOURCE**
Every story, character and event MUST be strictly based on passages of the Holy Bible. \
Fidelity to the biblical text is the highest priority. It is expressly FORBIDDEN to invent \
events, dialogue, characters or fantastic elements with no direct basis in Scripture. The goal \
is to dramatize biblical stories, not to write new fiction.";

const CHILD_SAFE_OVERLAY: &str = "\
**MANDATORY FOUNDATION: CHILDREN'S TALE**
You are a magical storyteller for children. Every story must suit a young audience, with \
simple language, endearing characters and a clear, positive moral at the end. AVOID violence \
and frightening or complex themes. The goal is a charming fairy tale or fable that teaches and \
entertains.";

const REGENERATION_SYSTEM_INSTRUCTION: &str = "\
You are a YouTube marketing specialist. Your task is to regenerate ONE specific part of a \
video's SEO content following new instructions. Reply ONLY with a JSON object containing the \
requested key.";

/// A fully composed script request.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct ScriptPrompt {
    /// Theme overlay followed by the base rules
    system_instruction: String,
    /// Premise, style, length and SEO guidance
    user_query: String,
    /// Expected response document
    schema: SchemaContract,
    /// Contractual scene count in video mode
    required_scene_count: Option<usize>,
}

impl ScriptPrompt {
    /// Engine request for this prompt.
    pub fn to_request(&self) -> GenerationResult<TextRequest> {
        text_request(&self.system_instruction, &self.user_query, self.schema)
    }
}

/// A reduced prompt that regenerates one SEO field.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct RegenerationPrompt {
    /// Field being regenerated
    field: SeoField,
    /// SEO specialist rules
    system_instruction: String,
    /// Instructions plus a context excerpt of the script
    user_query: String,
    /// Single-field response document
    schema: SchemaContract,
}

impl RegenerationPrompt {
    /// Engine request for this prompt.
    pub fn to_request(&self) -> GenerationResult<TextRequest> {
        text_request(&self.system_instruction, &self.user_query, self.schema)
    }
}

fn text_request(
    system_instruction: &str,
    user_query: &str,
    schema: SchemaContract,
) -> GenerationResult<TextRequest> {
    TextRequest::builder()
        .system_instruction(system_instruction)
        .user_query(user_query)
        .schema(schema.schema().clone())
        .build()
        .map_err(|e| GenerationError::new(GenerationErrorKind::Unknown(e)))
}

/// Composes engine prompts from user inputs.
///
/// # Examples
///
/// ```
/// use scenecraft_core::{LengthMode, StoryInputs};
/// use scenecraft_pipeline::PromptBuilder;
///
/// let inputs = StoryInputs::builder()
///     .story_idea("Jonah and the whale")
///     .length(LengthMode::Video { minutes: 3 })
///     .build()
///     .unwrap();
///
/// let prompt = PromptBuilder::new().script_prompt(&inputs).unwrap();
/// assert_eq!(*prompt.required_scene_count(), Some(30));
/// assert!(prompt.user_query().contains("EXACTLY 30 scenes"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    config: PipelineConfig,
}

impl PromptBuilder {
    /// Builder with default pipeline settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder using the given pipeline settings.
    pub fn from_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Reject inputs that cannot produce a prompt.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error for a blank idea or a zero-minute video.
    pub fn validate(inputs: &StoryInputs) -> GenerationResult<()> {
        if inputs.story_idea().trim().is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::Validation(
                "the story idea must not be empty".to_string(),
            )));
        }
        if let LengthMode::Video { minutes: 0 } = inputs.length() {
            return Err(GenerationError::new(GenerationErrorKind::Validation(
                "a video must last at least one minute".to_string(),
            )));
        }
        Ok(())
    }

    /// Full script prompt.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error if the inputs are rejected.
    pub fn script_prompt(&self, inputs: &StoryInputs) -> GenerationResult<ScriptPrompt> {
        Self::validate(inputs)?;

        let system_instruction = match inputs.theme().as_ref().and_then(overlay) {
            Some(overlay) => format!("{}\n\n{}", overlay, self.base_rules()),
            None => self.base_rules(),
        };
        let user_query = self.user_query(inputs);
        let required_scene_count = inputs.length().required_scene_count();

        debug!(
            system_len = system_instruction.len(),
            query_len = user_query.len(),
            ?required_scene_count,
            "Built script prompt"
        );

        Ok(ScriptPrompt {
            system_instruction,
            user_query,
            schema: SchemaContract::FullScript,
            required_scene_count,
        })
    }

    /// Concept-art prompt for the session image.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error if the inputs are rejected.
    pub fn image_prompt(&self, inputs: &StoryInputs) -> GenerationResult<String> {
        Self::validate(inputs)?;
        Ok(format!(
            "Concept art in a {} visual style for a story about: {}. \
             Dramatic composition, rich detail, no text or lettering.",
            inputs.visual_style(),
            inputs.story_idea().trim()
        ))
    }

    /// Reduced prompt regenerating a single SEO field.
    ///
    /// `story_idea` may be empty when the premise is unknown.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error if `instructions` is blank.
    pub fn regeneration_prompt(
        &self,
        field: SeoField,
        script: &Script,
        story_idea: &str,
        instructions: &str,
    ) -> GenerationResult<RegenerationPrompt> {
        let instructions = instructions.trim();
        if instructions.is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::Validation(
                "regeneration instructions must not be empty".to_string(),
            )));
        }

        let scene_limit = (*self.config.regeneration_context_scenes()).min(script.scenes.len());
        let context = json!({
            "characters": script.characters,
            "scenes": &script.scenes[..scene_limit],
        });

        let mut user_query = String::new();
        if !story_idea.trim().is_empty() {
            user_query.push_str(&format!("The script is about: \"{}\".\n\n", story_idea.trim()));
        }
        user_query.push_str(&format!(
            "Regeneration instructions: \"{}\"\n\n\
             Regenerate this part of the SEO: \"{}\".{}\n\n\
             Existing script context (for reference):\n{}\n",
            instructions,
            field.key(),
            cardinality_note(field),
            context
        ));

        debug!(
            field = %field,
            context_scenes = scene_limit,
            query_len = user_query.len(),
            "Built regeneration prompt"
        );

        Ok(RegenerationPrompt {
            field,
            system_instruction: REGENERATION_SYSTEM_INSTRUCTION.to_string(),
            user_query,
            schema: SchemaContract::SeoField(field),
        })
    }

    fn user_query(&self, inputs: &StoryInputs) -> String {
        let theme = inputs
            .theme()
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "General".to_string());
        let base = format!(
            "Story premise: {}. Theme: {}. Visual style: {}.",
            inputs.story_idea().trim(),
            theme,
            inputs.visual_style()
        );
        let seo = seo_guidance(inputs.instructions());

        match inputs.length() {
            LengthMode::Video { minutes } => {
                let scenes = inputs.length().required_scene_count().unwrap_or_default();
                format!(
                    "Write a script for a video. STRICT REQUIREMENT AND TOP PRIORITY: the video \
                     lasts {} minute(s) and the script MUST contain EXACTLY {} scenes in total \
                     ({} scenes per minute). This rule is non-negotiable and outranks every other \
                     instruction for this task. {}\n{}",
                    minutes,
                    scenes,
                    LengthMode::SCENES_PER_MINUTE,
                    base,
                    seo
                )
            }
            other => format!(
                "Write a film script and its matching SEO content. {} Duration: {}.\n{}",
                base, other, seo
            ),
        }
    }

    fn base_rules(&self) -> String {
        format!(
            "\
You are a master screenwriter and YouTube marketing expert. Your task is to produce a complete \
content package. The output MUST be a single JSON object and NOTHING else.

**GOLDEN RULE OF CONSISTENCY (THE MOST IMPORTANT):**
The detailed visual description of each character (its \"visual DNA\") created in \"characters\" \
MUST be included, complete and verbatim, in EVERY \"imagePrompt\" and \"videoPrompt\" in which \
that character appears. No exceptions, no paraphrase, no name-only references.

The JSON object has three top-level keys: \"characters\", \"scenes\" and \"seo\".

1. \"characters\": the PRINCIPAL characters, each with \"name\" and \"descriptor\". The descriptor \
is an EXTREMELY detailed visual description written IN ENGLISH. Example: 'a man with short black \
hair, piercing blue eyes, a faint scar on his left cheek, wearing a worn brown leather jacket over \
a grey t-shirt, and dark jeans'.

2. \"scenes\": each scene has \"label\", \"dialogue\" and \"details\".
   * \"dialogue\" is MANDATORY. If nobody speaks, use a NARRATOR. Each entry of \"details\" is one \
visual take of about four seconds, so a scene's dialogue MUST NOT exceed {words} words per detail \
(two details: {two} words, three details: {three} words). Keep lines short and punchy.
   * Each detail is ONE action with \"storyBeat\", \"imagePrompt\" (IN ENGLISH) and \"videoPrompt\" \
(IN ENGLISH). When a character is present, inject its full, exact descriptor into both prompts.
   * Every videoPrompt MUST start with a camera angle and carry spoken lines in the form \
'CHARACTER NAME: speak in {language}: \"The line here.\"'.

3. \"seo\": YouTube marketing material based on the story.
   * \"titles\": exactly {titles} impactful, curiosity-driven video titles.
   * \"description\": a story summary, a paragraph inviting interaction, and a clear call to action \
to subscribe, like and comment.
   * \"thumbnailPrompts\": exactly {thumbs} detailed image prompts (IN ENGLISH) for a clickable \
thumbnail. Think contrast, emotion and clarity.
   * \"tags\": relevant YouTube SEO tags, general and story-specific.

SPECIAL RULES FOR VIDEO SCRIPTS:
1. Dialogue must be consistent from start to finish.
2. The closing scenes (last two or three) MUST include a call to action asking viewers to \
subscribe, like and turn on notifications.
3. **SCENE COUNT IS THE ABSOLUTE, NON-NEGOTIABLE PRIORITY:** when a video script is requested, \
the scene count ({per_minute} per minute) takes precedence over every style or content \
guideline. The \"scenes\" array MUST hold exactly the requested number of entries.",
            words = DIALOGUE_WORDS_PER_BEAT,
            two = DIALOGUE_WORDS_PER_BEAT * 2,
            three = DIALOGUE_WORDS_PER_BEAT * 3,
            language = self.config.dialogue_language(),
            titles = TITLE_COUNT,
            thumbs = THUMBNAIL_PROMPT_COUNT,
            per_minute = LengthMode::SCENES_PER_MINUTE,
        )
    }
}

fn overlay(theme: &Theme) -> Option<&'static str> {
    match theme {
        Theme::SourceFidelity => Some(SOURCE_FIDELITY_OVERLAY),
        Theme::ChildSafe => Some(CHILD_SAFE_OVERLAY),
        Theme::Custom(_) => None,
    }
}

fn seo_guidance(instructions: &SeoInstructions) -> String {
    format!(
        "Title instructions: {}\nDescription instructions: {}\nThumbnail instructions: {}\n",
        instructions.title_or_default(),
        instructions.description_or_default(),
        instructions.thumbnail_or_default()
    )
}

fn cardinality_note(field: SeoField) -> String {
    match field {
        SeoField::Titles => format!(" Return exactly {} titles.", TITLE_COUNT),
        SeoField::ThumbnailPrompts => {
            format!(" Return exactly {} prompts, in English.", THUMBNAIL_PROMPT_COUNT)
        }
        SeoField::Tags | SeoField::Description => String::new(),
    }
}
