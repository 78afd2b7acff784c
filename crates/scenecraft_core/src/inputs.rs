//! User inputs that drive one generation run.

use scenecraft_error::{BuilderError, BuilderErrorKind};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Title guidance used when the user gives none.
pub const DEFAULT_TITLE_INSTRUCTION: &str = "Default: spark curiosity and be impactful.";

/// Description guidance used when the user gives none.
pub const DEFAULT_DESCRIPTION_INSTRUCTION: &str =
    "Default: summarize the story and add a call to action.";

/// Thumbnail guidance used when the user gives none.
pub const DEFAULT_THUMBNAIL_INSTRUCTION: &str = "Default: vibrant colors, show emotion.";

/// Visual style catalogue offered to the user.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum VisualStyle {
    /// Cinematic
    #[default]
    #[display("Cinematic")]
    Cinematic,
    /// Hyper-realistic
    #[display("Hyper-realistic")]
    Hyperrealistic,
    /// Ultra realistic 8k
    #[display("Ultra Realistic 8k")]
    #[serde(rename = "ultra-realistic-8k")]
    UltraRealistic8k,
    /// Feature animation
    #[display("Animated feature (Pixar style)")]
    AnimatedFeature,
    /// CGI ultra-realistic
    #[display("CGI Ultra-realistic")]
    CgiUltraRealistic,
    /// Cyberpunk
    #[display("Cyberpunk")]
    Cyberpunk,
    /// Epic fantasy
    #[display("Epic Fantasy (LOTR)")]
    EpicFantasy,
    /// Classic noir
    #[display("Classic Noir")]
    ClassicNoir,
    /// Cosmic horror
    #[display("Cosmic Horror (Lovecraft)")]
    CosmicHorror,
}

impl VisualStyle {
    /// Short identifier accepted on the command line.
    pub fn slug(&self) -> &'static str {
        match self {
            VisualStyle::Cinematic => "cinematic",
            VisualStyle::Hyperrealistic => "hyperrealistic",
            VisualStyle::UltraRealistic8k => "ultra-realistic-8k",
            VisualStyle::AnimatedFeature => "animated-feature",
            VisualStyle::CgiUltraRealistic => "cgi-ultra-realistic",
            VisualStyle::Cyberpunk => "cyberpunk",
            VisualStyle::EpicFantasy => "epic-fantasy",
            VisualStyle::ClassicNoir => "classic-noir",
            VisualStyle::CosmicHorror => "cosmic-horror",
        }
    }
}

impl FromStr for VisualStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use strum::IntoEnumIterator;

        let wanted = s.trim();
        VisualStyle::iter()
            .find(|style| {
                style.slug().eq_ignore_ascii_case(wanted)
                    || style.to_string().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("unknown visual style '{}'", s))
    }
}

/// Unified length model.
///
/// Only `Video` fixes the scene count; the other modes are passed to the
/// engine as a duration label.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "kebab-case", tag = "mode")]
pub enum LengthMode {
    /// Short story
    #[default]
    #[display("Short")]
    Short,
    /// Medium story
    #[display("Medium")]
    Medium,
    /// Long story
    #[display("Long")]
    Long,
    /// Video script with ten scenes per minute
    #[display("Video ({} min)", minutes)]
    Video {
        /// Requested duration in minutes, at least 1
        minutes: u32,
    },
}

impl LengthMode {
    /// Scenes per requested minute in video mode.
    pub const SCENES_PER_MINUTE: u32 = 10;

    /// Contractual scene count, only defined for video mode.
    ///
    /// # Examples
    ///
    /// ```
    /// use scenecraft_core::LengthMode;
    ///
    /// assert_eq!(LengthMode::Video { minutes: 3 }.required_scene_count(), Some(30));
    /// assert_eq!(LengthMode::Video { minutes: 0 }.required_scene_count(), Some(10));
    /// assert_eq!(LengthMode::Long.required_scene_count(), None);
    /// ```
    pub fn required_scene_count(&self) -> Option<usize> {
        match self {
            LengthMode::Video { minutes } => Some(
                minutes
                    .saturating_mul(Self::SCENES_PER_MINUTE)
                    .max(Self::SCENES_PER_MINUTE) as usize,
            ),
            _ => None,
        }
    }

    /// Build a length mode from a CLI label and optional minute count.
    ///
    /// Video mode requires a minute count of at least one.
    pub fn from_label(label: &str, minutes: Option<u32>) -> Result<Self, String> {
        match label.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(LengthMode::Short),
            "medium" => Ok(LengthMode::Medium),
            "long" => Ok(LengthMode::Long),
            "video" => match minutes {
                Some(minutes) if minutes >= 1 => Ok(LengthMode::Video { minutes }),
                Some(_) => Err("video length needs at least 1 minute".to_string()),
                None => Err("video length needs a minute count (--minutes)".to_string()),
            },
            other => Err(format!(
                "unknown length '{}' (expected short, medium, long or video)",
                other
            )),
        }
    }
}

/// Optional thematic overlay on the base rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    /// Biblical drama with strict fidelity to the source text
    #[display("Biblical Story")]
    SourceFidelity,
    /// Children's fairy tale
    #[display("Children's Fairy Tale")]
    ChildSafe,
    /// Any other theme, passed through as a label without an overlay
    #[display("{}", _0)]
    Custom(String),
}

impl Theme {
    /// Recognise a theme label, in English or Portuguese.
    ///
    /// # Examples
    ///
    /// ```
    /// use scenecraft_core::Theme;
    ///
    /// assert_eq!(Theme::from_label("História Bíblica"), Theme::SourceFidelity);
    /// assert_eq!(Theme::from_label("fairy-tale"), Theme::ChildSafe);
    /// assert_eq!(Theme::from_label("Space opera"), Theme::Custom("Space opera".into()));
    /// ```
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        match trimmed.to_lowercase().as_str() {
            "biblical" | "biblical story" | "source-fidelity" | "história bíblica" => {
                Theme::SourceFidelity
            }
            "fairy-tale" | "children's fairy tale" | "child-safe" | "conto de fadas infantil" => {
                Theme::ChildSafe
            }
            _ => Theme::Custom(trimmed.to_string()),
        }
    }
}

/// Free-text guidance for the three instructable SEO keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SeoInstructions {
    /// Guidance for titles
    pub title: String,
    /// Guidance for the description
    pub description: String,
    /// Guidance for thumbnail prompts
    pub thumbnail: String,
}

impl SeoInstructions {
    fn or_default<'a>(value: &'a str, default: &'static str) -> &'a str {
        if value.trim().is_empty() {
            default
        } else {
            value.trim()
        }
    }

    /// Title guidance, falling back to the default when blank.
    pub fn title_or_default(&self) -> &str {
        Self::or_default(&self.title, DEFAULT_TITLE_INSTRUCTION)
    }

    /// Description guidance, falling back to the default when blank.
    pub fn description_or_default(&self) -> &str {
        Self::or_default(&self.description, DEFAULT_DESCRIPTION_INSTRUCTION)
    }

    /// Thumbnail guidance, falling back to the default when blank.
    pub fn thumbnail_or_default(&self) -> &str {
        Self::or_default(&self.thumbnail, DEFAULT_THUMBNAIL_INSTRUCTION)
    }
}

/// Everything the user supplies for one generation run.
///
/// # Examples
///
/// ```
/// use scenecraft_core::{LengthMode, StoryInputs, VisualStyle};
///
/// let inputs = StoryInputs::builder()
///     .story_idea("David and Goliath")
///     .visual_style(VisualStyle::EpicFantasy)
///     .length(LengthMode::Video { minutes: 2 })
///     .build()
///     .unwrap();
///
/// assert_eq!(inputs.length().required_scene_count(), Some(20));
/// assert!(inputs.project_name().is_empty());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into), build_fn(private, name = "build_internal"))]
pub struct StoryInputs {
    /// Optional project name, used as the session title
    #[builder(default)]
    project_name: String,
    /// Story premise
    story_idea: String,
    /// Visual style
    #[builder(default)]
    visual_style: VisualStyle,
    /// Length mode
    #[builder(default)]
    length: LengthMode,
    /// Optional thematic overlay
    #[builder(default)]
    theme: Option<Theme>,
    /// SEO guidance
    #[builder(default)]
    instructions: SeoInstructions,
}

impl StoryInputs {
    /// Create a new builder.
    pub fn builder() -> StoryInputsBuilder {
        StoryInputsBuilder::default()
    }
}

impl StoryInputsBuilder {
    /// Build the inputs.
    ///
    /// # Errors
    ///
    /// Returns an error if the story idea was never set.
    pub fn build(&self) -> Result<StoryInputs, BuilderError> {
        self.build_internal()
            .map_err(|e| BuilderError::new(BuilderErrorKind::MissingField(e.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_style_parses_from_its_slug_and_label() {
        for style in VisualStyle::iter() {
            assert_eq!(style.slug().parse::<VisualStyle>(), Ok(style));
            assert_eq!(style.to_string().parse::<VisualStyle>(), Ok(style));
        }
    }

    #[test]
    fn test_video_scene_count_floor() {
        assert_eq!(
            LengthMode::Video { minutes: 1 }.required_scene_count(),
            Some(10)
        );
        assert_eq!(
            LengthMode::Video { minutes: 12 }.required_scene_count(),
            Some(120)
        );
        assert_eq!(LengthMode::Short.required_scene_count(), None);
    }

    #[test]
    fn test_length_from_label() {
        assert_eq!(
            LengthMode::from_label("Video", Some(4)),
            Ok(LengthMode::Video { minutes: 4 })
        );
        assert_eq!(LengthMode::from_label("medium", None), Ok(LengthMode::Medium));
        assert!(LengthMode::from_label("epic", None).is_err());
    }

    #[test]
    fn test_video_label_requires_minutes() {
        assert!(LengthMode::from_label("video", None).is_err());
        assert!(LengthMode::from_label("video", Some(0)).is_err());
        assert_eq!(
            LengthMode::from_label("video", Some(1)),
            Ok(LengthMode::Video { minutes: 1 })
        );
    }

    #[test]
    fn test_blank_instructions_fall_back_to_defaults() {
        let instructions = SeoInstructions {
            title: "   ".into(),
            description: "Mention the moral".into(),
            thumbnail: String::new(),
        };
        assert_eq!(instructions.title_or_default(), DEFAULT_TITLE_INSTRUCTION);
        assert_eq!(instructions.description_or_default(), "Mention the moral");
        assert_eq!(
            instructions.thumbnail_or_default(),
            DEFAULT_THUMBNAIL_INSTRUCTION
        );
    }

    #[test]
    fn test_builder_requires_story_idea() {
        assert!(StoryInputs::builder().build().is_err());
    }
}
