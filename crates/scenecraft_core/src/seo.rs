//! SEO sub-fields and the single-field regeneration fragment.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One independently regenerable key of the SEO bundle.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "camelCase")]
pub enum SeoField {
    /// Title candidates
    #[display("titles")]
    Titles,
    /// Video description
    #[display("description")]
    Description,
    /// Thumbnail prompts
    #[display("thumbnailPrompts")]
    ThumbnailPrompts,
    /// Search tags
    #[display("tags")]
    Tags,
}

impl SeoField {
    /// The JSON key of this field inside the `seo` object.
    pub fn key(&self) -> &'static str {
        match self {
            SeoField::Titles => "titles",
            SeoField::Description => "description",
            SeoField::ThumbnailPrompts => "thumbnailPrompts",
            SeoField::Tags => "tags",
        }
    }

    /// Whether the field holds a list of strings rather than a single string.
    pub fn is_list(&self) -> bool {
        !matches!(self, SeoField::Description)
    }
}

impl FromStr for SeoField {
    type Err = String;

    /// Accepts the camelCase wire key as well as kebab and snake spellings.
    ///
    /// # Examples
    ///
    /// ```
    /// use scenecraft_core::SeoField;
    ///
    /// assert_eq!("thumbnail-prompts".parse::<SeoField>(), Ok(SeoField::ThumbnailPrompts));
    /// assert_eq!("thumbnail_prompts".parse::<SeoField>(), Ok(SeoField::ThumbnailPrompts));
    /// assert_eq!("Tags".parse::<SeoField>(), Ok(SeoField::Tags));
    /// assert!("scenes".parse::<SeoField>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "titles" => Ok(SeoField::Titles),
            "description" => Ok(SeoField::Description),
            "thumbnailprompts" | "thumbnails" => Ok(SeoField::ThumbnailPrompts),
            "tags" => Ok(SeoField::Tags),
            _ => Err(format!(
                "unknown SEO field '{}' (expected titles, description, thumbnail-prompts or tags)",
                s
            )),
        }
    }
}

/// Replacement value for exactly one SEO key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SeoPatch {
    /// New title candidates
    Titles(Vec<String>),
    /// New description
    Description(String),
    /// New thumbnail prompts
    ThumbnailPrompts(Vec<String>),
    /// New tags
    Tags(Vec<String>),
}

impl SeoPatch {
    /// The field this patch replaces.
    pub fn field(&self) -> SeoField {
        match self {
            SeoPatch::Titles(_) => SeoField::Titles,
            SeoPatch::Description(_) => SeoField::Description,
            SeoPatch::ThumbnailPrompts(_) => SeoField::ThumbnailPrompts,
            SeoPatch::Tags(_) => SeoField::Tags,
        }
    }

    /// Number of entries carried (1 for the description).
    pub fn len(&self) -> usize {
        match self {
            SeoPatch::Titles(v) | SeoPatch::ThumbnailPrompts(v) | SeoPatch::Tags(v) => v.len(),
            SeoPatch::Description(_) => 1,
        }
    }

    /// Whether the patch carries no usable content.
    pub fn is_empty(&self) -> bool {
        match self {
            SeoPatch::Titles(v) | SeoPatch::ThumbnailPrompts(v) | SeoPatch::Tags(v) => {
                v.iter().all(|s| s.trim().is_empty())
            }
            SeoPatch::Description(s) => s.trim().is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_display_matches_wire_key() {
        for field in SeoField::iter() {
            assert_eq!(field.to_string(), field.key());
            assert_eq!(field.key().parse::<SeoField>(), Ok(field));
        }
    }

    #[test]
    fn test_serde_uses_wire_key() {
        let json = serde_json::to_string(&SeoField::ThumbnailPrompts).expect("serialize");
        assert_eq!(json, "\"thumbnailPrompts\"");
    }

    #[test]
    fn test_patch_reports_its_field() {
        assert_eq!(SeoPatch::Tags(vec![]).field(), SeoField::Tags);
        assert!(SeoPatch::Tags(vec![" ".into()]).is_empty());
        assert!(!SeoPatch::Description("x".into()).is_empty());
    }
}
