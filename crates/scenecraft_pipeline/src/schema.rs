//! Versioned response schemas and structural validation.
//!
//! Schemas are written in the engine's OpenAPI subset (`OBJECT`, `ARRAY`,
//! `STRING`) so the same object is sent as the response schema and used to
//! validate what comes back.

use crate::extraction::{extract_json, parse_json};
use scenecraft_core::{Script, SeoField, SeoPatch};
use scenecraft_error::{GenerationError, GenerationErrorKind, GenerationResult};
use serde_json::{Value, json};
use std::sync::LazyLock;

/// Version of the document shapes below. Bump on any shape change.
pub const SCHEMA_VERSION: u32 = 1;

fn string_list() -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" }, "minItems": 1 })
}

fn seo_property(field: SeoField) -> Value {
    match field {
        SeoField::Description => json!({ "type": "STRING" }),
        SeoField::Titles | SeoField::ThumbnailPrompts | SeoField::Tags => string_list(),
    }
}

static FULL_SCRIPT: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "type": "OBJECT",
        "properties": {
            "characters": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "descriptor": { "type": "STRING" }
                    },
                    "required": ["name", "descriptor"]
                }
            },
            "scenes": {
                "type": "ARRAY",
                "minItems": 1,
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "label": { "type": "STRING" },
                        "dialogue": { "type": "STRING" },
                        "details": {
                            "type": "ARRAY",
                            "minItems": 1,
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "storyBeat": { "type": "STRING" },
                                    "imagePrompt": { "type": "STRING" },
                                    "videoPrompt": { "type": "STRING" }
                                },
                                "required": ["storyBeat", "imagePrompt", "videoPrompt"]
                            }
                        }
                    },
                    "required": ["label", "dialogue", "details"]
                }
            },
            "seo": {
                "type": "OBJECT",
                "properties": {
                    "titles": seo_property(SeoField::Titles),
                    "description": seo_property(SeoField::Description),
                    "thumbnailPrompts": seo_property(SeoField::ThumbnailPrompts),
                    "tags": seo_property(SeoField::Tags)
                },
                "required": ["titles", "description", "thumbnailPrompts", "tags"]
            }
        },
        "required": ["characters", "scenes", "seo"]
    })
});

static SEO_FIELDS: LazyLock<[Value; 4]> = LazyLock::new(|| {
    [
        SeoField::Titles,
        SeoField::Description,
        SeoField::ThumbnailPrompts,
        SeoField::Tags,
    ]
    .map(|field| {
        json!({
            "type": "OBJECT",
            "properties": { field.key(): seo_property(field) },
            "required": [field.key()]
        })
    })
});

/// A document variant the engine can be asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaContract {
    /// Characters, scenes and the SEO bundle
    FullScript,
    /// A single SEO key wrapped in an object, e.g. `{"tags": [...]}`
    SeoField(SeoField),
}

impl SchemaContract {
    /// Schema version this contract belongs to.
    pub fn version(&self) -> u32 {
        SCHEMA_VERSION
    }

    /// The response schema sent to the engine.
    pub fn schema(&self) -> &'static Value {
        match self {
            SchemaContract::FullScript => &FULL_SCRIPT,
            SchemaContract::SeoField(field) => {
                let index = match field {
                    SeoField::Titles => 0,
                    SeoField::Description => 1,
                    SeoField::ThumbnailPrompts => 2,
                    SeoField::Tags => 3,
                };
                &SEO_FIELDS[index]
            }
        }
    }

    /// Check `value` against the schema.
    ///
    /// Every mismatch is collected and reported together, each prefixed
    /// with its JSON path.
    ///
    /// # Errors
    ///
    /// Returns a `SchemaViolation` listing the mismatches.
    ///
    /// # Examples
    ///
    /// ```
    /// use scenecraft_core::SeoField;
    /// use scenecraft_pipeline::SchemaContract;
    /// use serde_json::json;
    ///
    /// let contract = SchemaContract::SeoField(SeoField::Tags);
    /// assert!(contract.validate(&json!({"tags": ["storm"]})).is_ok());
    ///
    /// let err = contract.validate(&json!({"tags": "storm"})).unwrap_err();
    /// assert!(err.message().contains("$.tags"));
    /// ```
    pub fn validate(&self, value: &Value) -> GenerationResult<()> {
        let mut problems = Vec::new();
        check_node(self.schema(), value, "$", &mut problems);

        if problems.is_empty() {
            Ok(())
        } else {
            Err(GenerationError::new(GenerationErrorKind::SchemaViolation(
                problems.join("; "),
            )))
        }
    }

    /// Extract, validate and deserialize a full script from raw engine text.
    ///
    /// # Errors
    ///
    /// Returns a `SchemaViolation` if the text holds no JSON, the JSON breaks
    /// the schema, or it cannot be decoded into a [`Script`].
    pub fn parse_script(raw: &str) -> GenerationResult<Script> {
        let json = extract_json(raw)?;
        let value: Value = parse_json(&json)?;
        SchemaContract::FullScript.validate(&value)?;
        parse_json_value(value)
    }

    /// Extract, validate and deserialize a single-field SEO fragment.
    ///
    /// # Errors
    ///
    /// Returns a `SchemaViolation` if the text holds no JSON or the fragment
    /// does not match the field's schema.
    pub fn parse_patch(field: SeoField, raw: &str) -> GenerationResult<SeoPatch> {
        let json = extract_json(raw)?;
        let mut value: Value = parse_json(&json)?;
        SchemaContract::SeoField(field).validate(&value)?;

        let inner = value
            .get_mut(field.key())
            .map(Value::take)
            .unwrap_or(Value::Null);

        Ok(match field {
            SeoField::Titles => SeoPatch::Titles(parse_json_value(inner)?),
            SeoField::Description => SeoPatch::Description(parse_json_value(inner)?),
            SeoField::ThumbnailPrompts => SeoPatch::ThumbnailPrompts(parse_json_value(inner)?),
            SeoField::Tags => SeoPatch::Tags(parse_json_value(inner)?),
        })
    }
}

fn parse_json_value<T: serde::de::DeserializeOwned>(value: Value) -> GenerationResult<T> {
    serde_json::from_value(value).map_err(|e| {
        GenerationError::new(GenerationErrorKind::SchemaViolation(format!(
            "failed to decode response: {}",
            e
        )))
    })
}

fn min_items(schema: &Value) -> Option<usize> {
    match schema.get("minItems")? {
        Value::Number(n) => n.as_u64().map(|n| n as usize),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn check_node(schema: &Value, value: &Value, path: &str, problems: &mut Vec<String>) {
    match schema.get("type").and_then(Value::as_str) {
        Some("OBJECT") => {
            let Some(object) = value.as_object() else {
                problems.push(format!("{path}: expected an object"));
                return;
            };
            if let Some(required) = schema.get("required").and_then(Value::as_array) {
                for key in required.iter().filter_map(Value::as_str) {
                    if !object.contains_key(key) {
                        problems.push(format!("{path}.{key}: missing required key"));
                    }
                }
            }
            if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
                for (key, sub_schema) in properties {
                    if let Some(child) = object.get(key) {
                        check_node(sub_schema, child, &format!("{path}.{key}"), problems);
                    }
                }
            }
        }
        Some("ARRAY") => {
            let Some(items) = value.as_array() else {
                problems.push(format!("{path}: expected an array"));
                return;
            };
            let min = min_items(schema).unwrap_or(0);
            if items.len() < min {
                problems.push(format!(
                    "{path}: expected at least {min} item(s), found {}",
                    items.len()
                ));
            }
            if let Some(item_schema) = schema.get("items") {
                for (i, item) in items.iter().enumerate() {
                    check_node(item_schema, item, &format!("{path}[{i}]"), problems);
                }
            }
        }
        Some("STRING") => {
            if !value.is_string() {
                problems.push(format!("{path}: expected a string"));
            }
        }
        _ => {}
    }
}
