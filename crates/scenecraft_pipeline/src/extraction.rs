//! Utilities for extracting structured data from engine responses.
//!
//! Engines asked for JSON usually return bare JSON, but responses are still
//! seen wrapped in markdown code fences or preceded by prose. Extraction
//! handles those shapes before validation runs.

use scenecraft_error::{GenerationError, GenerationErrorKind, GenerationResult};

/// Extract JSON from a response that may contain markdown or extra text.
///
/// This function tries multiple extraction strategies:
/// 1. The whole response, when it already parses
/// 2. Markdown code blocks: ```json ... ```
/// 3. Balanced braces: { ... }
/// 4. Balanced brackets: [ ... ]
///
/// # Errors
///
/// Returns a `SchemaViolation` if no JSON is found in the response.
///
/// # Examples
///
/// ```
/// use scenecraft_pipeline::extract_json;
///
/// let response = "Here's the script:\n\
///     \n\
///     ```json\n\
///     {\"characters\": [], \"scenes\": []}\n\
///     ```\n";
///
/// let json = extract_json(response).unwrap();
/// assert!(json.starts_with('{'));
/// ```
pub fn extract_json(response: &str) -> GenerationResult<String> {
    let trimmed = response.trim();
    if serde_json::from_str::<serde_json::Value>(trimmed).is_ok() {
        return Ok(trimmed.to_string());
    }

    if let Some(json) = extract_from_code_block(response, "json") {
        return Ok(json);
    }

    let bracket_pos = response.find('[');
    let brace_pos = response.find('{');

    let array = || extract_balanced(response, '[', ']');
    let object = || extract_balanced(response, '{', '}');
    let candidates = match (bracket_pos, brace_pos) {
        (Some(b_pos), Some(c_pos)) if b_pos < c_pos => [array(), object()],
        _ => [object(), array()],
    };

    // Prose such as "draft [v2]" also balances; prefer a span that parses.
    let extracted = candidates
        .iter()
        .flatten()
        .find(|candidate| serde_json::from_str::<serde_json::Value>(candidate).is_ok())
        .or_else(|| candidates.iter().flatten().next())
        .cloned();

    if let Some(json) = extracted {
        return Ok(json);
    }

    tracing::error!(
        response_length = response.len(),
        "No JSON found in engine response"
    );

    Err(GenerationError::new(GenerationErrorKind::SchemaViolation(
        format!("no JSON found in response (length: {})", response.len()),
    )))
}

/// Extract content from markdown code blocks.
///
/// Looks for patterns like:
/// - ```language\n...\n```
/// - ``` ... ``` (no language specified)
fn extract_from_code_block(response: &str, language: &str) -> Option<String> {
    let pattern = format!("```{}", language);

    if let Some(start) = response.find(&pattern) {
        let content_start = start + pattern.len();
        if let Some(end) = response[content_start..].find("```") {
            let content = &response[content_start..content_start + end];
            return Some(content.trim().to_string());
        }
        // Unterminated fence: the response was cut off
        return Some(response[content_start..].trim().to_string());
    }

    if let Some(start) = response.find("```") {
        let content_start = start + 3;
        let skip_to = response[content_start..]
            .find('\n')
            .map(|n| content_start + n + 1)
            .unwrap_or(content_start);

        if let Some(end) = response[skip_to..].find("```") {
            let content = &response[skip_to..skip_to + end];
            return Some(content.trim().to_string());
        }
        return Some(response[skip_to..].trim().to_string());
    }

    None
}

/// Extract content between balanced delimiters.
///
/// Finds the first occurrence of `open` and extracts content up to
/// the matching `close`, handling nesting and string literals.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(response[start..start + i + c.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse JSON into `T`, reporting failures as schema violations.
///
/// # Errors
///
/// Returns a `SchemaViolation` if the JSON string cannot be parsed into `T`.
pub fn parse_json<T>(json_str: &str) -> GenerationResult<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(json_str).map_err(|e| {
        let preview = json_str.chars().take(100).collect::<String>();

        tracing::error!(
            error = %e,
            json_preview = %preview,
            "JSON parsing failed"
        );

        GenerationError::new(GenerationErrorKind::SchemaViolation(format!(
            "failed to parse JSON: {} (JSON: {}...)",
            e, preview
        )))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_json_is_returned_as_is() {
        let json = extract_json("  {\"seo\": {\"tags\": [\"a\"]}}\n").unwrap();
        assert_eq!(json, "{\"seo\": {\"tags\": [\"a\"]}}");
    }

    #[test]
    fn test_extract_json_from_code_block() {
        let response = r#"
Here's the JSON you requested:

```json
{
  "tags": ["storm", "harbor"]
}
```

Hope this helps!
"#;
        let json = extract_json(response).unwrap();
        assert!(json.contains("\"tags\""));
    }

    #[test]
    fn test_extract_json_from_unlabelled_fence() {
        let response = "```\n{\"description\": \"x\"}\n```";
        assert_eq!(extract_json(response).unwrap(), "{\"description\": \"x\"}");
    }

    #[test]
    fn test_extract_json_balanced_braces() {
        let response = r#"Sure! Here it is: {"id": 456, "nested": {"value": "a } b"}} trailing"#;
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.ends_with("}}"));
    }

    #[test]
    fn test_bracketed_prose_before_object_is_skipped() {
        let response = r#"Script (draft [v2]) follows: {"tags": ["storm"]}"#;
        let json = extract_json(response).unwrap();
        assert_eq!(json, r#"{"tags": ["storm"]}"#);
    }

    #[test]
    fn test_leading_array_is_still_preferred() {
        let response = r#"Tags: ["storm", {"k": 1}] done"#;
        assert_eq!(extract_json(response).unwrap(), r#"["storm", {"k": 1}]"#);
    }

    #[test]
    fn test_no_json_found_is_schema_violation() {
        let err = extract_json("This is just plain text").unwrap_err();
        assert!(matches!(err.kind, GenerationErrorKind::SchemaViolation(_)));
    }

    #[test]
    fn test_parse_failure_is_schema_violation() {
        let err = parse_json::<Vec<String>>("{\"not\": \"a list\"}").unwrap_err();
        assert!(matches!(err.kind, GenerationErrorKind::SchemaViolation(_)));
    }
}
