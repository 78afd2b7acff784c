//! Live Gemini calls. Run with `--features api` and `GEMINI_API_KEY` set.

use scenecraft_core::{ApiKey, ImageRequest, TextRequest};
use scenecraft_interface::{ImageEngine, TextEngine};
use scenecraft_models::{GeminiClient, GeminiConfig};
use serde_json::json;
use std::env;

fn live_key() -> ApiKey {
    let _ = dotenvy::dotenv();
    let raw = env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY must be set for API tests");
    ApiKey::parse(&raw).expect("GEMINI_API_KEY must not be blank")
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_gemini_structured_generation() -> anyhow::Result<()> {
    let client = GeminiClient::new(GeminiConfig::default())?;

    let request = TextRequest::builder()
        .system_instruction("Reply with JSON only.")
        .user_query("List two primary colors.")
        .schema(json!({
            "type": "OBJECT",
            "properties": {"colors": {"type": "ARRAY", "items": {"type": "STRING"}}},
            "required": ["colors"]
        }))
        .build()
        .map_err(anyhow::Error::msg)?;

    let text = client.generate_text(&live_key(), &request).await?;
    let value: serde_json::Value = serde_json::from_str(&text)?;
    assert!(value["colors"].is_array());
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_imagen_generation() -> anyhow::Result<()> {
    let client = GeminiClient::new(GeminiConfig::default())?;

    let request = ImageRequest::builder()
        .prompt("Concept art of a lighthouse in a storm, cinematic")
        .build()
        .map_err(anyhow::Error::msg)?;

    let images = client.generate_images(&live_key(), &request).await?;
    assert!(!images.is_empty());
    assert!(!images[0].is_empty());
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_invalid_key_is_permanent_api_error() -> anyhow::Result<()> {
    let client = GeminiClient::new(GeminiConfig::default())?;
    let key = ApiKey::parse("not-a-real-key").expect("non-blank");

    let request = TextRequest::builder()
        .system_instruction("Reply with JSON only.")
        .user_query("Say hi.")
        .schema(json!({"type": "OBJECT", "properties": {"hi": {"type": "STRING"}}}))
        .build()
        .map_err(anyhow::Error::msg)?;

    let err = client
        .generate_text(&key, &request)
        .await
        .expect_err("invalid key must fail");
    assert!(!err.kind.is_overloaded());
    Ok(())
}
