//! Configuration loading tests.

use scenecraft::{ScenecraftConfig, ScenecraftErrorKind};
use std::io::Write;
use std::path::PathBuf;

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("Failed to create temp config");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp config");
    file
}

#[test]
fn test_file_overrides_bundled_defaults() -> anyhow::Result<()> {
    let file = config_file(
        r#"
[image]
aspect_ratio = "9:16"

[pipeline]
generation_attempts = 4
enforce_visual_dna = false

[storage]
history_path = "/tmp/scenecraft-history.json"
"#,
    );

    let config = ScenecraftConfig::from_file(file.path())?;

    assert_eq!(config.image.aspect_ratio(), "9:16");
    assert_eq!(*config.image.count(), 1);
    assert_eq!(*config.pipeline.generation_attempts(), 4);
    assert!(!*config.pipeline.enforce_visual_dna());
    assert!(*config.pipeline.enforce_dialogue_pacing());
    assert_eq!(
        config.storage.history_path()?,
        PathBuf::from("/tmp/scenecraft-history.json")
    );
    Ok(())
}

#[test]
fn test_empty_file_yields_defaults() -> anyhow::Result<()> {
    let file = config_file("");
    let config = ScenecraftConfig::from_file(file.path())?;
    assert_eq!(config, ScenecraftConfig::default());
    Ok(())
}

#[test]
fn test_zero_image_count_is_rejected() {
    let file = config_file("[image]\ncount = 0\n");

    let err = ScenecraftConfig::from_file(file.path()).unwrap_err();

    assert!(matches!(err.kind(), ScenecraftErrorKind::Config(_)));
    assert!(err.to_string().contains("image.count"));
}

#[test]
fn test_zero_attempts_is_rejected() {
    let file = config_file("[pipeline]\ngeneration_attempts = 0\n");
    assert!(ScenecraftConfig::from_file(file.path()).is_err());
}

#[test]
fn test_missing_file_is_an_error() {
    let result = ScenecraftConfig::from_file("/nonexistent/scenecraft.toml");
    assert!(result.is_err());
}
