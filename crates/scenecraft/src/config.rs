//! Layered application configuration.
//!
//! Sources, lowest to highest precedence:
//! - Bundled defaults (include_str! from scenecraft.toml)
//! - `~/.config/scenecraft/scenecraft.toml`
//! - `./scenecraft.toml`
//! - `SCENECRAFT__SECTION__KEY` environment variables (a `.env` file is read first)

use config::{Config, Environment, File, FileFormat};
use scenecraft_error::{ConfigError, ScenecraftError, ScenecraftResult};
use scenecraft_pipeline::{ImageOptions, PipelineConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

#[cfg(feature = "gemini")]
use scenecraft_models::GeminiConfig;

const DEFAULT_CONFIG: &str = include_str!("../../../scenecraft.toml");

/// Where credentials and history are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// History file; defaults to `<data dir>/scenecraft/history.json`
    pub history_path: Option<PathBuf>,
    /// Credential file; defaults to `<config dir>/scenecraft/credentials`
    pub credential_path: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolved history file path.
    pub fn history_path(&self) -> ScenecraftResult<PathBuf> {
        resolve(&self.history_path, dirs::data_dir(), "history.json")
    }

    /// Resolved credential file path.
    pub fn credential_path(&self) -> ScenecraftResult<PathBuf> {
        resolve(&self.credential_path, dirs::config_dir(), "credentials")
    }
}

fn resolve(
    explicit: &Option<PathBuf>,
    base: Option<PathBuf>,
    file_name: &str,
) -> ScenecraftResult<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.clone());
    }
    base.map(|dir| dir.join("scenecraft").join(file_name))
        .ok_or_else(|| {
            ScenecraftError::from(ConfigError::new(format!(
                "No platform directory for {}; set it under [storage]",
                file_name
            )))
        })
}

/// Top-level scenecraft configuration.
///
/// # Example
///
/// ```no_run
/// use scenecraft::ScenecraftConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ScenecraftConfig::load()?;
/// println!("dialogue in {}", config.pipeline.dialogue_language());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenecraftConfig {
    /// Gemini endpoint, models and retry policy
    #[cfg(feature = "gemini")]
    pub gemini: GeminiConfig,
    /// Concept image settings
    pub image: ImageOptions,
    /// Prompt and contract settings
    pub pipeline: PipelineConfig,
    /// Credential and history locations
    pub storage: StorageConfig,
}

impl ScenecraftConfig {
    /// Load configuration from a specific file path, over the bundled
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> ScenecraftResult<Self> {
        debug!("Loading configuration from file");

        let config = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                ))
            })?;
        Self::finish(config)
    }

    /// Load configuration with precedence: environment > current dir >
    /// home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if not found.
    pub fn load() -> ScenecraftResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");
        dotenvy::dotenv().ok();

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/scenecraft/scenecraft.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("scenecraft").required(false))
            .add_source(
                Environment::with_prefix("SCENECRAFT")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?;
        Self::finish(config)
    }

    fn finish(config: Config) -> ScenecraftResult<Self> {
        let parsed: Self = config
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;
        parsed.validate()?;
        Ok(parsed)
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> ScenecraftResult<()> {
        if *self.image.count() == 0 {
            return Err(ConfigError::new("image.count must be at least 1").into());
        }
        if self.image.aspect_ratio().trim().is_empty() {
            return Err(ConfigError::new("image.aspect_ratio must not be empty").into());
        }
        if *self.pipeline.generation_attempts() == 0 {
            return Err(ConfigError::new("pipeline.generation_attempts must be at least 1").into());
        }
        if self.pipeline.dialogue_language().trim().is_empty() {
            return Err(ConfigError::new("pipeline.dialogue_language must not be empty").into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_defaults_match_code_defaults() {
        let config = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .expect("bundled config");
        let parsed = ScenecraftConfig::finish(config).expect("valid defaults");
        assert_eq!(parsed, ScenecraftConfig::default());
    }

    #[test]
    fn test_explicit_storage_paths_win() {
        let storage = StorageConfig {
            history_path: Some(PathBuf::from("/tmp/h.json")),
            credential_path: None,
        };
        assert_eq!(
            storage.history_path().expect("path"),
            PathBuf::from("/tmp/h.json")
        );
    }
}
