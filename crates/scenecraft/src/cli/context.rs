//! Wiring from configuration to stores, engines and orchestrators.

use scenecraft::{
    CredentialStore, FileCredentialStore, GeminiClient, GenerationGateway, JsonFileHistoryStore,
    RegenerationOrchestrator, ScenecraftConfig, ScenecraftResult, ScriptOrchestrator, Workspace,
    normalize,
};
use std::path::Path;
use std::sync::Arc;

/// Everything a command handler needs, built once per invocation.
pub struct AppContext {
    config: ScenecraftConfig,
    credentials: Arc<FileCredentialStore>,
    history: Arc<JsonFileHistoryStore>,
}

impl AppContext {
    /// Load configuration and resolve storage locations.
    pub fn load(config_path: Option<&Path>) -> ScenecraftResult<Self> {
        let config = match config_path {
            Some(path) => ScenecraftConfig::from_file(path)?,
            None => ScenecraftConfig::load()?,
        };
        let credentials = Arc::new(FileCredentialStore::new(
            config.storage.credential_path()?,
        ));
        let history = Arc::new(JsonFileHistoryStore::new(config.storage.history_path()?));

        Ok(Self {
            config,
            credentials,
            history,
        })
    }

    /// Saved credential store.
    pub fn credentials(&self) -> Arc<dyn CredentialStore> {
        self.credentials.clone()
    }

    /// Open the persisted history into a fresh workspace.
    pub async fn workspace(&self) -> ScenecraftResult<Workspace> {
        Ok(Workspace::open(self.history.clone()).await?)
    }

    fn gateway(&self) -> ScenecraftResult<GenerationGateway> {
        let client = Arc::new(GeminiClient::new(self.config.gemini.clone()).map_err(normalize)?);
        Ok(
            GenerationGateway::new(client.clone(), client, self.credentials())
                .with_image_options(self.config.image.clone()),
        )
    }

    /// Script and image orchestrator configured from the pipeline settings.
    pub fn script_orchestrator(&self) -> ScenecraftResult<ScriptOrchestrator> {
        Ok(ScriptOrchestrator::with_config(
            self.gateway()?,
            self.config.pipeline.clone(),
        ))
    }

    /// SEO field orchestrator configured from the pipeline settings.
    pub fn regeneration_orchestrator(&self) -> ScenecraftResult<RegenerationOrchestrator> {
        Ok(RegenerationOrchestrator::with_config(
            self.gateway()?,
            self.config.pipeline.clone(),
        ))
    }
}
