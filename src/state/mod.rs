use std::sync::Arc;

use crate::core::config::{AppPaths, ConfigService, ServerSettings};
use crate::llm::AzureOpenAiProvider;
use crate::rag::RagPipeline;
use crate::search::AzureSearchClient;

pub mod error;

use error::InitializationError;

/// Application state shared across all routes.
///
/// The pipeline owns the service clients; nothing here changes after startup.
#[derive(Clone)]
pub struct AppState {
    pub paths: Arc<AppPaths>,
    pub config: ConfigService,
    pub pipeline: Arc<RagPipeline>,
    pub server: ServerSettings,
}

impl AppState {
    /// Loads configuration and wires the three external services into the pipeline.
    pub fn initialize(paths: Arc<AppPaths>) -> Result<Arc<Self>, InitializationError> {
        let config = ConfigService::new(paths.clone());
        let app_config = config.app_config()?;
        app_config.require_services()?;

        // One connection pool shared by all three clients.
        let client = reqwest::Client::builder()
            .build()
            .map_err(InitializationError::HttpClient)?;

        let embeddings = Arc::new(AzureOpenAiProvider::with_client(
            &app_config.embedding,
            client.clone(),
        ));
        let chat = Arc::new(AzureOpenAiProvider::with_client(
            &app_config.generation,
            client.clone(),
        ));
        let index = Arc::new(AzureSearchClient::with_client(&app_config.search, client));

        tracing::info!(
            embedding_model = %app_config.embedding.model,
            generation_model = %app_config.generation.model,
            index = %app_config.search.index_name,
            top_k = app_config.rag.top_k,
            max_context_chars = app_config.rag.max_context_chars,
            "RAG pipeline configured"
        );

        let pipeline = RagPipeline::new(embeddings, index, chat, &app_config.rag);
        Ok(Self::from_parts(paths, pipeline, app_config.server))
    }

    pub fn from_parts(
        paths: Arc<AppPaths>,
        pipeline: RagPipeline,
        server: ServerSettings,
    ) -> Arc<Self> {
        let config = ConfigService::new(paths.clone());
        Arc::new(AppState {
            paths,
            config,
            pipeline: Arc::new(pipeline),
            server,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn initialize_wires_pipeline_from_config_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("config.yml"),
            "embedding:\n  endpoint: https://embed.openai.azure.com\n\
             generation:\n  endpoint: https://chat.openai.azure.com\n\
             search:\n  endpoint: https://legal.search.windows.net\n  index_name: statutes\n\
             server:\n  allowed_origins: [\"http://localhost:8501\"]\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("secrets.yaml"),
            "embedding:\n  api_key: a\ngeneration:\n  api_key: b\nsearch:\n  api_key: c\n",
        )
        .unwrap();

        let state = AppState::initialize(Arc::new(AppPaths::from_root(dir.path()))).unwrap();

        assert_eq!(state.server.host, "127.0.0.1");
        assert_eq!(state.server.allowed_origins, vec!["http://localhost:8501"]);
    }
}
