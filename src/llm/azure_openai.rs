use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::provider::{ChatProvider, EmbeddingProvider};
use super::types::ChatRequest;
use crate::core::config::ServiceSettings;
use crate::core::errors::ProviderError;

const EMBEDDING_SERVICE: &str = "embedding service";
const CHAT_SERVICE: &str = "generation service";

/// Client for one Azure OpenAI deployment.
///
/// Embeddings and chat completions usually live on separate resources, so the
/// pipeline holds two instances built from different [`ServiceSettings`].
#[derive(Clone)]
pub struct AzureOpenAiProvider {
    base_url: String,
    api_key: String,
    api_version: String,
    deployment: String,
    client: Client,
}

impl AzureOpenAiProvider {
    pub fn new(settings: &ServiceSettings) -> Self {
        Self::with_client(settings, Client::new())
    }

    pub fn with_client(settings: &ServiceSettings, client: Client) -> Self {
        Self {
            base_url: settings.endpoint.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            api_version: settings.api_version.clone(),
            deployment: settings.model.clone(),
            client,
        }
    }

    fn deployment_url(&self, operation: &str) -> String {
        format!(
            "{}/openai/deployments/{}/{}?api-version={}",
            self.base_url, self.deployment, operation, self.api_version
        )
    }

    async fn post(
        &self,
        service: &'static str,
        url: &str,
        body: &Value,
    ) -> Result<Value, ProviderError> {
        let res = self
            .client
            .post(url)
            .header("api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(ProviderError::transport(service))?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                service,
                status,
                body,
            });
        }

        res.json().await.map_err(ProviderError::transport(service))
    }
}

#[async_trait]
impl EmbeddingProvider for AzureOpenAiProvider {
    fn name(&self) -> &str {
        "azure_openai"
    }

    fn model(&self) -> &str {
        &self.deployment
    }

    async fn embed(&self, input: &str) -> Result<Vec<f32>, ProviderError> {
        let url = self.deployment_url("embeddings");
        let body = json!({
            "model": self.deployment,
            "input": input,
        });

        let payload = self.post(EMBEDDING_SERVICE, &url, &body).await?;

        let values = payload["data"][0]["embedding"].as_array().ok_or_else(|| {
            ProviderError::invalid(EMBEDDING_SERVICE, "missing data[0].embedding")
        })?;

        values
            .iter()
            .map(|v| {
                v.as_f64().map(|f| f as f32).ok_or_else(|| {
                    ProviderError::invalid(EMBEDDING_SERVICE, "non-numeric embedding value")
                })
            })
            .collect()
    }
}

#[async_trait]
impl ChatProvider for AzureOpenAiProvider {
    fn name(&self) -> &str {
        "azure_openai"
    }

    fn model(&self) -> &str {
        &self.deployment
    }

    async fn chat(&self, request: ChatRequest) -> Result<String, ProviderError> {
        let url = self.deployment_url("chat/completions");

        let mut body = json!({
            "model": self.deployment,
            "messages": request.messages,
        });

        if let Some(obj) = body.as_object_mut() {
            if let Some(t) = request.max_tokens { obj.insert("max_tokens".to_string(), json!(t)); }
            if let Some(t) = request.temperature { obj.insert("temperature".to_string(), json!(t)); }
            if let Some(t) = request.top_p { obj.insert("top_p".to_string(), json!(t)); }
        }

        let payload = self.post(CHAT_SERVICE, &url, &body).await?;

        payload["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                ProviderError::invalid(CHAT_SERVICE, "missing choices[0].message.content")
            })
    }
}
