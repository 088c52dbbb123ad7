use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::{HybridQuery, SearchHit, SearchIndex};
use crate::core::config::SearchSettings;
use crate::core::errors::ProviderError;

const SEARCH_SERVICE: &str = "search service";

/// REST client for an Azure AI Search index.
#[derive(Clone)]
pub struct AzureSearchClient {
    base_url: String,
    index_name: String,
    api_key: String,
    api_version: String,
    client: Client,
}

impl AzureSearchClient {
    pub fn new(settings: &SearchSettings) -> Self {
        Self::with_client(settings, Client::new())
    }

    pub fn with_client(settings: &SearchSettings, client: Client) -> Self {
        Self {
            base_url: settings.endpoint.trim_end_matches('/').to_string(),
            index_name: settings.index_name.clone(),
            api_key: settings.api_key.clone(),
            api_version: settings.api_version.clone(),
            client,
        }
    }

    fn search_url(&self) -> String {
        format!(
            "{}/indexes/{}/docs/search?api-version={}",
            self.base_url, self.index_name, self.api_version
        )
    }
}

fn request_body(query: &HybridQuery) -> Value {
    json!({
        "search": query.text,
        "vectorQueries": [{
            "kind": "vector",
            "vector": query.vector,
            "k": query.k,
            "fields": query.vector_field,
        }],
        "select": query.select.join(","),
    })
}

#[async_trait]
impl SearchIndex for AzureSearchClient {
    fn name(&self) -> &str {
        "azure_search"
    }

    async fn hybrid_search(&self, query: HybridQuery) -> Result<Vec<SearchHit>, ProviderError> {
        let res = self
            .client
            .post(self.search_url())
            .header("api-key", &self.api_key)
            .json(&request_body(&query))
            .send()
            .await
            .map_err(ProviderError::transport(SEARCH_SERVICE))?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                service: SEARCH_SERVICE,
                status,
                body,
            });
        }

        let payload: Value = res
            .json()
            .await
            .map_err(ProviderError::transport(SEARCH_SERVICE))?;

        let items = payload
            .get("value")
            .and_then(|v| v.as_array())
            .ok_or_else(|| ProviderError::invalid(SEARCH_SERVICE, "missing `value` array"))?;

        Ok(items
            .iter()
            .filter_map(|item| item.as_object().cloned())
            .collect())
    }
}
