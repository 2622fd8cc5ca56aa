//! Azure-OpenAI-style REST embedding provider.

use std::time::Duration;

use climacheck_core::config::EmbeddingConfig;
use climacheck_core::errors::{ClimacheckError, ClimacheckResult, RemoteServiceError};
use climacheck_core::traits::IEmbeddingProvider;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

const SERVICE: &str = "embedding";

fn not_configured(reason: String) -> ClimacheckError {
    RemoteServiceError::NotConfigured {
        service: SERVICE.into(),
        reason,
    }
    .into()
}

fn request_failed(reason: String) -> ClimacheckError {
    RemoteServiceError::RequestFailed {
        service: SERVICE.into(),
        reason,
    }
    .into()
}

fn invalid_response(reason: String) -> ClimacheckError {
    RemoteServiceError::InvalidResponse {
        service: SERVICE.into(),
        reason,
    }
    .into()
}

/// Connection settings for one embedding deployment.
#[derive(Debug, Clone)]
pub struct HttpEmbeddingSettings {
    pub endpoint: String,
    pub api_key: String,
    pub deployment: String,
    pub api_version: String,
}

impl HttpEmbeddingSettings {
    /// Read the settings from the environment variables named in `config`.
    pub fn from_env(config: &EmbeddingConfig) -> ClimacheckResult<Self> {
        Self::from_lookup(config, |name| std::env::var(name).ok())
    }

    /// Resolve settings through `lookup`. Every value must be present and
    /// non-blank, and the endpoint must use `https://`.
    pub fn from_lookup(
        config: &EmbeddingConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ClimacheckResult<Self> {
        let names = [
            &config.endpoint_env,
            &config.api_key_env,
            &config.deployment_env,
            &config.api_version_env,
        ];
        let values: Vec<Option<String>> = names
            .iter()
            .map(|n| lookup(n.as_str()).filter(|v| !v.trim().is_empty()))
            .collect();
        let missing: Vec<&str> = names
            .iter()
            .zip(&values)
            .filter(|(_, v)| v.is_none())
            .map(|(n, _)| n.as_str())
            .collect();
        if !missing.is_empty() {
            return Err(not_configured(format!(
                "missing environment variables: {}",
                missing.join(", ")
            )));
        }
        let mut values = values.into_iter().flatten();
        let (Some(endpoint), Some(api_key), Some(deployment), Some(api_version)) =
            (values.next(), values.next(), values.next(), values.next())
        else {
            return Err(not_configured("incomplete settings".into()));
        };
        if !endpoint.starts_with("https://") {
            return Err(not_configured(format!("endpoint must use https: {endpoint}")));
        }
        Ok(Self {
            endpoint,
            api_key,
            deployment,
            api_version,
        })
    }

    /// `{endpoint}/openai/deployments/{deployment}/embeddings?api-version={version}`.
    pub fn url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/embeddings?api-version={}",
            self.endpoint.trim_end_matches('/'),
            self.deployment,
            self.api_version
        )
    }
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Deserialize)]
struct EmbeddingDatum {
    embedding: Vec<f32>,
    #[serde(default)]
    index: usize,
}

/// Blocking REST client for an embedding deployment.
pub struct HttpEmbeddingProvider {
    settings: HttpEmbeddingSettings,
    client: reqwest::blocking::Client,
    dimensions: usize,
}

impl HttpEmbeddingProvider {
    /// Build the client. No request is sent until the first `embed`.
    pub fn new(
        settings: HttpEmbeddingSettings,
        dimensions: usize,
        timeout: Duration,
    ) -> ClimacheckResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .gzip(true)
            .build()
            .map_err(|e| RemoteServiceError::InitFailed {
                service: SERVICE.into(),
                reason: e.to_string(),
            })?;
        info!(deployment = %settings.deployment, dims = dimensions, "embedding client initialized");
        Ok(Self {
            settings,
            client,
            dimensions,
        })
    }

    fn post(&self, input: serde_json::Value) -> ClimacheckResult<Vec<Vec<f32>>> {
        let resp = self
            .client
            .post(self.settings.url())
            .header("api-key", self.settings.api_key.as_str())
            .json(&json!({ "input": input }))
            .send()
            .map_err(|e| request_failed(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(request_failed(format!("HTTP {status}: {body}")));
        }
        let parsed: EmbeddingResponse = resp
            .json()
            .map_err(|e| invalid_response(format!("deserialization failed: {e}")))?;
        let mut data = parsed.data;
        data.sort_by_key(|d| d.index);
        let vectors: Vec<Vec<f32>> = data.into_iter().map(|d| d.embedding).collect();
        if let Some(bad) = vectors.iter().find(|v| v.len() != self.dimensions) {
            return Err(invalid_response(format!(
                "expected {} dimensions, got {}",
                self.dimensions,
                bad.len()
            )));
        }
        Ok(vectors)
    }
}

impl IEmbeddingProvider for HttpEmbeddingProvider {
    fn embed(&self, text: &str) -> ClimacheckResult<Vec<f32>> {
        debug!(chars = text.len(), "requesting embedding");
        self.post(json!(text))?
            .into_iter()
            .next()
            .ok_or_else(|| invalid_response("response carried no embedding".into()))
    }

    fn embed_batch(&self, texts: &[String]) -> ClimacheckResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let vectors = self.post(json!(texts))?;
        if vectors.len() != texts.len() {
            return Err(invalid_response(format!(
                "asked for {} embeddings, got {}",
                texts.len(),
                vectors.len()
            )));
        }
        Ok(vectors)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "azure-openai"
    }
}
