//! REST client for a hosted NLI model.

use std::time::Duration;

use climacheck_core::config::EntailmentConfig;
use climacheck_core::errors::{ClimacheckError, ClimacheckResult, RemoteServiceError};
use climacheck_core::models::EntailmentLabel;
use climacheck_core::traits::IEntailmentClassifier;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::label::label_from_body;

const SERVICE: &str = "entailment";

fn not_configured(reason: String) -> ClimacheckError {
    RemoteServiceError::NotConfigured {
        service: SERVICE.into(),
        reason,
    }
    .into()
}

/// Endpoint URL and credential of the NLI deployment.
#[derive(Debug, Clone)]
pub struct HttpEntailmentSettings {
    pub endpoint: String,
    pub api_key: String,
}

impl HttpEntailmentSettings {
    pub fn from_env(config: &EntailmentConfig) -> ClimacheckResult<Self> {
        Self::from_lookup(config, |name| std::env::var(name).ok())
    }

    /// Both values must be present and non-blank; the endpoint must be https.
    pub fn from_lookup(
        config: &EntailmentConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ClimacheckResult<Self> {
        let endpoint = lookup(config.endpoint_env.as_str()).filter(|v| !v.trim().is_empty());
        let api_key = lookup(config.api_key_env.as_str()).filter(|v| !v.trim().is_empty());
        let (endpoint, api_key) = match (endpoint, api_key) {
            (Some(endpoint), Some(api_key)) => (endpoint, api_key),
            (endpoint, api_key) => {
                let missing: Vec<&str> = [
                    (endpoint.is_none(), config.endpoint_env.as_str()),
                    (api_key.is_none(), config.api_key_env.as_str()),
                ]
                .into_iter()
                .filter(|(absent, _)| *absent)
                .map(|(_, name)| name)
                .collect();
                return Err(not_configured(format!(
                    "missing environment variables: {}",
                    missing.join(", ")
                )));
            }
        };
        if !endpoint.starts_with("https://") {
            return Err(not_configured(format!("endpoint must use https: {endpoint}")));
        }
        Ok(Self { endpoint, api_key })
    }
}

/// `[CLS] premise [SEP] hypothesis [SEP]` wrapped in the inference payload.
pub fn request_body(premise: &str, hypothesis: &str) -> Value {
    json!({
        "inputs": format!("[CLS] {premise} [SEP] {hypothesis} [SEP]"),
        "parameters": {},
        "options": { "use_cache": false, "wait_for_model": true },
    })
}

pub struct HttpEntailmentClassifier {
    settings: HttpEntailmentSettings,
    client: reqwest::blocking::Client,
}

impl HttpEntailmentClassifier {
    pub fn new(settings: HttpEntailmentSettings, timeout: Duration) -> ClimacheckResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .gzip(true)
            .build()
            .map_err(|e| RemoteServiceError::InitFailed {
                service: SERVICE.into(),
                reason: e.to_string(),
            })?;
        info!(endpoint = %settings.endpoint, "entailment client initialized");
        Ok(Self { settings, client })
    }
}

impl IEntailmentClassifier for HttpEntailmentClassifier {
    fn classify(&self, premise: &str, hypothesis: &str) -> ClimacheckResult<EntailmentLabel> {
        if premise.trim().is_empty() || hypothesis.trim().is_empty() {
            debug!("blank premise or hypothesis, reading as neutral");
            return Ok(EntailmentLabel::Neutral);
        }
        let resp = self
            .client
            .post(self.settings.endpoint.as_str())
            .bearer_auth(&self.settings.api_key)
            .json(&request_body(premise, hypothesis))
            .send()
            .map_err(|e| RemoteServiceError::RequestFailed {
                service: SERVICE.into(),
                reason: e.to_string(),
            })?;
        let status = resp.status();
        let body = resp.text().unwrap_or_default();
        if !status.is_success() {
            return Err(RemoteServiceError::RequestFailed {
                service: SERVICE.into(),
                reason: format!("HTTP {status}: {body}"),
            }
            .into());
        }
        let label = label_from_body(&body);
        debug!(label = %label, "classified pair");
        Ok(label)
    }

    fn name(&self) -> &str {
        "azure-ml-nli"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EntailmentConfig {
        EntailmentConfig::default()
    }

    #[test]
    fn payload_shape() {
        let body = request_body("Glaciers are retreating", "Glaciers are advancing");
        assert_eq!(
            body["inputs"],
            "[CLS] Glaciers are retreating [SEP] Glaciers are advancing [SEP]"
        );
        assert_eq!(body["options"]["use_cache"], false);
        assert_eq!(body["options"]["wait_for_model"], true);
        assert!(body["parameters"].as_object().unwrap().is_empty());
    }

    #[test]
    fn missing_credentials_are_named() {
        let err = HttpEntailmentSettings::from_lookup(&config(), |name| {
            (name == "AZURE_INFERENCE_ENDPOINT").then(|| "https://nli.example".to_string())
        })
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("AZURE_INFERENCE_CREDENTIAL"));
        assert!(!msg.contains("AZURE_INFERENCE_ENDPOINT"));
    }

    #[test]
    fn plain_http_endpoint_rejected() {
        let err = HttpEntailmentSettings::from_lookup(&config(), |name| match name {
            "AZURE_INFERENCE_ENDPOINT" => Some("http://nli.example".into()),
            _ => Some("secret".into()),
        })
        .unwrap_err();
        assert!(err.to_string().contains("https"));
    }
}
