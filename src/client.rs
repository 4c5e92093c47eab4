use crate::config::{selected_pipeline, CliConfig, PipelineConfig};
use crate::error::TransferError;
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct StatusMessage {
    pub message: String,
}

/// Remote operations exposed by a transfer-to-vault instance.
pub trait TransferApi {
    fn send_to_vault_flush(&self) -> Result<StatusMessage, TransferError>;
}

pub struct HttpTransferApi {
    client: Client,
    base_url: String,
}

impl HttpTransferApi {
    pub fn new(settings: &PipelineConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.http_client.timeout_seconds))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: settings.url.trim_end_matches('/').to_string(),
        })
    }

    fn flush_url(&self) -> String {
        format!("{}/send-to-vault/flush", self.base_url)
    }
}

impl TransferApi for HttpTransferApi {
    fn send_to_vault_flush(&self) -> Result<StatusMessage, TransferError> {
        let url = self.flush_url();
        debug!(url=%url, "submitting flush");

        let response = self.client.post(&url).send().map_err(|e| TransferError::Api {
            message: format!("Failed to reach {}: {}", url, e),
        })?;

        let status = response.status();
        let body = response.text().map_err(|e| TransferError::Api {
            message: format!("Failed to read response from {}: {}", url, e),
        })?;

        if !status.is_success() {
            let message = serde_json::from_str::<StatusMessage>(&body)
                .map(|m| m.message)
                .unwrap_or_else(|_| format!("{} returned status {}", url, status));
            return Err(TransferError::Api { message });
        }

        serde_json::from_str(&body).map_err(|e| TransferError::Api {
            message: format!("Unexpected response from {}: {}", url, e),
        })
    }
}

/// Flush clients keyed by pipeline name, built once at startup.
pub struct PipelineRegistry<A = HttpTransferApi> {
    apis: HashMap<String, A>,
}

impl PipelineRegistry<HttpTransferApi> {
    pub fn from_config(config: &CliConfig) -> Result<Self> {
        let mut apis = HashMap::with_capacity(config.pipelines.len());
        for (name, settings) in &config.pipelines {
            let api = HttpTransferApi::new(settings)
                .with_context(|| format!("Failed to set up client for pipeline {}", name))?;
            apis.insert(name.clone(), api);
        }
        Ok(Self { apis })
    }
}

impl<A: TransferApi> PipelineRegistry<A> {
    pub fn api(&self, selector: Option<&str>) -> Result<&A, TransferError> {
        let name = selected_pipeline(selector)?;
        self.apis
            .get(name)
            .ok_or_else(|| TransferError::PipelineNotFound {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
impl<A> FromIterator<(String, A)> for PipelineRegistry<A> {
    fn from_iter<I: IntoIterator<Item = (String, A)>>(iter: I) -> Self {
        Self {
            apis: iter.into_iter().collect(),
        }
    }
}
