use crate::error::TransferError;
use anyhow::{Context, Result};
use reqwest::Url;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CliConfig {
    pub pipelines: BTreeMap<String, PipelineConfig>,
    pub directories: DirectoriesConfig,
}

/// Settings for one transfer-to-vault instance.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PipelineConfig {
    /// Base URL of the instance's API.
    pub url: String,
    /// VaaS instances read their deposits from a separate collect-inbox root.
    #[serde(default)]
    pub vaas: bool,
    #[serde(default)]
    pub http_client: HttpClientConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct HttpClientConfig {
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

/// Base directories shared by all pipelines; each pipeline lives in a
/// subdirectory named after it.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DirectoriesConfig {
    pub collect_inboxes: PathBuf,
    #[serde(default)]
    pub vaas_collect_inboxes: Option<PathBuf>,
    pub working_space_base_dir: PathBuf,
    pub data_vault_batch_root: PathBuf,
    pub data_vault_root: PathBuf,
}

impl CliConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;
        let reader = BufReader::new(file);
        let config: CliConfig = if is_json(path) {
            serde_json::from_reader(reader).context("Failed to parse JSON config")?
        } else {
            serde_yaml::from_reader(reader).context("Failed to parse YAML config")?
        };
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<(), TransferError> {
        for (name, pipeline) in &self.pipelines {
            if name.trim().is_empty() {
                return Err(TransferError::Config {
                    path: path.to_path_buf(),
                    details: "pipeline name must not be empty".to_string(),
                });
            }
            let url = Url::parse(&pipeline.url).map_err(|e| TransferError::Config {
                path: path.to_path_buf(),
                details: format!("pipeline {}: invalid url {:?}: {}", name, pipeline.url, e),
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(TransferError::Config {
                    path: path.to_path_buf(),
                    details: format!("pipeline {}: url must be http or https", name),
                });
            }
        }
        Ok(())
    }

    /// Resolves the `--pipeline` selector to its configured settings.
    pub fn pipeline<'a>(
        &'a self,
        selector: Option<&'a str>,
    ) -> Result<(&'a str, &'a PipelineConfig), TransferError> {
        let name = selected_pipeline(selector)?;
        self.pipelines
            .get(name)
            .map(|settings| (name, settings))
            .ok_or_else(|| TransferError::PipelineNotFound {
                name: name.to_string(),
            })
    }
}

/// The `--pipeline` value, rejecting an absent or blank selector.
pub fn selected_pipeline(selector: Option<&str>) -> Result<&str, TransferError> {
    match selector {
        Some(name) if !name.trim().is_empty() => Ok(name),
        _ => Err(TransferError::MissingPipeline),
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
