use crate::config::{DirectoriesConfig, PipelineConfig};
use std::path::PathBuf;

/// Base directories of a single pipeline. None of them need to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRoots {
    pub collect_inbox: PathBuf,
    pub working_space: PathBuf,
    pub vault_batch_root: PathBuf,
    pub vault_root: PathBuf,
}

impl PipelineRoots {
    pub fn resolve(dirs: &DirectoriesConfig, name: &str, pipeline: &PipelineConfig) -> Self {
        let collect_inboxes = match (&dirs.vaas_collect_inboxes, pipeline.vaas) {
            (Some(vaas_root), true) => vaas_root,
            _ => &dirs.collect_inboxes,
        };
        Self {
            collect_inbox: collect_inboxes.join(name),
            working_space: dirs.working_space_base_dir.join(name),
            vault_batch_root: dirs.data_vault_batch_root.join(name),
            vault_root: dirs.data_vault_root.join(name),
        }
    }

    pub fn extract_metadata(&self) -> PathBuf {
        self.working_space.join("extract-metadata")
    }

    pub fn send_to_vault(&self) -> PathBuf {
        self.working_space.join("send-to-vault")
    }

    pub fn batch_inbox(&self) -> PathBuf {
        self.vault_batch_root.join("inbox")
    }

    pub fn batch_outbox(&self, batch: &str) -> PathBuf {
        self.vault_batch_root.join("outbox").join(batch)
    }
}
