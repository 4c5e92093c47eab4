use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("No pipeline specified. Use -p or --pipeline option.")]
    MissingPipeline,

    #[error("No configuration found for pipeline: {name}")]
    PipelineNotFound { name: String },

    #[error("{message}")]
    Api { message: String },

    #[error("invalid configuration in {path}: {details}")]
    Config { path: PathBuf, details: String },
}
