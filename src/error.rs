use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the prediction pipeline and its storage layer.
///
/// Model/service errors are fatal to the request but never to the process;
/// a failed log append is degraded-but-successful (the prediction is still
/// returned), while a failed history read is surfaced directly.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to load model artifact from {path}: {reason}")]
    ModelLoad { path: PathBuf, reason: String },

    #[error("prediction service is unavailable (model failed to load at startup)")]
    ServiceUnavailable,

    #[error("failed to write prediction log: {0}")]
    StorageWrite(String),

    #[error("failed to read prediction log: {0}")]
    StorageRead(String),
}

impl PipelineError {
    pub fn model_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ModelLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
