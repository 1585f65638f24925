use std::{path::Path, sync::Arc};

use log::info;

use crate::{
    error::PipelineError,
    model::{artifact::ModelArtifact, features::build_feature_vector},
    models::SensorReadings,
};

/// Owns the loaded model artifact and exposes the single predict operation.
///
/// The artifact is loaded once at startup and read-only afterwards, so the
/// handle is `Clone` and any number of operator sessions can call
/// [`predict`](Self::predict) concurrently without coordination.
#[derive(Clone, Debug)]
pub struct PredictionService {
    artifact: Arc<ModelArtifact>,
}

impl PredictionService {
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let artifact = ModelArtifact::load(path)?;
        info!(
            "model artifact loaded from {} ({} features)",
            path.display(),
            artifact.feature_names().len()
        );
        Ok(Self {
            artifact: Arc::new(artifact),
        })
    }

    /// Raw silica estimate for one readings snapshot. Pure given the loaded
    /// artifact; the presentation layer clamps for display only.
    pub fn predict(&self, readings: &SensorReadings) -> f64 {
        let vector = build_feature_vector(readings, self.artifact.feature_names());
        self.artifact.infer(&vector)
    }

    pub fn feature_names(&self) -> &[String] {
        self.artifact.feature_names()
    }
}
