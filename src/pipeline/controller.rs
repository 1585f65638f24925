use log::warn;

use crate::{
    db::Database,
    error::PipelineError,
    model::PredictionService,
    models::{LabComparison, PredictionOutcome, PredictionRecord, SensorReadings},
    pipeline::bias,
};

/// Composes the per-request flow: build vector, predict, correct, persist,
/// return. One instance is built at process start and cloned into request
/// handlers; the service and database handles are both shareable.
#[derive(Clone)]
pub struct PredictionPipeline {
    service: Option<PredictionService>,
    db: Database,
}

impl PredictionPipeline {
    /// `service` is `None` when the model artifact failed to load at
    /// startup. The process stays up so the operator can be told the
    /// system cannot currently predict; every request then fails fast.
    pub fn new(service: Option<PredictionService>, db: Database) -> Self {
        Self { service, db }
    }

    pub fn is_available(&self) -> bool {
        self.service.is_some()
    }

    /// Runs one prediction request. A failed log append does not block
    /// delivering the estimate; the outcome carries `logged = false` so the
    /// caller can notify the operator. The append is not retried (there is
    /// no idempotency key, so a retry could duplicate rows).
    pub async fn handle_request(
        &self,
        readings: &SensorReadings,
        lab: Option<LabComparison>,
    ) -> Result<PredictionOutcome, PipelineError> {
        let service = self
            .service
            .as_ref()
            .ok_or(PipelineError::ServiceUnavailable)?;

        let raw = service.predict(readings);
        let bias = lab
            .map(|lab| bias::lab_bias(lab.lab_value, lab.model_value))
            .unwrap_or(0.0);
        let final_value = bias::apply(raw, bias);

        let record = PredictionRecord::new(*readings, raw, bias, final_value);
        let logged = match self.db.append_prediction(&record).await {
            Ok(()) => true,
            Err(err) => {
                warn!("prediction computed but not logged: {err}");
                false
            }
        };

        Ok(PredictionOutcome {
            raw,
            bias,
            final_value,
            logged,
        })
    }

    /// Full prediction history for the trend view.
    pub async fn history(&self) -> Result<Vec<PredictionRecord>, PipelineError> {
        self.db.list_predictions().await
    }

    /// History as CSV for the dashboard's export button.
    pub async fn history_csv(&self) -> Result<String, PipelineError> {
        self.db.export_csv().await
    }
}
