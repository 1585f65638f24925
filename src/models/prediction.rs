use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::SensorReadings;

/// The most recent lab assay paired with the model's prediction at that
/// time. Operator-held and ephemeral; the bias is recomputed per request
/// and never persisted as state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabComparison {
    pub lab_value: f64,
    pub model_value: f64,
}

/// What a completed prediction request returns to the presentation layer.
/// `logged` is false when the prediction was computed but the log append
/// failed; the estimate is still actionable.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionOutcome {
    pub raw: f64,
    pub bias: f64,
    pub final_value: f64,
    pub logged: bool,
}

/// One persisted prediction event. Append-only: rows are written exactly
/// once per completed request and never mutated or deleted.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRecord {
    pub timestamp: DateTime<Utc>,
    pub readings: SensorReadings,
    pub raw_prediction: f64,
    pub bias: f64,
    pub final_result: f64,
}

impl PredictionRecord {
    /// Stamps the record with the current wall-clock time, truncated to
    /// whole seconds to match the stored text format.
    pub fn new(readings: SensorReadings, raw_prediction: f64, bias: f64, final_result: f64) -> Self {
        let now = Utc::now();
        let timestamp = DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now);
        Self {
            timestamp,
            readings,
            raw_prediction,
            bias,
            final_result,
        }
    }
}
