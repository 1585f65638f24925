mod prediction;
mod reading;

pub use prediction::{LabComparison, PredictionOutcome, PredictionRecord};
pub use reading::{SensorReadings, SENSOR_KEYS};
