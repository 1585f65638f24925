pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod models;
pub mod pipeline;

pub use config::AppConfig;
pub use db::Database;
pub use error::PipelineError;
pub use model::PredictionService;
pub use models::{LabComparison, PredictionOutcome, PredictionRecord, SensorReadings};
pub use pipeline::PredictionPipeline;
