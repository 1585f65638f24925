pub mod bias;
pub mod controller;

pub use controller::PredictionPipeline;
