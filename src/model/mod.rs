pub mod artifact;
pub mod features;
pub mod service;

pub use artifact::ModelArtifact;
pub use features::build_feature_vector;
pub use service::PredictionService;
