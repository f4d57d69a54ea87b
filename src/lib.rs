pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod reference;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::AppConfig;

pub use adapters::model_file::{FileModelLoader, LinearModelArtifact};
pub use core::{
    model_provider::{Model, ModelProvider, ModelStatus},
    pipeline::PredictionPipeline,
    validator::{InputValidator, ValidationLimits},
};
pub use domain::model::{FeatureVector, ModelKind, PipelineOutput, PredictionResult, RawInputs};
pub use reference::{Crop, State};
pub use utils::error::{Result, ValidationError, YieldError};
