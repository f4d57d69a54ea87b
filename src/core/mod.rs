pub mod batch;
pub mod insights;
pub mod mock_model;
pub mod model_provider;
pub mod pipeline;
pub mod recommendations;
pub mod report;
pub mod validator;

pub use crate::domain::model::{FeatureVector, PipelineOutput, PredictionResult, RawInputs};
pub use crate::domain::ports::{ConfigProvider, ModelLoader, Regressor};
pub use crate::utils::error::Result;
