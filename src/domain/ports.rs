use crate::core::validator::ValidationLimits;
use crate::utils::error::ModelLoadError;
use std::path::Path;

/// A deserialized regression artifact.
///
/// `predict` receives values in the order given by `feature_names`.
pub trait Regressor: Send + Sync {
    fn name(&self) -> &str;
    fn feature_names(&self) -> &[String];
    /// Value used for a feature the request did not supply.
    fn fill_value(&self, feature: &str) -> f64;
    fn predict(&self, features: &[f64]) -> f64;
    fn confidence(&self) -> f64;
}

/// Reads a trained model from storage. Errors are returned to the caller,
/// which decides whether to substitute the mock.
pub trait ModelLoader: Send + Sync {
    fn load(&self) -> Result<Box<dyn Regressor>, ModelLoadError>;
    fn location(&self) -> Option<&Path>;
}

pub trait ConfigProvider: Send + Sync {
    fn model_path(&self) -> &Path;
    fn validation_limits(&self) -> ValidationLimits;
    fn output_format(&self) -> OutputFormat;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
