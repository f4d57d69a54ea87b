//! Process-scoped model ownership.
//!
//! The provider loads the trained artifact at most once, behind a
//! single-initialization guard, and substitutes the [`MockModel`] when the
//! loader returns an error. Callers always get a usable model; whether it is
//! the mock is reported through [`ModelStatus`].

use crate::adapters::model_file::FileModelLoader;
use crate::core::mock_model::MockModel;
use crate::domain::model::{FeatureVector, ModelKind, PredictionResult};
use crate::domain::ports::{ConfigProvider, ModelLoader, Regressor};
use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

pub enum Model {
    Trained(Box<dyn Regressor>),
    Mock(MockModel),
}

impl Model {
    pub fn kind(&self) -> ModelKind {
        match self {
            Model::Trained(_) => ModelKind::Trained,
            Model::Mock(_) => ModelKind::Mock,
        }
    }

    pub fn predict(&self, features: &FeatureVector) -> PredictionResult {
        match self {
            Model::Trained(regressor) => {
                let inputs: Vec<f64> = regressor
                    .feature_names()
                    .iter()
                    .map(|name| {
                        features
                            .feature_value(name)
                            .unwrap_or_else(|| regressor.fill_value(name))
                    })
                    .collect();
                let raw = regressor.predict(&inputs);
                if !raw.is_finite() || raw < 0.0 {
                    tracing::debug!("Clamping model output {} to a non-negative yield", raw);
                }
                PredictionResult::new(raw, regressor.confidence(), ModelKind::Trained)
            }
            Model::Mock(mock) => mock.predict(features),
        }
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::Trained(regressor) => f.debug_tuple("Trained").field(&regressor.name()).finish(),
            Model::Mock(_) => f.write_str("Mock"),
        }
    }
}

/// Which model backs predictions, and why.
#[derive(Debug, Clone, Serialize)]
pub struct ModelStatus {
    pub kind: ModelKind,
    pub model_name: String,
    pub artifact_path: Option<String>,
    pub fallback_reason: Option<String>,
    pub loaded_at: DateTime<Utc>,
}

#[derive(Debug)]
struct LoadedModel {
    model: Model,
    status: ModelStatus,
}

pub struct ModelProvider {
    loader: Box<dyn ModelLoader>,
    cell: OnceCell<LoadedModel>,
    load_attempts: AtomicUsize,
}

impl ModelProvider {
    pub fn new(loader: impl ModelLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            cell: OnceCell::new(),
            load_attempts: AtomicUsize::new(0),
        }
    }

    /// Provider reading the JSON artifact at the configured model path.
    pub fn from_config(config: &impl ConfigProvider) -> Self {
        Self::new(FileModelLoader::new(config.model_path()))
    }

    /// The process model. The first call loads; later calls (including
    /// concurrent ones racing the first) get the same instance.
    pub fn load(&self) -> &Model {
        &self.loaded().model
    }

    pub fn status(&self) -> &ModelStatus {
        &self.loaded().status
    }

    pub fn is_mock(&self) -> bool {
        self.status().kind == ModelKind::Mock
    }

    pub fn predict(&self, features: &FeatureVector) -> PredictionResult {
        self.load().predict(features)
    }

    /// How many times the underlying loader has run. Stays at most 1.
    pub fn load_attempts(&self) -> usize {
        self.load_attempts.load(Ordering::SeqCst)
    }

    fn loaded(&self) -> &LoadedModel {
        self.cell.get_or_init(|| self.initialize())
    }

    fn initialize(&self) -> LoadedModel {
        self.load_attempts.fetch_add(1, Ordering::SeqCst);
        let artifact_path = self.loader.location().map(|p| p.display().to_string());

        match self.loader.load() {
            Ok(regressor) => {
                let model_name = regressor.name().to_string();
                tracing::info!("✅ Using trained model '{}'", model_name);
                LoadedModel {
                    model: Model::Trained(regressor),
                    status: ModelStatus {
                        kind: ModelKind::Trained,
                        model_name,
                        artifact_path,
                        fallback_reason: None,
                        loaded_at: Utc::now(),
                    },
                }
            }
            Err(e) => {
                tracing::warn!("⚠️ {}; falling back to the demonstration model", e);
                LoadedModel {
                    model: Model::Mock(MockModel::new()),
                    status: ModelStatus {
                        kind: ModelKind::Mock,
                        model_name: "mock".to_string(),
                        artifact_path,
                        fallback_reason: Some(e.to_string()),
                        loaded_at: Utc::now(),
                    },
                }
            }
        }
    }
}

impl fmt::Debug for ModelProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelProvider")
            .field("location", &self.loader.location())
            .field("loaded", &self.cell.get().map(|m| m.status.kind))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::model_file::LinearModelArtifact;
    use crate::domain::model::SoilNutrients;
    use crate::reference::{Crop, State};
    use crate::utils::error::ModelLoadError;
    use std::collections::HashMap;
    use std::path::Path;

    struct StaticLoader(Option<LinearModelArtifact>);

    impl ModelLoader for StaticLoader {
        fn load(&self) -> Result<Box<dyn Regressor>, ModelLoadError> {
            match &self.0 {
                Some(artifact) => Ok(Box::new(artifact.clone())),
                None => Err(ModelLoadError::Incompatible {
                    path: "memory".to_string(),
                    reason: "no artifact".to_string(),
                }),
            }
        }

        fn location(&self) -> Option<&Path> {
            None
        }
    }

    fn artifact(intercept: f64) -> LinearModelArtifact {
        LinearModelArtifact {
            name: "test".to_string(),
            features: vec!["rainfall_mm".to_string(), "nitrogen".to_string()],
            coefficients: vec![1.0, 10.0],
            intercept,
            confidence: 0.9,
            fill_values: HashMap::from([("nitrogen".to_string(), 5.0)]),
            trained_at: None,
        }
    }

    fn features() -> FeatureVector {
        FeatureVector::new(
            State::Punjab,
            800.0,
            25.0,
            6.5,
            Crop::Wheat,
            SoilNutrients::default(),
        )
    }

    #[test]
    fn test_trained_model_uses_fill_values() {
        let provider = ModelProvider::new(StaticLoader(Some(artifact(100.0))));
        let prediction = provider.predict(&features());
        // 100 + 800 + 10 * 5 (nitrogen filled)
        assert_eq!(prediction.yield_kg_per_ha, 950.0);
        assert_eq!(prediction.confidence, 0.9);
        assert!(!provider.is_mock());
    }

    #[test]
    fn test_negative_output_clamped() {
        let provider = ModelProvider::new(StaticLoader(Some(artifact(-10_000.0))));
        assert_eq!(provider.predict(&features()).yield_kg_per_ha, 0.0);
    }

    #[test]
    fn test_fallback_records_reason() {
        let provider = ModelProvider::new(StaticLoader(None));
        assert!(provider.is_mock());
        let status = provider.status();
        assert_eq!(status.model_name, "mock");
        assert!(status.fallback_reason.as_deref().unwrap().contains("no artifact"));
        assert_eq!(provider.predict(&features()).source, ModelKind::Mock);
    }

    #[test]
    fn test_loads_once() {
        let provider = ModelProvider::new(StaticLoader(None));
        let first = provider.load() as *const Model;
        let second = provider.load() as *const Model;
        assert_eq!(first, second);
        provider.predict(&features());
        assert_eq!(provider.load_attempts(), 1);
    }
}
