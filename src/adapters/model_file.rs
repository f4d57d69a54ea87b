use crate::core::mock_model::MOCK_CONFIDENCE_MAX;
use crate::domain::model::is_known_feature;
use crate::domain::ports::{ModelLoader, Regressor};
use crate::utils::error::ModelLoadError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const DEFAULT_ARTIFACT_CONFIDENCE: f64 = 0.85;

/// JSON linear regression artifact produced by the offline training job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModelArtifact {
    #[serde(default = "default_model_name")]
    pub name: String,
    pub features: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    #[serde(default)]
    pub fill_values: HashMap<String, f64>,
    pub trained_at: Option<DateTime<Utc>>,
}

fn default_model_name() -> String {
    "linear".to_string()
}

fn default_confidence() -> f64 {
    DEFAULT_ARTIFACT_CONFIDENCE
}

impl LinearModelArtifact {
    /// Rejects artifacts the pipeline cannot evaluate safely.
    pub fn check_compatible(&self) -> std::result::Result<(), String> {
        if self.features.is_empty() {
            return Err("artifact declares no features".to_string());
        }
        if self.features.len() != self.coefficients.len() {
            return Err(format!(
                "{} features but {} coefficients",
                self.features.len(),
                self.coefficients.len()
            ));
        }
        if let Some(unknown) = self.features.iter().find(|f| !is_known_feature(f)) {
            return Err(format!("unknown feature '{}'", unknown));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err("coefficients must be finite".to_string());
        }
        if let Some((name, _)) = self.fill_values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(format!("fill value for '{}' must be finite", name));
        }
        if !(self.confidence > MOCK_CONFIDENCE_MAX && self.confidence <= 1.0) {
            return Err(format!(
                "confidence {} must be in ({}, 1]",
                self.confidence, MOCK_CONFIDENCE_MAX
            ));
        }
        Ok(())
    }
}

impl Regressor for LinearModelArtifact {
    fn name(&self) -> &str {
        &self.name
    }

    fn feature_names(&self) -> &[String] {
        &self.features
    }

    fn fill_value(&self, feature: &str) -> f64 {
        self.fill_values.get(feature).copied().unwrap_or(0.0)
    }

    fn predict(&self, features: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }

    fn confidence(&self) -> f64 {
        self.confidence
    }
}

/// Loads a [`LinearModelArtifact`] from a JSON file.
#[derive(Debug, Clone)]
pub struct FileModelLoader {
    path: PathBuf,
}

impl FileModelLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ModelLoader for FileModelLoader {
    fn load(&self) -> Result<Box<dyn Regressor>, ModelLoadError> {
        let path = self.path.display().to_string();
        tracing::debug!("Reading model artifact from {}", path);

        let content = std::fs::read_to_string(&self.path).map_err(|source| ModelLoadError::Io {
            path: path.clone(),
            source,
        })?;
        let artifact: LinearModelArtifact =
            serde_json::from_str(&content).map_err(|source| ModelLoadError::Corrupt {
                path: path.clone(),
                source,
            })?;
        artifact
            .check_compatible()
            .map_err(|reason| ModelLoadError::Incompatible { path, reason })?;

        tracing::info!(
            "📦 Loaded model '{}' ({} features, confidence {:.2})",
            artifact.name,
            artifact.features.len(),
            artifact.confidence
        );
        Ok(Box::new(artifact))
    }

    fn location(&self) -> Option<&Path> {
        Some(&self.path)
    }
}
