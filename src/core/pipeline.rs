use crate::core::insights::build_insights;
use crate::core::model_provider::ModelProvider;
use crate::core::recommendations::recommend;
use crate::core::validator::{InputValidator, ValidationLimits};
use crate::domain::model::{PipelineOutput, RawInputs};
use crate::utils::error::Result;
use chrono::Utc;

/// validate → predict → recommend, once per submission.
///
/// The pipeline borrows the process-wide [`ModelProvider`]; it never owns
/// or reloads the model.
pub struct PredictionPipeline<'a> {
    provider: &'a ModelProvider,
    validator: InputValidator,
}

impl<'a> PredictionPipeline<'a> {
    pub fn new(provider: &'a ModelProvider, limits: ValidationLimits) -> Self {
        Self {
            provider,
            validator: InputValidator::new(limits),
        }
    }

    pub fn provider(&self) -> &ModelProvider {
        self.provider
    }

    pub fn run(&self, raw: &RawInputs) -> Result<PipelineOutput> {
        let features = self.validator.validate(raw).map_err(|e| {
            tracing::debug!("Rejected input: {}", e);
            e
        })?;

        let prediction = self.provider.predict(&features);
        let model_is_mock = self.provider.is_mock();
        tracing::debug!(
            "Predicted {:.0} kg/ha for {} in {} (confidence {:.2}, mock: {})",
            prediction.yield_kg_per_ha,
            features.crop(),
            features.state(),
            prediction.confidence,
            model_is_mock
        );

        let recommendations = recommend(&features, &prediction);
        let insights = build_insights(&features, &prediction);

        Ok(PipelineOutput {
            features,
            prediction,
            recommendations,
            model_is_mock,
            insights,
            generated_at: Utc::now(),
        })
    }
}

/// One-shot run with the default input limits.
pub fn run_pipeline(provider: &ModelProvider, raw: &RawInputs) -> Result<PipelineOutput> {
    PredictionPipeline::new(provider, ValidationLimits::default()).run(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::model_file::FileModelLoader;
    use crate::utils::error::{ValidationError, YieldError};
    use serde_json::json;

    fn inputs(rainfall: serde_json::Value) -> RawInputs {
        RawInputs::from([
            ("state".to_string(), json!("Punjab")),
            ("rainfall".to_string(), rainfall),
            ("temperature".to_string(), json!(25.0)),
            ("soil_ph".to_string(), json!(6.5)),
            ("crop".to_string(), json!("Wheat")),
        ])
    }

    #[test]
    fn test_run_without_artifact_uses_mock() {
        let provider = ModelProvider::new(FileModelLoader::new("/nonexistent/model.json"));
        let output = run_pipeline(&provider, &inputs(json!(800.0))).unwrap();
        assert!(output.model_is_mock);
        assert!(output.prediction.yield_kg_per_ha >= 0.0);
        assert!(!output.recommendations.is_empty());
    }

    #[test]
    fn test_invalid_input_stops_before_prediction() {
        let provider = ModelProvider::new(FileModelLoader::new("/nonexistent/model.json"));
        let err = run_pipeline(&provider, &inputs(json!(-5.0))).unwrap_err();
        match err {
            YieldError::Validation(ValidationError::InvalidRange { field, .. }) => {
                assert_eq!(field, "rainfall");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(provider.load_attempts(), 0);
    }
}
