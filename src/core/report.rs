use crate::core::model_provider::ModelStatus;
use crate::domain::model::{PipelineOutput, RecommendationLevel};
use crate::utils::error::{Result, YieldError};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    output: &'a PipelineOutput,
    model: &'a ModelStatus,
}

pub fn render_json(output: &PipelineOutput, status: &ModelStatus) -> Result<String> {
    let report = JsonReport {
        output,
        model: status,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn render_text(output: &PipelineOutput, status: &ModelStatus) -> String {
    TextReport { output, status }.to_string()
}

/// What the CLI prints to stderr when a request fails.
pub fn render_error(error: &YieldError) -> String {
    format!(
        "❌ {}\n💡 Suggestion: {}\n",
        error.user_friendly_message(),
        error.recovery_suggestion()
    )
}

struct TextReport<'a> {
    output: &'a PipelineOutput,
    status: &'a ModelStatus,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let features = &self.output.features;
        let prediction = &self.output.prediction;
        let insights = &self.output.insights;

        if self.output.model_is_mock {
            writeln!(
                f,
                "⚠️  Demo mode: no trained model available, showing an illustrative estimate."
            )?;
            if let Some(reason) = &self.status.fallback_reason {
                writeln!(f, "   ({})", reason)?;
            }
            writeln!(f)?;
        }

        writeln!(
            f,
            "🌾 {} in {} ({})",
            features.crop(),
            features.state(),
            features.state().abbreviation()
        )?;
        writeln!(
            f,
            "   rainfall {:.0} mm, temperature {:.1} °C, soil pH {:.1}",
            features.rainfall_mm(),
            features.temperature_c(),
            features.soil_ph()
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "Predicted yield: {:.0} kg/ha (confidence {:.0}%)",
            prediction.yield_kg_per_ha,
            prediction.confidence * 100.0
        )?;

        let historical = &insights.historical;
        writeln!(
            f,
            "Historical average: {:.0} kg/ha, {} ({:+.1}%)",
            historical.historical_yield,
            historical.tier.label(),
            historical.difference_pct
        )?;
        writeln!(
            f,
            "Estimated revenue: ₹{:.0}/ha, ₹{:.0}/acre at ₹{:.0}/kg",
            insights.market.revenue_per_hectare,
            insights.market.revenue_per_acre,
            insights.market.rate_inr_per_kg
        )?;
        writeln!(
            f,
            "Climate suitability: {:.0}/100 (temperature {:.0}, rainfall {:.0})",
            insights.climate.overall,
            insights.climate.temperature,
            insights.climate.rainfall
        )?;

        self.fmt_growing(f)?;
        self.fmt_regional(f)?;

        writeln!(f)?;
        writeln!(f, "Recommendations:")?;
        for recommendation in &self.output.recommendations {
            let marker = match recommendation.level {
                RecommendationLevel::Success => "✅",
                RecommendationLevel::Warning => "⚠️ ",
                RecommendationLevel::Info => "💡",
            };
            writeln!(f, "  {} {}", marker, recommendation.message)?;
        }

        writeln!(f)?;
        writeln!(f, "Next steps:")?;
        for (i, item) in insights.action_items.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, item)?;
        }
        Ok(())
    }
}

impl TextReport<'_> {
    fn fmt_growing(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let growing = &self.output.insights.growing;
        if !growing.seasons.is_empty() {
            let seasons: Vec<&str> = growing.seasons.iter().map(|s| s.label()).collect();
            writeln!(f, "Growing seasons: {}", seasons.join(", "))?;
        }
        if let Some(humidity) = growing.humidity {
            writeln!(f, "Preferred humidity: {}", humidity)?;
        }
        if !growing.soil_types.is_empty() {
            write!(f, "Suitable soils: {}", growing.soil_types.join(", "))?;
            match growing.drainage {
                Some(drainage) => writeln!(f, " ({})", drainage.to_lowercase())?,
                None => writeln!(f)?,
            }
        }
        Ok(())
    }

    fn fmt_regional(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let regional = &self.output.insights.regional_comparison;
        if regional.is_empty() {
            return Ok(());
        }
        writeln!(f)?;
        writeln!(
            f,
            "Average {} yield by state (kg/ha):",
            self.output.features.crop()
        )?;
        for entry in regional {
            let marker = if entry.state == self.output.features.state() {
                "▶"
            } else {
                " "
            };
            writeln!(
                f,
                "  {} {:<16} {:>8.0}",
                marker,
                entry.state.display_name(),
                entry.yield_kg_per_ha
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::model_file::FileModelLoader;
    use crate::core::model_provider::ModelProvider;
    use crate::core::pipeline::run_pipeline;
    use crate::domain::model::RawInputs;
    use serde_json::json;

    fn mock_output() -> (ModelProvider, PipelineOutput) {
        let provider = ModelProvider::new(FileModelLoader::new("/nonexistent/model.json"));
        let raw = RawInputs::from([
            ("state".to_string(), json!("Punjab")),
            ("rainfall".to_string(), json!(800)),
            ("temperature".to_string(), json!(25)),
            ("soil_ph".to_string(), json!(6.5)),
            ("crop".to_string(), json!("Wheat")),
        ]);
        let output = run_pipeline(&provider, &raw).unwrap();
        (provider, output)
    }

    #[test]
    fn test_text_report_flags_demo_mode() {
        let (provider, output) = mock_output();
        let text = render_text(&output, provider.status());
        assert!(text.starts_with("⚠️  Demo mode"));
        assert!(text.contains("Wheat in Punjab (PB)"));
        assert!(text.contains("Predicted yield:"));
        assert!(text.contains("Recommendations:"));
        assert!(text.contains("Growing seasons: Rabi (winter)"));
        assert!(text.contains("Average Wheat yield by state (kg/ha):"));
        assert!(text.contains("▶ Punjab"));
    }

    #[test]
    fn test_json_report_fields() {
        let (provider, output) = mock_output();
        let json = render_json(&output, provider.status()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["model_is_mock"], json!(true));
        assert_eq!(value["model"]["kind"], json!("mock"));
        assert!(value["prediction"]["yield_kg_per_ha"].as_f64().unwrap() >= 0.0);
        assert!(value["recommendations"].as_array().unwrap().len() > 0);
        assert_eq!(value["insights"]["growing"]["humidity"], json!("Low to moderate"));
        assert_eq!(value["insights"]["growing"]["seasons"], json!(["Rabi"]));
        let regional = value["insights"]["regional_comparison"].as_array().unwrap();
        assert!(regional.contains(&json!({"state": "Punjab", "yield_kg_per_ha": 4800.0})));
    }

    #[test]
    fn test_error_report() {
        let err: YieldError = crate::utils::error::ValidationError::MissingField {
            field: "crop".to_string(),
        }
        .into();
        let text = render_error(&err);
        assert_eq!(
            text,
            "❌ Please provide a value for crop.\n💡 Suggestion: Check the input values against the accepted ranges (--help).\n"
        );
        assert_eq!(err.exit_code(), 2);
    }
}
