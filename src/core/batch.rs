use crate::core::pipeline::PredictionPipeline;
use crate::domain::model::RawInputs;
use crate::utils::error::{Result, YieldError};
use serde::Serialize;
use std::io::{Read, Write};

#[derive(Debug, Serialize)]
struct BatchRow {
    row: usize,
    state: String,
    crop: String,
    yield_kg_per_ha: Option<f64>,
    confidence: Option<f64>,
    model_is_mock: bool,
    status: &'static str,
    error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub scored: usize,
    pub rejected: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.scored + self.rejected
    }
}

/// Scores every CSV row through the pipeline. Header names follow the raw
/// input keys (`state`, `rainfall`, `temperature`, `soil_ph`, `crop`, ...).
/// Invalid rows are written with `status=rejected` and do not stop the batch.
pub fn score_csv<R: Read, W: Write>(
    input: R,
    output: W,
    pipeline: &PredictionPipeline<'_>,
) -> Result<BatchSummary> {
    // short rows read as missing trailing fields, extra fields are ignored
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);
    let mut writer = csv::Writer::from_writer(output);
    let headers = reader.headers()?.clone();
    let model_is_mock = pipeline.provider().is_mock();

    let mut summary = BatchSummary::default();

    for (index, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                summary.rejected += 1;
                tracing::warn!("Row {} unreadable: {}", index + 1, e);
                writer.serialize(BatchRow {
                    row: index + 1,
                    state: String::new(),
                    crop: String::new(),
                    yield_kg_per_ha: None,
                    confidence: None,
                    model_is_mock,
                    status: "rejected",
                    error: e.to_string(),
                })?;
                continue;
            }
        };
        let raw: RawInputs = headers
            .iter()
            .zip(record.iter())
            .map(|(key, value)| {
                (
                    key.to_ascii_lowercase(),
                    serde_json::Value::String(value.to_string()),
                )
            })
            .collect();
        let field = |key: &str| {
            raw.get(key)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };

        let row = match pipeline.run(&raw) {
            Ok(result) => {
                summary.scored += 1;
                BatchRow {
                    row: index + 1,
                    state: result.features.state().to_string(),
                    crop: result.features.crop().to_string(),
                    yield_kg_per_ha: Some(round2(result.prediction.yield_kg_per_ha)),
                    confidence: Some(round2(result.prediction.confidence)),
                    model_is_mock,
                    status: "scored",
                    error: String::new(),
                }
            }
            Err(YieldError::Validation(e)) => {
                summary.rejected += 1;
                tracing::warn!("Row {} rejected: {}", index + 1, e);
                BatchRow {
                    row: index + 1,
                    state: field("state"),
                    crop: field("crop"),
                    yield_kg_per_ha: None,
                    confidence: None,
                    model_is_mock,
                    status: "rejected",
                    error: e.to_string(),
                }
            }
            Err(e) => return Err(e),
        };
        writer.serialize(row)?;
    }

    writer.flush()?;
    tracing::info!(
        "📊 Batch finished: {} scored, {} rejected",
        summary.scored,
        summary.rejected
    );
    Ok(summary)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model_provider::ModelProvider;
    use crate::core::validator::ValidationLimits;
    use crate::FileModelLoader;

    #[test]
    fn test_scores_and_rejects_rows() {
        let provider = ModelProvider::new(FileModelLoader::new("/nonexistent/model.json"));
        let pipeline = PredictionPipeline::new(&provider, ValidationLimits::default());
        let input = "state,rainfall,temperature,soil_ph,crop\n\
                     Punjab,800,25,6.5,Wheat\n\
                     Kerala,-5,27,5.0,Rice\n";

        let mut output = Vec::new();
        let summary = score_csv(input.as_bytes(), &mut output, &pipeline).unwrap();
        assert_eq!(summary, BatchSummary { scored: 1, rejected: 1 });

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "row,state,crop,yield_kg_per_ha,confidence,model_is_mock,status,error"
        );
        assert!(lines[1].starts_with("1,Punjab,Wheat,"));
        assert!(lines[1].contains(",true,scored,"));
        assert!(lines[2].starts_with("2,Kerala,Rice,,,true,rejected,"));
        assert!(lines[2].contains("rainfall"));
    }

    #[test]
    fn test_ragged_rows_do_not_stop_the_batch() {
        let provider = ModelProvider::new(FileModelLoader::new("/nonexistent/model.json"));
        let pipeline = PredictionPipeline::new(&provider, ValidationLimits::default());
        let input = "state,crop,rainfall,temperature,soil_ph,nitrogen\n\
                     Punjab,Wheat,800,25,6.5,80\n\
                     Kerala,Rice,2800,27\n\
                     Gujarat,Cotton,700,30,7.5,60,extra\n\
                     Haryana,Wheat,600,22,7.0,90\n";

        let mut output = Vec::new();
        let summary = score_csv(input.as_bytes(), &mut output, &pipeline).unwrap();
        assert_eq!(summary, BatchSummary { scored: 3, rejected: 1 });

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[2].starts_with("2,Kerala,Rice,,,true,rejected,"));
        assert!(lines[2].contains("soil_ph"));
        assert!(lines[3].starts_with("3,Gujarat,Cotton,"));
        assert!(lines[4].starts_with("4,Haryana,Wheat,"));
        assert!(lines[4].contains(",scored,"));
    }

    #[test]
    fn test_unreadable_row_is_rejected() {
        let provider = ModelProvider::new(FileModelLoader::new("/nonexistent/model.json"));
        let pipeline = PredictionPipeline::new(&provider, ValidationLimits::default());
        let mut input = b"state,rainfall,temperature,soil_ph,crop\n".to_vec();
        input.extend_from_slice(b"Punjab,800,25,6.5,\xff\xfe\n");
        input.extend_from_slice(b"Haryana,600,22,7.0,Wheat\n");

        let mut output = Vec::new();
        let summary = score_csv(input.as_slice(), &mut output, &pipeline).unwrap();
        assert_eq!(summary, BatchSummary { scored: 1, rejected: 1 });

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].starts_with("1,,,,,true,rejected,"));
        assert!(lines[2].starts_with("2,Haryana,Wheat,"));
    }
}
