use myland_yield::core::batch::{score_csv, BatchSummary};
use myland_yield::domain::ports::ConfigProvider;
use myland_yield::{AppConfig, ModelProvider, PredictionPipeline};
use std::fs::File;
use std::io::{BufReader, Write};
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_batch_scoring_from_files() {
    let temp_dir = TempDir::new().unwrap();

    let mut model = NamedTempFile::new_in(temp_dir.path()).unwrap();
    model
        .write_all(
            br#"{"features": ["rainfall_mm", "nitrogen"], "coefficients": [1.0, 4.0],
                 "intercept": 1000.0, "confidence": 0.9, "fill_values": {"nitrogen": 50.0}}"#,
        )
        .unwrap();

    let toml = format!("[model]\npath = \"{}\"\n", model.path().display());
    let config = AppConfig::from_toml_str(&toml).unwrap();

    let mut input = NamedTempFile::new_in(temp_dir.path()).unwrap();
    input
        .write_all(
            b"State,Rainfall,Temperature,Soil_pH,Crop,Nitrogen\n\
              Punjab,800,25,6.5,Wheat,100\n\
              Kerala,2800,27,5.2,Rice,\n\
              Gujarat,,30,7.5,Cotton,60\n",
        )
        .unwrap();

    let provider = ModelProvider::from_config(&config);
    let pipeline = PredictionPipeline::new(&provider, config.validation_limits());

    let output_path = temp_dir.path().join("scored.csv");
    let summary = score_csv(
        BufReader::new(File::open(input.path()).unwrap()),
        File::create(&output_path).unwrap(),
        &pipeline,
    )
    .unwrap();

    assert_eq!(summary, BatchSummary { scored: 2, rejected: 1 });
    assert_eq!(summary.total(), 3);
    assert!(!provider.is_mock());

    let mut reader = csv::Reader::from_path(&output_path).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);

    // 1000 + 800 + 4 * 100
    assert_eq!(&rows[0][3], "2200.0");
    // nitrogen left blank falls back to the artifact fill value
    assert_eq!(&rows[1][3], "4000.0");
    assert_eq!(&rows[1][6], "scored");

    assert_eq!(&rows[2][1], "Gujarat");
    assert_eq!(&rows[2][6], "rejected");
    assert!(rows[2][7].contains("rainfall"));
}
