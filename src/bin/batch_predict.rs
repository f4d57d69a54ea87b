use anyhow::Context;
use clap::Parser;
use myland_yield::core::batch::score_csv;
use myland_yield::domain::ports::ConfigProvider;
use myland_yield::utils::{logger, validation::Validate};
use myland_yield::{AppConfig, ModelProvider, PredictionPipeline};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "batch-predict")]
#[command(about = "Score every row of a CSV file with the yield model")]
struct Args {
    /// Input CSV with columns state,rainfall,temperature,soil_ph,crop[,nitrogen,phosphorus,potassium]
    input: PathBuf,

    /// Where to write the scored CSV
    #[arg(short, long, default_value = "predictions.csv")]
    output: PathBuf,

    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to a JSON model artifact (overrides the config file)
    #[arg(long)]
    model_path: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入配置
    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("failed to load config file '{}'", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(model_path) = &args.model_path {
        config.model.path = model_path.clone();
    }

    // 初始化日誌
    config.logging.verbose |= args.verbose;
    config.logging.json |= args.json_logs;
    logger::init_logger(&config.logging);

    tracing::info!("🚀 Starting batch prediction");
    config.validate().context("invalid configuration")?;

    let provider = ModelProvider::from_config(&config);
    let pipeline = PredictionPipeline::new(&provider, config.validation_limits());
    if provider.is_mock() {
        tracing::warn!("⚠️ No trained model available; every row is scored by the demonstration model");
    }

    let input = File::open(&args.input)
        .with_context(|| format!("cannot open input '{}'", args.input.display()))?;
    let output = File::create(&args.output)
        .with_context(|| format!("cannot create output '{}'", args.output.display()))?;

    let summary = score_csv(BufReader::new(input), BufWriter::new(output), &pipeline)?;

    println!(
        "✅ Scored {} of {} rows ({} rejected)",
        summary.scored,
        summary.total(),
        summary.rejected
    );
    println!("📁 Output saved to: {}", args.output.display());

    Ok(())
}
