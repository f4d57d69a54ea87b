use clap::Parser;
use myland_yield::core::report;
use myland_yield::domain::ports::{ConfigProvider, OutputFormat};
use myland_yield::utils::error::YieldError;
use myland_yield::utils::{logger, validation::Validate};
use myland_yield::{AppConfig, CliConfig, Crop, ModelProvider, PredictionPipeline, State};

fn main() {
    let cli = CliConfig::parse();

    // 列表模式不需要模型或配置
    if cli.list_states {
        for state in State::all() {
            println!("{:<4} {}", state.abbreviation(), state.display_name());
        }
        return;
    }
    if cli.list_crops {
        for crop in Crop::all() {
            println!("{}", crop.name());
        }
        return;
    }

    // 載入配置檔，命令列參數優先
    let config = load_config(&cli);

    // 初始化日誌，命令列 -v 覆蓋配置檔
    let mut logging = config
        .as_ref()
        .map(|config| config.logging.clone())
        .unwrap_or_default();
    logging.verbose |= cli.verbose;
    logger::init_logger(&logging);

    tracing::info!("Starting myland-yield CLI");
    if logging.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = config.and_then(|config| run(&cli, &config)) {
        // 記錄詳細錯誤信息
        tracing::error!(
            "❌ Prediction failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        // 輸出用戶友好的錯誤信息，並依嚴重程度決定退出碼
        eprint!("{}", report::render_error(&e));
        std::process::exit(e.exit_code());
    }
}

fn load_config(cli: &CliConfig) -> Result<AppConfig, YieldError> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    if let Some(model_path) = &cli.model_path {
        config.model.path = model_path.clone();
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }

    // 驗證配置
    config.validate()?;
    Ok(config)
}

fn run(cli: &CliConfig, config: &AppConfig) -> Result<(), YieldError> {
    // 創建模型提供者和管道
    let provider = ModelProvider::from_config(config);
    let pipeline = PredictionPipeline::new(&provider, config.validation_limits());

    let output = pipeline.run(&cli.raw_inputs())?;
    if output.model_is_mock {
        tracing::warn!("⚠️ Prediction produced by the demonstration model");
    } else {
        tracing::info!("✅ Prediction completed");
    }

    match config.output_format() {
        OutputFormat::Text => print!("{}", report::render_text(&output, provider.status())),
        OutputFormat::Json => println!("{}", report::render_json(&output, provider.status())?),
    }

    Ok(())
}
