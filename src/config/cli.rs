use crate::domain::model::RawInputs;
use crate::domain::ports::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "myland-yield")]
#[command(about = "Predict crop yield for Indian states from rainfall, temperature and soil pH")]
pub struct CliConfig {
    /// State or union territory (name or two-letter code, e.g. "Punjab" or "PB")
    #[arg(long)]
    pub state: Option<String>,

    /// Annual rainfall in millimetres
    #[arg(long, allow_hyphen_values = true)]
    pub rainfall: Option<String>,

    /// Average temperature in °C
    #[arg(long, allow_hyphen_values = true)]
    pub temperature: Option<String>,

    /// Soil pH (0-14)
    #[arg(long, allow_hyphen_values = true)]
    pub soil_ph: Option<String>,

    /// Crop name, e.g. "Wheat"
    #[arg(long)]
    pub crop: Option<String>,

    /// Soil nitrogen, kg/ha
    #[arg(long, allow_hyphen_values = true)]
    pub nitrogen: Option<String>,

    /// Soil phosphorus, kg/ha
    #[arg(long, allow_hyphen_values = true)]
    pub phosphorus: Option<String>,

    /// Soil potassium, kg/ha
    #[arg(long, allow_hyphen_values = true)]
    pub potassium: Option<String>,

    /// Path to a JSON model artifact (overrides the config file)
    #[arg(long)]
    pub model_path: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Print the supported states and exit
    #[arg(long)]
    pub list_states: bool,

    /// Print the supported crops and exit
    #[arg(long)]
    pub list_crops: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Form-style inputs for the pipeline; flags that were not given are
    /// left out so the validator reports them as missing.
    pub fn raw_inputs(&self) -> RawInputs {
        let fields = [
            ("state", &self.state),
            ("rainfall", &self.rainfall),
            ("temperature", &self.temperature),
            ("soil_ph", &self.soil_ph),
            ("crop", &self.crop),
            ("nitrogen", &self.nitrogen),
            ("phosphorus", &self.phosphorus),
            ("potassium", &self.potassium),
        ];
        fields
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .as_ref()
                    .map(|v| (key.to_string(), serde_json::Value::String(v.clone())))
            })
            .collect()
    }
}
