use crate::core::validator::ValidationLimits;
use crate::core::ConfigProvider;
use crate::domain::ports::OutputFormat;
use crate::reference::agronomy::Range;
use crate::utils::error::{Result, YieldError};
use crate::utils::validation::{validate_limit_range, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_MODEL_PATH: &str = "trained_model.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub model: ModelConfig,
    pub validation: ValidationConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub path: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_MODEL_PATH),
        }
    }
}

/// Optional overrides of the accepted input ranges.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub rainfall_mm: Option<Range>,
    pub temperature_c: Option<Range>,
    pub soil_ph: Option<Range>,
    pub nutrient_kg_per_ha: Option<Range>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub verbose: bool,
    pub json: bool,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(YieldError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| YieldError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MYLAND_MODEL_PATH})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| YieldError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_path("model.path", &self.model.path.to_string_lossy())?;

        let defaults = ValidationLimits::default();
        let checks = [
            ("validation.rainfall_mm", self.validation.rainfall_mm, defaults.rainfall_mm),
            ("validation.temperature_c", self.validation.temperature_c, defaults.temperature_c),
            ("validation.soil_ph", self.validation.soil_ph, defaults.soil_ph),
            (
                "validation.nutrient_kg_per_ha",
                self.validation.nutrient_kg_per_ha,
                defaults.nutrient_kg_per_ha,
            ),
        ];
        for (field, configured, outer) in checks {
            if let Some(range) = configured {
                validate_limit_range(field, range, outer)?;
            }
        }

        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn model_path(&self) -> &Path {
        &self.model.path
    }

    fn validation_limits(&self) -> ValidationLimits {
        let defaults = ValidationLimits::default();
        ValidationLimits {
            rainfall_mm: self.validation.rainfall_mm.unwrap_or(defaults.rainfall_mm),
            temperature_c: self.validation.temperature_c.unwrap_or(defaults.temperature_c),
            soil_ph: self.validation.soil_ph.unwrap_or(defaults.soil_ph),
            nutrient_kg_per_ha: self
                .validation
                .nutrient_kg_per_ha
                .unwrap_or(defaults.nutrient_kg_per_ha),
        }
    }

    fn output_format(&self) -> OutputFormat {
        self.output.format
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.model_path(), Path::new(DEFAULT_MODEL_PATH));
        assert_eq!(config.validation_limits(), ValidationLimits::default());
        assert_eq!(config.output_format(), OutputFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[model]
path = "models/wheat.json"

[validation]
rainfall_mm = { min = 200.0, max = 3000.0 }
soil_ph = { min = 4.0, max = 9.0 }

[output]
format = "json"

[logging]
verbose = true
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.model_path(), Path::new("models/wheat.json"));
        let limits = config.validation_limits();
        assert_eq!(limits.rainfall_mm, Range::new(200.0, 3000.0));
        assert_eq!(limits.soil_ph, Range::new(4.0, 9.0));
        assert_eq!(limits.temperature_c, ValidationLimits::default().temperature_c);
        assert_eq!(config.output_format(), OutputFormat::Json);
        assert!(config.logging.verbose);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MYLAND_TEST_MODEL_PATH", "/srv/models/yield.json");

        let toml_content = r#"
[model]
path = "${MYLAND_TEST_MODEL_PATH}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.model_path(), Path::new("/srv/models/yield.json"));

        std::env::remove_var("MYLAND_TEST_MODEL_PATH");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[validation]
soil_ph = { min = 2.0, max = 16.0 }
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("validation.soil_ph"));
    }

    #[test]
    fn test_rejects_unknown_format() {
        let result = AppConfig::from_toml_str("[output]\nformat = \"xml\"\n");
        assert!(matches!(result, Err(YieldError::ConfigError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[model]\npath = \"file-test.json\"\n")
            .unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.model_path(), Path::new("file-test.json"));
    }
}
