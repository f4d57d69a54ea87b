use std::fmt;
use thiserror::Error;

/// Which side of an accepted closed range a value fell outside of.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Min(f64),
    Max(f64),
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Min(min) => write!(f, "minimum {}", min),
            Bound::Max(max) => write!(f, "maximum {}", max),
        }
    }
}

/// Input problems. Reported to the user; the request stops before prediction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} = {value} is out of range (violates {bound})")]
    InvalidRange {
        field: String,
        value: f64,
        bound: Bound,
    },

    #[error("'{value}' is not a supported {field}")]
    InvalidChoice {
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("{field} must be a finite number, got '{value}'")]
    InvalidNumber { field: String, value: String },
}

impl ValidationError {
    pub fn field(&self) -> &str {
        match self {
            ValidationError::InvalidRange { field, .. }
            | ValidationError::InvalidChoice { field, .. }
            | ValidationError::MissingField { field }
            | ValidationError::InvalidNumber { field, .. } => field,
        }
    }
}

/// Reasons a trained model artifact could not be used. The model provider
/// handles these itself by switching to the mock, so they never reach
/// [`YieldError`].
#[derive(Error, Debug)]
pub enum ModelLoadError {
    #[error("cannot read model artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("model artifact {path} is corrupt: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("model artifact {path} is incompatible: {reason}")]
    Incompatible { path: String, reason: String },
}

#[derive(Error, Debug)]
pub enum YieldError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl YieldError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            YieldError::Validation(_) => ErrorCategory::Input,
            YieldError::ConfigError { .. } | YieldError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            YieldError::IoError(_) | YieldError::SerializationError(_) | YieldError::CsvError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            YieldError::Validation(_) => ErrorSeverity::Medium,
            YieldError::ConfigError { .. } | YieldError::InvalidConfigValueError { .. } => {
                ErrorSeverity::High
            }
            YieldError::IoError(_) | YieldError::SerializationError(_) | YieldError::CsvError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,   // 輸入錯誤
            ErrorSeverity::High => 1,     // 配置錯誤
            ErrorSeverity::Critical => 3, // 系統錯誤
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            YieldError::Validation(ValidationError::InvalidRange { field, value, bound }) => {
                format!("The {} value {} is not plausible ({}).", field, value, bound)
            }
            YieldError::Validation(ValidationError::InvalidChoice { field, value, .. }) => {
                format!("'{}' is not a {} we have data for.", value, field)
            }
            YieldError::Validation(ValidationError::MissingField { field }) => {
                format!("Please provide a value for {}.", field)
            }
            YieldError::Validation(ValidationError::InvalidNumber { field, value }) => {
                format!("The {} value '{}' is not a number.", field, value)
            }
            YieldError::ConfigError { message } => format!("Configuration problem: {}", message),
            YieldError::InvalidConfigValueError { field, value, reason } => {
                format!("Configuration value {} = '{}' is invalid: {}", field, value, reason)
            }
            other => format!("Unexpected failure: {}", other),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            YieldError::Validation(ValidationError::InvalidChoice { allowed, .. }) => {
                format!("Choose one of: {}", allowed.join(", "))
            }
            YieldError::Validation(_) => {
                "Check the input values against the accepted ranges (--help).".to_string()
            }
            YieldError::ConfigError { .. } | YieldError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line arguments and retry.".to_string()
            }
            YieldError::IoError(_) => "Check that the file exists and is readable.".to_string(),
            YieldError::SerializationError(_) | YieldError::CsvError(_) => {
                "Check that the input file is well formed.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, YieldError>;
