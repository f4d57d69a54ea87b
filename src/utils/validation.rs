use crate::reference::agronomy::Range;
use crate::utils::error::{Result, YieldError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(YieldError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(YieldError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// A configured input range must be finite, ordered, and sit inside the
/// physically meaningful `outer` range (e.g. pH within 0-14).
pub fn validate_limit_range(field_name: &str, range: Range, outer: Range) -> Result<()> {
    let value = format!("{}..={}", range.min, range.max);
    if !range.min.is_finite() || !range.max.is_finite() {
        return Err(YieldError::InvalidConfigValueError {
            field: field_name.to_string(),
            value,
            reason: "Bounds must be finite numbers".to_string(),
        });
    }
    if range.min > range.max {
        return Err(YieldError::InvalidConfigValueError {
            field: field_name.to_string(),
            value,
            reason: "min must not exceed max".to_string(),
        });
    }
    if range.min < outer.min || range.max > outer.max {
        return Err(YieldError::InvalidConfigValueError {
            field: field_name.to_string(),
            value,
            reason: format!("Range must lie within {} and {}", outer.min, outer.max),
        });
    }
    Ok(())
}
