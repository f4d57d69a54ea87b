//! Raw form input to [`FeatureVector`].
//!
//! Validation is total: every input yields either a feature vector or a
//! [`ValidationError`] naming the offending field. Checks run in a fixed
//! order (state, crop, rainfall, temperature, soil_ph, nutrients) and the
//! first failure is reported.

use crate::domain::model::{FeatureVector, RawInputs, SoilNutrients};
use crate::reference::agronomy::Range;
use crate::reference::{Crop, State};
use crate::utils::error::{Bound, ValidationError};
use serde_json::Value;

/// Accepted closed ranges for the numeric inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationLimits {
    pub rainfall_mm: Range,
    pub temperature_c: Range,
    pub soil_ph: Range,
    pub nutrient_kg_per_ha: Range,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            rainfall_mm: Range::new(0.0, 5000.0),
            temperature_c: Range::new(-10.0, 55.0),
            soil_ph: Range::new(0.0, 14.0),
            nutrient_kg_per_ha: Range::new(0.0, 500.0),
        }
    }
}

const STATE_KEYS: &[&str] = &["state"];
const CROP_KEYS: &[&str] = &["crop", "crop_type"];
const RAINFALL_KEYS: &[&str] = &["rainfall", "rainfall_mm"];
const TEMPERATURE_KEYS: &[&str] = &["temperature", "temperature_c"];
const PH_KEYS: &[&str] = &["soil_ph", "ph"];

#[derive(Debug, Clone, Default)]
pub struct InputValidator {
    limits: ValidationLimits,
}

impl InputValidator {
    pub fn new(limits: ValidationLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &ValidationLimits {
        &self.limits
    }

    pub fn validate(&self, raw: &RawInputs) -> Result<FeatureVector, ValidationError> {
        let state = parse_choice("state", lookup(raw, STATE_KEYS), State::parse, State::names)?;
        let crop = parse_choice("crop", lookup(raw, CROP_KEYS), Crop::parse, Crop::names)?;

        let rainfall = required_number("rainfall", lookup(raw, RAINFALL_KEYS))?;
        check_range("rainfall", rainfall, self.limits.rainfall_mm)?;

        let temperature = required_number("temperature", lookup(raw, TEMPERATURE_KEYS))?;
        check_range("temperature", temperature, self.limits.temperature_c)?;

        let soil_ph = required_number("soil_ph", lookup(raw, PH_KEYS))?;
        check_range("soil_ph", soil_ph, self.limits.soil_ph)?;

        let nutrients = SoilNutrients {
            nitrogen: self.optional_nutrient(raw, "nitrogen")?,
            phosphorus: self.optional_nutrient(raw, "phosphorus")?,
            potassium: self.optional_nutrient(raw, "potassium")?,
        };

        Ok(FeatureVector::new(
            state,
            rainfall,
            temperature,
            soil_ph,
            crop,
            nutrients,
        ))
    }

    fn optional_nutrient(
        &self,
        raw: &RawInputs,
        field: &str,
    ) -> Result<Option<f64>, ValidationError> {
        match lookup(raw, &[field]) {
            None => Ok(None),
            Some(value) => {
                let amount = parse_number(field, value)?;
                check_range(field, amount, self.limits.nutrient_kg_per_ha)?;
                Ok(Some(amount))
            }
        }
    }
}

/// First non-null value under any of the accepted keys. Blank strings count
/// as absent so an empty form field reads as "missing".
fn lookup<'a>(raw: &'a RawInputs, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| raw.get(*key))
        .find(|value| match value {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        })
}

fn parse_choice<T>(
    field: &str,
    value: Option<&Value>,
    parse: impl Fn(&str) -> Option<T>,
    allowed: impl Fn() -> Vec<String>,
) -> Result<T, ValidationError> {
    let value = value.ok_or_else(|| ValidationError::MissingField {
        field: field.to_string(),
    })?;
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    };
    parse(&text).ok_or_else(|| ValidationError::InvalidChoice {
        field: field.to_string(),
        value: text,
        allowed: allowed(),
    })
}

fn required_number(field: &str, value: Option<&Value>) -> Result<f64, ValidationError> {
    let value = value.ok_or_else(|| ValidationError::MissingField {
        field: field.to_string(),
    })?;
    parse_number(field, value)
}

fn parse_number(field: &str, value: &Value) -> Result<f64, ValidationError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        // -0.0 normalizes to 0.0
        Some(n) if n.is_finite() => Ok(n + 0.0),
        _ => Err(ValidationError::InvalidNumber {
            field: field.to_string(),
            value: match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        }),
    }
}

fn check_range(field: &str, value: f64, range: Range) -> Result<(), ValidationError> {
    let bound = if value < range.min {
        Bound::Min(range.min)
    } else if value > range.max {
        Bound::Max(range.max)
    } else {
        return Ok(());
    };
    Err(ValidationError::InvalidRange {
        field: field.to_string(),
        value,
        bound,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(pairs: &[(&str, Value)]) -> RawInputs {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn punjab_wheat() -> RawInputs {
        raw(&[
            ("state", json!("Punjab")),
            ("rainfall", json!(800)),
            ("temperature", json!(25)),
            ("soil_ph", json!(6.5)),
            ("crop", json!("Wheat")),
        ])
    }

    #[test]
    fn test_accepts_valid_inputs() {
        let features = InputValidator::default().validate(&punjab_wheat()).unwrap();
        assert_eq!(features.state(), State::Punjab);
        assert_eq!(features.crop(), Crop::Wheat);
        assert_eq!(features.rainfall_mm(), 800.0);
        assert_eq!(features.nutrients(), SoilNutrients::default());
    }

    #[test]
    fn test_rejects_negative_rainfall() {
        let mut inputs = punjab_wheat();
        inputs.insert("rainfall".to_string(), json!(-5));

        let err = InputValidator::default().validate(&inputs).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidRange {
                field: "rainfall".to_string(),
                value: -5.0,
                bound: Bound::Min(0.0),
            }
        );
    }

    #[test]
    fn test_accepts_low_rainfall() {
        let mut inputs = punjab_wheat();
        inputs.insert("rainfall".to_string(), json!(120));
        let features = InputValidator::default().validate(&inputs).unwrap();
        assert_eq!(features.rainfall_mm(), 120.0);
    }

    #[test]
    fn test_upper_bounds_are_reported() {
        let mut inputs = punjab_wheat();
        inputs.insert("soil_ph".to_string(), json!(14.5));
        let err = InputValidator::default().validate(&inputs).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidRange { ref field, bound: Bound::Max(max), .. }
                if field == "soil_ph" && max == 14.0
        ));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let mut inputs = punjab_wheat();
        inputs.insert("soil_ph".to_string(), json!(0));
        inputs.insert("rainfall".to_string(), json!(5000));
        assert!(InputValidator::default().validate(&inputs).is_ok());
    }

    #[test]
    fn test_rejects_unknown_crop() {
        let mut inputs = punjab_wheat();
        inputs.insert("crop".to_string(), json!("unicorn-grain"));
        let err = InputValidator::default().validate(&inputs).unwrap_err();
        match err {
            ValidationError::InvalidChoice { field, value, allowed } => {
                assert_eq!(field, "crop");
                assert_eq!(value, "unicorn-grain");
                assert_eq!(allowed.len(), 20);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_accepts_every_catalog_crop() {
        let validator = InputValidator::default();
        for crop in Crop::all() {
            let mut inputs = punjab_wheat();
            inputs.insert("crop".to_string(), json!(crop.name()));
            assert_eq!(validator.validate(&inputs).unwrap().crop(), crop);
        }
    }

    #[test]
    fn test_aliases_and_string_numbers() {
        let inputs = raw(&[
            ("state", json!("tn")),
            ("rainfall_mm", json!(" 950.5 ")),
            ("temperature_c", json!("28")),
            ("ph", json!(7)),
            ("crop_type", json!("rice")),
            ("nitrogen", json!("45")),
        ]);
        let features = InputValidator::default().validate(&inputs).unwrap();
        assert_eq!(features.state(), State::TamilNadu);
        assert_eq!(features.rainfall_mm(), 950.5);
        assert_eq!(features.nutrients().nitrogen, Some(45.0));
    }

    #[test]
    fn test_reports_instead_of_panicking_on_odd_types() {
        let validator = InputValidator::default();

        let mut inputs = punjab_wheat();
        inputs.insert("temperature".to_string(), json!([1, 2]));
        assert!(matches!(
            validator.validate(&inputs),
            Err(ValidationError::InvalidNumber { ref field, .. }) if field == "temperature"
        ));

        let mut inputs = punjab_wheat();
        inputs.insert("temperature".to_string(), json!("NaN"));
        assert!(matches!(
            validator.validate(&inputs),
            Err(ValidationError::InvalidNumber { .. })
        ));

        let mut inputs = punjab_wheat();
        inputs.insert("state".to_string(), json!(42));
        assert!(matches!(
            validator.validate(&inputs),
            Err(ValidationError::InvalidChoice { ref value, .. }) if value == "42"
        ));

        let mut inputs = punjab_wheat();
        inputs.insert("crop".to_string(), json!("   "));
        assert!(matches!(
            validator.validate(&inputs),
            Err(ValidationError::MissingField { ref field }) if field == "crop"
        ));
    }

    #[test]
    fn test_nutrient_range() {
        let mut inputs = punjab_wheat();
        inputs.insert("potassium".to_string(), json!(900));
        let err = InputValidator::default().validate(&inputs).unwrap_err();
        assert_eq!(err.field(), "potassium");
    }

    #[test]
    fn test_custom_limits() {
        let limits = ValidationLimits {
            rainfall_mm: Range::new(200.0, 3000.0),
            ..Default::default()
        };
        let mut inputs = punjab_wheat();
        inputs.insert("rainfall".to_string(), json!(120));
        let err = InputValidator::new(limits).validate(&inputs).unwrap_err();
        assert_eq!(err.field(), "rainfall");
    }
}
