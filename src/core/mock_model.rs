//! Deterministic stand-in predictor used when no trained artifact loads.
//!
//! The yield is the historical baseline for the (state, crop) pair scaled by
//! a suitability score built from rainfall, temperature and pH:
//!
//! ```text
//! r = 1 - exp(-rainfall / rain_scale)           saturating in rainfall
//! t = exp(-((temperature - t_opt) / 8)^2)       peaks at the crop optimum
//! p = max(0, 1 - ((ph - ph_opt) / 3)^2)         peaks near neutral / crop optimum
//! s = 0.4 r + 0.35 t + 0.25 p                   in [0, 1]
//! yield      = baseline * (0.4 + 0.6 s)
//! confidence = 0.35 + 0.2 s                     in [0.35, MOCK_CONFIDENCE_MAX]
//! ```

use crate::domain::model::{FeatureVector, ModelKind, PredictionResult};
use crate::reference::agronomy;

/// Highest confidence the mock ever reports. Trained artifacts must claim
/// more than this to be accepted.
pub const MOCK_CONFIDENCE_MAX: f64 = 0.55;

const MOCK_CONFIDENCE_MIN: f64 = 0.35;
const DEFAULT_RAIN_SCALE_MM: f64 = 600.0;
const DEFAULT_OPTIMAL_TEMPERATURE_C: f64 = 25.0;
const DEFAULT_OPTIMAL_PH: f64 = 6.5;
const TEMPERATURE_SPREAD_C: f64 = 8.0;
const PH_SPREAD: f64 = 3.0;

const RAIN_WEIGHT: f64 = 0.4;
const TEMPERATURE_WEIGHT: f64 = 0.35;
const PH_WEIGHT: f64 = 0.25;

/// Per-factor breakdown, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuitabilityScores {
    pub rainfall: f64,
    pub temperature: f64,
    pub soil_ph: f64,
}

impl SuitabilityScores {
    pub fn combined(&self) -> f64 {
        (RAIN_WEIGHT * self.rainfall + TEMPERATURE_WEIGHT * self.temperature + PH_WEIGHT * self.soil_ph)
            .clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MockModel;

impl MockModel {
    pub fn new() -> Self {
        Self
    }

    pub fn scores(&self, features: &FeatureVector) -> SuitabilityScores {
        let crop = features.crop();
        let climate = agronomy::climate_requirement(crop);

        let rain_scale = climate
            .map(|c| c.rainfall_mm.midpoint() / 2.0)
            .unwrap_or(DEFAULT_RAIN_SCALE_MM);
        let t_opt = climate
            .map(|c| c.temperature_c.midpoint())
            .unwrap_or(DEFAULT_OPTIMAL_TEMPERATURE_C);
        let ph_opt = agronomy::soil_preference(crop)
            .map(|p| p.ph.midpoint())
            .unwrap_or(DEFAULT_OPTIMAL_PH);

        let rainfall = 1.0 - (-features.rainfall_mm() / rain_scale).exp();
        let temperature = (-((features.temperature_c() - t_opt) / TEMPERATURE_SPREAD_C).powi(2)).exp();
        let soil_ph = (1.0 - ((features.soil_ph() - ph_opt) / PH_SPREAD).powi(2)).max(0.0);

        SuitabilityScores {
            rainfall: rainfall.clamp(0.0, 1.0),
            temperature,
            soil_ph,
        }
    }

    pub fn predict(&self, features: &FeatureVector) -> PredictionResult {
        let baseline = agronomy::historical_yield(features.state(), features.crop());
        let suitability = self.scores(features).combined();

        let yield_kg = baseline * (0.4 + 0.6 * suitability);
        let confidence =
            MOCK_CONFIDENCE_MIN + (MOCK_CONFIDENCE_MAX - MOCK_CONFIDENCE_MIN) * suitability;

        PredictionResult::new(yield_kg, confidence, ModelKind::Mock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SoilNutrients;
    use crate::reference::{Crop, State};
    use approx::assert_relative_eq;

    fn features(rainfall: f64, temperature: f64, ph: f64) -> FeatureVector {
        FeatureVector::new(
            State::Punjab,
            rainfall,
            temperature,
            ph,
            Crop::Wheat,
            SoilNutrients::default(),
        )
    }

    #[test]
    fn test_deterministic() {
        let model = MockModel::new();
        let input = features(800.0, 25.0, 6.5);
        assert_eq!(model.predict(&input), model.predict(&input));
    }

    #[test]
    fn test_known_value() {
        // Wheat: rain scale 275, t_opt 18.5, ph_opt 6.75; Punjab baseline 4800
        let input = features(800.0, 25.0, 6.5);
        let scores = MockModel::new().scores(&input);
        assert_relative_eq!(scores.rainfall, 1.0 - (-800.0f64 / 275.0).exp(), epsilon = 1e-12);
        assert_relative_eq!(scores.temperature, (-(6.5f64 / 8.0).powi(2)).exp(), epsilon = 1e-12);
        assert_relative_eq!(scores.soil_ph, 1.0 - (0.25f64 / 3.0).powi(2), epsilon = 1e-12);

        let prediction = MockModel::new().predict(&input);
        let s = scores.combined();
        assert_relative_eq!(prediction.yield_kg_per_ha, 4800.0 * (0.4 + 0.6 * s), epsilon = 1e-9);
        assert_eq!(prediction.source, ModelKind::Mock);
    }

    #[test]
    fn test_more_rain_never_hurts() {
        let model = MockModel::new();
        let mut previous = 0.0;
        for rainfall in (0..=5000).step_by(250) {
            let y = model.predict(&features(rainfall as f64, 20.0, 6.5)).yield_kg_per_ha;
            assert!(y >= previous);
            previous = y;
        }
    }

    #[test]
    fn test_bounded_across_input_space() {
        let model = MockModel::new();
        for rainfall in [0.0, 120.0, 800.0, 5000.0] {
            for temperature in [-10.0, 0.0, 25.0, 55.0] {
                for ph in [0.0, 4.8, 7.0, 14.0] {
                    let p = model.predict(&features(rainfall, temperature, ph));
                    assert!(p.yield_kg_per_ha >= 0.4 * 4800.0 - 1e-9);
                    assert!(p.yield_kg_per_ha <= 4800.0 + 1e-9);
                    assert!(p.confidence >= MOCK_CONFIDENCE_MIN);
                    assert!(p.confidence <= MOCK_CONFIDENCE_MAX);
                }
            }
        }
    }
}
