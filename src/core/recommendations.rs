//! Threshold rules over inputs and prediction.
//!
//! Rules run in a fixed order and every rule that matches contributes; the
//! final general rule always fires, so the set is never empty.

use crate::domain::model::{
    FeatureVector, PredictionResult, Recommendation, RecommendationCategory as Category,
    RecommendationLevel as Level, RecommendationSet,
};
use crate::reference::agronomy::{self, Range};

pub const ACIDIC_PH: f64 = 5.5;
pub const ALKALINE_PH: f64 = 8.0;
pub const LOW_CONFIDENCE: f64 = 0.5;

// Used when the crop has no climate table entry.
const GENERIC_RAINFALL_MM: Range = Range::new(500.0, 2500.0);
const GENERIC_TEMPERATURE_C: Range = Range::new(15.0, 35.0);

const MIN_NITROGEN: f64 = 50.0;
const MIN_PHOSPHORUS: f64 = 20.0;
const MIN_POTASSIUM: f64 = 40.0;

const UNDERPERFORMING_RATIO: f64 = 0.8;

fn rec(category: Category, level: Level, message: String) -> Recommendation {
    Recommendation {
        category,
        level,
        message,
    }
}

pub fn recommend(features: &FeatureVector, prediction: &PredictionResult) -> RecommendationSet {
    let mut recs = Vec::new();

    soil_ph_rules(features, &mut recs);
    rainfall_rules(features, &mut recs);
    temperature_rules(features, &mut recs);
    nutrient_rules(features, &mut recs);
    regional_rules(features, &mut recs);
    yield_rules(features, prediction, &mut recs);

    if prediction.confidence < LOW_CONFIDENCE {
        recs.push(rec(
            Category::Caveat,
            Level::Warning,
            format!(
                "Prediction confidence is low ({:.0}%): the sample size behind this estimate is too small, treat it with caution and verify locally.",
                prediction.confidence * 100.0
            ),
        ));
    }

    recs.push(rec(
        Category::General,
        Level::Info,
        "Track market prices and weather forecasts, and connect with local agricultural extension officers for guidance.".to_string(),
    ));

    recs
}

fn soil_ph_rules(features: &FeatureVector, recs: &mut RecommendationSet) {
    let ph = features.soil_ph();
    if ph < ACIDIC_PH {
        recs.push(rec(
            Category::Agronomy,
            Level::Warning,
            format!(
                "Soil is acidic (pH {:.1}). Apply agricultural lime (liming) to raise pH toward 6.0-7.0.",
                ph
            ),
        ));
    } else if ph > ALKALINE_PH {
        recs.push(rec(
            Category::Agronomy,
            Level::Warning,
            format!(
                "Soil is alkaline (pH {:.1}). Apply gypsum or elemental sulfur and add organic matter.",
                ph
            ),
        ));
    }

    if let Some(pref) = agronomy::soil_preference(features.crop()) {
        if !pref.ph.contains(ph) {
            recs.push(rec(
                Category::Agronomy,
                Level::Info,
                format!(
                    "{} prefers soil pH {:.1}-{:.1} ({} soils).",
                    features.crop(),
                    pref.ph.min,
                    pref.ph.max,
                    pref.soil_types.join(", ")
                ),
            ));
        }
    }
}

fn rainfall_rules(features: &FeatureVector, recs: &mut RecommendationSet) {
    let range = agronomy::climate_requirement(features.crop())
        .map(|c| c.rainfall_mm)
        .unwrap_or(GENERIC_RAINFALL_MM);
    let rainfall = features.rainfall_mm();

    if rainfall < range.min {
        recs.push(rec(
            Category::Climate,
            Level::Warning,
            format!(
                "Rainfall of {:.0} mm is below the {:.0}-{:.0} mm {} needs. Plan supplementary irrigation (drip or sprinkler).",
                rainfall,
                range.min,
                range.max,
                features.crop()
            ),
        ));
    } else if rainfall > range.max {
        recs.push(rec(
            Category::Climate,
            Level::Warning,
            format!(
                "Rainfall of {:.0} mm exceeds the {:.0}-{:.0} mm {} needs. Ensure field drainage to avoid waterlogging.",
                rainfall,
                range.min,
                range.max,
                features.crop()
            ),
        ));
    }
}

fn temperature_rules(features: &FeatureVector, recs: &mut RecommendationSet) {
    let range = agronomy::climate_requirement(features.crop())
        .map(|c| c.temperature_c)
        .unwrap_or(GENERIC_TEMPERATURE_C);
    let temperature = features.temperature_c();

    if temperature > range.max {
        recs.push(rec(
            Category::Climate,
            Level::Warning,
            format!(
                "Average temperature {:.1}°C is above the {:.0}-{:.0}°C range: expect heat stress. Mulch and irrigate during hot spells.",
                temperature, range.min, range.max
            ),
        ));
    } else if temperature < range.min {
        recs.push(rec(
            Category::Climate,
            Level::Warning,
            format!(
                "Average temperature {:.1}°C is below the {:.0}-{:.0}°C range: expect cold stress. Adjust sowing dates.",
                temperature, range.min, range.max
            ),
        ));
    }
}

fn nutrient_rules(features: &FeatureVector, recs: &mut RecommendationSet) {
    let nutrients = features.nutrients();
    let checks = [
        ("Nitrogen", nutrients.nitrogen, MIN_NITROGEN, "urea or compost"),
        ("Phosphorus", nutrients.phosphorus, MIN_PHOSPHORUS, "DAP or rock phosphate"),
        ("Potassium", nutrients.potassium, MIN_POTASSIUM, "muriate of potash"),
    ];
    for (name, value, minimum, remedy) in checks {
        if let Some(value) = value {
            if value < minimum {
                recs.push(rec(
                    Category::Nutrients,
                    Level::Warning,
                    format!(
                        "{} is low ({:.0} kg/ha, target at least {:.0}). Consider {}.",
                        name, value, minimum, remedy
                    ),
                ));
            }
        }
    }
}

fn regional_rules(features: &FeatureVector, recs: &mut RecommendationSet) {
    let state = features.state();
    let majors = agronomy::state_major_crops(state);
    if majors.is_empty() {
        return;
    }
    if agronomy::is_major_crop(state, features.crop()) {
        recs.push(rec(
            Category::Regional,
            Level::Success,
            format!(
                "{} is a major crop in {}: local seed, inputs and markets are well established.",
                features.crop(),
                state
            ),
        ));
    } else {
        recs.push(rec(
            Category::Regional,
            Level::Info,
            format!("Major crops in {} are {}.", state, majors.join(", ")),
        ));
    }
}

fn yield_rules(
    features: &FeatureVector,
    prediction: &PredictionResult,
    recs: &mut RecommendationSet,
) {
    let historical = agronomy::historical_yield(features.state(), features.crop());
    let predicted = prediction.yield_kg_per_ha;

    if predicted >= historical {
        recs.push(rec(
            Category::Regional,
            Level::Success,
            format!(
                "Predicted {:.0} kg/ha meets or beats the regional average of {:.0} kg/ha. Maintain current practices.",
                predicted, historical
            ),
        ));
    } else if predicted < historical * UNDERPERFORMING_RATIO {
        recs.push(rec(
            Category::Regional,
            Level::Warning,
            format!(
                "Predicted {:.0} kg/ha is well below the regional average of {:.0} kg/ha. Review irrigation and soil health.",
                predicted, historical
            ),
        ));
    }
}
