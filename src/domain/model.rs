use crate::reference::agronomy::Season;
use crate::reference::{Crop, State};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Untyped form submission: field name to JSON number or string.
pub type RawInputs = HashMap<String, serde_json::Value>;

/// Numeric feature names a regression artifact may reference, besides the
/// one-hot `state=<ABBR>` and `crop=<Name>` indicators.
pub const NUMERIC_FEATURES: [&str; 6] = [
    "rainfall_mm",
    "temperature_c",
    "soil_ph",
    "nitrogen",
    "phosphorus",
    "potassium",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SoilNutrients {
    pub nitrogen: Option<f64>,
    pub phosphorus: Option<f64>,
    pub potassium: Option<f64>,
}

/// Validated agronomic inputs for one prediction.
///
/// Only the validator constructs these from user input, so holding one
/// means every field is inside its accepted range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    state: State,
    rainfall_mm: f64,
    temperature_c: f64,
    soil_ph: f64,
    crop: Crop,
    nutrients: SoilNutrients,
}

impl FeatureVector {
    pub(crate) fn new(
        state: State,
        rainfall_mm: f64,
        temperature_c: f64,
        soil_ph: f64,
        crop: Crop,
        nutrients: SoilNutrients,
    ) -> Self {
        Self {
            state,
            rainfall_mm,
            temperature_c,
            soil_ph,
            crop,
            nutrients,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn rainfall_mm(&self) -> f64 {
        self.rainfall_mm
    }

    pub fn temperature_c(&self) -> f64 {
        self.temperature_c
    }

    pub fn soil_ph(&self) -> f64 {
        self.soil_ph
    }

    pub fn crop(&self) -> Crop {
        self.crop
    }

    pub fn nutrients(&self) -> SoilNutrients {
        self.nutrients
    }

    /// Value of a named regression feature. `None` means the feature is an
    /// optional nutrient that was not supplied, or the name is unknown.
    pub fn feature_value(&self, name: &str) -> Option<f64> {
        if let Some(abbr) = name.strip_prefix("state=") {
            return Some(indicator(self.state.abbreviation().eq_ignore_ascii_case(abbr)));
        }
        if let Some(crop) = name.strip_prefix("crop=") {
            return Some(indicator(self.crop.name().eq_ignore_ascii_case(crop)));
        }
        match name {
            "rainfall_mm" => Some(self.rainfall_mm),
            "temperature_c" => Some(self.temperature_c),
            "soil_ph" => Some(self.soil_ph),
            "nitrogen" => self.nutrients.nitrogen,
            "phosphorus" => self.nutrients.phosphorus,
            "potassium" => self.nutrients.potassium,
            _ => None,
        }
    }
}

fn indicator(on: bool) -> f64 {
    if on {
        1.0
    } else {
        0.0
    }
}

/// Whether a regression artifact may reference this feature name.
pub fn is_known_feature(name: &str) -> bool {
    if let Some(abbr) = name.strip_prefix("state=") {
        return State::all().any(|s| s.abbreviation().eq_ignore_ascii_case(abbr));
    }
    if let Some(crop) = name.strip_prefix("crop=") {
        return Crop::parse(crop).is_some();
    }
    NUMERIC_FEATURES.contains(&name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Trained,
    Mock,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    pub yield_kg_per_ha: f64,
    pub confidence: f64,
    pub source: ModelKind,
}

impl PredictionResult {
    /// Non-finite or negative yields become 0; confidence is clamped to [0, 1].
    pub fn new(yield_kg_per_ha: f64, confidence: f64, source: ModelKind) -> Self {
        let yield_kg_per_ha = if yield_kg_per_ha.is_finite() {
            yield_kg_per_ha.max(0.0)
        } else {
            0.0
        };
        let confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            yield_kg_per_ha,
            confidence,
            source,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    Agronomy,
    Climate,
    Nutrients,
    Regional,
    Caveat,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationLevel {
    Success,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub category: RecommendationCategory,
    pub level: RecommendationLevel,
    pub message: String,
}

pub type RecommendationSet = Vec<Recommendation>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceTier {
    Outstanding,
    AboveAverage,
    RoomForGrowth,
    LearningJourney,
}

impl PerformanceTier {
    pub fn label(&self) -> &'static str {
        match self {
            PerformanceTier::Outstanding => "Outstanding Performance",
            PerformanceTier::AboveAverage => "Above Average",
            PerformanceTier::RoomForGrowth => "Room for Growth",
            PerformanceTier::LearningJourney => "Learning Journey",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalComparison {
    pub historical_yield: f64,
    pub data_source: String,
    pub reliability: f64,
    pub yield_ratio: f64,
    pub difference_kg: f64,
    pub difference_pct: f64,
    pub tier: PerformanceTier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketEstimate {
    pub rate_inr_per_kg: f64,
    pub revenue_per_hectare: f64,
    pub revenue_per_acre: f64,
    pub historical_revenue: f64,
}

/// Scores on a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClimateSuitability {
    pub temperature: f64,
    pub rainfall: f64,
    pub overall: f64,
}

/// Average recorded yield of the submitted crop in one state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionalYield {
    pub state: State,
    pub yield_kg_per_ha: f64,
}

/// When and where the crop grows best. Fields are `None` for crops
/// without a reference profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowingConditions {
    pub seasons: Vec<Season>,
    pub growing_period: Option<&'static str>,
    pub humidity: Option<&'static str>,
    pub soil_types: Vec<&'static str>,
    pub drainage: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    pub historical: HistoricalComparison,
    pub market: MarketEstimate,
    pub climate: ClimateSuitability,
    pub growing: GrowingConditions,
    pub regional_comparison: Vec<RegionalYield>,
    pub action_items: Vec<String>,
}

/// Everything the presentation layer needs for one submission.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    pub features: FeatureVector,
    pub prediction: PredictionResult,
    pub recommendations: RecommendationSet,
    pub model_is_mock: bool,
    pub insights: Insights,
    pub generated_at: DateTime<Utc>,
}
