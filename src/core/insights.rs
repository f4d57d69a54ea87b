//! Comparisons against reference data: historical yield, market value,
//! climate fit and follow-up actions. All pure lookups over the inputs and
//! the prediction.

use crate::domain::model::{
    ClimateSuitability, FeatureVector, GrowingConditions, HistoricalComparison, Insights,
    MarketEstimate, PerformanceTier, PredictionResult, RegionalYield,
};
use crate::reference::agronomy::{self, Range};
use crate::reference::{Crop, State};

pub const HECTARES_PER_ACRE: f64 = 0.4047;

const RELIABILITY_WITH_STATE_DATA: f64 = 85.0;
const RELIABILITY_WITHOUT_STATE_DATA: f64 = 70.0;
const NEUTRAL_CLIMATE_SCORE: f64 = 75.0;

pub fn build_insights(features: &FeatureVector, prediction: &PredictionResult) -> Insights {
    let historical = compare_with_history(features, prediction);
    let market = estimate_market(features, prediction, historical.historical_yield);
    let climate = climate_suitability(features);
    let growing = growing_conditions(features.crop());
    let regional_comparison = regional_comparison(features.crop());
    let action_items = action_items(prediction.yield_kg_per_ha > historical.historical_yield);

    Insights {
        historical,
        market,
        climate,
        growing,
        regional_comparison,
        action_items,
    }
}

pub fn compare_with_history(
    features: &FeatureVector,
    prediction: &PredictionResult,
) -> HistoricalComparison {
    let state = features.state();
    let crop = features.crop();
    let historical_yield = agronomy::historical_yield(state, crop);
    let predicted = prediction.yield_kg_per_ha;

    // historical_yield is always positive, the reference tables have no zeros
    let yield_ratio = predicted / historical_yield;

    HistoricalComparison {
        historical_yield,
        data_source: format!("Average yield data for {} in {}", crop, state),
        reliability: if agronomy::has_historical_data(state) {
            RELIABILITY_WITH_STATE_DATA
        } else {
            RELIABILITY_WITHOUT_STATE_DATA
        },
        yield_ratio,
        difference_kg: predicted - historical_yield,
        difference_pct: (yield_ratio - 1.0) * 100.0,
        tier: performance_tier(yield_ratio),
    }
}

pub fn performance_tier(yield_ratio: f64) -> PerformanceTier {
    if yield_ratio > 1.2 {
        PerformanceTier::Outstanding
    } else if yield_ratio > 1.0 {
        PerformanceTier::AboveAverage
    } else if yield_ratio > 0.8 {
        PerformanceTier::RoomForGrowth
    } else {
        PerformanceTier::LearningJourney
    }
}

pub fn estimate_market(
    features: &FeatureVector,
    prediction: &PredictionResult,
    historical_yield: f64,
) -> MarketEstimate {
    let rate = agronomy::market_rate(features.crop());
    let revenue_per_hectare = prediction.yield_kg_per_ha * rate;
    MarketEstimate {
        rate_inr_per_kg: rate,
        revenue_per_hectare,
        revenue_per_acre: revenue_per_hectare * HECTARES_PER_ACRE,
        historical_revenue: historical_yield * rate,
    }
}

/// 100 inside the range, falling linearly to 0 one range-width outside it.
fn range_score(value: f64, range: Range) -> f64 {
    if range.contains(value) {
        return 100.0;
    }
    let distance = if value < range.min {
        range.min - value
    } else {
        value - range.max
    };
    (100.0 * (1.0 - distance / range.width())).max(0.0)
}

pub fn climate_suitability(features: &FeatureVector) -> ClimateSuitability {
    match agronomy::climate_requirement(features.crop()) {
        Some(req) => {
            let temperature = range_score(features.temperature_c(), req.temperature_c);
            let rainfall = range_score(features.rainfall_mm(), req.rainfall_mm);
            ClimateSuitability {
                temperature,
                rainfall,
                overall: (temperature + rainfall) / 2.0,
            }
        }
        None => ClimateSuitability {
            temperature: NEUTRAL_CLIMATE_SCORE,
            rainfall: NEUTRAL_CLIMATE_SCORE,
            overall: NEUTRAL_CLIMATE_SCORE,
        },
    }
}

pub fn growing_conditions(crop: Crop) -> GrowingConditions {
    let climate = agronomy::climate_requirement(crop);
    let soil = agronomy::soil_preference(crop);
    GrowingConditions {
        seasons: agronomy::seasons(crop),
        growing_period: climate.map(|c| c.season),
        humidity: climate.map(|c| c.humidity),
        soil_types: soil.map(|s| s.soil_types.to_vec()).unwrap_or_default(),
        drainage: soil.map(|s| s.drainage),
    }
}

/// Recorded average yield of `crop` in every state that publishes one,
/// in catalog order.
pub fn regional_comparison(crop: Crop) -> Vec<RegionalYield> {
    State::all()
        .filter_map(|state| {
            agronomy::state_historical_yield(state, crop).map(|yield_kg_per_ha| RegionalYield {
                state,
                yield_kg_per_ha,
            })
        })
        .collect()
}

pub fn action_items(above_historical: bool) -> Vec<String> {
    let mut items: Vec<String> = if above_historical {
        vec![
            "Your conditions are great! Focus on maintaining current practices".to_string(),
            "Consider expanding cultivation area for increased profits".to_string(),
        ]
    } else {
        vec![
            "Monitor water supply and plan irrigation carefully".to_string(),
            "Consider soil health improvement measures".to_string(),
        ]
    };
    items.extend(
        [
            "Keep track of market prices for best selling time",
            "Watch weather forecasts and plan accordingly",
            "Connect with local agricultural extension officers for guidance",
        ]
        .iter()
        .map(|s| s.to_string()),
    );
    items
}
