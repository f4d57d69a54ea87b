//! Static agronomic reference tables.
//!
//! Values are regional averages for Indian agriculture. Yields are kg/ha,
//! market rates are INR/kg.

use crate::reference::catalog::{Crop, State};
use serde::{Deserialize, Serialize};

/// Yield assumed when neither the state nor the crop has reference data.
pub const FALLBACK_YIELD_KG_PER_HA: f64 = 2500.0;

/// Market rate assumed for crops without a listed rate.
pub const FALLBACK_MARKET_RATE: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Season {
    Kharif,
    Rabi,
    Zaid,
}

impl Season {
    pub fn label(&self) -> &'static str {
        match self {
            Season::Kharif => "Kharif (monsoon)",
            Season::Rabi => "Rabi (winter)",
            Season::Zaid => "Zaid (summer)",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ClimateRequirement {
    pub temperature_c: Range,
    pub rainfall_mm: Range,
    pub humidity: &'static str,
    pub season: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SoilPreference {
    pub soil_types: &'static [&'static str],
    pub ph: Range,
    pub drainage: &'static str,
}

pub fn climate_requirement(crop: Crop) -> Option<ClimateRequirement> {
    let (temperature_c, rainfall_mm, humidity, season) = match crop {
        Crop::Rice => (Range::new(20.0, 35.0), Range::new(1000.0, 2000.0), "High", "Kharif"),
        Crop::Wheat => (
            Range::new(12.0, 25.0),
            Range::new(450.0, 650.0),
            "Low to moderate",
            "Rabi",
        ),
        Crop::Cotton => (Range::new(21.0, 35.0), Range::new(500.0, 1000.0), "Moderate", "Kharif"),
        Crop::Maize => (
            Range::new(18.0, 32.0),
            Range::new(500.0, 800.0),
            "Moderate",
            "Kharif/Rabi",
        ),
        Crop::Sugarcane => (
            Range::new(20.0, 35.0),
            Range::new(1500.0, 2500.0),
            "High",
            "Year round",
        ),
        Crop::Soybean => (Range::new(15.0, 30.0), Range::new(450.0, 700.0), "Moderate", "Kharif"),
        _ => return None,
    };
    Some(ClimateRequirement {
        temperature_c,
        rainfall_mm,
        humidity,
        season,
    })
}

pub fn soil_preference(crop: Crop) -> Option<SoilPreference> {
    let pref = match crop {
        Crop::Rice => SoilPreference {
            soil_types: &["Clay", "Clay Loam"],
            ph: Range::new(5.5, 6.5),
            drainage: "Poor to moderate",
        },
        Crop::Wheat => SoilPreference {
            soil_types: &["Loam", "Clay Loam", "Sandy Loam"],
            ph: Range::new(6.0, 7.5),
            drainage: "Well drained",
        },
        Crop::Cotton => SoilPreference {
            soil_types: &["Black Cotton Soil", "Clay Loam"],
            ph: Range::new(5.8, 8.0),
            drainage: "Well drained",
        },
        Crop::Maize => SoilPreference {
            soil_types: &["Loam", "Sandy Loam", "Clay Loam"],
            ph: Range::new(6.0, 7.5),
            drainage: "Well drained",
        },
        Crop::Sugarcane => SoilPreference {
            soil_types: &["Clay Loam", "Loam"],
            ph: Range::new(6.5, 7.5),
            drainage: "Moderate",
        },
        Crop::Soybean => SoilPreference {
            soil_types: &["Clay Loam", "Sandy Loam"],
            ph: Range::new(6.0, 7.0),
            drainage: "Well drained",
        },
        _ => return None,
    };
    Some(pref)
}

/// Major crops per state, by name. Some entries (Jute, Tea, Coconut) are
/// outside the prediction catalog and only appear in advice text.
pub fn state_major_crops(state: State) -> &'static [&'static str] {
    match state {
        State::Punjab => &["Wheat", "Rice", "Maize", "Cotton"],
        State::Haryana => &["Wheat", "Rice", "Sugarcane", "Cotton"],
        State::UttarPradesh => &["Wheat", "Rice", "Sugarcane", "Potato"],
        State::MadhyaPradesh => &["Wheat", "Soybean", "Rice", "Cotton"],
        State::Maharashtra => &["Cotton", "Sugarcane", "Soybean", "Rice"],
        State::Karnataka => &["Rice", "Cotton", "Sugarcane", "Maize"],
        State::AndhraPradesh => &["Rice", "Cotton", "Groundnut", "Sugarcane"],
        State::TamilNadu => &["Rice", "Cotton", "Sugarcane", "Groundnut"],
        State::Gujarat => &["Cotton", "Groundnut", "Wheat", "Rice"],
        State::Rajasthan => &["Wheat", "Mustard", "Barley", "Cotton"],
        State::WestBengal => &["Rice", "Wheat", "Potato", "Jute"],
        State::Bihar => &["Rice", "Wheat", "Maize", "Sugarcane"],
        State::Odisha => &["Rice", "Wheat", "Sugarcane", "Cotton"],
        State::Telangana => &["Rice", "Cotton", "Maize", "Sugarcane"],
        State::Kerala => &["Rice", "Coconut", "Spices", "Rubber"],
        State::Assam => &["Rice", "Tea", "Jute", "Cotton"],
        _ => &[],
    }
}

pub fn is_major_crop(state: State, crop: Crop) -> bool {
    state_major_crops(state).contains(&crop.name())
}

pub fn has_historical_data(state: State) -> bool {
    matches!(
        state,
        State::Punjab
            | State::Haryana
            | State::UttarPradesh
            | State::Maharashtra
            | State::Karnataka
            | State::TamilNadu
            | State::Gujarat
            | State::WestBengal
            | State::Rajasthan
    )
}

/// Recorded state-level average yield, if the state publishes one for the crop.
pub fn state_historical_yield(state: State, crop: Crop) -> Option<f64> {
    let yield_kg = match (state, crop) {
        (State::Punjab, Crop::Rice) => 4200.0,
        (State::Punjab, Crop::Wheat) => 4800.0,
        (State::Punjab, Crop::Maize) => 3800.0,
        (State::Punjab, Crop::Cotton) => 1800.0,
        (State::Haryana, Crop::Rice) => 3900.0,
        (State::Haryana, Crop::Wheat) => 4600.0,
        (State::Haryana, Crop::Maize) => 3600.0,
        (State::Haryana, Crop::Cotton) => 1700.0,
        (State::UttarPradesh, Crop::Rice) => 2400.0,
        (State::UttarPradesh, Crop::Wheat) => 3200.0,
        (State::UttarPradesh, Crop::Sugarcane) => 68000.0,
        (State::UttarPradesh, Crop::Potato) => 22000.0,
        (State::Maharashtra, Crop::Cotton) => 1200.0,
        (State::Maharashtra, Crop::Sugarcane) => 78000.0,
        (State::Maharashtra, Crop::Soybean) => 1800.0,
        (State::Maharashtra, Crop::Rice) => 2800.0,
        (State::Karnataka, Crop::Rice) => 3200.0,
        (State::Karnataka, Crop::Cotton) => 1400.0,
        (State::Karnataka, Crop::Sugarcane) => 82000.0,
        (State::Karnataka, Crop::Maize) => 4500.0,
        (State::TamilNadu, Crop::Rice) => 3600.0,
        (State::TamilNadu, Crop::Cotton) => 1600.0,
        (State::TamilNadu, Crop::Sugarcane) => 98000.0,
        (State::TamilNadu, Crop::Groundnut) => 1900.0,
        (State::Gujarat, Crop::Cotton) => 1500.0,
        (State::Gujarat, Crop::Groundnut) => 2100.0,
        (State::Gujarat, Crop::Wheat) => 3400.0,
        (State::Gujarat, Crop::Rice) => 2600.0,
        (State::WestBengal, Crop::Rice) => 3400.0,
        (State::WestBengal, Crop::Wheat) => 3000.0,
        (State::WestBengal, Crop::Potato) => 24000.0,
        (State::Rajasthan, Crop::Wheat) => 3800.0,
        (State::Rajasthan, Crop::Mustard) => 1200.0,
        (State::Rajasthan, Crop::Barley) => 2800.0,
        (State::Rajasthan, Crop::Cotton) => 900.0,
        _ => return None,
    };
    Some(yield_kg)
}

/// National default yield for a crop.
pub fn default_crop_yield(crop: Crop) -> Option<f64> {
    let yield_kg = match crop {
        Crop::Rice => 3000.0,
        Crop::Wheat => 3200.0,
        Crop::Maize => 4000.0,
        Crop::Cotton => 1200.0,
        Crop::Sugarcane => 70000.0,
        Crop::Soybean => 1800.0,
        Crop::Groundnut => 1700.0,
        Crop::Pulses => 1200.0,
        _ => return None,
    };
    Some(yield_kg)
}

/// Baseline yield used for comparisons: state record, then crop default,
/// then [`FALLBACK_YIELD_KG_PER_HA`].
pub fn historical_yield(state: State, crop: Crop) -> f64 {
    state_historical_yield(state, crop)
        .or_else(|| default_crop_yield(crop))
        .unwrap_or(FALLBACK_YIELD_KG_PER_HA)
}

pub fn market_rate(crop: Crop) -> f64 {
    match crop {
        Crop::Rice => 20.0,
        Crop::Wheat => 22.0,
        Crop::Maize => 18.0,
        Crop::Cotton => 55.0,
        Crop::Sugarcane => 3.5,
        Crop::Soybean => 45.0,
        Crop::Groundnut => 52.0,
        Crop::Pulses => 65.0,
        Crop::Mustard => 50.0,
        Crop::Sunflower => 55.0,
        _ => FALLBACK_MARKET_RATE,
    }
}

pub fn seasons(crop: Crop) -> Vec<Season> {
    let mut seasons = Vec::new();
    if matches!(
        crop,
        Crop::Rice
            | Crop::Cotton
            | Crop::Sugarcane
            | Crop::Maize
            | Crop::Soybean
            | Crop::Groundnut
            | Crop::Jowar
            | Crop::Bajra
    ) {
        seasons.push(Season::Kharif);
    }
    if matches!(crop, Crop::Wheat | Crop::Barley | Crop::Mustard) {
        seasons.push(Season::Rabi);
    }
    if matches!(crop, Crop::Maize | Crop::Sunflower) {
        seasons.push(Season::Zaid);
    }
    seasons
}
