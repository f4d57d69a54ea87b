//! Closed catalogs of the states and crops the application knows about.
//!
//! Both the validator and the presentation layer read from here; anything
//! not listed is rejected rather than guessed.

use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum State {
    AndhraPradesh,
    ArunachalPradesh,
    Assam,
    Bihar,
    Chhattisgarh,
    Goa,
    Gujarat,
    Haryana,
    HimachalPradesh,
    Jharkhand,
    Karnataka,
    Kerala,
    MadhyaPradesh,
    Maharashtra,
    Manipur,
    Meghalaya,
    Mizoram,
    Nagaland,
    Odisha,
    Punjab,
    Rajasthan,
    Sikkim,
    TamilNadu,
    Telangana,
    Tripura,
    UttarPradesh,
    Uttarakhand,
    WestBengal,
    AndamanAndNicobarIslands,
    Chandigarh,
    DadraNagarHaveliDamanDiu,
    Delhi,
    JammuAndKashmir,
    Ladakh,
    Lakshadweep,
    Puducherry,
}

// (state, display name, abbreviation)
static STATES: [(State, &str, &str); 36] = [
    (State::AndhraPradesh, "Andhra Pradesh", "AP"),
    (State::ArunachalPradesh, "Arunachal Pradesh", "AR"),
    (State::Assam, "Assam", "AS"),
    (State::Bihar, "Bihar", "BR"),
    (State::Chhattisgarh, "Chhattisgarh", "CG"),
    (State::Goa, "Goa", "GA"),
    (State::Gujarat, "Gujarat", "GJ"),
    (State::Haryana, "Haryana", "HR"),
    (State::HimachalPradesh, "Himachal Pradesh", "HP"),
    (State::Jharkhand, "Jharkhand", "JH"),
    (State::Karnataka, "Karnataka", "KA"),
    (State::Kerala, "Kerala", "KL"),
    (State::MadhyaPradesh, "Madhya Pradesh", "MP"),
    (State::Maharashtra, "Maharashtra", "MH"),
    (State::Manipur, "Manipur", "MN"),
    (State::Meghalaya, "Meghalaya", "ML"),
    (State::Mizoram, "Mizoram", "MZ"),
    (State::Nagaland, "Nagaland", "NL"),
    (State::Odisha, "Odisha", "OR"),
    (State::Punjab, "Punjab", "PB"),
    (State::Rajasthan, "Rajasthan", "RJ"),
    (State::Sikkim, "Sikkim", "SK"),
    (State::TamilNadu, "Tamil Nadu", "TN"),
    (State::Telangana, "Telangana", "TG"),
    (State::Tripura, "Tripura", "TR"),
    (State::UttarPradesh, "Uttar Pradesh", "UP"),
    (State::Uttarakhand, "Uttarakhand", "UK"),
    (State::WestBengal, "West Bengal", "WB"),
    (State::AndamanAndNicobarIslands, "Andaman and Nicobar Islands", "AN"),
    (State::Chandigarh, "Chandigarh", "CH"),
    (
        State::DadraNagarHaveliDamanDiu,
        "Dadra and Nagar Haveli and Daman and Diu",
        "DN",
    ),
    (State::Delhi, "Delhi", "DL"),
    (State::JammuAndKashmir, "Jammu and Kashmir", "JK"),
    (State::Ladakh, "Ladakh", "LA"),
    (State::Lakshadweep, "Lakshadweep", "LD"),
    (State::Puducherry, "Puducherry", "PY"),
];

impl State {
    pub fn all() -> impl Iterator<Item = State> {
        STATES.iter().map(|(state, _, _)| *state)
    }

    fn entry(&self) -> &'static (State, &'static str, &'static str) {
        // STATES lists every variant in declaration order
        &STATES[*self as usize]
    }

    pub fn display_name(&self) -> &'static str {
        self.entry().1
    }

    pub fn abbreviation(&self) -> &'static str {
        self.entry().2
    }

    /// Accepts the display name or the two-letter abbreviation, ignoring case
    /// and surrounding whitespace.
    pub fn parse(input: &str) -> Option<State> {
        let needle = input.trim();
        STATES
            .iter()
            .find(|(_, name, abbr)| {
                name.eq_ignore_ascii_case(needle) || abbr.eq_ignore_ascii_case(needle)
            })
            .map(|(state, _, _)| *state)
    }

    pub fn names() -> Vec<String> {
        STATES.iter().map(|(_, name, _)| name.to_string()).collect()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl Serialize for State {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Crop {
    Rice,
    Wheat,
    Maize,
    Cotton,
    Sugarcane,
    Soybean,
    Groundnut,
    Pulses,
    Mustard,
    Sunflower,
    Barley,
    Jowar,
    Bajra,
    Ragi,
    Turmeric,
    Chili,
    Onion,
    Potato,
    Tomato,
    Banana,
}

static CROPS: [(Crop, &str); 20] = [
    (Crop::Rice, "Rice"),
    (Crop::Wheat, "Wheat"),
    (Crop::Maize, "Maize"),
    (Crop::Cotton, "Cotton"),
    (Crop::Sugarcane, "Sugarcane"),
    (Crop::Soybean, "Soybean"),
    (Crop::Groundnut, "Groundnut"),
    (Crop::Pulses, "Pulses"),
    (Crop::Mustard, "Mustard"),
    (Crop::Sunflower, "Sunflower"),
    (Crop::Barley, "Barley"),
    (Crop::Jowar, "Jowar"),
    (Crop::Bajra, "Bajra"),
    (Crop::Ragi, "Ragi"),
    (Crop::Turmeric, "Turmeric"),
    (Crop::Chili, "Chili"),
    (Crop::Onion, "Onion"),
    (Crop::Potato, "Potato"),
    (Crop::Tomato, "Tomato"),
    (Crop::Banana, "Banana"),
];

impl Crop {
    pub fn all() -> impl Iterator<Item = Crop> {
        CROPS.iter().map(|(crop, _)| *crop)
    }

    pub fn name(&self) -> &'static str {
        CROPS[*self as usize].1
    }

    pub fn parse(input: &str) -> Option<Crop> {
        let needle = input.trim();
        CROPS
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(needle))
            .map(|(crop, _)| *crop)
    }

    pub fn names() -> Vec<String> {
        CROPS.iter().map(|(_, name)| name.to_string()).collect()
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Crop {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
