use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(pub String);

uniffi::custom_newtype!(RecipeId, String);

/// Temperature scale a recipe stores its water temperature in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, uniffi::Enum)]
pub enum TemperatureUnit {
    #[serde(rename = "F")]
    Fahrenheit,
    #[serde(rename = "C")]
    Celsius,
}

impl TemperatureUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Fahrenheit => "F",
            TemperatureUnit::Celsius => "C",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct WaterTemperature {
    pub value: f64,
    pub unit: TemperatureUnit,
}

/// Coarseness setting of the ground coffee.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, uniffi::Enum)]
pub enum Grind {
    #[serde(rename = "Extra Coarse")]
    ExtraCoarse,
    #[serde(rename = "Coarse")]
    Coarse,
    #[serde(rename = "Medium-Coarse")]
    MediumCoarse,
    #[serde(rename = "Medium")]
    Medium,
    #[serde(rename = "Medium-Fine")]
    MediumFine,
    #[serde(rename = "Fine")]
    Fine,
    #[serde(rename = "Very Fine")]
    VeryFine,
}

impl Grind {
    pub fn label(&self) -> &'static str {
        match self {
            Grind::ExtraCoarse => "Extra Coarse",
            Grind::Coarse => "Coarse",
            Grind::MediumCoarse => "Medium-Coarse",
            Grind::Medium => "Medium",
            Grind::MediumFine => "Medium-Fine",
            Grind::Fine => "Fine",
            Grind::VeryFine => "Very Fine",
        }
    }
}

/// Rest interval between pour stages. Seconds stay in 0-59 by validation;
/// the minutes field has no upper bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
pub struct PourInterval {
    pub minutes: u32,
    pub seconds: u32,
}

impl PourInterval {
    pub fn total_seconds(&self) -> u32 {
        self.minutes * 60 + self.seconds
    }

    pub fn from_total_seconds(total: u32) -> Self {
        PourInterval {
            minutes: total / 60,
            seconds: total % 60,
        }
    }
}

/// A brew recipe. The persisted form uses camelCase field names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub description: String,
    /// Grams of water per gram of grounds ("1:N").
    pub ratio: f64,
    /// Grams of grounds the recipe suggests starting from.
    pub suggested_grounds: f64,
    pub grind: Grind,
    pub water_temperature: WaterTemperature,
    /// Number of discrete pour stages (1-10).
    pub pours: u32,
    pub time_between_pours: PourInterval,
    pub comments: String,
}

/// Display theme preference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, uniffi::Enum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    System,
}
