//! Fahrenheit/Celsius conversion for the recipe card.

use crate::models::TemperatureUnit;

/// Convert `value` between temperature scales.
///
/// Identity when the units already match; otherwise rounded to the nearest
/// whole degree, which is what the recipe card displays. Inputs are trusted
/// recipe data, so there are no error cases.
pub fn convert(value: f64, from: TemperatureUnit, to: TemperatureUnit) -> f64 {
    if from == to {
        return value;
    }
    match to {
        TemperatureUnit::Celsius => ((value - 32.0) * 5.0 / 9.0).round(),
        TemperatureUnit::Fahrenheit => (value * 9.0 / 5.0 + 32.0).round(),
    }
}
