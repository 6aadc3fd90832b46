//! Unit conversions backing the recipe card and the timer display.
//!
//! Temperature converts between Fahrenheit and Celsius for display, and
//! durations convert between a total-seconds count and the `mm:ss` string
//! the countdown shows.
//!
//! # Example
//!
//! ```
//! use brewcoffee_core::models::TemperatureUnit;
//! use brewcoffee_core::units::{duration, temperature};
//!
//! let c = temperature::convert(212.0, TemperatureUnit::Fahrenheit, TemperatureUnit::Celsius);
//! assert_eq!(c, 100.0);
//!
//! let interval = duration::parse("01:30").expect("valid clock string");
//! assert_eq!(interval.total_seconds(), 90);
//! assert_eq!(duration::format(90), "01:30");
//! ```

pub mod duration;
pub mod temperature;

use crate::error::DurationError;
use crate::models::{PourInterval, TemperatureUnit};

/// Parse a strict `mm:ss` string.
#[uniffi::export]
pub fn parse_duration(input: String) -> Result<PourInterval, DurationError> {
    duration::parse(&input)
}

/// Parse `mm:ss`, or a bare non-negative total-seconds count.
#[uniffi::export]
pub fn parse_duration_lenient(input: String) -> Result<PourInterval, DurationError> {
    duration::parse_lenient(&input)
}

/// Format a total-seconds count as `mm:ss`.
#[uniffi::export]
pub fn format_duration(total_seconds: u32) -> String {
    duration::format(total_seconds)
}

/// Convert a temperature for display in the preferred unit.
#[uniffi::export]
pub fn convert_temperature(value: f64, from: TemperatureUnit, to: TemperatureUnit) -> f64 {
    temperature::convert(value, from, to)
}
