//! Ratio arithmetic linking grounds, water and per-pour targets.
//!
//! All inputs are plain numbers from the session; no storage or platform
//! dependencies. Grounds edits recompute water to whole grams; water edits
//! recompute grounds to one decimal place.

use crate::error::EntryError;

/// Water mass in grams for a grounds mass at the given ratio, whole grams.
#[uniffi::export]
pub fn water_for_grounds(grounds: f64, ratio: f64) -> f64 {
    (grounds * ratio).round()
}

/// Grounds mass in grams for a water mass at the given ratio, one decimal
/// place.
#[uniffi::export]
pub fn grounds_for_water(water: f64, ratio: f64) -> f64 {
    if ratio <= 0.0 {
        return 0.0;
    }
    round1(water / ratio)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Target water range for one pour stage, as cumulative scale readings.
#[derive(Clone, Copy, Debug, PartialEq, uniffi::Record)]
pub struct PourWindow {
    /// Scale reading at which this pour begins (g).
    pub start: f64,
    /// Scale reading at which this pour ends (g).
    pub end: f64,
}

impl PourWindow {
    /// Lower bound rounded to whole grams for display.
    pub fn start_g(&self) -> u32 {
        self.start.round() as u32
    }

    /// Upper bound rounded to whole grams for display.
    pub fn end_g(&self) -> u32 {
        self.end.round() as u32
    }
}

/// Compute the target range for `current_pour` (1-indexed): each of the
/// `pours` stages gets an equal share of the total water.
#[uniffi::export]
pub fn pour_window(water: f64, pours: u32, current_pour: u32) -> PourWindow {
    if pours == 0 {
        return PourWindow {
            start: 0.0,
            end: 0.0,
        };
    }
    let per_pour = water / pours as f64;
    let stage = current_pour.max(1) as f64;
    PourWindow {
        start: (stage - 1.0) * per_pour,
        end: stage * per_pour,
    }
}

/// Gate for the numeric text fields.
///
/// An empty string is a transient state while the user is typing:
/// `Ok(None)`, nothing recomputed. Non-numeric or negative input rejects
/// the edit.
pub fn parse_entry(input: &str) -> Result<Option<f64>, EntryError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let value: f64 = trimmed.parse().map_err(|_| EntryError::NotNumeric {
        input: input.to_string(),
    })?;
    if !value.is_finite() {
        return Err(EntryError::NotNumeric {
            input: input.to_string(),
        });
    }
    if value < 0.0 {
        return Err(EntryError::Negative);
    }
    Ok(Some(value))
}
