//! `mm:ss` timer-entry parsing and display formatting.
//!
//! The strict grammar requires both components with seconds 0-59; the
//! lenient variant also accepts a bare total-seconds count, which the
//! time-edit field allows.

use nom::{
    character::complete::{char, digit1},
    combinator::{all_consuming, map_res},
    sequence::separated_pair,
    IResult,
};

use crate::error::DurationError;
use crate::models::PourInterval;

/// Parse a strict `mm:ss` string into minutes and seconds.
pub fn parse(input: &str) -> Result<PourInterval, DurationError> {
    match all_consuming(clock)(input.trim()) {
        Ok((_, interval)) => Ok(interval),
        Err(_) => Err(DurationError::InvalidFormat {
            input: input.to_string(),
        }),
    }
}

/// Parse `mm:ss`, or a bare non-negative integer taken as total seconds.
pub fn parse_lenient(input: &str) -> Result<PourInterval, DurationError> {
    let trimmed = input.trim();
    if trimmed.contains(':') {
        return parse(input);
    }
    match all_consuming(count)(trimmed) {
        Ok((_, total)) => Ok(PourInterval::from_total_seconds(total)),
        Err(_) => Err(DurationError::InvalidFormat {
            input: input.to_string(),
        }),
    }
}

/// Format a total-seconds count as `mm:ss`, both fields zero-padded to two
/// digits. The minutes field widens past two digits as needed.
pub fn format(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

fn clock(input: &str) -> IResult<&str, PourInterval> {
    let (input, (minutes, seconds)) = separated_pair(count, char(':'), count)(input)?;
    if seconds > 59 {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        )));
    }
    Ok((input, PourInterval { minutes, seconds }))
}

fn count(input: &str) -> IResult<&str, u32> {
    map_res(digit1, str::parse)(input)
}
