use core::ops::RangeInclusive;

pub mod assets;
pub mod entities;
pub mod error;
pub mod generator;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::GenerateError;

/// Degrees to the simulator's compressed heading unit.
pub const HEADING_UNIT_FACTOR: f64 = 2.88;

/// Highest squawk that still fits the four-digit field.
pub const MAX_SQUAWK: u16 = 9999;

pub const DEFAULT_DEPARTURE_SPEED: u32 = 420;
pub const DEFAULT_LEVEL_BY_LEVEL: &str = "3000";

pub const DIRECT_ROUTE: &str = "DIRECT";
pub const DIRECT_CRUISE_LEVEL: &str = "10000";

pub const VFR_ROUTE: &str = "VFR";
pub const VFR_REMARK: &str = "v";
pub const IFR_REMARK: &str = "I";

pub const DEPARTURE_FLIGHT_NUMBERS: RangeInclusive<u32> = 11..=99;
pub const ARRIVAL_FLIGHT_NUMBERS: RangeInclusive<u32> = 10..=99;
/// VFR cruise levels are `1000 + 500 * n` feet.
pub const VFR_CRUISE_STEPS: RangeInclusive<u32> = 1..=3;

/// The key of the IFR callsign table that holds the arrival airlines.
pub const ARRIVAL_CALLSIGN_KEY: &str = "callsigns";

pub trait ToText {
  fn to_text(&self, w: &mut dyn std::fmt::Write) -> std::fmt::Result;
}

/// Encodes a heading in degrees the way the simulator expects it.
///
/// Degrees are truncated to a whole number and wrapped into `0..360` first,
/// then scaled and rounded half-up before being shifted into place.
pub fn encode_heading(degrees: f64) -> u32 {
  let degrees = degrees.trunc().rem_euclid(360.0);
  ((degrees * HEADING_UNIT_FACTOR + 0.5) as u32) << 2
}

/// Formats a transponder code as the simulator expects it.
pub fn format_squawk(squawk: u16) -> String {
  format!("{squawk:04}")
}

/// Splits a comma-separated resource value, dropping empty entries.
pub fn split_list(value: &str) -> Vec<&str> {
  value
    .split(',')
    .map(|s| s.trim())
    .filter(|s| !s.is_empty())
    .collect()
}
