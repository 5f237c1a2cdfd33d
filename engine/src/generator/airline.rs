use core::ops::RangeInclusive;
use std::collections::BTreeMap;

use turborand::{TurboRand, rng::Rng};

use crate::{
  DEPARTURE_FLIGHT_NUMBERS, GenerateError, entities::pilot::FlightRules,
  split_list,
};

#[derive(Debug, Clone, PartialEq)]
pub struct AirlineChoice {
  pub airline: String,
  pub callsign: String,
  pub rules: FlightRules,
}

/// Builds a callsign such as `QTR42XY` from an airline code.
pub fn random_callsign(
  airline: &str,
  numbers: RangeInclusive<u32>,
  rng: &mut Rng,
) -> String {
  let mut string = String::new();

  string.push_str(airline);
  string.push_str(&rng.u32(numbers).to_string());
  string.push(rng.uppercase());
  string.push(rng.uppercase());

  string
}

/// Picks one of the `airlines` that fly to `destination` and gives it a
/// random flight number.
///
/// Nothing stops two departures ending up with the same callsign.
pub fn select_airline(
  destination: &str,
  airlines: &BTreeMap<String, String>,
  rng: &mut Rng,
) -> Result<AirlineChoice, GenerateError> {
  let serving: Vec<&String> = airlines
    .iter()
    .filter(|(_, destinations)| split_list(destinations).contains(&destination))
    .map(|(airline, _)| airline)
    .collect();

  let Some(airline) = rng.sample(&serving) else {
    return Err(GenerateError::NoServiceFound(destination.to_owned()));
  };

  Ok(AirlineChoice {
    airline: (*airline).clone(),
    callsign: random_callsign(airline, DEPARTURE_FLIGHT_NUMBERS, rng),
    rules: FlightRules::Instrument,
  })
}
