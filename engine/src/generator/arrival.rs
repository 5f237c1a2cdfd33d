use itertools::Itertools;
use serde::{Deserialize, Serialize};
use turborand::{TurboRand, rng::Rng};

use crate::{
  ARRIVAL_CALLSIGN_KEY, ARRIVAL_FLIGHT_NUMBERS, GenerateError, IFR_REMARK,
  assets::ReferenceData,
  encode_heading,
  entities::{
    airport::Airport,
    pilot::{FlightRules, Pilot},
  },
};

use super::{airline::random_callsign, departure::pick_aircraft_type};

/// Where and how inbound traffic appears, and the step-down it is scripted
/// to receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrivalProfile {
  pub lat: String,
  pub long: String,
  pub altitude: i32,
  /// In degrees.
  pub heading: f64,
  pub cruise_level: String,
  pub speed: u32,
  pub route: String,
  pub level_by_fix: String,
  pub level_by_level: String,
}

impl Default for ArrivalProfile {
  fn default() -> Self {
    Self {
      lat: "25.273056".to_owned(),
      long: "51.608056".to_owned(),
      altitude: 7000,
      heading: 22.0,
      cruise_level: "38000".to_owned(),
      speed: 180,
      route: "ARRIVAL".to_owned(),
      level_by_fix: "CF24".to_owned(),
      level_by_level: "2500".to_owned(),
    }
  }
}

/// One inbound aircraft into `arrival` per spawn offset. Arrivals don't take
/// stands and are owned by the arrival airport's ground position.
pub fn generate_arrival_plans(
  arrival: &Airport,
  offsets: &[String],
  profile: &ArrivalProfile,
  data: &ReferenceData,
  rng: &mut Rng,
) -> Result<Vec<Pilot>, GenerateError> {
  let airlines: Vec<&String> = data
    .arrival_airlines()
    .map(|a| a.keys().collect())
    .unwrap_or_default();
  let pseudo_route = data.arrival_route(&arrival.icao).iter().join(" ");
  let heading = encode_heading(profile.heading);

  let mut pilots = Vec::with_capacity(offsets.len());
  for offset in offsets {
    let Some(airline) = rng.sample(&airlines) else {
      return Err(GenerateError::ResourceLookupFailed {
        table: "IFR callsigns",
        key: ARRIVAL_CALLSIGN_KEY.to_owned(),
      });
    };

    let callsign = random_callsign(airline, ARRIVAL_FLIGHT_NUMBERS, rng);
    let types = data.aircraft_types(airline).ok_or_else(|| {
      GenerateError::ResourceLookupFailed {
        table: "aircraft types",
        key: (*airline).clone(),
      }
    })?;
    let aircraft_type = pick_aircraft_type(types, airline, rng)?;

    tracing::debug!("Arrival {callsign} into {} at +{offset}", arrival.icao);

    pilots.push(Pilot {
      callsign,
      lat: profile.lat.clone(),
      long: profile.long.clone(),
      altitude: profile.altitude,
      heading,
      departure: arrival.icao,
      squawk: 0,
      rules: FlightRules::Instrument,
      aircraft_type,
      cruise_level: profile.cruise_level.clone(),
      destination: arrival.icao.to_string(),
      remark: IFR_REMARK.to_owned(),
      route: profile.route.clone(),
      pseudo_route: pseudo_route.clone(),
      speed: profile.speed,
      spawn_delay: offset.clone(),
      level_by_fix: profile.level_by_fix.clone(),
      level_by_level: profile.level_by_level.clone(),
      owner: Some(arrival.icao),
    });
  }

  Ok(pilots)
}
