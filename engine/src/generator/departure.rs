use std::collections::BTreeMap;

use turborand::{TurboRand, rng::Rng};

use crate::{
  GenerateError, IFR_REMARK, MAX_SQUAWK, VFR_CRUISE_STEPS, VFR_REMARK,
  VFR_ROUTE,
  assets::ReferenceData,
  entities::{
    airport::Airport,
    pilot::{FlightRules, Pilot},
  },
  split_list,
};

use super::{
  TrafficMix, airline::select_airline, route::select_route, stand::StandPool,
};

/// Picks one of the comma-separated aircraft types listed for `key`.
pub(crate) fn pick_aircraft_type(
  types: &str,
  key: &str,
  rng: &mut Rng,
) -> Result<String, GenerateError> {
  let types = split_list(types);
  rng
    .sample(&types)
    .map(|t| t.to_string())
    .ok_or_else(|| GenerateError::ResourceLookupFailed {
      table: "aircraft types",
      key: key.to_owned(),
    })
}

/// Number of VFR departures out of `amount`, rounded down and never more
/// than `amount`.
pub fn vfr_count(amount: usize, vfr_percent: u32) -> usize {
  let share = amount as u128 * u128::from(vfr_percent) / 100;
  share.min(amount as u128) as usize
}

/// Advances the squawk counter, refusing codes that don't fit four digits.
fn next_squawk(squawk: &mut u16) -> Result<u16, GenerateError> {
  let Some(next) = squawk.checked_add(1).filter(|s| *s <= MAX_SQUAWK) else {
    return Err(GenerateError::ResourceExhausted("squawk codes".to_owned()));
  };

  *squawk = next;
  Ok(next)
}

/// Generates `amount` departures parked at `airport`: the VFR share first,
/// then IFR. Squawks count up from 0001 across both.
///
/// Every stand handed out is appended to `occupied`, and stands already in
/// `occupied` are never used.
pub fn generate_random_plans(
  amount: usize,
  airport: &Airport,
  mix: &TrafficMix,
  data: &ReferenceData,
  occupied: &mut Vec<String>,
  rng: &mut Rng,
) -> Result<Vec<Pilot>, GenerateError> {
  let icao = airport.icao.as_str();
  let mut stands = StandPool::for_airport(data, icao, occupied);

  if amount > stands.len() {
    return Err(GenerateError::ResourceExhausted("stands".to_owned()));
  }
  if amount > MAX_SQUAWK as usize {
    return Err(GenerateError::ResourceExhausted("squawk codes".to_owned()));
  }

  let vfr_count = vfr_count(amount, mix.vfr_percent);
  let mut pilots = Vec::with_capacity(amount);
  let mut last_squawk: u16 = 0;

  tracing::debug!(
    "Generating {} departures out of {} ({} stands free)",
    amount,
    icao,
    stands.len()
  );

  // VFR callsigns are consumed so none repeats within a run.
  let mut callsigns = data.vfr_callsigns.clone();
  let destinations = data.vfr_destinations(icao);

  for _ in 0..vfr_count {
    let squawk = next_squawk(&mut last_squawk)?;

    let callsign = rng.sample_iter(callsigns.keys()).cloned();
    let Some((callsign, types)) =
      callsign.and_then(|c| callsigns.remove_entry(&c))
    else {
      return Err(GenerateError::ResourceExhausted("VFR callsigns".to_owned()));
    };

    let Some(destination) = rng.sample(destinations) else {
      return Err(GenerateError::ResourceLookupFailed {
        table: "VFR destinations",
        key: icao.to_owned(),
      });
    };

    let aircraft_type = pick_aircraft_type(&types, &callsign, rng)?;
    let stand = stands.allocate(rng)?;
    occupied.push(stand.id.clone());

    let cruise_level = 500 * rng.u32(VFR_CRUISE_STEPS) + 1000;

    tracing::debug!("VFR {callsign} to {destination} from stand {}", stand.id);

    pilots.push(Pilot {
      callsign,
      lat: stand.lat,
      long: stand.long,
      altitude: airport.altitude,
      heading: stand.heading,
      departure: airport.icao,
      squawk,
      rules: FlightRules::Visual,
      aircraft_type,
      cruise_level: cruise_level.to_string(),
      destination: destination.clone(),
      remark: VFR_REMARK.to_owned(),
      route: VFR_ROUTE.to_owned(),
      ..Default::default()
    });
  }

  let no_airlines = BTreeMap::new();
  let airlines = data.departure_airlines(icao).unwrap_or(&no_airlines);

  for _ in vfr_count..amount {
    let squawk = next_squawk(&mut last_squawk)?;

    let route = select_route(data, icao, mix.invalid_route_percent, rng);
    let airline = select_airline(&route.destination, airlines, rng)?;
    let types = data.aircraft_types(&airline.airline).ok_or_else(|| {
      GenerateError::ResourceLookupFailed {
        table: "aircraft types",
        key: airline.airline.clone(),
      }
    })?;

    let aircraft_type = pick_aircraft_type(types, &airline.airline, rng)?;
    let stand = stands.allocate(rng)?;
    occupied.push(stand.id.clone());

    tracing::debug!(
      "IFR {} to {} ({:?} route) from stand {}",
      airline.callsign,
      route.destination,
      route.kind,
      stand.id
    );

    pilots.push(Pilot {
      callsign: airline.callsign,
      lat: stand.lat,
      long: stand.long,
      altitude: airport.altitude,
      heading: stand.heading,
      departure: airport.icao,
      squawk,
      rules: airline.rules,
      aircraft_type,
      cruise_level: route.cruise_level,
      destination: route.destination,
      remark: IFR_REMARK.to_owned(),
      route: route.route,
      ..Default::default()
    });
  }

  Ok(pilots)
}

#[cfg(test)]
mod tests {
  use itertools::Itertools;

  use turborand::SeededCore;

  use super::*;
  use crate::fixtures;

  fn mix(vfr_percent: u32, invalid_route_percent: u32) -> TrafficMix {
    TrafficMix {
      vfr_percent,
      invalid_route_percent,
      ..Default::default()
    }
  }

  #[test]
  fn test_vfr_count_rounds_down() {
    assert_eq!(vfr_count(10, 20), 2);
    assert_eq!(vfr_count(10, 25), 2);
    assert_eq!(vfr_count(3, 50), 1);
    assert_eq!(vfr_count(7, 0), 0);
    assert_eq!(vfr_count(7, 100), 7);
  }

  #[test]
  fn test_vfr_count_large_amounts() {
    assert_eq!(vfr_count(usize::MAX, 100), usize::MAX);
    assert_eq!(vfr_count(usize::MAX / 50, 100), usize::MAX / 50);
    assert_eq!(vfr_count(10, 150), 10);
  }

  #[test]
  fn test_next_squawk_stops_at_four_digits() {
    let mut squawk = MAX_SQUAWK - 1;

    assert_eq!(next_squawk(&mut squawk).unwrap(), MAX_SQUAWK);
    assert!(matches!(
      next_squawk(&mut squawk),
      Err(GenerateError::ResourceExhausted(what)) if what == "squawk codes"
    ));
    assert_eq!(squawk, MAX_SQUAWK);

    let mut squawk = u16::MAX;
    assert!(next_squawk(&mut squawk).is_err());
  }

  #[test]
  fn test_vfr_ifr_split() {
    let data = fixtures::othh();
    let mut occupied = Vec::new();

    let pilots = generate_random_plans(
      10,
      &Airport::default(),
      &mix(20, 10),
      &data,
      &mut occupied,
      &mut Rng::with_seed(42),
    )
    .unwrap();

    assert_eq!(pilots.len(), 10);
    assert_eq!(pilots.iter().filter(|p| p.is_vfr()).count(), 2);

    // VFR batch comes first
    assert!(pilots[..2].iter().all(|p| p.is_vfr()));
    assert!(pilots[2..].iter().all(|p| !p.is_vfr()));
  }

  #[test]
  fn test_squawks_count_up() {
    let data = fixtures::othh();
    let pilots = generate_random_plans(
      8,
      &Airport::default(),
      &mix(25, 0),
      &data,
      &mut Vec::new(),
      &mut Rng::with_seed(3),
    )
    .unwrap();

    let squawks: Vec<u16> = pilots.iter().map(|p| p.squawk).collect();
    assert_eq!(squawks, (1..=8).collect::<Vec<u16>>());
  }

  #[test]
  fn test_vfr_callsigns_are_unique() {
    let data = fixtures::othh();

    for seed in 0..20 {
      let pilots = generate_random_plans(
        4,
        &Airport::default(),
        &mix(100, 0),
        &data,
        &mut Vec::new(),
        &mut Rng::with_seed(seed),
      )
      .unwrap();

      assert!(pilots.iter().map(|p| &p.callsign).all_unique());
    }
  }

  #[test]
  fn test_vfr_fields() {
    let data = fixtures::othh();
    let pilots = generate_random_plans(
      4,
      &Airport::default(),
      &mix(100, 0),
      &data,
      &mut Vec::new(),
      &mut Rng::with_seed(8),
    )
    .unwrap();

    for pilot in pilots {
      assert_eq!(pilot.remark, "v");
      assert_eq!(pilot.route, "VFR");
      assert!(pilot.pseudo_route.is_empty());
      assert!(["1500", "2000", "2500"].contains(&pilot.cruise_level.as_str()));
      assert!(["OTBD", "OTHH"].contains(&pilot.destination.as_str()));

      let types = data.vfr_callsigns[&pilot.callsign].clone();
      assert!(types.split(',').any(|t| t == pilot.aircraft_type));
    }
  }

  #[test]
  fn test_ifr_fields() {
    let data = fixtures::othh();
    let pilots = generate_random_plans(
      10,
      &Airport::default(),
      &mix(0, 0),
      &data,
      &mut Vec::new(),
      &mut Rng::with_seed(8),
    )
    .unwrap();

    for pilot in pilots {
      assert_eq!(pilot.rules, FlightRules::Instrument);
      assert_eq!(pilot.remark, "I");
      assert_eq!(pilot.speed, 420);
      assert_eq!(pilot.altitude, 35);
      assert_eq!(pilot.owner(), pilot.departure);

      let entry = &data.routes["OTHH"][&pilot.destination];
      assert_eq!(&format!("{},{}", pilot.route, pilot.cruise_level), entry);
    }
  }

  #[test]
  fn test_stands_are_recorded_and_unique() {
    let data = fixtures::othh();
    let mut occupied = vec!["101".to_owned()];

    let pilots = generate_random_plans(
      fixtures::OTHH_STANDS - 1,
      &Airport::default(),
      &mix(20, 10),
      &data,
      &mut occupied,
      &mut Rng::with_seed(21),
    )
    .unwrap();

    assert_eq!(pilots.len(), fixtures::OTHH_STANDS - 1);
    assert_eq!(occupied.len(), fixtures::OTHH_STANDS);
    assert!(occupied.iter().all_unique());
    assert!(
      pilots
        .iter()
        .map(|p| (&p.lat, &p.long))
        .all_unique()
    );
  }

  #[test]
  fn test_more_pilots_than_stands() {
    let data = fixtures::othh();
    let result = generate_random_plans(
      fixtures::OTHH_STANDS + 1,
      &Airport::default(),
      &mix(0, 0),
      &data,
      &mut Vec::new(),
      &mut Rng::with_seed(21),
    );

    assert!(matches!(result, Err(GenerateError::ResourceExhausted(_))));
  }

  #[test]
  fn test_more_vfr_than_callsigns() {
    let data = fixtures::othh();
    let result = generate_random_plans(
      data.vfr_callsigns.len() + 1,
      &Airport::default(),
      &mix(100, 0),
      &data,
      &mut Vec::new(),
      &mut Rng::with_seed(21),
    );

    assert!(matches!(result, Err(GenerateError::ResourceExhausted(_))));
  }

  #[test]
  fn test_unknown_airport_without_service() {
    let mut data = fixtures::othh();
    let stands = data.stands["OTHH"].clone();
    data.stands.insert("ZZZZ".to_owned(), stands);

    let result = generate_random_plans(
      1,
      &Airport::new("ZZZZ", 0, "", "GND"),
      &mix(0, 0),
      &data,
      &mut Vec::new(),
      &mut Rng::with_seed(2),
    );

    // Direct routing back to ZZZZ, which no airline serves.
    assert!(matches!(
      result,
      Err(GenerateError::NoServiceFound(dest)) if dest == "ZZZZ"
    ));
  }

  #[test]
  fn test_huge_amount_is_an_error() {
    let data = fixtures::othh();

    for (amount, vfr_percent) in [(usize::MAX / 4, 0), (usize::MAX / 50, 100)] {
      let mut occupied = Vec::new();
      let result = generate_random_plans(
        amount,
        &Airport::default(),
        &mix(vfr_percent, 0),
        &data,
        &mut occupied,
        &mut Rng::with_seed(4),
      );

      assert!(matches!(
        result,
        Err(GenerateError::ResourceExhausted(what)) if what == "stands"
      ));
      assert!(occupied.is_empty());
    }
  }

  #[test]
  fn test_more_pilots_than_squawks() {
    let mut data = fixtures::othh();
    let stand = data.stands["OTHH"]["101"].clone();
    let stands = (0..=MAX_SQUAWK as usize)
      .map(|i| (format!("S{i}"), stand.clone()))
      .collect();
    data.stands.insert("OTHH".to_owned(), stands);

    let result = generate_random_plans(
      MAX_SQUAWK as usize + 1,
      &Airport::default(),
      &mix(0, 0),
      &data,
      &mut Vec::new(),
      &mut Rng::with_seed(4),
    );

    assert!(matches!(
      result,
      Err(GenerateError::ResourceExhausted(what)) if what == "squawk codes"
    ));
  }
}
