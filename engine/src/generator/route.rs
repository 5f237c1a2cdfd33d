use turborand::{TurboRand, rng::Rng};

use crate::{DIRECT_CRUISE_LEVEL, DIRECT_ROUTE, assets::ReferenceData};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RouteKind {
  Valid,
  /// Deliberately malformed, for the trainee to catch.
  Invalid,
  /// No route data was usable, so the aircraft goes nowhere in particular.
  Direct,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteChoice {
  pub destination: String,
  pub route: String,
  pub cruise_level: String,
  pub kind: RouteKind,
}

impl RouteChoice {
  pub fn direct(departure: &str) -> Self {
    Self {
      destination: departure.to_owned(),
      route: DIRECT_ROUTE.to_owned(),
      cruise_level: DIRECT_CRUISE_LEVEL.to_owned(),
      kind: RouteKind::Direct,
    }
  }

  /// Parses a `"route,level"` resource entry.
  fn parse(destination: &str, entry: &str, kind: RouteKind) -> Option<Self> {
    let mut parts = entry.split(',');
    let route = parts.next()?;
    let cruise_level = parts.next()?;

    Some(Self {
      destination: destination.to_owned(),
      route: route.to_owned(),
      cruise_level: cruise_level.to_owned(),
      kind,
    })
  }
}

fn pick_valid(
  data: &ReferenceData,
  departure: &str,
  rng: &mut Rng,
) -> Option<RouteChoice> {
  let routes = data.routes.get(departure)?;
  let (destination, entry) = rng.sample_iter(routes.iter())?;

  RouteChoice::parse(destination, entry, RouteKind::Valid)
}

fn pick_invalid(
  data: &ReferenceData,
  departure: &str,
  rng: &mut Rng,
) -> Option<RouteChoice> {
  let routes = data.invalid_routes.get(departure)?;
  let (destination, entries) = rng.sample_iter(routes.iter())?;
  let entry = rng.sample(entries)?;

  RouteChoice::parse(destination, entry, RouteKind::Invalid)
}

/// Picks a destination, route and cruise level for a departure from
/// `departure`. With `invalid_percent` chance the route comes from the
/// invalid route table instead.
///
/// Never fails: if the tables have nothing usable the aircraft is sent
/// direct to its own departure airport.
pub fn select_route(
  data: &ReferenceData,
  departure: &str,
  invalid_percent: u32,
  rng: &mut Rng,
) -> RouteChoice {
  let choice = if rng.u32(1..=100) <= invalid_percent {
    pick_invalid(data, departure, rng)
  } else {
    pick_valid(data, departure, rng)
  };

  match choice {
    Some(choice) => choice,
    None => {
      tracing::warn!("No usable route out of {departure}, filing direct");
      RouteChoice::direct(departure)
    }
  }
}
