pub mod airline;
pub mod arrival;
pub mod departure;
pub mod route;
pub mod stand;

use serde::{Deserialize, Serialize};
use turborand::rng::Rng;

use crate::{
  GenerateError,
  assets::ReferenceData,
  entities::{
    airport::{Airport, Controller},
    pilot::Pilot,
    scenario::Scenario,
  },
};

use arrival::{ArrivalProfile, generate_arrival_plans};
use departure::generate_random_plans;

/// Percentages shaping the generated departures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrafficMix {
  pub vfr_percent: u32,
  pub invalid_route_percent: u32,
  /// Accepted for compatibility, no generator reads it.
  pub invalid_level_percent: u32,
  /// Accepted for compatibility, no generator reads it.
  pub flight_plan_error_percent: u32,
}

impl Default for TrafficMix {
  fn default() -> Self {
    Self {
      vfr_percent: 20,
      invalid_route_percent: 10,
      invalid_level_percent: 10,
      flight_plan_error_percent: 5,
    }
  }
}

impl TrafficMix {
  pub fn validate(&self) -> Result<(), GenerateError> {
    let percentages = [
      ("vfr_percent", self.vfr_percent),
      ("invalid_route_percent", self.invalid_route_percent),
      ("invalid_level_percent", self.invalid_level_percent),
      ("flight_plan_error_percent", self.flight_plan_error_percent),
    ];

    for (name, value) in percentages {
      if value > 100 {
        return Err(GenerateError::InvalidPercentage { name, value });
      }
    }

    Ok(())
  }
}

/// Everything a scenario is generated from, apart from the reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioOptions {
  pub airport: Airport,
  pub approach_data: String,
  pub mix: TrafficMix,
  pub controllers: Vec<Controller>,
  /// How many departures to generate.
  pub auto_pilots: usize,
  /// Hand-written pilots, written out after the generated ones.
  pub manual_pilots: Vec<Pilot>,
  /// Spawn delay of each arrival, one arrival per entry.
  pub arrival_offsets: Vec<String>,
  pub arrival: ArrivalProfile,
}

impl Default for ScenarioOptions {
  fn default() -> Self {
    Self {
      airport: Airport::default(),
      approach_data: String::new(),
      mix: TrafficMix::default(),
      controllers: Vec::new(),
      auto_pilots: 0,
      manual_pilots: Vec::new(),
      arrival_offsets: Vec::new(),
      arrival: ArrivalProfile::default(),
    }
  }
}

/// Generates a complete scenario file.
///
/// Stands in `occupied` are left alone. The returned list is `occupied` plus
/// every stand this scenario parked an aircraft on, so it can be fed into the
/// next run.
pub fn generate_scenario(
  options: &ScenarioOptions,
  data: &ReferenceData,
  mut occupied: Vec<String>,
  rng: &mut Rng,
) -> Result<(String, Vec<String>), GenerateError> {
  options.mix.validate()?;

  let mut scenario =
    Scenario::new(options.airport.clone(), options.approach_data.clone());

  for controller in options.controllers.iter() {
    scenario.add_controller(controller.clone());
  }

  let departures = generate_random_plans(
    options.auto_pilots,
    &options.airport,
    &options.mix,
    data,
    &mut occupied,
    rng,
  )?;
  let arrivals = generate_arrival_plans(
    &options.airport,
    &options.arrival_offsets,
    &options.arrival,
    data,
    rng,
  )?;

  tracing::info!(
    "Generated {} departures ({} VFR) and {} arrivals for {} \
     ({} manual pilots)",
    departures.len(),
    departures.iter().filter(|p| p.is_vfr()).count(),
    arrivals.len(),
    options.airport.icao,
    options.manual_pilots.len()
  );

  for pilot in departures
    .into_iter()
    .chain(arrivals)
    .chain(options.manual_pilots.iter().cloned())
  {
    scenario.add_pilot(pilot);
  }

  Ok((scenario.into_text(), occupied))
}
