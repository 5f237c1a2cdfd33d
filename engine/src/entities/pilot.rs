use core::fmt;

use internment::Intern;
use serde::{Deserialize, Serialize};

use crate::{
  DEFAULT_DEPARTURE_SPEED, DEFAULT_LEVEL_BY_LEVEL, ToText, format_squawk,
};

#[derive(
  Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum FlightRules {
  #[serde(rename = "V", alias = "VFR")]
  Visual,
  #[default]
  #[serde(rename = "I", alias = "IFR")]
  Instrument,
}

impl fmt::Display for FlightRules {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Visual => write!(f, "V"),
      Self::Instrument => write!(f, "I"),
    }
  }
}

/// One flight plan, spawned by its owner's ground position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pilot {
  pub callsign: String,
  pub lat: String,
  pub long: String,
  pub altitude: i32,
  /// Already in the simulator's heading unit, see
  /// [`encode_heading`](crate::encode_heading).
  pub heading: u32,
  pub departure: Intern<String>,
  pub squawk: u16,
  pub rules: FlightRules,
  pub aircraft_type: String,
  pub cruise_level: String,
  pub destination: String,
  pub remark: String,
  /// The route category, e.g. the filed route, "VFR" or "ARRIVAL".
  pub route: String,
  /// Waypoints the simulator flies, used to script arrivals.
  pub pseudo_route: String,
  pub speed: u32,
  /// Minutes until the aircraft appears.
  pub spawn_delay: String,
  pub level_by_fix: String,
  pub level_by_level: String,
  /// Which ground position spawns the aircraft. Falls back to the departure.
  pub owner: Option<Intern<String>>,
}

impl Default for Pilot {
  fn default() -> Self {
    Self {
      callsign: String::new(),
      lat: String::new(),
      long: String::new(),
      altitude: 0,
      heading: 0,
      departure: Intern::from_ref(""),
      squawk: 0,
      rules: FlightRules::default(),
      aircraft_type: String::new(),
      cruise_level: String::new(),
      destination: String::new(),
      remark: String::new(),
      route: String::new(),
      pseudo_route: String::new(),
      speed: DEFAULT_DEPARTURE_SPEED,
      spawn_delay: "0".to_owned(),
      level_by_fix: String::new(),
      level_by_level: DEFAULT_LEVEL_BY_LEVEL.to_owned(),
      owner: None,
    }
  }
}

impl Pilot {
  pub fn owner(&self) -> Intern<String> {
    self.owner.unwrap_or(self.departure)
  }

  pub fn is_vfr(&self) -> bool {
    matches!(self.rules, FlightRules::Visual)
  }
}

impl ToText for Pilot {
  fn to_text(&self, w: &mut dyn fmt::Write) -> fmt::Result {
    let owner = self.owner();

    writeln!(w, "PSEUDOPILOT:{owner}_M_GND")?;
    writeln!(
      w,
      "@N:{}:{}:1:{}:{}:{}:0:{}:0",
      self.callsign,
      format_squawk(self.squawk),
      self.lat,
      self.long,
      self.altitude,
      self.heading
    )?;
    writeln!(
      w,
      "$FP{}:*A:{}:{}:{}:{}:0000::{}:{}:00:00:0:0::/{}/:{}",
      self.callsign,
      self.rules,
      self.aircraft_type,
      self.speed,
      self.departure,
      self.cruise_level,
      self.destination.trim(),
      self.remark,
      self.route.trim()
    )?;
    writeln!(w, "SIMDATA:{}:*:*:25.1.0.000", self.callsign)?;
    writeln!(w, "$ROUTE:{}", self.pseudo_route)?;
    writeln!(w, "START:{}", self.spawn_delay)?;
    writeln!(w, "DELAY:1:2")?;
    writeln!(w, "REQALT:{}:{}", self.level_by_fix, self.level_by_level)?;
    write!(w, "INITIALPSEUDOPILOT:{owner}_M_GND")
  }
}

impl fmt::Display for Pilot {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.to_text(f)
  }
}
