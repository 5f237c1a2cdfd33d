use core::fmt;

use internment::Intern;
use serde::{Deserialize, Serialize};

use crate::ToText;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
  pub icao: Intern<String>,
  /// Ground altitude in feet.
  pub altitude: i32,
  /// The runway configuration in use, e.g. "34".
  pub config: String,
  pub facility: String,
}

impl Default for Airport {
  fn default() -> Self {
    Self {
      icao: Intern::from_ref("OTHH"),
      altitude: 35,
      config: "34".to_owned(),
      facility: "GND".to_owned(),
    }
  }
}

impl Airport {
  pub fn new(
    icao: impl AsRef<str>,
    altitude: i32,
    config: impl Into<String>,
    facility: impl Into<String>,
  ) -> Self {
    Self {
      icao: Intern::from_ref(icao.as_ref()),
      altitude,
      config: config.into(),
      facility: facility.into(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Controller {
  pub airport_icao: Intern<String>,
  pub facility: String,
  pub name: String,
  pub frequency: String,
}

impl Controller {
  pub fn new(
    airport_icao: impl AsRef<str>,
    facility: impl Into<String>,
    name: impl Into<String>,
    frequency: impl Into<String>,
  ) -> Self {
    Self {
      airport_icao: Intern::from_ref(airport_icao.as_ref()),
      facility: facility.into(),
      name: name.into(),
      frequency: frequency.into(),
    }
  }
}

impl ToText for Controller {
  fn to_text(&self, w: &mut dyn fmt::Write) -> fmt::Result {
    write!(
      w,
      "PSEUDOPILOT:{}_M_{}\nCONTROLLER:{}:{}",
      self.airport_icao, self.facility, self.name, self.frequency
    )
  }
}

impl fmt::Display for Controller {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.to_text(f)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_controller_text() {
    let controller = Controller::new("OTHH", "GND", "OTHH_GND", "121.800");

    assert_eq!(
      controller.to_string(),
      "PSEUDOPILOT:OTHH_M_GND\nCONTROLLER:OTHH_GND:121.800"
    );
  }

  #[test]
  fn test_airport_new() {
    let airport = Airport::new("OTHH", 35, "34", "GND");

    assert_eq!(airport.icao.as_str(), "OTHH");
    assert_eq!(airport, Airport::default());
  }
}
