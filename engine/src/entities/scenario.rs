use core::fmt;

use crate::ToText;

use super::{
  airport::{Airport, Controller},
  pilot::Pilot,
};

/// A scenario file under construction. Controllers are always written before
/// pilots, each in the order they were added.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
  pub airport: Airport,
  pub approach_data: String,
  pub controllers: Vec<Controller>,
  pub pilots: Vec<Pilot>,
}

impl Scenario {
  pub fn new(airport: Airport, approach_data: impl Into<String>) -> Self {
    Self {
      airport,
      approach_data: approach_data.into(),
      controllers: Vec::new(),
      pilots: Vec::new(),
    }
  }

  pub fn add_controller(&mut self, controller: Controller) {
    self.controllers.push(controller);
  }

  pub fn add_pilot(&mut self, pilot: Pilot) {
    self.pilots.push(pilot);
  }

  /// Renders the finished scenario file.
  pub fn into_text(self) -> String {
    self.to_string()
  }
}

impl ToText for Scenario {
  fn to_text(&self, w: &mut dyn fmt::Write) -> fmt::Result {
    write!(
      w,
      "PSEUDOPILOT:ALL\n\nAIRPORT_ALT:{}\n\n{}\n\n",
      self.airport.altitude, self.approach_data
    )?;

    for controller in self.controllers.iter() {
      controller.to_text(w)?;
      writeln!(w)?;
    }

    // Pilot blocks are separated by a blank line.
    for (i, pilot) in self.pilots.iter().enumerate() {
      if i > 0 {
        writeln!(w)?;
      }
      writeln!(w)?;
      pilot.to_text(w)?;
    }

    Ok(())
  }
}

impl fmt::Display for Scenario {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.to_text(f)
  }
}
