use std::{
  collections::BTreeMap,
  fs,
  path::{Path, PathBuf},
};

use serde::{
  Deserialize, Deserializer, Serialize, de::DeserializeOwned, de::Error as _,
};
use serde_json::Value;
use thiserror::Error;

use crate::ARRIVAL_CALLSIGN_KEY;

pub const VFR_CALLSIGNS_FILE: &str = "callsignsVFR.json";
pub const IFR_CALLSIGNS_FILE: &str = "callsignsIFR.json";
pub const AIRCRAFT_TYPES_FILE: &str = "aircraftTypes.json";
pub const VFR_DESTINATIONS_FILE: &str = "vfrDestinations.json";
pub const ROUTES_FILE: &str = "routes.json";
pub const INVALID_ROUTES_FILE: &str = "invalidRoutes.json";
pub const STANDS_FILE: &str = "stands.json";
pub const ARRIVAL_ROUTES_FILE: &str = "arrivalRoutes.json";

#[derive(Error, Debug)]
pub enum LoadError {
  #[error("failed to read {path:?}: {source}")]
  Io {
    path: PathBuf,
    source: std::io::Error,
  },
  #[error("failed to deserialize {path:?}: {source}")]
  Deserialize {
    path: PathBuf,
    source: serde_json::Error,
  },
}

fn deserialize_string_or_any<'de, D>(
  deserializer: D,
) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  let any_string = match Value::deserialize(deserializer)? {
    Value::String(s) => s,
    v => v.to_string(),
  };

  Ok(any_string)
}

fn deserialize_degrees<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
  D: Deserializer<'de>,
{
  let degrees = match Value::deserialize(deserializer)? {
    Value::Number(n) => n
      .as_f64()
      .ok_or_else(|| D::Error::custom(format!("invalid heading: {n}")))?,
    Value::String(s) => s.trim().parse::<f64>().map_err(|e| {
      D::Error::custom(format!("invalid heading {s:?}: {e}"))
    })?,
    v => return Err(D::Error::custom(format!("invalid heading: {v}"))),
  };

  if !degrees.is_finite() {
    return Err(D::Error::custom(format!("invalid heading: {degrees}")));
  }

  Ok(degrees)
}

/// A parking position. Coordinates are kept exactly as they appear in the
/// resource file since they are written out verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stand {
  #[serde(deserialize_with = "deserialize_string_or_any")]
  pub lat: String,
  #[serde(deserialize_with = "deserialize_string_or_any")]
  pub long: String,
  #[serde(rename = "hdg", deserialize_with = "deserialize_degrees")]
  pub heading: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CallsignTable {
  #[serde(default)]
  callsigns: BTreeMap<String, String>,
}

/// The read-only lookup tables a scenario is generated from.
///
/// Missing airports or airlines read as "no data"; it is up to the generator
/// to decide whether that is recoverable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceData {
  /// VFR callsign to comma-separated aircraft types.
  pub vfr_callsigns: BTreeMap<String, String>,
  /// Airport to airline to comma-separated destinations. The
  /// [`ARRIVAL_CALLSIGN_KEY`] entry holds the arrival airlines.
  pub ifr_callsigns: BTreeMap<String, BTreeMap<String, String>>,
  /// Airline to comma-separated aircraft types.
  pub aircraft_types: BTreeMap<String, String>,
  pub vfr_destinations: BTreeMap<String, Vec<String>>,
  /// Airport to destination to `"route,level"`.
  pub routes: BTreeMap<String, BTreeMap<String, String>>,
  /// Airport to destination to a list of `"route,level"`.
  pub invalid_routes: BTreeMap<String, BTreeMap<String, Vec<String>>>,
  pub stands: BTreeMap<String, BTreeMap<String, Stand>>,
  pub arrival_routes: BTreeMap<String, Vec<String>>,
}

fn load_table<T>(dir: &Path, file: &str) -> Result<T, LoadError>
where
  T: DeserializeOwned + Default,
{
  let path = dir.join(file);
  if !path.exists() {
    tracing::warn!("Missing resource file {:?}, treating as empty", path);
    return Ok(T::default());
  }

  let content = fs::read_to_string(&path).map_err(|source| LoadError::Io {
    path: path.clone(),
    source,
  })?;
  let table = serde_json::from_str(&content)
    .map_err(|source| LoadError::Deserialize { path: path.clone(), source })?;

  tracing::debug!("Loaded {} ({} bytes)", file, content.len());

  Ok(table)
}

impl ReferenceData {
  pub fn load<P>(dir: P) -> Result<Self, LoadError>
  where
    P: AsRef<Path>,
  {
    let dir = dir.as_ref();

    let vfr_callsigns: CallsignTable = load_table(dir, VFR_CALLSIGNS_FILE)?;
    let aircraft_types: CallsignTable = load_table(dir, AIRCRAFT_TYPES_FILE)?;

    let data = Self {
      vfr_callsigns: vfr_callsigns.callsigns,
      ifr_callsigns: load_table(dir, IFR_CALLSIGNS_FILE)?,
      aircraft_types: aircraft_types.callsigns,
      vfr_destinations: load_table(dir, VFR_DESTINATIONS_FILE)?,
      routes: load_table(dir, ROUTES_FILE)?,
      invalid_routes: load_table(dir, INVALID_ROUTES_FILE)?,
      stands: load_table(dir, STANDS_FILE)?,
      arrival_routes: load_table(dir, ARRIVAL_ROUTES_FILE)?,
    };

    tracing::info!(
      "Loaded reference data from {} ({} airports with stands)",
      dir.display(),
      data.stands.len()
    );

    Ok(data)
  }

  /// Airlines departing `icao`, mapped to the destinations they serve.
  pub fn departure_airlines(
    &self,
    icao: &str,
  ) -> Option<&BTreeMap<String, String>> {
    self.ifr_callsigns.get(icao)
  }

  pub fn arrival_airlines(&self) -> Option<&BTreeMap<String, String>> {
    self.ifr_callsigns.get(ARRIVAL_CALLSIGN_KEY)
  }

  pub fn aircraft_types(&self, airline: &str) -> Option<&str> {
    self.aircraft_types.get(airline).map(|s| s.as_str())
  }

  pub fn vfr_destinations(&self, icao: &str) -> &[String] {
    self
      .vfr_destinations
      .get(icao)
      .map(|d| d.as_slice())
      .unwrap_or_default()
  }

  pub fn stands(&self, icao: &str) -> Option<&BTreeMap<String, Stand>> {
    self.stands.get(icao)
  }

  /// Every stand identifier known for `icao`.
  pub fn stand_ids(&self, icao: &str) -> Vec<&str> {
    self
      .stands(icao)
      .map(|s| s.keys().map(|k| k.as_str()).collect())
      .unwrap_or_default()
  }

  pub fn arrival_route(&self, icao: &str) -> &[String] {
    self
      .arrival_routes
      .get(icao)
      .map(|r| r.as_slice())
      .unwrap_or_default()
  }
}
