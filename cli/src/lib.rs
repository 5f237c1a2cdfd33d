use std::{
  ffi::OsString,
  fs,
  path::{Path, PathBuf},
};

use clap::Parser;
use thiserror::Error;
use turborand::{SeededCore, rng::Rng};

use engine::{
  GenerateError,
  assets::{LoadError, ReferenceData},
  generator::generate_scenario,
};

use config::{Config, ConfigError};

pub mod config;

pub const RESOURCES_ENV: &str = "SWEATBOX_RESOURCES";
pub const DEFAULT_RESOURCES: &str = "rsc";
pub const DEFAULT_OUTPUT: &str = "scenario.txt";

/// Generate a sweatbox scenario file full of random traffic
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Cli {
  /// The path to the config file.
  #[arg(short, long = "config")]
  pub config_path: Option<PathBuf>,

  /// The seed to use for the random number generator.
  #[arg(short, long)]
  pub seed: Option<u64>,

  /// The directory holding the reference data files.
  #[arg(short, long)]
  pub resources: Option<PathBuf>,

  /// Where to write the scenario.
  #[arg(short, long)]
  pub output: Option<PathBuf>,

  /// A JSON list of stands already in use. Read before and updated after
  /// generating.
  #[arg(long)]
  pub occupied: Option<PathBuf>,

  /// Print the stands of the scenario airport and exit.
  #[arg(long)]
  pub list_stands: bool,
}

#[derive(Error, Debug)]
pub enum RunError {
  #[error("{0}")]
  Config(#[from] ConfigError),
  #[error("{0}")]
  Load(#[from] LoadError),
  #[error("failed to generate scenario: {0}")]
  Generate(#[from] GenerateError),
  #[error("failed to access {path:?}: {source}")]
  Io {
    path: PathBuf,
    source: std::io::Error,
  },
  #[error("malformed occupied stands file {path:?}: {source}")]
  Occupied {
    path: PathBuf,
    source: serde_json::Error,
  },
}

/// Flag first, then config file, then environment, then [`DEFAULT_RESOURCES`].
pub fn resolve_resource_dir(
  flag: Option<&Path>,
  config: Option<&Path>,
  env: Option<OsString>,
) -> PathBuf {
  flag
    .or(config)
    .map(Path::to_path_buf)
    .or_else(|| env.filter(|e| !e.is_empty()).map(PathBuf::from))
    .unwrap_or_else(|| PathBuf::from(DEFAULT_RESOURCES))
}

/// A missing file means no stands are occupied yet.
pub fn load_occupied(path: &Path) -> Result<Vec<String>, RunError> {
  if !path.exists() {
    return Ok(Vec::new());
  }

  let content = fs::read_to_string(path).map_err(|source| RunError::Io {
    path: path.to_owned(),
    source,
  })?;

  serde_json::from_str(&content).map_err(|source| RunError::Occupied {
    path: path.to_owned(),
    source,
  })
}

pub fn save_occupied(path: &Path, occupied: &[String]) -> Result<(), RunError> {
  let content =
    serde_json::to_string_pretty(occupied).map_err(|source| {
      RunError::Occupied {
        path: path.to_owned(),
        source,
      }
    })?;

  fs::write(path, content).map_err(|source| RunError::Io {
    path: path.to_owned(),
    source,
  })
}

pub fn run(cli: Cli) -> Result<(), RunError> {
  let config = match cli.config_path {
    Some(ref path) => Config::from_path(path)?,
    None => Config::default(),
  };

  let resources = resolve_resource_dir(
    cli.resources.as_deref(),
    config.resources.as_deref(),
    std::env::var_os(RESOURCES_ENV),
  );
  let data = ReferenceData::load(&resources)?;
  let options = config.scenario.unwrap_or_default();

  if cli.list_stands {
    for id in data.stand_ids(&options.airport.icao) {
      println!("{id}");
    }

    return Ok(());
  }

  let mut rng = match cli.seed.or(config.seed) {
    Some(seed) => {
      tracing::info!("Using seed {seed}");
      Rng::with_seed(seed)
    }
    None => Rng::new(),
  };

  let occupied_path = cli.occupied.or(config.occupied_stands);
  let occupied = match occupied_path {
    Some(ref path) => load_occupied(path)?,
    None => Vec::new(),
  };

  let (text, occupied) =
    generate_scenario(&options, &data, occupied, &mut rng)?;

  let output = cli
    .output
    .or(config.output)
    .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
  fs::write(&output, text).map_err(|source| RunError::Io {
    path: output.clone(),
    source,
  })?;

  tracing::info!("Scenario written to {}", output.display());

  if let Some(ref path) = occupied_path {
    save_occupied(path, &occupied)?;
    tracing::info!("{} stands now occupied", occupied.len());
  }

  Ok(())
}
