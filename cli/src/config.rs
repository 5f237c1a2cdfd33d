use std::path::{Path, PathBuf};

use engine::generator::ScenarioOptions;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("failed to read config file {path:?}: {source}")]
  Read {
    path: PathBuf,
    source: std::io::Error,
  },
  #[error("failed to parse config file {path:?}: {source}")]
  Parse {
    path: PathBuf,
    source: toml::de::Error,
  },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
  pub seed: Option<u64>,
  pub resources: Option<PathBuf>,
  pub output: Option<PathBuf>,
  pub occupied_stands: Option<PathBuf>,
  pub scenario: Option<ScenarioOptions>,
}

impl Config {
  pub fn from_path<T>(path: T) -> Result<Self, ConfigError>
  where
    T: AsRef<Path>,
  {
    let path = path.as_ref();
    let config =
      std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_owned(),
        source,
      })?;

    Self::from_toml(&config).map_err(|source| ConfigError::Parse {
      path: path.to_owned(),
      source,
    })
  }

  pub fn from_toml(config: &str) -> Result<Self, toml::de::Error> {
    toml::from_str(config)
  }
}
