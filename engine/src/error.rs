use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
  #[error("no {table} entry for {key}")]
  ResourceLookupFailed { table: &'static str, key: String },
  #[error("no airline serves {0}")]
  NoServiceFound(String),
  #[error("ran out of {0}")]
  ResourceExhausted(String),
  #[error("{name} must be between 0 and 100, got {value}")]
  InvalidPercentage { name: &'static str, value: u32 },
}
