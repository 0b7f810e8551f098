use thiserror::Error;

/// Error type for nblog-config operations
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Invalid configuration:\n{0}")]
  Invalid(String),

  #[error("Serde error: {0}")]
  Serde(#[from] serde_json::Error),

  #[error("TOML serialization error: {0}")]
  TomlSer(#[from] toml::ser::Error),
}
