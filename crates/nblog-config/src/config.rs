use std::{
  fs,
  path::{Path, PathBuf},
  sync::OnceLock,
};

use nblog_content::Locale;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
  error::ConfigError,
  reading_time::ReadingTimeConfig,
  series::SeriesConfig,
  toc::TocConfig,
};

/// Keys accepted by `--config KEY=VALUE`.
pub const OVERRIDE_KEYS: &[&str] = &[
  "locale",
  "jobs",
  "toc.min_headings",
  "toc.content_selector",
  "reading_time.words_per_minute",
  "reading_time.cjk_chars_per_minute",
  "reading_time.include_image_time",
  "reading_time.include_code_time",
  "reading_time.cache_capacity",
  "series.posts_per_page",
];

/// Configuration for nblog.
///
/// [`Config`] controls how tables of contents, reading times and series
/// listings are derived. Fields are typically loaded from a TOML or JSON
/// config file, then adjusted via `--config KEY=VALUE` flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
  /// Locale for user-facing labels.
  pub locale: Locale,

  /// Number of threads to use for parallel processing.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub jobs: Option<usize>,

  /// Table of contents configuration.
  pub toc: TocConfig,

  /// Reading-time configuration.
  pub reading_time: ReadingTimeConfig,

  /// Series navigation configuration.
  pub series: SeriesConfig,
}

impl Config {
  /// Load configuration from a file (TOML or JSON).
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if the format is
  /// unsupported.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let value = read_value(path.as_ref())?;
    Ok(serde_json::from_value(value)?)
  }

  /// Load configuration from files and overrides.
  ///
  /// Files are merged in order, later files overriding earlier ones key by
  /// key. Without files, a config file in a standard location is used if
  /// one exists. Overrides are applied last and the result is validated.
  ///
  /// # Errors
  ///
  /// Returns an error if a file cannot be loaded, an override is malformed
  /// or names an unknown key, or the resulting config is invalid.
  pub fn load(
    config_files: &[PathBuf],
    config_overrides: &[String],
  ) -> Result<Self, ConfigError> {
    let mut merged = Value::Object(Map::new());

    if config_files.is_empty() {
      if let Some(discovered) = Self::find_config_file() {
        log::info!("Using discovered config file: {}", discovered.display());
        merge_values(&mut merged, read_value(&discovered)?);
      }
    } else {
      for path in config_files {
        merge_values(&mut merged, read_value(path)?);
      }
      if config_files.len() > 1 {
        log::info!("Loaded and merged {} config files", config_files.len());
      }
    }

    for override_str in config_overrides {
      let (key, value) = override_str.split_once('=').ok_or_else(|| {
        ConfigError::Config(format!(
          "Invalid config override format: '{override_str}'. Expected \
           KEY=VALUE"
        ))
      })?;
      apply_override(&mut merged, key.trim(), value.trim())?;
    }

    let config: Self = serde_json::from_value(merged)?;
    config.validate()?;
    Ok(config)
  }

  /// Search for config files in common locations
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    static RESULT: OnceLock<Option<PathBuf>> = OnceLock::new();
    RESULT
      .get_or_init(|| {
        let config_filenames = [
          "nblog.toml",
          "nblog.json",
          ".nblog.toml",
          ".nblog.json",
          ".config/nblog.toml",
          ".config/nblog.json",
        ];

        let current_dir = std::env::current_dir().ok()?;
        for filename in &config_filenames {
          let config_path = current_dir.join(filename);
          if config_path.exists() {
            return Some(config_path);
          }
        }

        if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
          let xdg_config_dir = PathBuf::from(xdg_config_home).join("nblog");
          for filename in &["config.toml", "config.json"] {
            let config_path = xdg_config_dir.join(filename);
            if config_path.exists() {
              return Some(config_path);
            }
          }
        }

        None
      })
      .clone()
  }

  /// Check that every value is usable.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::Invalid`] listing every problem found.
  pub fn validate(&self) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    if self.jobs == Some(0) {
      errors.push("jobs must be at least 1".to_string());
    }
    if self.toc.content_selector.trim().is_empty() {
      errors.push("toc.content_selector must not be empty".to_string());
    }

    let rt = &self.reading_time;
    if !(rt.words_per_minute.is_finite() && rt.words_per_minute > 0.0) {
      errors.push(format!(
        "reading_time.words_per_minute must be positive, got {}",
        rt.words_per_minute
      ));
    }
    if !(rt.cjk_chars_per_minute.is_finite() && rt.cjk_chars_per_minute > 0.0)
    {
      errors.push(format!(
        "reading_time.cjk_chars_per_minute must be positive, got {}",
        rt.cjk_chars_per_minute
      ));
    }
    if rt.cache_capacity == 0 {
      errors.push("reading_time.cache_capacity must be at least 1".to_string());
    }
    if self.series.posts_per_page == 0 {
      errors.push("series.posts_per_page must be at least 1".to_string());
    }

    if errors.is_empty() {
      Ok(())
    } else {
      Err(ConfigError::Invalid(errors.join("\n")))
    }
  }

  /// Write the default configuration to `path` as TOML or JSON.
  ///
  /// # Errors
  ///
  /// Returns an error if the format is unsupported, serialization fails or
  /// the file cannot be written.
  pub fn generate_default_config(
    format: &str,
    path: &Path,
  ) -> Result<(), ConfigError> {
    let defaults = Self::default();
    let content = match format {
      "toml" => toml::to_string_pretty(&defaults)?,
      "json" => serde_json::to_string_pretty(&defaults)?,
      other => {
        return Err(ConfigError::Config(format!(
          "Unsupported config format: {other}"
        )));
      },
    };

    fs::write(path, content).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to write default config to {}: {}",
        path.display(),
        e
      ))
    })?;

    log::info!("Created default configuration file: {}", path.display());
    Ok(())
  }
}

/// Read a TOML or JSON file into a JSON value tree, by extension.
fn read_value(path: &Path) -> Result<Value, ConfigError> {
  let content = fs::read_to_string(path).map_err(|e| {
    ConfigError::Config(format!(
      "Failed to read config file: {}: {}",
      path.display(),
      e
    ))
  })?;

  let ext = path
    .extension()
    .and_then(|ext| ext.to_str())
    .map(str::to_lowercase);

  match ext.as_deref() {
    Some("json") => {
      serde_json::from_str(&content).map_err(|e| {
        ConfigError::Config(format!(
          "Failed to parse JSON config from {}: {}",
          path.display(),
          e
        ))
      })
    },
    Some("toml") => {
      toml::from_str(&content).map_err(|e| {
        ConfigError::Config(format!(
          "Failed to parse TOML config from {}: {}",
          path.display(),
          e
        ))
      })
    },
    Some(_) => {
      Err(ConfigError::Config(format!(
        "Unsupported config file format: {}",
        path.display()
      )))
    },
    None => {
      Err(ConfigError::Config(format!(
        "Config file has no extension: {}",
        path.display()
      )))
    },
  }
}

/// Deep-merge `other` into `base`. Objects merge key by key; any other value
/// in `other` replaces the one in `base`.
fn merge_values(base: &mut Value, other: Value) {
  match (base, other) {
    (Value::Object(base_map), Value::Object(other_map)) => {
      for (key, value) in other_map {
        match base_map.get_mut(&key) {
          Some(existing) => merge_values(existing, value),
          None => {
            base_map.insert(key, value);
          },
        }
      }
    },
    (base, other) => *base = other,
  }
}

/// Set a dotted `key` in the value tree. `value` is read as a JSON literal
/// (number, boolean, null) when possible, otherwise as a string.
fn apply_override(
  root: &mut Value,
  key: &str,
  value: &str,
) -> Result<(), ConfigError> {
  if !OVERRIDE_KEYS.contains(&key) {
    return Err(ConfigError::Config(format!(
      "Unknown config key: '{key}'. Valid keys: {}",
      OVERRIDE_KEYS.join(", ")
    )));
  }

  let parsed = if key == "locale" {
    let locale: Locale = value.parse().map_err(|e| {
      ConfigError::Config(format!("Invalid value for 'locale': {e}"))
    })?;
    Value::String(locale.to_string())
  } else {
    match serde_json::from_str::<Value>(value) {
      Ok(v @ (Value::Bool(_) | Value::Number(_) | Value::Null)) => v,
      _ => Value::String(value.to_string()),
    }
  };

  let Some(map) = root.as_object_mut() else {
    return Err(ConfigError::Config(
      "Config root must be a table".to_string(),
    ));
  };

  match key.split_once('.') {
    None => {
      map.insert(key.to_string(), parsed);
    },
    Some((section, field)) => {
      let entry = map
        .entry(section.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
      if !entry.is_object() {
        *entry = Value::Object(Map::new());
      }
      if let Some(section_map) = entry.as_object_mut() {
        section_map.insert(field.to_string(), parsed);
      }
    },
  }

  Ok(())
}
