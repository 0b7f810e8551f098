//! Subcommand implementations. Each reads its input files, runs the content
//! library and writes JSON.
mod posts;
mod reading_time;
mod toc;

use std::{
  fs,
  io::{self, Write},
  path::Path,
};

use color_eyre::eyre::{Context, Result, bail, eyre};
use log::info;
use nblog_config::Config;
use nblog_content::RecordMap;
use serde::Serialize;

pub use self::{
  posts::{posts, series},
  reading_time::reading_time,
  toc::toc,
};

/// Write a default configuration file, refusing to overwrite unless `force`.
///
/// # Errors
///
/// Returns an error if the file exists and `force` is not set, or if the
/// file cannot be created.
pub fn init(path: &Path, format: &str, force: bool) -> Result<()> {
  if path.exists() && !force {
    bail!(
      "Configuration file already exists: {}. Use --force to overwrite.",
      path.display()
    );
  }

  if let Some(parent) = path.parent() {
    if !parent.as_os_str().is_empty() && !parent.exists() {
      fs::create_dir_all(parent).wrap_err_with(|| {
        format!("Failed to create directory: {}", parent.display())
      })?;
      info!("Created directory: {}", parent.display());
    }
  }

  Config::generate_default_config(format, path).wrap_err_with(|| {
    format!("Failed to generate configuration file: {}", path.display())
  })?;

  info!("Configuration file created successfully.");
  Ok(())
}

/// An input file, interpreted by extension.
enum Input {
  /// Notion record map (`.json`)
  RecordMap(RecordMap),
  /// HTML or plain text
  Markup(String),
}

fn read_to_string(path: &Path) -> Result<String> {
  fs::read_to_string(path)
    .wrap_err_with(|| format!("Failed to read {}", path.display()))
}

fn read_input(path: &Path) -> Result<Input> {
  let content = read_to_string(path)?;
  if is_json(path) {
    let map = RecordMap::from_json(&content).wrap_err_with(|| {
      format!("Failed to parse record map: {}", path.display())
    })?;
    Ok(Input::RecordMap(map))
  } else {
    Ok(Input::Markup(content))
  }
}

fn read_record_map(path: &Path) -> Result<RecordMap> {
  match read_input(path)? {
    Input::RecordMap(map) => Ok(map),
    Input::Markup(_) => {
      bail!("Expected a JSON record map: {}", path.display())
    },
  }
}

fn is_json(path: &Path) -> bool {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// The page to read from a record map: the requested one, or the map's only
/// root page.
fn resolve_page_id(map: &RecordMap, page_id: Option<&str>) -> Result<String> {
  if let Some(id) = page_id {
    return Ok(id.to_string());
  }
  map.root_page_id().map(str::to_string).ok_or_else(|| {
    eyre!("Record map has no single root page; pass --page-id explicitly")
  })
}

/// Serialize `value` as pretty JSON to `output`, or to stdout.
fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
  let json = serde_json::to_string_pretty(value)
    .wrap_err("Failed to serialize output")?;
  write_output(&json, output)
}

fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
  if let Some(path) = output {
    fs::write(path, format!("{content}\n"))
      .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {}", path.display());
  } else {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{content}").wrap_err("Failed to write to stdout")?;
  }
  Ok(())
}
