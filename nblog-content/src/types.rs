//! Types for nblog-content public API and internal use.
use std::fmt;

use serde::{Deserialize, Serialize};

/// A node in a table of contents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeadingNode {
  /// Anchor ID, unique within the source document.
  pub id:       String,
  /// Heading text with surrounding whitespace trimmed.
  pub title:    String,
  /// Heading level (1-3).
  pub level:    u8,
  /// Nested headings, in document order.
  #[serde(default)]
  pub children: Vec<Self>,
}

impl HeadingNode {
  #[must_use]
  pub fn new(
    id: impl Into<String>,
    title: impl Into<String>,
    level: u8,
  ) -> Self {
    Self {
      id: id.into(),
      title: title.into(),
      level,
      children: Vec::new(),
    }
  }
}

/// Estimated reading time of a document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReadingTime {
  /// Rounded minutes, never less than 1.
  pub minutes:        u32,
  /// Non-CJK words plus CJK characters.
  pub words:          usize,
  /// Whether the unrounded estimate was below one minute.
  #[serde(default)]
  pub under_a_minute: bool,
}

impl Default for ReadingTime {
  fn default() -> Self {
    Self {
      minutes:        1,
      words:          0,
      under_a_minute: true,
    }
  }
}

impl ReadingTime {
  /// Render the estimate as a short label in the given locale.
  #[must_use]
  pub fn label(&self, locale: Locale) -> String {
    match (locale, self.under_a_minute) {
      (Locale::Ko, true) => "1분 미만 읽기".to_string(),
      (Locale::Ko, false) => format!("{}분 읽기", self.minutes),
      (Locale::En, true) => "Less than a minute read".to_string(),
      (Locale::En, false) => format!("{} min read", self.minutes),
    }
  }
}

/// Display locale for user-facing labels.
#[derive(
  Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
  #[default]
  Ko,
  En,
}

impl fmt::Display for Locale {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Ko => f.write_str("ko"),
      Self::En => f.write_str("en"),
    }
  }
}

impl std::str::FromStr for Locale {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "ko" | "ko-kr" => Ok(Self::Ko),
      "en" | "en-us" | "en-gb" => Ok(Self::En),
      other => Err(format!("unsupported locale: {other}")),
    }
  }
}
