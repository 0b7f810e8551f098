use nblog_content::toc::{DEFAULT_CONTENT_SELECTOR, DEFAULT_MIN_HEADINGS};
use serde::{Deserialize, Serialize};

/// Configuration for the table of contents
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TocConfig {
  /// Minimum number of headings before the table of contents is shown
  pub min_headings: usize,

  /// CSS selector for the element holding the article body in rendered
  /// HTML. The whole document is used when nothing matches.
  pub content_selector: String,
}

impl Default for TocConfig {
  fn default() -> Self {
    Self {
      min_headings:     DEFAULT_MIN_HEADINGS,
      content_selector: DEFAULT_CONTENT_SELECTOR.to_string(),
    }
  }
}
