use nblog_content::series::DEFAULT_POSTS_PER_PAGE;
use serde::{Deserialize, Serialize};

/// Configuration for series navigation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SeriesConfig {
  /// Number of posts per page in the series listing
  pub posts_per_page: usize,
}

impl Default for SeriesConfig {
  fn default() -> Self {
    Self {
      posts_per_page: DEFAULT_POSTS_PER_PAGE,
    }
  }
}
