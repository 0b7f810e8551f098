use std::sync::Arc;

use nblog_content::reading_time::{
  DEFAULT_CACHE_CAPACITY,
  ReadingTimeCache,
  ReadingTimeEstimator,
  ReadingTimeOptions,
};
use serde::{Deserialize, Serialize};

/// Configuration for reading-time estimation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReadingTimeConfig {
  /// Reading speed for non-CJK text, in words per minute
  pub words_per_minute: f64,

  /// Reading speed for Hangul and CJK ideographs, in characters per minute
  pub cjk_chars_per_minute: f64,

  /// Whether each image adds 12 seconds
  pub include_image_time: bool,

  /// Whether each code block adds 30 seconds
  pub include_code_time: bool,

  /// Number of per-post estimates kept in memory
  pub cache_capacity: usize,
}

impl Default for ReadingTimeConfig {
  fn default() -> Self {
    let options = ReadingTimeOptions::default();
    Self {
      words_per_minute:     options.words_per_minute,
      cjk_chars_per_minute: options.cjk_chars_per_minute,
      include_image_time:   options.include_image_time,
      include_code_time:    options.include_code_time,
      cache_capacity:       DEFAULT_CACHE_CAPACITY,
    }
  }
}

impl ReadingTimeConfig {
  #[must_use]
  pub const fn options(&self) -> ReadingTimeOptions {
    ReadingTimeOptions {
      words_per_minute:     self.words_per_minute,
      cjk_chars_per_minute: self.cjk_chars_per_minute,
      include_image_time:   self.include_image_time,
      include_code_time:    self.include_code_time,
    }
  }

  /// Build an estimator with a fresh cache sized from this config.
  #[must_use]
  pub fn estimator(&self) -> ReadingTimeEstimator {
    ReadingTimeEstimator::new(
      self.options(),
      Arc::new(ReadingTimeCache::new(self.cache_capacity)),
    )
  }
}
