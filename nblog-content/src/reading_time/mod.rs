//! Reading-time estimation for mixed Korean/English content.
//!
//! Non-CJK text is measured in words per minute and CJK text in characters
//! per minute. Images and code blocks add a fixed number of seconds each.
mod cache;

use std::sync::{Arc, LazyLock};

pub use cache::{
  CacheKey,
  DEFAULT_CACHE_CAPACITY,
  DocumentKey,
  ReadingTimeCache,
};
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{notion::RecordMap, types::ReadingTime, utils};

/// Seconds added per image.
pub const IMAGE_SECONDS: f64 = 12.0;
/// Seconds added per code block.
pub const CODE_SECONDS: f64 = 30.0;

/// Tuning for [`estimate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadingTimeOptions {
  /// Reading speed for non-CJK text.
  pub words_per_minute:     f64,
  /// Reading speed for Hangul and CJK ideographs.
  pub cjk_chars_per_minute: f64,
  pub include_image_time:   bool,
  pub include_code_time:    bool,
}

impl Default for ReadingTimeOptions {
  fn default() -> Self {
    Self {
      words_per_minute:     200.0,
      cjk_chars_per_minute: 350.0,
      include_image_time:   true,
      include_code_time:    true,
    }
  }
}

/// Estimate how long `content` takes to read.
///
/// Markup tags are stripped before counting, but images (`<img>`) and code
/// blocks (`<pre>`, `<code>`) are counted in the raw input. Empty input
/// yields one minute and zero words.
#[must_use]
pub fn estimate(content: &str, options: &ReadingTimeOptions) -> ReadingTime {
  static IMG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<img\b[^>]*>").unwrap_or_else(|e| {
      log::error!("Failed to compile IMG_RE regex: {e}");
      utils::never_matching_regex()
    })
  });
  static CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(?:pre|code)\b[^>]*>").unwrap_or_else(|e| {
      log::error!("Failed to compile CODE_RE regex: {e}");
      utils::never_matching_regex()
    })
  });

  let clean = utils::strip_tags(content);
  let cjk_chars = clean.chars().filter(|&c| utils::is_cjk(c)).count();
  let words = clean
    .split(|c: char| c.is_whitespace() || utils::is_cjk(c))
    .filter(|token| token.chars().any(char::is_alphanumeric))
    .count();

  let mut total = per_minute(words, options.words_per_minute)
    + per_minute(cjk_chars, options.cjk_chars_per_minute);

  if options.include_image_time {
    total += count_as_f64(IMG_RE.find_iter(content).count()) * IMAGE_SECONDS
      / 60.0;
  }
  if options.include_code_time {
    total += count_as_f64(CODE_RE.find_iter(content).count()) * CODE_SECONDS
      / 60.0;
  }

  ReadingTime {
    minutes:        round_minutes(total),
    words:          words + cjk_chars,
    under_a_minute: total < 1.0,
  }
}

#[allow(
  clippy::cast_precision_loss,
  reason = "Counts are far below 2^52"
)]
fn count_as_f64(count: usize) -> f64 {
  count as f64
}

fn per_minute(count: usize, rate: f64) -> f64 {
  if rate > 0.0 {
    count_as_f64(count) / rate
  } else {
    0.0
  }
}

#[allow(
  clippy::cast_possible_truncation,
  clippy::cast_sign_loss,
  reason = "Value is clamped to [1, u32::MAX] first"
)]
fn round_minutes(total: f64) -> u32 {
  if !total.is_finite() {
    return 1;
  }
  total.round().clamp(1.0, f64::from(u32::MAX)) as u32
}

/// Inputs for a post's reading time.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostContent<'a> {
  /// Stable page ID, when the post has one.
  pub page_id:     Option<&'a str>,
  /// Freshness marker, usually the page's last-edited time.
  pub last_edited: Option<&'a str>,
  /// Post summary from the database properties.
  pub summary:     &'a str,
  /// Record map holding the page's blocks.
  pub record_map:  Option<&'a RecordMap>,
}

impl PostContent<'_> {
  /// Cache key for this post.
  ///
  /// Posts with an ID are keyed by ID, freshness and summary length; others
  /// by a digest of the summary.
  #[must_use]
  pub fn cache_key(&self) -> CacheKey {
    let document = self.page_id.map_or_else(
      || DocumentKey::digest(self.summary),
      |id| DocumentKey::Id(id.to_string()),
    );
    CacheKey {
      document,
      freshness: self.last_edited.map(str::to_string),
      length: self.summary.len(),
    }
  }

  /// Summary followed by the text of every block under the page.
  #[must_use]
  pub fn text(&self) -> String {
    let mut content = self.summary.to_string();
    if let (Some(map), Some(id)) = (self.record_map, self.page_id) {
      let page_text = map.page_text(id);
      if !page_text.is_empty() {
        content.push(' ');
        content.push_str(&page_text);
      }
    }
    content
  }
}

/// Reading-time estimator with a shared, bounded cache.
#[derive(Debug, Clone, Default)]
pub struct ReadingTimeEstimator {
  options: ReadingTimeOptions,
  cache:   Arc<ReadingTimeCache>,
}

impl ReadingTimeEstimator {
  #[must_use]
  pub fn new(
    options: ReadingTimeOptions,
    cache: Arc<ReadingTimeCache>,
  ) -> Self {
    Self { options, cache }
  }

  #[must_use]
  pub const fn options(&self) -> &ReadingTimeOptions {
    &self.options
  }

  #[must_use]
  pub fn cache(&self) -> &Arc<ReadingTimeCache> {
    &self.cache
  }

  /// Uncached estimate of arbitrary content.
  #[must_use]
  pub fn estimate(&self, content: &str) -> ReadingTime {
    estimate(content, &self.options)
  }

  /// Cached estimate of a post.
  #[must_use]
  pub fn estimate_post(&self, post: &PostContent<'_>) -> ReadingTime {
    let key = post.cache_key();
    self.cache.get_or_insert_with(key, || {
      let content = post.text();
      let result = estimate(&content, &self.options);
      debug!(
        "Reading time for {}: {} min, {} words",
        post.page_id.unwrap_or("<summary>"),
        result.minutes,
        result.words
      );
      result
    })
  }
}
