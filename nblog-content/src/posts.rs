//! Post metadata as read from the Notion database, and feed ordering.
use std::{cmp::Reverse, collections::HashMap};

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::ContentResult;

/// Status value that marks a post as publicly listed.
pub const PUBLIC_STATUS: &str = "Public";

/// The `date` property of a post.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostDate {
  pub start_date: Date,
}

/// A blog post's database properties.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
  pub id:           String,
  pub title:        String,
  pub slug:         String,
  #[serde(default)]
  pub summary:      Option<String>,
  #[serde(default)]
  pub status:       Vec<String>,
  #[serde(default)]
  pub tags:         Vec<String>,
  #[serde(default)]
  pub date:         Option<PostDate>,
  pub created_time: Timestamp,
  /// Last edit time, used as the reading-time cache freshness marker.
  #[serde(default)]
  pub last_edited:  Option<String>,
  #[serde(default)]
  pub series:       Option<String>,
  #[serde(default, alias = "series_order")]
  pub series_order: Option<u32>,
  /// Estimated minutes, filled in by the build.
  #[serde(default)]
  pub reading_time: Option<u32>,
}

impl Post {
  /// The post's `date` at midnight UTC, or its creation time.
  #[must_use]
  pub fn published_at(&self) -> Timestamp {
    self
      .date
      .and_then(|d| d.start_date.to_zoned(TimeZone::UTC).ok())
      .map_or(self.created_time, |zoned| zoned.timestamp())
  }

  #[must_use]
  pub fn is_public(&self) -> bool {
    self.status.iter().any(|s| s == PUBLIC_STATUS)
  }
}

/// Parse a JSON array of posts.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or a post lacks a required
/// field.
pub fn load_posts(json: &str) -> ContentResult<Vec<Post>> {
  Ok(serde_json::from_str(json)?)
}

/// Sort posts by publication time, newest first.
pub fn sort_newest_first(posts: &mut [Post]) {
  posts.sort_by_key(|post| Reverse(post.published_at()));
}

/// Give every series post without an explicit order its position in the
/// series, counting from 1 by publication time (oldest first).
pub fn assign_series_order(posts: &mut [Post]) {
  let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
  for (index, post) in posts.iter().enumerate() {
    if let Some(series) = &post.series {
      groups.entry(series.clone()).or_default().push(index);
    }
  }

  for indices in groups.values_mut() {
    indices.sort_by_key(|&i| posts[i].published_at());
    for (position, &i) in indices.iter().enumerate() {
      if posts[i].series_order.is_none() {
        posts[i].series_order = u32::try_from(position + 1).ok();
      }
    }
  }
}
