//! Series navigation: grouping, previous/next links and pagination.
use jiff::{Timestamp, civil::Date};
use serde::Serialize;

use crate::posts::Post;

/// Default number of series posts listed per page.
pub const DEFAULT_POSTS_PER_PAGE: usize = 5;

/// A post as listed in its series.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPost {
  pub id:           String,
  pub title:        String,
  pub slug:         String,
  /// 1-based position in the series.
  pub order:        usize,
  pub is_current:   bool,
  pub date:         Option<Date>,
  pub created_time: Timestamp,
}

/// All public posts in the current post's series.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeriesData {
  pub name:          String,
  pub posts:         Vec<SeriesPost>,
  pub current_index: usize,
  pub total_count:   usize,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SeriesNavigation<'a> {
  pub previous: Option<&'a SeriesPost>,
  pub current:  Option<&'a SeriesPost>,
  pub next:     Option<&'a SeriesPost>,
}

/// One page of a series listing.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPage<'a> {
  pub posts:        &'a [SeriesPost],
  pub current_page: usize,
  pub total_pages:  usize,
  pub has_next:     bool,
  pub has_previous: bool,
  pub total_count:  usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSummary {
  pub name:             String,
  pub total_count:      usize,
  /// 1-based position of the current post.
  pub current_position: usize,
  /// Percentage of the series read, rounded.
  pub progress:         usize,
  pub is_first:         bool,
  pub is_last:          bool,
}

/// Collect the series the post `current_id` belongs to.
///
/// Returns `None` if the post is unknown, not public, not in a series, or is
/// the only public post of its series. Posts with an explicit order come
/// first, ascending; the rest follow by publication time, oldest first.
#[must_use]
pub fn series_data(posts: &[Post], current_id: &str) -> Option<SeriesData> {
  let current = posts.iter().find(|post| post.id == current_id)?;
  let name = current.series.as_deref()?;
  if !current.is_public() {
    return None;
  }

  let mut members: Vec<&Post> = posts
    .iter()
    .filter(|post| post.series.as_deref() == Some(name) && post.is_public())
    .collect();
  if members.len() <= 1 {
    return None;
  }

  members.sort_by_key(|post| {
    (
      post.series_order.is_none(),
      post.series_order,
      post.published_at(),
    )
  });

  let series_posts: Vec<SeriesPost> = members
    .iter()
    .enumerate()
    .map(|(index, post)| {
      SeriesPost {
        id:           post.id.clone(),
        title:        post.title.clone(),
        slug:         post.slug.clone(),
        order:        index + 1,
        is_current:   post.id == current_id,
        date:         post.date.map(|d| d.start_date),
        created_time: post.created_time,
      }
    })
    .collect();

  let current_index = series_posts.iter().position(|p| p.is_current)?;
  let total_count = series_posts.len();

  Some(SeriesData {
    name: name.to_string(),
    posts: series_posts,
    current_index,
    total_count,
  })
}

/// Previous, current and next posts around the current index.
#[must_use]
pub fn navigation(data: &SeriesData) -> SeriesNavigation<'_> {
  let index = data.current_index;
  SeriesNavigation {
    previous: index.checked_sub(1).and_then(|i| data.posts.get(i)),
    current:  data.posts.get(index),
    next:     data.posts.get(index + 1),
  }
}

/// Slice a series listing into pages of `per_page` posts. `page` is
/// 0-based; a page past the end is empty.
#[must_use]
pub fn paginate(
  posts: &[SeriesPost],
  page: usize,
  per_page: usize,
) -> SeriesPage<'_> {
  let per_page = per_page.max(1);
  let total_pages = posts.len().div_ceil(per_page);
  let start = page.saturating_mul(per_page).min(posts.len());
  let end = start.saturating_add(per_page).min(posts.len());

  SeriesPage {
    posts: &posts[start..end],
    current_page: page,
    total_pages,
    has_next: page.saturating_add(1) < total_pages,
    has_previous: page > 0,
    total_count: posts.len(),
  }
}

/// The 0-based page holding `current_id`, or 0 if it is not listed.
#[must_use]
pub fn find_current_page(
  posts: &[SeriesPost],
  current_id: &str,
  per_page: usize,
) -> usize {
  posts
    .iter()
    .position(|post| post.id == current_id)
    .map_or(0, |index| index / per_page.max(1))
}

#[must_use]
pub fn summary(data: &SeriesData) -> SeriesSummary {
  let position = data.current_index + 1;
  let total = data.total_count.max(1);
  SeriesSummary {
    name:             data.name.clone(),
    total_count:      data.total_count,
    current_position: position,
    progress:         (position * 100 + total / 2) / total,
    is_first:         data.current_index == 0,
    is_last:          position == data.total_count,
  }
}
