use std::path::Path;

use color_eyre::eyre::{Context, Result};
use log::{debug, info};
use nblog_config::Config;
use nblog_content::{
  Post,
  posts::{assign_series_order, load_posts, sort_newest_first},
  reading_time::PostContent,
  series::{
    SeriesData,
    SeriesNavigation,
    SeriesPage,
    SeriesSummary,
    find_current_page,
    navigation,
    paginate,
    series_data,
    summary,
  },
};
use rayon::prelude::*;
use serde::Serialize;

use super::{read_record_map, read_to_string, write_json};

fn read_posts(path: &Path) -> Result<Vec<Post>> {
  let json = read_to_string(path)?;
  load_posts(&json)
    .wrap_err_with(|| format!("Failed to parse posts: {}", path.display()))
}

/// Print the posts of `input` with reading times and series order filled
/// in, newest first.
///
/// Reading times are estimated in parallel over one shared cache.
///
/// # Errors
///
/// Returns an error if the posts or the record map cannot be read or parsed.
pub fn posts(
  config: &Config,
  input: &Path,
  record_map: Option<&Path>,
  output: Option<&Path>,
) -> Result<()> {
  let mut posts = read_posts(input)?;
  let record_map = record_map.map(read_record_map).transpose()?;
  info!("Processing {} posts", posts.len());

  let estimator = config.reading_time.estimator();
  posts.par_iter_mut().for_each(|post| {
    let result = estimator.estimate_post(&PostContent {
      page_id:     Some(post.id.as_str()),
      last_edited: post.last_edited.as_deref(),
      summary:     post.summary.as_deref().unwrap_or_default(),
      record_map:  record_map.as_ref(),
    });
    post.reading_time = Some(result.minutes);
  });
  debug!("Reading-time cache holds {} entries", estimator.cache().len());

  assign_series_order(&mut posts);
  sort_newest_first(&mut posts);

  write_json(&posts, output)
}

#[derive(Debug, Serialize)]
struct SeriesOutput<'a> {
  series:     &'a SeriesData,
  navigation: SeriesNavigation<'a>,
  page:       SeriesPage<'a>,
  summary:    SeriesSummary,
}

/// Print the series navigation for `current`, or `null` when the post is not
/// part of a listed series.
///
/// # Errors
///
/// Returns an error if the posts cannot be read or parsed.
pub fn series(
  config: &Config,
  input: &Path,
  current: &str,
  page: Option<usize>,
  output: Option<&Path>,
) -> Result<()> {
  let posts = read_posts(input)?;

  let Some(data) = series_data(&posts, current) else {
    info!("Post {current} is not part of a series");
    return write_json(&Option::<SeriesData>::None, output);
  };

  let per_page = config.series.posts_per_page;
  let page = page
    .unwrap_or_else(|| find_current_page(&data.posts, current, per_page));

  let result = SeriesOutput {
    series: &data,
    navigation: navigation(&data),
    page: paginate(&data.posts, page, per_page),
    summary: summary(&data),
  };
  write_json(&result, output)
}
