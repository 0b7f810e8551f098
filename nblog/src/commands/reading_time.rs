use std::path::Path;

use color_eyre::eyre::Result;
use nblog_config::Config;
use nblog_content::{ReadingTime, reading_time::PostContent};
use serde::Serialize;

use super::{Input, read_input, resolve_page_id, write_json};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReadingTimeOutput {
  #[serde(flatten)]
  reading_time: ReadingTime,
  label:        String,
}

/// Print the estimated reading time of `input`.
///
/// Record maps are estimated as a post: the summary followed by the page's
/// text. Other files are estimated as-is, after the summary.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, or if no page can
/// be chosen from a record map.
pub fn reading_time(
  config: &Config,
  input: &Path,
  page_id: Option<&str>,
  summary: Option<&str>,
  last_edited: Option<&str>,
  output: Option<&Path>,
) -> Result<()> {
  let estimator = config.reading_time.estimator();
  let summary = summary.unwrap_or_default();

  let result = match read_input(input)? {
    Input::RecordMap(map) => {
      let page_id = resolve_page_id(&map, page_id)?;
      let last_edited = last_edited.map(str::to_string).or_else(|| {
        map.last_edited_time(&page_id).map(|time| time.to_string())
      });
      estimator.estimate_post(&PostContent {
        page_id:     Some(page_id.as_str()),
        last_edited: last_edited.as_deref(),
        summary,
        record_map:  Some(&map),
      })
    },
    Input::Markup(content) => {
      if summary.is_empty() {
        estimator.estimate(&content)
      } else {
        estimator.estimate(&format!("{summary} {content}"))
      }
    },
  };

  write_json(
    &ReadingTimeOutput {
      reading_time: result,
      label:        result.label(config.locale),
    },
    output,
  )
}
