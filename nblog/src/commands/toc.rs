use std::path::Path;

use color_eyre::eyre::Result;
use log::debug;
use nblog_config::Config;
use nblog_content::{
  BlockTreeSource,
  DomSource,
  HeadingNode,
  HeadingSource,
  toc::{count_headings, should_show},
};
use serde::Serialize;

use super::{Input, read_input, read_to_string, resolve_page_id, write_json};

#[derive(Debug, Serialize)]
struct TocOutput {
  show:     bool,
  count:    usize,
  headings: Vec<HeadingNode>,
}

/// Print the table of contents of `input`.
///
/// Unless `all` is set, headings are left out when there are too few for the
/// table to be shown. With `annotate`, the input HTML is printed with ids
/// written onto its headings instead.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, or if no page can
/// be chosen from a record map.
pub fn toc(
  config: &Config,
  input: &Path,
  page_id: Option<&str>,
  all: bool,
  annotate: bool,
  output: Option<&Path>,
) -> Result<()> {
  if annotate {
    let html = read_to_string(input)?;
    let annotated = DomSource::new(&html)
      .with_selector(config.toc.content_selector.as_str())
      .annotate();
    return super::write_output(&annotated, output);
  }

  let headings = match read_input(input)? {
    Input::RecordMap(map) => {
      let page_id = resolve_page_id(&map, page_id)?;
      BlockTreeSource::new(&map, &page_id).extract_headings()
    },
    Input::Markup(html) => {
      DomSource::new(&html)
        .with_selector(config.toc.content_selector.as_str())
        .extract_headings()
    },
  };

  let count = count_headings(&headings);
  let show = should_show(&headings, config.toc.min_headings);
  debug!(
    "Found {count} headings in {} (minimum {})",
    input.display(),
    config.toc.min_headings
  );

  let result = TocOutput {
    show,
    count,
    headings: if show || all { headings } else { Vec::new() },
  };
  write_json(&result, output)
}
