use log::debug;

use super::{FlatHeading, HeadingSource};
use crate::notion::RecordMap;

/// Headings read from a Notion page's block tree.
///
/// Heading IDs are the block IDs, which is what the rendered Notion page uses
/// for its anchors.
#[derive(Debug, Clone, Copy)]
pub struct BlockTreeSource<'a> {
  record_map: &'a RecordMap,
  page_id:    &'a str,
}

impl<'a> BlockTreeSource<'a> {
  #[must_use]
  pub const fn new(record_map: &'a RecordMap, page_id: &'a str) -> Self {
    Self {
      record_map,
      page_id,
    }
  }
}

impl HeadingSource for BlockTreeSource<'_> {
  fn headings(&self) -> Vec<FlatHeading> {
    let headings: Vec<FlatHeading> = self
      .record_map
      .descendants(self.page_id)
      .into_iter()
      .filter_map(|(id, block)| {
        let level = block.heading_level()?;
        let title = block.title();
        let title = title.trim();
        if title.is_empty() {
          return None;
        }
        Some(FlatHeading {
          id: id.to_string(),
          title: title.to_string(),
          level,
        })
      })
      .collect();

    debug!(
      "Found {} headings in page {}",
      headings.len(),
      self.page_id
    );
    headings
  }
}
