//! Table of contents extraction.
//!
//! Sources produce a flat list of headings in document order; the shared
//! [`build_hierarchy`] turns it into a forest of [`HeadingNode`]. Whether the
//! table is worth showing is a separate presentation decision, see
//! [`should_show`].
mod block;
mod dom;

pub use block::BlockTreeSource;
pub use dom::{DEFAULT_CONTENT_SELECTOR, DomSource};

use crate::types::HeadingNode;

/// Default minimum number of headings before a table of contents is shown.
pub const DEFAULT_MIN_HEADINGS: usize = 3;

/// Deepest heading level that appears in a table of contents.
pub const MAX_HEADING_LEVEL: u8 = 3;

/// A heading as found in the source, before nesting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatHeading {
  pub id:    String,
  pub title: String,
  pub level: u8,
}

/// Anything headings can be read from.
pub trait HeadingSource {
  /// Headings in document order. Levels outside 1..=3 are not returned.
  fn headings(&self) -> Vec<FlatHeading>;

  /// Extract the nested table of contents.
  fn extract_headings(&self) -> Vec<HeadingNode> {
    build_hierarchy(self.headings())
  }
}

/// Nest a flat heading list under the nearest preceding shallower heading.
///
/// Headings of equal level are always siblings. Levels outside 1..=3 are
/// dropped.
#[must_use]
pub fn build_hierarchy<I>(headings: I) -> Vec<HeadingNode>
where
  I: IntoIterator<Item = FlatHeading>,
{
  let mut roots: Vec<HeadingNode> = Vec::new();
  // Open ancestors, deepest last. Nodes are moved into their parent once
  // they close.
  let mut stack: Vec<HeadingNode> = Vec::new();

  for heading in headings {
    if !(1..=MAX_HEADING_LEVEL).contains(&heading.level) {
      continue;
    }
    while stack.last().is_some_and(|open| open.level >= heading.level) {
      close_top(&mut stack, &mut roots);
    }
    stack.push(HeadingNode::new(heading.id, heading.title, heading.level));
  }
  while !stack.is_empty() {
    close_top(&mut stack, &mut roots);
  }

  roots
}

fn close_top(stack: &mut Vec<HeadingNode>, roots: &mut Vec<HeadingNode>) {
  if let Some(node) = stack.pop() {
    match stack.last_mut() {
      Some(parent) => parent.children.push(node),
      None => roots.push(node),
    }
  }
}

/// Total number of headings in a forest, at every depth.
#[must_use]
pub fn count_headings(headings: &[HeadingNode]) -> usize {
  headings
    .iter()
    .map(|h| 1 + count_headings(&h.children))
    .sum()
}

/// Whether a table of contents with these headings should be displayed.
#[must_use]
pub fn should_show(headings: &[HeadingNode], min: usize) -> bool {
  count_headings(headings) >= min
}

/// Pre-order flattening, used for scroll synchronisation.
#[must_use]
pub fn flatten(headings: &[HeadingNode]) -> Vec<&HeadingNode> {
  let mut out = Vec::with_capacity(count_headings(headings));
  let mut stack: Vec<&HeadingNode> = headings.iter().rev().collect();
  while let Some(node) = stack.pop() {
    out.push(node);
    stack.extend(node.children.iter().rev());
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  fn flat(id: &str, level: u8) -> FlatHeading {
    FlatHeading {
      id: id.to_string(),
      title: id.to_string(),
      level,
    }
  }

  #[test]
  fn test_siblings_and_nesting() {
    let toc = build_hierarchy(vec![
      flat("intro", 1),
      flat("background", 2),
      flat("method", 2),
      flat("conclusion", 1),
    ]);
    assert_eq!(toc.len(), 2);
    assert_eq!(toc[0].id, "intro");
    let children: Vec<&str> =
      toc[0].children.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(children, vec!["background", "method"]);
    assert!(toc[1].children.is_empty());
  }

  #[test]
  fn test_skipped_level_nests() {
    let toc = build_hierarchy(vec![flat("a", 1), flat("b", 3), flat("c", 2)]);
    assert_eq!(toc.len(), 1);
    let children: Vec<(&str, u8)> = toc[0]
      .children
      .iter()
      .map(|c| (c.id.as_str(), c.level))
      .collect();
    assert_eq!(children, vec![("b", 3), ("c", 2)]);
  }

  #[test]
  fn test_leading_deep_heading_is_root() {
    let toc = build_hierarchy(vec![flat("deep", 3), flat("top", 1)]);
    assert_eq!(toc.len(), 2);
    assert_eq!(toc[0].level, 3);
  }

  #[test]
  fn test_out_of_range_levels_dropped() {
    let toc = build_hierarchy(vec![flat("a", 1), flat("b", 4), flat("c", 0)]);
    assert_eq!(count_headings(&toc), 1);
  }

  #[test]
  fn test_flatten_pre_order() {
    let toc = build_hierarchy(vec![
      flat("a", 1),
      flat("b", 2),
      flat("c", 3),
      flat("d", 2),
      flat("e", 1),
    ]);
    let ids: Vec<&str> = flatten(&toc).iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
  }

  #[test]
  fn test_should_show_threshold() {
    let two = build_hierarchy(vec![flat("a", 1), flat("b", 2)]);
    assert!(!should_show(&two, DEFAULT_MIN_HEADINGS));
    let three = build_hierarchy(vec![flat("a", 1), flat("b", 2), flat("c", 2)]);
    assert!(should_show(&three, DEFAULT_MIN_HEADINGS));
    assert!(should_show(&[], 0));
  }
}
