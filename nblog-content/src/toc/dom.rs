use std::collections::HashSet;

use kuchikikiki::{ElementData, NodeDataRef, NodeRef};
use log::debug;
use markup5ever::local_name;
use tendril::TendrilSink;

use super::{FlatHeading, HeadingSource};
use crate::{process::process_safe, utils};

/// Selector for the element that holds the article body.
pub const DEFAULT_CONTENT_SELECTOR: &str = "article";

const HEADING_SELECTOR: &str = "h1, h2, h3";

/// Headings read from rendered HTML.
///
/// Headings are collected from the first element matching the content
/// selector, or from the whole document if nothing matches. Headings without
/// an `id` attribute get one from [`utils::heading_id`].
#[derive(Debug, Clone)]
pub struct DomSource<'a> {
  html:     &'a str,
  selector: String,
}

impl<'a> DomSource<'a> {
  #[must_use]
  pub fn new(html: &'a str) -> Self {
    Self {
      html,
      selector: DEFAULT_CONTENT_SELECTOR.to_string(),
    }
  }

  /// Use a different selector for the content root.
  #[must_use]
  pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
    self.selector = selector.into();
    self
  }

  /// Return the document with generated IDs written onto headings that had
  /// none, so anchors in the table of contents resolve.
  #[must_use]
  pub fn annotate(&self) -> String {
    if self.html.is_empty() {
      return String::new();
    }
    process_safe(
      || {
        let document = kuchikikiki::parse_html().one(self.html);
        for (element, heading, generated) in self.collect(&document) {
          if generated {
            element
              .attributes
              .borrow_mut()
              .insert(local_name!("id"), heading.id);
          }
        }

        let mut out = Vec::new();
        document.serialize(&mut out).ok();
        String::from_utf8(out).unwrap_or_default()
      },
      self.html.to_string(),
    )
  }

  fn content_root(&self, document: &NodeRef) -> NodeRef {
    document.select_first(&self.selector).map_or_else(
      |()| {
        debug!(
          "No element matches '{}', using the whole document",
          self.selector
        );
        document.clone()
      },
      |root| root.as_node().clone(),
    )
  }

  /// Headings under the content root, with their resolved IDs and whether
  /// the ID was generated.
  fn collect(
    &self,
    document: &NodeRef,
  ) -> Vec<(NodeDataRef<ElementData>, FlatHeading, bool)> {
    let root = self.content_root(document);
    let Ok(elements) = root.select(HEADING_SELECTOR) else {
      return Vec::new();
    };

    let elements: Vec<NodeDataRef<ElementData>> = elements.collect();

    // Explicit ids are reserved up front so a generated id never takes one
    // that appears later in the document.
    let mut used: HashSet<String> =
      elements.iter().filter_map(explicit_id).collect();
    let mut out = Vec::new();

    for (index, element) in elements.into_iter().enumerate() {
      let level = match element.name.local.as_ref() {
        "h1" => 1,
        "h2" => 2,
        "h3" => 3,
        _ => continue,
      };
      let title = element.as_node().text_contents().trim().to_string();

      let (id, generated) = match explicit_id(&element) {
        Some(id) => (id, false),
        None => {
          let id = unique_id(utils::heading_id(&title, index), index, &used);
          used.insert(id.clone());
          (id, true)
        },
      };

      out.push((element, FlatHeading { id, title, level }, generated));
    }

    out
  }
}

fn explicit_id(element: &NodeDataRef<ElementData>) -> Option<String> {
  element
    .attributes
    .borrow()
    .get("id")
    .map(str::trim)
    .filter(|id| !id.is_empty())
    .map(str::to_string)
}

/// `base`, or `base-<index>`, or `base-<index>-<n>` for the first `n` that
/// is still free.
fn unique_id(base: String, index: usize, used: &HashSet<String>) -> String {
  if !used.contains(&base) {
    return base;
  }
  let suffixed = format!("{base}-{index}");
  if !used.contains(&suffixed) {
    return suffixed;
  }
  (1..)
    .map(|n| format!("{suffixed}-{n}"))
    .find(|candidate| !used.contains(candidate))
    .unwrap_or(suffixed)
}

impl HeadingSource for DomSource<'_> {
  fn headings(&self) -> Vec<FlatHeading> {
    if self.html.trim().is_empty() {
      return Vec::new();
    }
    process_safe(
      || {
        let document = kuchikikiki::parse_html().one(self.html);
        let headings: Vec<FlatHeading> = self
          .collect(&document)
          .into_iter()
          .map(|(_, heading, _)| heading)
          .collect();
        debug!("Found {} headings in document", headings.len());
        headings
      },
      Vec::new(),
    )
  }
}
