#![allow(clippy::expect_used, reason = "Fine in tests")]
use nblog_content::{
  BlockTreeSource,
  DomSource,
  HeadingNode,
  HeadingSource,
  RecordMap,
  toc::{self, FlatHeading, build_hierarchy},
};
use serde_json::json;

fn flat(title: &str, level: u8) -> FlatHeading {
  FlatHeading {
    id: title.to_lowercase(),
    title: title.to_string(),
    level,
  }
}

/// Every child is deeper than its parent.
fn assert_levels_increase(nodes: &[HeadingNode]) {
  for node in nodes {
    for child in &node.children {
      assert!(
        child.level > node.level,
        "{} (h{}) nested under {} (h{})",
        child.title,
        child.level,
        node.title,
        node.level
      );
    }
    assert_levels_increase(&node.children);
  }
}

#[test]
fn test_intro_background_method_conclusion() {
  let forest = build_hierarchy(vec![
    flat("Intro", 1),
    flat("Background", 2),
    flat("Method", 2),
    flat("Conclusion", 1),
  ]);

  let mut intro = HeadingNode::new("intro", "Intro", 1);
  intro.children = vec![
    HeadingNode::new("background", "Background", 2),
    HeadingNode::new("method", "Method", 2),
  ];
  let conclusion = HeadingNode::new("conclusion", "Conclusion", 1);

  assert_eq!(forest, vec![intro, conclusion]);
}

#[test]
fn test_levels_increase_for_all_short_sequences() {
  // Every sequence of up to five headings over levels 1..=3
  for len in 0..=5u32 {
    for code in 0..3usize.pow(len) {
      let mut rest = code;
      let headings: Vec<FlatHeading> = (0..len)
        .map(|i| {
          let level = u8::try_from(rest % 3).expect("small") + 1;
          rest /= 3;
          flat(&format!("h{i}"), level)
        })
        .collect();

      let forest = build_hierarchy(headings.clone());
      assert_levels_increase(&forest);

      // Siblings and descendants keep document order
      let order: Vec<&str> =
        toc::flatten(&forest).iter().map(|h| h.id.as_str()).collect();
      let expected: Vec<&str> = headings.iter().map(|h| h.id.as_str()).collect();
      assert_eq!(order, expected);

      if headings.len() < 3 {
        assert!(!toc::should_show(&forest, toc::DEFAULT_MIN_HEADINGS));
      }
    }
  }
}

#[test]
fn test_dom_extraction_is_idempotent() {
  let html = r#"<article>
    <h1>Getting Started</h1>
    <h2>설치 방법!!</h2>
    <h3></h3>
    <h2 id="usage">Usage</h2>
  </article>"#;

  let source = DomSource::new(html);
  let first = source.extract_headings();
  let second = source.extract_headings();
  assert_eq!(first, second);

  // Annotated output yields the same table of contents
  let annotated = source.annotate();
  assert_eq!(DomSource::new(&annotated).extract_headings(), first);

  let ids: Vec<&str> =
    toc::flatten(&first).iter().map(|h| h.id.as_str()).collect();
  assert_eq!(ids, vec!["getting-started", "설치-방법", "heading-2", "usage"]);
}

#[test]
fn test_dom_custom_selector() {
  let html = r#"<main class="post"><h2>A</h2><h2>B</h2></main>
    <aside><h2>Related</h2></aside>"#;
  let headings = DomSource::new(html)
    .with_selector("main.post")
    .extract_headings();
  assert_eq!(headings.len(), 2);
}

#[test]
fn test_block_tree_matches_dom_shape() {
  let map: RecordMap = serde_json::from_value(json!({
    "block": {
      "page": { "value": {
        "id": "page", "type": "page",
        "content": ["b1", "b2", "list", "b4"]
      }},
      "b1": { "value": {
        "id": "b1", "type": "header", "properties": { "title": [["Intro"]] }
      }},
      "b2": { "value": {
        "id": "b2", "type": "sub_header",
        "properties": { "title": [["Back"], ["ground", [["i"]]]] }
      }},
      "list": { "value": {
        "id": "list", "type": "toggle",
        "properties": { "title": [["toggle"]] },
        "content": ["b3"]
      }},
      "b3": { "value": {
        "id": "b3", "type": "sub_header", "properties": { "title": [["Method"]] }
      }},
      "b4": { "value": {
        "id": "b4", "type": "header",
        "properties": { "title": [["Conclusion"]] }
      }}
    }
  }))
  .expect("valid record map");

  let forest = BlockTreeSource::new(&map, "page").extract_headings();
  assert_eq!(forest.len(), 2);
  assert_eq!(forest[0].id, "b1");
  let children: Vec<&str> =
    forest[0].children.iter().map(|c| c.title.as_str()).collect();
  assert_eq!(children, vec!["Background", "Method"]);
  assert!(toc::should_show(&forest, 3));
  assert!(!toc::should_show(&forest, 5));
}

#[test]
fn test_malformed_inputs_are_empty() {
  let map = RecordMap::from_json(r#"{"block": {"page": {"value": 17}}}"#)
    .expect("object parses");
  assert!(BlockTreeSource::new(&map, "page").extract_headings().is_empty());

  let map = RecordMap::from_json(
    r#"{"block": {
      "page": {"value": {"id": "page", "type": "page", "content": ["h", "x"]}},
      "h": {"value": {"id": "h", "type": "header",
        "properties": {"title": [["Still here"]]}}},
      "x": null
    }}"#,
  )
  .expect("null record is tolerated");
  let headings = BlockTreeSource::new(&map, "page").extract_headings();
  assert_eq!(headings.len(), 1);
  assert_eq!(headings[0].title, "Still here");

  let html = "<article><h1><<<</h2></p></article";
  // Recovering HTML parsing never fails; at most one heading survives
  assert!(DomSource::new(html).extract_headings().len() <= 1);
}

#[test]
fn test_dom_ids_are_unique() {
  let html = "<article><h2>X</h2><h2>X 2</h2><h2>X</h2><h3>X 2</h3></article>";
  let forest = DomSource::new(html).extract_headings();
  let ids: Vec<&str> =
    toc::flatten(&forest).iter().map(|h| h.id.as_str()).collect();
  assert_eq!(ids, vec!["x", "x-2", "x-2-1", "x-2-3"]);

  let mut unique = ids.clone();
  unique.sort_unstable();
  unique.dedup();
  assert_eq!(unique.len(), ids.len());
}
