//! A lenient model of the record map returned by the Notion client.
//!
//! Only the fields the blog reads are modelled. Every block value is
//! deserialized independently so one malformed block never discards the rest
//! of the map.
use std::collections::{HashMap, HashSet};

use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ContentResult;

/// Block records keyed by block ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordMap {
  #[serde(default, deserialize_with = "lenient_records")]
  pub block: HashMap<String, BlockRecord>,
}

/// Wrapper around a block value, as stored in the record map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockRecord {
  #[serde(default, deserialize_with = "lenient_block")]
  pub value: Option<Block>,
}

/// A single Notion block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Block {
  #[serde(default)]
  pub id:               String,
  #[serde(rename = "type", default)]
  pub kind:             String,
  #[serde(default)]
  pub properties:       Option<BlockProperties>,
  /// Child block IDs, in document order.
  #[serde(default)]
  pub content:          Vec<String>,
  /// Milliseconds since the Unix epoch.
  #[serde(default)]
  pub created_time:     Option<i64>,
  /// Milliseconds since the Unix epoch.
  #[serde(default)]
  pub last_edited_time: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockProperties {
  #[serde(default)]
  pub title:   Option<RichText>,
  #[serde(default)]
  pub caption: Option<RichText>,
}

/// Notion rich text: `[["text", [decorations]], ["more text"], ...]`.
///
/// Kept as raw JSON because the decoration payloads vary by block type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct RichText(pub Value);

impl RichText {
  /// Concatenate the text of every segment, dropping decorations.
  #[must_use]
  pub fn plain_text(&self) -> String {
    match &self.0 {
      Value::String(s) => s.clone(),
      Value::Array(segments) => {
        segments
          .iter()
          .filter_map(|segment| {
            match segment {
              Value::String(s) => Some(s.as_str()),
              Value::Array(parts) => parts.first().and_then(Value::as_str),
              _ => None,
            }
          })
          .collect()
      },
      _ => String::new(),
    }
  }
}

impl Block {
  /// Heading level for `header`, `sub_header` and `sub_sub_header` blocks.
  #[must_use]
  pub fn heading_level(&self) -> Option<u8> {
    match self.kind.as_str() {
      "header" => Some(1),
      "sub_header" => Some(2),
      "sub_sub_header" => Some(3),
      _ => None,
    }
  }

  /// Plain text of the block's title property, or an empty string.
  #[must_use]
  pub fn title(&self) -> String {
    self
      .properties
      .as_ref()
      .and_then(|p| p.title.as_ref())
      .map(RichText::plain_text)
      .unwrap_or_default()
  }

  /// Plain text of the block's caption property, or an empty string.
  #[must_use]
  pub fn caption(&self) -> String {
    self
      .properties
      .as_ref()
      .and_then(|p| p.caption.as_ref())
      .map(RichText::plain_text)
      .unwrap_or_default()
  }
}

impl RecordMap {
  /// Parse a record map from JSON.
  ///
  /// # Errors
  ///
  /// Returns an error if the input is not a JSON object. Individual malformed
  /// blocks are not errors.
  pub fn from_json(json: &str) -> ContentResult<Self> {
    Ok(serde_json::from_str(json)?)
  }

  /// Look up a block, accepting both dashed and undashed UUIDs.
  #[must_use]
  pub fn get(&self, id: &str) -> Option<&Block> {
    self
      .block
      .get(id)
      .or_else(|| self.block.get(&to_uuid(id)))
      .and_then(|record| record.value.as_ref())
  }

  /// Blocks under `page_id` in document order, excluding the page itself.
  ///
  /// The walk is iterative and visits each block at most once, so cyclic or
  /// deeply nested content terminates.
  #[must_use]
  pub fn descendants(&self, page_id: &str) -> Vec<(&str, &Block)> {
    let Some(page) = self.get(page_id) else {
      debug!("Page {page_id} not found in record map");
      return Vec::new();
    };

    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(page_id);
    if !page.id.is_empty() {
      visited.insert(page.id.as_str());
    }

    let mut stack: Vec<&str> =
      page.content.iter().rev().map(String::as_str).collect();
    let mut out = Vec::new();

    while let Some(id) = stack.pop() {
      if !visited.insert(id) {
        debug!("Skipping already visited block {id}");
        continue;
      }
      let Some(block) = self.get(id) else {
        continue;
      };
      out.push((id, block));
      stack.extend(block.content.iter().rev().map(String::as_str));
    }

    out
  }

  /// Titles and captions of every block under `page_id`, space-separated.
  #[must_use]
  pub fn page_text(&self, page_id: &str) -> String {
    let mut text = String::new();
    for (_, block) in self.descendants(page_id) {
      for part in [block.title(), block.caption()] {
        let part = part.trim();
        if !part.is_empty() {
          text.push_str(part);
          text.push(' ');
        }
      }
    }
    text.trim_end().to_string()
  }

  /// The page block no other block lists as a child, if there is exactly
  /// one.
  #[must_use]
  pub fn root_page_id(&self) -> Option<&str> {
    let children: HashSet<&str> = self
      .block
      .values()
      .filter_map(|record| record.value.as_ref())
      .flat_map(|block| block.content.iter().map(String::as_str))
      .collect();

    let mut roots = self.block.iter().filter_map(|(id, record)| {
      let block = record.value.as_ref()?;
      (block.kind == "page" && !children.contains(id.as_str()))
        .then_some(id.as_str())
    });

    match (roots.next(), roots.next()) {
      (Some(root), None) => Some(root),
      _ => None,
    }
  }

  /// Last-edited time of a block, in milliseconds since the Unix epoch.
  #[must_use]
  pub fn last_edited_time(&self, id: &str) -> Option<i64> {
    self.get(id).and_then(|block| block.last_edited_time)
  }
}

/// Insert dashes into a 32-character hex ID (`8-4-4-4-12`).
///
/// Anything else is returned unchanged.
#[must_use]
pub fn to_uuid(id: &str) -> String {
  if id.len() != 32 || !id.chars().all(|c| c.is_ascii_hexdigit()) {
    return id.to_string();
  }
  format!(
    "{}-{}-{}-{}-{}",
    &id[0..8],
    &id[8..12],
    &id[12..16],
    &id[16..20],
    &id[20..32]
  )
}

/// Deserialize a block value, yielding `None` instead of an error for
/// malformed data.
///
/// Newer client versions nest the block one level deeper
/// (`{ "value": { "value": {...}, "role": ... } }`); both shapes are
/// accepted.
/// Block records, with any record that is not an object kept as an absent
/// block. A missing or non-object `block` table is empty.
fn lenient_records<'de, D>(
  deserializer: D,
) -> Result<HashMap<String, BlockRecord>, D::Error>
where
  D: Deserializer<'de>,
{
  let Value::Object(records) = Value::deserialize(deserializer)? else {
    debug!("Record map has no block table");
    return Ok(HashMap::new());
  };

  Ok(
    records
      .into_iter()
      .map(|(id, record)| {
        let value = match record {
          Value::Object(mut fields) => {
            fields
              .remove("value")
              .and_then(|raw| lenient_block(raw).ok().flatten())
          },
          other => {
            debug!("Ignoring malformed record {id}: {other}");
            None
          },
        };
        (id, BlockRecord { value })
      })
      .collect(),
  )
}

fn lenient_block<'de, D>(deserializer: D) -> Result<Option<Block>, D::Error>
where
  D: Deserializer<'de>,
{
  let raw = Value::deserialize(deserializer)?;
  let raw = match raw {
    Value::Object(mut map) if !map.contains_key("type") => {
      map.remove("value").unwrap_or(Value::Null)
    },
    other => other,
  };
  if raw.is_null() {
    return Ok(None);
  }
  match serde_json::from_value(raw) {
    Ok(block) => Ok(Some(block)),
    Err(e) => {
      debug!("Ignoring malformed block: {e}");
      Ok(None)
    },
  }
}
