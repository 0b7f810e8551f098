use std::sync::LazyLock;

use regex::Regex;

/// Build a heading anchor ID from its text and position.
///
/// Lowercases the text and keeps only ASCII letters, digits, Hangul
/// syllables, whitespace and hyphens. Whitespace runs become a single hyphen,
/// hyphen runs are collapsed and leading/trailing hyphens are trimmed. When
/// nothing survives, falls back to `heading-<index>`.
#[must_use]
pub fn heading_id(text: &str, index: usize) -> String {
  let lowered = text.trim().to_lowercase();

  let mut id = String::with_capacity(lowered.len());
  let mut pending_hyphen = false;
  for c in lowered.chars() {
    if c.is_whitespace() || c == '-' {
      pending_hyphen = true;
    } else if c.is_ascii_lowercase()
      || c.is_ascii_digit()
      || is_hangul_syllable(c)
    {
      if pending_hyphen && !id.is_empty() {
        id.push('-');
      }
      pending_hyphen = false;
      id.push(c);
    }
  }

  if id.is_empty() {
    format!("heading-{index}")
  } else {
    id
  }
}

/// Return true for precomposed Hangul syllables (가-힣).
#[must_use]
pub const fn is_hangul_syllable(c: char) -> bool {
  matches!(c, '\u{AC00}'..='\u{D7A3}')
}

/// Return true for characters read one at a time rather than as words:
/// Hangul Jamo, compatibility Jamo, enclosed Hangul, Hangul syllables and
/// CJK Unified Ideographs.
#[must_use]
pub const fn is_cjk(c: char) -> bool {
  matches!(
    c,
    '\u{1100}'..='\u{11FF}'
      | '\u{3131}'..='\u{318E}'
      | '\u{3200}'..='\u{321E}'
      | '\u{3260}'..='\u{327E}'
      | '\u{AC00}'..='\u{D7A3}'
      | '\u{4E00}'..='\u{9FFF}'
  )
}

/// Replace markup tags with spaces, collapse whitespace runs and trim.
#[must_use]
pub fn strip_tags(content: &str) -> String {
  static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^>]*>").unwrap_or_else(|e| {
      log::error!("Failed to compile TAG_RE regex: {e}");
      never_matching_regex()
    })
  });

  TAG_RE
    .replace_all(content, " ")
    .split_whitespace()
    .collect::<Vec<_>>()
    .join(" ")
}

/// Create a regex that never matches anything.
///
/// This is used as a fallback pattern when a regex fails to compile.
///
/// # Panics
///
/// Panics if the fallback regex pattern `r"^\b$"` fails to compile, which
/// should never happen.
#[must_use]
#[allow(clippy::unwrap_used, reason = "Pattern is a compile-time constant")]
pub fn never_matching_regex() -> Regex {
  Regex::new(r"[^\s\S]")
    .unwrap_or_else(|_| Regex::new(r"^\b$").unwrap())
}
