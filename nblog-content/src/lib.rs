//! # nblog-content
//!
//! Content utilities for a statically generated blog backed by Notion:
//! table-of-contents extraction, reading-time estimation and series
//! navigation.
//!
//! ## Quick Start
//!
//! ```rust
//! use nblog_content::{DomSource, HeadingSource, toc};
//!
//! let html = "<article><h1>Intro</h1><h2>Background</h2><h2>Method</h2></article>";
//! let headings = DomSource::new(html).extract_headings();
//!
//! assert_eq!(headings[0].id, "intro");
//! assert_eq!(headings[0].children.len(), 2);
//! assert!(toc::should_show(&headings, toc::DEFAULT_MIN_HEADINGS));
//! ```
//!
//! ## Reading time
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use nblog_content::{
//!   Locale,
//!   reading_time::{PostContent, ReadingTimeCache, ReadingTimeEstimator},
//! };
//!
//! let estimator = ReadingTimeEstimator::new(
//!   Default::default(),
//!   Arc::new(ReadingTimeCache::new(100)),
//! );
//! let result = estimator.estimate_post(&PostContent {
//!   page_id: Some("post-1"),
//!   summary: "짧은 요약입니다",
//!   ..Default::default()
//! });
//!
//! assert_eq!(result.minutes, 1);
//! assert_eq!(result.label(Locale::Ko), "1분 미만 읽기");
//! ```
//!
//! Extraction and estimation never fail: malformed input degrades to an
//! empty table of contents or a one-minute estimate.

pub mod error;
pub mod notion;
pub mod posts;
mod process;
pub mod reading_time;
pub mod series;
pub mod toc;
mod types;
pub mod utils;

pub use crate::{
  error::{ContentError, ContentResult},
  notion::RecordMap,
  posts::Post,
  reading_time::{ReadingTimeCache, ReadingTimeEstimator, ReadingTimeOptions},
  toc::{BlockTreeSource, DomSource, HeadingSource},
  types::{HeadingNode, Locale, ReadingTime},
};
