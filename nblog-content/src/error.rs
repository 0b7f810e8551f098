use thiserror::Error;

/// Error type for parsing content at the edges.
///
/// Extraction and estimation never fail; only parsing record maps and post
/// lists does.
#[derive(Debug, Error)]
pub enum ContentError {
  #[error("Serde error: {0}")]
  Serde(#[from] serde_json::Error),
}

/// Result type for content loading.
pub type ContentResult<T> = Result<T, ContentError>;
