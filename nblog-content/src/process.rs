//! Panic containment for extraction over untrusted input.
use log::error;

/// Run `extract_fn`, returning `fallback` if it panics.
///
/// HTML and record-map inputs come from an external service, so a malformed
/// document must degrade to an empty result rather than abort a site build.
///
/// # Arguments
///
/// * `extract_fn` - The extraction to run
/// * `fallback` - Value returned if extraction panics
pub fn process_safe<T, F>(extract_fn: F, fallback: T) -> T
where
  F: FnOnce() -> T,
{
  let result =
    std::panic::catch_unwind(std::panic::AssertUnwindSafe(extract_fn));

  match result {
    Ok(value) => value,
    Err(e) => {
      if let Some(error_msg) = e.downcast_ref::<String>() {
        error!("Error extracting content: {error_msg}");
      } else if let Some(error_msg) = e.downcast_ref::<&str>() {
        error!("Error extracting content: {error_msg}");
      } else {
        error!("Unknown error occurred while extracting content");
      }
      fallback
    },
  }
}
