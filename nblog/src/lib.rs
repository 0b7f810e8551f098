//! Expose nblog's command layer for use in integration tests. The supported
//! library surface lives in `nblog-content` and `nblog-config`.
pub mod cli;
pub mod commands;
