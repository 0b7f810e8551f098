pub mod config;
pub mod error;
pub mod reading_time;
pub mod series;
pub mod toc;

pub use config::Config;
pub use error::ConfigError;
