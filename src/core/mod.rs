//! Core logger types and traits

pub mod config;
pub(crate) mod config_watch;
pub mod error;
pub mod format;
pub mod log_contents;
pub mod logger;
pub mod metrics;
pub mod severity;
pub mod sink;
pub(crate) mod unwind;

pub use config::{LoggerConfig, WatchTarget};
pub use error::{LoggerError, Result};
pub use format::{format_line, to_detail};
pub use log_contents::LogContents;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use severity::Severity;
pub use sink::Sink;
