//! # Host Logger
//!
//! A leveled logger for editor extensions. Lines go to the host's structured
//! output channel when the host provides one, and to the console otherwise.
//!
//! ## Features
//!
//! - **Six severities**: `off`, `error`, `warn`, `info`, `debug`, `trace`,
//!   parsed leniently from settings text
//! - **Host aware**: output channel, live level sync from host settings, and
//!   read-back of the persisted log, each optional
//! - **Always usable**: construction and logging never fail or panic past the
//!   logger, whatever the host does
//!
//! ```
//! use host_logger::prelude::*;
//!
//! let logger = LoggerFactory::headless().create_with_level("Acme", "warning");
//! logger.warn("Indexing took longer than expected");
//! logger.info("not shown");
//! ```

pub mod core;
pub mod factory;
pub mod host;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        LogContents, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Result,
        Severity, Sink, WatchTarget,
    };
    pub use crate::factory::LoggerFactory;
    pub use crate::host::{ExtensionContext, Host, NoHost};
    pub use crate::sinks::{ConsoleSink, NativeSink};
}

pub use crate::core::{
    LogContents, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Result,
    Severity, Sink, WatchTarget,
};
pub use factory::LoggerFactory;
pub use host::{ExtensionContext, Host, NoHost};
pub use sinks::{ConsoleSink, NativeSink};
