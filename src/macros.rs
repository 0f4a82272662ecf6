//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. A message followed
//! by `;` takes auxiliary details instead: any `Serialize` values, appended to
//! the message as text.
//!
//! # Examples
//!
//! ```
//! use host_logger::prelude::*;
//! use host_logger::info;
//!
//! let logger = Logger::default();
//!
//! // Basic logging
//! info!(logger, "Extension activated");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Debug adapter listening on port {}", port);
//!
//! // With details
//! info!(logger, "Opened document"; serde_json::json!({"uri": "file:///a.rs"}), 42);
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use host_logger::prelude::*;
/// # let logger = Logger::default();
/// use host_logger::log;
/// log!(logger, Severity::Info, "Simple message");
/// log!(logger, Severity::Error, "Error code: {}", 500);
/// log!(logger, Severity::Warn, "Slow request"; "textDocument/hover", 1200);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $msg:expr; $($detail:expr),+ $(,)?) => {
        $logger.log_with_details(
            $level,
            &$msg,
            &[$($crate::core::format::to_detail(&$detail)),+],
        )
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a trace-level message.
///
/// # Examples
///
/// ```
/// # use host_logger::prelude::*;
/// # let logger = Logger::builder().level(Severity::Trace).build();
/// use host_logger::trace;
/// trace!(logger, "Entering activate()");
/// trace!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use host_logger::prelude::*;
/// # let logger = Logger::builder().level(Severity::Trace).build();
/// use host_logger::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use host_logger::prelude::*;
/// # let logger = Logger::builder().level(Severity::Trace).build();
/// use host_logger::info;
/// info!(logger, "Extension activated");
/// info!(logger, "Indexed {} files", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use host_logger::prelude::*;
/// # let logger = Logger::builder().level(Severity::Trace).build();
/// use host_logger::warn;
/// warn!(logger, "Language server slow to respond");
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use host_logger::prelude::*;
/// # let logger = Logger::builder().level(Severity::Trace).build();
/// use host_logger::error;
/// error!(logger, "Failed to start language server");
/// error!(logger, "Request failed"; serde_json::json!({"code": -32603}));
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Error, $($arg)+)
    };
}
