//! Error types for the logger system
//!
//! None of these escape a logging call. They travel between the logger and
//! the host capabilities, and end up as the text of a failed [`LogContents`].
//!
//! [`LogContents`]: super::LogContents

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// The host does not implement the requested capability
    #[error("Host capability not available: {capability}")]
    Unsupported { capability: &'static str },

    /// A host call failed
    #[error("Host error during {operation}: {message}")]
    Host { operation: String, message: String },

    /// A host call panicked
    #[error("Host panicked during {operation}: {message}")]
    HostPanic { operation: String, message: String },

    /// The host file system panicked while touching the log file
    #[error("Host file system panicked while {operation} '{}': {message}", path.display())]
    FileSystemPanic {
        operation: &'static str,
        path: PathBuf,
        message: String,
    },

    /// No file system capability to read persisted logs from
    #[error("Host file system is not available; persisted logs can only be read inside the editor host")]
    FileSystemUnavailable,

    /// No extension context was supplied
    #[error("An extension context is required to locate persisted logs")]
    MissingContext,

    /// The extension context does not carry a log directory
    #[error("Extension context '{extension_id}' has no log directory")]
    MissingLogDirectory { extension_id: String },

    #[error("Log file not found: {}", path.display())]
    LogFileNotFound { path: PathBuf },

    #[error("Log path is not a file: {}", path.display())]
    NotAFile { path: PathBuf },

    /// IO error with context
    #[error("IO error while {operation} '{}': {source}", path.display())]
    IoOperation {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Sink has already been disposed
    #[error("Sink '{0}' has been disposed")]
    SinkDisposed(String),
}

impl LoggerError {
    pub fn unsupported(capability: &'static str) -> Self {
        LoggerError::Unsupported { capability }
    }

    pub fn host(operation: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Host {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Build a panic error from a `catch_unwind` payload
    pub fn host_panic(
        operation: impl Into<String>,
        payload: &(dyn std::any::Any + Send),
    ) -> Self {
        LoggerError::HostPanic {
            operation: operation.into(),
            message: panic_message(payload),
        }
    }

    /// Panic of a host file system call on `path`
    pub fn file_system_panic(
        operation: &'static str,
        path: impl Into<PathBuf>,
        payload: &(dyn std::any::Any + Send),
    ) -> Self {
        LoggerError::FileSystemPanic {
            operation,
            path: path.into(),
            message: panic_message(payload),
        }
    }

    pub fn io_operation(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation,
            path: path.into(),
            source,
        }
    }

    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }

    /// Path of the log file involved, if the failure happened after it was resolved
    pub fn file_path(&self) -> Option<&PathBuf> {
        match self {
            LoggerError::LogFileNotFound { path }
            | LoggerError::NotAFile { path }
            | LoggerError::IoOperation { path, .. }
            | LoggerError::FileSystemPanic { path, .. } => Some(path),
            _ => None,
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
