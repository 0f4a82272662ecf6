//! Capabilities the editor host may provide
//!
//! The logger never probes its environment. Whatever sits above it resolves
//! the host once and hands over an `Arc<dyn Host>`; a host that lacks a
//! capability simply keeps the default method, which reports
//! [`LoggerError::Unsupported`]. [`NoHost`] implements nothing at all.

pub mod fs;

use crate::core::{LoggerError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use fs::{FileKind, FileStat, HostFileSystem};
#[cfg(feature = "local-fs")]
pub use fs::LocalFileSystem;

/// Callback invoked by the host whenever configuration changes
pub type ConfigListener = Arc<dyn Fn(&dyn ConfigurationChange) + Send + Sync>;

/// A structured output channel owned by the host.
///
/// The host tags each line with its level and a timestamp, so callers pass
/// the bare text.
pub trait OutputChannel: Send {
    fn error(&mut self, text: &str);
    fn warn(&mut self, text: &str);
    fn info(&mut self, text: &str);
    fn debug(&mut self, text: &str);
    fn trace(&mut self, text: &str);

    /// Reveal the channel in the host UI
    fn show(&mut self) {}

    fn dispose(&mut self) {}
}

/// Handle to a registered listener. Disposing twice must be harmless.
pub trait Subscription: Send {
    fn dispose(&mut self);
}

/// A configuration change notification
pub trait ConfigurationChange {
    fn affects_configuration(&self, section: &str) -> bool;
}

/// The host environment, as seen by the logger
#[async_trait]
pub trait Host: Send + Sync {
    /// Create a structured log output channel named `name`
    fn create_output_channel(&self, _name: &str) -> Result<Box<dyn OutputChannel>> {
        Err(LoggerError::unsupported("output channel"))
    }

    /// Same as [`Host::create_output_channel`] for hosts that only hand out
    /// channels asynchronously
    async fn create_output_channel_async(&self, name: &str) -> Result<Box<dyn OutputChannel>> {
        self.create_output_channel(name)
    }

    /// Read a single string setting; `Ok(None)` when it is not set
    fn get_configuration(&self, _section: &str, _key: &str) -> Result<Option<String>> {
        Err(LoggerError::unsupported("configuration"))
    }

    fn on_did_change_configuration(
        &self,
        _listener: ConfigListener,
    ) -> Result<Box<dyn Subscription>> {
        Err(LoggerError::unsupported("configuration change events"))
    }

    fn file_system(&self) -> Option<&dyn HostFileSystem> {
        None
    }
}

/// Null host: every capability is missing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHost;

impl Host for NoHost {}

/// Opaque handle identifying the extension inside the host
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtensionContext {
    pub extension_id: String,
    pub log_dir: Option<PathBuf>,
}

impl ExtensionContext {
    pub fn new(extension_id: impl Into<String>) -> Self {
        Self {
            extension_id: extension_id.into(),
            log_dir: None,
        }
    }

    #[must_use]
    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(log_dir.into());
        self
    }

    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }

    /// Where the host persists the channel named `channel_name`
    pub fn log_file_for(&self, channel_name: &str) -> Option<PathBuf> {
        self.log_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.log", channel_name)))
    }
}
