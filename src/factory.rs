//! Convenience constructors
//!
//! The factory holds the host resolved once at extension activation and
//! injects it into every logger it creates.

use crate::core::{Logger, LoggerConfig, Severity};
use crate::host::{ExtensionContext, Host, NoHost};
use std::sync::Arc;

#[derive(Clone)]
pub struct LoggerFactory {
    host: Arc<dyn Host>,
    context: Option<ExtensionContext>,
}

impl LoggerFactory {
    pub fn new(host: Arc<dyn Host>) -> Self {
        Self {
            host,
            context: None,
        }
    }

    /// A factory for code running outside any editor host
    pub fn headless() -> Self {
        Self::new(Arc::new(NoHost))
    }

    /// Attach the extension context so created loggers can read their
    /// persisted logs back
    #[must_use]
    pub fn with_context(mut self, context: ExtensionContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn host(&self) -> &Arc<dyn Host> {
        &self.host
    }

    /// Logger at the default level
    pub fn create(&self, name: &str) -> Logger {
        self.from_config(LoggerConfig::new(name))
    }

    pub fn create_with_level(&self, name: &str, level: impl Into<Severity>) -> Logger {
        self.from_config(LoggerConfig::new(name).with_level(level))
    }

    /// Logger that never binds the host channel
    pub fn create_console(&self, name: &str, level: impl Into<Severity>) -> Logger {
        self.from_config(
            LoggerConfig::new(name)
                .with_level(level)
                .with_host_sink(false),
        )
    }

    /// Logger from a full config. The factory's context is used unless the
    /// config carries its own.
    pub fn from_config(&self, mut config: LoggerConfig) -> Logger {
        if config.context.is_none() {
            config.context = self.context.clone();
        }
        Logger::new(config, Arc::clone(&self.host))
    }
}

impl Default for LoggerFactory {
    fn default() -> Self {
        Self::headless()
    }
}

impl std::fmt::Debug for LoggerFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerFactory")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
