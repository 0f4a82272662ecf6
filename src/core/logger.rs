//! Main logger implementation

use super::{
    config::{LoggerConfig, WatchTarget, DEFAULT_FALLBACK_LEVEL, DEFAULT_LEVEL_KEY},
    config_watch::{self, ConfigWatch},
    error::{LoggerError, Result},
    format::format_line,
    log_contents::{self, LogContents},
    metrics::LoggerMetrics,
    severity::Severity,
    sink::Sink,
    unwind::CatchUnwind,
};
use crate::host::{ExtensionContext, Host, NoHost};
use crate::sinks::{ConsoleSink, NativeSink};
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Where emitted lines go.
///
/// `Unbound -> Bound` happens once, when the host hands out an output
/// channel. `Disposed` is terminal. Anything but `Bound` writes to the
/// console fallback.
enum SinkState {
    Unbound,
    Bound(Box<dyn Sink>),
    Disposed,
}

pub struct Logger {
    name: String,
    level: Arc<RwLock<Severity>>,
    use_host_sink: bool,
    context: Option<ExtensionContext>,
    host: Arc<dyn Host>,
    sink: Mutex<SinkState>,
    fallback: Mutex<ConsoleSink>,
    watch: Mutex<Option<ConfigWatch>>,
    /// Metrics for observability (suppressed, routed, failed)
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Create a logger and, if `config.use_host_sink` is set, try to bind the
    /// host's output channel right away. Never fails: a host that cannot
    /// provide a channel leaves the logger on the console fallback.
    pub fn new(config: LoggerConfig, host: Arc<dyn Host>) -> Self {
        let fallback = ConsoleSink::new(&config.name);
        Self::with_fallback(config, host, fallback)
    }

    fn with_fallback(config: LoggerConfig, host: Arc<dyn Host>, fallback: ConsoleSink) -> Self {
        let sink = if config.use_host_sink {
            match Self::acquire_sink(host.as_ref(), &config.name) {
                Some(sink) => SinkState::Bound(sink),
                None => SinkState::Unbound,
            }
        } else {
            SinkState::Unbound
        };

        Self {
            name: config.name,
            level: Arc::new(RwLock::new(config.level)),
            use_host_sink: config.use_host_sink,
            context: config.context,
            host,
            sink: Mutex::new(sink),
            fallback: Mutex::new(fallback),
            watch: Mutex::new(None),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    /// Ask the host for a channel, swallowing errors and panics
    fn acquire_sink(host: &dyn Host, name: &str) -> Option<Box<dyn Sink>> {
        let acquired = catch_unwind(AssertUnwindSafe(|| host.create_output_channel(name)));
        match acquired {
            Ok(Ok(channel)) => Some(Box::new(NativeSink::new(name, channel))),
            Ok(Err(_)) => None,
            Err(payload) => {
                let e = LoggerError::host_panic("creating output channel", payload.as_ref());
                eprintln!("[LOGGER ERROR] {}. Using console output.", e);
                None
            }
        }
    }

    /// Bind the host channel for hosts that only provide it asynchronously.
    ///
    /// Returns whether a host channel is bound afterwards. Does nothing when
    /// the logger was configured without the host sink or has been disposed.
    pub async fn ensure_sink(&self) -> bool {
        let should_acquire = {
            let state = self.sink.lock();
            match &*state {
                SinkState::Bound(_) => return true,
                SinkState::Disposed => return false,
                SinkState::Unbound => self.use_host_sink,
            }
        };
        if !should_acquire {
            return false;
        }

        let acquired = CatchUnwind(self.host.create_output_channel_async(&self.name)).await;
        let channel = match acquired {
            Ok(Ok(channel)) => channel,
            Ok(Err(_)) => return false,
            Err(payload) => {
                let e = LoggerError::host_panic("creating output channel", payload.as_ref());
                eprintln!("[LOGGER ERROR] {}. Using console output.", e);
                return false;
            }
        };

        let mut state = self.sink.lock();
        match *state {
            SinkState::Unbound => {
                *state = SinkState::Bound(Box::new(NativeSink::new(&self.name, channel)));
                true
            }
            SinkState::Bound(_) => {
                // Lost a race with another ensure_sink; keep the first channel
                let mut extra = NativeSink::new(&self.name, channel);
                extra.dispose();
                true
            }
            SinkState::Disposed => {
                let mut extra = NativeSink::new(&self.name, channel);
                extra.dispose();
                false
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> Severity {
        *self.level.read()
    }

    pub fn set_level(&self, level: Severity) {
        *self.level.write() = level;
    }

    /// Set the level from free-form text; unknown text means `Info`
    pub fn set_level_from_text(&self, text: &str) {
        self.set_level(Severity::parse(text));
    }

    #[inline]
    pub fn is_enabled(&self, severity: Severity) -> bool {
        severity.passes(*self.level.read())
    }

    pub fn has_host_sink(&self) -> bool {
        matches!(*self.sink.lock(), SinkState::Bound(_))
    }

    pub fn is_disposed(&self) -> bool {
        matches!(*self.sink.lock(), SinkState::Disposed)
    }

    pub fn context(&self) -> Option<&ExtensionContext> {
        self.context.as_ref()
    }

    /// Get the logger metrics
    ///
    /// # Example
    ///
    /// ```
    /// use host_logger::Logger;
    ///
    /// let logger = Logger::builder().name("Acme").level("warn").build();
    /// logger.debug("not shown");
    /// assert_eq!(logger.metrics().suppressed_count(), 1);
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn log(&self, severity: Severity, message: impl Into<String>) {
        if !self.is_enabled(severity) {
            self.metrics.record_suppressed();
            return;
        }

        let message = message.into();
        self.emit(severity, &message);
    }

    /// Log `message` followed by rendered `details`, see
    /// [`format_line`](super::format::format_line)
    pub fn log_with_details(&self, severity: Severity, message: &str, details: &[Value]) {
        if !self.is_enabled(severity) {
            self.metrics.record_suppressed();
            return;
        }

        let line = format_line(message, details);
        self.emit(severity, &line);
    }

    /// Write a finished line to exactly one sink
    fn emit(&self, severity: Severity, line: &str) {
        let mut state = self.sink.lock();
        if let SinkState::Bound(sink) = &mut *state {
            match Self::write_isolated(sink.as_mut(), severity, line) {
                Ok(()) => self.metrics.record_native(),
                Err(e) => self.report_failure(&e),
            }
            return;
        }
        drop(state);

        let mut fallback = self.fallback.lock();
        match Self::write_isolated(&mut *fallback, severity, line) {
            Ok(()) => self.metrics.record_fallback(),
            Err(e) => self.report_failure(&e),
        }
    }

    /// Write through `sink`, turning a panic into an error
    fn write_isolated(sink: &mut dyn Sink, severity: Severity, line: &str) -> Result<()> {
        let name = sink.name().to_string();
        match catch_unwind(AssertUnwindSafe(|| sink.emit(severity, line))) {
            Ok(result) => result,
            Err(payload) => Err(LoggerError::host_panic(
                format!("writing to sink '{}'", name),
                payload.as_ref(),
            )),
        }
    }

    fn report_failure(&self, e: &LoggerError) {
        let failures = self.metrics.record_sink_failure();

        // Alert on first failure and periodically thereafter
        if failures == 0 || (failures + 1) % 1000 == 0 {
            eprintln!(
                "[LOGGER ERROR] {} ({} lines lost so far): {}",
                self.name,
                failures + 1,
                e
            );
        }
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(Severity::Error, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(Severity::Warn, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(Severity::Info, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(Severity::Debug, message);
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(Severity::Trace, message);
    }

    pub fn error_with_details(&self, message: &str, details: &[Value]) {
        self.log_with_details(Severity::Error, message, details);
    }

    pub fn warn_with_details(&self, message: &str, details: &[Value]) {
        self.log_with_details(Severity::Warn, message, details);
    }

    pub fn info_with_details(&self, message: &str, details: &[Value]) {
        self.log_with_details(Severity::Info, message, details);
    }

    pub fn debug_with_details(&self, message: &str, details: &[Value]) {
        self.log_with_details(Severity::Debug, message, details);
    }

    pub fn trace_with_details(&self, message: &str, details: &[Value]) {
        self.log_with_details(Severity::Trace, message, details);
    }

    /// Reveal the host output channel, if one is bound
    pub fn show(&self) {
        if let SinkState::Bound(sink) = &mut *self.sink.lock() {
            if let Err(payload) = catch_unwind(AssertUnwindSafe(|| sink.show())) {
                let e = LoggerError::host_panic("showing output channel", payload.as_ref());
                eprintln!("[LOGGER ERROR] {}", e);
            }
        }
    }

    /// Read `section.key` from the host and apply it as the level.
    ///
    /// A missing setting, a host without configuration, or a failing host
    /// call all resolve to `fallback`. Returns the level now in effect.
    pub fn sync_level_from_host_config(&self, section: &str, key: &str, fallback: &str) -> Severity {
        let target = WatchTarget::new(section, key, fallback);
        let severity = config_watch::read_level(self.host.as_ref(), &target);
        self.set_level(severity);
        severity
    }

    /// [`Logger::sync_level_from_host_config`] with key `logLevel` and
    /// fallback `info`
    pub fn sync_log_level(&self, section: &str) -> Severity {
        self.sync_level_from_host_config(section, DEFAULT_LEVEL_KEY, DEFAULT_FALLBACK_LEVEL)
    }

    /// [`Logger::enable_config_watch`] with key `logLevel` and fallback `info`
    pub fn watch_log_level(&self, section: &str) {
        self.enable_config_watch(section, DEFAULT_LEVEL_KEY, DEFAULT_FALLBACK_LEVEL);
    }

    /// Sync the level now and again whenever the host reports a change to
    /// `section`. Replaces any watch already active on this logger.
    pub fn enable_config_watch(&self, section: &str, key: &str, fallback: &str) {
        self.sync_level_from_host_config(section, key, fallback);

        let mut watch = self.watch.lock();
        if let Some(mut previous) = watch.take() {
            previous.dispose();
        }
        if matches!(*self.sink.lock(), SinkState::Disposed) {
            return;
        }
        *watch = Some(ConfigWatch::start(
            &self.host,
            &self.level,
            WatchTarget::new(section, key, fallback),
        ));
    }

    /// Cancel the active watch, if any. Safe to call repeatedly.
    pub fn disable_config_watch(&self) {
        if let Some(mut watch) = self.watch.lock().take() {
            watch.dispose();
        }
    }

    /// Whether a host change subscription is currently live
    pub fn is_watching_config(&self) -> bool {
        self.watch
            .lock()
            .as_ref()
            .is_some_and(|watch| watch.is_subscribed())
    }

    /// The setting the active watch follows
    pub fn watch_target(&self) -> Option<WatchTarget> {
        self.watch.lock().as_ref().map(|watch| watch.target().clone())
    }

    /// Read this logger's persisted channel log from the host
    pub async fn get_log_contents(&self) -> LogContents {
        Self::read_log_contents(self.host.as_ref(), self.context.as_ref(), &self.name).await
    }

    /// Read the persisted log of any channel by name
    ///
    /// # Example
    ///
    /// ```
    /// use host_logger::{host::NoHost, Logger};
    ///
    /// let contents = tokio_test::block_on(Logger::read_log_contents(&NoHost, None, "Acme"));
    /// assert!(!contents.success);
    /// ```
    pub async fn read_log_contents(
        host: &dyn Host,
        context: Option<&ExtensionContext>,
        channel_name: &str,
    ) -> LogContents {
        log_contents::read_channel_log(host, context, channel_name)
            .await
            .into()
    }

    /// Cancel the config watch and release the host channel.
    ///
    /// Idempotent. Later logging calls go to the console fallback.
    pub fn dispose(&self) {
        // Holding the watch lock across the swap keeps a concurrent
        // enable_config_watch from subscribing after the watch is released.
        let mut watch = self.watch.lock();
        let previous = std::mem::replace(&mut *self.sink.lock(), SinkState::Disposed);
        if let Some(mut active) = watch.take() {
            active.dispose();
        }
        drop(watch);

        if let SinkState::Bound(mut sink) = previous {
            if let Err(payload) = catch_unwind(AssertUnwindSafe(|| sink.dispose())) {
                let e = LoggerError::host_panic("disposing output channel", payload.as_ref());
                eprintln!("[LOGGER ERROR] {}", e);
            }
        }
    }
}

impl Default for Logger {
    /// Default config on a host with no capabilities
    fn default() -> Self {
        Self::new(LoggerConfig::default(), Arc::new(NoHost))
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("has_host_sink", &self.has_host_sink())
            .field("is_watching_config", &self.is_watching_config())
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use host_logger::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .name("Acme")
///     .level("debug")
///     .host(Arc::new(NoHost))
///     .build();
///
/// assert_eq!(logger.level(), Severity::Debug);
/// assert!(!logger.has_host_sink());
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    host: Option<Arc<dyn Host>>,
    fallback: Option<ConsoleSink>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            host: None,
            fallback: None,
        }
    }

    /// Replace every config field at once
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Set the level from a [`Severity`] or any text `Severity::parse` accepts
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: impl Into<Severity>) -> Self {
        self.config.level = level.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn use_host_sink(mut self, use_host_sink: bool) -> Self {
        self.config.use_host_sink = use_host_sink;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn context(mut self, context: ExtensionContext) -> Self {
        self.config.context = Some(context);
        self
    }

    /// Host capabilities to use. Defaults to [`NoHost`].
    #[must_use = "builder methods return a new value"]
    pub fn host(mut self, host: Arc<dyn Host>) -> Self {
        self.host = Some(host);
        self
    }

    /// Console sink used while no host channel is bound. Its prefix is
    /// renamed to the logger's name.
    #[must_use = "builder methods return a new value"]
    pub fn fallback(mut self, fallback: ConsoleSink) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let host = self.host.unwrap_or_else(|| Arc::new(NoHost));
        match self.fallback {
            Some(mut fallback) => {
                fallback.rename(&self.config.name);
                Logger::with_fallback(self.config, host, fallback)
            }
            None => Logger::new(self.config, host),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
