//! Construction-time logger settings

use super::severity::Severity;
use crate::host::ExtensionContext;
use serde::{Deserialize, Serialize};

pub const DEFAULT_NAME: &str = "Extension";
pub const DEFAULT_LEVEL_KEY: &str = "logLevel";
pub const DEFAULT_FALLBACK_LEVEL: &str = "info";

/// Logger settings.
///
/// Deserializes from the shape extensions usually keep in their settings,
/// with `level` accepting any string:
///
/// ```
/// use host_logger::{LoggerConfig, Severity};
///
/// let config: LoggerConfig =
///     serde_json::from_str(r#"{"name": "Acme", "level": " WARNING "}"#).unwrap();
/// assert_eq!(config.level, Severity::Warn);
/// assert!(config.use_host_sink);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggerConfig {
    pub name: String,
    pub level: Severity,
    pub use_host_sink: bool,
    /// Only needed to read persisted logs back
    #[serde(skip)]
    pub context: Option<ExtensionContext>,
}

impl LoggerConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: impl Into<Severity>) -> Self {
        self.level = level.into();
        self
    }

    #[must_use]
    pub fn with_host_sink(mut self, use_host_sink: bool) -> Self {
        self.use_host_sink = use_host_sink;
        self
    }

    #[must_use]
    pub fn with_context(mut self, context: ExtensionContext) -> Self {
        self.context = Some(context);
        self
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            level: Severity::Info,
            use_host_sink: true,
            context: None,
        }
    }
}

/// The host setting a config watch keeps the level in sync with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTarget {
    pub section: String,
    pub key: String,
    pub fallback: String,
}

impl WatchTarget {
    pub fn new(
        section: impl Into<String>,
        key: impl Into<String>,
        fallback: impl Into<String>,
    ) -> Self {
        Self {
            section: section.into(),
            key: key.into(),
            fallback: fallback.into(),
        }
    }

    /// `<section>.logLevel`, falling back to `info`
    pub fn log_level(section: impl Into<String>) -> Self {
        Self::new(section, DEFAULT_LEVEL_KEY, DEFAULT_FALLBACK_LEVEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::default();
        assert_eq!(config.name, "Extension");
        assert_eq!(config.level, Severity::Info);
        assert!(config.use_host_sink);
        assert!(config.context.is_none());
    }

    #[test]
    fn test_level_from_text_or_enum() {
        assert_eq!(LoggerConfig::new("A").with_level("Debug").level, Severity::Debug);
        assert_eq!(
            LoggerConfig::new("A").with_level(Severity::Trace).level,
            Severity::Trace
        );
        assert_eq!(LoggerConfig::new("A").with_level("loud").level, Severity::Info);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: LoggerConfig =
            serde_json::from_str(r#"{"level": "error", "useHostSink": false}"#).unwrap();
        assert_eq!(config.name, "Extension");
        assert_eq!(config.level, Severity::Error);
        assert!(!config.use_host_sink);
    }

    #[test]
    fn test_serialize_camel_case() {
        let json = serde_json::to_value(LoggerConfig::new("Acme").with_level("warning")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Acme", "level": "warn", "useHostSink": true})
        );
    }

    #[test]
    fn test_watch_target_defaults() {
        let target = WatchTarget::log_level("acme");
        assert_eq!(target.section, "acme");
        assert_eq!(target.key, "logLevel");
        assert_eq!(target.fallback, "info");
    }
}
