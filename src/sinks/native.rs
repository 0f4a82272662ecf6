//! Sink backed by a host output channel

use crate::core::{LoggerError, Result, Severity, Sink};
use crate::host::OutputChannel;

/// Routes each line to the channel method matching its severity.
///
/// Lines are passed through untouched; the host adds level tags and
/// timestamps itself.
pub struct NativeSink {
    channel: Option<Box<dyn OutputChannel>>,
    name: String,
}

impl NativeSink {
    pub fn new(name: impl Into<String>, channel: Box<dyn OutputChannel>) -> Self {
        Self {
            channel: Some(channel),
            name: name.into(),
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.channel.is_none()
    }
}

impl Sink for NativeSink {
    fn emit(&mut self, severity: Severity, line: &str) -> Result<()> {
        let channel = self
            .channel
            .as_mut()
            .ok_or_else(|| LoggerError::SinkDisposed(self.name.clone()))?;

        match severity {
            Severity::Off => {}
            Severity::Error => channel.error(line),
            Severity::Warn => channel.warn(line),
            Severity::Info => channel.info(line),
            Severity::Debug => channel.debug(line),
            Severity::Trace => channel.trace(line),
        }
        Ok(())
    }

    fn show(&mut self) {
        if let Some(channel) = self.channel.as_mut() {
            channel.show();
        }
    }

    fn dispose(&mut self) {
        if let Some(mut channel) = self.channel.take() {
            channel.dispose();
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
