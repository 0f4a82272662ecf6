//! Sink trait for finished log lines

use super::{error::Result, severity::Severity};

/// Destination for fully formatted lines.
///
/// The logger only talks to this interface; whether the line lands in a host
/// output channel or on the console is up to the implementation.
pub trait Sink: Send {
    fn emit(&mut self, severity: Severity, line: &str) -> Result<()>;

    /// Bring the sink to the user's attention, where that means anything
    fn show(&mut self) {}

    /// Release host resources. Called at most once by the logger.
    fn dispose(&mut self) {}

    fn name(&self) -> &str;
}
