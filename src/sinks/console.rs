//! Console sink implementation
//!
//! Used whenever no host output channel is bound.

use crate::core::{LoggerError, Result, Severity, Sink};
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::Write;

enum Target {
    Std,
    Writer(Box<dyn Write + Send>),
}

pub struct ConsoleSink {
    prefix: String,
    #[cfg_attr(not(feature = "console"), allow(dead_code))]
    use_colors: bool,
    target: Target,
}

impl ConsoleSink {
    /// Lines are written as `[<name>] <line>`
    pub fn new(name: &str) -> Self {
        Self {
            prefix: format!("[{}]", name),
            use_colors: false,
            target: Target::Std,
        }
    }

    /// Send every line to `writer` instead of stdout/stderr
    ///
    /// # Example
    ///
    /// ```
    /// use host_logger::sinks::ConsoleSink;
    ///
    /// let sink = ConsoleSink::new("Acme").with_writer(std::io::sink());
    /// ```
    #[must_use]
    pub fn with_writer<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.target = Target::Writer(Box::new(writer));
        self
    }

    /// Color the prefix by severity. Off by default.
    #[cfg(feature = "console")]
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Rename the prefix, keeping the output target
    pub(crate) fn rename(&mut self, name: &str) {
        self.prefix = format!("[{}]", name);
    }

    #[cfg(feature = "console")]
    fn format_line(&self, severity: Severity, line: &str) -> String {
        if self.use_colors {
            format!("{} {}", self.prefix.color(severity.color_code()), line)
        } else {
            format!("{} {}", self.prefix, line)
        }
    }

    #[cfg(not(feature = "console"))]
    fn format_line(&self, _severity: Severity, line: &str) -> String {
        format!("{} {}", self.prefix, line)
    }
}

impl Sink for ConsoleSink {
    fn emit(&mut self, severity: Severity, line: &str) -> Result<()> {
        if severity == Severity::Off {
            return Ok(());
        }
        let output = self.format_line(severity, line);

        match &mut self.target {
            // Route Error and Warn to stderr, others to stdout
            Target::Std => match severity {
                Severity::Error | Severity::Warn => eprintln!("{}", output),
                _ => println!("{}", output),
            },
            Target::Writer(writer) => {
                writeln!(writer, "{}", output)
                    .map_err(|e| LoggerError::writer(format!("console write failed: {}", e)))?;
                writer.flush()?;
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
