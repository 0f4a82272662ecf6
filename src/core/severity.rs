//! Severity definitions and string conversion

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Every surface token `parse` recognizes, in stable order.
pub const VALID_TOKENS: [&str; 7] = ["off", "error", "warn", "warning", "info", "debug", "trace"];

/// Ranked log importance. A lower rank means a higher priority; `Off`
/// disables emission entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    Off = 0,
    Error = 1,
    Warn = 2,
    #[default]
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl Severity {
    /// All severities ordered by rank.
    pub const ALL: [Severity; 6] = [
        Severity::Off,
        Severity::Error,
        Severity::Warn,
        Severity::Info,
        Severity::Debug,
        Severity::Trace,
    ];

    /// Canonical lowercase token
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Off => "off",
            Severity::Error => "error",
            Severity::Warn => "warn",
            Severity::Info => "info",
            Severity::Debug => "debug",
            Severity::Trace => "trace",
        }
    }

    #[inline]
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::ALL.get(usize::from(rank)).copied()
    }

    /// Resolve free-form text to a severity.
    ///
    /// Input is trimmed and compared case-insensitively. `"warning"` is an
    /// alias for `Warn`. Anything unrecognized, including the empty string,
    /// resolves to `Info`.
    pub fn parse(text: &str) -> Self {
        match text.trim().to_lowercase().as_str() {
            "off" => Severity::Off,
            "error" => Severity::Error,
            "warn" | "warning" => Severity::Warn,
            "info" => Severity::Info,
            "debug" => Severity::Debug,
            "trace" => Severity::Trace,
            _ => Severity::Info,
        }
    }

    /// Whether a call at `self` passes a threshold of `threshold`.
    #[inline]
    pub fn passes(&self, threshold: Severity) -> bool {
        *self != Severity::Off && threshold != Severity::Off && *self <= threshold
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Severity::Off => White,
            Severity::Error => Red,
            Severity::Warn => Yellow,
            Severity::Info => Green,
            Severity::Debug => Blue,
            Severity::Trace => BrightBlack,
        }
    }
}

/// Total parse, see [`Severity::parse`].
pub fn parse(text: &str) -> Severity {
    Severity::parse(text)
}

/// Canonical token for a severity.
pub fn format(severity: Severity) -> &'static str {
    severity.as_str()
}

/// Canonical token for a raw rank; ranks outside `0..=5` map to `"info"`.
pub fn format_rank(rank: u8) -> &'static str {
    Severity::from_rank(rank)
        .map(|s| s.as_str())
        .unwrap_or("info")
}

pub fn valid_tokens() -> &'static [&'static str] {
    &VALID_TOKENS
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Severity::parse(s))
    }
}

impl From<&str> for Severity {
    fn from(text: &str) -> Self {
        Severity::parse(text)
    }
}

impl From<String> for Severity {
    fn from(text: String) -> Self {
        Severity::parse(&text)
    }
}

impl From<&String> for Severity {
    fn from(text: &String) -> Self {
        Severity::parse(text)
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        severity.as_str().to_string()
    }
}

impl TryFrom<u8> for Severity {
    type Error = u8;

    fn try_from(rank: u8) -> Result<Self, u8> {
        Severity::from_rank(rank).ok_or(rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_are_ordered() {
        assert!(Severity::Off < Severity::Error);
        assert!(Severity::Error < Severity::Warn);
        assert!(Severity::Warn < Severity::Info);
        assert!(Severity::Info < Severity::Debug);
        assert!(Severity::Debug < Severity::Trace);
        assert_eq!(Severity::Trace.rank(), 5);
    }

    #[test]
    fn test_parse_synonyms_and_fallback() {
        assert_eq!(parse("WARNING"), Severity::Warn);
        assert_eq!(parse(" warn\t"), Severity::Warn);
        assert_eq!(parse("Off"), Severity::Off);
        assert_eq!(parse(""), Severity::Info);
        assert_eq!(parse("verbose"), Severity::Info);
    }

    #[test]
    fn test_try_from_rank() {
        assert_eq!(Severity::try_from(0), Ok(Severity::Off));
        assert_eq!(Severity::try_from(2), Ok(Severity::Warn));
        assert_eq!(Severity::try_from(5), Ok(Severity::Trace));
        assert_eq!(Severity::try_from(6), Err(6));
        assert_eq!(Severity::try_from(u8::MAX), Err(u8::MAX));
    }

    #[test]
    fn test_format_rank_out_of_range() {
        assert_eq!(format_rank(2), "warn");
        assert_eq!(format_rank(6), "info");
        assert_eq!(format_rank(u8::MAX), "info");
    }

    #[test]
    fn test_valid_tokens_order() {
        assert_eq!(
            valid_tokens(),
            &["off", "error", "warn", "warning", "info", "debug", "trace"]
        );
    }

    #[test]
    fn test_passes_threshold() {
        assert!(Severity::Error.passes(Severity::Info));
        assert!(Severity::Info.passes(Severity::Info));
        assert!(!Severity::Debug.passes(Severity::Info));
        assert!(!Severity::Error.passes(Severity::Off));
        assert!(!Severity::Off.passes(Severity::Trace));
    }

    #[test]
    fn test_serde_uses_tokens() {
        let json = serde_json::to_string(&Severity::Warn).unwrap();
        assert_eq!(json, "\"warn\"");
        let parsed: Severity = serde_json::from_str("\"WARNING\"").unwrap();
        assert_eq!(parsed, Severity::Warn);
        let fallback: Severity = serde_json::from_str("\"bogus\"").unwrap();
        assert_eq!(fallback, Severity::Info);
    }
}
