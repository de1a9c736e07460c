//! Severity levels and their mapping onto `tracing`

use loglib_errors::LogError;
use std::str::FromStr;

/// Ordered log severity
///
/// Ordering follows verbosity: `Trace` is the most verbose level and `Off`
/// suppresses everything. A record is emitted when its severity is greater
/// than or equal to the facade threshold, except `Off` which never emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Severity {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Critical = 5,
    Off = 6,
}

impl Severity {
    /// All levels from most to least verbose
    pub const ALL: [Severity; 7] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Critical,
        Severity::Off,
    ];

    /// Configuration name, e.g. `"WARN"`
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
            Severity::Off => "OFF",
        }
    }

    /// Single-letter token rendered by `%L`
    pub fn short_name(&self) -> &'static str {
        match self {
            Severity::Trace => "T",
            Severity::Debug => "D",
            Severity::Info => "I",
            Severity::Warn => "W",
            Severity::Error => "E",
            Severity::Critical => "C",
            Severity::Off => "O",
        }
    }

    /// Lowercase name rendered by `%l`
    pub fn long_name(&self) -> &'static str {
        match self {
            Severity::Trace => "trace",
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
            Severity::Off => "off",
        }
    }

    /// ANSI color used inside a `%^ ... %$` range on the console sink
    pub(crate) fn ansi_color(&self) -> &'static str {
        match self {
            Severity::Trace => "\x1b[37m",
            Severity::Debug => "\x1b[36m",
            Severity::Info => "\x1b[32m",
            Severity::Warn => "\x1b[33m\x1b[1m",
            Severity::Error => "\x1b[31m\x1b[1m",
            Severity::Critical => "\x1b[1m\x1b[41m",
            Severity::Off => "",
        }
    }

    /// Parse a configuration name, falling back to `Info` when it is unknown
    ///
    /// Returns the parse error alongside the fallback so the caller can
    /// report it once.
    pub fn from_config_name(name: &str) -> (Severity, Option<LogError>) {
        match name.parse() {
            Ok(level) => (level, None),
            Err(err) => (Severity::Info, Some(err)),
        }
    }

    pub(crate) fn as_u8(self) -> u8 {
        self as u8
    }

    pub(crate) fn from_u8(value: u8) -> Severity {
        match value {
            0 => Severity::Trace,
            1 => Severity::Debug,
            2 => Severity::Info,
            3 => Severity::Warn,
            4 => Severity::Error,
            5 => Severity::Critical,
            _ => Severity::Off,
        }
    }
}

impl FromStr for Severity {
    type Err = LogError;

    /// Case-sensitive: only the uppercase names are accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| LogError::unrecognized_level(s))
    }
}

impl From<tracing::Level> for Severity {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => Severity::Trace,
            tracing::Level::DEBUG => Severity::Debug,
            tracing::Level::INFO => Severity::Info,
            tracing::Level::WARN => Severity::Warn,
            _ => Severity::Error,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
