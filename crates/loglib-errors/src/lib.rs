//! Error facility for loglib
//!
//! Every failure the facade can report is a [`LogError`]. Each variant maps
//! to a [`LogErrorKind`] with a stable error code, so callers can match on
//! the kind without depending on message text.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using LogError
pub type Result<T> = std::result::Result<T, LogError>;

/// Canonical error kind taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogErrorKind {
    /// A sink (file or console) could not be created or opened
    SinkInit,
    /// A configured severity name does not match any known level
    UnrecognizedLevel,
    /// Configuration was rejected before any sink was built
    Config,
}

impl LogErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            LogErrorKind::SinkInit => "ERR_SINK_INIT",
            LogErrorKind::UnrecognizedLevel => "ERR_UNRECOGNIZED_LEVEL",
            LogErrorKind::Config => "ERR_CONFIG",
        }
    }
}

impl std::fmt::Display for LogErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Errors raised by the logging facade
#[derive(Error, Debug)]
pub enum LogError {
    /// The file sink could not be created at `path`
    #[error("Failed to create log sink at {}: {source}", .path.display())]
    SinkInit {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A severity name was not one of DEBUG/TRACE/INFO/WARN/ERROR/CRITICAL/OFF
    #[error("Unrecognized log level: {value:?}")]
    UnrecognizedLevel { value: String },

    /// Invalid facade configuration
    #[error("Invalid logging configuration: {message}")]
    Config { message: String },
}

impl LogError {
    /// Build a sink initialization error
    pub fn sink_init(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LogError::SinkInit {
            path: path.into(),
            source,
        }
    }

    /// Build an unrecognized level error
    pub fn unrecognized_level(value: impl Into<String>) -> Self {
        LogError::UnrecognizedLevel {
            value: value.into(),
        }
    }

    /// Build a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        LogError::Config {
            message: message.into(),
        }
    }

    /// Get the error kind
    pub fn kind(&self) -> LogErrorKind {
        match self {
            LogError::SinkInit { .. } => LogErrorKind::SinkInit,
            LogError::UnrecognizedLevel { .. } => LogErrorKind::UnrecognizedLevel,
            LogError::Config { .. } => LogErrorKind::Config,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }
}
