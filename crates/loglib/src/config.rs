//! Facade configuration
//!
//! Configuration is read once, when a facade is built. The threshold name
//! comes from `LOG_LEVEL`, compiled in via `option_env!` and overridden by
//! the runtime environment variable of the same name.

use crate::pattern::DEFAULT_PATTERN;
use crate::severity::Severity;
use crate::sinks::DEFAULT_LOG_FILE;
use loglib_errors::LogError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_LOG_PATTERN: &str = "LOG_PATTERN";
pub const ENV_LOG_FILE: &str = "LOG_FILE";

const BUILD_LOG_LEVEL: Option<&str> = option_env!("LOG_LEVEL");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Output pattern applied to every sink
    pub pattern: String,
    /// File sink location; `None` disables the file sink
    pub file: Option<PathBuf>,
    /// Threshold name, e.g. `"WARN"`; `None` means TRACE
    pub level: Option<String>,
    /// Whether records are also written to stdout
    pub console: bool,
    /// Whether console records carry ANSI colors
    pub color: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            level: None,
            console: true,
            color: true,
        }
    }
}

impl LogConfig {
    /// Defaults overlaid with the build-time and runtime environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        config.level = lookup(ENV_LOG_LEVEL).or_else(|| BUILD_LOG_LEVEL.map(str::to_string));
        if let Some(pattern) = lookup(ENV_LOG_PATTERN) {
            config.pattern = pattern;
        }
        if let Some(file) = lookup(ENV_LOG_FILE) {
            config.file = Some(PathBuf::from(file));
        }
        config
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    pub fn with_file(mut self, file: Option<PathBuf>) -> Self {
        self.file = file;
        self
    }

    pub fn with_level(mut self, level: Severity) -> Self {
        self.level = Some(level.as_str().to_string());
        self
    }

    pub fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Initial threshold
    ///
    /// Unrecognized names resolve to INFO; the parse error is returned so the
    /// facade can report it once.
    pub fn threshold(&self) -> (Severity, Option<LogError>) {
        match self.level.as_deref() {
            Some(name) => Severity::from_config_name(name),
            None => (Severity::Trace, None),
        }
    }

    /// Reject configurations no facade can be built from
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Config`] for an empty pattern.
    pub fn validate(&self) -> Result<(), LogError> {
        if self.pattern.is_empty() {
            return Err(LogError::config("pattern must not be empty"));
        }
        Ok(())
    }
}
