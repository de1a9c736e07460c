//! Stream-style record accumulation

use crate::facade::LogFacade;
use crate::severity::Severity;
use std::fmt::{self, Write as _};

/// Builds one record from chained fragments and emits it when dropped
///
/// The severity is fixed at construction and stays local to the stream, so
/// streams on different threads never affect each other's level. Nothing
/// is emitted if no fragment was appended.
#[must_use = "the record is emitted when the stream is dropped"]
#[derive(Debug)]
pub struct LogStream<'a> {
    facade: &'a LogFacade,
    level: Severity,
    buffer: String,
}

impl<'a> LogStream<'a> {
    pub fn new(facade: &'a LogFacade, level: Severity) -> Self {
        Self {
            facade,
            level,
            buffer: String::new(),
        }
    }

    pub fn level(&self) -> Severity {
        self.level
    }

    /// Append the `Display` form of `value`
    pub fn append(&mut self, value: impl fmt::Display) -> &mut Self {
        let _ = write!(self.buffer, "{}", value);
        self
    }

    /// Text accumulated so far
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl fmt::Write for LogStream<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buffer.push_str(s);
        Ok(())
    }
}

impl Drop for LogStream<'_> {
    fn drop(&mut self) {
        if !self.buffer.is_empty() {
            self.facade.log(self.level, &self.buffer);
            self.buffer.clear();
        }
    }
}
