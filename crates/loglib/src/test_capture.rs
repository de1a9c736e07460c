//! In-memory sink for deterministic logging assertions
//!
//! A [`CaptureSink`] is handed to [`LogFacadeBuilder::sink`] and records
//! every formatted line the facade emits, exactly as it would reach a file.
//!
//! [`LogFacadeBuilder::sink`]: crate::LogFacadeBuilder::sink

use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing_subscriber::fmt::MakeWriter;

/// Cloneable handle on a shared capture buffer
#[derive(Clone, Debug, Default)]
pub struct CaptureSink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Captured records, one per line, without line terminators
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Count records matching a predicate
    pub fn count_lines<F>(&self, predicate: F) -> usize
    where
        F: Fn(&str) -> bool,
    {
        self.lines().iter().filter(|line| predicate(line)).count()
    }

    /// Assert that some record contains `needle`
    ///
    /// # Panics
    ///
    /// Panics if no captured record contains `needle`
    pub fn assert_line_contains(&self, needle: &str) {
        let lines = self.lines();
        assert!(
            lines.iter().any(|line| line.contains(needle)),
            "Expected a record containing {:?} in {} captured records",
            needle,
            lines.len()
        );
    }

    /// Clear all captured records
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Writer holding the capture buffer for one record
pub struct CaptureWriter<'a> {
    buffer: MutexGuard<'a, Vec<u8>>,
}

impl io::Write for CaptureWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CaptureSink {
    type Writer = CaptureWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter {
            buffer: self.lock(),
        }
    }
}
