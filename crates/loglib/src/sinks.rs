//! Sink construction
//!
//! Each sink is a `tracing-subscriber` fmt layer formatted by a
//! [`PatternFormatter`]. Writers serialize concurrent records themselves:
//! the file sink holds its handle behind a mutex, stdout takes its own lock,
//! and every record is written in a single call.

use crate::pattern::PatternFormatter;
use loglib_errors::{LogError, Result};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{Layer, Registry};

/// Default file sink location, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "logfile.log";

pub(crate) type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Truncate-on-open log file shared by every thread
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
    file: Arc<Mutex<File>>,
}

impl FileSink {
    /// Create (or truncate) the file at `path`, creating missing parent directories
    ///
    /// # Errors
    ///
    /// Returns [`LogError::SinkInit`] if the directory or file cannot be created.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| LogError::sink_init(path, e))?;
        }
        let file = File::create(path).map_err(|e| LogError::sink_init(path, e))?;

        Ok(Self {
            path: path.to_path_buf(),
            file: Arc::new(Mutex::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Push buffered data down to the file system
    pub fn flush(&self) -> io::Result<()> {
        let mut file = self.lock();
        file.flush()?;
        file.sync_data()
    }

    fn lock(&self) -> MutexGuard<'_, File> {
        self.file.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Exclusive handle on the file for the duration of one record
pub struct FileSinkWriter<'a> {
    file: MutexGuard<'a, File>,
}

impl Write for FileSinkWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl<'a> MakeWriter<'a> for FileSink {
    type Writer = FileSinkWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        FileSinkWriter { file: self.lock() }
    }
}

/// Layer writing plain (never colored) records to `sink`
pub(crate) fn file_layer(sink: FileSink, formatter: PatternFormatter) -> BoxedLayer {
    writer_layer(sink, formatter, false)
}

/// Layer writing records to stdout, colored when `color` is set
pub(crate) fn console_layer(formatter: PatternFormatter, color: bool) -> BoxedLayer {
    writer_layer(io::stdout, formatter, color)
}

/// Layer writing records to any `MakeWriter`
pub(crate) fn writer_layer<W>(writer: W, formatter: PatternFormatter, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .event_format(formatter)
        .with_ansi(ansi)
        .with_writer(writer)
        .boxed()
}
