//! The log facade
//!
//! A [`LogFacade`] owns a `tracing::Dispatch` whose layers are the active
//! sinks, the parsed output pattern, and the severity threshold. Facades can
//! be built explicitly and passed to call sites, or obtained through
//! [`global`], the process-wide instance the macros use.
//!
//! The facade never installs a global `tracing` subscriber: every record is
//! dispatched with `tracing::dispatcher::with_default`, so several facades
//! can coexist in one process.

use crate::config::LogConfig;
use crate::pattern::{Pattern, PatternFormatter};
use crate::severity::Severity;
use crate::sinks::{self, BoxedLayer, FileSink};
use crate::stream::LogStream;
use crate::tracer::ScopedTracer;
use loglib_errors::{LogError, Result};
use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};
use tracing::Dispatch;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

const DEFAULT_NAME: &str = "loglib";

/// Level-gated fan-out to a set of sinks
#[derive(Debug)]
pub struct LogFacade {
    name: String,
    pattern: Pattern,
    dispatch: Dispatch,
    threshold: AtomicU8,
    level_lock: Mutex<()>,
    file: Option<FileSink>,
}

impl LogFacade {
    pub fn builder() -> LogFacadeBuilder {
        LogFacadeBuilder::default()
    }

    /// Build a facade from `config`
    ///
    /// An unrecognized threshold name resolves to INFO and is reported as a
    /// single WARN record once the sinks are up.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Config`] for an invalid configuration and
    /// [`LogError::SinkInit`] if the file sink cannot be created.
    pub fn from_config(config: LogConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Location of the file sink, if one is active
    pub fn file_path(&self) -> Option<&Path> {
        self.file.as_ref().map(FileSink::path)
    }

    /// Current threshold
    pub fn level(&self) -> Severity {
        Severity::from_u8(self.threshold.load(Ordering::Acquire))
    }

    /// Replace the threshold for every subsequent record
    pub fn set_level(&self, level: Severity) {
        let _guard = self.lock_level();
        self.threshold.store(level.as_u8(), Ordering::Release);
    }

    /// Whether a record at `level` would be emitted right now
    pub fn enabled(&self, level: Severity) -> bool {
        level != Severity::Off && level >= self.level()
    }

    /// Emit `message` at `level` to every sink if it passes the threshold
    pub fn log(&self, level: Severity, message: &str) {
        if self.enabled(level) {
            self.dispatch_record(level, message);
        }
    }

    /// [`log`](Self::log) for preformatted arguments; formats only when enabled
    pub fn log_fmt(&self, level: Severity, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        match args.as_str() {
            Some(message) => self.dispatch_record(level, message),
            None => self.dispatch_record(level, &args.to_string()),
        }
    }

    /// Run `f` with the threshold temporarily set to `level`
    ///
    /// The level lock is held for the whole call, so no other thread can
    /// change the threshold in between. The threshold is shared: while `f`
    /// runs, `log` calls from every thread are gated by `level`, so
    /// `with_level(Severity::Off, ..)` silences the whole facade. The
    /// previous threshold is restored afterwards, also when `f` panics. `f`
    /// must not call [`set_level`](Self::set_level) or `with_level` on the
    /// same facade.
    pub fn with_level<R>(&self, level: Severity, f: impl FnOnce(&Self) -> R) -> R {
        let _guard = self.lock_level();
        let previous = self.threshold.swap(level.as_u8(), Ordering::AcqRel);
        let _restore = RestoreLevel {
            threshold: &self.threshold,
            previous,
        };
        f(self)
    }

    /// Start an accumulating record at `level`
    pub fn stream(&self, level: Severity) -> LogStream<'_> {
        LogStream::new(self, level)
    }

    /// Emit paired TRACE entry/exit records around the caller's scope
    pub fn trace_scope(
        &self,
        function: impl Into<Cow<'static, str>>,
        file: impl Into<Cow<'static, str>>,
        line: u32,
    ) -> ScopedTracer<'_> {
        ScopedTracer::new(self, function, file, line)
    }

    /// Flush the file sink
    ///
    /// # Errors
    ///
    /// Returns [`LogError::SinkInit`] if the file can no longer be written.
    pub fn flush(&self) -> Result<()> {
        match &self.file {
            Some(file) => file.flush().map_err(|e| LogError::sink_init(file.path(), e)),
            None => Ok(()),
        }
    }

    fn lock_level(&self) -> std::sync::MutexGuard<'_, ()> {
        self.level_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// `tracing` has no critical level, so CRITICAL travels as an ERROR event
    /// and the exact severity rides in the `severity` field
    fn dispatch_record(&self, level: Severity, message: &str) {
        let severity = level.as_str();
        let ts_millis = chrono::Local::now().timestamp_millis();
        tracing::dispatcher::with_default(&self.dispatch, || match level {
            Severity::Trace => tracing::trace!(severity, ts_millis, "{}", message),
            Severity::Debug => tracing::debug!(severity, ts_millis, "{}", message),
            Severity::Info => tracing::info!(severity, ts_millis, "{}", message),
            Severity::Warn => tracing::warn!(severity, ts_millis, "{}", message),
            Severity::Error | Severity::Critical => {
                tracing::error!(severity, ts_millis, "{}", message)
            }
            Severity::Off => {}
        });
    }
}

struct RestoreLevel<'a> {
    threshold: &'a AtomicU8,
    previous: u8,
}

impl Drop for RestoreLevel<'_> {
    fn drop(&mut self) {
        self.threshold.store(self.previous, Ordering::Release);
    }
}

/// Explicit facade construction
pub struct LogFacadeBuilder {
    name: String,
    config: LogConfig,
    extra: Vec<(BoxMakeWriter, bool)>,
}

impl Default for LogFacadeBuilder {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            config: LogConfig::default(),
            extra: Vec::new(),
        }
    }
}

impl LogFacadeBuilder {
    /// Replace every setting with `config`
    pub fn config(mut self, config: LogConfig) -> Self {
        self.config = config;
        self
    }

    /// Logger name rendered by `%n`
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.pattern = pattern.into();
        self
    }

    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.file = Some(path.into());
        self
    }

    pub fn no_file(mut self) -> Self {
        self.config.file = None;
        self
    }

    pub fn console(mut self, enabled: bool) -> Self {
        self.config.console = enabled;
        self
    }

    pub fn color(mut self, enabled: bool) -> Self {
        self.config.color = enabled;
        self
    }

    pub fn level(mut self, level: Severity) -> Self {
        self.config = self.config.with_level(level);
        self
    }

    /// Add a sink writing uncolored records to `writer`
    pub fn sink<W>(mut self, writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        self.extra.push((BoxMakeWriter::new(writer), false));
        self
    }

    /// # Errors
    ///
    /// Returns [`LogError::Config`] for an invalid configuration and
    /// [`LogError::SinkInit`] if the file sink cannot be created.
    pub fn build(self) -> Result<LogFacade> {
        self.config.validate()?;

        let file = match &self.config.file {
            Some(path) => Some(FileSink::create(path)?),
            None => None,
        };

        Ok(self.assemble(file))
    }

    fn assemble(self, file: Option<FileSink>) -> LogFacade {
        let pattern = Pattern::parse(&self.config.pattern);
        let formatter = PatternFormatter::new(pattern.clone(), self.name.clone());

        let mut layers: Vec<BoxedLayer> = Vec::new();
        if let Some(file) = &file {
            layers.push(sinks::file_layer(file.clone(), formatter.clone()));
        }
        if self.config.console {
            layers.push(sinks::console_layer(formatter.clone(), self.config.color));
        }
        for (writer, ansi) in self.extra {
            layers.push(sinks::writer_layer(writer, formatter.clone(), ansi));
        }

        let (threshold, level_err) = self.config.threshold();
        let facade = LogFacade {
            name: self.name,
            pattern,
            dispatch: Dispatch::new(Registry::default().with(layers)),
            threshold: AtomicU8::new(threshold.as_u8()),
            level_lock: Mutex::new(()),
            file,
        };

        if let Some(err) = level_err {
            facade.log(Severity::Warn, &format!("{err}, using INFO"));
        }
        facade
    }
}

static GLOBAL: OnceLock<LogFacade> = OnceLock::new();
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Set up the process-wide facade from the environment
///
/// Only the first successful call builds the facade; later calls return the
/// same instance and ignore `pattern`. Concurrent first calls block until
/// the winning thread has finished setup.
///
/// # Errors
///
/// Returns [`LogError::SinkInit`] if the file sink cannot be created. No
/// facade is installed in that case and a later call may retry.
pub fn initialize(pattern: Option<&str>) -> Result<&'static LogFacade> {
    let mut config = LogConfig::from_env();
    if let Some(pattern) = pattern {
        config.pattern = pattern.to_string();
    }
    initialize_with(config)
}

/// [`initialize`] with an explicit configuration
///
/// # Errors
///
/// Same as [`initialize`], plus [`LogError::Config`] for an invalid
/// configuration.
pub fn initialize_with(config: LogConfig) -> Result<&'static LogFacade> {
    if let Some(facade) = GLOBAL.get() {
        return Ok(facade);
    }

    let _guard = INIT_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(facade) = GLOBAL.get() {
        return Ok(facade);
    }

    let facade = LogFacade::from_config(config)?;
    Ok(GLOBAL.get_or_init(|| facade))
}

/// The process-wide facade, initialized on first use
///
/// If the file sink cannot be created the facade runs console-only and
/// reports the failure as one ERROR record.
pub fn global() -> &'static LogFacade {
    if let Some(facade) = GLOBAL.get() {
        return facade;
    }

    let config = LogConfig::from_env();
    let err = match initialize_with(config.clone()) {
        Ok(facade) => return facade,
        Err(err) => err,
    };

    let _guard = INIT_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(facade) = GLOBAL.get() {
        return facade;
    }

    let mut fallback = config.with_file(None);
    if fallback.validate().is_err() {
        fallback = LogConfig::default().with_file(None);
    }
    let facade = GLOBAL.get_or_init(|| LogFacade::builder().config(fallback).assemble(None));
    facade.log(
        Severity::Error,
        &format!("{err}, logging to console only"),
    );
    facade
}

/// Whether the process-wide facade has been set up
pub fn is_initialized() -> bool {
    GLOBAL.get().is_some()
}
