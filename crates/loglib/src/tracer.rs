//! Scoped function tracing

use crate::facade::LogFacade;
use crate::severity::Severity;
use std::borrow::Cow;

/// Emits a TRACE record on construction and another when dropped
///
/// The exit record is tied to `Drop`, so it fires on every way out of the
/// scope: normal return, early return, `?`, and panic unwinding.
#[must_use = "the exit record is emitted when the tracer is dropped"]
#[derive(Debug)]
pub struct ScopedTracer<'a> {
    facade: &'a LogFacade,
    function: Cow<'static, str>,
    file: Cow<'static, str>,
    line: u32,
}

impl<'a> ScopedTracer<'a> {
    pub fn new(
        facade: &'a LogFacade,
        function: impl Into<Cow<'static, str>>,
        file: impl Into<Cow<'static, str>>,
        line: u32,
    ) -> Self {
        let tracer = Self {
            facade,
            function: function.into(),
            file: file.into(),
            line,
        };
        tracer.emit("Entering");
        tracer
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    fn emit(&self, verb: &str) {
        self.facade.log_fmt(
            Severity::Trace,
            format_args!(
                "{} function {} in file {}:{}",
                verb, self.function, self.file, self.line
            ),
        );
    }
}

impl Drop for ScopedTracer<'_> {
    fn drop(&mut self) {
        self.emit("Exiting");
    }
}

/// Strip the directory part of a path, accepting both `/` and `\` separators
pub fn extract_file_name(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Last `::` segment of a function path, `net::conn::handshake` -> `handshake`
pub fn short_function_name(path: &str) -> &str {
    match path.rfind("::") {
        Some(idx) => &path[idx + 2..],
        None => path,
    }
}

#[doc(hidden)]
pub fn type_name_of<T>(_: T) -> &'static str {
    std::any::type_name::<T>()
}

#[doc(hidden)]
pub fn enclosing_function(probe: &'static str) -> &'static str {
    let mut name = probe.strip_suffix("::__loglib_probe").unwrap_or(probe);
    while let Some(stripped) = name.strip_suffix("::{{closure}}") {
        name = stripped;
    }
    name
}
