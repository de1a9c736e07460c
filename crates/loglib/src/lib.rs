//! loglib - process-wide logging facade
//!
//! This crate wraps `tracing` / `tracing-subscriber` behind a small facade:
//! - Lazily initialized default instance via [`global`] / [`initialize`]
//! - Explicit instances via [`LogFacade::builder`]
//! - File + colored console sinks sharing one spdlog-style [`Pattern`]
//! - Level-gated macros (`info_log!`, `warn_log!`, ...)
//! - Scoped entry/exit tracing (`trace_function!`)
//! - Stream-style record building ([`LogStream`], `i_log_st!`, ...)
//! - In-memory capture for tests ([`test_capture::CaptureSink`])
//!
//! # Usage
//!
//! ```rust
//! use loglib::{info_log, LogFacade, Severity};
//!
//! let facade = LogFacade::builder()
//!     .no_file()
//!     .console(false)
//!     .level(Severity::Info)
//!     .build()
//!     .unwrap();
//!
//! facade.log(Severity::Warn, "cache miss");
//! info_log!(facade: &facade, "served {} requests", 12);
//! ```

pub mod config;
pub mod facade;
pub mod macros;
pub mod pattern;
pub mod severity;
pub mod sinks;
pub mod stream;
pub mod test_capture;
pub mod tracer;

pub use config::LogConfig;
pub use facade::{global, initialize, initialize_with, is_initialized, LogFacade, LogFacadeBuilder};
pub use loglib_errors::{LogError, LogErrorKind, Result};
pub use pattern::{Pattern, DEFAULT_PATTERN};
pub use severity::Severity;
pub use sinks::{FileSink, DEFAULT_LOG_FILE};
pub use stream::LogStream;
pub use tracer::{extract_file_name, ScopedTracer};
