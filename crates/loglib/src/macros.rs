//! Logging macros
//!
//! The level macros take `format!`-style arguments and write through the
//! process-wide facade. Prefix the arguments with `facade: <expr>,` to write
//! through an explicit facade instead.
//!
//! ```
//! # use loglib::{warn_log, LogFacade};
//! let facade = LogFacade::builder().no_file().console(false).build().unwrap();
//! warn_log!(facade: &facade, "disk at {}%", 91);
//! ```

/// Log at an explicit severity
#[macro_export]
macro_rules! log_msg {
    (facade: $facade:expr, $level:expr, $($arg:tt)+) => {
        ($facade).log_fmt($level, format_args!($($arg)+))
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::global().log_fmt($level, format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! debug_log {
    (facade: $facade:expr, $($arg:tt)+) => {
        $crate::log_msg!(facade: $facade, $crate::Severity::Debug, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_msg!($crate::Severity::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! trace_log {
    (facade: $facade:expr, $($arg:tt)+) => {
        $crate::log_msg!(facade: $facade, $crate::Severity::Trace, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_msg!($crate::Severity::Trace, $($arg)+)
    };
}

#[macro_export]
macro_rules! info_log {
    (facade: $facade:expr, $($arg:tt)+) => {
        $crate::log_msg!(facade: $facade, $crate::Severity::Info, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_msg!($crate::Severity::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn_log {
    (facade: $facade:expr, $($arg:tt)+) => {
        $crate::log_msg!(facade: $facade, $crate::Severity::Warn, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_msg!($crate::Severity::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! error_log {
    (facade: $facade:expr, $($arg:tt)+) => {
        $crate::log_msg!(facade: $facade, $crate::Severity::Error, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_msg!($crate::Severity::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! critical_log {
    (facade: $facade:expr, $($arg:tt)+) => {
        $crate::log_msg!(facade: $facade, $crate::Severity::Critical, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_msg!($crate::Severity::Critical, $($arg)+)
    };
}

/// Path of the enclosing function, e.g. `my_crate::net::connect`
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __loglib_probe() {}
        $crate::tracer::enclosing_function($crate::tracer::type_name_of(__loglib_probe))
    }};
}

/// Trace entry to and exit from the enclosing scope
///
/// Expands to a `let` binding, so the exit record is emitted when the
/// caller's block ends. Records carry the bare function name (`handshake`,
/// not `crate::net::handshake`); use [`function_name!`](crate::function_name) with
/// [`LogFacade::trace_scope`](crate::LogFacade::trace_scope) for the full path.
///
/// ```
/// # use loglib::{trace_function, LogFacade};
/// # let facade = LogFacade::builder().no_file().console(false).build().unwrap();
/// fn handshake(facade: &LogFacade) {
///     trace_function!(facade);
///     // ...
/// }
/// # handshake(&facade);
/// ```
#[macro_export]
macro_rules! trace_function {
    () => {
        let _loglib_scope = $crate::global().trace_scope(
            $crate::tracer::short_function_name($crate::function_name!()),
            $crate::tracer::extract_file_name(file!()),
            line!(),
        );
    };
    ($facade:expr) => {
        let _loglib_scope = ($facade).trace_scope(
            $crate::tracer::short_function_name($crate::function_name!()),
            $crate::tracer::extract_file_name(file!()),
            line!(),
        );
    };
}

/// Start a [`LogStream`](crate::LogStream) at the given severity
#[macro_export]
macro_rules! log_stream {
    ($level:expr) => {
        $crate::global().stream($level)
    };
    ($level:expr, $facade:expr) => {
        ($facade).stream($level)
    };
}

#[macro_export]
macro_rules! d_log_st {
    ($($facade:expr)?) => {
        $crate::log_stream!($crate::Severity::Debug $(, $facade)?)
    };
}

#[macro_export]
macro_rules! t_log_st {
    ($($facade:expr)?) => {
        $crate::log_stream!($crate::Severity::Trace $(, $facade)?)
    };
}

#[macro_export]
macro_rules! i_log_st {
    ($($facade:expr)?) => {
        $crate::log_stream!($crate::Severity::Info $(, $facade)?)
    };
}

#[macro_export]
macro_rules! w_log_st {
    ($($facade:expr)?) => {
        $crate::log_stream!($crate::Severity::Warn $(, $facade)?)
    };
}

#[macro_export]
macro_rules! e_log_st {
    ($($facade:expr)?) => {
        $crate::log_stream!($crate::Severity::Error $(, $facade)?)
    };
}

#[macro_export]
macro_rules! c_log_st {
    ($($facade:expr)?) => {
        $crate::log_stream!($crate::Severity::Critical $(, $facade)?)
    };
}
