//! Output patterns
//!
//! Patterns use spdlog-style flags so existing format strings keep working:
//!
//! | flag | renders                                  |
//! |------|------------------------------------------|
//! | `%L` | short level letter (`T`, `D`, `I`, ...)  |
//! | `%l` | level name (`trace`, `warning`, ...)     |
//! | `%H` `%M` `%S` | hours, minutes, seconds        |
//! | `%e` | milliseconds, zero padded to 3 digits    |
//! | `%Y` `%m` `%d` | year, month, day               |
//! | `%t` | thread id                                |
//! | `%v` | message body                             |
//! | `%n` | logger name                              |
//! | `%^` `%$` | start / end of the colored range    |
//! | `%%` | a literal `%`                            |
//!
//! Any other flag is written out unchanged.

use crate::severity::Severity;
use chrono::{DateTime, Local, TimeZone, Timelike};
use std::fmt::{self, Write as _};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Pattern applied when the caller supplies none
pub const DEFAULT_PATTERN: &str = "[%^%L%$][%H:%M:%S.%e] [Thread: %t] %v";

const ANSI_RESET: &str = "\x1b[m";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    LevelShort,
    LevelLong,
    Hour,
    Minute,
    Second,
    Millis,
    Year,
    Month,
    Day,
    ThreadId,
    Message,
    Name,
    ColorStart,
    ColorEnd,
}

/// A parsed output pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    tokens: Vec<Token>,
}

impl Pattern {
    /// Parse a pattern string. Parsing never fails; unknown flags are kept as text.
    pub fn parse(source: &str) -> Self {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars();

        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }

            let token = match chars.next() {
                Some('L') => Token::LevelShort,
                Some('l') => Token::LevelLong,
                Some('H') => Token::Hour,
                Some('M') => Token::Minute,
                Some('S') => Token::Second,
                Some('e') => Token::Millis,
                Some('Y') => Token::Year,
                Some('m') => Token::Month,
                Some('d') => Token::Day,
                Some('t') => Token::ThreadId,
                Some('v') => Token::Message,
                Some('n') => Token::Name,
                Some('^') => Token::ColorStart,
                Some('$') => Token::ColorEnd,
                Some('%') => {
                    literal.push('%');
                    continue;
                }
                Some(other) => {
                    literal.push('%');
                    literal.push(other);
                    continue;
                }
                None => {
                    literal.push('%');
                    continue;
                }
            };

            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
            tokens.push(token);
        }

        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        Self {
            source: source.to_string(),
            tokens,
        }
    }

    /// The pattern string this was parsed from
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Render one record
    ///
    /// Color ranges only produce escape codes when `ansi` is set.
    pub fn render(
        &self,
        out: &mut impl fmt::Write,
        record: &Record<'_>,
        ansi: bool,
    ) -> fmt::Result {
        let mut color_open = false;

        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.write_str(text)?,
                Token::LevelShort => out.write_str(record.severity.short_name())?,
                Token::LevelLong => out.write_str(record.severity.long_name())?,
                Token::Hour => write!(out, "{:02}", record.time.hour())?,
                Token::Minute => write!(out, "{:02}", record.time.minute())?,
                Token::Second => write!(out, "{:02}", record.time.second())?,
                Token::Millis => {
                    write!(out, "{:03}", record.time.timestamp_subsec_millis() % 1000)?
                }
                Token::Year => write!(out, "{}", record.time.format("%Y"))?,
                Token::Month => write!(out, "{}", record.time.format("%m"))?,
                Token::Day => write!(out, "{}", record.time.format("%d"))?,
                Token::ThreadId => out.write_str(&record.thread_id)?,
                Token::Message => out.write_str(record.message)?,
                Token::Name => out.write_str(record.name)?,
                Token::ColorStart => {
                    if ansi {
                        out.write_str(record.severity.ansi_color())?;
                        color_open = true;
                    }
                }
                Token::ColorEnd => {
                    if color_open {
                        out.write_str(ANSI_RESET)?;
                        color_open = false;
                    }
                }
            }
        }

        if color_open {
            out.write_str(ANSI_RESET)?;
        }
        Ok(())
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Pattern::parse(DEFAULT_PATTERN)
    }
}

/// Everything a pattern can refer to
#[derive(Debug, Clone)]
pub struct Record<'a> {
    pub severity: Severity,
    pub time: DateTime<Local>,
    pub thread_id: String,
    pub message: &'a str,
    pub name: &'a str,
}

/// Numeric id of the calling thread
///
/// std only exposes `ThreadId` through `Debug` (`ThreadId(7)`), so the
/// number is taken from there.
pub fn current_thread_id() -> String {
    let id = format!("{:?}", std::thread::current().id());
    id.strip_prefix("ThreadId(")
        .and_then(|rest| rest.strip_suffix(')'))
        .map(str::to_string)
        .unwrap_or(id)
}

/// Field carrying the record time, in milliseconds since the Unix epoch
///
/// The facade stamps each record once so every sink renders the same time.
pub const TIMESTAMP_FIELD: &str = "ts_millis";

/// Collects the `message`, `severity` and timestamp fields of a facade event
#[derive(Default)]
struct RecordVisitor {
    message: String,
    severity: Option<Severity>,
    ts_millis: Option<i64>,
}

impl Visit for RecordVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message.push_str(value),
            "severity" => self.severity = value.parse().ok(),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        if field.name() == TIMESTAMP_FIELD {
            self.ts_millis = Some(value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        }
    }
}

/// `tracing-subscriber` event formatter driven by a [`Pattern`]
#[derive(Debug, Clone)]
pub struct PatternFormatter {
    pattern: Pattern,
    name: String,
}

impl PatternFormatter {
    pub fn new(pattern: Pattern, name: impl Into<String>) -> Self {
        Self {
            pattern,
            name: name.into(),
        }
    }
}

impl<S, N> FormatEvent<S, N> for PatternFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut visitor = RecordVisitor::default();
        event.record(&mut visitor);

        let record = Record {
            severity: visitor
                .severity
                .unwrap_or_else(|| Severity::from(*event.metadata().level())),
            time: visitor
                .ts_millis
                .and_then(|ms| Local.timestamp_millis_opt(ms).single())
                .unwrap_or_else(Local::now),
            thread_id: current_thread_id(),
            message: &visitor.message,
            name: &self.name,
        };

        let ansi = writer.has_ansi_escapes();
        self.pattern.render(&mut writer, &record, ansi)?;
        writeln!(writer)
    }
}
