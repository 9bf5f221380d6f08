//! Console logging: `<timestamp> [<LEVEL>] <message>` on stdout.
//!
//! Events go through `tracing`; [`LineFormat`] renders them in the fixed
//! line format and [`init`] installs it as the global subscriber.

use std::fmt;
use std::str::FromStr;

use chrono::Local;
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

use crate::error::ValidationError;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Crates whose events honour the configured threshold. Everything else is
/// capped at WARNING so HTTP internals stay quiet.
const OWN_TARGETS: &[&str] = &["radio_core", "gemini_client", "radio_bot"];

/// The four accepted severities, least severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ValidationError;

    /// Exact, case-sensitive match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARNING" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(ValidationError::InvalidLevel(s.to_string())),
        }
    }
}

impl From<&Level> for LogLevel {
    fn from(level: &Level) -> Self {
        match *level {
            Level::ERROR => LogLevel::Error,
            Level::WARN => LogLevel::Warning,
            Level::INFO => LogLevel::Info,
            Level::DEBUG | Level::TRACE => LogLevel::Debug,
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warning => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

/// Emit `message` at a known level.
pub fn emit(level: LogLevel, message: &str) {
    match level {
        LogLevel::Debug => tracing::debug!("{message}"),
        LogLevel::Info => tracing::info!("{message}"),
        LogLevel::Warning => tracing::warn!("{message}"),
        LogLevel::Error => tracing::error!("{message}"),
    }
}

/// Emit `message` at a level given by name. Unknown names are rejected and
/// nothing is written.
pub fn log(level: &str, message: &str) -> Result<(), ValidationError> {
    emit(level.parse()?, message);
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatter / subscriber
// ---------------------------------------------------------------------------

/// One line per event: local timestamp, bracketed level, message fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let level = LogLevel::from(event.metadata().level());
        write!(writer, "{} [{level}] ", Local::now().format(TIMESTAMP_FORMAT))?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn default_filter(threshold: LogLevel) -> EnvFilter {
    let own = LevelFilter::from(threshold);
    let others = std::cmp::min(own, LevelFilter::WARN);
    let directives: Vec<String> = std::iter::once(others.to_string())
        .chain(OWN_TARGETS.iter().map(|t| format!("{t}={own}")))
        .collect();
    EnvFilter::new(directives.join(","))
}

/// Install the stdout line logger as the global subscriber.
///
/// The threshold is the only control; `RUST_LOG` is not consulted, so ERROR
/// lines from this program cannot be filtered away.
pub fn init(threshold: LogLevel) {
    tracing_subscriber::fmt()
        .event_format(LineFormat)
        .with_env_filter(default_filter(threshold))
        .with_writer(std::io::stdout)
        .init();
}
