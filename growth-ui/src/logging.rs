//! Log output for the survey binary.
//!
//! The survey screens own stdout, so console logs always go to stderr. In
//! interactive mode the console sink stays off unless a level is asked for
//! explicitly; a log file can be attached in either mode.

use std::{
    fs::File,
    io::{self, IsTerminal},
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

const DEFAULT_LEVEL: &str = "info";

/// Where console log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleTarget {
    Stderr,
    Off,
}

impl ConsoleTarget {
    /// Picks the console sink for a run.
    ///
    /// `quiet` always wins. An interactive survey keeps the console quiet
    /// unless `explicit_level` is set, since stderr shares the terminal with
    /// the screens.
    pub fn choose(
        quiet: bool,
        interactive: bool,
        explicit_level: bool,
    ) -> Self {
        if quiet || (interactive && !explicit_level) {
            ConsoleTarget::Off
        } else {
            ConsoleTarget::Stderr
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Filter directive; falls back to `RUST_LOG`, then `info`.
    pub level: Option<String>,
    pub console: ConsoleTarget,
    /// Appended to, never truncated. The directory must already exist.
    pub file: Option<PathBuf>,
}

// --- Formatter ---

/// `12:04:05.123  WARN growth_ui::utils message key=value`
struct SurveyFmt;

fn level_color(level: Level) -> &'static str {
    match level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

impl<S, N> FormatEvent<S, N> for SurveyFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let time = Local::now().format("%H:%M:%S%.3f");

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "\x1b[2m{time}\x1b[0m {}{:>5}\x1b[0m \x1b[36m{}\x1b[0m ",
                level_color(*meta.level()),
                meta.level(),
                meta.target()
            )?;
        } else {
            write!(writer, "{time} {:>5} {} ", meta.level(), meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Setup ---

fn build_filter(level: Option<&str>) -> Result<EnvFilter> {
    match level {
        Some(level) => {
            EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'"))
        }
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))),
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))
}

/// Installs the global subscriber. Call once at startup.
///
/// # Errors
///
/// Fails on an unparseable level, an unopenable log file, or when a global
/// subscriber is already installed.
pub fn init(options: &LogOptions) -> Result<()> {
    let filter = build_filter(options.level.as_deref())?;
    let file = options.file.as_deref().map(open_log_file).transpose()?;

    let console_layer = match options.console {
        ConsoleTarget::Stderr => Some(
            tracing_subscriber::fmt::layer()
                .event_format(SurveyFmt)
                .with_ansi(io::stderr().is_terminal())
                .with_writer(io::stderr),
        ),
        ConsoleTarget::Off => None,
    };

    let file_layer = file.map(|file| {
        tracing_subscriber::fmt::layer()
            .event_format(SurveyFmt)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("logging already initialized")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn interactive_console_is_off_by_default() {
        assert_eq!(ConsoleTarget::choose(false, true, false), ConsoleTarget::Off);
    }

    #[test]
    fn interactive_console_follows_explicit_level() {
        assert_eq!(ConsoleTarget::choose(false, true, true), ConsoleTarget::Stderr);
    }

    #[test]
    fn batch_console_logs_to_stderr() {
        assert_eq!(ConsoleTarget::choose(false, false, false), ConsoleTarget::Stderr);
    }

    #[test]
    fn quiet_overrides_everything() {
        assert_eq!(ConsoleTarget::choose(true, false, true), ConsoleTarget::Off);
        assert_eq!(ConsoleTarget::choose(true, true, true), ConsoleTarget::Off);
    }

    #[test]
    fn build_filter_accepts_directives() {
        assert!(build_filter(Some("debug")).is_ok());
        assert!(build_filter(Some("growth_core=trace,warn")).is_ok());
    }

    #[test]
    fn build_filter_rejects_bad_level() {
        let err = build_filter(Some("growth_core=loud")).unwrap_err();

        assert!(err.to_string().contains("invalid log level 'growth_core=loud'"));
    }

    #[test]
    fn open_log_file_reports_missing_directory() {
        let path = Path::new("/nonexistent-dir/growth-survey.log");

        let err = open_log_file(path).unwrap_err();

        assert!(err.to_string().contains("cannot open log file"));
    }
}
