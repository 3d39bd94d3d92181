//! Logging for the quiz binary
//!
//! Events go to stderr and, when configured, to a rolling file. While the
//! interactive quiz owns the terminal the console is capped at warnings so
//! log lines do not land between prompts; the file still gets everything.

use std::fs;
use std::path::Path;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::config::LoggingSettings;
use crate::error::{Error, Result};

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync>;

/// Keeps the file writer alive so buffered lines are flushed on exit
pub struct LogGuards {
    _file_guard: Option<WorkerGuard>,
}

/// Levels for each output, resolved from settings and flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LevelPlan {
    console: Level,
    file: Level,
}

impl LevelPlan {
    fn resolve(settings: &LoggingSettings, verbose: u8, quiet: bool, interactive: bool) -> Self {
        let requested = determine_level(settings, verbose, quiet);
        // -v opts back into console logging during the quiz
        let console = if interactive && verbose == 0 {
            requested.min(Level::WARN)
        } else {
            requested
        };
        Self {
            console,
            file: requested,
        }
    }

    /// Most verbose level any output accepts
    fn widest(&self) -> Level {
        self.console.max(self.file)
    }
}

/// Initialize logging for a command
///
/// `interactive` is set for the quiz itself, where the terminal is shared
/// with prompts.
pub fn init_logging(
    settings: &LoggingSettings,
    verbose: u8,
    quiet: bool,
    interactive: bool,
) -> Result<LogGuards> {
    let plan = LevelPlan::resolve(settings, verbose, quiet, interactive);
    let env_filter = build_env_filter(&settings.level, plan.widest())?;

    let console_layer = console_layer(settings.json_format)
        .with_filter(LevelFilter::from_level(plan.console));

    let (file_layer, file_guard) = match settings.file.as_deref() {
        Some(log_file) => {
            let (layer, guard) = file_layer(
                log_file,
                settings.max_file_size_mb,
                settings.max_files,
                settings.json_format,
            )?;
            (
                Some(layer.with_filter(LevelFilter::from_level(plan.file))),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::debug!(
        console = %plan.console,
        file_level = %plan.file,
        file = ?settings.file,
        interactive,
        "Logging initialized"
    );

    Ok(LogGuards {
        _file_guard: file_guard,
    })
}

/// Level from the config file, raised by `-v` or lowered by `--quiet`
fn determine_level(settings: &LoggingSettings, verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => parse_level(&settings.level),
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Global filter: RUST_LOG if set, the resolved level for this crate, and
/// the HTTP stack held at warn
fn build_env_filter(default_level: &str, level: Level) -> Result<EnvFilter> {
    let crate_directive: Directive = format!("persona_quiz={}", level)
        .parse()
        .or_else(|_| format!("persona_quiz={}", default_level).parse())
        .map_err(|e| Error::Config(format!("Invalid log directive: {}", e)))?;

    let mut filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()))
        .add_directive(crate_directive);

    for noisy in ["hyper=warn", "reqwest=warn", "rustls=warn"] {
        let directive: Directive = noisy
            .parse()
            .map_err(|e| Error::Config(format!("Invalid log directive '{}': {}", noisy, e)))?;
        filter = filter.add_directive(directive);
    }

    Ok(filter)
}

fn console_layer<S>(json_format: bool) -> BoxedLayer<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    if json_format {
        Box::new(
            fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_current_span(true)
                .with_span_events(FmtSpan::CLOSE),
        )
    } else {
        Box::new(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(true)
                .compact(),
        )
    }
}

/// Rolling file layer. Quiz sessions are logged with their close timing so
/// slow submissions show up in the file.
fn file_layer<S>(
    log_file: &str,
    max_size_mb: u64,
    max_files: u32,
    json_format: bool,
) -> Result<(BoxedLayer<S>, WorkerGuard)>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let path = Path::new(log_file);
    let directory = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    fs::create_dir_all(directory).map_err(|e| {
        Error::Config(format!(
            "Failed to create log directory '{}': {}",
            directory.display(),
            e
        ))
    })?;

    let (prefix, suffix) = rolling_names(path);

    let file_appender = RollingFileAppender::builder()
        .rotation(rotation_for(max_size_mb))
        .filename_prefix(prefix)
        .filename_suffix(suffix)
        .max_log_files(max_files.max(1) as usize)
        .build(directory)
        .map_err(|e| Error::Config(format!("Failed to create log file appender: {}", e)))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let layer: BoxedLayer<S> = if json_format {
        Box::new(
            fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_target(true)
                .with_current_span(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_ansi(false),
        )
    } else {
        Box::new(
            fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_ansi(false),
        )
    };

    Ok((layer, guard))
}

/// `quiz.log` rolls as `quiz.<date>.log`
fn rolling_names(path: &Path) -> (String, String) {
    let prefix = path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("persona-quiz");
    let suffix = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("log");
    (prefix.to_string(), suffix.to_string())
}

/// tracing-appender only rotates on time; a small size cap rolls hourly
fn rotation_for(max_size_mb: u64) -> Rotation {
    if max_size_mb > 0 && max_size_mb < 10 {
        Rotation::HOURLY
    } else {
        Rotation::DAILY
    }
}

/// Stderr-only logging for commands that run before config is loaded
pub fn init_simple(level: Level) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}
