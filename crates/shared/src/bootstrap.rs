use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize dotenvy
pub fn init_env() {
    dotenvy::dotenv().ok();
}

/// Logging setup for one service process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Directory holding the rotated log files
    pub log_dir: PathBuf,

    /// Log file name prefix, usually the service name
    pub file_prefix: String,

    /// How many rotated files to keep
    pub max_log_files: usize,

    /// Also write to stdout
    pub stdout: bool,

    /// Filter used when `RUST_LOG` is not set
    pub default_filter: String,
}

impl LoggingConfig {
    /// Defaults for a service: `logs/<service>.<date>.log`, five files, stdout on
    pub fn new(service_name: &str) -> Self {
        let crate_name = service_name.replace('-', "_");

        Self {
            log_dir: PathBuf::from("logs"),
            file_prefix: service_name.to_string(),
            max_log_files: 5,
            stdout: true,
            default_filter: format!("info,{crate_name}=debug,homework_core=debug"),
        }
    }

    /// Defaults overridden by `LOG_DIR`, `LOG_MAX_FILES` and `LOG_STDOUT`
    pub fn from_env(service_name: &str) -> Result<Self> {
        let defaults = Self::new(service_name);

        Ok(Self {
            log_dir: env::var("LOG_DIR").map_or(defaults.log_dir, PathBuf::from),

            max_log_files: env::var("LOG_MAX_FILES")
                .unwrap_or_else(|_| defaults.max_log_files.to_string())
                .parse()
                .context("LOG_MAX_FILES must be a valid integer")?,

            stdout: env::var("LOG_STDOUT")
                .unwrap_or_else(|_| defaults.stdout.to_string())
                .parse()
                .context("LOG_STDOUT must be true or false")?,

            ..defaults
        })
    }
}

/// Build the daily-rotating file sink
pub fn build_file_appender(config: &LoggingConfig) -> Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(&config.file_prefix)
        .filename_suffix("log")
        .max_log_files(config.max_log_files.max(1))
        .build(&config.log_dir)
        .with_context(|| format!("Failed to open log directory {}", config.log_dir.display()))
}

/// Initialize tracing with a rotating file sink and optional stdout
///
/// Both sinks share one format: timestamp, target, level, file:line, message.
/// The returned guard must be kept alive for the life of the process so
/// buffered lines get flushed.
pub fn init_tracing(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = build_file_appender(config)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let stdout_layer = config.stdout.then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
    });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.default_filter.clone().into()),
        )
        .with(stdout_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(non_blocking),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}
