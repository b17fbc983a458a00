//! Logging setup
//!
//! The TUI owns the terminal, so it only logs when a file is given. The line
//! console logs to stderr.

use crate::GameError;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    Off,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub target: LogTarget,
    pub verbose: bool,
}

impl LoggingConfig {
    /// `RUST_LOG` wins; otherwise `debug` when verbose, `warn` when not
    fn filter(&self) -> EnvFilter {
        let default = if self.verbose { "debug" } else { "warn" };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    }
}

/// Install the global subscriber
pub fn init(config: &LoggingConfig) -> Result<(), GameError> {
    match &config.target {
        LogTarget::Off => Ok(()),
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(false),
            )
            .with(config.filter())
            .try_init()
            .map_err(|e| GameError::Logging(e.to_string())),
        LogTarget::File(path) => {
            let writer = open_log_file(path)?;
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_target(true),
                )
                .with(config.filter())
                .try_init()
                .map_err(|e| GameError::Logging(e.to_string()))
        }
    }
}

/// Thread-safe file writer for logging.
#[derive(Clone)]
struct LogFileWriter {
    file: Arc<Mutex<File>>,
}

impl Write for LogFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::other(e.to_string()))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::other(e.to_string()))?;
        guard.flush()
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogFileWriter {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn open_log_file(path: &Path) -> Result<LogFileWriter, GameError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(LogFileWriter {
        file: Arc::new(Mutex::new(file)),
    })
}
