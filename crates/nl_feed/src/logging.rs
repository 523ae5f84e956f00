use std::collections::VecDeque;
use std::fs::File;
use std::path::Path;
use std::sync::{Arc, Once};
use tracing::Level;

static INIT: Once = Once::new();

/// Where the fmt subscriber writes.
#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    /// Drop everything; the TUI owns the terminal.
    Discard,
}

/// Prefixes every message with the labels pushed so far, e.g. `[API] [load #3]`.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    prefixes: VecDeque<String>,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            prefixes: VecDeque::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.push_back(prefix.into());
        self
    }

    fn prefix(&self) -> String {
        self.prefixes.iter().map(|p| format!("{} ", p)).collect()
    }

    pub fn info(&self, message: &str) {
        tracing::info!("{}{}", self.prefix(), message);
    }

    pub fn error(&self, message: &str) {
        tracing::error!("{}{}", self.prefix(), message);
    }

    pub fn debug(&self, message: &str) {
        tracing::debug!("{}{}", self.prefix(), message);
    }
}

/// Installs the global fmt subscriber once; later calls only hand out a logger.
pub fn init_logging(target: LogTarget<'_>, verbose: bool) -> std::io::Result<Logger> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let file = match target {
        LogTarget::File(path) => Some(Arc::new(File::create(path)?)),
        _ => None,
    };

    if !tracing::dispatcher::has_been_set() {
        INIT.call_once(|| {
            let builder = tracing_subscriber::fmt().with_max_level(level);
            let result = match (target, file) {
                (LogTarget::File(_), Some(file)) => builder.with_ansi(false).with_writer(file).try_init(),
                (LogTarget::Discard, _) => builder.with_writer(std::io::sink).try_init(),
                _ => builder.with_writer(std::io::stderr).try_init(),
            };
            if let Err(e) = result {
                eprintln!("logging already initialized: {}", e);
            }
        });
    }
    Ok(Logger::new())
}
