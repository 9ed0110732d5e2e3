//! Log output for the CLI
//!
//! In MCP mode stdout carries the protocol, so logs go to a file under
//! `~/.monday-mcp/` instead. Every write is flushed and synced so the file is
//! usable while the server is still running.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::Level;

/// Directory under the home directory that holds the MCP log
pub const LOG_DIR_NAME: &str = ".monday-mcp";

/// Environment variable overriding the log file name
pub const LOG_FILE_ENV: &str = "MONDAY_MCP_LOG_FILE";

/// Log file name used when [`LOG_FILE_ENV`] is unset
pub const DEFAULT_LOG_FILE: &str = "mcp.log";

/// A thread-safe writer that flushes and syncs to disk after every write.
///
/// # Example
///
/// ```no_run
/// use std::io::Write;
/// use std::sync::{Arc, Mutex};
/// use std::fs::File;
/// use monday_mcp_cli::logging::FileWriterGuard;
///
/// let file = File::create("log.txt").unwrap();
/// let mut guard = FileWriterGuard::new(Arc::new(Mutex::new(file)));
/// guard.write_all(b"Log message\n").unwrap();
/// ```
#[derive(Clone)]
pub struct FileWriterGuard {
    file: Arc<Mutex<File>>,
}

impl FileWriterGuard {
    /// Creates a new `FileWriterGuard` wrapping the given file.
    pub fn new(file: Arc<Mutex<File>>) -> Self {
        Self { file }
    }

    fn lock(&self) -> std::io::Result<std::sync::MutexGuard<'_, File>> {
        self.file
            .lock()
            .map_err(|_| std::io::Error::other("log file mutex was poisoned"))
    }
}

impl Write for FileWriterGuard {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut file = self.lock()?;
        let written = file.write(buf)?;
        file.flush()?;
        file.sync_all()?;
        Ok(written)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        let mut file = self.lock()?;
        file.flush()?;
        file.sync_all()?;
        Ok(())
    }
}

/// Level for the current invocation
pub fn log_level(is_mcp_mode: bool, quiet: bool, debug: bool, verbose: bool) -> Level {
    if is_mcp_mode {
        Level::DEBUG
    } else if quiet {
        Level::ERROR
    } else if debug {
        Level::DEBUG
    } else if verbose {
        Level::TRACE
    } else {
        Level::INFO
    }
}

/// Path of the MCP log file
pub fn mcp_log_path() -> PathBuf {
    let log_dir = match dirs::home_dir() {
        Some(home) => home.join(LOG_DIR_NAME),
        None => PathBuf::from(LOG_DIR_NAME),
    };
    let file_name = std::env::var(LOG_FILE_ENV)
        .ok()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());
    log_dir.join(file_name)
}

/// Install the global tracing subscriber
pub fn init(is_mcp_mode: bool, level: Level) {
    if !is_mcp_mode {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(level)
            .init();
        return;
    }

    let log_file = mcp_log_path();
    let opened = log_file
        .parent()
        .map_or(Ok(()), std::fs::create_dir_all)
        .and_then(|_| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_file)
        });

    match opened {
        Ok(file) => {
            let guard = FileWriterGuard::new(Arc::new(Mutex::new(file)));
            tracing_subscriber::fmt()
                .with_writer(move || guard.clone())
                .with_max_level(level)
                .with_ansi(false)
                .init();
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_max_level(level)
                .init();
            tracing::warn!(
                "Failed to open log file {}, using stderr: {}",
                log_file.display(),
                e
            );
        }
    }
}
