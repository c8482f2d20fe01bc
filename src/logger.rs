//! Best-effort diagnostics file logging.
//!
//! Every call formats one message and runs a full open/append/close cycle, so
//! a crash loses at most the message in flight. There is no persistent handle
//! and no buffering across calls. Logging failures never reach the caller;
//! this is a diagnostics channel, not a durability guarantee.

use std::fmt::{self, Write as _};
use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::PathBuf;

use crate::fmtbuf::BoundedWriter;

/// Default log file location, next to the running application.
pub const DEFAULT_LOG_PATH: &str = "cindergl.log";

/// Hard cap on a single formatted message.
const MESSAGE_CAP: usize = 512 * 1024;

/// Append-only file logger.
#[derive(Debug, Clone)]
pub struct FileLogger {
    path: PathBuf,
}

impl Default for FileLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl FileLogger {
    /// Logger writing to [`DEFAULT_LOG_PATH`].
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_LOG_PATH),
        }
    }

    /// Logger writing to a custom path (host configuration, tests).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one formatted message to the log file.
    ///
    /// Messages over 512 KiB are truncated. If the file cannot be opened or
    /// written, the message is dropped silently; a tracing event is the only
    /// trace left behind.
    pub fn log(&self, args: fmt::Arguments<'_>) {
        let mut msg = BoundedWriter::new(MESSAGE_CAP);
        // BoundedWriter never errors; it truncates instead.
        let _ = msg.write_fmt(args);

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path);
        match file {
            Ok(mut file) => {
                if let Err(err) = file.write_all(msg.as_str().as_bytes()) {
                    tracing::debug!(path = %self.path.display(), %err, "log write failed");
                }
            }
            Err(err) => {
                tracing::debug!(path = %self.path.display(), %err, "log file could not be opened");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_messages_append_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cindergl.log");
        let logger = FileLogger::with_path(&path);

        for i in 0..5 {
            logger.log(format_args!("message {i}\n"));
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "message 0\nmessage 1\nmessage 2\nmessage 3\nmessage 4\n"
        );
    }

    #[test]
    fn test_creates_file_on_first_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.log");
        assert!(!path.exists());

        FileLogger::with_path(&path).log(format_args!("first"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first");
    }

    #[test]
    fn test_unopenable_path_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in place of the file makes open() fail on every platform.
        let path = dir.path().join("blocked");
        std::fs::create_dir(&path).unwrap();

        // Must not panic and must not surface an error.
        FileLogger::with_path(&path).log(format_args!("dropped"));
    }

    #[test]
    fn test_oversized_message_is_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.log");
        let logger = FileLogger::with_path(&path);

        let huge = "x".repeat(MESSAGE_CAP + 4096);
        logger.log(format_args!("{huge}"));

        let written = std::fs::metadata(&path).unwrap().len();
        assert_eq!(written as usize, MESSAGE_CAP);
    }
}
