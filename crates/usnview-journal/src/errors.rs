use std::path::PathBuf;
use thiserror::Error;

/// Source name used in errors for dumps that did not come from a file.
pub const INLINE_SOURCE: &str = "<input>";

/// Errors that can occur while loading a journal dump.
#[derive(Error, Debug)]
pub enum JournalError {
    /// The dump file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path of the dump file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The dump bytes are not valid under the IBM866 code page.
    #[error("{} is not valid IBM866 text", path.display())]
    Encoding {
        /// Path of the dump file.
        path: PathBuf,
    },
    /// A reason value could not be parsed as a 32-bit hex code.
    #[error("invalid reason code in {} on line {line}: {content:?}", path.display())]
    Parse {
        /// Dump file, or [`INLINE_SOURCE`] for text parsed from memory.
        path: PathBuf,
        /// 1-based line number in the dump.
        line: usize,
        /// The offending (trimmed) line.
        content: String,
    },
    /// The load was cancelled before it finished.
    #[error("load cancelled")]
    Cancelled,
    /// The background worker stopped without reporting a result.
    #[error("load worker terminated unexpectedly")]
    Worker,
}

impl JournalError {
    /// Returns true if this error is a cancellation rather than a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, JournalError::Cancelled)
    }
}
