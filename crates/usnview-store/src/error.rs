//! Error types for store operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while querying or loading records.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Loading the dump failed.
    #[error("failed to load journal: {0}")]
    Journal(#[from] usnview_journal::JournalError),
    /// A user-supplied page number was rejected.
    #[error(transparent)]
    Page(#[from] crate::view::PageError),
    /// No category with this name exists.
    #[error("unknown category: {0:?}")]
    UnknownCategory(String),
    /// A load is already running.
    #[error("a load of {} is already in progress", path.display())]
    LoadInProgress {
        /// Path of the load in flight.
        path: PathBuf,
    },
    /// There is no load to wait for.
    #[error("no load in progress")]
    NoLoadInProgress,
    /// Page size must be at least one.
    #[error("invalid page size {0}; must be at least 1")]
    InvalidPageSize(usize),
}
