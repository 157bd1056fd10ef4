//! Query layer for parsed USN journal records.
//!
//! This crate provides:
//! - Name search and reason-category filtering as an ordered pipeline
//! - Bounds-checked pagination
//! - An immutable [`Session`] combining records, filters and page
//! - [`JournalViewer`], which owns a session and runs one load at a time
//!
//! Search always scans every loaded record; the category filter always
//! narrows the latest search results. Category membership is exact-value,
//! as defined by the registry in `usnview-journal`.

#![deny(missing_docs)]

/// Error types for store operations.
pub mod error;
/// Search and category filters.
pub mod filter;
/// Immutable query session.
pub mod session;
/// Pagination.
pub mod view;
/// Viewer with background loading.
pub mod viewer;

pub use error::StoreError;
pub use filter::{
    filter_by_category, search, CategoryFilter, FilterPipeline, NameSearch, PipelineOutput,
    RecordFilter, RecordList, ResultSet,
};
pub use session::Session;
pub use usnview_journal::{JournalRecord, LoadOptions, LoadProgress};
pub use view::{PageError, PageView, Pagination, DEFAULT_PAGE_SIZE};
pub use viewer::{JournalViewer, ViewerConfig, ViewerEvent};
