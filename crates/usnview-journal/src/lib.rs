//! Parser and reason-code registry for textual USN change journal dumps.
//!
//! This crate provides:
//! - IBM866 decoding of `fsutil usn readjournal` text dumps
//! - Line-by-line reconstruction of [`JournalRecord`]s
//! - A static registry of reason descriptions and categories
//! - Foreground and background loading with progress and cancellation
//!
//! ## Quick Start
//!
//! ```rust
//! use usnview_journal::{describe_reason, parse_str};
//!
//! let dump = "\
//! USN: 1
//! Имя файла: report.docx
//! Причина: 0x00000100: Создание файла
//! USN: 2
//! Имя файла: report.docx
//! Причина: 0x80000200: Удаление файла | Закрыть
//! ";
//!
//! let records = parse_str(dump)?;
//! assert_eq!(records.len(), 2);
//! assert_eq!(describe_reason(records[0].reason), "Удаление файла | Закрыть");
//! # Ok::<(), usnview_journal::JournalError>(())
//! ```
//!
//! ## Key Types
//!
//! - [`RecordParser`] - Incremental record reconstruction
//! - [`load_file`] / [`spawn_load`] - Load a dump file
//! - [`describe_reason`] / [`category`] - Registry lookups

#![deny(missing_docs)]

/// IBM866 decoding.
pub mod decode;
/// Error types for journal loading.
pub mod errors;
/// Dump labels and line classification.
pub mod format;
/// File loading with progress and cancellation.
pub mod loader;
/// Record reconstruction.
pub mod parser;
/// Reason code registry.
pub mod reason;
/// Journal record type.
pub mod record;

pub use decode::{decode_ibm866, encode_ibm866};
pub use errors::{JournalError, INLINE_SOURCE};
pub use loader::{
    load_file, spawn_load, CancelToken, LoadEvent, LoadHandle, LoadOptions, LoadProgress,
    DEFAULT_PROGRESS_INTERVAL,
};
pub use parser::{parse_lines, parse_str, RecordParser};
pub use reason::{
    categories, categories_of, category, describe_reason, is_known_reason, known_reasons,
    ReasonCategory, ALL_CATEGORIES, ALL_CATEGORIES_ALIAS, UNKNOWN_REASON,
};
pub use record::JournalRecord;
