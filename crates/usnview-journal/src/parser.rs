//! Record reconstruction from dump lines.

use crate::errors::{JournalError, INLINE_SOURCE};
use crate::format::{self, Field, LineKind};
use crate::record::JournalRecord;
use std::path::PathBuf;

/// Fields collected for the record currently being read.
#[derive(Debug, Default)]
struct Accumulator {
    file_name: Option<String>,
    file_id: Option<String>,
    parent_id: Option<String>,
    reason: Option<u32>,
    timestamp: Option<String>,
}

impl Accumulator {
    fn is_empty(&self) -> bool {
        self.file_name.is_none()
            && self.file_id.is_none()
            && self.parent_id.is_none()
            && self.reason.is_none()
            && self.timestamp.is_none()
    }

    fn into_record(self) -> JournalRecord {
        JournalRecord {
            file_name: self.file_name.unwrap_or_default(),
            file_id: self.file_id.unwrap_or_default(),
            parent_id: self.parent_id.unwrap_or_default(),
            reason: self.reason.unwrap_or(0),
            timestamp: self.timestamp.unwrap_or_default(),
        }
    }
}

/// Incremental parser that groups dump lines into records.
///
/// Lines are fed one at a time; a record is emitted only when the next
/// boundary arrives or [`finish`](Self::finish) is called. Records missing
/// some fields are kept with defaults.
///
/// # Example
///
/// ```rust
/// use usnview_journal::RecordParser;
///
/// let mut parser = RecordParser::new();
/// for line in ["USN: 1", "Имя файла: a.txt", "USN: 2", "Имя файла: b.txt"] {
///     parser.feed_line(line)?;
/// }
/// let records = parser.finish();
/// assert_eq!(records[0].file_name, "b.txt");
/// # Ok::<(), usnview_journal::JournalError>(())
/// ```
#[derive(Debug)]
pub struct RecordParser {
    source: PathBuf,
    current: Accumulator,
    records: Vec<JournalRecord>,
    line: usize,
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::for_source(INLINE_SOURCE)
    }
}

impl RecordParser {
    /// Creates an empty parser for text held in memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty parser whose errors name `source`.
    pub fn for_source(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            current: Accumulator::default(),
            records: Vec::new(),
            line: 0,
        }
    }

    /// Number of lines consumed so far.
    pub fn lines_consumed(&self) -> usize {
        self.line
    }

    /// Number of records completed so far (excluding the one in progress).
    pub fn records_completed(&self) -> usize {
        self.records.len()
    }

    /// Consumes one line of the dump.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::Parse`] if the line is a reason line whose hex
    /// token is malformed.
    pub fn feed_line(&mut self, line: &str) -> Result<(), JournalError> {
        self.line += 1;

        match format::classify_line(line) {
            LineKind::Boundary => self.flush(),
            LineKind::Field(Field::FileName, value) => {
                self.current.file_name = Some(value.to_string());
            }
            LineKind::Field(Field::FileId, value) => {
                self.current.file_id = Some(value.to_string());
            }
            LineKind::Field(Field::ParentId, value) => {
                self.current.parent_id = Some(value.to_string());
            }
            LineKind::Field(Field::Reason, value) => {
                let code = format::parse_reason_code(format::reason_token(value)).ok_or_else(
                    || JournalError::Parse {
                        path: self.source.clone(),
                        line: self.line,
                        content: line.trim().to_string(),
                    },
                )?;
                self.current.reason = Some(code);
            }
            LineKind::Field(Field::Timestamp, value) => {
                self.current.timestamp = Some(value.to_string());
            }
            LineKind::Ignored => {}
        }

        Ok(())
    }

    fn flush(&mut self) {
        let current = std::mem::take(&mut self.current);
        if !current.is_empty() {
            self.records.push(current.into_record());
        }
    }

    /// Flushes the trailing record and returns all records, most recent first.
    pub fn finish(mut self) -> Vec<JournalRecord> {
        self.flush();
        self.records.reverse();
        self.records
    }
}

/// Parses a sequence of lines into records, most recent first.
pub fn parse_lines<'a, I>(lines: I) -> Result<Vec<JournalRecord>, JournalError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut parser = RecordParser::new();
    for line in lines {
        parser.feed_line(line)?;
    }
    Ok(parser.finish())
}

/// Parses decoded dump text into records, most recent first.
pub fn parse_str(text: &str) -> Result<Vec<JournalRecord>, JournalError> {
    parse_lines(text.lines())
}
