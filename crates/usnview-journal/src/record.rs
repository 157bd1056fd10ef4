use crate::reason;
use serde::{Deserialize, Serialize};

/// One reconstructed change event from a journal dump.
///
/// Fields that were absent in the dump keep their defaults: empty strings and
/// a zero reason.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalRecord {
    /// File name as written in the dump.
    pub file_name: String,
    /// File reference number, kept as text.
    pub file_id: String,
    /// Parent directory reference number, kept as text.
    pub parent_id: String,
    /// Reason bitmask.
    pub reason: u32,
    /// Timestamp, verbatim.
    pub timestamp: String,
}

impl JournalRecord {
    /// Registry label for this record's reason.
    pub fn reason_description(&self) -> &'static str {
        reason::describe_reason(self.reason)
    }
}
