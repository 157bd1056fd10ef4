//! Line-level structure of a localized `fsutil usn readjournal` dump.
//!
//! A dump is a sequence of blocks. Each block starts with a line beginning
//! with [`BOUNDARY_PREFIX`] and continues with `<Label>: <value>` lines. The
//! labels are the Russian ones emitted by a Russian-locale Windows; other
//! lines (version fields, attributes, ...) are not interpreted.

/// Prefix of the line that opens a new record.
pub const BOUNDARY_PREFIX: &str = "USN:";

/// Label of the file name line.
pub const FILE_NAME_LABEL: &str = "Имя файла:";
/// Label of the file reference number line.
pub const FILE_ID_LABEL: &str = "ИД файла:";
/// Label of the parent reference number line.
pub const PARENT_ID_LABEL: &str = "ИД родительского файла:";
/// Label of the reason line. Its value is `<hex>: <free text>`.
pub const REASON_LABEL: &str = "Причина:";
/// Label of the timestamp line.
pub const TIMESTAMP_LABEL: &str = "Метка времени:";

/// A record field that the dump carries on its own labelled line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// `file_name`
    FileName,
    /// `file_id`
    FileId,
    /// `parent_id`
    ParentId,
    /// `reason`
    Reason,
    /// `timestamp`
    Timestamp,
}

const FIELD_LABELS: [(&str, Field); 5] = [
    (FILE_NAME_LABEL, Field::FileName),
    (FILE_ID_LABEL, Field::FileId),
    (PARENT_ID_LABEL, Field::ParentId),
    (REASON_LABEL, Field::Reason),
    (TIMESTAMP_LABEL, Field::Timestamp),
];

impl Field {
    /// The label that introduces this field in a dump.
    pub fn label(self) -> &'static str {
        FIELD_LABELS
            .iter()
            .find(|(_, f)| *f == self)
            .map(|(label, _)| *label)
            .unwrap_or_default()
    }
}

/// What a single trimmed dump line means to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Start of a new record.
    Boundary,
    /// A labelled field with its trimmed value.
    Field(Field, &'a str),
    /// Anything else.
    Ignored,
}

/// Classifies one line. The line is trimmed before matching.
pub fn classify_line(line: &str) -> LineKind<'_> {
    let line = line.trim();
    if line.starts_with(BOUNDARY_PREFIX) {
        return LineKind::Boundary;
    }

    for (label, field) in FIELD_LABELS {
        if line.starts_with(label) {
            return LineKind::Field(field, value_after_colon(line));
        }
    }

    LineKind::Ignored
}

/// Everything after the first colon, trimmed.
fn value_after_colon(line: &str) -> &str {
    line.split_once(':').map(|(_, v)| v.trim()).unwrap_or("")
}

/// Extracts the hex token of a reason value (`"0x80000200: Закрыть"`).
pub fn reason_token(value: &str) -> &str {
    value.split(':').next().unwrap_or("").trim()
}

/// Parses a reason hex token into a bitmask.
///
/// An optional `0x`/`0X` prefix is accepted. Returns `None` for empty,
/// non-hex, or out-of-range tokens.
pub fn parse_reason_code(token: &str) -> Option<u32> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}
