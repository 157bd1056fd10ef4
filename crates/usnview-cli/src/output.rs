//! Output formatting utilities.

use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{json, Value};
use std::io::{self, Write};
use usnview_store::{JournalRecord, PageView};

const NAME_WIDTH: usize = 32;
const ID_WIDTH: usize = 20;
const REASON_WIDTH: usize = 40;

/// Output layout for record listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Table,
    Tsv,
    Json,
}

/// Formats a record as a fixed-width table row.
pub fn format_table_row(record: &JournalRecord) -> String {
    format!(
        "{:<name$} {:<id$} {:<id$} {:<reason$} {}",
        truncate(&record.file_name, NAME_WIDTH),
        truncate(&record.file_id, ID_WIDTH),
        truncate(&record.parent_id, ID_WIDTH),
        truncate(record.reason_description(), REASON_WIDTH),
        record.timestamp,
        name = NAME_WIDTH,
        id = ID_WIDTH,
        reason = REASON_WIDTH,
    )
}

/// Formats a record as one tab-separated line, as copied from the table.
pub fn format_tsv_row(record: &JournalRecord) -> String {
    [
        record.file_name.as_str(),
        record.file_id.as_str(),
        record.parent_id.as_str(),
        record.reason_description(),
        record.timestamp.as_str(),
    ]
    .join("\t")
}

/// A record as JSON, including the reason label.
pub fn record_json(record: &JournalRecord) -> Value {
    json!({
        "file_name": record.file_name,
        "file_id": record.file_id,
        "parent_id": record.parent_id,
        "reason": record.reason,
        "reason_hex": format!("{:#010x}", record.reason),
        "reason_description": record.reason_description(),
        "timestamp": record.timestamp,
    })
}

/// A page as JSON.
pub fn page_json(page: &PageView) -> Value {
    json!({
        "page": page.page,
        "total_pages": page.total_pages,
        "total_records": page.total_records,
        "records": page.records.iter().map(record_json).collect::<Vec<_>>(),
    })
}

/// Table header line and separator.
pub fn table_header() -> String {
    format!(
        "{:<name$} {:<id$} {:<id$} {:<reason$} {}\n{}",
        "FILE_NAME",
        "FILE_ID",
        "PARENT_ID",
        "REASON",
        "TIMESTAMP",
        "-".repeat(NAME_WIDTH + 2 * ID_WIDTH + REASON_WIDTH + 24),
        name = NAME_WIDTH,
        id = ID_WIDTH,
        reason = REASON_WIDTH,
    )
}

/// Footer line with paging state.
pub fn page_footer(page: &PageView) -> String {
    format!(
        "Page {} of {} ({} records)",
        page.page, page.total_pages, page.total_records
    )
}

/// Writes a page in the requested layout.
pub fn write_page<W: Write>(out: &mut W, page: &PageView, format: Format) -> io::Result<()> {
    match format {
        Format::Json => {
            let text = serde_json::to_string_pretty(&page_json(page)).map_err(io::Error::other)?;
            writeln!(out, "{}", text)
        }
        Format::Tsv => {
            for record in &page.records {
                writeln!(out, "{}", format_tsv_row(record))?;
            }
            Ok(())
        }
        Format::Table => {
            writeln!(out, "{}", table_header())?;
            for record in &page.records {
                writeln!(out, "{}", format_table_row(record))?;
            }
            writeln!(out, "{}", page_footer(page))
        }
    }
}

/// Progress bar for loading, drawn on stderr. Hidden when `hidden` is set.
pub fn load_progress_bar(hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(100);
    if let Ok(style) = ProgressStyle::with_template("loading [{bar:40}] {pos:>3}%") {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}

/// Shortens `s` to at most `max_len` characters.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
