//! Page-by-page navigation over a result set.

use crate::error::StoreError;
use serde::Serialize;
use std::num::IntErrorKind;
use thiserror::Error;
use usnview_journal::JournalRecord;

/// Records shown per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Errors for user-supplied page numbers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// The input is not an integer.
    #[error("enter a valid page number, got {input:?}")]
    Format {
        /// The rejected input.
        input: String,
    },
    /// The page is outside `1..=max`.
    #[error("page number must be between 1 and {max}, got {requested}")]
    Range {
        /// The requested 1-based page.
        requested: i64,
        /// Highest accepted page.
        max: usize,
    },
}

/// Current page and page size. Zero-based internally.
///
/// All navigation is pure: each method returns the new position and takes
/// the size of the result set being paged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_size: usize,
    current_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            current_page: 0,
        }
    }
}

impl Pagination {
    /// First page with the given size.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidPageSize`] if `page_size` is zero.
    pub fn new(page_size: usize) -> Result<Self, StoreError> {
        if page_size == 0 {
            return Err(StoreError::InvalidPageSize(page_size));
        }
        Ok(Self {
            page_size,
            current_page: 0,
        })
    }

    /// Records per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Zero-based current page.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Back to the first page.
    pub fn reset(self) -> Self {
        Self {
            current_page: 0,
            ..self
        }
    }

    /// Number of pages for `count` records. An empty set still has one page.
    pub fn total_pages(&self, count: usize) -> usize {
        count.div_ceil(self.page_size).max(1)
    }

    /// Highest page number accepted by [`go_to`](Self::go_to), 1-based.
    pub fn max_page(&self, count: usize) -> usize {
        count / self.page_size + 1
    }

    /// Returns true if another page follows the current one.
    pub fn has_next(&self, count: usize) -> bool {
        (self.current_page + 1) * self.page_size < count
    }

    /// Returns true if the current page is not the first.
    pub fn has_previous(&self) -> bool {
        self.current_page > 0
    }

    /// The following page, or the same one if this is the last.
    pub fn next(self, count: usize) -> Self {
        if self.has_next(count) {
            Self {
                current_page: self.current_page + 1,
                ..self
            }
        } else {
            self
        }
    }

    /// The preceding page, or the same one on the first page.
    pub fn previous(self) -> Self {
        if self.has_previous() {
            Self {
                current_page: self.current_page - 1,
                ..self
            }
        } else {
            self
        }
    }

    /// Jumps to a 1-based page number typed by a user.
    ///
    /// # Errors
    ///
    /// - [`PageError::Format`] if `input` is not an integer
    /// - [`PageError::Range`] if the page is below 1 or above [`max_page`](Self::max_page)
    pub fn go_to(self, input: &str, count: usize) -> Result<Self, PageError> {
        let max = self.max_page(count);
        let requested: i64 = match input.trim().parse() {
            Ok(n) => n,
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => i64::MAX,
                IntErrorKind::NegOverflow => i64::MIN,
                _ => {
                    return Err(PageError::Format {
                        input: input.to_string(),
                    })
                }
            },
        };

        if requested < 1 || requested as u64 > max as u64 {
            return Err(PageError::Range { requested, max });
        }

        Ok(Self {
            current_page: requested as usize - 1,
            ..self
        })
    }

    /// Half-open range of set positions on the current page.
    pub fn bounds(&self, count: usize) -> (usize, usize) {
        let start = (self.current_page * self.page_size).min(count);
        let end = (start + self.page_size).min(count);
        (start, end)
    }
}

/// One page of records ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    /// Records on this page, at most `page_size`.
    pub records: Vec<JournalRecord>,
    /// 1-based page number.
    pub page: usize,
    /// Total number of pages.
    pub total_pages: usize,
    /// Records in the whole filtered set.
    pub total_records: usize,
}

impl PageView {
    /// Returns true if the page holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
