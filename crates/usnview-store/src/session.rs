//! Immutable query state over one loaded record list.

use crate::error::StoreError;
use crate::filter::{
    filter_by_category, CategoryFilter, FilterPipeline, NameSearch, RecordList, ResultSet,
};
use crate::view::{PageError, PageView, Pagination};
use std::sync::Arc;
use usnview_journal::JournalRecord;

/// A snapshot of `(records, search term, category, page)`.
///
/// Every operation returns a new session; the receiver is never modified.
/// Filtered sets are computed when the state changes, so rendering a page is
/// a slice.
///
/// Searching starts from the full record list and resets the category to
/// [`CategoryFilter::All`]; choosing a category narrows the current search
/// results. Both reset the page to the first one.
#[derive(Debug, Clone)]
pub struct Session {
    base: RecordList,
    pipeline: FilterPipeline,
    search_results: ResultSet,
    filtered: ResultSet,
    pagination: Pagination,
}

impl Session {
    /// A session showing every record of `records`.
    pub fn new(records: impl Into<RecordList>, page_size: usize) -> Result<Self, StoreError> {
        let pagination = Pagination::new(page_size)?;
        Ok(Self::build(records.into(), FilterPipeline::default(), pagination))
    }

    /// A session over no records.
    pub fn empty(page_size: usize) -> Result<Self, StoreError> {
        Self::new(Vec::<JournalRecord>::new(), page_size)
    }

    fn build(base: RecordList, pipeline: FilterPipeline, pagination: Pagination) -> Self {
        let output = pipeline.apply(&base);
        Self {
            base,
            pipeline,
            search_results: output.search_results,
            filtered: output.filtered,
            pagination,
        }
    }

    /// Same page size and no filters over a new record list.
    pub fn with_records(&self, records: impl Into<RecordList>) -> Self {
        Self::build(
            records.into(),
            FilterPipeline::default(),
            self.pagination.reset(),
        )
    }

    /// Same filters with a different page size, back on the first page.
    pub fn with_page_size(&self, page_size: usize) -> Result<Self, StoreError> {
        Ok(Self {
            pagination: Pagination::new(page_size)?,
            ..self.clone()
        })
    }

    /// Searches the full record list by file name.
    pub fn with_search(&self, term: &str) -> Self {
        let pipeline = FilterPipeline::new(NameSearch::new(term), CategoryFilter::All);
        Self::build(Arc::clone(&self.base), pipeline, self.pagination.reset())
    }

    /// Narrows the current search results to a category.
    pub fn with_category(&self, category: CategoryFilter) -> Self {
        let filtered = filter_by_category(&self.search_results, &category);
        Self {
            pipeline: FilterPipeline::new(self.pipeline.search.clone(), category),
            filtered,
            pagination: self.pagination.reset(),
            ..self.clone()
        }
    }

    /// [`with_category`](Self::with_category) by category name.
    pub fn with_category_name(&self, name: &str) -> Result<Self, StoreError> {
        Ok(self.with_category(CategoryFilter::parse(name)?))
    }

    /// The next page, if there is one.
    pub fn next(&self) -> Self {
        Self {
            pagination: self.pagination.next(self.filtered.len()),
            ..self.clone()
        }
    }

    /// The previous page, if there is one.
    pub fn previous(&self) -> Self {
        Self {
            pagination: self.pagination.previous(),
            ..self.clone()
        }
    }

    /// Jumps to a 1-based page number typed by a user.
    pub fn go_to(&self, input: &str) -> Result<Self, PageError> {
        Ok(Self {
            pagination: self.pagination.go_to(input, self.filtered.len())?,
            ..self.clone()
        })
    }

    /// The records on the current page.
    pub fn page_view(&self) -> PageView {
        let count = self.filtered.len();
        let (start, end) = self.pagination.bounds(count);
        PageView {
            records: self.filtered.slice(start, end),
            page: self.pagination.current_page() + 1,
            total_pages: self.pagination.total_pages(count),
            total_records: count,
        }
    }

    /// Every loaded record.
    pub fn records(&self) -> &RecordList {
        &self.base
    }

    /// Current search term.
    pub fn search_term(&self) -> &str {
        self.pipeline.search.term()
    }

    /// Current category selector.
    pub fn category(&self) -> CategoryFilter {
        self.pipeline.category
    }

    /// Records matching the search term.
    pub fn search_results(&self) -> &ResultSet {
        &self.search_results
    }

    /// Records matching the search term and category.
    pub fn filtered(&self) -> &ResultSet {
        &self.filtered
    }

    /// Zero-based current page.
    pub fn current_page(&self) -> usize {
        self.pagination.current_page()
    }

    /// Total pages of the filtered set.
    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages(self.filtered.len())
    }

    /// Records per page.
    pub fn page_size(&self) -> usize {
        self.pagination.page_size()
    }
}
