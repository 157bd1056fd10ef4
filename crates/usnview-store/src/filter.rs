//! Record filtering: name search and reason categories.

use crate::error::StoreError;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use usnview_journal::{reason, JournalRecord, ReasonCategory};

/// Shared, immutable list of records from one load.
pub type RecordList = Arc<[JournalRecord]>;

/// Trait for deciding whether a record is kept.
pub trait RecordFilter {
    /// Returns true if the record matches the filter criteria.
    fn matches(&self, record: &JournalRecord) -> bool;
}

/// Case-insensitive substring search on `file_name`.
///
/// An empty term matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameSearch {
    term: String,
    needle: String,
}

impl NameSearch {
    /// Creates a search for `term`.
    pub fn new(term: impl Into<String>) -> Self {
        let term = term.into();
        let needle = term.to_lowercase();
        Self { term, needle }
    }

    /// The term as entered.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Returns true if the search keeps every record.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }
}

impl RecordFilter for NameSearch {
    fn matches(&self, record: &JournalRecord) -> bool {
        self.needle.is_empty() || record.file_name.to_lowercase().contains(&self.needle)
    }
}

/// Category selector: everything, or one registry category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// No filtering.
    #[default]
    All,
    /// Only records whose reason is exactly one of the category's codes.
    Category(&'static ReasonCategory),
}

impl CategoryFilter {
    /// Resolves a category name. "Все" and "all" select [`CategoryFilter::All`].
    pub fn parse(name: &str) -> Result<Self, StoreError> {
        let name = name.trim();
        if name == reason::ALL_CATEGORIES || name.eq_ignore_ascii_case(reason::ALL_CATEGORIES_ALIAS)
        {
            return Ok(CategoryFilter::All);
        }
        reason::category(name)
            .map(CategoryFilter::Category)
            .ok_or_else(|| StoreError::UnknownCategory(name.to_string()))
    }

    /// Display name of the selector.
    pub fn name(&self) -> &'static str {
        match self {
            CategoryFilter::All => reason::ALL_CATEGORIES,
            CategoryFilter::Category(category) => category.name,
        }
    }

    /// Every selector in menu order, starting with [`CategoryFilter::All`].
    pub fn options() -> impl Iterator<Item = CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(reason::categories().iter().map(CategoryFilter::Category))
    }
}

impl RecordFilter for CategoryFilter {
    fn matches(&self, record: &JournalRecord) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(category) => category.contains(record.reason),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryFilter::parse(s)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered subset of a [`RecordList`].
///
/// Holds the shared base list and the positions of the selected records, so
/// cloning and narrowing never copy records.
#[derive(Debug, Clone)]
pub struct ResultSet {
    base: RecordList,
    indices: Arc<[usize]>,
}

impl ResultSet {
    /// Every record of `base`, in order.
    pub fn all(base: RecordList) -> Self {
        let indices = (0..base.len()).collect();
        Self { base, indices }
    }

    /// Records of this set that match `filter`, order preserved.
    pub fn refine<F: RecordFilter + ?Sized>(&self, filter: &F) -> Self {
        let indices = self
            .indices
            .iter()
            .copied()
            .filter(|&idx| filter.matches(&self.base[idx]))
            .collect();
        Self {
            base: Arc::clone(&self.base),
            indices,
        }
    }

    /// Number of records in the set.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if the set holds no records.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The `n`-th record of the set.
    pub fn get(&self, n: usize) -> Option<&JournalRecord> {
        self.indices.get(n).map(|&idx| &self.base[idx])
    }

    /// Records in set order.
    pub fn iter(&self) -> impl Iterator<Item = &JournalRecord> + '_ {
        self.indices.iter().map(move |&idx| &self.base[idx])
    }

    /// Records in positions `start..end` of the set (clamped).
    pub fn slice(&self, start: usize, end: usize) -> Vec<JournalRecord> {
        let end = end.min(self.len());
        let start = start.min(end);
        self.indices[start..end]
            .iter()
            .map(|&idx| self.base[idx].clone())
            .collect()
    }
}

/// Search over the full base list.
pub fn search(base: &RecordList, term: &str) -> ResultSet {
    ResultSet::all(Arc::clone(base)).refine(&NameSearch::new(term))
}

/// Category filter over a search result set.
pub fn filter_by_category(search_results: &ResultSet, filter: &CategoryFilter) -> ResultSet {
    match filter {
        CategoryFilter::All => search_results.clone(),
        CategoryFilter::Category(_) => search_results.refine(filter),
    }
}

/// Result of running a [`FilterPipeline`].
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Records surviving the search stage.
    pub search_results: ResultSet,
    /// Records surviving both stages.
    pub filtered: ResultSet,
}

/// The two filter stages, applied in order: name search over the base list,
/// then the category filter over the search results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPipeline {
    /// First stage.
    pub search: NameSearch,
    /// Second stage.
    pub category: CategoryFilter,
}

impl FilterPipeline {
    /// Creates a pipeline from both stages.
    pub fn new(search: NameSearch, category: CategoryFilter) -> Self {
        Self { search, category }
    }

    /// Runs both stages over `base`.
    pub fn apply(&self, base: &RecordList) -> PipelineOutput {
        let search_results = ResultSet::all(Arc::clone(base)).refine(&self.search);
        let filtered = filter_by_category(&search_results, &self.category);
        PipelineOutput {
            search_results,
            filtered,
        }
    }
}
