//! Journal viewer: the operations a presentation layer drives.

use crate::error::StoreError;
use crate::filter::ResultSet;
use crate::session::Session;
use crate::view::{PageView, DEFAULT_PAGE_SIZE};
use std::path::{Path, PathBuf};
use usnview_journal::{
    reason, spawn_load, JournalError, JournalRecord, LoadEvent, LoadHandle, LoadOptions,
    LoadProgress,
};

/// Viewer configuration.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Records per page (default: 10).
    pub page_size: usize,
    /// Options passed to every load.
    pub load: LoadOptions,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            load: LoadOptions::default(),
        }
    }
}

/// Something the presentation layer should react to.
#[derive(Debug)]
pub enum ViewerEvent {
    /// The running load made progress.
    Progress(LoadProgress),
    /// A load finished and its records are now shown.
    Loaded {
        /// Loaded file.
        path: PathBuf,
        /// Number of records now in the viewer.
        records: usize,
    },
    /// A load failed; the previous records are still shown.
    LoadFailed {
        /// File that failed to load.
        path: PathBuf,
        /// Why it failed.
        error: JournalError,
    },
    /// A load was cancelled; the previous records are still shown.
    Cancelled {
        /// File whose load was cancelled.
        path: PathBuf,
    },
}

/// Owns the current [`Session`] and at most one background load.
///
/// A load replaces the records only when it succeeds. Until then, and after
/// a failure or cancellation, the viewer keeps serving the previous session.
///
/// # Example
///
/// ```rust,no_run
/// use usnview_store::{JournalViewer, ViewerConfig};
///
/// let mut viewer = JournalViewer::new(ViewerConfig::default())?;
/// viewer.load("usn.txt")?;
/// viewer.wait_for_load(|p| eprintln!("{}%", p.percent()))?;
/// viewer.search("report");
/// viewer.filter_by_category("Удаление")?;
/// let page = viewer.page_view();
/// println!("page {} of {}", page.page, page.total_pages);
/// # Ok::<(), usnview_store::StoreError>(())
/// ```
#[derive(Debug)]
pub struct JournalViewer {
    config: ViewerConfig,
    session: Session,
    source: Option<PathBuf>,
    pending: Option<LoadHandle>,
}

impl JournalViewer {
    /// Creates a viewer with no records.
    pub fn new(config: ViewerConfig) -> Result<Self, StoreError> {
        let session = Session::empty(config.page_size)?;
        Ok(Self {
            config,
            session,
            source: None,
            pending: None,
        })
    }

    /// Creates a viewer over already-parsed records.
    pub fn with_records(
        config: ViewerConfig,
        records: Vec<JournalRecord>,
    ) -> Result<Self, StoreError> {
        let session = Session::new(records, config.page_size)?;
        Ok(Self {
            config,
            session,
            source: None,
            pending: None,
        })
    }

    /// Starts loading `path` in the background.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LoadInProgress`] if a load is already running.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), StoreError> {
        if let Some(pending) = &self.pending {
            return Err(StoreError::LoadInProgress {
                path: pending.path().to_path_buf(),
            });
        }
        let path = path.as_ref().to_path_buf();
        log::debug!("starting load of {}", path.display());
        self.pending = Some(spawn_load(path, self.config.load.clone()));
        Ok(())
    }

    /// Returns true while a load is running.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Asks the running load to stop. The viewer keeps its current records.
    pub fn cancel_load(&self) {
        if let Some(pending) = &self.pending {
            log::debug!("cancelling load of {}", pending.path().display());
            pending.cancel();
        }
    }

    /// Drains pending load events without blocking, in delivery order.
    pub fn poll(&mut self) -> Vec<ViewerEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.pending.as_mut().and_then(LoadHandle::try_next) {
            events.push(self.apply(event));
        }
        events
    }

    /// Blocks until the running load ends, forwarding progress.
    ///
    /// Returns the number of records loaded.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NoLoadInProgress`] if nothing is loading
    /// - [`StoreError::Journal`] if the load failed or was cancelled; the
    ///   previous records remain
    pub fn wait_for_load<F: FnMut(LoadProgress)>(
        &mut self,
        mut on_progress: F,
    ) -> Result<usize, StoreError> {
        if self.pending.is_none() {
            return Err(StoreError::NoLoadInProgress);
        }
        while let Some(event) = self.pending.as_mut().and_then(LoadHandle::next_event) {
            match self.apply(event) {
                ViewerEvent::Progress(progress) => on_progress(progress),
                ViewerEvent::Loaded { records, .. } => return Ok(records),
                ViewerEvent::LoadFailed { error, .. } => return Err(error.into()),
                ViewerEvent::Cancelled { .. } => return Err(JournalError::Cancelled.into()),
            }
        }
        Err(JournalError::Worker.into())
    }

    /// Loads `path` and waits for it. Equivalent to [`load`](Self::load)
    /// followed by [`wait_for_load`](Self::wait_for_load).
    pub fn load_blocking<P: AsRef<Path>, F: FnMut(LoadProgress)>(
        &mut self,
        path: P,
        on_progress: F,
    ) -> Result<usize, StoreError> {
        self.load(path)?;
        self.wait_for_load(on_progress)
    }

    fn apply(&mut self, event: LoadEvent) -> ViewerEvent {
        let result = match event {
            LoadEvent::Progress(progress) => return ViewerEvent::Progress(progress),
            LoadEvent::Finished(result) => result,
        };

        let (path, cancelled) = match self.pending.take() {
            Some(handle) => (handle.path().to_path_buf(), handle.cancel_requested()),
            None => (PathBuf::new(), false),
        };
        // A load that completed after cancel() was requested is discarded.
        let result = match result {
            Ok(_) if cancelled => Err(JournalError::Cancelled),
            other => other,
        };

        match result {
            Ok(records) => {
                let count = records.len();
                self.session = self.session.with_records(records);
                self.source = Some(path.clone());
                log::info!("showing {} records from {}", count, path.display());
                ViewerEvent::Loaded {
                    path,
                    records: count,
                }
            }
            Err(JournalError::Cancelled) => {
                log::warn!("load of {} cancelled; keeping previous records", path.display());
                ViewerEvent::Cancelled { path }
            }
            Err(error) => {
                log::warn!("load of {} failed: {}", path.display(), error);
                ViewerEvent::LoadFailed { path, error }
            }
        }
    }

    /// File the current records came from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// The current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Searches all records by file name and returns the matches.
    pub fn search(&mut self, term: &str) -> ResultSet {
        self.session = self.session.with_search(term);
        self.session.search_results().clone()
    }

    /// Narrows the search results to a category ("Все" for none).
    pub fn filter_by_category(&mut self, name: &str) -> Result<ResultSet, StoreError> {
        self.session = self.session.with_category_name(name)?;
        Ok(self.session.filtered().clone())
    }

    /// Moves to the next page if there is one.
    pub fn next(&mut self) -> PageView {
        self.session = self.session.next();
        self.session.page_view()
    }

    /// Moves to the previous page if there is one.
    pub fn previous(&mut self) -> PageView {
        self.session = self.session.previous();
        self.session.page_view()
    }

    /// Jumps to a 1-based page number typed by a user. On error the current
    /// page is unchanged.
    pub fn go_to(&mut self, input: &str) -> Result<PageView, StoreError> {
        self.session = self.session.go_to(input)?;
        Ok(self.session.page_view())
    }

    /// Changes the page size and returns to the first page. Filters are kept.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidPageSize`] if `page_size` is zero.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<PageView, StoreError> {
        self.session = self.session.with_page_size(page_size)?;
        self.config.page_size = page_size;
        Ok(self.session.page_view())
    }

    /// The current page.
    pub fn page_view(&self) -> PageView {
        self.session.page_view()
    }

    /// Registry label for a reason code.
    pub fn describe_reason(&self, code: u32) -> &'static str {
        reason::describe_reason(code)
    }
}
