//! Loading dump files, in the foreground or on a worker thread.

use crate::decode::decode_ibm866;
use crate::errors::JournalError;
use crate::parser::RecordParser;
use crate::record::JournalRecord;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

/// Default number of lines between progress reports and cancellation checks.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 100;

/// Options for loading a dump.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Lines processed between progress reports (default: 100). Cancellation
    /// is checked at the same cadence. Zero is treated as one.
    pub progress_interval: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

/// How far a load has got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadProgress {
    /// Lines parsed so far.
    pub lines_processed: usize,
    /// Lines in the dump.
    pub total_lines: usize,
}

impl LoadProgress {
    /// Completion percentage in `[0, 100]`. An empty dump counts as complete.
    pub fn percent(&self) -> u8 {
        if self.total_lines == 0 {
            return 100;
        }
        let done = self.lines_processed.min(self.total_lines) as u128;
        (done * 100 / self.total_lines as u128) as u8
    }

    /// Returns true once every line has been parsed.
    pub fn is_complete(&self) -> bool {
        self.lines_processed >= self.total_lines
    }
}

/// Shared flag used to stop a load between line batches.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns true if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Loads and parses a dump file on the current thread.
///
/// The file is decoded as IBM866, parsed line by line and returned most
/// recent record first. `on_progress` is called every
/// [`LoadOptions::progress_interval`] lines and once more when parsing is
/// complete; nothing is reported after that.
///
/// # Errors
///
/// Returns [`JournalError`] if:
/// - the file cannot be read ([`JournalError::Io`])
/// - the bytes are not IBM866 text ([`JournalError::Encoding`])
/// - a reason code is malformed ([`JournalError::Parse`])
/// - `cancel` was triggered ([`JournalError::Cancelled`])
pub fn load_file<P, F>(
    path: P,
    options: &LoadOptions,
    cancel: &CancelToken,
    mut on_progress: F,
) -> Result<Vec<JournalRecord>, JournalError>
where
    P: AsRef<Path>,
    F: FnMut(LoadProgress),
{
    let path = path.as_ref();
    log::debug!("loading journal dump {}", path.display());

    if cancel.is_cancelled() {
        return Err(JournalError::Cancelled);
    }

    let bytes = std::fs::read(path).map_err(|source| JournalError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = decode_ibm866(&bytes, path)?;
    let total_lines = text.lines().count();
    let interval = options.progress_interval.max(1);
    log::debug!("{} lines to parse in {}", total_lines, path.display());

    let mut parser = RecordParser::for_source(path);
    for (idx, line) in text.lines().enumerate() {
        parser.feed_line(line)?;

        let lines_processed = idx + 1;
        if lines_processed % interval == 0 {
            if cancel.is_cancelled() {
                log::warn!(
                    "load of {} cancelled after {} lines",
                    path.display(),
                    lines_processed
                );
                return Err(JournalError::Cancelled);
            }
            on_progress(LoadProgress {
                lines_processed,
                total_lines,
            });
        }
    }

    if cancel.is_cancelled() {
        return Err(JournalError::Cancelled);
    }

    let records = parser.finish();
    on_progress(LoadProgress {
        lines_processed: total_lines,
        total_lines,
    });
    log::info!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Message delivered from a background load.
#[derive(Debug)]
pub enum LoadEvent {
    /// Periodic progress.
    Progress(LoadProgress),
    /// Final outcome. Always the last event of a load.
    Finished(Result<Vec<JournalRecord>, JournalError>),
}

/// Handle to a load running on a worker thread.
///
/// Progress and the final result travel over one channel, so they arrive in
/// order and nothing follows [`LoadEvent::Finished`]. Dropping an unfinished
/// handle cancels the load.
#[derive(Debug)]
pub struct LoadHandle {
    path: PathBuf,
    rx: mpsc::Receiver<LoadEvent>,
    cancel: CancelToken,
    finished: bool,
}

/// Starts loading `path` on a worker thread.
///
/// # Example
///
/// ```rust,no_run
/// use usnview_journal::{spawn_load, LoadOptions};
///
/// let handle = spawn_load("usn.txt", LoadOptions::default());
/// let records = handle.wait(|p| eprintln!("{}%", p.percent()))?;
/// println!("{} records", records.len());
/// # Ok::<(), usnview_journal::JournalError>(())
/// ```
pub fn spawn_load<P: Into<PathBuf>>(path: P, options: LoadOptions) -> LoadHandle {
    let path = path.into();
    let (tx, rx) = mpsc::channel();
    let cancel = CancelToken::new();

    let worker_path = path.clone();
    let worker_cancel = cancel.clone();
    thread::spawn(move || {
        let progress_tx = tx.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            load_file(&worker_path, &options, &worker_cancel, |progress| {
                let _ = progress_tx.send(LoadEvent::Progress(progress));
            })
        }));
        let result = result.unwrap_or_else(|_| {
            log::error!("load worker for {} panicked", worker_path.display());
            Err(JournalError::Worker)
        });
        let _ = tx.send(LoadEvent::Finished(result));
    });

    LoadHandle {
        path,
        rx,
        cancel,
        finished: false,
    }
}

impl LoadHandle {
    /// Path being loaded.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Requests cancellation. The worker stops at its next batch boundary and
    /// reports [`JournalError::Cancelled`].
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns true if [`cancel`](Self::cancel) was called.
    pub fn cancel_requested(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Returns true once [`LoadEvent::Finished`] has been received.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns the next event without blocking.
    pub fn try_next(&mut self) -> Option<LoadEvent> {
        if self.finished {
            return None;
        }
        match self.rx.try_recv() {
            Ok(event) => Some(self.observe(event)),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => Some(self.disconnected()),
        }
    }

    /// Blocks until the next event. Returns `None` after the load finished.
    pub fn next_event(&mut self) -> Option<LoadEvent> {
        if self.finished {
            return None;
        }
        match self.rx.recv() {
            Ok(event) => Some(self.observe(event)),
            Err(mpsc::RecvError) => Some(self.disconnected()),
        }
    }

    /// Blocks until the load finishes, forwarding progress to `on_progress`.
    pub fn wait<F: FnMut(LoadProgress)>(
        mut self,
        mut on_progress: F,
    ) -> Result<Vec<JournalRecord>, JournalError> {
        while let Some(event) = self.next_event() {
            match event {
                LoadEvent::Progress(progress) => on_progress(progress),
                LoadEvent::Finished(result) => return result,
            }
        }
        Err(JournalError::Worker)
    }

    fn observe(&mut self, event: LoadEvent) -> LoadEvent {
        if matches!(event, LoadEvent::Finished(_)) {
            self.finished = true;
        }
        event
    }

    fn disconnected(&mut self) -> LoadEvent {
        self.finished = true;
        LoadEvent::Finished(Err(JournalError::Worker))
    }
}

impl Drop for LoadHandle {
    fn drop(&mut self) {
        if !self.finished {
            self.cancel.cancel();
        }
    }
}
