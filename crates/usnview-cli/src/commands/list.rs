//! List command implementation.

use crate::output::{self, Format};
use crate::path;
use clap::Args;
use std::io::{self, Write};
use usnview_journal::{LoadOptions, DEFAULT_PROGRESS_INTERVAL};
use usnview_store::{JournalViewer, PageView, ViewerConfig, DEFAULT_PAGE_SIZE};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Path to the journal dump (IBM866 text)
    pub dump: String,
    /// Only records whose file name contains TERM (case-insensitive)
    #[arg(long, value_name = "TERM")]
    pub search: Option<String>,
    /// Only records in this reason category ("Все" for all)
    #[arg(long, value_name = "NAME")]
    pub category: Option<String>,
    /// 1-based page to show
    #[arg(long)]
    pub page: Option<String>,
    /// Records per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,
    /// Print every matching record instead of one page
    #[arg(long, conflicts_with = "page")]
    pub all: bool,
    /// Output as JSON
    #[arg(long, conflicts_with = "tsv")]
    pub json: bool,
    /// Output as tab-separated rows
    #[arg(long)]
    pub tsv: bool,
    /// Do not draw a progress bar
    #[arg(long)]
    pub no_progress: bool,
    /// Lines between progress updates
    #[arg(long, default_value_t = DEFAULT_PROGRESS_INTERVAL, hide = true)]
    pub progress_interval: usize,
}

impl ListArgs {
    fn format(&self) -> Format {
        if self.json {
            Format::Json
        } else if self.tsv {
            Format::Tsv
        } else {
            Format::Table
        }
    }
}

/// Loads the dump into a fresh viewer, drawing a progress bar unless hidden.
pub fn load_viewer(
    dump: &str,
    config: ViewerConfig,
    hide_progress: bool,
) -> Result<JournalViewer, Box<dyn std::error::Error>> {
    let dump_path =
        path::validate_dump_path(dump).map_err(|e| format!("Invalid dump path: {}", e))?;

    let mut viewer = JournalViewer::new(config)?;
    let bar = output::load_progress_bar(hide_progress);
    let loaded = viewer.load_blocking(&dump_path, |p| bar.set_position(u64::from(p.percent())));
    bar.finish_and_clear();
    let count = loaded?;
    log::debug!("{} records loaded from {}", count, dump_path.display());

    Ok(viewer)
}

pub fn run(args: ListArgs) -> Result<(), Box<dyn std::error::Error>> {
    let format = args.format();
    let config = ViewerConfig {
        page_size: args.page_size,
        load: LoadOptions {
            progress_interval: args.progress_interval,
        },
    };
    let mut viewer = load_viewer(&args.dump, config, args.no_progress || format != Format::Table)?;

    if let Some(term) = &args.search {
        viewer.search(term);
    }
    if let Some(category) = &args.category {
        viewer.filter_by_category(category)?;
    }

    let page = if args.all {
        let filtered = viewer.session().filtered();
        PageView {
            records: filtered.iter().cloned().collect(),
            page: 1,
            total_pages: 1,
            total_records: filtered.len(),
        }
    } else {
        match &args.page {
            Some(page) => viewer.go_to(page)?,
            None => viewer.page_view(),
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    output::write_page(&mut out, &page, format)?;
    out.flush()?;

    Ok(())
}
