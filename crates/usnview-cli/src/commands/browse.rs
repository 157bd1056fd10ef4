//! Browse command: a line-oriented session over one dump.

use crate::commands::list::load_viewer;
use crate::output::{self, Format};
use crate::path;
use clap::Args;
use std::io::{self, BufRead, Write};
use usnview_journal::LoadOptions;
use usnview_store::{CategoryFilter, JournalViewer, ViewerConfig, DEFAULT_PAGE_SIZE};

const HELP: &str = "\
commands:
  n               next page
  p               previous page
  g <N>           go to page N
  s [TERM]        search file names (no TERM clears the search)
  c <NAME>        filter by category (c Все for all)
  y <N>           print row N of this page as tab-separated text
  z <N>           show N records per page
  l <PATH>        load another dump
  r               reload the current dump
  h               this help
  q               quit";

#[derive(Args, Debug)]
pub struct BrowseArgs {
    /// Path to the journal dump (IBM866 text)
    pub dump: String,
    /// Records per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,
    /// Do not draw progress bars
    #[arg(long)]
    pub no_progress: bool,
}

pub fn run(args: BrowseArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = ViewerConfig {
        page_size: args.page_size,
        load: LoadOptions::default(),
    };
    let mut viewer = load_viewer(&args.dump, config, args.no_progress)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&mut viewer, stdin.lock(), stdout.lock(), args.no_progress)
}

/// What the session loop should do after a command.
enum Step {
    Show,
    Print(String),
    Quit,
}

fn run_session<R: BufRead, W: Write>(
    viewer: &mut JournalViewer,
    input: R,
    mut out: W,
    no_progress: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    output::write_page(&mut out, &viewer.page_view(), Format::Table)?;
    writeln!(out, "{}", categories_line())?;
    prompt(&mut out)?;

    for line in input.lines() {
        let line = line?;
        match execute(viewer, line.trim(), no_progress) {
            Ok(Step::Quit) => break,
            Ok(Step::Show) => {
                output::write_page(&mut out, &viewer.page_view(), Format::Table)?;
            }
            Ok(Step::Print(text)) => writeln!(out, "{}", text)?,
            Err(e) => writeln!(out, "Error: {}", e)?,
        }
        prompt(&mut out)?;
    }

    out.flush()?;
    Ok(())
}

fn execute(
    viewer: &mut JournalViewer,
    line: &str,
    no_progress: bool,
) -> Result<Step, Box<dyn std::error::Error>> {
    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (line, ""),
    };

    match command {
        "" => Ok(Step::Show),
        "n" | "next" => {
            viewer.next();
            Ok(Step::Show)
        }
        "p" | "prev" | "previous" => {
            viewer.previous();
            Ok(Step::Show)
        }
        "g" | "goto" => {
            viewer.go_to(arg)?;
            Ok(Step::Show)
        }
        "s" | "search" => {
            let results = viewer.search(arg);
            log::debug!("search {:?} matched {} records", arg, results.len());
            Ok(Step::Show)
        }
        "c" | "category" => {
            let filter: CategoryFilter = if arg.is_empty() {
                CategoryFilter::All
            } else {
                arg.parse()?
            };
            viewer.filter_by_category(filter.name())?;
            Ok(Step::Show)
        }
        "y" | "copy" => copy_row(viewer, arg).map(Step::Print),
        "z" | "size" => {
            let size = arg
                .parse()
                .map_err(|_| format!("enter a page size, got {:?}", arg))?;
            viewer.set_page_size(size)?;
            Ok(Step::Show)
        }
        "l" | "load" => {
            let dump = path::validate_dump_path(arg)?;
            reload(viewer, &dump, no_progress)
        }
        "r" | "reload" => {
            let dump = viewer
                .source()
                .map(|p| p.to_path_buf())
                .ok_or("no dump loaded")?;
            reload(viewer, &dump, no_progress)
        }
        "h" | "help" | "?" => Ok(Step::Print(HELP.to_string())),
        "q" | "quit" | "exit" => Ok(Step::Quit),
        other => Err(format!("unknown command {:?}; type h for help", other).into()),
    }
}

fn reload(
    viewer: &mut JournalViewer,
    dump: &std::path::Path,
    no_progress: bool,
) -> Result<Step, Box<dyn std::error::Error>> {
    let bar = output::load_progress_bar(no_progress);
    let loaded = viewer.load_blocking(dump, |p| bar.set_position(u64::from(p.percent())));
    bar.finish_and_clear();
    loaded?;
    Ok(Step::Show)
}

fn copy_row(viewer: &JournalViewer, arg: &str) -> Result<String, Box<dyn std::error::Error>> {
    let page = viewer.page_view();
    if page.is_empty() {
        return Err("no rows on this page".into());
    }
    let out_of_range = || format!("enter a row number between 1 and {}", page.records.len());
    let row: usize = arg.parse().map_err(|_| out_of_range())?;
    let record = row
        .checked_sub(1)
        .and_then(|idx| page.records.get(idx))
        .ok_or_else(out_of_range)?;
    Ok(output::format_tsv_row(record))
}

fn categories_line() -> String {
    let names: Vec<_> = CategoryFilter::options().map(|c| c.to_string()).collect();
    format!("categories: {}", names.join(", "))
}

fn prompt<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use usnview_store::JournalRecord;

    fn viewer(count: usize) -> JournalViewer {
        let records = (0..count)
            .map(|i| JournalRecord {
                file_name: format!("file-{i:02}.txt"),
                reason: if i % 2 == 0 { 0x8000_0200 } else { 0x0000_0100 },
                ..Default::default()
            })
            .collect();
        JournalViewer::with_records(ViewerConfig::default(), records).unwrap()
    }

    fn run(viewer: &mut JournalViewer, script: &str) -> String {
        let mut out = Vec::new();
        run_session(viewer, script.as_bytes(), &mut out, true).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn navigation_commands_move_pages() {
        let mut v = viewer(25);
        let out = run(&mut v, "n\nn\nn\np\n");
        assert!(out.contains("Page 3 of 3"));
        assert_eq!(v.page_view().page, 2);
    }

    #[test]
    fn goto_errors_are_reported_and_session_continues() {
        let mut v = viewer(25);
        let out = run(&mut v, "g 9\ng x\ng 2\n");
        assert!(out.contains("page number must be between 1 and 3"));
        assert!(out.contains("enter a valid page number"));
        assert_eq!(v.page_view().page, 2);
    }

    #[test]
    fn search_and_category_compose() {
        let mut v = viewer(25);
        run(&mut v, "s FILE-1\nc Удаление\n");
        // file-10..file-19, even indices only.
        assert_eq!(v.page_view().total_records, 5);
        run(&mut v, "c\n");
        assert_eq!(v.page_view().total_records, 10);
        run(&mut v, "s\n");
        assert_eq!(v.page_view().total_records, 25);
    }

    #[test]
    fn copy_prints_tsv_row() {
        let mut v = viewer(3);
        let out = run(&mut v, "y 1\ny 7\n");
        assert!(out.contains("file-00.txt\t\t\tУдаление файла | Закрыть\t"));
        assert!(out.contains("enter a row number between 1 and 3"));
    }

    #[test]
    fn copy_on_empty_page_says_so() {
        let mut v = viewer(3);
        let out = run(&mut v, "s nothing-matches\ny 1\n");
        assert!(out.contains("Error: no rows on this page"));
        assert!(!out.contains("between 1 and 0"));
    }

    #[test]
    fn page_size_command_repaginates() {
        let mut v = viewer(25);
        let out = run(&mut v, "n\nz 5\nz 0\nz x\n");
        assert!(out.contains("Page 1 of 5 (25 records)"));
        assert!(out.contains("invalid page size 0"));
        assert!(out.contains("enter a page size, got \"x\""));
        assert_eq!(v.session().page_size(), 5);
        assert_eq!(v.page_view().records.len(), 5);
    }

    #[test]
    fn session_lists_categories_and_rejects_unknown() {
        let mut v = viewer(4);
        let out = run(&mut v, "c Прочее\n");
        assert!(out.contains("categories: Все, Удаление, Создание"));
        assert!(out.contains("Error: unknown category: \"Прочее\""));
    }

    #[test]
    fn quit_stops_reading() {
        let mut v = viewer(25);
        run(&mut v, "q\nn\n");
        assert_eq!(v.page_view().page, 1);
    }

    #[test]
    fn unknown_command_is_reported() {
        let mut v = viewer(1);
        let out = run(&mut v, "zzz\n");
        assert!(out.contains("unknown command \"zzz\""));
    }
}
