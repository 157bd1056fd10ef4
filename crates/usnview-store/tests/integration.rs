use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use usnview_journal::{encode_ibm866, parse_str, JournalError};
use usnview_store::{
    filter_by_category, search, CategoryFilter, FilterPipeline, JournalRecord, JournalViewer,
    NameSearch, PageError, RecordList, Session, StoreError, ViewerConfig, ViewerEvent,
};

fn make_record(name: &str, reason: u32) -> JournalRecord {
    JournalRecord {
        file_name: name.to_string(),
        file_id: format!("id-{name}"),
        parent_id: "parent".to_string(),
        reason,
        timestamp: "14.10.2026 09:00:00".to_string(),
    }
}

fn sample_records() -> Vec<JournalRecord> {
    vec![
        make_record("Report.docx", 0x8000_0200),
        make_record("report-final.docx", 0x0000_0100),
        make_record("photo.jpg", 0x8000_0102),
        make_record("~report.tmp", 0x8000_0201),
        make_record("notes.txt", 0x0000_1000),
    ]
}

fn numbered_records(count: usize) -> Vec<JournalRecord> {
    (0..count)
        .map(|i| make_record(&format!("file-{i:02}.txt"), 0x0000_0100))
        .collect()
}

fn dump_text(names_and_reasons: &[(&str, &str)]) -> String {
    names_and_reasons
        .iter()
        .enumerate()
        .map(|(i, (name, reason))| {
            format!("USN: {i}\nИмя файла: {name}\nПричина: {reason}\nМетка времени: 14.10.2026\n")
        })
        .collect()
}

fn write_dump(dir: &TempDir, file: &str, text: &str) -> PathBuf {
    let path = dir.path().join(file);
    fs::write(&path, encode_ibm866(text)).unwrap();
    path
}

#[test]
fn test_empty_search_returns_everything_in_order() {
    let base: RecordList = sample_records().into();
    let results = search(&base, "");
    assert_eq!(results.len(), base.len());
    assert!(results.iter().zip(base.iter()).all(|(a, b)| a == b));
}

#[test]
fn test_search_is_case_insensitive_and_exact_predicate() {
    let base: RecordList = sample_records().into();
    let results = search(&base, "REPORT");

    let names: Vec<_> = results.iter().map(|r| r.file_name.as_str()).collect();
    assert_eq!(names, vec!["Report.docx", "report-final.docx", "~report.tmp"]);

    let expected = base
        .iter()
        .filter(|r| r.file_name.to_lowercase().contains("report"))
        .count();
    assert_eq!(results.len(), expected);
}

#[test]
fn test_category_filter_is_exact_membership_over_search_results() {
    let base: RecordList = sample_records().into();
    let results = search(&base, "report");
    let deletion = CategoryFilter::parse("Удаление").unwrap();

    let filtered = filter_by_category(&results, &deletion);
    // 0x80000201 shares bits with 0x80000200 but is not a member.
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered.get(0).unwrap().file_name, "Report.docx");
    assert!(filtered.iter().all(|r| results.iter().any(|s| s == r)));

    let all = filter_by_category(&results, &CategoryFilter::All);
    assert_eq!(all.len(), results.len());
}

#[test]
fn test_overlapping_categories() {
    let base: RecordList = sample_records().into();
    let everything = search(&base, "");
    let closed = filter_by_category(&everything, &CategoryFilter::parse("Закрыто").unwrap());
    let created = filter_by_category(&everything, &CategoryFilter::parse("Создание").unwrap());

    assert_eq!(closed.len(), 2);
    assert_eq!(created.len(), 2);
    assert!(closed.iter().any(|r| r.file_name == "photo.jpg"));
    assert!(created.iter().any(|r| r.file_name == "photo.jpg"));
}

#[test]
fn test_pipeline_runs_search_then_category() {
    let base: RecordList = sample_records().into();
    let pipeline = FilterPipeline::new(
        NameSearch::new("o"),
        CategoryFilter::parse("Переименование").unwrap(),
    );
    let output = pipeline.apply(&base);
    assert_eq!(output.search_results.len(), 5);
    assert_eq!(output.filtered.len(), 1);
    assert_eq!(output.filtered.get(0).unwrap().file_name, "notes.txt");
}

#[test]
fn test_session_is_immutable() {
    let session = Session::new(numbered_records(25), 10).unwrap();
    let next = session.next();
    assert_eq!(session.current_page(), 0);
    assert_eq!(next.current_page(), 1);

    let searched = next.with_search("file-2");
    assert_eq!(next.filtered().len(), 25);
    assert_eq!(searched.filtered().len(), 5);
    assert_eq!(searched.current_page(), 0);
}

#[test]
fn test_page_size_change_keeps_filters() {
    let session = Session::new(numbered_records(25), 10)
        .unwrap()
        .with_search("file-1")
        .next();
    assert_eq!(session.page_size(), 10);
    assert_eq!(session.total_pages(), 1);

    let resized = session.with_page_size(3).unwrap();
    assert_eq!(resized.page_size(), 3);
    assert_eq!(resized.total_pages(), 4);
    assert_eq!(resized.current_page(), 0);
    assert_eq!(resized.search_term(), "file-1");
    assert_eq!(resized.filtered().len(), 10);
    assert!(matches!(
        session.with_page_size(0),
        Err(StoreError::InvalidPageSize(0))
    ));

    let mut viewer = JournalViewer::with_records(ViewerConfig::default(), numbered_records(25))
        .unwrap();
    viewer.next();
    let page = viewer.set_page_size(5).unwrap();
    assert_eq!(page.page, 1);
    assert_eq!(page.total_pages, 5);
    assert_eq!(page.records.len(), 5);
    assert!(viewer.set_page_size(0).is_err());
    assert_eq!(viewer.session().page_size(), 5);
}

#[test]
fn test_search_resets_category_and_page() {
    let session = Session::new(sample_records(), 2)
        .unwrap()
        .with_category_name("Удаление")
        .unwrap();
    assert_eq!(session.filtered().len(), 1);

    let searched = session.next().with_search("");
    assert_eq!(searched.category(), CategoryFilter::All);
    assert_eq!(searched.filtered().len(), 5);
    assert_eq!(searched.current_page(), 0);
}

#[test]
fn test_category_resets_page_and_keeps_search() {
    let session = Session::new(sample_records(), 1)
        .unwrap()
        .with_search("report")
        .next()
        .next();
    assert_eq!(session.current_page(), 2);

    let filtered = session.with_category_name("Создание").unwrap();
    assert_eq!(filtered.current_page(), 0);
    assert_eq!(filtered.search_term(), "report");
    assert_eq!(filtered.filtered().len(), 1);
    assert_eq!(filtered.search_results().len(), 3);
}

#[test]
fn test_unknown_category_name() {
    let session = Session::new(sample_records(), 10).unwrap();
    let err = session.with_category_name("Архив").unwrap_err();
    assert!(matches!(err, StoreError::UnknownCategory(name) if name == "Архив"));
}

#[test]
fn test_next_then_previous_restores_page() {
    let session = Session::new(numbered_records(35), 10).unwrap();
    // Pages 0..=2 have a following page; page 3 is the last.
    for start in 0..3 {
        let mut s = session.clone();
        for _ in 0..start {
            s = s.next();
        }
        assert_eq!(s.current_page(), start);
        assert_eq!(s.next().previous().current_page(), start);
    }
}

#[test]
fn test_previous_on_first_page_is_noop() {
    let session = Session::new(numbered_records(35), 10).unwrap();
    assert_eq!(session.previous().current_page(), 0);
}

#[test]
fn test_page_view_contents() {
    let session = Session::new(numbered_records(25), 10).unwrap();
    let page = session.go_to("3").unwrap().page_view();
    assert_eq!(page.page, 3);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.total_records, 25);
    assert_eq!(page.records.len(), 5);
    assert_eq!(page.records[0].file_name, "file-20.txt");
}

#[test]
fn test_empty_session_reports_one_page() {
    let session = Session::empty(10).unwrap();
    let page = session.page_view();
    assert!(page.is_empty());
    assert_eq!(page.page, 1);
    assert_eq!(page.total_pages, 1);
    assert_eq!(session.next().current_page(), 0);
    assert!(session.go_to("1").is_ok());
    assert!(matches!(session.go_to("2"), Err(PageError::Range { max: 1, .. })));
}

#[test]
fn test_go_to_errors_leave_page_unchanged() {
    let records = numbered_records(25);
    let mut viewer = JournalViewer::with_records(ViewerConfig::default(), records).unwrap();
    viewer.next();

    let err = viewer.go_to("0").unwrap_err();
    assert!(matches!(
        err,
        StoreError::Page(PageError::Range {
            requested: 0,
            max: 3
        })
    ));
    let err = viewer.go_to("four").unwrap_err();
    assert!(matches!(err, StoreError::Page(PageError::Format { .. })));
    assert_eq!(viewer.page_view().page, 2);
    assert_eq!(err.to_string(), "enter a valid page number, got \"four\"");
}

#[test]
fn test_end_to_end_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let text = dump_text(&[
        ("created.txt", "0x00000100: Создание файла"),
        ("deleted.txt", "0x80000200: Удаление файла | Закрыть"),
        ("renamed.txt", "0x00001000: Переименование: старое имя"),
    ]);
    let path = write_dump(&temp_dir, "usn.txt", &text);

    let mut viewer = JournalViewer::new(ViewerConfig::default()).unwrap();
    let count = viewer.load_blocking(&path, |_| {}).unwrap();
    assert_eq!(count, 3);
    assert_eq!(viewer.source(), Some(path.as_path()));

    let page = viewer.page_view();
    assert_eq!(page.records[0].reason, 0x0000_1000);
    assert_eq!(viewer.describe_reason(0x8000_0200), "Удаление файла | Закрыть");

    let deleted = viewer.filter_by_category("Удаление").unwrap();
    assert_eq!(deleted.len(), 1);
    assert_eq!(deleted.get(0).unwrap().file_name, "deleted.txt");
}

#[test]
fn test_failed_load_keeps_previous_records() {
    let temp_dir = TempDir::new().unwrap();
    let good = write_dump(
        &temp_dir,
        "good.txt",
        &dump_text(&[("a.txt", "0x00000100: x"), ("b.txt", "0x00000100: x")]),
    );
    let bad = write_dump(
        &temp_dir,
        "bad.txt",
        &dump_text(&[("c.txt", "0x00000100: x"), ("d.txt", "ZZ: text")]),
    );

    let mut viewer = JournalViewer::new(ViewerConfig::default()).unwrap();
    viewer.load_blocking(&good, |_| {}).unwrap();
    viewer.search("a");
    let before = viewer.page_view();

    let err = viewer.load_blocking(&bad, |_| {}).unwrap_err();
    assert!(matches!(err, StoreError::Journal(JournalError::Parse { .. })));
    assert!(err.to_string().contains("bad.txt"), "{err}");
    assert_eq!(viewer.page_view(), before);
    assert_eq!(viewer.session().records().len(), 2);
    assert_eq!(viewer.source(), Some(good.as_path()));

    // The viewer accepts a new load after a failure.
    assert!(!viewer.is_loading());
    let missing = temp_dir.path().join("missing.txt");
    let err = viewer.load_blocking(&missing, |_| {}).unwrap_err();
    assert!(matches!(err, StoreError::Journal(JournalError::Io { .. })));
    assert_eq!(viewer.session().records().len(), 2);
}

#[test]
fn test_successful_load_replaces_and_resets() {
    let temp_dir = TempDir::new().unwrap();
    let first = write_dump(&temp_dir, "first.txt", &dump_text(&[("a.txt", "100: x")]));
    let second = write_dump(
        &temp_dir,
        "second.txt",
        &dump_text(&[("b.txt", "100: x"), ("c.txt", "80000200: x")]),
    );

    let mut viewer = JournalViewer::new(ViewerConfig::default()).unwrap();
    viewer.load_blocking(&first, |_| {}).unwrap();
    viewer.search("a");
    viewer.filter_by_category("Создание").unwrap();

    viewer.load_blocking(&second, |_| {}).unwrap();
    assert_eq!(viewer.session().search_term(), "");
    assert_eq!(viewer.session().category(), CategoryFilter::All);
    assert_eq!(viewer.page_view().total_records, 2);
    assert_eq!(viewer.page_view().records[0].file_name, "c.txt");
}

#[test]
fn test_only_one_load_in_flight() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_dump(&temp_dir, "usn.txt", &dump_text(&[("a.txt", "100: x")]));

    let mut viewer = JournalViewer::new(ViewerConfig::default()).unwrap();
    viewer.load(&path).unwrap();
    let err = viewer.load(&path).unwrap_err();
    assert!(matches!(err, StoreError::LoadInProgress { .. }));

    assert_eq!(viewer.wait_for_load(|_| {}).unwrap(), 1);
    assert!(matches!(
        viewer.wait_for_load(|_| {}),
        Err(StoreError::NoLoadInProgress)
    ));
    viewer.load(&path).unwrap();
}

#[test]
fn test_cancelled_load_keeps_previous_records() {
    let temp_dir = TempDir::new().unwrap();
    let first = write_dump(&temp_dir, "first.txt", &dump_text(&[("keep.txt", "100: x")]));
    let big: Vec<(String, &str)> = (0..5000)
        .map(|i| (format!("big-{i}.txt"), "100: x"))
        .collect();
    let big_refs: Vec<(&str, &str)> = big.iter().map(|(n, r)| (n.as_str(), *r)).collect();
    let second = write_dump(&temp_dir, "second.txt", &dump_text(&big_refs));

    let mut viewer = JournalViewer::new(ViewerConfig::default()).unwrap();
    viewer.load_blocking(&first, |_| {}).unwrap();

    viewer.load(&second).unwrap();
    viewer.cancel_load();
    let err = viewer.wait_for_load(|_| {}).unwrap_err();
    assert!(matches!(err, StoreError::Journal(JournalError::Cancelled)));
    assert_eq!(viewer.session().records().len(), 1);
    assert_eq!(viewer.page_view().records[0].file_name, "keep.txt");
}

#[test]
fn test_poll_delivers_progress_before_completion() {
    let temp_dir = TempDir::new().unwrap();
    let names: Vec<String> = (0..300).map(|i| format!("f{i}")).collect();
    let entries: Vec<(&str, &str)> = names.iter().map(|n| (n.as_str(), "100: x")).collect();
    let path = write_dump(&temp_dir, "usn.txt", &dump_text(&entries));

    let mut viewer = JournalViewer::new(ViewerConfig::default()).unwrap();
    viewer.load(&path).unwrap();

    let mut events = Vec::new();
    while viewer.is_loading() {
        events.extend(viewer.poll());
        std::thread::yield_now();
    }

    let (last, rest) = events.split_last().unwrap();
    assert!(matches!(last, ViewerEvent::Loaded { records: 300, .. }));
    assert!(rest.iter().all(|e| matches!(e, ViewerEvent::Progress(_))));
    assert!(viewer.poll().is_empty());
}

#[test]
fn test_parsed_records_feed_session() {
    let records = parse_str("USN: 1\nИмя файла: a\nUSN: 2\nИмя файла: b\n").unwrap();
    let session = Session::new(records, 10).unwrap();
    assert_eq!(session.page_view().records[0].file_name, "b");
}

#[test]
fn test_page_view_serializes() {
    let session = Session::new(sample_records(), 2).unwrap();
    let json = serde_json::to_value(session.page_view()).unwrap();
    assert_eq!(json["page"], 1);
    assert_eq!(json["total_pages"], 3);
    assert_eq!(json["records"][0]["file_name"], "Report.docx");
}
