// tests/extract_e2e.rs
use std::cell::Cell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use movie_trends::config::ExtractOptions;
use movie_trends::config::consts::MAX_ITEMS;
use movie_trends::error::ExtractError;
use movie_trends::model::HistoricalRecord;
use movie_trends::progress::Progress;
use movie_trends::render::{RenderSession, Renderer, StaticRenderer};
use movie_trends::scrape;
use movie_trends::store::{HEADERS, SnapshotStore};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/moviemeter.html")
}

fn store_in(dir: &tempfile::TempDir) -> SnapshotStore {
    SnapshotStore::new(dir.path().join("scraped_data"))
}

fn visible_files(store: &SnapshotStore) -> Vec<String> {
    match fs::read_dir(store.dir()) {
        Ok(rd) => rd.filter_map(|e| e.ok()).map(|e| e.file_name().to_string_lossy().into_owned()).collect(),
        Err(_) => Vec::new(),
    }
}

/* ---------------- scripted renderer ---------------- */

#[derive(Clone, Copy, PartialEq)]
enum Fail {
    Never,
    Load,
    Content,
}

/// Serves `pages` in order (last one repeats) and records what happened to its session.
struct Scripted {
    pages: Vec<String>,
    fail: Fail,
    released: Rc<Cell<bool>>,
    reads: Rc<Cell<usize>>,
}

impl Scripted {
    fn new(pages: Vec<String>, fail: Fail) -> Self {
        Self { pages, fail, released: Rc::default(), reads: Rc::default() }
    }
}

struct ScriptedSession {
    pages: Vec<String>,
    fail: Fail,
    released: Rc<Cell<bool>>,
    reads: Rc<Cell<usize>>,
}

impl Renderer for Scripted {
    type Session = ScriptedSession;

    fn launch(&self, _opts: &ExtractOptions) -> Result<ScriptedSession, ExtractError> {
        Ok(ScriptedSession {
            pages: self.pages.clone(),
            fail: self.fail,
            released: self.released.clone(),
            reads: self.reads.clone(),
        })
    }
}

impl RenderSession for ScriptedSession {
    fn load(&mut self, url: &str) -> Result<(), ExtractError> {
        if self.fail == Fail::Load {
            return Err(ExtractError::PageLoad { url: url.to_string(), reason: "net::ERR_TIMED_OUT".into() });
        }
        Ok(())
    }

    fn content(&mut self) -> Result<String, ExtractError> {
        if self.fail == Fail::Content {
            return Err(ExtractError::Render("target closed".into()));
        }
        let i = self.reads.get();
        self.reads.set(i + 1);
        Ok(self.pages.get(i).or(self.pages.last()).cloned().unwrap_or_default())
    }
}

impl Drop for ScriptedSession {
    fn drop(&mut self) {
        self.released.set(true);
    }
}

fn chart(n: usize) -> String {
    let rows: String = (0..n)
        .map(|i| {
            format!(
                r#"<li class="ipc-metadata-list-summary-item"><a class="ipc-title-link-wrapper" href="/title/tt{i}/"><h3>Movie {i}</h3></a></li>"#
            )
        })
        .collect();
    format!("<html><body><ul>{rows}</ul></body></html>")
}

/* ---------------- progress recorder ---------------- */

#[derive(Default)]
struct Recorder {
    total: Option<usize>,
    done: Vec<String>,
    failed: Vec<usize>,
    finished: usize,
    log: Vec<String>,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) { self.total = Some(total); }
    fn log(&mut self, msg: &str) { self.log.push(msg.to_string()); }
    fn item_done(&mut self, _index: usize, title: &str) { self.done.push(title.to_string()); }
    fn item_failed(&mut self, index: usize, _reason: &str) { self.failed.push(index); }
    fn finish(&mut self) { self.finished += 1; }
}

/* ---------------- tests ---------------- */

#[test]
fn fixture_page_becomes_one_snapshot() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(&tmp);
    let renderer = StaticRenderer::from_file(&fixture()).unwrap();

    let out = scrape::run(&renderer, &ExtractOptions::offline(), &store, None).unwrap();

    // 12 rows on the page, first 10 considered, 2 of those unusable
    assert_eq!(out.snapshot.len(), 8);
    assert_eq!(out.skipped, 2);
    assert!(out.snapshot.len() <= MAX_ITEMS);

    let titles: Vec<_> = out.snapshot.records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles[0], "Sinners");
    assert_eq!(titles[7], "A Minecraft Movie");
    assert!(!titles.contains(&"No Anchor Here"));
    assert!(!titles.iter().any(|t| t.starts_with("Overflow")));

    let sources = store.list().unwrap();
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].captured_at, out.snapshot.captured_at);
    assert_eq!(sources[0].path, out.path);

    let name = out.path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("imdb_popular_movies_"));
    assert!(name.ends_with(".csv"));
    assert_eq!(visible_files(&store), vec![name]);
}

#[test]
fn persisted_rows_are_normalized() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(&tmp);
    let renderer = StaticRenderer::from_file(&fixture()).unwrap();
    let out = scrape::run(&renderer, &ExtractOptions::offline(), &store, None).unwrap();

    let text = fs::read_to_string(&out.path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(HEADERS.join(",").as_str()));
    assert!(text.contains("\"Crouching Tiger, Hidden Dragon\",2000,2h,PG-13,7.9,280000,"));
    assert!(!text.contains("N/A"));
    assert!(!text.contains("1.2M"));

    let rows = store.read(&store.list().unwrap()[0]).unwrap();
    let back: Vec<_> = rows.iter().map(|r| HistoricalRecord::from_stored(&out.snapshot.captured_at, r)).collect();
    assert_eq!(back.len(), out.snapshot.len());

    let mi = &back[1];
    assert_eq!(mi.title.as_deref(), Some("Mission: Impossible - The Final Reckoning"));
    assert_eq!(mi.score, Some(7.5));
    assert_eq!(mi.vote_count, Some(1_200_000.0));
    assert_eq!(mi.link.as_deref(), Some("https://www.imdb.com/title/tt9603208/?ref_=chtmvm_t_2"));

    let thunderbolts = back.iter().find(|r| r.title.as_deref() == Some("Thunderbolts*")).unwrap();
    assert_eq!((thunderbolts.score, thunderbolts.vote_count), (None, None));
    assert_eq!(thunderbolts.duration, None);
    assert_eq!(thunderbolts.year.as_deref(), Some("2025"));

    let accountant = back.iter().find(|r| r.title.as_deref() == Some("The Accountant 2")).unwrap();
    assert_eq!(accountant.vote_count, Some(48_731.0));

    let unrated = back.iter().find(|r| r.title.as_deref() == Some("Untitled Monster Sequel")).unwrap();
    assert_eq!((unrated.score, unrated.poster_url.as_deref()), (None, None));
}

#[test]
fn empty_chart_still_writes_a_snapshot() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(&tmp);
    let renderer = StaticRenderer::new("<html><body><ul></ul></body></html>");

    let out = scrape::run(&renderer, &ExtractOptions::offline(), &store, None).unwrap();
    assert!(out.snapshot.is_empty());
    assert_eq!(out.skipped, 0);

    let text = fs::read_to_string(&out.path).unwrap();
    assert_eq!(text.trim_end(), HEADERS.join(","));
    assert!(store.read(&store.list().unwrap()[0]).unwrap().is_empty());
}

#[test]
fn load_failure_releases_session_and_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(&tmp);
    let renderer = Scripted::new(vec![chart(10)], Fail::Load);

    let err = scrape::run(&renderer, &ExtractOptions::offline(), &store, None).unwrap_err();
    assert!(matches!(err, ExtractError::PageLoad { .. }), "{err}");
    assert!(renderer.released.get());
    assert!(store.list().unwrap().is_empty());
    assert!(visible_files(&store).is_empty());
}

#[test]
fn render_failure_releases_session_and_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(&tmp);
    let renderer = Scripted::new(vec![chart(10)], Fail::Content);
    let mut progress = Recorder::default();

    let err = scrape::run(&renderer, &ExtractOptions::offline(), &store, Some(&mut progress)).unwrap_err();
    assert!(matches!(err, ExtractError::Render(_)), "{err}");
    assert!(renderer.released.get());
    assert!(visible_files(&store).is_empty());
    assert_eq!(progress.finished, 1);
}

#[test]
fn readiness_poll_rereads_until_chart_is_full() {
    let renderer = Scripted::new(vec![chart(3), chart(6), chart(12)], Fail::Never);
    let opts = ExtractOptions { readiness_retries: 5, ..ExtractOptions::offline() };

    let got = scrape::collect(&renderer, &opts, None).unwrap();
    assert_eq!(got.records.len(), MAX_ITEMS);
    assert_eq!(renderer.reads.get(), 3);
    assert!(renderer.released.get());
}

#[test]
fn readiness_poll_is_bounded() {
    let renderer = Scripted::new(vec![chart(4)], Fail::Never);
    let opts = ExtractOptions { readiness_retries: 2, ..ExtractOptions::offline() };

    let got = scrape::collect(&renderer, &opts, None).unwrap();
    assert_eq!(got.records.len(), 4);
    assert_eq!(renderer.reads.get(), 3);
}

#[test]
fn progress_sees_every_row() {
    let renderer = StaticRenderer::from_file(&fixture()).unwrap();
    let mut progress = Recorder::default();

    let got = scrape::collect(&renderer, &ExtractOptions::offline(), Some(&mut progress)).unwrap();
    assert_eq!(progress.total, Some(MAX_ITEMS));
    assert_eq!(progress.done.len(), got.records.len());
    assert_eq!(progress.failed, vec![2, 7]);
    assert_eq!(got.failures.iter().map(|(i, _)| *i).collect::<Vec<_>>(), vec![2, 7]);
    assert!(!progress.log.is_empty());
}

#[test]
fn chart_where_every_row_fails_writes_an_empty_snapshot() {
    let tmp = tempfile::tempdir().unwrap();
    let store = store_in(&tmp);
    // first four rows lack the title link, the last two lack the h3
    let rows: String = (0..6)
        .map(|i| {
            if i < 4 {
                format!(r#"<li class="ipc-metadata-list-summary-item"><h3>Orphan {i}</h3></li>"#)
            } else {
                r#"<li class="ipc-metadata-list-summary-item"><a class="ipc-title-link-wrapper" href="/t"></a></li>"#.to_string()
            }
        })
        .collect();
    let renderer = StaticRenderer::new(format!("<html><body><ul>{rows}</ul></body></html>"));

    let out = scrape::run(&renderer, &ExtractOptions::offline(), &store, None).unwrap();
    assert!(out.snapshot.is_empty());
    assert_eq!(out.skipped, 6);

    let text = fs::read_to_string(&out.path).unwrap();
    assert_eq!(text.trim_end(), HEADERS.join(","));
    assert_eq!(store.list().unwrap().len(), 1);
}
