// src/scrape/extract.rs
use std::{path::PathBuf, thread};

use crate::{
    config::{consts::MAX_ITEMS, ExtractOptions},
    error::{ExtractError, ItemError},
    model::{MovieRecord, Snapshot},
    progress::Progress,
    render::{RenderSession, Renderer},
    specs::moviemeter,
    store::{self, SnapshotStore},
};

/// Records pulled from one rendered page, before a timestamp is attached.
#[derive(Debug, Default)]
pub struct Extraction {
    pub records: Vec<MovieRecord>,
    /// (row index, reason) for every skipped row
    pub failures: Vec<(usize, ItemError)>,
}

/// Result of a persisted run.
#[derive(Debug)]
pub struct ExtractOutcome {
    pub snapshot: Snapshot,
    pub path: PathBuf,
    pub skipped: usize,
}

/// Full run: render, parse, stamp, persist.
/// Fatal errors leave no file behind; row failures only shrink the snapshot.
pub fn run<R: Renderer>(
    renderer: &R,
    opts: &ExtractOptions,
    store: &SnapshotStore,
    mut progress: Option<&mut dyn Progress>,
) -> Result<ExtractOutcome, ExtractError> {
    let reborrowed = progress.as_mut().map(|p| &mut **p as &mut dyn Progress);
    let result = collect(renderer, opts, reborrowed).and_then(|extraction| {
        // Stamped once, after extraction, before the write.
        let snapshot = Snapshot { captured_at: store::timestamp_now(), records: extraction.records };
        let path = store.write(&snapshot)?;
        Ok(ExtractOutcome { snapshot, path, skipped: extraction.failures.len() })
    });

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    result
}

/// Render the chart and parse it into records, without touching the store.
pub fn collect<R: Renderer>(
    renderer: &R,
    opts: &ExtractOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Extraction, ExtractError> {
    if let Some(p) = progress.as_deref_mut() {
        p.log("Opening rendering session…");
    }
    let html = render(renderer, opts)?;

    let parsed = moviemeter::parse_page(&html, &opts.url)?;
    logf!("extract: {} chart row(s) located", parsed.len());
    if let Some(p) = progress.as_deref_mut() {
        p.begin(parsed.len());
    }

    let mut out = Extraction::default();
    for (i, item) in parsed.into_iter().enumerate() {
        match item {
            Ok(rec) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(i, &rec.title);
                }
                out.records.push(rec);
            }
            Err(e) => {
                loge!("extract: row {i} skipped: {e}");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(i, &e.to_string());
                }
                out.failures.push((i, e));
            }
        }
    }

    logf!("extract: collected {} record(s), skipped {}", out.records.len(), out.failures.len());
    Ok(out)
}

/// Session lives only inside this function; dropping it releases the browser
/// whether we return the document or an error.
fn render<R: Renderer>(renderer: &R, opts: &ExtractOptions) -> Result<String, ExtractError> {
    let mut session = renderer.launch(opts)?;
    session.load(&opts.url)?;

    thread::sleep(opts.settle_delay);
    let mut html = session.content()?;

    let mut attempt = 0;
    while attempt < opts.readiness_retries {
        let seen = moviemeter::count_items(&html)?;
        if seen >= MAX_ITEMS { break; }

        attempt += 1;
        logd!("extract: {seen}/{MAX_ITEMS} rows rendered, poll {attempt}/{}", opts.readiness_retries);
        thread::sleep(opts.poll_interval);
        html = session.content()?;
    }

    Ok(html)
}
