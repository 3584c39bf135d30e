// src/analysis/aggregate.rs
//! Snapshot aggregation.
//!
//! load every snapshot → tag rows with their capture time → re-normalize →
//! drop rows without title or score → group by (title, captured_at) → rank
//! titles by how many snapshots they appear in → keep the top N.
//!
//! Stateless: every call rereads the whole store.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::PathBuf;

use serde::Serialize;

use crate::config::AggregateOptions;
use crate::error::AggregateError;
use crate::model::{AggregatedPoint, HistoricalRecord, TitleCount, TopTitleSet};
use crate::store::{SnapshotSource, SnapshotStore};

/// A snapshot file that could not be read and was left out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkippedSource {
    pub path: PathBuf,
    pub reason: String,
}

/// Every historical row, in snapshot discovery order.
#[derive(Clone, Debug, Default)]
pub struct UnifiedTable {
    pub rows: Vec<HistoricalRecord>,
    pub snapshots: usize,
    pub skipped: Vec<SkippedSource>,
}

#[derive(Clone, Debug, Serialize)]
pub struct TrendReport {
    pub top: TopTitleSet,
    pub points: Vec<AggregatedPoint>,
    /// Newest capture time among `points`
    pub last_captured: Option<String>,
    pub skipped: Vec<SkippedSource>,
}

/// Load the store and compute the trend report for its top titles.
pub fn trend(store: &SnapshotStore, opts: &AggregateOptions) -> Result<TrendReport, AggregateError> {
    let sources = store.list()?;
    let table = load_unified(store, &sources)?;
    Ok(summarize(table, opts.top_n))
}

/// Read and concatenate the given snapshots. Unreadable files are logged and
/// skipped; an empty source list is `NoData`.
pub fn load_unified(store: &SnapshotStore, sources: &[SnapshotSource]) -> Result<UnifiedTable, AggregateError> {
    if sources.is_empty() {
        return Err(AggregateError::NoData);
    }

    let mut table = UnifiedTable::default();
    for src in sources {
        match store.read(src) {
            Ok(rows) => {
                table.snapshots += 1;
                table
                    .rows
                    .extend(rows.iter().map(|row| HistoricalRecord::from_stored(&src.captured_at, row)));
            }
            Err(e) => {
                loge!("aggregate: skipping {}: {e}", src.path.display());
                table.skipped.push(SkippedSource { path: src.path.clone(), reason: e.to_string() });
            }
        }
    }

    logf!(
        "aggregate: {} row(s) from {} snapshot(s), {} skipped",
        table.rows.len(),
        table.snapshots,
        table.skipped.len()
    );
    Ok(table)
}

pub fn summarize(table: UnifiedTable, top_n: usize) -> TrendReport {
    let usable = usable_rows(&table.rows);
    let top = top_titles(&usable, top_n);
    let points: Vec<AggregatedPoint> = group_points(&usable)
        .into_iter()
        .filter(|p| top.contains(&p.title))
        .collect();
    let last_captured = points.iter().map(|p| p.captured_at.clone()).max();

    TrendReport { top, points, last_captured, skipped: table.skipped }
}

/// Rows with both a title and a score.
pub fn usable_rows(rows: &[HistoricalRecord]) -> Vec<&HistoricalRecord> {
    rows.iter().filter(|r| r.title.is_some() && r.score.is_some()).collect()
}

#[derive(Default)]
struct Mean {
    sum: f64,
    n: usize,
}

impl Mean {
    fn push(&mut self, v: Option<f64>) {
        if let Some(v) = v {
            self.sum += v;
            self.n += 1;
        }
    }

    fn get(&self) -> Option<f64> {
        (self.n > 0).then(|| self.sum / self.n as f64)
    }
}

/// One point per (title, captured_at), sorted by that key. Nulls are left out
/// of the means rather than counted as zero.
pub fn group_points(rows: &[&HistoricalRecord]) -> Vec<AggregatedPoint> {
    let mut groups: BTreeMap<(&str, &str), (Mean, Mean)> = BTreeMap::new();
    for r in rows {
        let Some(title) = r.title.as_deref() else { continue };
        let (score, votes) = groups.entry((title, r.captured_at.as_str())).or_default();
        score.push(r.score);
        votes.push(r.vote_count);
    }

    groups
        .into_iter()
        .map(|((title, captured_at), (score, votes))| AggregatedPoint {
            title: s!(title),
            captured_at: s!(captured_at),
            mean_score: score.get(),
            mean_vote_count: votes.get(),
        })
        .collect()
}

/// Titles ranked by number of distinct capture times they appear at.
/// Ties go to whichever title shows up first in `rows`.
pub fn top_titles(rows: &[&HistoricalRecord], n: usize) -> TopTitleSet {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for r in rows {
        let Some(title) = r.title.as_deref() else { continue };
        if !counts.contains_key(title) {
            order.push(title);
        }
        let count = counts.entry(title).or_insert(0);
        if seen.insert((title, r.captured_at.as_str())) {
            *count += 1;
        }
    }

    // `order` is first-encounter order; a stable sort keeps it for equal counts.
    order.sort_by_key(|t| std::cmp::Reverse(counts[t]));

    TopTitleSet {
        ranked: order
            .into_iter()
            .take(n)
            .map(|t| TitleCount { title: s!(t), appearances: counts[t] })
            .collect(),
    }
}
