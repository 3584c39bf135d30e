// src/analysis/latest.rs
//! Newest snapshot as a ranked list, for "what is popular right now".
//!
//! Rows without a title or a year are left out. Years that do not parse as
//! integers stay in the list with `year: None`.

use serde::Serialize;

use crate::core::AgeBand;
use crate::error::AggregateError;
use crate::model::HistoricalRecord;
use crate::store::SnapshotStore;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LatestEntry {
    /// 1-based position in the snapshot
    pub rank: usize,
    pub title: String,
    pub year: Option<i32>,
    pub duration: Option<String>,
    pub age_rating: Option<String>,
    pub age_band: AgeBand,
    pub score: Option<f64>,
    pub vote_count: Option<f64>,
    pub link: Option<String>,
    pub poster_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LatestView {
    pub captured_at: String,
    pub entries: Vec<LatestEntry>,
}

pub fn latest(store: &SnapshotStore) -> Result<LatestView, AggregateError> {
    let source = store.latest()?.ok_or(AggregateError::NoData)?;
    let rows = store.read(&source)?;
    if rows.is_empty() {
        return Err(AggregateError::EmptySnapshot(source.captured_at));
    }

    let entries: Vec<LatestEntry> = rows
        .iter()
        .map(|row| HistoricalRecord::from_stored(&source.captured_at, row))
        .filter_map(entry)
        .enumerate()
        .map(|(i, e)| LatestEntry { rank: i + 1, ..e })
        .collect();

    logd!("latest: {} of {} row(s) from {}", entries.len(), rows.len(), source.captured_at);
    Ok(LatestView { captured_at: source.captured_at, entries })
}

fn entry(r: HistoricalRecord) -> Option<LatestEntry> {
    let title = r.title?;
    let year = r.year?;

    Some(LatestEntry {
        rank: 0,
        title,
        year: year.parse().ok(),
        duration: r.duration,
        age_band: AgeBand::classify(r.age_rating.as_deref()),
        age_rating: r.age_rating,
        score: r.score,
        vote_count: r.vote_count,
        link: r.link,
        poster_url: r.poster_url,
    })
}
