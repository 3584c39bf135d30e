// src/model.rs
//! Records as they move through the two pipelines.
//!
//! - `MovieRecord`: one normalized chart row produced by the extractor.
//! - `Snapshot`: one extractor run, immutable once written.
//! - `HistoricalRecord`: a row read back from any snapshot, tagged with its
//!   capture time. Title may be missing here; persisted data is untrusted.
//! - `AggregatedPoint` / `TopTitleSet`: derived per call, never persisted.

use serde::Serialize;

use crate::core::normalize;
use crate::store::StoredRow;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MovieRecord {
    pub title: String,
    pub year: Option<String>,
    pub duration: Option<String>,
    pub age_rating: Option<String>,
    pub score: Option<f64>,
    pub vote_count: Option<f64>,
    pub link: Option<String>,
    #[serde(rename = "PosterURL")]
    pub poster_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    /// ISO-8601, also embedded in the snapshot's file name
    pub captured_at: String,
    pub records: Vec<MovieRecord>,
}

impl Snapshot {
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HistoricalRecord {
    pub captured_at: String,
    pub title: Option<String>,
    pub year: Option<String>,
    pub duration: Option<String>,
    pub age_rating: Option<String>,
    pub score: Option<f64>,
    pub vote_count: Option<f64>,
    pub link: Option<String>,
    #[serde(rename = "PosterURL")]
    pub poster_url: Option<String>,
}

impl HistoricalRecord {
    /// Normalize every cell of a stored row. Safe on rows that were already
    /// normalized at write time.
    pub fn from_stored(captured_at: &str, row: &StoredRow) -> Self {
        Self {
            captured_at: s!(captured_at),
            title: normalize::opt_text(row.title.as_deref()),
            year: normalize::opt_text(row.year.as_deref()),
            duration: normalize::opt_text(row.duration.as_deref()),
            age_rating: normalize::opt_text(row.age_rating.as_deref()),
            score: normalize::opt_score(row.score.as_deref()),
            vote_count: normalize::opt_vote_count(row.vote_count.as_deref()),
            link: normalize::opt_text(row.link.as_deref()),
            poster_url: normalize::opt_text(row.poster_url.as_deref()),
        }
    }
}

/// Mean score / vote count of one title at one capture time.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AggregatedPoint {
    pub title: String,
    pub captured_at: String,
    pub mean_score: Option<f64>,
    pub mean_vote_count: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TitleCount {
    pub title: String,
    /// Number of distinct snapshots the title appears in
    pub appearances: usize,
}

/// Titles ranked by reappearance, best first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TopTitleSet {
    pub ranked: Vec<TitleCount>,
}

impl TopTitleSet {
    pub fn contains(&self, title: &str) -> bool {
        self.ranked.iter().any(|t| t.title == title)
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.ranked.iter().map(|t| t.title.as_str())
    }

    pub fn len(&self) -> usize { self.ranked.len() }
    pub fn is_empty(&self) -> bool { self.ranked.is_empty() }
}
