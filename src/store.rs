// src/store.rs
//! Snapshot files on disk.
//!
//! One CSV per extractor run, named `imdb_popular_movies_<ISO-8601>.csv`.
//! Writes go to a hidden temp file first and are hard-linked into place, so a
//! snapshot is either complete or absent and never overwritten. Reads never normalize; they hand
//! back raw cells for the caller to coerce.

use std::{
    fs,
    io::{BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
};

use chrono::Utc;

use crate::config::consts::{SNAPSHOT_EXT, SNAPSHOT_PREFIX, TIMESTAMP_FMT};
use crate::core::normalize::render_decimal;
use crate::csv::{self, column_index, write_row};
use crate::error::StoreError;
use crate::model::{MovieRecord, Snapshot};

/// Column order written by the extractor. Names match existing archives.
pub const HEADERS: [&str; 8] =
    ["Title", "Year", "Duration", "Rating", "IMDbScore", "VoteCount", "Link", "Poster"];

// Accepted spellings per column when reading
const TITLE: &[&str] = &["Title"];
const YEAR: &[&str] = &["Year"];
const DURATION: &[&str] = &["Duration"];
const AGE_RATING: &[&str] = &["Rating", "AgeRating"];
const SCORE: &[&str] = &["IMDbScore", "Score"];
const VOTES: &[&str] = &["VoteCount"];
const LINK: &[&str] = &["Link"];
const POSTER: &[&str] = &["Poster", "PosterURL"];

/// A snapshot file found on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotSource {
    pub captured_at: String,
    pub path: PathBuf,
}

/// Raw cells of one persisted row. `None` means the column is absent from the file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoredRow {
    pub title: Option<String>,
    pub year: Option<String>,
    pub duration: Option<String>,
    pub age_rating: Option<String>,
    pub score: Option<String>,
    pub vote_count: Option<String>,
    pub link: Option<String>,
    pub poster_url: Option<String>,
}

#[derive(Clone, Debug)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, captured_at: &str) -> PathBuf {
        self.dir.join(join!(SNAPSHOT_PREFIX, captured_at, ".", SNAPSHOT_EXT))
    }

    /// Every snapshot in the directory, sorted by file name (chronological for
    /// ISO timestamps). A missing directory is an empty store.
    pub fn list(&self) -> Result<Vec<SnapshotSource>, StoreError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut found = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(|e| StoreError::io(&self.dir, e))? {
            let path = entry.map_err(|e| StoreError::io(&self.dir, e))?.path();
            if !path.is_file() { continue; }

            let Some(name) = path.file_name().and_then(|s| s.to_str()) else { continue };
            if let Some(captured_at) = captured_at_from_name(name) {
                found.push(SnapshotSource { captured_at: s!(captured_at), path });
            }
        }

        found.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
        logd!("store: {} snapshot(s) in {}", found.len(), self.dir.display());
        Ok(found)
    }

    pub fn latest(&self) -> Result<Option<SnapshotSource>, StoreError> {
        Ok(self.list()?.pop())
    }

    /// Persist a snapshot in one step. Never replaces an existing snapshot, even
    /// one created by a concurrent run after the initial check.
    pub fn write(&self, snapshot: &Snapshot) -> Result<PathBuf, StoreError> {
        ensure_directory(&self.dir)?;

        let path = self.path_for(&snapshot.captured_at);
        if path.exists() {
            return Err(StoreError::Exists(path));
        }

        let tmp = self.dir.join(join!(".", SNAPSHOT_PREFIX, &snapshot.captured_at, ".tmp"));
        if let Err(e) = write_csv(&tmp, &snapshot.records) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        publish(&tmp, &path)?;

        logf!("store: wrote {} record(s) to {}", snapshot.len(), path.display());
        Ok(path)
    }

    /// Read raw rows of one snapshot. A file without a header row or without a
    /// `Title` column is malformed.
    pub fn read(&self, source: &SnapshotSource) -> Result<Vec<StoredRow>, StoreError> {
        let text = fs::read_to_string(&source.path).map_err(|e| StoreError::io(&source.path, e))?;
        parse_snapshot(&text).map_err(|reason| StoreError::Malformed {
            path: source.path.clone(),
            reason,
        })
    }
}

/// Timestamp used for a new snapshot's identifier. UTC, so file-name order
/// stays chronological across DST changes.
pub fn timestamp_now() -> String {
    Utc::now().format(TIMESTAMP_FMT).to_string()
}

/// `imdb_popular_movies_2025-01-02T03:04:05.123456.csv` → `2025-01-02T03:04:05.123456`.
/// Any other visible `.csv` file counts too, with its whole stem as the timestamp.
pub fn captured_at_from_name(name: &str) -> Option<&str> {
    if name.starts_with('.') { return None; }
    let stem = name.strip_suffix(SNAPSHOT_EXT)?.strip_suffix('.')?;
    let captured_at = stem.strip_prefix(SNAPSHOT_PREFIX).unwrap_or(stem);
    (!captured_at.is_empty()).then_some(captured_at)
}

fn record_row(r: &MovieRecord) -> Vec<String> {
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();
    vec![
        r.title.clone(),
        opt(&r.year),
        opt(&r.duration),
        opt(&r.age_rating),
        render_decimal(r.score),
        render_decimal(r.vote_count),
        opt(&r.link),
        opt(&r.poster_url),
    ]
}

fn write_csv(path: &Path, records: &[MovieRecord]) -> Result<(), StoreError> {
    let file = fs::File::create(path).map_err(|e| StoreError::io(path, e))?;
    let mut out = BufWriter::new(file);

    write_row(&mut out, &HEADERS).map_err(|e| StoreError::io(path, e))?;
    for r in records {
        write_row(&mut out, &record_row(r)).map_err(|e| StoreError::io(path, e))?;
    }
    out.flush().map_err(|e| StoreError::io(path, e))?;
    Ok(())
}

/// Move a finished temp file to its final name. The temp file is always removed.
fn publish(tmp: &Path, path: &Path) -> Result<(), StoreError> {
    // hard_link fails on an existing target, unlike rename which replaces it.
    let linked = fs::hard_link(tmp, path);
    let _ = fs::remove_file(tmp);
    match linked {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(StoreError::Exists(path.to_path_buf())),
        Err(e) => Err(StoreError::io(path, e)),
    }
}

fn parse_snapshot(text: &str) -> Result<Vec<StoredRow>, String> {
    let mut rows = csv::parse_rows(text).into_iter();
    let header = rows.next().ok_or_else(|| s!("empty file"))?;

    let title = column_index(&header, TITLE).ok_or_else(|| s!("no Title column"))?;
    let year = column_index(&header, YEAR);
    let duration = column_index(&header, DURATION);
    let age_rating = column_index(&header, AGE_RATING);
    let score = column_index(&header, SCORE);
    let votes = column_index(&header, VOTES);
    let link = column_index(&header, LINK);
    let poster = column_index(&header, POSTER);

    fn cell(row: &[String], ix: Option<usize>) -> Option<String> {
        ix.and_then(|i| row.get(i)).cloned()
    }

    Ok(rows
        .map(|row| StoredRow {
            title: cell(&row, Some(title)),
            year: cell(&row, year),
            duration: cell(&row, duration),
            age_rating: cell(&row, age_rating),
            score: cell(&row, score),
            vote_count: cell(&row, votes),
            link: cell(&row, link),
            poster_url: cell(&row, poster),
        })
        .collect())
}

pub fn ensure_directory(dir: &Path) -> Result<(), StoreError> {
    if dir.exists() && !dir.is_dir() {
        return Err(StoreError::io(
            dir,
            std::io::Error::other("path exists but is not a directory"),
        ));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
    }
    Ok(())
}
