// src/error.rs
//! Error types for both pipelines.
//!
//! Run-level failures are `ExtractError` / `AggregateError`; per-item parse
//! problems are `ItemError` and never leave the extraction loop.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal extraction failures. Nothing is written when one of these surfaces.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Headless browser could not be started
    #[error("rendering session unavailable: {0}")]
    Session(String),

    /// Navigation to the chart page failed
    #[error("page load failed for {url}: {reason}")]
    PageLoad { url: String, reason: String },

    /// Rendered document could not be read back from the session
    #[error("could not read rendered page: {0}")]
    Render(String),

    /// A built-in CSS selector failed to compile
    #[error("invalid selector `{css}`: {reason}")]
    Selector { css: &'static str, reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Why a single list item was skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemError {
    #[error("item has no title")]
    MissingTitle,

    #[error("item structure mismatch: {0}")]
    Structure(String),
}

/// Snapshot storage failures.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed snapshot {}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    /// Two runs landed on the same timestamp; the second one loses.
    #[error("snapshot already exists: {}", .0.display())]
    Exists(PathBuf),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io { path: path.into(), source }
    }
}

/// Aggregation / read-side failures.
#[derive(Error, Debug)]
pub enum AggregateError {
    /// No snapshot exists at all. Distinct from "snapshots exist but nothing survived filtering".
    #[error("no data: no snapshots available")]
    NoData,

    #[error("latest snapshot {0} contains no rows")]
    EmptySnapshot(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AggregateError {
    pub fn is_no_data(&self) -> bool {
        matches!(self, AggregateError::NoData)
    }
}
