// src/analysis/mod.rs
//! Read side: everything computed from the snapshot store.
//!
//! Nothing here writes to disk or caches between calls.

mod aggregate;
mod latest;

pub use aggregate::{
    group_points, load_unified, summarize, top_titles, trend, usable_rows, SkippedSource, TrendReport,
    UnifiedTable,
};
pub use latest::{latest, LatestEntry, LatestView};
