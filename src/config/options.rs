// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;
use crate::store::SnapshotStore;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub store_dir: PathBuf,
    pub extract: ExtractOptions,
    pub aggregate: AggregateOptions,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from(STORE_DIR),
            extract: ExtractOptions::default(),
            aggregate: AggregateOptions::default(),
        }
    }
}

impl AppOptions {
    pub fn store(&self) -> SnapshotStore {
        SnapshotStore::new(&self.store_dir)
    }
}

/// How a rendering session is set up and how long we wait for the chart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractOptions {
    pub url: String,
    pub viewport: (u32, u32),
    pub user_agent: String,
    /// Blind wait after navigation
    pub settle_delay: Duration,
    /// Extra reads of the document while fewer than `MAX_ITEMS` rows are present
    pub readiness_retries: u32,
    pub poll_interval: Duration,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            url: s!(PAGE_URL),
            viewport: VIEWPORT,
            user_agent: s!(USER_AGENT),
            settle_delay: ms!(SETTLE_DELAY_MS),
            readiness_retries: READINESS_RETRIES,
            poll_interval: ms!(POLL_INTERVAL_MS),
        }
    }
}

impl ExtractOptions {
    /// No waiting at all. For pre-rendered documents.
    pub fn offline() -> Self {
        Self {
            settle_delay: Duration::ZERO,
            readiness_retries: 0,
            poll_interval: Duration::ZERO,
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregateOptions {
    pub top_n: usize,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self { top_n: TOP_N }
    }
}
