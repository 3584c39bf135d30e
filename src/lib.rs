// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod analysis;
pub mod config;
pub mod core;
pub mod csv;
pub mod error;
pub mod model;
pub mod progress;
pub mod render;
pub mod scrape;
pub mod specs;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{AggregateError, ExtractError, ItemError, StoreError};
pub use model::{AggregatedPoint, HistoricalRecord, MovieRecord, Snapshot, TopTitleSet};
pub use store::SnapshotStore;
