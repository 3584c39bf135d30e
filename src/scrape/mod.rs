// src/scrape/mod.rs
mod extract;

pub use extract::{collect, run, ExtractOutcome, Extraction};
