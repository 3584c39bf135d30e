// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! Page-specific scraping specifications. Each spec focuses on a single page
//! and encodes *where the ground truth lives in the rendered HTML* and *how to
//! extract it robustly*.
//!
//! ## What lives here
//! - **Pure HTML parsing** of an already-rendered document.
//! - **Selector choice** per field, and which fields are required vs optional.
//! - **Tolerant extraction**: a missing optional element yields null, a missing
//!   required one fails that row only (`Result` per row).
//! - **Field normalization** on the way out (`core::normalize`).
//!
//! ## What does **not** live here
//! - **Browser sessions / waiting** – `render` and `scrape::extract`.
//! - **Persistence** – `store`.
//! - **Aggregation** – `analysis`.
//!
//! ## Typical call chain
//! ```text
//! CLI → scrape::run → render::Renderer (DOM) → specs::<page>::parse_page()
//!                                          ↘  Vec<Result<MovieRecord, ItemError>>
//!                     store::SnapshotStore::write (outside of specs)
//! ```
//!
//! ## Testing notes
//! - Specs are testable **offline** against captured fixtures (saved HTML).
pub mod moviemeter;
