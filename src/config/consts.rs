// src/config/consts.rs

// Source page
pub const PAGE_URL: &str = "https://www.imdb.com/chart/moviemeter/";
pub const VIEWPORT: (u32, u32) = (1920, 1080);
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
(KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";

// The chart renders more rows than we keep; this cap is part of the snapshot contract.
pub const MAX_ITEMS: usize = 10;

// Rendering
pub const SETTLE_DELAY_MS: u64 = 3_000;
pub const READINESS_RETRIES: u32 = 0; // 0 = single blind wait
pub const POLL_INTERVAL_MS: u64 = 500;

// Snapshot store
pub const STORE_DIR: &str = "scraped_data";
pub const SNAPSHOT_PREFIX: &str = "imdb_popular_movies_";
pub const SNAPSHOT_EXT: &str = "csv";
pub const STORE_SEP: char = ',';
pub const TIMESTAMP_FMT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

// Aggregation
pub const TOP_N: usize = 5;
