// src/progress.rs
/// Lightweight progress reporting for an extraction run.
/// Frontends (CLI) implement this to surface status to users.
pub trait Progress {
    /// Called once the chart rows are located, with how many will be parsed.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One chart row became a record. `index` is 0-based document order.
    fn item_done(&mut self, _index: usize, _title: &str) {}

    /// One chart row was skipped.
    fn item_failed(&mut self, _index: usize, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
