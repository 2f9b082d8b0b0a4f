// src/progress.rs
use crate::data::SearchOutcome;

/// Progress reporting for batch searches. Frontends implement this to surface
/// status to users; every method has a no-op default.
pub trait Progress {
    /// Called at the start with the number of queries.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One query finished. `index` is its position in the request; completion
    /// order is not input order.
    fn item_done(&mut self, _index: usize, _outcome: &SearchOutcome) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
