//! Shift storage.
//!
//! The ranking service persists finalized shifts and the derived leaderboard
//! through the [`ShiftStore`] capability. Handlers and the upload pipeline
//! receive the store explicitly (as `Arc<dyn ShiftStore>` or `&dyn ShiftStore`)
//! rather than reaching for a global client.

mod memory;
mod upload;

pub use memory::InMemoryStore;
pub use upload::{UploadSummary, fetch_full_ranking, upload_shifts};

use crate::error::EngineResult;
use crate::models::{FinalizedShift, RankingEntry};

/// Persistence for finalized shifts and the leaderboard derived from them.
///
/// Implementations surface their own failures as
/// [`EngineError::Store`](crate::error::EngineError::Store).
pub trait ShiftStore: Send + Sync {
    /// Appends a batch of finalized shifts.
    fn insert_shifts(&self, shifts: &[FinalizedShift]) -> EngineResult<()>;

    /// Removes every stored shift and the leaderboard derived from them.
    fn clear(&self) -> EngineResult<()>;

    /// Rebuilds the leaderboard from the stored shifts only.
    ///
    /// The daily-goal bonus is resolved again over every stored shift, so
    /// shifts of one worker and day inserted by different uploads share a
    /// single bonus carried by the first one stored.
    ///
    /// Idempotent: calling it twice without inserts in between yields the same
    /// leaderboard. Returns the number of ranking entries.
    fn recompute_ranking(&self) -> EngineResult<usize>;

    /// Reads one page of the leaderboard, in ranking order.
    ///
    /// A page shorter than `limit` means there is no more data.
    fn ranking_page(&self, offset: usize, limit: usize) -> EngineResult<Vec<RankingEntry>>;

    /// Case-insensitive substring search on the worker display name, in
    /// ranking order.
    fn search_ranking(&self, query: &str) -> EngineResult<Vec<RankingEntry>>;

    /// Number of stored shifts.
    fn shift_count(&self) -> EngineResult<usize>;
}
