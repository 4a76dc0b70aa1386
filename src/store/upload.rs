//! Batched upload of finalized shifts and paginated ranking reads.

use serde::Serialize;
use tracing::{info, warn};

use crate::calculation::finalize_shifts;
use crate::config::UploadConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{RankingEntry, RawShift};

use super::ShiftStore;

/// Outcome of a completed upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadSummary {
    /// Number of finalized shifts written to the store.
    pub shifts_inserted: usize,
    /// Number of insert batches issued.
    pub batches: usize,
    /// Number of leaderboard entries after the recompute.
    pub ranking_entries: usize,
    /// Whether previously stored shifts were cleared first.
    pub replaced: bool,
}

/// Finalizes `shifts`, writes them to `store` in batches and recomputes the
/// leaderboard once.
///
/// With `config.replace` set, the store is cleared before the first batch.
/// A failing batch aborts the upload with
/// [`EngineError::UploadBatchFailed`] and the leaderboard is not recomputed.
///
/// # Example
///
/// ```
/// use delivery_ranking::config::UploadConfig;
/// use delivery_ranking::models::RawShift;
/// use delivery_ranking::store::{InMemoryStore, ShiftStore, upload_shifts};
/// use chrono::NaiveDate;
///
/// let shift = RawShift {
///     worker_id: "w1".to_string(),
///     worker_name: "Ana".to_string(),
///     date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     scheduled_duration: Some("08:00:00".to_string()),
///     online_duration: Some("08:00:00".to_string()),
///     completed_deliveries: Some(3),
///     extra: Default::default(),
/// };
///
/// let store = InMemoryStore::new();
/// let summary = upload_shifts(&store, vec![shift], &UploadConfig::default()).unwrap();
/// assert_eq!(summary.shifts_inserted, 1);
/// assert_eq!(store.ranking_page(0, 10).unwrap()[0].total_points, 80);
/// ```
pub fn upload_shifts(
    store: &dyn ShiftStore,
    shifts: Vec<RawShift>,
    config: &UploadConfig,
) -> EngineResult<UploadSummary> {
    let finalized = finalize_shifts(shifts);
    let batch_size = config.batch_size.max(1);

    if config.replace {
        store.clear()?;
        info!("Stored shifts cleared before upload");
    }

    let mut batches = 0;
    for (index, chunk) in finalized.chunks(batch_size).enumerate() {
        let batch = index + 1;
        store.insert_shifts(chunk).map_err(|e| {
            warn!(batch, error = %e, "Upload batch failed");
            EngineError::UploadBatchFailed {
                batch,
                message: e.to_string(),
            }
        })?;
        batches = batch;
        info!(batch, shifts = chunk.len(), "Upload batch inserted");
    }

    let ranking_entries = store.recompute_ranking()?;
    info!(
        shifts = finalized.len(),
        batches, ranking_entries, "Upload complete"
    );

    Ok(UploadSummary {
        shifts_inserted: finalized.len(),
        batches,
        ranking_entries,
        replaced: config.replace,
    })
}

/// Reads the whole leaderboard page by page.
///
/// Stops at the first page shorter than `page_size`.
pub fn fetch_full_ranking(
    store: &dyn ShiftStore,
    page_size: usize,
) -> EngineResult<Vec<RankingEntry>> {
    let page_size = page_size.max(1);
    let mut entries = Vec::new();

    loop {
        let page = store.ranking_page(entries.len(), page_size)?;
        let done = page.len() < page_size;
        entries.extend(page);
        if done {
            return Ok(entries);
        }
    }
}
