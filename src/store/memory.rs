//! In-process shift store.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::calculation::{aggregate_ranking, finalize_shifts};
use crate::error::{EngineError, EngineResult};
use crate::models::{FinalizedShift, RankingEntry};

use super::ShiftStore;

#[derive(Debug, Default)]
struct StoreState {
    shifts: Vec<FinalizedShift>,
    ranking: Vec<RankingEntry>,
}

/// A [`ShiftStore`] kept in memory behind a read-write lock.
///
/// # Example
///
/// ```
/// use delivery_ranking::store::{InMemoryStore, ShiftStore};
///
/// let store = InMemoryStore::new();
/// assert_eq!(store.shift_count().unwrap(), 0);
/// assert_eq!(store.recompute_ranking().unwrap(), 0);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self, operation: &str) -> EngineResult<RwLockReadGuard<'_, StoreState>> {
        self.state.read().map_err(|_| poisoned(operation))
    }

    fn write(&self, operation: &str) -> EngineResult<RwLockWriteGuard<'_, StoreState>> {
        self.state.write().map_err(|_| poisoned(operation))
    }
}

fn poisoned(operation: &str) -> EngineError {
    EngineError::Store {
        operation: operation.to_string(),
        message: "store lock poisoned".to_string(),
    }
}

impl ShiftStore for InMemoryStore {
    fn insert_shifts(&self, shifts: &[FinalizedShift]) -> EngineResult<()> {
        let mut state = self.write("insert_shifts")?;
        state.shifts.extend_from_slice(shifts);
        debug!(inserted = shifts.len(), stored = state.shifts.len(), "Shifts inserted");
        Ok(())
    }

    fn clear(&self) -> EngineResult<()> {
        let mut state = self.write("clear")?;
        state.shifts.clear();
        state.ranking.clear();
        Ok(())
    }

    fn recompute_ranking(&self) -> EngineResult<usize> {
        let mut state = self.write("recompute_ranking")?;
        let raws = state
            .shifts
            .iter()
            .map(|shift| shift.scored.shift.clone())
            .collect();
        state.shifts = finalize_shifts(raws);
        state.ranking = aggregate_ranking(&state.shifts, 1).entries;
        debug!(
            shifts = state.shifts.len(),
            entries = state.ranking.len(),
            "Ranking recomputed"
        );
        Ok(state.ranking.len())
    }

    fn ranking_page(&self, offset: usize, limit: usize) -> EngineResult<Vec<RankingEntry>> {
        let state = self.read("ranking_page")?;
        Ok(state
            .ranking
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    fn search_ranking(&self, query: &str) -> EngineResult<Vec<RankingEntry>> {
        let state = self.read("search_ranking")?;
        let needle = query.trim().to_lowercase();
        Ok(state
            .ranking
            .iter()
            .filter(|entry| entry.worker_name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    fn shift_count(&self) -> EngineResult<usize> {
        Ok(self.read("shift_count")?.shifts.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::finalize_shifts;
    use crate::models::RawShift;
    use chrono::NaiveDate;

    fn raw(worker: &str, name: &str, deliveries: u32) -> RawShift {
        RawShift {
            worker_id: worker.to_string(),
            worker_name: name.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            scheduled_duration: Some("08:00:00".to_string()),
            online_duration: Some("04:00:00".to_string()),
            completed_deliveries: Some(deliveries),
            extra: Default::default(),
        }
    }

    fn seeded_store() -> InMemoryStore {
        let store = InMemoryStore::new();
        let shifts = finalize_shifts(vec![
            raw("w1", "Ana Souza", 5),
            raw("w2", "Bruno Lima", 9),
            raw("w3", "Mariana Costa", 1),
            raw("w4", "JOANA", 7),
        ]);
        store.insert_shifts(&shifts).unwrap();
        store.recompute_ranking().unwrap();
        store
    }

    /// ST-001: recompute derives the ranking from stored shifts
    #[test]
    fn test_st_001_recompute_from_stored_shifts() {
        let store = seeded_store();
        let page = store.ranking_page(0, 10).unwrap();

        let order: Vec<&str> = page.iter().map(|e| e.worker_id.as_str()).collect();
        assert_eq!(order, vec!["w2", "w4", "w1", "w3"]);
        assert_eq!(store.shift_count().unwrap(), 4);
    }

    /// ST-002: recompute is idempotent
    #[test]
    fn test_st_002_recompute_idempotent() {
        let store = seeded_store();
        let first = store.ranking_page(0, 10).unwrap();
        assert_eq!(store.recompute_ranking().unwrap(), 4);
        assert_eq!(store.ranking_page(0, 10).unwrap(), first);
    }

    /// ST-003: pages are contiguous and the last one is short
    #[test]
    fn test_st_003_pagination() {
        let store = seeded_store();

        let first = store.ranking_page(0, 3).unwrap();
        let second = store.ranking_page(3, 3).unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].worker_id, "w3");
        assert!(store.ranking_page(10, 3).unwrap().is_empty());
    }

    /// ST-004: search is a case-insensitive substring match
    #[test]
    fn test_st_004_search_case_insensitive() {
        let store = seeded_store();

        let hits = store.search_ranking("ANA").unwrap();
        let names: Vec<&str> = hits.iter().map(|e| e.worker_name.as_str()).collect();
        // ranking order: JOANA (70) before Ana Souza (50) before Mariana Costa (10)
        assert_eq!(names, vec!["JOANA", "Ana Souza", "Mariana Costa"]);

        assert!(store.search_ranking("zzz").unwrap().is_empty());
    }

    /// ST-005: clear removes shifts and ranking
    #[test]
    fn test_st_005_clear() {
        let store = seeded_store();
        store.clear().unwrap();

        assert_eq!(store.shift_count().unwrap(), 0);
        assert!(store.ranking_page(0, 10).unwrap().is_empty());
    }

    /// ST-006: recompute resolves the daily goal across separately inserted batches
    #[test]
    fn test_st_006_goal_resolved_across_inserts() {
        let store = InMemoryStore::new();
        store
            .insert_shifts(&finalize_shifts(vec![raw("w1", "Ana", 25)]))
            .unwrap();
        store
            .insert_shifts(&finalize_shifts(vec![raw("w1", "Ana", 25)]))
            .unwrap();
        store.recompute_ranking().unwrap();

        let shifts = store.state.read().unwrap().shifts.clone();
        let bonuses: Vec<u32> = shifts.iter().map(|s| s.daily_goal_bonus).collect();
        assert_eq!(bonuses, vec![300, 0]);
        assert!(shifts.iter().all(|s| s.deliveries_that_day == 50));

        let entry = &store.ranking_page(0, 10).unwrap()[0];
        assert_eq!(entry.total_daily_goal_bonus, 300);
        assert_eq!(entry.total_points, 250 + 250 + 300);
    }

    #[test]
    fn test_insert_without_recompute_leaves_ranking_stale() {
        let store = InMemoryStore::new();
        store
            .insert_shifts(&finalize_shifts(vec![raw("w1", "Ana", 3)]))
            .unwrap();

        assert!(store.ranking_page(0, 10).unwrap().is_empty());
        assert_eq!(store.recompute_ranking().unwrap(), 1);
    }

    #[test]
    fn test_store_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InMemoryStore>();
    }
}
