//! End-to-end scoring pipeline.
//!
//! Runs the stages in order: score every shift, group by worker and day,
//! resolve the daily-goal bonus per group, then aggregate the leaderboard.

use std::time::Instant;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::models::{
    AuditStep, AuditTrace, AuditWarning, FinalizedShift, RankingRun, RankingTotals, RawShift,
};

use super::daily_goal::resolve_daily_goal;
use super::daily_grouping::group_by_worker_day;
use super::ranking::aggregate_ranking;
use super::shift_score::score_shift;

struct FinalizedBatch {
    shifts: Vec<FinalizedShift>,
    steps: Vec<AuditStep>,
    warnings: Vec<AuditWarning>,
    next_step: u32,
}

fn finalize_batch(shifts: Vec<RawShift>, first_step: u32) -> FinalizedBatch {
    let mut step_number = first_step;
    let mut steps = Vec::new();
    let mut warnings = Vec::new();

    let mut scored = Vec::with_capacity(shifts.len());
    for shift in shifts {
        let result = score_shift(shift, step_number);
        step_number += result.audit_steps.len() as u32;
        steps.extend(result.audit_steps);
        warnings.extend(result.warnings);
        scored.push(result.scored);
    }

    let mut positioned: Vec<(usize, FinalizedShift)> = Vec::with_capacity(scored.len());
    for group in group_by_worker_day(scored) {
        let result = resolve_daily_goal(group, step_number);
        step_number += 1;
        steps.push(result.audit_step);
        positioned.extend(result.shifts);
    }
    positioned.sort_by_key(|(position, _)| *position);

    FinalizedBatch {
        shifts: positioned.into_iter().map(|(_, shift)| shift).collect(),
        steps,
        warnings,
        next_step: step_number,
    }
}

/// Scores a batch of shifts and resolves their daily-goal bonuses.
///
/// The returned shifts are in the same order as the input.
///
/// # Examples
///
/// ```
/// use delivery_ranking::calculation::finalize_shifts;
/// use delivery_ranking::models::RawShift;
/// use chrono::NaiveDate;
///
/// let shift = |deliveries: u32| RawShift {
///     worker_id: "w1".to_string(),
///     worker_name: "Ana".to_string(),
///     date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     scheduled_duration: Some("08:00:00".to_string()),
///     online_duration: Some("08:00:00".to_string()),
///     completed_deliveries: Some(deliveries),
///     extra: Default::default(),
/// };
///
/// let finalized = finalize_shifts(vec![shift(10), shift(15), shift(6)]);
/// let bonuses: Vec<u32> = finalized.iter().map(|s| s.daily_goal_bonus).collect();
/// assert_eq!(bonuses, vec![300, 0, 0]);
/// assert_eq!(finalized[0].final_total, 100 + 50 + 300);
/// ```
pub fn finalize_shifts(shifts: Vec<RawShift>) -> Vec<FinalizedShift> {
    finalize_batch(shifts, 1).shifts
}

/// Scores a batch of shifts and builds its leaderboard with a full audit trace.
///
/// # Examples
///
/// ```
/// use delivery_ranking::calculation::build_ranking;
/// use delivery_ranking::models::RawShift;
/// use chrono::NaiveDate;
///
/// let shift = RawShift {
///     worker_id: "w1".to_string(),
///     worker_name: "Ana".to_string(),
///     date: NaiveDate::from_ymd_opt(2024, 12, 25).unwrap(),
///     scheduled_duration: Some("08:00:00".to_string()),
///     online_duration: Some("07:30:00".to_string()),
///     completed_deliveries: Some(25),
///     extra: Default::default(),
/// };
///
/// let run = build_ranking(vec![shift]);
/// assert_eq!(run.ranking[0].total_points, 350 + 200);
/// assert_eq!(run.totals.shifts, 1);
/// ```
pub fn build_ranking(shifts: Vec<RawShift>) -> RankingRun {
    let start_time = Instant::now();
    let shift_count = shifts.len();

    let batch = finalize_batch(shifts, 1);
    let aggregation = aggregate_ranking(&batch.shifts, batch.next_step);

    let mut steps = batch.steps;
    steps.push(aggregation.audit_step);

    let totals = RankingTotals {
        workers: aggregation.entries.len(),
        shifts: shift_count,
        deliveries: aggregation.entries.iter().map(|e| e.total_deliveries).sum(),
        points: aggregation.entries.iter().map(|e| e.total_points).sum(),
    };

    let duration_us = start_time.elapsed().as_micros() as u64;
    debug!(
        shifts = totals.shifts,
        workers = totals.workers,
        points = totals.points,
        warnings = batch.warnings.len(),
        duration_us,
        "Ranking built"
    );

    RankingRun {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        shifts: batch.shifts,
        ranking: aggregation.entries,
        totals,
        audit_trace: AuditTrace {
            steps,
            warnings: batch.warnings,
            duration_us,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn create_shift(
        worker: &str,
        date: &str,
        scheduled: &str,
        online: &str,
        deliveries: u32,
    ) -> RawShift {
        RawShift {
            worker_id: worker.to_string(),
            worker_name: format!("Worker {}", worker),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            scheduled_duration: Some(scheduled.to_string()),
            online_duration: Some(online.to_string()),
            completed_deliveries: Some(deliveries),
            extra: Default::default(),
        }
    }

    /// PL-001: interleaved workers keep input order and one bonus per day
    #[test]
    fn test_pl_001_interleaved_workers() {
        let shifts = vec![
            create_shift("w1", "2024-03-01", "04:00:00", "04:00:00", 12),
            create_shift("w2", "2024-03-01", "04:00:00", "02:00:00", 25),
            create_shift("w1", "2024-03-01", "04:00:00", "04:00:00", 10),
            create_shift("w1", "2024-03-02", "04:00:00", "04:00:00", 20),
        ];

        let finalized = finalize_shifts(shifts);
        let summary: Vec<(&str, u32, u32)> = finalized
            .iter()
            .map(|s| (s.worker_id(), s.deliveries_that_day, s.daily_goal_bonus))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("w1", 22, 200),
                ("w2", 25, 200),
                ("w1", 22, 0),
                ("w1", 20, 200),
            ]
        );
    }

    /// PL-002: ranking totals equal the sum of final totals
    #[test]
    fn test_pl_002_ranking_matches_final_totals() {
        let shifts = vec![
            create_shift("w1", "2024-12-24", "08:00:00", "07:45:00", 18),
            create_shift("w1", "2024-12-24", "04:00:00", "01:00:00", 7),
            create_shift("w2", "2024-12-24", "08:00:00", "08:00:00", 31),
        ];

        let run = build_ranking(shifts);
        for entry in &run.ranking {
            let expected: u64 = run
                .shifts
                .iter()
                .filter(|s| s.worker_id() == entry.worker_id)
                .map(|s| u64::from(s.final_total))
                .sum();
            assert_eq!(entry.total_points, expected);
        }

        // w2: 310 + 50 + 50 + 300; w1: 180 + 50 + 50 + 200 + 70
        assert_eq!(run.ranking[0].worker_id, "w2");
        assert_eq!(run.ranking[0].total_points, 710);
        assert_eq!(run.ranking[1].worker_id, "w1");
        assert_eq!(run.ranking[1].total_points, 550);
        assert_eq!(run.totals.points, 1260);
        assert_eq!(run.totals.deliveries, 56);
        assert_eq!(run.totals.workers, 2);
    }

    /// PL-003: audit steps are numbered without gaps
    #[test]
    fn test_pl_003_audit_steps_sequential() {
        let shifts = vec![
            create_shift("w1", "2024-03-01", "08:00:00", "08:00:00", 5),
            create_shift("w2", "2024-03-01", "08:00:00", "08:00:00", 5),
        ];

        let run = build_ranking(shifts);
        // 4 per shift, 1 per group, 1 aggregation
        assert_eq!(run.audit_trace.steps.len(), 4 * 2 + 2 + 1);
        for (i, step) in run.audit_trace.steps.iter().enumerate() {
            assert_eq!(step.step_number, i as u32 + 1);
        }
        assert_eq!(
            run.audit_trace.steps.last().unwrap().rule_id,
            "ranking_aggregation"
        );
    }

    /// PL-004: malformed durations surface as warnings, not failures
    #[test]
    fn test_pl_004_warnings_collected() {
        let shifts = vec![create_shift("w1", "2024-03-01", "oito horas", "08:00:00", 5)];

        let run = build_ranking(shifts);
        assert_eq!(run.audit_trace.warnings.len(), 1);
        assert_eq!(run.shifts[0].scored.online_percentage, Decimal::ZERO);
        assert_eq!(run.ranking[0].total_points, 50);
    }

    /// PL-005: extreme but well-formed durations never panic
    #[test]
    fn test_pl_005_extreme_durations_degrade() {
        let shifts = vec![
            create_shift("w1", "2024-03-01", "00:00:00.00000001", "5000000000000000:00:00", 1),
            create_shift("w1", "2024-03-01", "00:00:00.000000001", "1000000:00:00", 1),
        ];

        let run = build_ranking(shifts);
        // the oversized online duration is malformed and counts as zero
        assert_eq!(run.shifts[0].scored.online_percentage, Decimal::ZERO);
        assert_eq!(run.shifts[0].scored.online_bonus, 0);
        assert_eq!(run.audit_trace.warnings.len(), 1);
        assert_eq!(run.shifts[1].scored.online_bonus, 50);
        assert_eq!(run.ranking[0].total_points, 10 + 10 + 50);
    }

    #[test]
    fn test_empty_batch() {
        let run = build_ranking(vec![]);
        assert!(run.shifts.is_empty());
        assert!(run.ranking.is_empty());
        assert_eq!(run.totals.points, 0);
        assert_eq!(run.audit_trace.steps.len(), 1);
    }

    #[test]
    fn test_engine_version_is_crate_version() {
        let run = build_ranking(vec![]);
        assert_eq!(run.engine_version, env!("CARGO_PKG_VERSION"));
    }
}
