//! Ranking aggregation.
//!
//! Folds finalized shifts into one [`RankingEntry`] per worker and sorts the
//! result into a leaderboard.

use std::cmp::Ordering;
use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::{AuditStep, FinalizedShift, RankingEntry, round_percentage};

/// Running totals for one worker while folding shifts.
#[derive(Debug, Default)]
struct WorkerTotals {
    worker_name: String,
    points: u64,
    deliveries: u64,
    shifts: u64,
    online_percentage_sum: Decimal,
    delivery_points: u64,
    online_bonus: u64,
    special_date_bonus: u64,
    daily_goal_bonus: u64,
}

impl WorkerTotals {
    fn add(&mut self, shift: &FinalizedShift) {
        let scored = &shift.scored;
        self.points += u64::from(shift.final_total);
        self.deliveries += u64::from(scored.shift.deliveries());
        self.shifts += 1;
        self.online_percentage_sum = self
            .online_percentage_sum
            .saturating_add(scored.online_percentage);
        self.delivery_points += u64::from(scored.delivery_points);
        self.online_bonus += u64::from(scored.online_bonus);
        self.special_date_bonus += u64::from(scored.special_date_bonus);
        self.daily_goal_bonus += u64::from(shift.daily_goal_bonus);
    }

    fn into_entry(self, worker_id: String) -> RankingEntry {
        // A worker only exists here through at least one shift.
        let average = self.online_percentage_sum / Decimal::from(self.shifts);
        RankingEntry {
            worker_id,
            worker_name: self.worker_name,
            total_points: self.points,
            total_deliveries: self.deliveries,
            total_shifts: self.shifts,
            average_online_percentage: round_percentage(average),
            total_delivery_points: self.delivery_points,
            total_online_bonus: self.online_bonus,
            total_special_date_bonus: self.special_date_bonus,
            total_daily_goal_bonus: self.daily_goal_bonus,
        }
    }
}

/// Leaderboard order: total points descending, then worker identifier ascending.
pub fn ranking_order(a: &RankingEntry, b: &RankingEntry) -> Ordering {
    b.total_points
        .cmp(&a.total_points)
        .then_with(|| a.worker_id.cmp(&b.worker_id))
}

/// The result of aggregating a batch of finalized shifts.
#[derive(Debug, Clone)]
pub struct RankingAggregation {
    /// One entry per worker in leaderboard order.
    pub entries: Vec<RankingEntry>,
    /// The audit step recording this aggregation.
    pub audit_step: AuditStep,
}

/// Aggregates finalized shifts into a sorted leaderboard.
///
/// Input order does not matter. The display name kept for a worker is the
/// first one encountered. Average online percentage is accumulated at full
/// precision and rounded half-up to two decimals on the finished entry.
///
/// # Examples
///
/// ```
/// use delivery_ranking::calculation::{aggregate_ranking, finalize_shifts};
/// use delivery_ranking::models::RawShift;
/// use chrono::NaiveDate;
///
/// let shift = |worker: &str, deliveries: u32| RawShift {
///     worker_id: worker.to_string(),
///     worker_name: worker.to_uppercase(),
///     date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     scheduled_duration: Some("08:00:00".to_string()),
///     online_duration: Some("04:00:00".to_string()),
///     completed_deliveries: Some(deliveries),
///     extra: Default::default(),
/// };
///
/// let finalized = finalize_shifts(vec![shift("a", 5), shift("b", 8), shift("a", 2)]);
/// let ranking = aggregate_ranking(&finalized, 1).entries;
///
/// assert_eq!(ranking[0].worker_id, "b");
/// assert_eq!(ranking[0].total_points, 80);
/// assert_eq!(ranking[1].worker_id, "a");
/// assert_eq!(ranking[1].total_shifts, 2);
/// ```
pub fn aggregate_ranking<'a, I>(shifts: I, step_number: u32) -> RankingAggregation
where
    I: IntoIterator<Item = &'a FinalizedShift>,
{
    let mut totals: HashMap<String, WorkerTotals> = HashMap::new();
    let mut shift_count: u64 = 0;

    for shift in shifts {
        shift_count += 1;
        let worker = totals
            .entry(shift.worker_id().to_string())
            .or_insert_with(|| WorkerTotals {
                worker_name: shift.scored.shift.worker_name.clone(),
                ..WorkerTotals::default()
            });
        worker.add(shift);
    }

    let mut entries: Vec<RankingEntry> = totals
        .into_iter()
        .map(|(worker_id, worker)| worker.into_entry(worker_id))
        .collect();
    entries.sort_by(ranking_order);

    let total_points: u64 = entries.iter().map(|e| e.total_points).sum();
    let leader = entries.first().map(|e| e.worker_id.clone());

    let audit_step = AuditStep {
        step_number,
        rule_id: "ranking_aggregation".to_string(),
        rule_name: "Ranking Aggregation".to_string(),
        subject: "ranking".to_string(),
        input: serde_json::json!({
            "shift_count": shift_count
        }),
        output: serde_json::json!({
            "worker_count": entries.len(),
            "total_points": total_points,
            "leader": leader
        }),
        reasoning: format!(
            "{} shift(s) folded into {} worker total(s), sorted by points descending then worker id",
            shift_count,
            entries.len()
        ),
    };

    RankingAggregation {
        entries,
        audit_step,
    }
}
