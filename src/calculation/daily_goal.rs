//! Daily-goal bonus resolution.
//!
//! The bonus is computed once per worker+day group from the day's total
//! deliveries and attached to the group's representative shift only. Every
//! other member of the group finalizes with a zero bonus.

use crate::models::{AuditStep, FinalizedShift};

use super::daily_grouping::DailyGroup;

/// Daily delivery thresholds and their bonuses, highest first.
pub const DAILY_GOAL_TIERS: [(u32, u32); 2] = [(30, 300), (20, 200)];

/// Returns the daily-goal bonus earned by a day's total deliveries.
///
/// # Examples
///
/// ```
/// use delivery_ranking::calculation::daily_goal_bonus;
///
/// assert_eq!(daily_goal_bonus(19), 0);
/// assert_eq!(daily_goal_bonus(20), 200);
/// assert_eq!(daily_goal_bonus(29), 200);
/// assert_eq!(daily_goal_bonus(30), 300);
/// ```
pub fn daily_goal_bonus(deliveries_that_day: u32) -> u32 {
    DAILY_GOAL_TIERS
        .iter()
        .find(|(threshold, _)| deliveries_that_day >= *threshold)
        .map_or(0, |(_, bonus)| *bonus)
}

/// The result of resolving the daily-goal bonus for one group.
#[derive(Debug, Clone)]
pub struct DailyGoalResult {
    /// Finalized members paired with their input position, in group order.
    pub shifts: Vec<(usize, FinalizedShift)>,
    /// Total deliveries across the group.
    pub deliveries_that_day: u32,
    /// The bonus awarded to the group (carried by the representative).
    pub bonus: u32,
    /// The audit step recording this decision.
    pub audit_step: AuditStep,
}

/// Resolves the daily-goal bonus for a worker+day group.
///
/// # Examples
///
/// ```
/// use delivery_ranking::calculation::{group_by_worker_day, resolve_daily_goal, score_shift};
/// use delivery_ranking::models::RawShift;
/// use chrono::NaiveDate;
///
/// let shift = |deliveries: u32| RawShift {
///     worker_id: "w1".to_string(),
///     worker_name: "Ana".to_string(),
///     date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     scheduled_duration: None,
///     online_duration: None,
///     completed_deliveries: Some(deliveries),
///     extra: Default::default(),
/// };
///
/// let scored = vec![score_shift(shift(12), 1).scored, score_shift(shift(10), 1).scored];
/// let group = group_by_worker_day(scored).remove(0);
///
/// let result = resolve_daily_goal(group, 1);
/// assert_eq!(result.bonus, 200);
/// assert_eq!(result.shifts[0].1.daily_goal_bonus, 200);
/// assert_eq!(result.shifts[1].1.daily_goal_bonus, 0);
/// ```
pub fn resolve_daily_goal(group: DailyGroup, step_number: u32) -> DailyGoalResult {
    let deliveries_that_day = group.total_deliveries();
    let bonus = daily_goal_bonus(deliveries_that_day);
    let subject = group.subject();
    let member_count = group.members.len();
    let representative = group.representative;
    let representative_position = group.members[representative].position;

    let shifts = group
        .members
        .into_iter()
        .enumerate()
        .map(|(index, member)| {
            let carried = if index == representative { bonus } else { 0 };
            let final_total = member.shift.shift_total.saturating_add(carried);
            (
                member.position,
                FinalizedShift {
                    scored: member.shift,
                    deliveries_that_day,
                    daily_goal_bonus: carried,
                    final_total,
                },
            )
        })
        .collect();

    let reasoning = if bonus > 0 {
        format!(
            "{} deliveries across {} shift(s) - {} points on the first shift of the day",
            deliveries_that_day, member_count, bonus
        )
    } else {
        format!(
            "{} deliveries across {} shift(s) - below the {} delivery goal",
            deliveries_that_day,
            member_count,
            DAILY_GOAL_TIERS[DAILY_GOAL_TIERS.len() - 1].0
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "daily_goal_bonus".to_string(),
        rule_name: "Daily Goal Bonus".to_string(),
        subject,
        input: serde_json::json!({
            "deliveries_that_day": deliveries_that_day,
            "shift_count": member_count
        }),
        output: serde_json::json!({
            "bonus": bonus,
            "recipient_position": representative_position
        }),
        reasoning,
    };

    DailyGoalResult {
        shifts,
        deliveries_that_day,
        bonus,
        audit_step,
    }
}
