//! Scoring engine for the Delivery Ranking Engine.
//!
//! This module contains the pure computation that turns shift records into
//! points: duration parsing, calendar-day handling, the online and special-date
//! bonuses, delivery points, per-day grouping with the once-per-day goal bonus,
//! and the ranking aggregation. Nothing in here performs I/O or fails; degenerate
//! inputs are normalised.

mod calendar;
mod daily_goal;
mod daily_grouping;
mod duration;
mod online_bonus;
mod pipeline;
mod ranking;
mod shift_score;
mod special_date_bonus;

pub use calendar::{SPECIAL_DATES, is_special_date, parse_calendar_date};
pub use daily_goal::{DAILY_GOAL_TIERS, DailyGoalResult, daily_goal_bonus, resolve_daily_goal};
pub use daily_grouping::{DailyGroup, GroupMember, group_by_worker_day};
pub use duration::{
    DurationValue, MAX_DURATION_SECONDS, MAX_FRACTION_DIGITS, parse_duration_seconds,
};
pub use online_bonus::{
    ONLINE_BONUS_POINTS, ONLINE_BONUS_THRESHOLD, OnlineBonusResult, OnlinePercentageResult,
    calculate_online_bonus, calculate_online_percentage,
};
pub use pipeline::{build_ranking, finalize_shifts};
pub use ranking::{RankingAggregation, aggregate_ranking, ranking_order};
pub use shift_score::{
    DeliveryPointsResult, POINTS_PER_DELIVERY, ShiftScoreResult, calculate_delivery_points,
    score_shift,
};
pub use special_date_bonus::{
    SPECIAL_DATE_BONUS_POINTS, SpecialDateBonusResult, calculate_special_date_bonus,
};
