//! Leaderboard entry model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregate points for one delivery worker.
///
/// Entries are rebuilt from scratch on every ranking computation and have no
/// identity beyond `worker_id`.
///
/// # Example
///
/// ```
/// use delivery_ranking::models::RankingEntry;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let entry = RankingEntry {
///     worker_id: "w_001".to_string(),
///     worker_name: "Maria Souza".to_string(),
///     total_points: 550,
///     total_deliveries: 25,
///     total_shifts: 1,
///     average_online_percentage: Decimal::from_str("93.75").unwrap(),
///     total_delivery_points: 250,
///     total_online_bonus: 50,
///     total_special_date_bonus: 50,
///     total_daily_goal_bonus: 200,
/// };
/// assert_eq!(entry.total_points, 550);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    /// Identifier of the delivery worker.
    #[serde(rename = "id_da_pessoa_entregadora")]
    pub worker_id: String,
    /// Display name (first one seen for the worker).
    #[serde(rename = "pessoa_entregadora")]
    pub worker_name: String,
    /// Sum of `total_pontos_final` across the worker's shifts.
    #[serde(rename = "total_pontos")]
    pub total_points: u64,
    /// Sum of completed deliveries.
    #[serde(rename = "total_entregas")]
    pub total_deliveries: u64,
    /// Number of shifts.
    #[serde(rename = "total_turnos")]
    pub total_shifts: u64,
    /// Mean online percentage across shifts, rounded to 2 decimal places.
    #[serde(rename = "media_percentual_online")]
    pub average_online_percentage: Decimal,
    /// Sum of delivery points.
    #[serde(rename = "total_pontos_entregas", default)]
    pub total_delivery_points: u64,
    /// Sum of online bonuses.
    #[serde(rename = "total_bonus_online", default)]
    pub total_online_bonus: u64,
    /// Sum of special-date bonuses.
    #[serde(rename = "total_bonus_data_especial", default)]
    pub total_special_date_bonus: u64,
    /// Sum of daily-goal bonuses.
    #[serde(rename = "total_bonus_meta", default)]
    pub total_daily_goal_bonus: u64,
}
