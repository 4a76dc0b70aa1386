//! Shift models for each stage of the scoring pipeline.
//!
//! A shift moves through three typed stages: [`RawShift`] as ingested,
//! [`ScoredShift`] once the per-shift rules have run, and [`FinalizedShift`]
//! once the daily-goal bonus has been resolved for its worker and day.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::calculation::parse_calendar_date;

/// One worker's activity during one scheduled period, as ingested.
///
/// Durations are kept in their textual `HH:MM:SS[.fraction]` form; the scorer
/// parses them and treats anything malformed as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawShift {
    /// Identifier of the delivery worker.
    #[serde(rename = "id_da_pessoa_entregadora")]
    pub worker_id: String,
    /// Display name of the delivery worker.
    #[serde(rename = "pessoa_entregadora")]
    pub worker_name: String,
    /// Calendar day of the period. Any time or zone suffix is dropped on input.
    #[serde(
        rename = "data_do_periodo",
        deserialize_with = "deserialize_calendar_date"
    )]
    pub date: NaiveDate,
    /// Scheduled period duration, `HH:MM:SS`.
    #[serde(rename = "duracao_do_periodo", default)]
    pub scheduled_duration: Option<String>,
    /// Absolute time the worker was available, `HH:MM:SS`.
    #[serde(rename = "tempo_disponivel_absoluto", default)]
    pub online_duration: Option<String>,
    /// Completed deliveries. Absent means zero.
    #[serde(rename = "numero_de_corridas_completadas", default)]
    pub completed_deliveries: Option<u32>,
    /// Ingested columns that play no part in scoring.
    #[serde(
        rename = "campos_extras",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub extra: BTreeMap<String, String>,
}

impl RawShift {
    /// Returns the completed delivery count, treating an absent value as zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use delivery_ranking::models::RawShift;
    /// use chrono::NaiveDate;
    ///
    /// let shift = RawShift {
    ///     worker_id: "w1".to_string(),
    ///     worker_name: "Ana".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2024, 12, 25).unwrap(),
    ///     scheduled_duration: Some("08:00:00".to_string()),
    ///     online_duration: Some("07:30:00".to_string()),
    ///     completed_deliveries: None,
    ///     extra: Default::default(),
    /// };
    /// assert_eq!(shift.deliveries(), 0);
    /// ```
    pub fn deliveries(&self) -> u32 {
        self.completed_deliveries.unwrap_or(0)
    }

    /// Returns a short label for logs and audit steps: `worker@date`.
    pub fn subject(&self) -> String {
        format!("{}@{}", self.worker_id, self.date)
    }
}

/// A [`RawShift`] with its per-shift point breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredShift {
    /// The ingested shift.
    #[serde(flatten)]
    pub shift: RawShift,
    /// Online time as a percentage of the scheduled duration, full precision.
    #[serde(
        rename = "percentual_tempo_online",
        serialize_with = "serialize_percentage"
    )]
    pub online_percentage: Decimal,
    /// Completed deliveries times ten.
    #[serde(rename = "pontos_entregas")]
    pub delivery_points: u32,
    /// 50 when online percentage reached 90, otherwise 0.
    #[serde(rename = "bonus_90_online")]
    pub online_bonus: u32,
    /// 50 on a special date when the online bonus applied, otherwise 0.
    #[serde(rename = "bonus_data_especial")]
    pub special_date_bonus: u32,
    /// Sum of the three components above.
    #[serde(rename = "total_pontos_turno")]
    pub shift_total: u32,
}

/// A [`ScoredShift`] after the daily-goal bonus has been resolved.
///
/// Within one worker+day group only the representative shift carries a
/// non-zero `daily_goal_bonus`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalizedShift {
    /// The scored shift.
    #[serde(flatten)]
    pub scored: ScoredShift,
    /// Completed deliveries across every shift of the same worker and day.
    #[serde(rename = "entregas_no_dia")]
    pub deliveries_that_day: u32,
    /// Daily-goal bonus attached to this shift (0, 200 or 300).
    #[serde(rename = "bonus_meta_diaria")]
    pub daily_goal_bonus: u32,
    /// Shift total plus the daily-goal bonus carried by this shift.
    #[serde(rename = "total_pontos_final")]
    pub final_total: u32,
}

impl FinalizedShift {
    /// The worker this shift belongs to.
    pub fn worker_id(&self) -> &str {
        &self.scored.shift.worker_id
    }

    /// The calendar day of this shift.
    pub fn date(&self) -> NaiveDate {
        self.scored.shift.date
    }
}

/// Rounds a percentage to two decimal places, midpoint away from zero.
///
/// # Examples
///
/// ```
/// use delivery_ranking::models::round_percentage;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_percentage(Decimal::from_str("66.665").unwrap()), Decimal::from_str("66.67").unwrap());
/// assert_eq!(round_percentage(Decimal::from_str("33.3333").unwrap()), Decimal::from_str("33.33").unwrap());
/// ```
pub fn round_percentage(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn serialize_percentage<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    Serialize::serialize(&round_percentage(*value), serializer)
}

fn deserialize_calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_calendar_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid calendar date '{}'", raw)))
}
