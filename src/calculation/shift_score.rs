//! Per-shift scoring.
//!
//! Turns a [`RawShift`] into a [`ScoredShift`] by applying, in order, the online
//! percentage, online bonus, special-date bonus and delivery points rules.

use crate::models::{AuditStep, AuditWarning, RawShift, ScoredShift};

use super::duration::DurationValue;
use super::online_bonus::{calculate_online_bonus, calculate_online_percentage};
use super::special_date_bonus::calculate_special_date_bonus;

/// Points earned per completed delivery.
pub const POINTS_PER_DELIVERY: u32 = 10;

/// The result of computing delivery points for a shift.
#[derive(Debug, Clone)]
pub struct DeliveryPointsResult {
    /// Completed deliveries times [`POINTS_PER_DELIVERY`].
    pub points: u32,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the points earned from completed deliveries.
///
/// # Examples
///
/// ```
/// use delivery_ranking::calculation::calculate_delivery_points;
///
/// assert_eq!(calculate_delivery_points(25, "w1@2024-12-25", 4).points, 250);
/// ```
pub fn calculate_delivery_points(
    completed_deliveries: u32,
    subject: &str,
    step_number: u32,
) -> DeliveryPointsResult {
    let points = completed_deliveries.saturating_mul(POINTS_PER_DELIVERY);

    let audit_step = AuditStep {
        step_number,
        rule_id: "delivery_points".to_string(),
        rule_name: "Delivery Points".to_string(),
        subject: subject.to_string(),
        input: serde_json::json!({
            "completed_deliveries": completed_deliveries,
            "points_per_delivery": POINTS_PER_DELIVERY
        }),
        output: serde_json::json!({
            "delivery_points": points
        }),
        reasoning: format!(
            "{} deliveries x {} = {} points",
            completed_deliveries, POINTS_PER_DELIVERY, points
        ),
    };

    DeliveryPointsResult { points, audit_step }
}

/// The result of scoring one shift.
#[derive(Debug, Clone)]
pub struct ShiftScoreResult {
    /// The scored shift.
    pub scored: ScoredShift,
    /// One audit step per rule, numbered from the given step.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings for duration fields that had to be treated as zero.
    pub warnings: Vec<AuditWarning>,
}

/// Scores a single shift.
///
/// Missing or malformed durations count as zero seconds and never fail the
/// shift; malformed (non-blank) text is reported as a warning.
///
/// # Arguments
///
/// * `shift` - The ingested shift
/// * `step_number` - The step number of the first audit step produced
///
/// # Examples
///
/// ```
/// use delivery_ranking::calculation::score_shift;
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
/// let result = score_shift(shift, 1);
/// assert_eq!(result.scored.delivery_points, 250);
/// assert_eq!(result.scored.online_bonus, 50);
/// assert_eq!(result.scored.special_date_bonus, 50);
/// assert_eq!(result.scored.shift_total, 350);
/// assert_eq!(result.audit_steps.len(), 4);
/// ```
pub fn score_shift(shift: RawShift, step_number: u32) -> ShiftScoreResult {
    let subject = shift.subject();
    let mut warnings = Vec::new();

    let scheduled = DurationValue::read(shift.scheduled_duration.as_deref());
    let online = DurationValue::read(shift.online_duration.as_deref());
    for (field, value, text) in [
        ("duracao_do_periodo", scheduled, &shift.scheduled_duration),
        ("tempo_disponivel_absoluto", online, &shift.online_duration),
    ] {
        if let (DurationValue::Malformed, Some(text)) = (value, text) {
            warnings.push(AuditWarning::malformed_duration(&subject, field, text));
        }
    }

    let percentage_result =
        calculate_online_percentage(online.seconds(), scheduled.seconds(), &subject, step_number);
    let online_result =
        calculate_online_bonus(percentage_result.percentage, &subject, step_number + 1);
    let special_result = calculate_special_date_bonus(
        shift.date,
        online_result.applied(),
        &subject,
        step_number + 2,
    );
    let delivery_result = calculate_delivery_points(shift.deliveries(), &subject, step_number + 3);

    let shift_total = delivery_result
        .points
        .saturating_add(online_result.bonus)
        .saturating_add(special_result.bonus);

    let scored = ScoredShift {
        shift,
        online_percentage: percentage_result.percentage,
        delivery_points: delivery_result.points,
        online_bonus: online_result.bonus,
        special_date_bonus: special_result.bonus,
        shift_total,
    };

    ShiftScoreResult {
        scored,
        audit_steps: vec![
            percentage_result.audit_step,
            online_result.audit_step,
            special_result.audit_step,
            delivery_result.audit_step,
        ],
        warnings,
    }
}
