//! Online time percentage and the online bonus.
//!
//! A worker who stays available for at least 90% of the scheduled period earns
//! a flat online bonus for that shift.

use rust_decimal::Decimal;

use crate::models::AuditStep;

/// Online percentage at or above which the online bonus is paid.
pub const ONLINE_BONUS_THRESHOLD: Decimal = Decimal::from_parts(90, 0, 0, false, 0);

/// Points awarded by the online bonus.
pub const ONLINE_BONUS_POINTS: u32 = 50;

/// The result of computing the online percentage for a shift.
#[derive(Debug, Clone)]
pub struct OnlinePercentageResult {
    /// Online time as a percentage of the scheduled duration, full precision.
    pub percentage: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes online time as a percentage of the scheduled duration.
///
/// A zero scheduled duration yields 0%, whatever the online duration. A ratio
/// too large to represent also yields 0%.
///
/// # Examples
///
/// ```
/// use delivery_ranking::calculation::calculate_online_percentage;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// // 07:30:00 online out of 08:00:00 scheduled
/// let online = Decimal::from(27_000);
/// let scheduled = Decimal::from(28_800);
/// let result = calculate_online_percentage(online, scheduled, "w1@2024-12-25", 1);
/// assert_eq!(result.percentage, Decimal::from_str("93.75").unwrap());
///
/// let result = calculate_online_percentage(Decimal::from(3_600), Decimal::ZERO, "w1@2024-12-25", 1);
/// assert_eq!(result.percentage, Decimal::ZERO);
/// ```
pub fn calculate_online_percentage(
    online_seconds: Decimal,
    scheduled_seconds: Decimal,
    subject: &str,
    step_number: u32,
) -> OnlinePercentageResult {
    let ratio = online_seconds
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(scheduled_seconds));
    let (percentage, reasoning) = if scheduled_seconds <= Decimal::ZERO {
        (
            Decimal::ZERO,
            "Scheduled duration is zero - online percentage is 0%".to_string(),
        )
    } else if let Some(ratio) = ratio {
        let percentage = ratio.max(Decimal::ZERO);
        let reasoning = format!(
            "{}s / {}s x 100 = {}%",
            online_seconds.normalize(),
            scheduled_seconds.normalize(),
            percentage.normalize()
        );
        (percentage, reasoning)
    } else {
        (
            Decimal::ZERO,
            "Online/scheduled ratio is out of range - online percentage is 0%".to_string(),
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "online_percentage".to_string(),
        rule_name: "Online Percentage".to_string(),
        subject: subject.to_string(),
        input: serde_json::json!({
            "online_seconds": online_seconds.normalize().to_string(),
            "scheduled_seconds": scheduled_seconds.normalize().to_string()
        }),
        output: serde_json::json!({
            "online_percentage": percentage.normalize().to_string()
        }),
        reasoning,
    };

    OnlinePercentageResult {
        percentage,
        audit_step,
    }
}

/// The result of evaluating the online bonus for a shift.
#[derive(Debug, Clone)]
pub struct OnlineBonusResult {
    /// The bonus points (0 or [`ONLINE_BONUS_POINTS`]).
    pub bonus: u32,
    /// The audit step recording this decision.
    pub audit_step: AuditStep,
}

impl OnlineBonusResult {
    /// Returns true if the bonus was awarded.
    pub fn applied(&self) -> bool {
        self.bonus > 0
    }
}

/// Awards the online bonus when the percentage reaches the threshold.
///
/// The threshold is inclusive: exactly 90% earns the bonus, 89.999% does not.
///
/// # Examples
///
/// ```
/// use delivery_ranking::calculation::calculate_online_bonus;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = calculate_online_bonus(Decimal::from(90), "w1@2024-03-10", 2);
/// assert_eq!(result.bonus, 50);
///
/// let result = calculate_online_bonus(Decimal::from_str("89.999").unwrap(), "w1@2024-03-10", 2);
/// assert_eq!(result.bonus, 0);
/// ```
pub fn calculate_online_bonus(
    percentage: Decimal,
    subject: &str,
    step_number: u32,
) -> OnlineBonusResult {
    let applied = percentage >= ONLINE_BONUS_THRESHOLD;
    let bonus = if applied { ONLINE_BONUS_POINTS } else { 0 };

    let reasoning = if applied {
        format!(
            "{}% >= {}% threshold - {} points",
            percentage.normalize(),
            ONLINE_BONUS_THRESHOLD,
            ONLINE_BONUS_POINTS
        )
    } else {
        format!(
            "{}% below {}% threshold - no online bonus",
            percentage.normalize(),
            ONLINE_BONUS_THRESHOLD
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "online_bonus".to_string(),
        rule_name: "Online Bonus".to_string(),
        subject: subject.to_string(),
        input: serde_json::json!({
            "online_percentage": percentage.normalize().to_string(),
            "threshold": ONLINE_BONUS_THRESHOLD.to_string()
        }),
        output: serde_json::json!({
            "bonus": bonus,
            "bonus_applied": applied
        }),
        reasoning,
    };

    OnlineBonusResult { bonus, audit_step }
}
