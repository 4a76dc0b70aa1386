//! Special-date bonus.
//!
//! On Dec 24, Dec 25, Dec 31 and Jan 1 a worker who earned the online bonus
//! earns the same amount again.

use chrono::NaiveDate;

use crate::models::AuditStep;

use super::calendar::is_special_date;

/// Points awarded by the special-date bonus.
pub const SPECIAL_DATE_BONUS_POINTS: u32 = 50;

/// The result of evaluating the special-date bonus for a shift.
#[derive(Debug, Clone)]
pub struct SpecialDateBonusResult {
    /// The bonus points (0 or [`SPECIAL_DATE_BONUS_POINTS`]).
    pub bonus: u32,
    /// The audit step recording this decision.
    pub audit_step: AuditStep,
}

/// Awards the special-date bonus.
///
/// The bonus requires both a special date and an online bonus on the same shift.
///
/// # Examples
///
/// ```
/// use delivery_ranking::calculation::calculate_special_date_bonus;
/// use chrono::NaiveDate;
///
/// let christmas = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
/// assert_eq!(calculate_special_date_bonus(christmas, true, "w1@2024-12-25", 3).bonus, 50);
/// assert_eq!(calculate_special_date_bonus(christmas, false, "w1@2024-12-25", 3).bonus, 0);
/// ```
pub fn calculate_special_date_bonus(
    date: NaiveDate,
    online_bonus_applied: bool,
    subject: &str,
    step_number: u32,
) -> SpecialDateBonusResult {
    let special = is_special_date(date);
    let applied = special && online_bonus_applied;
    let bonus = if applied { SPECIAL_DATE_BONUS_POINTS } else { 0 };

    let reasoning = match (special, online_bonus_applied) {
        (true, true) => format!(
            "{} is a special date and the online bonus applied - {} points",
            date, SPECIAL_DATE_BONUS_POINTS
        ),
        (true, false) => format!(
            "{} is a special date but the online bonus did not apply",
            date
        ),
        (false, _) => format!("{} is not a special date", date),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "special_date_bonus".to_string(),
        rule_name: "Special Date Bonus".to_string(),
        subject: subject.to_string(),
        input: serde_json::json!({
            "date": date.to_string(),
            "special_date": special,
            "online_bonus_applied": online_bonus_applied
        }),
        output: serde_json::json!({
            "bonus": bonus,
            "bonus_applied": applied
        }),
        reasoning,
    };

    SpecialDateBonusResult { bonus, audit_step }
}
