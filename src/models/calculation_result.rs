//! Ranking run result models.
//!
//! This module contains the [`RankingRun`] type and the audit structures that
//! record every rule application made while scoring a batch of shifts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{FinalizedShift, RankingEntry};

/// A single step in the audit trace recording a scoring decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
///
/// # Example
///
/// ```
/// use delivery_ranking::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "online_bonus".to_string(),
///     rule_name: "Online Bonus".to_string(),
///     subject: "w_001@2024-12-25".to_string(),
///     input: serde_json::json!({"online_percentage": "93.75"}),
///     output: serde_json::json!({"bonus": 50}),
///     reasoning: "93.75% >= 90% threshold".to_string(),
/// };
/// assert_eq!(step.rule_id, "online_bonus");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// What the rule was applied to (`worker@date` or `ranking`).
    pub subject: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during scoring.
///
/// Warnings flag inputs that were normalised instead of rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Builds the warning emitted when duration text could not be parsed.
    pub fn malformed_duration(subject: &str, field: &str, value: &str) -> Self {
        Self {
            code: "MALFORMED_DURATION".to_string(),
            message: format!(
                "{}: {} '{}' is not HH:MM:SS, treated as 00:00:00",
                subject, field, value
            ),
            severity: "low".to_string(),
        }
    }
}

/// The complete audit trace for a ranking run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of scoring steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during scoring.
    pub warnings: Vec<AuditWarning>,
    /// The total computation duration in microseconds.
    pub duration_us: u64,
}

/// Summary figures for a ranking run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingTotals {
    /// Number of ranked workers.
    pub workers: usize,
    /// Number of shifts scored.
    pub shifts: usize,
    /// Completed deliveries across all shifts.
    pub deliveries: u64,
    /// Points across all shifts.
    pub points: u64,
}

/// The complete result of scoring a batch and building its leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingRun {
    /// Unique identifier for this run.
    pub calculation_id: Uuid,
    /// When the run was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the run.
    pub engine_version: String,
    /// Finalized shifts, in input order.
    pub shifts: Vec<FinalizedShift>,
    /// The leaderboard, highest total first.
    pub ranking: Vec<RankingEntry>,
    /// Aggregated totals for the run.
    pub totals: RankingTotals,
    /// Complete audit trace of scoring decisions.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_duration_warning() {
        let warning = AuditWarning::malformed_duration("w_001@2024-12-25", "duracao_do_periodo", "8h");
        assert_eq!(warning.code, "MALFORMED_DURATION");
        assert!(warning.message.contains("w_001@2024-12-25"));
        assert!(warning.message.contains("'8h'"));
        assert_eq!(warning.severity, "low");
    }

    #[test]
    fn test_audit_trace_serialization() {
        let trace = AuditTrace {
            steps: vec![AuditStep {
                step_number: 1,
                rule_id: "delivery_points".to_string(),
                rule_name: "Delivery Points".to_string(),
                subject: "w_001@2024-12-25".to_string(),
                input: serde_json::json!({"completed_deliveries": 25}),
                output: serde_json::json!({"delivery_points": 250}),
                reasoning: "25 x 10 = 250".to_string(),
            }],
            warnings: vec![],
            duration_us: 42,
        };

        let json = serde_json::to_string(&trace).unwrap();
        let deserialized: AuditTrace = serde_json::from_str(&json).unwrap();
        assert_eq!(trace, deserialized);
    }

    #[test]
    fn test_ranking_run_serialization_has_sections() {
        let run = RankingRun {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: "0.1.0".to_string(),
            shifts: vec![],
            ranking: vec![],
            totals: RankingTotals {
                workers: 0,
                shifts: 0,
                deliveries: 0,
                points: 0,
            },
            audit_trace: AuditTrace {
                steps: vec![],
                warnings: vec![],
                duration_us: 0,
            },
        };

        let value = serde_json::to_value(&run).unwrap();
        assert!(value["calculation_id"].is_string());
        assert!(value["shifts"].is_array());
        assert!(value["ranking"].is_array());
        assert_eq!(value["totals"]["workers"], 0);
        assert_eq!(value["audit_trace"]["duration_us"], 0);
    }
}
