//! Core data models for the Delivery Ranking Engine.
//!
//! Shift records are typed per pipeline stage; rankings and run results are
//! defined alongside them.

mod calculation_result;
mod ranking;
mod shift;

pub use calculation_result::{AuditStep, AuditTrace, AuditWarning, RankingRun, RankingTotals};
pub use ranking::RankingEntry;
pub use shift::{FinalizedShift, RawShift, ScoredShift, round_percentage};
