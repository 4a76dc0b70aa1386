//! Spreadsheet ingestion.
//!
//! Reads shift spreadsheets exported as CSV into [`RawShift`](crate::models::RawShift)
//! records, mapping loosely-named headers onto the canonical shift fields.
//! Schema problems (missing columns, unreadable dates) are reported here so
//! that the scoring engine only ever sees well-formed records.

mod columns;
mod parser;

pub use columns::{
    COMPLETED_DELIVERIES, ONLINE_DURATION, PERIOD_DATE, REQUIRED_COLUMNS, SCHEDULED_DURATION,
    WORKER_ID, WORKER_NAME, normalize_header,
};
pub use parser::parse_shifts_csv;
