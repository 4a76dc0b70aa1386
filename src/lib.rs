//! Delivery Worker Ranking Engine
//!
//! This crate turns per-shift delivery records into point totals and a sorted
//! leaderboard, applying the fixed bonus rules (online time, special dates and the
//! once-per-day delivery goal).

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod store;
pub mod telemetry;
