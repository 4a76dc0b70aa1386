//! HTTP API for the Delivery Ranking Engine.
//!
//! Exposes the stateless `/calculate` endpoint plus the upload and leaderboard
//! endpoints backed by a [`ShiftStore`](crate::store::ShiftStore).

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculateRequest, RankingPageQuery, SearchQuery, UploadQuery};
pub use response::{ApiError, ApiErrorResponse, RankingPage, RecomputeResponse};
pub use state::AppState;
