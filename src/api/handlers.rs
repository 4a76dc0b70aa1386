//! HTTP request handlers for the ranking API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{delete, get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::build_ranking;
use crate::error::EngineResult;
use crate::ingest::parse_shifts_csv;
use crate::models::RankingEntry;
use crate::store::{ShiftStore, UploadSummary, upload_shifts};

use super::request::{CalculateRequest, RankingPageQuery, SearchQuery, UploadQuery};
use super::response::{ApiError, ApiErrorResponse, RankingPage, RecomputeResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/uploads", post(upload_handler))
        .route("/ranking", get(ranking_page_handler))
        .route("/ranking/search", get(search_handler))
        .route("/ranking/recompute", post(recompute_handler))
        .route("/shifts", delete(clear_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Scores the posted shifts and returns the leaderboard with its audit trace.
/// Nothing is stored.
async fn calculate_handler(
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let run = build_ranking(request.shifts);
    info!(
        correlation_id = %correlation_id,
        calculation_id = %run.calculation_id,
        shifts_count = run.totals.shifts,
        workers = run.totals.workers,
        total_points = run.totals.points,
        warnings = run.audit_trace.warnings.len(),
        duration_us = run.audit_trace.duration_us,
        "Calculation completed successfully"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(run),
    )
        .into_response()
}

/// Handler for POST /uploads endpoint.
///
/// Accepts a CSV spreadsheet body, finalizes its shifts and stores them in
/// batches. `?replace=true|false` overrides the configured replace mode.
async fn upload_handler(
    State(state): State<AppState>,
    query: Result<Query<UploadQuery>, QueryRejection>,
    body: Bytes,
) -> Result<Json<UploadSummary>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|rejection| query_error(correlation_id, rejection))?;

    let mut upload = state.config().upload().clone();
    if let Some(replace) = query.replace {
        upload.replace = replace;
    }
    info!(
        correlation_id = %correlation_id,
        bytes = body.len(),
        replace = upload.replace,
        batch_size = upload.batch_size,
        "Processing upload"
    );

    let summary = run_store_task(&state, correlation_id, move |store| {
        let shifts = parse_shifts_csv(body.as_ref())?;
        upload_shifts(store, shifts, &upload)
    })
    .await?;

    info!(
        correlation_id = %correlation_id,
        shifts_inserted = summary.shifts_inserted,
        batches = summary.batches,
        ranking_entries = summary.ranking_entries,
        "Upload completed successfully"
    );
    Ok(Json(summary))
}

/// Handler for GET /ranking endpoint.
///
/// Returns one page of the stored leaderboard. The limit is capped at the
/// configured page size.
async fn ranking_page_handler(
    State(state): State<AppState>,
    query: Result<Query<RankingPageQuery>, QueryRejection>,
) -> Result<Json<RankingPage>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|rejection| query_error(correlation_id, rejection))?;

    let limit = query.effective_limit(state.config().store().page_size);
    let offset = query.offset;
    let entries = run_store_task(&state, correlation_id, move |store| {
        store.ranking_page(offset, limit)
    })
    .await?;
    info!(
        correlation_id = %correlation_id,
        offset = query.offset,
        limit,
        returned = entries.len(),
        "Ranking page served"
    );

    Ok(Json(RankingPage {
        offset: query.offset,
        limit,
        entries,
    }))
}

/// Handler for GET /ranking/search endpoint.
async fn search_handler(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<RankingEntry>>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let Query(query) = query.map_err(|rejection| query_error(correlation_id, rejection))?;

    let needle = query.q.clone();
    let entries = run_store_task(&state, correlation_id, move |store| {
        store.search_ranking(&needle)
    })
    .await?;
    info!(
        correlation_id = %correlation_id,
        query = %query.q,
        matches = entries.len(),
        "Ranking search served"
    );
    Ok(Json(entries))
}

/// Handler for POST /ranking/recompute endpoint.
async fn recompute_handler(
    State(state): State<AppState>,
) -> Result<Json<RecomputeResponse>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let ranking_entries =
        run_store_task(&state, correlation_id, |store| store.recompute_ranking()).await?;
    info!(correlation_id = %correlation_id, ranking_entries, "Ranking recomputed");
    Ok(Json(RecomputeResponse { ranking_entries }))
}

/// Handler for DELETE /shifts endpoint.
async fn clear_handler(State(state): State<AppState>) -> Result<StatusCode, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    run_store_task(&state, correlation_id, |store| store.clear()).await?;
    info!(correlation_id = %correlation_id, "Stored shifts cleared");
    Ok(StatusCode::NO_CONTENT)
}

/// Runs store work on the blocking pool; store calls may hold locks or do I/O.
async fn run_store_task<T, F>(
    state: &AppState,
    correlation_id: Uuid,
    task: F,
) -> Result<T, ApiErrorResponse>
where
    T: Send + 'static,
    F: FnOnce(&dyn ShiftStore) -> EngineResult<T> + Send + 'static,
{
    let store = state.store();
    tokio::task::spawn_blocking(move || task(store.as_ref()))
        .await
        .map_err(|e| ApiErrorResponse::internal(format!("Store task failed: {}", e)))?
        .map_err(|e| {
            warn!(correlation_id = %correlation_id, error = %e, "Store operation failed");
            ApiErrorResponse::from(e)
        })
}

fn query_error(correlation_id: Uuid, rejection: QueryRejection) -> ApiErrorResponse {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Invalid query string"
    );
    ApiErrorResponse::bad_request(ApiError::invalid_query(body_text))
}
