//! Response types for the ranking API.
//!
//! This module defines the page and recompute bodies plus the error response
//! structures and their mapping from [`EngineError`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::RankingEntry;

/// One page of the leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingPage {
    /// Offset of the first entry.
    pub offset: usize,
    /// Effective page limit after capping.
    pub limit: usize,
    /// Entries in ranking order. Fewer than `limit` means the end was reached.
    pub entries: Vec<RankingEntry>,
}

/// Body returned by `POST /ranking/recompute`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecomputeResponse {
    /// Number of leaderboard entries after the recompute.
    pub ranking_entries: usize,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an invalid query string error response.
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::new("INVALID_QUERY", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Wraps an [`ApiError`] as a 400 Bad Request.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }

    /// Wraps a message as a 500 Internal Server Error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: ApiError::new("INTERNAL_ERROR", message),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details(
                        "CONFIG_ERROR",
                        "Configuration error",
                        message,
                    ),
                }
            }
            EngineError::MissingColumn { column } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "MISSING_COLUMN",
                    message,
                    format!("The spreadsheet header has no '{}' column", column),
                ),
            ),
            EngineError::InvalidRecord { .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_RECORD",
                    message,
                    "The spreadsheet contains a value that could not be read",
                ),
            ),
            EngineError::Csv(_) => {
                ApiErrorResponse::bad_request(ApiError::new("MALFORMED_CSV", message))
            }
            EngineError::Store { .. } => ApiErrorResponse {
                status: StatusCode::SERVICE_UNAVAILABLE,
                error: ApiError::with_details("STORE_ERROR", "Shift store failure", message),
            },
            EngineError::UploadBatchFailed { .. } => ApiErrorResponse {
                status: StatusCode::SERVICE_UNAVAILABLE,
                error: ApiError::with_details(
                    "UPLOAD_FAILED",
                    message,
                    "Earlier batches stay stored; the ranking was not recomputed",
                ),
            },
        }
    }
}
