//! Request types for the ranking API.

use serde::{Deserialize, Serialize};

use crate::models::RawShift;

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateRequest {
    /// The shifts to score and rank.
    pub shifts: Vec<RawShift>,
}

/// Query string for `POST /uploads`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadQuery {
    /// Overrides the configured replace mode for this upload.
    pub replace: Option<bool>,
}

/// Query string for `GET /ranking`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RankingPageQuery {
    /// Number of entries to skip.
    #[serde(default)]
    pub offset: usize,
    /// Maximum entries to return; capped at the configured page size.
    pub limit: Option<usize>,
}

impl RankingPageQuery {
    /// Resolves the effective page limit against the configured page size.
    ///
    /// # Examples
    ///
    /// ```
    /// use delivery_ranking::api::RankingPageQuery;
    ///
    /// let query = RankingPageQuery { offset: 0, limit: Some(5000) };
    /// assert_eq!(query.effective_limit(1000), 1000);
    ///
    /// let query = RankingPageQuery { offset: 0, limit: None };
    /// assert_eq!(query.effective_limit(1000), 1000);
    /// ```
    pub fn effective_limit(&self, page_size: usize) -> usize {
        self.limit.unwrap_or(page_size).clamp(1, page_size.max(1))
    }
}

/// Query string for `GET /ranking/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    /// Case-insensitive fragment of the worker name.
    #[serde(default)]
    pub q: String,
}
