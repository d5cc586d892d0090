//! Pagination utilities for list endpoints.
//!
//! Listing uses offset-style `skip`/`limit` query parameters:
//!
//! - `skip`: number of rows to skip from the beginning (default: 0)
//! - `limit`: maximum number of rows to return (1-100, default: 10)
//!
//! # Example
//!
//! ```ignore
//! use unidad_core::pagination::{PaginationParams, Page};
//!
//! async fn list_cursos(
//!     Query(params): Query<PaginationParams>,
//! ) -> Result<Json<Page<Curso>>, AppError> {
//!     let data = repo.read_all(params.skip(), params.limit()).await?;
//!     let total = repo.count().await?;
//!     Ok(Json(Page::new(data, total, &params)))
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Deserializes an optional string into an optional i64.
///
/// Handles the case where query parameters may be empty strings,
/// which should be treated as `None`.
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Metadata about a paginated response.
///
/// ```json
/// {
///   "data": [...],
///   "meta": { "total": 42, "skip": 10, "limit": 10, "has_more": true }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Total number of rows in the table
    pub total: i64,
    /// Rows skipped before this page
    pub skip: i64,
    /// Maximum rows per page (the limit that was applied)
    pub limit: i64,
    /// Whether there are more rows after this page
    pub has_more: bool,
}

/// Query parameters for `GET /{entity}`.
///
/// `limit` is clamped to [1, 100] and `skip` to a minimum of 0.
#[derive(Debug, Clone, Default, Hash, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Number of rows to skip (default: 0)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[param(value_type = Option<i64>)]
    pub skip: Option<i64>,
    /// Maximum number of rows to return (1-100, default: 10)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[param(value_type = Option<i64>)]
    pub limit: Option<i64>,
}

impl PaginationParams {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self {
            skip: Some(skip),
            limit: Some(limit),
        }
    }

    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    #[must_use]
    pub fn skip(&self) -> i64 {
        self.skip.unwrap_or(0).max(0)
    }
}

/// One page of rows plus its [`PaginationMeta`].
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, total: i64, params: &PaginationParams) -> Self {
        let skip = params.skip();
        let limit = params.limit();
        Self {
            data,
            meta: PaginationMeta {
                total,
                skip,
                limit,
                has_more: skip.saturating_add(limit) < total,
            },
        }
    }
}
