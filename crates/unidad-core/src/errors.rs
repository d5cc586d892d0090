//! Error types shared by the repositories, the services and the HTTP layer.
//!
//! Three layers of errors exist:
//!
//! - [`StorageError`]: the persistence layer failed. Always names the entity
//!   and the operation that was running.
//! - [`ServiceError`]: a business rule rejected the request, a record was not
//!   found, or a [`StorageError`] bubbled up.
//! - [`AppError`]: the HTTP boundary. Carries a status code and renders as a
//!   `{"detail": "..."}` JSON body.

use std::fmt;

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error as ThisError;

/// Repository operation that produced a [`StorageError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOp {
    Create,
    Read,
    Update,
    Delete,
    Count,
}

impl fmt::Display for StorageOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            StorageOp::Create => "crear",
            StorageOp::Read => "leer",
            StorageOp::Update => "actualizar",
            StorageOp::Delete => "eliminar",
            StorageOp::Count => "contar",
        };
        f.write_str(verb)
    }
}

#[derive(Debug, ThisError)]
pub enum StorageError {
    #[error("Error al {operation} {entity}: {source}")]
    Database {
        entity: &'static str,
        operation: StorageOp,
        #[source]
        source: sqlx::Error,
    },

    /// A UNIQUE constraint rejected the write. Services turn this into
    /// [`ServiceError::Duplicate`] so concurrent inserts that both passed the
    /// pre-check still fail cleanly.
    #[error("{entity} viola la restricción única {constraint}")]
    UniqueViolation {
        entity: &'static str,
        constraint: String,
    },
}

impl StorageError {
    /// Wraps a SQLx error, detecting unique violations.
    pub fn from_sqlx(entity: &'static str, operation: StorageOp, err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err
            && db_err.is_unique_violation()
        {
            return StorageError::UniqueViolation {
                entity,
                constraint: db_err.constraint().unwrap_or("desconocida").to_string(),
            };
        }

        StorageError::Database {
            entity,
            operation,
            source: err,
        }
    }

    pub fn entity(&self) -> &'static str {
        match self {
            StorageError::Database { entity, .. } | StorageError::UniqueViolation { entity, .. } => {
                entity
            }
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(self, StorageError::UniqueViolation { .. })
    }
}

/// Outcome of a rejected service call.
///
/// `Duplicate` is a specialisation of `Validation`: both map to HTTP 400 and
/// [`ServiceError::is_validation`] answers true for either.
#[derive(Debug, ThisError)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ServiceError::Validation(msg.into())
    }

    pub fn duplicate(msg: impl Into<String>) -> Self {
        ServiceError::Duplicate(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ServiceError::NotFound(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ServiceError::Validation(_) | ServiceError::Duplicate(_))
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, ServiceError::Duplicate(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound(_))
    }

    /// Converts a storage-level unique violation into a duplicate error with
    /// the given message; any other error passes through untouched.
    pub fn or_duplicate(self, msg: impl FnOnce() -> String) -> Self {
        match self {
            ServiceError::Storage(storage) if storage.is_unique_violation() => {
                ServiceError::Duplicate(msg())
            }
            other => other,
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "detail": self.error.to_string()
        }));

        (self.status, body).into_response()
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(_) | ServiceError::Duplicate(_) => AppError::bad_request(err),
            ServiceError::NotFound(_) => AppError::not_found(err),
            ServiceError::Storage(_) => AppError::internal(err),
        }
    }
}
