//! # Unidad Educativa Core
//!
//! Core types, errors, and utilities shared by every crate of the workspace.
//!
//! - [`errors`]: storage, service and HTTP error types
//! - [`pagination`]: `skip`/`limit` query parameters and paged responses
//! - [`dates`]: current date and age computation
//!
//! # Example
//!
//! ```ignore
//! use unidad_core::{AppError, ServiceError};
//!
//! let err = ServiceError::not_found("Curso con ID 7 no encontrado");
//! let http: AppError = err.into(); // 404
//! ```

pub mod dates;
pub mod errors;
pub mod pagination;

// Re-export commonly used types at crate root
pub use errors::{AppError, ServiceError, ServiceResult, StorageError, StorageOp};
pub use pagination::{Page, PaginationMeta, PaginationParams};
