//! Student data models and DTOs, re-exported from `unidad-models`.

pub use unidad_models::estudiantes::*;
