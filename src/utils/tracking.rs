use unidad_core::ServiceError;
use unidad_observability::track_validation_failure;

/// Counts a rejected service call under `validation_failures_total`.
///
/// Meant for `Result::inspect_err` in controllers. Storage failures are not
/// counted here; they surface as 5xx in the HTTP metrics.
pub fn track_failure(entity: &'static str) -> impl FnOnce(&ServiceError) {
    move |err| {
        let kind = match err {
            ServiceError::Validation(_) => "validation",
            ServiceError::Duplicate(_) => "duplicate",
            ServiceError::NotFound(_) => "not_found",
            ServiceError::Storage(_) => return,
        };
        track_validation_failure(entity, kind);
    }
}
