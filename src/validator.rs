//! JSON body extractor that also runs `validator` rules.
//!
//! Bodies that cannot be deserialized are rejected with 400; bodies that parse
//! but break a `#[validate]` rule are rejected with 422. Both render as
//! `{"detail": "..."}`.

use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use unidad_core::AppError;
use validator::{Validate, ValidationErrors};

fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(msg) => msg.to_string(),
                None => format!("El campo {field} es inválido"),
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

fn missing_field(body_text: &str) -> Option<&str> {
    body_text
        .split("missing field `")
        .nth(1)
        .and_then(|rest| rest.split('`').next())
}

fn reject(rejection: JsonRejection) -> AppError {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::bad_request(anyhow!(
            "Falta el encabezado 'Content-Type: application/json'"
        ));
    }

    let body_text = rejection.body_text();
    if let Some(field) = missing_field(&body_text) {
        return AppError::bad_request(anyhow!("El campo {field} es obligatorio"));
    }
    if body_text.contains("invalid type") || body_text.contains("invalid value") {
        return AppError::bad_request(anyhow!("Tipo de dato inválido en la solicitud"));
    }

    AppError::bad_request(anyhow!("Cuerpo de la solicitud inválido"))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(reject)?;

        value
            .validate()
            .map_err(|errors| AppError::unprocessable(anyhow!("{}", format_errors(&errors))))?;

        Ok(ValidatedJson(value))
    }
}
