//! String normalization shared by the services.

use std::str::FromStr;

use unidad_core::{ServiceError, ServiceResult};
use unidad_models::EstadoInvalido;

/// Trims `value`, rejecting it with `msg` when nothing is left.
pub fn required(value: &str, msg: &str) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation(msg));
    }
    Ok(trimmed.to_string())
}

/// [`required`] applied to a field that may be absent from a patch.
pub fn required_if_present(value: Option<String>, msg: &str) -> ServiceResult<Option<String>> {
    value.map(|v| required(&v, msg)).transpose()
}

/// Trims an optional free-text field; blank becomes `None`.
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses a status label exactly as sent; unknown labels are validation errors.
pub fn estado<T>(label: &str) -> ServiceResult<T>
where
    T: FromStr<Err = EstadoInvalido>,
{
    label
        .parse()
        .map_err(|e: EstadoInvalido| ServiceError::validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use unidad_models::{EstadoAsistencia, EstadoMatricula};

    #[test]
    fn test_required_trims() {
        assert_eq!(required("  Ana  ", "vacío").unwrap(), "Ana");
    }

    #[test]
    fn test_required_rejects_blank() {
        let err = required("   ", "El nombre no puede estar vacío").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "El nombre no puede estar vacío");
    }

    #[test]
    fn test_required_if_present() {
        assert_eq!(required_if_present(None, "x").unwrap(), None);
        assert_eq!(
            required_if_present(Some(" 5A ".to_string()), "x").unwrap(),
            Some("5A".to_string())
        );
        assert!(required_if_present(Some(String::new()), "x").is_err());
    }

    #[test]
    fn test_optional_drops_blank() {
        assert_eq!(optional(Some("  ".to_string())), None);
        assert_eq!(optional(Some(" Lic. ".to_string())), Some("Lic.".to_string()));
        assert_eq!(optional(None), None);
    }

    #[test]
    fn test_estado_labels() {
        assert_eq!(estado::<EstadoMatricula>("ACTIVO").unwrap(), EstadoMatricula::Activo);
        assert_eq!(estado::<EstadoAsistencia>("ATRASO").unwrap(), EstadoAsistencia::Atraso);

        let err = estado::<EstadoMatricula>("EXPULSADO").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Estado inválido: EXPULSADO");
    }
}
