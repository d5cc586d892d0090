//! Teacher (docente) models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::entity::{Entity, set, set_opt};
use crate::ids::DocenteId;
use crate::rules::max_100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Docente {
    pub id: DocenteId,
    pub nombre: String,
    pub apellido: String,
    pub titulo: Option<String>,
    /// Unique, stored lower-cased.
    pub correo: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocente {
    pub nombre: String,
    pub apellido: String,
    pub titulo: Option<String>,
    pub correo: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocentePatch {
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub titulo: Option<String>,
    pub correo: Option<String>,
}

impl Entity for Docente {
    type Id = DocenteId;
    type New = NewDocente;
    type Patch = DocentePatch;

    const NAME: &'static str = "Docente";
    const TABLE: &'static str = "docentes";

    fn id(&self) -> DocenteId {
        self.id
    }

    fn from_new(id: DocenteId, new: NewDocente) -> Self {
        Self {
            id,
            nombre: new.nombre,
            apellido: new.apellido,
            titulo: new.titulo,
            correo: new.correo,
        }
    }

    fn apply(&mut self, patch: DocentePatch) {
        set(&mut self.nombre, patch.nombre);
        set(&mut self.apellido, patch.apellido);
        set_opt(&mut self.titulo, patch.titulo);
        set(&mut self.correo, patch.correo);
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDocenteDto {
    #[validate(length(min = 1), custom(function = "max_100"))]
    pub nombre: String,
    #[validate(length(min = 1), custom(function = "max_100"))]
    pub apellido: String,
    #[validate(custom(function = "max_100"))]
    pub titulo: Option<String>,
    #[validate(custom(function = "max_100"))]
    pub correo: String,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateDocenteDto {
    #[validate(length(min = 1), custom(function = "max_100"))]
    pub nombre: Option<String>,
    #[validate(length(min = 1), custom(function = "max_100"))]
    pub apellido: Option<String>,
    #[validate(custom(function = "max_100"))]
    pub titulo: Option<String>,
    #[validate(custom(function = "max_100"))]
    pub correo: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_limits_ignore_surrounding_whitespace() {
        let dto = CreateDocenteDto {
            nombre: format!("  {}  ", "N".repeat(100)),
            apellido: "Salazar".to_string(),
            titulo: Some(format!("{}   ", "t".repeat(100))),
            correo: " jorge@unidad.edu.ec ".to_string(),
        };
        assert!(dto.validate().is_ok());

        let update = UpdateDocenteDto {
            apellido: Some("a".repeat(101)),
            ..Default::default()
        };
        let errors = update.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("apellido"));
    }
}
