//! Student (estudiante) models and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::entity::{Entity, set, set_opt};
use crate::ids::{EstudianteId, RepresentanteId};
use crate::rules::max_100;

/// Maximum length of a cédula (national id).
pub const CEDULA_MAX_LEN: usize = 20;

/// Minimum age, in 365-day years, for a student to be registered.
pub const EDAD_MINIMA: i64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Estudiante {
    pub id: EstudianteId,
    pub nombre: String,
    pub apellido: String,
    /// Unique national id.
    pub cedula: String,
    pub fecha_nacimiento: NaiveDate,
    pub correo: Option<String>,
    pub representante_id: Option<RepresentanteId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEstudiante {
    pub nombre: String,
    pub apellido: String,
    pub cedula: String,
    pub fecha_nacimiento: NaiveDate,
    pub correo: Option<String>,
    pub representante_id: Option<RepresentanteId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EstudiantePatch {
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub cedula: Option<String>,
    pub fecha_nacimiento: Option<NaiveDate>,
    pub correo: Option<String>,
    pub representante_id: Option<RepresentanteId>,
}

impl Entity for Estudiante {
    type Id = EstudianteId;
    type New = NewEstudiante;
    type Patch = EstudiantePatch;

    const NAME: &'static str = "Estudiante";
    const TABLE: &'static str = "estudiantes";

    fn id(&self) -> EstudianteId {
        self.id
    }

    fn from_new(id: EstudianteId, new: NewEstudiante) -> Self {
        Self {
            id,
            nombre: new.nombre,
            apellido: new.apellido,
            cedula: new.cedula,
            fecha_nacimiento: new.fecha_nacimiento,
            correo: new.correo,
            representante_id: new.representante_id,
        }
    }

    fn apply(&mut self, patch: EstudiantePatch) {
        set(&mut self.nombre, patch.nombre);
        set(&mut self.apellido, patch.apellido);
        set(&mut self.cedula, patch.cedula);
        set(&mut self.fecha_nacimiento, patch.fecha_nacimiento);
        set_opt(&mut self.correo, patch.correo);
        set_opt(&mut self.representante_id, patch.representante_id);
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEstudianteDto {
    #[validate(length(min = 1), custom(function = "max_100"))]
    pub nombre: String,
    #[validate(length(min = 1), custom(function = "max_100"))]
    pub apellido: String,
    pub cedula: String,
    pub fecha_nacimiento: NaiveDate,
    #[validate(custom(function = "max_100"))]
    pub correo: Option<String>,
    pub representante_id: Option<RepresentanteId>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEstudianteDto {
    #[validate(length(min = 1), custom(function = "max_100"))]
    pub nombre: Option<String>,
    #[validate(length(min = 1), custom(function = "max_100"))]
    pub apellido: Option<String>,
    pub cedula: Option<String>,
    pub fecha_nacimiento: Option<NaiveDate>,
    #[validate(custom(function = "max_100"))]
    pub correo: Option<String>,
    pub representante_id: Option<RepresentanteId>,
}
