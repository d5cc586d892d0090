//! Course (curso) models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::entity::{Entity, set};
use crate::ids::CursoId;
use crate::rules::max_50;

/// A class grouping such as "5A", labelled with a free-text level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Curso {
    pub id: CursoId,
    pub nombre: String,
    pub nivel: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCurso {
    pub nombre: String,
    pub nivel: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursoPatch {
    pub nombre: Option<String>,
    pub nivel: Option<String>,
}

impl Entity for Curso {
    type Id = CursoId;
    type New = NewCurso;
    type Patch = CursoPatch;

    const NAME: &'static str = "Curso";
    const TABLE: &'static str = "cursos";

    fn id(&self) -> CursoId {
        self.id
    }

    fn from_new(id: CursoId, new: NewCurso) -> Self {
        Self {
            id,
            nombre: new.nombre,
            nivel: new.nivel,
        }
    }

    fn apply(&mut self, patch: CursoPatch) {
        set(&mut self.nombre, patch.nombre);
        set(&mut self.nivel, patch.nivel);
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCursoDto {
    #[validate(length(min = 1), custom(function = "max_50"))]
    pub nombre: String,
    #[validate(length(min = 1), custom(function = "max_50"))]
    pub nivel: String,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCursoDto {
    #[validate(length(min = 1), custom(function = "max_50"))]
    pub nombre: Option<String>,
    #[validate(length(min = 1), custom(function = "max_50"))]
    pub nivel: Option<String>,
}
