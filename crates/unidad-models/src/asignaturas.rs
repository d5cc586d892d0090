//! Subject (asignatura) models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::entity::{Entity, set, set_opt};
use crate::ids::{AsignaturaId, CursoId, DocenteId};
use crate::rules::max_100;

/// A subject taught within a course, optionally assigned to a teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Asignatura {
    pub id: AsignaturaId,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub curso_id: CursoId,
    pub docente_id: Option<DocenteId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAsignatura {
    pub nombre: String,
    pub descripcion: Option<String>,
    pub curso_id: CursoId,
    pub docente_id: Option<DocenteId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AsignaturaPatch {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub curso_id: Option<CursoId>,
    pub docente_id: Option<DocenteId>,
}

impl Entity for Asignatura {
    type Id = AsignaturaId;
    type New = NewAsignatura;
    type Patch = AsignaturaPatch;

    const NAME: &'static str = "Asignatura";
    const TABLE: &'static str = "asignaturas";

    fn id(&self) -> AsignaturaId {
        self.id
    }

    fn from_new(id: AsignaturaId, new: NewAsignatura) -> Self {
        Self {
            id,
            nombre: new.nombre,
            descripcion: new.descripcion,
            curso_id: new.curso_id,
            docente_id: new.docente_id,
        }
    }

    fn apply(&mut self, patch: AsignaturaPatch) {
        set(&mut self.nombre, patch.nombre);
        set_opt(&mut self.descripcion, patch.descripcion);
        set(&mut self.curso_id, patch.curso_id);
        set_opt(&mut self.docente_id, patch.docente_id);
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAsignaturaDto {
    #[validate(length(min = 1), custom(function = "max_100"))]
    pub nombre: String,
    pub descripcion: Option<String>,
    pub curso_id: CursoId,
    pub docente_id: Option<DocenteId>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAsignaturaDto {
    #[validate(length(min = 1), custom(function = "max_100"))]
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub curso_id: Option<CursoId>,
    pub docente_id: Option<DocenteId>,
}
