//! Attendance (asistencia) models and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::entity::{Entity, set};
use crate::enums::EstadoAsistencia;
use crate::ids::{AsignaturaId, AsistenciaId, MatriculaId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Asistencia {
    pub id: AsistenciaId,
    pub fecha: NaiveDate,
    pub estado: EstadoAsistencia,
    pub matricula_id: MatriculaId,
    pub asignatura_id: AsignaturaId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAsistencia {
    pub fecha: NaiveDate,
    pub estado: EstadoAsistencia,
    pub matricula_id: MatriculaId,
    pub asignatura_id: AsignaturaId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AsistenciaPatch {
    pub fecha: Option<NaiveDate>,
    pub estado: Option<EstadoAsistencia>,
    pub matricula_id: Option<MatriculaId>,
    pub asignatura_id: Option<AsignaturaId>,
}

impl Entity for Asistencia {
    type Id = AsistenciaId;
    type New = NewAsistencia;
    type Patch = AsistenciaPatch;

    const NAME: &'static str = "Asistencia";
    const TABLE: &'static str = "asistencias";

    fn id(&self) -> AsistenciaId {
        self.id
    }

    fn from_new(id: AsistenciaId, new: NewAsistencia) -> Self {
        Self {
            id,
            fecha: new.fecha,
            estado: new.estado,
            matricula_id: new.matricula_id,
            asignatura_id: new.asignatura_id,
        }
    }

    fn apply(&mut self, patch: AsistenciaPatch) {
        set(&mut self.fecha, patch.fecha);
        set(&mut self.estado, patch.estado);
        set(&mut self.matricula_id, patch.matricula_id);
        set(&mut self.asignatura_id, patch.asignatura_id);
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAsistenciaDto {
    pub fecha: Option<NaiveDate>,
    #[schema(example = "PRESENTE")]
    pub estado: String,
    pub matricula_id: MatriculaId,
    pub asignatura_id: AsignaturaId,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAsistenciaDto {
    pub fecha: Option<NaiveDate>,
    #[schema(example = "ATRASO")]
    pub estado: Option<String>,
    pub matricula_id: Option<MatriculaId>,
    pub asignatura_id: Option<AsignaturaId>,
}
