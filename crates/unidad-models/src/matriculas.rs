//! Enrollment (matrícula) models and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::entity::{Entity, set};
use crate::enums::EstadoMatricula;
use crate::ids::{CursoId, EstudianteId, MatriculaId};

/// Links a student to a course. At most one per (estudiante, curso) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Matricula {
    pub id: MatriculaId,
    pub fecha: NaiveDate,
    pub estudiante_id: EstudianteId,
    pub curso_id: CursoId,
    pub estado: EstadoMatricula,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMatricula {
    pub fecha: NaiveDate,
    pub estudiante_id: EstudianteId,
    pub curso_id: CursoId,
    pub estado: EstadoMatricula,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatriculaPatch {
    pub fecha: Option<NaiveDate>,
    pub estudiante_id: Option<EstudianteId>,
    pub curso_id: Option<CursoId>,
    pub estado: Option<EstadoMatricula>,
}

impl Entity for Matricula {
    type Id = MatriculaId;
    type New = NewMatricula;
    type Patch = MatriculaPatch;

    const NAME: &'static str = "Matrícula";
    const TABLE: &'static str = "matriculas";

    fn id(&self) -> MatriculaId {
        self.id
    }

    fn from_new(id: MatriculaId, new: NewMatricula) -> Self {
        Self {
            id,
            fecha: new.fecha,
            estudiante_id: new.estudiante_id,
            curso_id: new.curso_id,
            estado: new.estado,
        }
    }

    fn apply(&mut self, patch: MatriculaPatch) {
        set(&mut self.fecha, patch.fecha);
        set(&mut self.estudiante_id, patch.estudiante_id);
        set(&mut self.curso_id, patch.curso_id);
        set(&mut self.estado, patch.estado);
    }
}

/// `estado` is taken as a raw label so that unknown values reach the service
/// and are reported as `Estado inválido: ...`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMatriculaDto {
    pub fecha: Option<NaiveDate>,
    pub estudiante_id: EstudianteId,
    pub curso_id: CursoId,
    #[schema(example = "REGISTRADO")]
    pub estado: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateMatriculaDto {
    pub fecha: Option<NaiveDate>,
    pub estudiante_id: Option<EstudianteId>,
    pub curso_id: Option<CursoId>,
    #[schema(example = "ACTIVO")]
    pub estado: Option<String>,
}

/// Body of `PATCH /matriculas/{id}/estado`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EstadoCambioDto {
    #[schema(example = "MATRICULADO")]
    pub estado: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_new_and_apply() {
        let mut matricula = Matricula::from_new(
            MatriculaId::new(3),
            NewMatricula {
                fecha: NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
                estudiante_id: EstudianteId::new(1),
                curso_id: CursoId::new(1),
                estado: EstadoMatricula::default(),
            },
        );
        assert_eq!(matricula.estado, EstadoMatricula::Registrado);

        matricula.apply(MatriculaPatch {
            estado: Some(EstadoMatricula::Activo),
            ..Default::default()
        });
        assert_eq!(matricula.estado, EstadoMatricula::Activo);
        assert_eq!(matricula.curso_id, CursoId::new(1));
    }

    #[test]
    fn test_serializes_estado_upper_case() {
        let matricula = Matricula {
            id: MatriculaId::new(1),
            fecha: NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
            estudiante_id: EstudianteId::new(1),
            curso_id: CursoId::new(2),
            estado: EstadoMatricula::Graduado,
        };
        let json = serde_json::to_value(&matricula).unwrap();
        assert_eq!(json["estado"], "GRADUADO");
        assert_eq!(json["fecha"], "2024-09-02");
        assert_eq!(json["curso_id"], 2);
    }

    #[test]
    fn test_create_dto_optional_fields() {
        let dto: CreateMatriculaDto =
            serde_json::from_str(r#"{"estudiante_id":1,"curso_id":1}"#).unwrap();
        assert!(dto.fecha.is_none());
        assert!(dto.estado.is_none());
    }
}
