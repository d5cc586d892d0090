//! Grade (calificación) models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::entity::{Entity, set};
use crate::ids::{AsignaturaId, CalificacionId, MatriculaId};

pub const NOTA_MIN: f64 = 0.0;
pub const NOTA_MAX: f64 = 10.0;
pub const QUIMESTRES: std::ops::RangeInclusive<i32> = 1..=3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Calificacion {
    pub id: CalificacionId,
    pub nota: f64,
    pub quimestre: i32,
    pub matricula_id: MatriculaId,
    pub asignatura_id: AsignaturaId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCalificacion {
    pub nota: f64,
    pub quimestre: i32,
    pub matricula_id: MatriculaId,
    pub asignatura_id: AsignaturaId,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalificacionPatch {
    pub nota: Option<f64>,
    pub quimestre: Option<i32>,
    pub matricula_id: Option<MatriculaId>,
    pub asignatura_id: Option<AsignaturaId>,
}

impl Entity for Calificacion {
    type Id = CalificacionId;
    type New = NewCalificacion;
    type Patch = CalificacionPatch;

    const NAME: &'static str = "Calificación";
    const TABLE: &'static str = "calificaciones";

    fn id(&self) -> CalificacionId {
        self.id
    }

    fn from_new(id: CalificacionId, new: NewCalificacion) -> Self {
        Self {
            id,
            nota: new.nota,
            quimestre: new.quimestre,
            matricula_id: new.matricula_id,
            asignatura_id: new.asignatura_id,
        }
    }

    fn apply(&mut self, patch: CalificacionPatch) {
        set(&mut self.nota, patch.nota);
        set(&mut self.quimestre, patch.quimestre);
        set(&mut self.matricula_id, patch.matricula_id);
        set(&mut self.asignatura_id, patch.asignatura_id);
    }
}

/// Range checks on `nota` and `quimestre` happen in the service so the
/// response carries the domain message.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCalificacionDto {
    #[schema(example = 8.5)]
    pub nota: f64,
    #[schema(example = 1)]
    pub quimestre: i32,
    pub matricula_id: MatriculaId,
    pub asignatura_id: AsignaturaId,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCalificacionDto {
    pub nota: Option<f64>,
    pub quimestre: Option<i32>,
    pub matricula_id: Option<MatriculaId>,
    pub asignatura_id: Option<AsignaturaId>,
}

/// Mean grade of one enrollment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PromedioResponse {
    pub matricula_id: MatriculaId,
    pub promedio: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quimestre_range() {
        assert!(QUIMESTRES.contains(&1));
        assert!(QUIMESTRES.contains(&3));
        assert!(!QUIMESTRES.contains(&0));
        assert!(!QUIMESTRES.contains(&4));
    }

    #[test]
    fn test_promedio_response_shape() {
        let json = serde_json::to_value(PromedioResponse {
            matricula_id: MatriculaId::new(7),
            promedio: 9.0,
        })
        .unwrap();
        assert_eq!(json["matricula_id"], 7);
        assert_eq!(json["promedio"], 9.0);
    }
}
