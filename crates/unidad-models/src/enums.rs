//! Closed status sets for enrollments and attendance.
//!
//! Both enums are stored as Postgres enum types (`estado_matricula`,
//! `estado_asistencia`) and serialized with their upper-case labels. Parsing
//! an arbitrary label goes through [`FromStr`], which the services use to turn
//! unknown labels into validation errors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Estado inválido: {0}")]
pub struct EstadoInvalido(pub String);

/// Enrollment status.
///
/// The intended progression is REGISTRADO → MATRICULADO → ACTIVO and then one
/// of SUSPENDIDO, RETIRADO or GRADUADO, but no transition is enforced: any
/// state may be set from any other.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema, sqlx::Type,
)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "estado_matricula", rename_all = "UPPERCASE")]
pub enum EstadoMatricula {
    #[default]
    Registrado,
    Matriculado,
    Activo,
    Suspendido,
    Retirado,
    Graduado,
}

impl EstadoMatricula {
    pub const ALL: [EstadoMatricula; 6] = [
        EstadoMatricula::Registrado,
        EstadoMatricula::Matriculado,
        EstadoMatricula::Activo,
        EstadoMatricula::Suspendido,
        EstadoMatricula::Retirado,
        EstadoMatricula::Graduado,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            EstadoMatricula::Registrado => "REGISTRADO",
            EstadoMatricula::Matriculado => "MATRICULADO",
            EstadoMatricula::Activo => "ACTIVO",
            EstadoMatricula::Suspendido => "SUSPENDIDO",
            EstadoMatricula::Retirado => "RETIRADO",
            EstadoMatricula::Graduado => "GRADUADO",
        }
    }
}

impl fmt::Display for EstadoMatricula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EstadoMatricula {
    type Err = EstadoInvalido;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EstadoMatricula::ALL
            .into_iter()
            .find(|estado| estado.as_str() == s)
            .ok_or_else(|| EstadoInvalido(s.to_string()))
    }
}

/// Attendance status for one class session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "estado_asistencia", rename_all = "UPPERCASE")]
pub enum EstadoAsistencia {
    Presente,
    Ausente,
    Atraso,
    Justificado,
}

impl EstadoAsistencia {
    pub const ALL: [EstadoAsistencia; 4] = [
        EstadoAsistencia::Presente,
        EstadoAsistencia::Ausente,
        EstadoAsistencia::Atraso,
        EstadoAsistencia::Justificado,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            EstadoAsistencia::Presente => "PRESENTE",
            EstadoAsistencia::Ausente => "AUSENTE",
            EstadoAsistencia::Atraso => "ATRASO",
            EstadoAsistencia::Justificado => "JUSTIFICADO",
        }
    }
}

impl fmt::Display for EstadoAsistencia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EstadoAsistencia {
    type Err = EstadoInvalido;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EstadoAsistencia::ALL
            .into_iter()
            .find(|estado| estado.as_str() == s)
            .ok_or_else(|| EstadoInvalido(s.to_string()))
    }
}
