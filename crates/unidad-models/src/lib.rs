//! Domain models for the Unidad Educativa API.
//!
//! Every entity module exposes the persisted row type, the `New*` insert
//! payload, the `*Patch` partial update and the request DTOs used by the
//! HTTP layer. Services turn DTOs into `New*`/`*Patch` values after applying
//! business validation.

pub mod asignaturas;
pub mod asistencias;
pub mod calificaciones;
pub mod cursos;
pub mod docentes;
pub mod entity;
pub mod enums;
pub mod estudiantes;
pub mod ids;
pub mod matriculas;
pub mod representantes;
mod rules;

pub use entity::Entity;
pub use enums::{EstadoAsistencia, EstadoInvalido, EstadoMatricula};
pub use ids::{
    AsignaturaId, AsistenciaId, CalificacionId, CursoId, DocenteId, EstudianteId, MatriculaId,
    RepresentanteId,
};
