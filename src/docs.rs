use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use unidad_core::{PaginationMeta, PaginationParams};
use unidad_models::{EstadoAsistencia, EstadoMatricula};

use crate::modules::asignaturas::model::{Asignatura, CreateAsignaturaDto, UpdateAsignaturaDto};
use crate::modules::asistencias::model::{Asistencia, CreateAsistenciaDto, UpdateAsistenciaDto};
use crate::modules::calificaciones::model::{
    Calificacion, CreateCalificacionDto, PromedioResponse, UpdateCalificacionDto,
};
use crate::modules::cursos::model::{CreateCursoDto, Curso, UpdateCursoDto};
use crate::modules::docentes::model::{CreateDocenteDto, Docente, UpdateDocenteDto};
use crate::modules::estudiantes::model::{CreateEstudianteDto, Estudiante, UpdateEstudianteDto};
use crate::modules::health::model::{EstadoBaseDatos, HealthResponse, WelcomeResponse};
use crate::modules::matriculas::model::{
    CreateMatriculaDto, EstadoCambioDto, Matricula, UpdateMatriculaDto,
};
use crate::modules::representantes::model::{
    CreateRepresentanteDto, Representante, UpdateRepresentanteDto,
};

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Estudiante con ID 7 no encontrado")]
    pub detail: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::controller::welcome,
        crate::modules::health::controller::health,
        crate::modules::representantes::controller::create_representante,
        crate::modules::representantes::controller::get_representantes,
        crate::modules::representantes::controller::get_representante,
        crate::modules::representantes::controller::get_representante_by_telefono,
        crate::modules::representantes::controller::get_representante_estudiantes,
        crate::modules::representantes::controller::update_representante,
        crate::modules::representantes::controller::delete_representante,
        crate::modules::estudiantes::controller::create_estudiante,
        crate::modules::estudiantes::controller::get_estudiantes,
        crate::modules::estudiantes::controller::get_estudiante,
        crate::modules::estudiantes::controller::get_estudiante_by_cedula,
        crate::modules::estudiantes::controller::get_estudiante_by_correo,
        crate::modules::estudiantes::controller::get_estudiante_matriculas,
        crate::modules::estudiantes::controller::update_estudiante,
        crate::modules::estudiantes::controller::delete_estudiante,
        crate::modules::docentes::controller::create_docente,
        crate::modules::docentes::controller::get_docentes,
        crate::modules::docentes::controller::get_docente,
        crate::modules::docentes::controller::get_docente_asignaturas,
        crate::modules::docentes::controller::update_docente,
        crate::modules::docentes::controller::delete_docente,
        crate::modules::cursos::controller::create_curso,
        crate::modules::cursos::controller::get_cursos,
        crate::modules::cursos::controller::get_curso,
        crate::modules::cursos::controller::get_curso_by_nombre,
        crate::modules::cursos::controller::get_cursos_by_nivel,
        crate::modules::cursos::controller::get_curso_asignaturas,
        crate::modules::cursos::controller::get_curso_matriculas,
        crate::modules::cursos::controller::update_curso,
        crate::modules::cursos::controller::delete_curso,
        crate::modules::asignaturas::controller::create_asignatura,
        crate::modules::asignaturas::controller::get_asignaturas,
        crate::modules::asignaturas::controller::get_asignatura,
        crate::modules::asignaturas::controller::get_asignatura_calificaciones,
        crate::modules::asignaturas::controller::get_asignatura_asistencias,
        crate::modules::asignaturas::controller::update_asignatura,
        crate::modules::asignaturas::controller::delete_asignatura,
        crate::modules::matriculas::controller::create_matricula,
        crate::modules::matriculas::controller::get_matriculas,
        crate::modules::matriculas::controller::get_matricula,
        crate::modules::matriculas::controller::get_matriculas_by_estado,
        crate::modules::matriculas::controller::update_matricula,
        crate::modules::matriculas::controller::change_matricula_estado,
        crate::modules::matriculas::controller::get_matricula_calificaciones,
        crate::modules::matriculas::controller::get_matricula_promedio,
        crate::modules::matriculas::controller::get_matricula_asistencias,
        crate::modules::matriculas::controller::delete_matricula,
        crate::modules::calificaciones::controller::create_calificacion,
        crate::modules::calificaciones::controller::get_calificaciones,
        crate::modules::calificaciones::controller::get_calificacion,
        crate::modules::calificaciones::controller::get_calificaciones_by_quimestre,
        crate::modules::calificaciones::controller::update_calificacion,
        crate::modules::calificaciones::controller::delete_calificacion,
        crate::modules::asistencias::controller::create_asistencia,
        crate::modules::asistencias::controller::get_asistencias,
        crate::modules::asistencias::controller::get_asistencia,
        crate::modules::asistencias::controller::get_asistencias_by_estado,
        crate::modules::asistencias::controller::update_asistencia,
        crate::modules::asistencias::controller::delete_asistencia,
    ),
    components(
        schemas(
            ErrorResponse,
            PaginationMeta,
            PaginationParams,
            HealthResponse,
            WelcomeResponse,
            EstadoBaseDatos,
            EstadoMatricula,
            EstadoAsistencia,
            Representante,
            CreateRepresentanteDto,
            UpdateRepresentanteDto,
            Estudiante,
            CreateEstudianteDto,
            UpdateEstudianteDto,
            Docente,
            CreateDocenteDto,
            UpdateDocenteDto,
            Curso,
            CreateCursoDto,
            UpdateCursoDto,
            Asignatura,
            CreateAsignaturaDto,
            UpdateAsignaturaDto,
            Matricula,
            CreateMatriculaDto,
            UpdateMatriculaDto,
            EstadoCambioDto,
            Calificacion,
            CreateCalificacionDto,
            UpdateCalificacionDto,
            PromedioResponse,
            Asistencia,
            CreateAsistenciaDto,
            UpdateAsistenciaDto,
        )
    ),
    tags(
        (name = "Sistema", description = "Bienvenida y estado del servicio"),
        (name = "Representantes", description = "Representantes legales de los estudiantes"),
        (name = "Estudiantes", description = "Registro de estudiantes"),
        (name = "Docentes", description = "Registro de docentes"),
        (name = "Cursos", description = "Cursos y paralelos"),
        (name = "Asignaturas", description = "Asignaturas dictadas en cada curso"),
        (name = "Matrículas", description = "Matrículas de estudiantes en cursos"),
        (name = "Calificaciones", description = "Notas por quimestre"),
        (name = "Asistencias", description = "Control de asistencia")
    ),
    info(
        title = "Unidad Educativa API",
        version = "0.1.0",
        description = "API REST para la gestión académica de una unidad educativa, construida con Rust, Axum y PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_versioned_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/health"));
        assert!(paths.contains_key("/api/v1/estudiantes/cedula/{cedula}"));
        assert!(paths.contains_key("/api/v1/matriculas/{id}/estado"));
        assert!(paths.contains_key("/api/v1/matriculas/{id}/promedio"));
        assert!(paths.contains_key("/api/v1/matriculas/estado/{estado}"));
        assert!(paths.contains_key("/api/v1/cursos/nivel/{nivel}"));
        assert!(paths.contains_key("/api/v1/asignaturas/{id}/calificaciones"));
    }
}
