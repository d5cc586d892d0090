//! Seed rows and configuration for database seeding.
//!
//! Each `*Seed` mirrors the insert columns of one table; the
//! [`SeedRow`](super::batch::SeedRow) impls bind them in column order.

use chrono::NaiveDate;
use unidad_models::{
    AsignaturaId, CursoId, DocenteId, EstadoAsistencia, EstadoMatricula, EstudianteId,
    MatriculaId, RepresentanteId,
};

use super::batch::{SeedQuery, SeedRow};

pub struct RepresentanteSeed {
    pub nombre: String,
    pub telefono: String,
}

pub struct EstudianteSeed {
    pub nombre: String,
    pub apellido: String,
    pub cedula: String,
    pub fecha_nacimiento: NaiveDate,
    pub correo: Option<String>,
    pub representante_id: Option<RepresentanteId>,
}

pub struct DocenteSeed {
    pub nombre: String,
    pub apellido: String,
    pub titulo: Option<String>,
    pub correo: String,
}

pub struct CursoSeed {
    pub nombre: String,
    pub nivel: String,
}

pub struct AsignaturaSeed {
    pub nombre: String,
    pub descripcion: Option<String>,
    pub curso_id: CursoId,
    pub docente_id: Option<DocenteId>,
}

pub struct MatriculaSeed {
    pub fecha: NaiveDate,
    pub estudiante_id: EstudianteId,
    pub curso_id: CursoId,
    pub estado: EstadoMatricula,
}

pub struct CalificacionSeed {
    pub nota: f64,
    pub quimestre: i32,
    pub matricula_id: MatriculaId,
    pub asignatura_id: AsignaturaId,
}

pub struct AsistenciaSeed {
    pub fecha: NaiveDate,
    pub estado: EstadoAsistencia,
    pub matricula_id: MatriculaId,
    pub asignatura_id: AsignaturaId,
}

impl SeedRow for RepresentanteSeed {
    const TABLE: &'static str = "representantes";
    const COLUMNS: &'static [&'static str] = &["nombre", "telefono"];

    fn bind<'q>(&'q self, query: SeedQuery<'q>) -> SeedQuery<'q> {
        query.bind(&self.nombre).bind(&self.telefono)
    }
}

impl SeedRow for EstudianteSeed {
    const TABLE: &'static str = "estudiantes";
    const COLUMNS: &'static [&'static str] = &[
        "nombre",
        "apellido",
        "cedula",
        "fecha_nacimiento",
        "correo",
        "representante_id",
    ];

    fn bind<'q>(&'q self, query: SeedQuery<'q>) -> SeedQuery<'q> {
        query
            .bind(&self.nombre)
            .bind(&self.apellido)
            .bind(&self.cedula)
            .bind(self.fecha_nacimiento)
            .bind(&self.correo)
            .bind(self.representante_id)
    }
}

impl SeedRow for DocenteSeed {
    const TABLE: &'static str = "docentes";
    const COLUMNS: &'static [&'static str] = &["nombre", "apellido", "titulo", "correo"];

    fn bind<'q>(&'q self, query: SeedQuery<'q>) -> SeedQuery<'q> {
        query
            .bind(&self.nombre)
            .bind(&self.apellido)
            .bind(&self.titulo)
            .bind(&self.correo)
    }
}

impl SeedRow for CursoSeed {
    const TABLE: &'static str = "cursos";
    const COLUMNS: &'static [&'static str] = &["nombre", "nivel"];

    fn bind<'q>(&'q self, query: SeedQuery<'q>) -> SeedQuery<'q> {
        query.bind(&self.nombre).bind(&self.nivel)
    }
}

impl SeedRow for AsignaturaSeed {
    const TABLE: &'static str = "asignaturas";
    const COLUMNS: &'static [&'static str] = &["nombre", "descripcion", "curso_id", "docente_id"];

    fn bind<'q>(&'q self, query: SeedQuery<'q>) -> SeedQuery<'q> {
        query
            .bind(&self.nombre)
            .bind(&self.descripcion)
            .bind(self.curso_id)
            .bind(self.docente_id)
    }
}

impl SeedRow for MatriculaSeed {
    const TABLE: &'static str = "matriculas";
    const COLUMNS: &'static [&'static str] = &["fecha", "estudiante_id", "curso_id", "estado"];

    fn bind<'q>(&'q self, query: SeedQuery<'q>) -> SeedQuery<'q> {
        query
            .bind(self.fecha)
            .bind(self.estudiante_id)
            .bind(self.curso_id)
            .bind(self.estado)
    }
}

impl SeedRow for CalificacionSeed {
    const TABLE: &'static str = "calificaciones";
    const COLUMNS: &'static [&'static str] = &["nota", "quimestre", "matricula_id", "asignatura_id"];

    fn bind<'q>(&'q self, query: SeedQuery<'q>) -> SeedQuery<'q> {
        query
            .bind(self.nota)
            .bind(self.quimestre)
            .bind(self.matricula_id)
            .bind(self.asignatura_id)
    }
}

impl SeedRow for AsistenciaSeed {
    const TABLE: &'static str = "asistencias";
    const COLUMNS: &'static [&'static str] = &["fecha", "estado", "matricula_id", "asignatura_id"];

    fn bind<'q>(&'q self, query: SeedQuery<'q>) -> SeedQuery<'q> {
        query
            .bind(self.fecha)
            .bind(self.estado)
            .bind(self.matricula_id)
            .bind(self.asignatura_id)
    }
}

/// Staff and family records created independently of cursos.
#[derive(Debug, Clone)]
pub struct Personal {
    pub representantes: usize,
    pub docentes: usize,
}

impl Default for Personal {
    fn default() -> Self {
        Self {
            representantes: 50,
            docentes: 12,
        }
    }
}

/// Per-curso volume of subjects, students and their records.
#[derive(Debug, Clone)]
pub struct PorCurso {
    pub asignaturas: usize,
    pub estudiantes: usize,
    pub quimestres: i32,
    pub dias_asistencia: usize,
}

impl Default for PorCurso {
    fn default() -> Self {
        Self {
            asignaturas: 5,
            estudiantes: 25,
            quimestres: 2,
            dias_asistencia: 10,
        }
    }
}

/// Complete configuration for database seeding.
#[derive(Debug, Clone, Default)]
pub struct SeedConfig {
    pub cursos: usize,
    pub personal: Personal,
    pub por_curso: PorCurso,
}

impl SeedConfig {
    pub fn new(cursos: usize) -> Self {
        Self {
            cursos,
            ..Default::default()
        }
    }

    pub fn with_personal(mut self, personal: Personal) -> Self {
        self.personal = personal;
        self
    }

    pub fn with_por_curso(mut self, por_curso: PorCurso) -> Self {
        self.por_curso = por_curso;
        self
    }
}
