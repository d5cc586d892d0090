//! Repository contract.
//!
//! [`Repository`] is the uniform CRUD surface every entity gets. The
//! `*Repository` traits add the lookups specific to one entity, and [`Store`]
//! bundles one of each so services can reach any table through a single
//! borrowed handle.
//!
//! Absence is never an error at this level: `read`/`update` return `None` and
//! `delete` returns `false`. Turning that into a not-found error is the
//! service's job.

use async_trait::async_trait;
use unidad_core::StorageError;
use unidad_models::asignaturas::Asignatura;
use unidad_models::asistencias::Asistencia;
use unidad_models::calificaciones::Calificacion;
use unidad_models::cursos::Curso;
use unidad_models::docentes::Docente;
use unidad_models::estudiantes::Estudiante;
use unidad_models::matriculas::Matricula;
use unidad_models::representantes::Representante;
use unidad_models::{
    AsignaturaId, CursoId, DocenteId, Entity, EstadoAsistencia, EstadoMatricula, EstudianteId,
    MatriculaId, RepresentanteId,
};

pub type StorageResult<T> = Result<T, StorageError>;

#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Inserts a row and returns it with its assigned id.
    async fn create(&self, new: E::New) -> StorageResult<E>;

    async fn read(&self, id: E::Id) -> StorageResult<Option<E>>;

    /// Rows ordered by id, skipping `skip` and returning at most `limit`.
    async fn read_all(&self, skip: i64, limit: i64) -> StorageResult<Vec<E>>;

    /// Overwrites the fields present in `patch`; `None` if the id is absent.
    async fn update(&self, id: E::Id, patch: E::Patch) -> StorageResult<Option<E>>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: E::Id) -> StorageResult<bool>;

    async fn count(&self) -> StorageResult<i64>;

    async fn exists(&self, id: E::Id) -> StorageResult<bool> {
        Ok(self.read(id).await?.is_some())
    }
}

#[async_trait]
pub trait RepresentanteRepository: Repository<Representante> {
    async fn get_by_telefono(&self, telefono: &str) -> StorageResult<Option<Representante>>;
}

#[async_trait]
pub trait EstudianteRepository: Repository<Estudiante> {
    async fn get_by_cedula(&self, cedula: &str) -> StorageResult<Option<Estudiante>>;
    async fn get_by_correo(&self, correo: &str) -> StorageResult<Option<Estudiante>>;
    async fn get_by_representante(&self, id: RepresentanteId) -> StorageResult<Vec<Estudiante>>;
}

#[async_trait]
pub trait DocenteRepository: Repository<Docente> {
    async fn get_by_correo(&self, correo: &str) -> StorageResult<Option<Docente>>;
}

#[async_trait]
pub trait CursoRepository: Repository<Curso> {
    async fn get_by_nombre(&self, nombre: &str) -> StorageResult<Option<Curso>>;
    async fn get_by_nivel(&self, nivel: &str) -> StorageResult<Vec<Curso>>;
}

#[async_trait]
pub trait AsignaturaRepository: Repository<Asignatura> {
    async fn get_by_curso(&self, id: CursoId) -> StorageResult<Vec<Asignatura>>;
    async fn get_by_docente(&self, id: DocenteId) -> StorageResult<Vec<Asignatura>>;
}

#[async_trait]
pub trait MatriculaRepository: Repository<Matricula> {
    async fn get_by_estudiante(&self, id: EstudianteId) -> StorageResult<Vec<Matricula>>;
    async fn get_by_curso(&self, id: CursoId) -> StorageResult<Vec<Matricula>>;
    async fn get_by_estado(&self, estado: EstadoMatricula) -> StorageResult<Vec<Matricula>>;
    async fn get_estudiante_en_curso(
        &self,
        estudiante_id: EstudianteId,
        curso_id: CursoId,
    ) -> StorageResult<Option<Matricula>>;
}

#[async_trait]
pub trait CalificacionRepository: Repository<Calificacion> {
    async fn get_by_matricula(&self, id: MatriculaId) -> StorageResult<Vec<Calificacion>>;
    async fn get_by_asignatura(&self, id: AsignaturaId) -> StorageResult<Vec<Calificacion>>;
    async fn get_by_quimestre(&self, quimestre: i32) -> StorageResult<Vec<Calificacion>>;
    /// Mean `nota` of one enrollment, `0.0` when it has no grades.
    async fn promedio_por_matricula(&self, id: MatriculaId) -> StorageResult<f64>;
}

#[async_trait]
pub trait AsistenciaRepository: Repository<Asistencia> {
    async fn get_by_matricula(&self, id: MatriculaId) -> StorageResult<Vec<Asistencia>>;
    async fn get_by_asignatura(&self, id: AsignaturaId) -> StorageResult<Vec<Asistencia>>;
    async fn get_by_estado(&self, estado: EstadoAsistencia) -> StorageResult<Vec<Asistencia>>;
}

/// Access to every repository plus a liveness probe.
#[async_trait]
pub trait Store: Send + Sync {
    fn representantes(&self) -> &dyn RepresentanteRepository;
    fn estudiantes(&self) -> &dyn EstudianteRepository;
    fn docentes(&self) -> &dyn DocenteRepository;
    fn cursos(&self) -> &dyn CursoRepository;
    fn asignaturas(&self) -> &dyn AsignaturaRepository;
    fn matriculas(&self) -> &dyn MatriculaRepository;
    fn calificaciones(&self) -> &dyn CalificacionRepository;
    fn asistencias(&self) -> &dyn AsistenciaRepository;

    /// Round-trips to the backing store.
    async fn ping(&self) -> StorageResult<()>;
}
