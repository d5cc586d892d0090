//! In-memory store for tests.
//!
//! Rows live in a `BTreeMap` keyed by id, so iteration order matches the
//! `ORDER BY id` of the PostgreSQL store. Ids are assigned from 1 and never
//! reused. The UNIQUE constraints of the schema are reproduced through a
//! per-table key function, so duplicate writes fail with
//! [`StorageError::UniqueViolation`] exactly as they do against PostgreSQL.
//! Foreign keys and cascades are not emulated.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

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

use crate::repository::{
    AsignaturaRepository, AsistenciaRepository, CalificacionRepository, CursoRepository,
    DocenteRepository, EstudianteRepository, MatriculaRepository, Repository,
    RepresentanteRepository, Store, StorageResult,
};

struct Table<E> {
    rows: BTreeMap<i32, E>,
    next_id: i32,
}

/// Name of a unique constraint and the key it covers.
type UniqueKey<E> = (&'static str, fn(&E) -> String);

pub struct MemoryRepository<E> {
    table: Mutex<Table<E>>,
    unique: Option<UniqueKey<E>>,
}

impl<E: Entity> MemoryRepository<E> {
    fn new() -> Self {
        Self {
            table: Mutex::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
            unique: None,
        }
    }

    fn with_unique(constraint: &'static str, key: fn(&E) -> String) -> Self {
        Self {
            unique: Some((constraint, key)),
            ..Self::new()
        }
    }

    fn lock(&self) -> MutexGuard<'_, Table<E>> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_unique(&self, table: &Table<E>, candidate: &E) -> StorageResult<()> {
        let Some((constraint, key)) = self.unique else {
            return Ok(());
        };
        let wanted = key(candidate);
        let taken = table
            .rows
            .values()
            .any(|row| row.id() != candidate.id() && key(row) == wanted);
        if taken {
            return Err(StorageError::UniqueViolation {
                entity: E::NAME,
                constraint: constraint.to_string(),
            });
        }
        Ok(())
    }

    fn filter(&self, pred: impl Fn(&E) -> bool) -> Vec<E> {
        self.lock()
            .rows
            .values()
            .filter(|row| pred(row))
            .cloned()
            .collect()
    }

    fn find(&self, pred: impl Fn(&E) -> bool) -> Option<E> {
        self.lock().rows.values().find(|row| pred(row)).cloned()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    async fn create(&self, new: E::New) -> StorageResult<E> {
        let mut table = self.lock();
        let row = E::from_new(E::Id::from(table.next_id), new);
        self.check_unique(&table, &row)?;
        table.next_id += 1;
        table.rows.insert(row.id().into(), row.clone());
        Ok(row)
    }

    async fn read(&self, id: E::Id) -> StorageResult<Option<E>> {
        let key: i32 = id.into();
        Ok(self.lock().rows.get(&key).cloned())
    }

    async fn read_all(&self, skip: i64, limit: i64) -> StorageResult<Vec<E>> {
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(self
            .lock()
            .rows
            .values()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn update(&self, id: E::Id, patch: E::Patch) -> StorageResult<Option<E>> {
        let key: i32 = id.into();
        let mut table = self.lock();
        let Some(mut row) = table.rows.get(&key).cloned() else {
            return Ok(None);
        };
        row.apply(patch);
        self.check_unique(&table, &row)?;
        table.rows.insert(key, row.clone());
        Ok(Some(row))
    }

    async fn delete(&self, id: E::Id) -> StorageResult<bool> {
        let key: i32 = id.into();
        Ok(self.lock().rows.remove(&key).is_some())
    }

    async fn count(&self) -> StorageResult<i64> {
        Ok(self.lock().rows.len() as i64)
    }
}

#[async_trait]
impl RepresentanteRepository for MemoryRepository<Representante> {
    async fn get_by_telefono(&self, telefono: &str) -> StorageResult<Option<Representante>> {
        Ok(self.find(|r| r.telefono == telefono))
    }
}

#[async_trait]
impl EstudianteRepository for MemoryRepository<Estudiante> {
    async fn get_by_cedula(&self, cedula: &str) -> StorageResult<Option<Estudiante>> {
        Ok(self.find(|e| e.cedula == cedula))
    }

    async fn get_by_correo(&self, correo: &str) -> StorageResult<Option<Estudiante>> {
        Ok(self.find(|e| e.correo.as_deref() == Some(correo)))
    }

    async fn get_by_representante(&self, id: RepresentanteId) -> StorageResult<Vec<Estudiante>> {
        Ok(self.filter(|e| e.representante_id == Some(id)))
    }
}

#[async_trait]
impl DocenteRepository for MemoryRepository<Docente> {
    async fn get_by_correo(&self, correo: &str) -> StorageResult<Option<Docente>> {
        Ok(self.find(|d| d.correo == correo))
    }
}

#[async_trait]
impl CursoRepository for MemoryRepository<Curso> {
    async fn get_by_nombre(&self, nombre: &str) -> StorageResult<Option<Curso>> {
        Ok(self.find(|c| c.nombre == nombre))
    }

    async fn get_by_nivel(&self, nivel: &str) -> StorageResult<Vec<Curso>> {
        Ok(self.filter(|c| c.nivel == nivel))
    }
}

#[async_trait]
impl AsignaturaRepository for MemoryRepository<Asignatura> {
    async fn get_by_curso(&self, id: CursoId) -> StorageResult<Vec<Asignatura>> {
        Ok(self.filter(|a| a.curso_id == id))
    }

    async fn get_by_docente(&self, id: DocenteId) -> StorageResult<Vec<Asignatura>> {
        Ok(self.filter(|a| a.docente_id == Some(id)))
    }
}

#[async_trait]
impl MatriculaRepository for MemoryRepository<Matricula> {
    async fn get_by_estudiante(&self, id: EstudianteId) -> StorageResult<Vec<Matricula>> {
        Ok(self.filter(|m| m.estudiante_id == id))
    }

    async fn get_by_curso(&self, id: CursoId) -> StorageResult<Vec<Matricula>> {
        Ok(self.filter(|m| m.curso_id == id))
    }

    async fn get_by_estado(&self, estado: EstadoMatricula) -> StorageResult<Vec<Matricula>> {
        Ok(self.filter(|m| m.estado == estado))
    }

    async fn get_estudiante_en_curso(
        &self,
        estudiante_id: EstudianteId,
        curso_id: CursoId,
    ) -> StorageResult<Option<Matricula>> {
        Ok(self.find(|m| m.estudiante_id == estudiante_id && m.curso_id == curso_id))
    }
}

#[async_trait]
impl CalificacionRepository for MemoryRepository<Calificacion> {
    async fn get_by_matricula(&self, id: MatriculaId) -> StorageResult<Vec<Calificacion>> {
        Ok(self.filter(|c| c.matricula_id == id))
    }

    async fn get_by_asignatura(&self, id: AsignaturaId) -> StorageResult<Vec<Calificacion>> {
        Ok(self.filter(|c| c.asignatura_id == id))
    }

    async fn get_by_quimestre(&self, quimestre: i32) -> StorageResult<Vec<Calificacion>> {
        Ok(self.filter(|c| c.quimestre == quimestre))
    }

    async fn promedio_por_matricula(&self, id: MatriculaId) -> StorageResult<f64> {
        let notas: Vec<f64> = self
            .filter(|c| c.matricula_id == id)
            .into_iter()
            .map(|c| c.nota)
            .collect();
        if notas.is_empty() {
            return Ok(0.0);
        }
        Ok(notas.iter().sum::<f64>() / notas.len() as f64)
    }
}

#[async_trait]
impl AsistenciaRepository for MemoryRepository<Asistencia> {
    async fn get_by_matricula(&self, id: MatriculaId) -> StorageResult<Vec<Asistencia>> {
        let mut rows = self.filter(|a| a.matricula_id == id);
        rows.sort_by_key(|a| (a.fecha, a.id));
        Ok(rows)
    }

    async fn get_by_asignatura(&self, id: AsignaturaId) -> StorageResult<Vec<Asistencia>> {
        let mut rows = self.filter(|a| a.asignatura_id == id);
        rows.sort_by_key(|a| (a.fecha, a.id));
        Ok(rows)
    }

    async fn get_by_estado(&self, estado: EstadoAsistencia) -> StorageResult<Vec<Asistencia>> {
        Ok(self.filter(|a| a.estado == estado))
    }
}

/// Process-local [`Store`]. Each instance starts empty.
pub struct MemoryStore {
    representantes: MemoryRepository<Representante>,
    estudiantes: MemoryRepository<Estudiante>,
    docentes: MemoryRepository<Docente>,
    cursos: MemoryRepository<Curso>,
    asignaturas: MemoryRepository<Asignatura>,
    matriculas: MemoryRepository<Matricula>,
    calificaciones: MemoryRepository<Calificacion>,
    asistencias: MemoryRepository<Asistencia>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            representantes: MemoryRepository::new(),
            estudiantes: MemoryRepository::with_unique("estudiantes_cedula_key", |e| {
                e.cedula.clone()
            }),
            docentes: MemoryRepository::with_unique("docentes_correo_key", |d| d.correo.clone()),
            cursos: MemoryRepository::new(),
            asignaturas: MemoryRepository::new(),
            matriculas: MemoryRepository::with_unique("matriculas_estudiante_curso_key", |m| {
                format!("{}:{}", m.estudiante_id, m.curso_id)
            }),
            calificaciones: MemoryRepository::new(),
            asistencias: MemoryRepository::new(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn representantes(&self) -> &dyn RepresentanteRepository {
        &self.representantes
    }

    fn estudiantes(&self) -> &dyn EstudianteRepository {
        &self.estudiantes
    }

    fn docentes(&self) -> &dyn DocenteRepository {
        &self.docentes
    }

    fn cursos(&self) -> &dyn CursoRepository {
        &self.cursos
    }

    fn asignaturas(&self) -> &dyn AsignaturaRepository {
        &self.asignaturas
    }

    fn matriculas(&self) -> &dyn MatriculaRepository {
        &self.matriculas
    }

    fn calificaciones(&self) -> &dyn CalificacionRepository {
        &self.calificaciones
    }

    fn asistencias(&self) -> &dyn AsistenciaRepository {
        &self.asistencias
    }

    async fn ping(&self) -> StorageResult<()> {
        Ok(())
    }
}
