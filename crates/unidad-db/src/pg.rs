//! PostgreSQL implementation of the repository contract.
//!
//! Reads, paging, deletes and counts are shared by every entity and built
//! from [`Entity::TABLE`]. Inserts and partial updates differ per table and
//! live in the [`PgEntity`] impls. Partial updates use `COALESCE($n, col)`,
//! so a `None` patch field keeps the stored value.

use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgRow;
use sqlx::FromRow;
use tracing::debug;
use unidad_core::{StorageError, StorageOp};
use unidad_models::asignaturas::{Asignatura, AsignaturaPatch, NewAsignatura};
use unidad_models::asistencias::{Asistencia, AsistenciaPatch, NewAsistencia};
use unidad_models::calificaciones::{Calificacion, CalificacionPatch, NewCalificacion};
use unidad_models::cursos::{Curso, CursoPatch, NewCurso};
use unidad_models::docentes::{Docente, DocentePatch, NewDocente};
use unidad_models::estudiantes::{Estudiante, EstudiantePatch, NewEstudiante};
use unidad_models::matriculas::{Matricula, MatriculaPatch, NewMatricula};
use unidad_models::representantes::{NewRepresentante, Representante, RepresentantePatch};
use unidad_models::{
    AsignaturaId, AsistenciaId, CalificacionId, CursoId, DocenteId, Entity, EstadoAsistencia,
    EstadoMatricula, EstudianteId, MatriculaId, RepresentanteId,
};

use crate::repository::{
    AsignaturaRepository, AsistenciaRepository, CalificacionRepository, CursoRepository,
    DocenteRepository, EstudianteRepository, MatriculaRepository, Repository,
    RepresentanteRepository, Store, StorageResult,
};

/// Table-specific INSERT and UPDATE statements.
#[async_trait]
pub trait PgEntity: Entity + for<'r> FromRow<'r, PgRow> + Unpin {
    async fn insert(pool: &PgPool, new: Self::New) -> Result<Self, sqlx::Error>;

    async fn update(
        pool: &PgPool,
        id: Self::Id,
        patch: Self::Patch,
    ) -> Result<Option<Self>, sqlx::Error>;
}

fn read_err<E: Entity>(err: sqlx::Error) -> StorageError {
    StorageError::from_sqlx(E::NAME, StorageOp::Read, err)
}

pub struct PgRepository<E> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E> PgRepository<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E: PgEntity> Repository<E> for PgRepository<E> {
    async fn create(&self, new: E::New) -> StorageResult<E> {
        let row = E::insert(&self.pool, new)
            .await
            .map_err(|e| StorageError::from_sqlx(E::NAME, StorageOp::Create, e))?;
        debug!(entity = E::NAME, id = %row.id(), "row inserted");
        Ok(row)
    }

    async fn read(&self, id: E::Id) -> StorageResult<Option<E>> {
        let id: i32 = id.into();
        let sql = format!("SELECT * FROM {} WHERE id = $1", E::TABLE);
        sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(read_err::<E>)
    }

    async fn read_all(&self, skip: i64, limit: i64) -> StorageResult<Vec<E>> {
        let sql = format!(
            "SELECT * FROM {} ORDER BY id OFFSET $1 LIMIT $2",
            E::TABLE
        );
        sqlx::query_as::<_, E>(&sql)
            .bind(skip.max(0))
            .bind(limit.max(0))
            .fetch_all(&self.pool)
            .await
            .map_err(read_err::<E>)
    }

    async fn update(&self, id: E::Id, patch: E::Patch) -> StorageResult<Option<E>> {
        E::update(&self.pool, id, patch)
            .await
            .map_err(|e| StorageError::from_sqlx(E::NAME, StorageOp::Update, e))
    }

    async fn delete(&self, id: E::Id) -> StorageResult<bool> {
        let id: i32 = id.into();
        let sql = format!("DELETE FROM {} WHERE id = $1", E::TABLE);
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::from_sqlx(E::NAME, StorageOp::Delete, e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> StorageResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", E::TABLE);
        sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StorageError::from_sqlx(E::NAME, StorageOp::Count, e))
    }
}

#[async_trait]
impl PgEntity for Representante {
    async fn insert(pool: &PgPool, new: NewRepresentante) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Representante>(
            "INSERT INTO representantes (nombre, telefono) VALUES ($1, $2) RETURNING *",
        )
        .bind(new.nombre)
        .bind(new.telefono)
        .fetch_one(pool)
        .await
    }

    async fn update(
        pool: &PgPool,
        id: RepresentanteId,
        patch: RepresentantePatch,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Representante>(
            r#"
            UPDATE representantes
            SET nombre = COALESCE($2, nombre),
                telefono = COALESCE($3, telefono)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.nombre)
        .bind(patch.telefono)
        .fetch_optional(pool)
        .await
    }
}

#[async_trait]
impl PgEntity for Estudiante {
    async fn insert(pool: &PgPool, new: NewEstudiante) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Estudiante>(
            r#"
            INSERT INTO estudiantes
                (nombre, apellido, cedula, fecha_nacimiento, correo, representante_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(new.nombre)
        .bind(new.apellido)
        .bind(new.cedula)
        .bind(new.fecha_nacimiento)
        .bind(new.correo)
        .bind(new.representante_id)
        .fetch_one(pool)
        .await
    }

    async fn update(
        pool: &PgPool,
        id: EstudianteId,
        patch: EstudiantePatch,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Estudiante>(
            r#"
            UPDATE estudiantes
            SET nombre = COALESCE($2, nombre),
                apellido = COALESCE($3, apellido),
                cedula = COALESCE($4, cedula),
                fecha_nacimiento = COALESCE($5, fecha_nacimiento),
                correo = COALESCE($6, correo),
                representante_id = COALESCE($7, representante_id)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.nombre)
        .bind(patch.apellido)
        .bind(patch.cedula)
        .bind(patch.fecha_nacimiento)
        .bind(patch.correo)
        .bind(patch.representante_id)
        .fetch_optional(pool)
        .await
    }
}

#[async_trait]
impl PgEntity for Docente {
    async fn insert(pool: &PgPool, new: NewDocente) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Docente>(
            r#"
            INSERT INTO docentes (nombre, apellido, titulo, correo)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(new.nombre)
        .bind(new.apellido)
        .bind(new.titulo)
        .bind(new.correo)
        .fetch_one(pool)
        .await
    }

    async fn update(
        pool: &PgPool,
        id: DocenteId,
        patch: DocentePatch,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Docente>(
            r#"
            UPDATE docentes
            SET nombre = COALESCE($2, nombre),
                apellido = COALESCE($3, apellido),
                titulo = COALESCE($4, titulo),
                correo = COALESCE($5, correo)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.nombre)
        .bind(patch.apellido)
        .bind(patch.titulo)
        .bind(patch.correo)
        .fetch_optional(pool)
        .await
    }
}

#[async_trait]
impl PgEntity for Curso {
    async fn insert(pool: &PgPool, new: NewCurso) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Curso>("INSERT INTO cursos (nombre, nivel) VALUES ($1, $2) RETURNING *")
            .bind(new.nombre)
            .bind(new.nivel)
            .fetch_one(pool)
            .await
    }

    async fn update(
        pool: &PgPool,
        id: CursoId,
        patch: CursoPatch,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Curso>(
            r#"
            UPDATE cursos
            SET nombre = COALESCE($2, nombre),
                nivel = COALESCE($3, nivel)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.nombre)
        .bind(patch.nivel)
        .fetch_optional(pool)
        .await
    }
}

#[async_trait]
impl PgEntity for Asignatura {
    async fn insert(pool: &PgPool, new: NewAsignatura) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Asignatura>(
            r#"
            INSERT INTO asignaturas (nombre, descripcion, curso_id, docente_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(new.nombre)
        .bind(new.descripcion)
        .bind(new.curso_id)
        .bind(new.docente_id)
        .fetch_one(pool)
        .await
    }

    async fn update(
        pool: &PgPool,
        id: AsignaturaId,
        patch: AsignaturaPatch,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Asignatura>(
            r#"
            UPDATE asignaturas
            SET nombre = COALESCE($2, nombre),
                descripcion = COALESCE($3, descripcion),
                curso_id = COALESCE($4, curso_id),
                docente_id = COALESCE($5, docente_id)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.nombre)
        .bind(patch.descripcion)
        .bind(patch.curso_id)
        .bind(patch.docente_id)
        .fetch_optional(pool)
        .await
    }
}

#[async_trait]
impl PgEntity for Matricula {
    async fn insert(pool: &PgPool, new: NewMatricula) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Matricula>(
            r#"
            INSERT INTO matriculas (fecha, estudiante_id, curso_id, estado)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(new.fecha)
        .bind(new.estudiante_id)
        .bind(new.curso_id)
        .bind(new.estado)
        .fetch_one(pool)
        .await
    }

    async fn update(
        pool: &PgPool,
        id: MatriculaId,
        patch: MatriculaPatch,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Matricula>(
            r#"
            UPDATE matriculas
            SET fecha = COALESCE($2, fecha),
                estudiante_id = COALESCE($3, estudiante_id),
                curso_id = COALESCE($4, curso_id),
                estado = COALESCE($5, estado)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.fecha)
        .bind(patch.estudiante_id)
        .bind(patch.curso_id)
        .bind(patch.estado)
        .fetch_optional(pool)
        .await
    }
}

#[async_trait]
impl PgEntity for Calificacion {
    async fn insert(pool: &PgPool, new: NewCalificacion) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Calificacion>(
            r#"
            INSERT INTO calificaciones (nota, quimestre, matricula_id, asignatura_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(new.nota)
        .bind(new.quimestre)
        .bind(new.matricula_id)
        .bind(new.asignatura_id)
        .fetch_one(pool)
        .await
    }

    async fn update(
        pool: &PgPool,
        id: CalificacionId,
        patch: CalificacionPatch,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Calificacion>(
            r#"
            UPDATE calificaciones
            SET nota = COALESCE($2, nota),
                quimestre = COALESCE($3, quimestre),
                matricula_id = COALESCE($4, matricula_id),
                asignatura_id = COALESCE($5, asignatura_id)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.nota)
        .bind(patch.quimestre)
        .bind(patch.matricula_id)
        .bind(patch.asignatura_id)
        .fetch_optional(pool)
        .await
    }
}

#[async_trait]
impl PgEntity for Asistencia {
    async fn insert(pool: &PgPool, new: NewAsistencia) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Asistencia>(
            r#"
            INSERT INTO asistencias (fecha, estado, matricula_id, asignatura_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(new.fecha)
        .bind(new.estado)
        .bind(new.matricula_id)
        .bind(new.asignatura_id)
        .fetch_one(pool)
        .await
    }

    async fn update(
        pool: &PgPool,
        id: AsistenciaId,
        patch: AsistenciaPatch,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Asistencia>(
            r#"
            UPDATE asistencias
            SET fecha = COALESCE($2, fecha),
                estado = COALESCE($3, estado),
                matricula_id = COALESCE($4, matricula_id),
                asignatura_id = COALESCE($5, asignatura_id)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.fecha)
        .bind(patch.estado)
        .bind(patch.matricula_id)
        .bind(patch.asignatura_id)
        .fetch_optional(pool)
        .await
    }
}

#[async_trait]
impl RepresentanteRepository for PgRepository<Representante> {
    async fn get_by_telefono(&self, telefono: &str) -> StorageResult<Option<Representante>> {
        sqlx::query_as::<_, Representante>(
            "SELECT * FROM representantes WHERE telefono = $1 ORDER BY id LIMIT 1",
        )
        .bind(telefono)
        .fetch_optional(&self.pool)
        .await
        .map_err(read_err::<Representante>)
    }
}

#[async_trait]
impl EstudianteRepository for PgRepository<Estudiante> {
    async fn get_by_cedula(&self, cedula: &str) -> StorageResult<Option<Estudiante>> {
        sqlx::query_as::<_, Estudiante>("SELECT * FROM estudiantes WHERE cedula = $1")
            .bind(cedula)
            .fetch_optional(&self.pool)
            .await
            .map_err(read_err::<Estudiante>)
    }

    async fn get_by_correo(&self, correo: &str) -> StorageResult<Option<Estudiante>> {
        sqlx::query_as::<_, Estudiante>(
            "SELECT * FROM estudiantes WHERE correo = $1 ORDER BY id LIMIT 1",
        )
        .bind(correo)
        .fetch_optional(&self.pool)
        .await
        .map_err(read_err::<Estudiante>)
    }

    async fn get_by_representante(&self, id: RepresentanteId) -> StorageResult<Vec<Estudiante>> {
        sqlx::query_as::<_, Estudiante>(
            "SELECT * FROM estudiantes WHERE representante_id = $1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(read_err::<Estudiante>)
    }
}

#[async_trait]
impl DocenteRepository for PgRepository<Docente> {
    async fn get_by_correo(&self, correo: &str) -> StorageResult<Option<Docente>> {
        sqlx::query_as::<_, Docente>("SELECT * FROM docentes WHERE correo = $1")
            .bind(correo)
            .fetch_optional(&self.pool)
            .await
            .map_err(read_err::<Docente>)
    }
}

#[async_trait]
impl CursoRepository for PgRepository<Curso> {
    async fn get_by_nombre(&self, nombre: &str) -> StorageResult<Option<Curso>> {
        sqlx::query_as::<_, Curso>("SELECT * FROM cursos WHERE nombre = $1 ORDER BY id LIMIT 1")
            .bind(nombre)
            .fetch_optional(&self.pool)
            .await
            .map_err(read_err::<Curso>)
    }

    async fn get_by_nivel(&self, nivel: &str) -> StorageResult<Vec<Curso>> {
        sqlx::query_as::<_, Curso>("SELECT * FROM cursos WHERE nivel = $1 ORDER BY id")
            .bind(nivel)
            .fetch_all(&self.pool)
            .await
            .map_err(read_err::<Curso>)
    }
}

#[async_trait]
impl AsignaturaRepository for PgRepository<Asignatura> {
    async fn get_by_curso(&self, id: CursoId) -> StorageResult<Vec<Asignatura>> {
        sqlx::query_as::<_, Asignatura>(
            "SELECT * FROM asignaturas WHERE curso_id = $1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(read_err::<Asignatura>)
    }

    async fn get_by_docente(&self, id: DocenteId) -> StorageResult<Vec<Asignatura>> {
        sqlx::query_as::<_, Asignatura>(
            "SELECT * FROM asignaturas WHERE docente_id = $1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(read_err::<Asignatura>)
    }
}

#[async_trait]
impl MatriculaRepository for PgRepository<Matricula> {
    async fn get_by_estudiante(&self, id: EstudianteId) -> StorageResult<Vec<Matricula>> {
        sqlx::query_as::<_, Matricula>(
            "SELECT * FROM matriculas WHERE estudiante_id = $1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(read_err::<Matricula>)
    }

    async fn get_by_curso(&self, id: CursoId) -> StorageResult<Vec<Matricula>> {
        sqlx::query_as::<_, Matricula>("SELECT * FROM matriculas WHERE curso_id = $1 ORDER BY id")
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .map_err(read_err::<Matricula>)
    }

    async fn get_by_estado(&self, estado: EstadoMatricula) -> StorageResult<Vec<Matricula>> {
        sqlx::query_as::<_, Matricula>("SELECT * FROM matriculas WHERE estado = $1 ORDER BY id")
            .bind(estado)
            .fetch_all(&self.pool)
            .await
            .map_err(read_err::<Matricula>)
    }

    async fn get_estudiante_en_curso(
        &self,
        estudiante_id: EstudianteId,
        curso_id: CursoId,
    ) -> StorageResult<Option<Matricula>> {
        sqlx::query_as::<_, Matricula>(
            "SELECT * FROM matriculas WHERE estudiante_id = $1 AND curso_id = $2",
        )
        .bind(estudiante_id)
        .bind(curso_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(read_err::<Matricula>)
    }
}

#[async_trait]
impl CalificacionRepository for PgRepository<Calificacion> {
    async fn get_by_matricula(&self, id: MatriculaId) -> StorageResult<Vec<Calificacion>> {
        sqlx::query_as::<_, Calificacion>(
            "SELECT * FROM calificaciones WHERE matricula_id = $1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(read_err::<Calificacion>)
    }

    async fn get_by_asignatura(&self, id: AsignaturaId) -> StorageResult<Vec<Calificacion>> {
        sqlx::query_as::<_, Calificacion>(
            "SELECT * FROM calificaciones WHERE asignatura_id = $1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(read_err::<Calificacion>)
    }

    async fn get_by_quimestre(&self, quimestre: i32) -> StorageResult<Vec<Calificacion>> {
        sqlx::query_as::<_, Calificacion>(
            "SELECT * FROM calificaciones WHERE quimestre = $1 ORDER BY id",
        )
        .bind(quimestre)
        .fetch_all(&self.pool)
        .await
        .map_err(read_err::<Calificacion>)
    }

    async fn promedio_por_matricula(&self, id: MatriculaId) -> StorageResult<f64> {
        sqlx::query_scalar::<_, f64>(
            "SELECT COALESCE(AVG(nota), 0.0)::DOUBLE PRECISION FROM calificaciones WHERE matricula_id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(read_err::<Calificacion>)
    }
}

#[async_trait]
impl AsistenciaRepository for PgRepository<Asistencia> {
    async fn get_by_matricula(&self, id: MatriculaId) -> StorageResult<Vec<Asistencia>> {
        sqlx::query_as::<_, Asistencia>(
            "SELECT * FROM asistencias WHERE matricula_id = $1 ORDER BY fecha, id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(read_err::<Asistencia>)
    }

    async fn get_by_asignatura(&self, id: AsignaturaId) -> StorageResult<Vec<Asistencia>> {
        sqlx::query_as::<_, Asistencia>(
            "SELECT * FROM asistencias WHERE asignatura_id = $1 ORDER BY fecha, id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(read_err::<Asistencia>)
    }

    async fn get_by_estado(&self, estado: EstadoAsistencia) -> StorageResult<Vec<Asistencia>> {
        sqlx::query_as::<_, Asistencia>("SELECT * FROM asistencias WHERE estado = $1 ORDER BY id")
            .bind(estado)
            .fetch_all(&self.pool)
            .await
            .map_err(read_err::<Asistencia>)
    }
}

/// Every repository backed by one shared [`PgPool`].
pub struct PgStore {
    pool: PgPool,
    representantes: PgRepository<Representante>,
    estudiantes: PgRepository<Estudiante>,
    docentes: PgRepository<Docente>,
    cursos: PgRepository<Curso>,
    asignaturas: PgRepository<Asignatura>,
    matriculas: PgRepository<Matricula>,
    calificaciones: PgRepository<Calificacion>,
    asistencias: PgRepository<Asistencia>,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            representantes: PgRepository::new(pool.clone()),
            estudiantes: PgRepository::new(pool.clone()),
            docentes: PgRepository::new(pool.clone()),
            cursos: PgRepository::new(pool.clone()),
            asignaturas: PgRepository::new(pool.clone()),
            matriculas: PgRepository::new(pool.clone()),
            calificaciones: PgRepository::new(pool.clone()),
            asistencias: PgRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
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
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| StorageError::from_sqlx("Base de datos", StorageOp::Read, e))
    }
}
