use tracing::{info, instrument};
use unidad_core::dates::today;
use unidad_core::{Page, PaginationParams, ServiceError, ServiceResult};
use unidad_db::Store;
use unidad_models::cursos::Curso;
use unidad_models::estudiantes::Estudiante;
use unidad_models::{CursoId, Entity, EstudianteId, MatriculaId};
use unidad_observability::{track_entity_created, track_entity_deleted};

use crate::modules::matriculas::model::{
    CreateMatriculaDto, EstadoMatricula, Matricula, MatriculaPatch, NewMatricula,
    UpdateMatriculaDto,
};
use crate::utils::listing::paginate;
use crate::utils::references::ensure_exists;
use crate::utils::text::estado;

const YA_MATRICULADO: &str = "Estudiante ya está matriculado en este curso";

fn no_encontrada(id: MatriculaId) -> ServiceError {
    ServiceError::not_found(format!("Matrícula con ID {id} no encontrada"))
}

/// Enrollments of students in courses.
///
/// Status changes are not restricted to the REGISTRADO → MATRICULADO →
/// ACTIVO progression; any known label can replace any other.
pub struct MatriculaService<'a> {
    store: &'a dyn Store,
}

impl<'a> MatriculaService<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Fails when another enrollment (not `actual`) already links the pair.
    async fn validar_unica(
        &self,
        estudiante_id: EstudianteId,
        curso_id: CursoId,
        actual: Option<MatriculaId>,
    ) -> ServiceResult<()> {
        let existente = self
            .store
            .matriculas()
            .get_estudiante_en_curso(estudiante_id, curso_id)
            .await?;

        match existente {
            Some(m) if Some(m.id) != actual => Err(ServiceError::duplicate(YA_MATRICULADO)),
            _ => Ok(()),
        }
    }

    /// Defaults to REGISTRADO, dated today.
    #[instrument(skip(self))]
    pub async fn crear(&self, dto: CreateMatriculaDto) -> ServiceResult<Matricula> {
        ensure_exists::<Estudiante, _>(self.store.estudiantes(), dto.estudiante_id).await?;
        ensure_exists::<Curso, _>(self.store.cursos(), dto.curso_id).await?;
        self.validar_unica(dto.estudiante_id, dto.curso_id, None)
            .await?;

        let estado_inicial = match dto.estado.as_deref() {
            Some(label) => estado(label)?,
            None => EstadoMatricula::default(),
        };

        let nueva = NewMatricula {
            fecha: dto.fecha.unwrap_or_else(today),
            estudiante_id: dto.estudiante_id,
            curso_id: dto.curso_id,
            estado: estado_inicial,
        };

        let matricula = self
            .store
            .matriculas()
            .create(nueva)
            .await
            .map_err(|e| ServiceError::from(e).or_duplicate(|| YA_MATRICULADO.to_string()))?;

        info!(
            id = %matricula.id,
            estudiante_id = %matricula.estudiante_id,
            curso_id = %matricula.curso_id,
            estado = %matricula.estado,
            "Matrícula creada"
        );
        track_entity_created(Matricula::NAME);
        Ok(matricula)
    }

    #[instrument(skip(self))]
    pub async fn obtener(&self, id: MatriculaId) -> ServiceResult<Matricula> {
        self.store
            .matriculas()
            .read(id)
            .await?
            .ok_or_else(|| no_encontrada(id))
    }

    #[instrument(skip(self))]
    pub async fn listar(&self, params: &PaginationParams) -> ServiceResult<Page<Matricula>> {
        paginate(self.store.matriculas(), params).await
    }

    #[instrument(skip(self))]
    pub async fn listar_por_estudiante(
        &self,
        estudiante_id: EstudianteId,
    ) -> ServiceResult<Vec<Matricula>> {
        Ok(self
            .store
            .matriculas()
            .get_by_estudiante(estudiante_id)
            .await?)
    }

    /// Unknown labels are rejected the same way as on create.
    #[instrument(skip(self))]
    pub async fn listar_por_estado(&self, label: &str) -> ServiceResult<Vec<Matricula>> {
        let estado = estado::<EstadoMatricula>(label)?;
        Ok(self.store.matriculas().get_by_estado(estado).await?)
    }

    /// The label is checked before the enrollment is looked up.
    #[instrument(skip(self))]
    pub async fn cambiar_estado(&self, id: MatriculaId, nuevo_estado: &str) -> ServiceResult<Matricula> {
        let nuevo: EstadoMatricula = estado(nuevo_estado)?;

        let matricula = self
            .store
            .matriculas()
            .update(
                id,
                MatriculaPatch {
                    estado: Some(nuevo),
                    ..Default::default()
                },
            )
            .await?
            .ok_or_else(|| no_encontrada(id))?;

        info!(%id, estado = %nuevo, "Estado de matrícula actualizado");
        Ok(matricula)
    }

    #[instrument(skip(self))]
    pub async fn actualizar(
        &self,
        id: MatriculaId,
        dto: UpdateMatriculaDto,
    ) -> ServiceResult<Matricula> {
        let actual = self.obtener(id).await?;

        if let Some(estudiante_id) = dto.estudiante_id {
            ensure_exists::<Estudiante, _>(self.store.estudiantes(), estudiante_id).await?;
        }
        if let Some(curso_id) = dto.curso_id {
            ensure_exists::<Curso, _>(self.store.cursos(), curso_id).await?;
        }
        if dto.estudiante_id.is_some() || dto.curso_id.is_some() {
            self.validar_unica(
                dto.estudiante_id.unwrap_or(actual.estudiante_id),
                dto.curso_id.unwrap_or(actual.curso_id),
                Some(id),
            )
            .await?;
        }

        let patch = MatriculaPatch {
            fecha: dto.fecha,
            estudiante_id: dto.estudiante_id,
            curso_id: dto.curso_id,
            estado: dto.estado.as_deref().map(estado::<EstadoMatricula>).transpose()?,
        };

        self.store
            .matriculas()
            .update(id, patch)
            .await
            .map_err(|e| ServiceError::from(e).or_duplicate(|| YA_MATRICULADO.to_string()))?
            .ok_or_else(|| no_encontrada(id))
    }

    #[instrument(skip(self))]
    pub async fn eliminar(&self, id: MatriculaId) -> ServiceResult<()> {
        if !self.store.matriculas().delete(id).await? {
            return Err(no_encontrada(id));
        }
        info!(%id, "Matrícula eliminada");
        track_entity_deleted(Matricula::NAME);
        Ok(())
    }
}
