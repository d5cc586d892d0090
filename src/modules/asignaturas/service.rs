use tracing::{info, instrument};
use unidad_core::{Page, PaginationParams, ServiceError, ServiceResult};
use unidad_db::Store;
use unidad_models::cursos::Curso;
use unidad_models::docentes::Docente;
use unidad_models::{AsignaturaId, CursoId, DocenteId, Entity};
use unidad_observability::{track_entity_created, track_entity_deleted};

use crate::modules::asignaturas::model::{
    Asignatura, AsignaturaPatch, CreateAsignaturaDto, NewAsignatura, UpdateAsignaturaDto,
};
use crate::utils::listing::paginate;
use crate::utils::references::ensure_exists;
use crate::utils::text::{optional, required, required_if_present};

const NOMBRE_VACIO: &str = "El nombre de la asignatura no puede estar vacío";

fn no_encontrada(id: AsignaturaId) -> ServiceError {
    ServiceError::not_found(format!("Asignatura con ID {id} no encontrada"))
}

pub struct AsignaturaService<'a> {
    store: &'a dyn Store,
}

impl<'a> AsignaturaService<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    async fn validar_referencias(
        &self,
        curso_id: Option<CursoId>,
        docente_id: Option<DocenteId>,
    ) -> ServiceResult<()> {
        if let Some(curso_id) = curso_id {
            ensure_exists::<Curso, _>(self.store.cursos(), curso_id).await?;
        }
        if let Some(docente_id) = docente_id {
            ensure_exists::<Docente, _>(self.store.docentes(), docente_id).await?;
        }
        Ok(())
    }

    /// The curso must exist; the docente is optional but must exist when given.
    #[instrument(skip(self))]
    pub async fn crear(&self, dto: CreateAsignaturaDto) -> ServiceResult<Asignatura> {
        self.validar_referencias(Some(dto.curso_id), dto.docente_id)
            .await?;

        let nueva = NewAsignatura {
            nombre: required(&dto.nombre, NOMBRE_VACIO)?,
            descripcion: optional(dto.descripcion),
            curso_id: dto.curso_id,
            docente_id: dto.docente_id,
        };

        let asignatura = self.store.asignaturas().create(nueva).await?;

        info!(id = %asignatura.id, curso_id = %asignatura.curso_id, "Asignatura creada");
        track_entity_created(Asignatura::NAME);
        Ok(asignatura)
    }

    #[instrument(skip(self))]
    pub async fn obtener(&self, id: AsignaturaId) -> ServiceResult<Asignatura> {
        self.store
            .asignaturas()
            .read(id)
            .await?
            .ok_or_else(|| no_encontrada(id))
    }

    #[instrument(skip(self))]
    pub async fn listar(&self, params: &PaginationParams) -> ServiceResult<Page<Asignatura>> {
        paginate(self.store.asignaturas(), params).await
    }

    #[instrument(skip(self))]
    pub async fn listar_por_curso(&self, curso_id: CursoId) -> ServiceResult<Vec<Asignatura>> {
        Ok(self.store.asignaturas().get_by_curso(curso_id).await?)
    }

    #[instrument(skip(self))]
    pub async fn listar_por_docente(&self, docente_id: DocenteId) -> ServiceResult<Vec<Asignatura>> {
        Ok(self.store.asignaturas().get_by_docente(docente_id).await?)
    }

    #[instrument(skip(self))]
    pub async fn actualizar(
        &self,
        id: AsignaturaId,
        dto: UpdateAsignaturaDto,
    ) -> ServiceResult<Asignatura> {
        self.obtener(id).await?;
        self.validar_referencias(dto.curso_id, dto.docente_id)
            .await?;

        let patch = AsignaturaPatch {
            nombre: required_if_present(dto.nombre, NOMBRE_VACIO)?,
            descripcion: optional(dto.descripcion),
            curso_id: dto.curso_id,
            docente_id: dto.docente_id,
        };

        self.store
            .asignaturas()
            .update(id, patch)
            .await?
            .ok_or_else(|| no_encontrada(id))
    }

    #[instrument(skip(self))]
    pub async fn eliminar(&self, id: AsignaturaId) -> ServiceResult<()> {
        if !self.store.asignaturas().delete(id).await? {
            return Err(no_encontrada(id));
        }
        info!(%id, "Asignatura eliminada");
        track_entity_deleted(Asignatura::NAME);
        Ok(())
    }
}
