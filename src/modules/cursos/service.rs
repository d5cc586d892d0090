use tracing::{info, instrument};
use unidad_core::{Page, PaginationParams, ServiceError, ServiceResult};
use unidad_db::Store;
use unidad_models::asignaturas::Asignatura;
use unidad_models::matriculas::Matricula;
use unidad_models::{CursoId, Entity};
use unidad_observability::{track_entity_created, track_entity_deleted};

use crate::modules::cursos::model::{CreateCursoDto, Curso, CursoPatch, NewCurso, UpdateCursoDto};
use crate::utils::listing::paginate;
use crate::utils::text::{required, required_if_present};

const NOMBRE_VACIO: &str = "El nombre del curso no puede estar vacío";
const NIVEL_VACIO: &str = "El nivel no puede estar vacío";

fn no_encontrado(id: CursoId) -> ServiceError {
    ServiceError::not_found(format!("Curso con ID {id} no encontrado"))
}

pub struct CursoService<'a> {
    store: &'a dyn Store,
}

impl<'a> CursoService<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn crear(&self, dto: CreateCursoDto) -> ServiceResult<Curso> {
        let nuevo = NewCurso {
            nombre: required(&dto.nombre, NOMBRE_VACIO)?,
            nivel: required(&dto.nivel, NIVEL_VACIO)?,
        };

        let curso = self.store.cursos().create(nuevo).await?;

        info!(id = %curso.id, nombre = %curso.nombre, "Curso creado");
        track_entity_created(Curso::NAME);
        Ok(curso)
    }

    #[instrument(skip(self))]
    pub async fn obtener(&self, id: CursoId) -> ServiceResult<Curso> {
        self.store
            .cursos()
            .read(id)
            .await?
            .ok_or_else(|| no_encontrado(id))
    }

    #[instrument(skip(self))]
    pub async fn obtener_por_nombre(&self, nombre: &str) -> ServiceResult<Curso> {
        let nombre = nombre.trim();
        self.store
            .cursos()
            .get_by_nombre(nombre)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found(format!("Curso con nombre {nombre} no encontrado"))
            })
    }

    /// Every course of one level; an unknown level yields an empty list.
    #[instrument(skip(self))]
    pub async fn listar_por_nivel(&self, nivel: &str) -> ServiceResult<Vec<Curso>> {
        Ok(self.store.cursos().get_by_nivel(nivel.trim()).await?)
    }

    #[instrument(skip(self))]
    pub async fn listar(&self, params: &PaginationParams) -> ServiceResult<Page<Curso>> {
        paginate(self.store.cursos(), params).await
    }

    #[instrument(skip(self))]
    pub async fn listar_asignaturas(&self, id: CursoId) -> ServiceResult<Vec<Asignatura>> {
        self.obtener(id).await?;
        Ok(self.store.asignaturas().get_by_curso(id).await?)
    }

    #[instrument(skip(self))]
    pub async fn listar_matriculas(&self, id: CursoId) -> ServiceResult<Vec<Matricula>> {
        self.obtener(id).await?;
        Ok(self.store.matriculas().get_by_curso(id).await?)
    }

    #[instrument(skip(self))]
    pub async fn actualizar(&self, id: CursoId, dto: UpdateCursoDto) -> ServiceResult<Curso> {
        self.obtener(id).await?;

        let patch = CursoPatch {
            nombre: required_if_present(dto.nombre, NOMBRE_VACIO)?,
            nivel: required_if_present(dto.nivel, NIVEL_VACIO)?,
        };

        self.store
            .cursos()
            .update(id, patch)
            .await?
            .ok_or_else(|| no_encontrado(id))
    }

    #[instrument(skip(self))]
    pub async fn eliminar(&self, id: CursoId) -> ServiceResult<()> {
        if !self.store.cursos().delete(id).await? {
            return Err(no_encontrado(id));
        }
        info!(%id, "Curso eliminado");
        track_entity_deleted(Curso::NAME);
        Ok(())
    }
}
