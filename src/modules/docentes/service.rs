use tracing::{info, instrument};
use unidad_core::{Page, PaginationParams, ServiceError, ServiceResult};
use unidad_db::Store;
use unidad_models::{DocenteId, Entity};
use unidad_observability::{track_entity_created, track_entity_deleted};

use crate::modules::docentes::model::{
    CreateDocenteDto, Docente, DocentePatch, NewDocente, UpdateDocenteDto,
};
use crate::utils::listing::paginate;
use crate::utils::text::{optional, required, required_if_present};

const NOMBRE_VACIO: &str = "El nombre no puede estar vacío";
const APELLIDO_VACIO: &str = "El apellido no puede estar vacío";

fn no_encontrado(id: DocenteId) -> ServiceError {
    ServiceError::not_found(format!("Docente con ID {id} no encontrado"))
}

fn correo_duplicado(correo: &str) -> String {
    format!("Ya existe un docente con correo {correo}")
}

/// Trimmed and lower-cased before any comparison or storage.
fn normalizar_correo(correo: &str) -> String {
    correo.trim().to_lowercase()
}

fn validar_correo(correo: &str) -> ServiceResult<()> {
    if !correo.contains('@') || !correo.contains('.') {
        return Err(ServiceError::validation("Correo inválido"));
    }
    Ok(())
}

pub struct DocenteService<'a> {
    store: &'a dyn Store,
}

impl<'a> DocenteService<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn crear(&self, dto: CreateDocenteDto) -> ServiceResult<Docente> {
        let repo = self.store.docentes();
        let correo = normalizar_correo(&dto.correo);

        if repo.get_by_correo(&correo).await?.is_some() {
            return Err(ServiceError::duplicate(correo_duplicado(&correo)));
        }
        validar_correo(&correo)?;

        let nuevo = NewDocente {
            nombre: required(&dto.nombre, NOMBRE_VACIO)?,
            apellido: required(&dto.apellido, APELLIDO_VACIO)?,
            titulo: optional(dto.titulo),
            correo: correo.clone(),
        };

        let docente = repo
            .create(nuevo)
            .await
            .map_err(|e| ServiceError::from(e).or_duplicate(|| correo_duplicado(&correo)))?;

        info!(id = %docente.id, "Docente creado");
        track_entity_created(Docente::NAME);
        Ok(docente)
    }

    #[instrument(skip(self))]
    pub async fn obtener(&self, id: DocenteId) -> ServiceResult<Docente> {
        self.store
            .docentes()
            .read(id)
            .await?
            .ok_or_else(|| no_encontrado(id))
    }

    #[instrument(skip(self))]
    pub async fn listar(&self, params: &PaginationParams) -> ServiceResult<Page<Docente>> {
        paginate(self.store.docentes(), params).await
    }

    #[instrument(skip(self))]
    pub async fn actualizar(&self, id: DocenteId, dto: UpdateDocenteDto) -> ServiceResult<Docente> {
        let repo = self.store.docentes();
        self.obtener(id).await?;

        let correo = dto.correo.as_deref().map(normalizar_correo);
        if let Some(correo) = &correo {
            if let Some(existente) = repo.get_by_correo(correo).await?
                && existente.id != id
            {
                return Err(ServiceError::duplicate(correo_duplicado(correo)));
            }
            validar_correo(correo)?;
        }

        let patch = DocentePatch {
            nombre: required_if_present(dto.nombre, NOMBRE_VACIO)?,
            apellido: required_if_present(dto.apellido, APELLIDO_VACIO)?,
            titulo: optional(dto.titulo),
            correo: correo.clone(),
        };

        repo.update(id, patch)
            .await
            .map_err(|e| {
                ServiceError::from(e)
                    .or_duplicate(|| correo_duplicado(correo.as_deref().unwrap_or_default()))
            })?
            .ok_or_else(|| no_encontrado(id))
    }

    #[instrument(skip(self))]
    pub async fn eliminar(&self, id: DocenteId) -> ServiceResult<()> {
        if !self.store.docentes().delete(id).await? {
            return Err(no_encontrado(id));
        }
        info!(%id, "Docente eliminado");
        track_entity_deleted(Docente::NAME);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unidad_db::MemoryStore;

    fn dto(correo: &str) -> CreateDocenteDto {
        CreateDocenteDto {
            nombre: "Laura".to_string(),
            apellido: "Mena".to_string(),
            titulo: Some("Lic. en Matemáticas".to_string()),
            correo: correo.to_string(),
        }
    }

    #[test]
    fn test_validar_correo_is_minimal() {
        assert!(validar_correo("laura@escuela.edu").is_ok());
        assert!(validar_correo("laura.escuela.edu").is_err());
        assert!(validar_correo("laura@escuela").is_err());
    }

    #[tokio::test]
    async fn test_crear_stores_lowercase_correo() {
        let store = MemoryStore::new();
        let service = DocenteService::new(&store);

        let docente = service.crear(dto("  Laura.Mena@Escuela.EDU ")).await.unwrap();
        assert_eq!(docente.correo, "laura.mena@escuela.edu");
    }

    #[tokio::test]
    async fn test_crear_duplicate_correo_ignores_case() {
        let store = MemoryStore::new();
        let service = DocenteService::new(&store);
        service.crear(dto("laura@escuela.edu")).await.unwrap();

        let err = service.crear(dto("LAURA@escuela.edu")).await.unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(err.to_string(), "Ya existe un docente con correo laura@escuela.edu");
    }

    #[tokio::test]
    async fn test_crear_rejects_malformed_correo() {
        let store = MemoryStore::new();
        let service = DocenteService::new(&store);

        let err = service.crear(dto("sin-arroba")).await.unwrap_err();
        assert!(err.is_validation());
        assert!(!err.is_duplicate());
        assert_eq!(err.to_string(), "Correo inválido");
    }

    #[tokio::test]
    async fn test_actualizar_correo() {
        let store = MemoryStore::new();
        let service = DocenteService::new(&store);
        service.crear(dto("a@escuela.edu")).await.unwrap();
        let b = service.crear(dto("b@escuela.edu")).await.unwrap();

        let err = service
            .actualizar(
                b.id,
                UpdateDocenteDto {
                    correo: Some("A@escuela.edu".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_duplicate());

        let updated = service
            .actualizar(
                b.id,
                UpdateDocenteDto {
                    correo: Some("C@Escuela.edu".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.correo, "c@escuela.edu");
        assert_eq!(updated.titulo, b.titulo);
    }

    #[tokio::test]
    async fn test_missing_docente() {
        let store = MemoryStore::new();
        let service = DocenteService::new(&store);

        assert!(service.obtener(DocenteId::new(3)).await.unwrap_err().is_not_found());
        assert!(service.eliminar(DocenteId::new(3)).await.unwrap_err().is_not_found());
    }
}
