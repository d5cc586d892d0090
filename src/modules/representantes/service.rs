use tracing::{info, instrument};
use unidad_core::{Page, PaginationParams, ServiceError, ServiceResult};
use unidad_db::Store;
use unidad_models::estudiantes::Estudiante;
use unidad_models::{Entity, RepresentanteId};
use unidad_observability::{track_entity_created, track_entity_deleted};

use crate::modules::representantes::model::{
    CreateRepresentanteDto, NewRepresentante, Representante, RepresentantePatch,
    UpdateRepresentanteDto,
};
use crate::utils::listing::paginate;
use crate::utils::text::{required, required_if_present};

const NOMBRE_VACIO: &str = "El nombre no puede estar vacío";
const TELEFONO_VACIO: &str = "El teléfono no puede estar vacío";

fn no_encontrado(id: RepresentanteId) -> ServiceError {
    ServiceError::not_found(format!("Representante con ID {id} no encontrado"))
}

pub struct RepresentanteService<'a> {
    store: &'a dyn Store,
}

impl<'a> RepresentanteService<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Both fields are trimmed and must not be blank.
    #[instrument(skip(self))]
    pub async fn crear(&self, dto: CreateRepresentanteDto) -> ServiceResult<Representante> {
        let nuevo = NewRepresentante {
            nombre: required(&dto.nombre, NOMBRE_VACIO)?,
            telefono: required(&dto.telefono, TELEFONO_VACIO)?,
        };

        let representante = self.store.representantes().create(nuevo).await?;

        info!(id = %representante.id, "Representante creado");
        track_entity_created(Representante::NAME);
        Ok(representante)
    }

    #[instrument(skip(self))]
    pub async fn obtener(&self, id: RepresentanteId) -> ServiceResult<Representante> {
        self.store
            .representantes()
            .read(id)
            .await?
            .ok_or_else(|| no_encontrado(id))
    }

    #[instrument(skip(self))]
    pub async fn obtener_por_telefono(&self, telefono: &str) -> ServiceResult<Representante> {
        let telefono = telefono.trim();
        self.store
            .representantes()
            .get_by_telefono(telefono)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found(format!(
                    "Representante con teléfono {telefono} no encontrado"
                ))
            })
    }

    #[instrument(skip(self))]
    pub async fn listar(&self, params: &PaginationParams) -> ServiceResult<Page<Representante>> {
        paginate(self.store.representantes(), params).await
    }

    /// Students linked to an existing guardian.
    #[instrument(skip(self))]
    pub async fn listar_estudiantes(&self, id: RepresentanteId) -> ServiceResult<Vec<Estudiante>> {
        self.obtener(id).await?;
        Ok(self.store.estudiantes().get_by_representante(id).await?)
    }

    #[instrument(skip(self))]
    pub async fn actualizar(
        &self,
        id: RepresentanteId,
        dto: UpdateRepresentanteDto,
    ) -> ServiceResult<Representante> {
        self.obtener(id).await?;

        let patch = RepresentantePatch {
            nombre: required_if_present(dto.nombre, NOMBRE_VACIO)?,
            telefono: required_if_present(dto.telefono, TELEFONO_VACIO)?,
        };
        if patch.is_empty() {
            return Err(ServiceError::validation(
                "Debe proporcionar al menos un campo para actualizar",
            ));
        }

        self.store
            .representantes()
            .update(id, patch)
            .await?
            .ok_or_else(|| no_encontrado(id))
    }

    #[instrument(skip(self))]
    pub async fn eliminar(&self, id: RepresentanteId) -> ServiceResult<()> {
        if !self.store.representantes().delete(id).await? {
            return Err(no_encontrado(id));
        }
        info!(%id, "Representante eliminado");
        track_entity_deleted(Representante::NAME);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unidad_db::MemoryStore;

    fn dto(nombre: &str, telefono: &str) -> CreateRepresentanteDto {
        CreateRepresentanteDto {
            nombre: nombre.to_string(),
            telefono: telefono.to_string(),
        }
    }

    #[tokio::test]
    async fn test_crear_trims_fields() {
        let store = MemoryStore::new();
        let service = RepresentanteService::new(&store);

        let rep = service.crear(dto("  María López ", " 0991234567 ")).await.unwrap();
        assert_eq!(rep.nombre, "María López");
        assert_eq!(rep.telefono, "0991234567");
        assert_eq!(service.obtener(rep.id).await.unwrap(), rep);
    }

    #[tokio::test]
    async fn test_obtener_por_telefono() {
        let store = MemoryStore::new();
        let service = RepresentanteService::new(&store);
        let rep = service.crear(dto("María", "0991234567")).await.unwrap();

        assert_eq!(service.obtener_por_telefono(" 0991234567 ").await.unwrap(), rep);
        let err = service.obtener_por_telefono("0000000000").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "Representante con teléfono 0000000000 no encontrado"
        );
    }

    #[tokio::test]
    async fn test_crear_rejects_blank_fields() {
        let store = MemoryStore::new();
        let service = RepresentanteService::new(&store);

        let err = service.crear(dto("   ", "0991234567")).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), NOMBRE_VACIO);

        let err = service.crear(dto("María", "")).await.unwrap_err();
        assert_eq!(err.to_string(), TELEFONO_VACIO);
    }

    #[tokio::test]
    async fn test_actualizar_requires_a_field() {
        let store = MemoryStore::new();
        let service = RepresentanteService::new(&store);
        let rep = service.crear(dto("María", "0991234567")).await.unwrap();

        let err = service
            .actualizar(rep.id, UpdateRepresentanteDto::default())
            .await
            .unwrap_err();
        assert!(err.is_validation());

        let updated = service
            .actualizar(
                rep.id,
                UpdateRepresentanteDto {
                    telefono: Some(" 022345678 ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.telefono, "022345678");
        assert_eq!(updated.nombre, "María");
    }

    #[tokio::test]
    async fn test_actualizar_missing_is_not_found_before_validation() {
        let store = MemoryStore::new();
        let service = RepresentanteService::new(&store);

        let err = service
            .actualizar(RepresentanteId::new(42), UpdateRepresentanteDto::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Representante con ID 42 no encontrado");
    }

    #[tokio::test]
    async fn test_obtener_and_eliminar_missing() {
        let store = MemoryStore::new();
        let service = RepresentanteService::new(&store);

        assert!(service.obtener(RepresentanteId::new(7)).await.unwrap_err().is_not_found());
        assert!(service.eliminar(RepresentanteId::new(7)).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_eliminar_removes_row() {
        let store = MemoryStore::new();
        let service = RepresentanteService::new(&store);
        let rep = service.crear(dto("María", "0991234567")).await.unwrap();

        service.eliminar(rep.id).await.unwrap();
        assert!(service.obtener(rep.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_listar_is_repeatable() {
        let store = MemoryStore::new();
        let service = RepresentanteService::new(&store);
        for i in 0..3 {
            service.crear(dto(&format!("Rep {i}"), "099")).await.unwrap();
        }

        let params = PaginationParams::new(1, 1);
        let first = service.listar(&params).await.unwrap();
        let second = service.listar(&params).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.data.len(), 1);
        assert_eq!(first.meta.total, 3);
        assert!(first.meta.has_more);
    }
}
