use unidad_core::{ServiceError, ServiceResult};
use unidad_db::Repository;
use unidad_models::Entity;

/// Fails with a validation error when `id` names no row in `repo`.
pub async fn ensure_exists<E, R>(repo: &R, id: E::Id) -> ServiceResult<()>
where
    E: Entity,
    R: Repository<E> + ?Sized,
{
    if !repo.exists(id).await? {
        return Err(ServiceError::validation(format!(
            "{} con ID {id} no existe",
            E::NAME
        )));
    }
    Ok(())
}
