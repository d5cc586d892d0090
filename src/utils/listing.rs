use unidad_core::{Page, PaginationParams, ServiceResult};
use unidad_db::Repository;
use unidad_models::Entity;

/// One page of `repo` plus its total row count.
pub async fn paginate<E, R>(repo: &R, params: &PaginationParams) -> ServiceResult<Page<E>>
where
    E: Entity,
    R: Repository<E> + ?Sized,
{
    let data = repo.read_all(params.skip(), params.limit()).await?;
    let total = repo.count().await?;
    Ok(Page::new(data, total, params))
}
