use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use unidad_core::{AppError, Page, PaginationParams};
use unidad_models::asignaturas::Asignatura;
use unidad_models::{DocenteId, Entity};

use crate::docs::ErrorResponse;
use crate::modules::asignaturas::service::AsignaturaService;
use crate::modules::docentes::model::{CreateDocenteDto, Docente, UpdateDocenteDto};
use crate::modules::docentes::service::DocenteService;
use crate::state::AppState;
use crate::utils::tracking::track_failure;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/v1/docentes",
    request_body = CreateDocenteDto,
    responses(
        (status = 201, description = "Docente creado", body = Docente),
        (status = 400, description = "Correo duplicado o inválido", body = ErrorResponse),
        (status = 422, description = "Falla de validación del cuerpo", body = ErrorResponse)
    ),
    tag = "Docentes"
)]
#[instrument(skip(state))]
pub async fn create_docente(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateDocenteDto>,
) -> Result<(StatusCode, Json<Docente>), AppError> {
    let docente = DocenteService::new(state.store.as_ref())
        .crear(dto)
        .await
        .inspect_err(track_failure(Docente::NAME))?;

    Ok((StatusCode::CREATED, Json(docente)))
}

#[utoipa::path(
    get,
    path = "/api/v1/docentes",
    params(PaginationParams),
    responses((status = 200, description = "Página de docentes", body = Page<Docente>)),
    tag = "Docentes"
)]
#[instrument(skip(state))]
pub async fn get_docentes(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Page<Docente>>, AppError> {
    let page = DocenteService::new(state.store.as_ref())
        .listar(&params)
        .await?;

    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/v1/docentes/{id}",
    params(("id" = i32, Path, description = "ID del docente")),
    responses(
        (status = 200, description = "Docente", body = Docente),
        (status = 404, description = "No encontrado", body = ErrorResponse)
    ),
    tag = "Docentes"
)]
#[instrument(skip(state))]
pub async fn get_docente(
    State(state): State<AppState>,
    Path(id): Path<DocenteId>,
) -> Result<Json<Docente>, AppError> {
    let docente = DocenteService::new(state.store.as_ref()).obtener(id).await?;
    Ok(Json(docente))
}

#[utoipa::path(
    get,
    path = "/api/v1/docentes/{id}/asignaturas",
    params(("id" = i32, Path, description = "ID del docente")),
    responses(
        (status = 200, description = "Asignaturas a cargo del docente", body = Vec<Asignatura>),
        (status = 404, description = "No encontrado", body = ErrorResponse)
    ),
    tag = "Docentes"
)]
#[instrument(skip(state))]
pub async fn get_docente_asignaturas(
    State(state): State<AppState>,
    Path(id): Path<DocenteId>,
) -> Result<Json<Vec<Asignatura>>, AppError> {
    let store = state.store.as_ref();
    DocenteService::new(store).obtener(id).await?;
    let asignaturas = AsignaturaService::new(store).listar_por_docente(id).await?;

    Ok(Json(asignaturas))
}

#[utoipa::path(
    put,
    path = "/api/v1/docentes/{id}",
    params(("id" = i32, Path, description = "ID del docente")),
    request_body = UpdateDocenteDto,
    responses(
        (status = 200, description = "Docente actualizado", body = Docente),
        (status = 400, description = "Datos inválidos", body = ErrorResponse),
        (status = 404, description = "No encontrado", body = ErrorResponse)
    ),
    tag = "Docentes"
)]
#[instrument(skip(state))]
pub async fn update_docente(
    State(state): State<AppState>,
    Path(id): Path<DocenteId>,
    ValidatedJson(dto): ValidatedJson<UpdateDocenteDto>,
) -> Result<Json<Docente>, AppError> {
    let docente = DocenteService::new(state.store.as_ref())
        .actualizar(id, dto)
        .await
        .inspect_err(track_failure(Docente::NAME))?;

    Ok(Json(docente))
}

#[utoipa::path(
    delete,
    path = "/api/v1/docentes/{id}",
    params(("id" = i32, Path, description = "ID del docente")),
    responses(
        (status = 204, description = "Docente eliminado"),
        (status = 404, description = "No encontrado", body = ErrorResponse)
    ),
    tag = "Docentes"
)]
#[instrument(skip(state))]
pub async fn delete_docente(
    State(state): State<AppState>,
    Path(id): Path<DocenteId>,
) -> Result<StatusCode, AppError> {
    DocenteService::new(state.store.as_ref()).eliminar(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
