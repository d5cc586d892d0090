use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use unidad_core::{AppError, Page, PaginationParams};
use unidad_models::{CalificacionId, Entity};

use crate::docs::ErrorResponse;
use crate::modules::calificaciones::model::{
    Calificacion, CreateCalificacionDto, UpdateCalificacionDto,
};
use crate::modules::calificaciones::service::CalificacionService;
use crate::state::AppState;
use crate::utils::tracking::track_failure;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/v1/calificaciones",
    request_body = CreateCalificacionDto,
    responses(
        (status = 201, description = "Calificación registrada", body = Calificacion),
        (status = 400, description = "Nota o quimestre fuera de rango, referencias inexistentes", body = ErrorResponse),
        (status = 422, description = "Falla de validación del cuerpo", body = ErrorResponse)
    ),
    tag = "Calificaciones"
)]
#[instrument(skip(state))]
pub async fn create_calificacion(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateCalificacionDto>,
) -> Result<(StatusCode, Json<Calificacion>), AppError> {
    let calificacion = CalificacionService::new(state.store.as_ref())
        .crear(dto)
        .await
        .inspect_err(track_failure(Calificacion::NAME))?;

    Ok((StatusCode::CREATED, Json(calificacion)))
}

#[utoipa::path(
    get,
    path = "/api/v1/calificaciones",
    params(PaginationParams),
    responses((status = 200, description = "Página de calificaciones", body = Page<Calificacion>)),
    tag = "Calificaciones"
)]
#[instrument(skip(state))]
pub async fn get_calificaciones(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Page<Calificacion>>, AppError> {
    let page = CalificacionService::new(state.store.as_ref())
        .listar(&params)
        .await?;

    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/v1/calificaciones/{id}",
    params(("id" = i32, Path, description = "ID de la calificación")),
    responses(
        (status = 200, description = "Calificación", body = Calificacion),
        (status = 404, description = "No encontrada", body = ErrorResponse)
    ),
    tag = "Calificaciones"
)]
#[instrument(skip(state))]
pub async fn get_calificacion(
    State(state): State<AppState>,
    Path(id): Path<CalificacionId>,
) -> Result<Json<Calificacion>, AppError> {
    let calificacion = CalificacionService::new(state.store.as_ref())
        .obtener(id)
        .await?;

    Ok(Json(calificacion))
}

#[utoipa::path(
    get,
    path = "/api/v1/calificaciones/quimestre/{quimestre}",
    params(("quimestre" = i32, Path, description = "Quimestre, de 1 a 3")),
    responses(
        (status = 200, description = "Calificaciones del quimestre", body = Vec<Calificacion>),
        (status = 400, description = "Quimestre fuera de rango", body = ErrorResponse)
    ),
    tag = "Calificaciones"
)]
#[instrument(skip(state))]
pub async fn get_calificaciones_by_quimestre(
    State(state): State<AppState>,
    Path(quimestre): Path<i32>,
) -> Result<Json<Vec<Calificacion>>, AppError> {
    let calificaciones = CalificacionService::new(state.store.as_ref())
        .listar_por_quimestre(quimestre)
        .await?;

    Ok(Json(calificaciones))
}

#[utoipa::path(
    put,
    path = "/api/v1/calificaciones/{id}",
    params(("id" = i32, Path, description = "ID de la calificación")),
    request_body = UpdateCalificacionDto,
    responses(
        (status = 200, description = "Calificación actualizada", body = Calificacion),
        (status = 400, description = "Datos inválidos", body = ErrorResponse),
        (status = 404, description = "No encontrada", body = ErrorResponse)
    ),
    tag = "Calificaciones"
)]
#[instrument(skip(state))]
pub async fn update_calificacion(
    State(state): State<AppState>,
    Path(id): Path<CalificacionId>,
    ValidatedJson(dto): ValidatedJson<UpdateCalificacionDto>,
) -> Result<Json<Calificacion>, AppError> {
    let calificacion = CalificacionService::new(state.store.as_ref())
        .actualizar(id, dto)
        .await
        .inspect_err(track_failure(Calificacion::NAME))?;

    Ok(Json(calificacion))
}

#[utoipa::path(
    delete,
    path = "/api/v1/calificaciones/{id}",
    params(("id" = i32, Path, description = "ID de la calificación")),
    responses(
        (status = 204, description = "Calificación eliminada"),
        (status = 404, description = "No encontrada", body = ErrorResponse)
    ),
    tag = "Calificaciones"
)]
#[instrument(skip(state))]
pub async fn delete_calificacion(
    State(state): State<AppState>,
    Path(id): Path<CalificacionId>,
) -> Result<StatusCode, AppError> {
    CalificacionService::new(state.store.as_ref())
        .eliminar(id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
