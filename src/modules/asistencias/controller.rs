use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use unidad_core::{AppError, Page, PaginationParams};
use unidad_models::{AsistenciaId, Entity};

use crate::docs::ErrorResponse;
use crate::modules::asistencias::model::{Asistencia, CreateAsistenciaDto, UpdateAsistenciaDto};
use crate::modules::asistencias::service::AsistenciaService;
use crate::state::AppState;
use crate::utils::tracking::track_failure;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/v1/asistencias",
    request_body = CreateAsistenciaDto,
    responses(
        (status = 201, description = "Asistencia registrada", body = Asistencia),
        (status = 400, description = "Estado inválido o referencias inexistentes", body = ErrorResponse),
        (status = 422, description = "Falla de validación del cuerpo", body = ErrorResponse)
    ),
    tag = "Asistencias"
)]
#[instrument(skip(state))]
pub async fn create_asistencia(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateAsistenciaDto>,
) -> Result<(StatusCode, Json<Asistencia>), AppError> {
    let asistencia = AsistenciaService::new(state.store.as_ref())
        .crear(dto)
        .await
        .inspect_err(track_failure(Asistencia::NAME))?;

    Ok((StatusCode::CREATED, Json(asistencia)))
}

#[utoipa::path(
    get,
    path = "/api/v1/asistencias",
    params(PaginationParams),
    responses((status = 200, description = "Página de asistencias", body = Page<Asistencia>)),
    tag = "Asistencias"
)]
#[instrument(skip(state))]
pub async fn get_asistencias(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Page<Asistencia>>, AppError> {
    let page = AsistenciaService::new(state.store.as_ref())
        .listar(&params)
        .await?;

    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/v1/asistencias/estado/{estado}",
    params(("estado" = String, Path, description = "PRESENTE, AUSENTE, ATRASO o JUSTIFICADO")),
    responses(
        (status = 200, description = "Asistencias en ese estado", body = Vec<Asistencia>),
        (status = 400, description = "Estado inválido", body = ErrorResponse)
    ),
    tag = "Asistencias"
)]
#[instrument(skip(state))]
pub async fn get_asistencias_by_estado(
    State(state): State<AppState>,
    Path(estado): Path<String>,
) -> Result<Json<Vec<Asistencia>>, AppError> {
    let asistencias = AsistenciaService::new(state.store.as_ref())
        .listar_por_estado(&estado)
        .await?;

    Ok(Json(asistencias))
}

#[utoipa::path(
    get,
    path = "/api/v1/asistencias/{id}",
    params(("id" = i32, Path, description = "ID de la asistencia")),
    responses(
        (status = 200, description = "Asistencia", body = Asistencia),
        (status = 404, description = "No encontrada", body = ErrorResponse)
    ),
    tag = "Asistencias"
)]
#[instrument(skip(state))]
pub async fn get_asistencia(
    State(state): State<AppState>,
    Path(id): Path<AsistenciaId>,
) -> Result<Json<Asistencia>, AppError> {
    let asistencia = AsistenciaService::new(state.store.as_ref())
        .obtener(id)
        .await?;

    Ok(Json(asistencia))
}

#[utoipa::path(
    put,
    path = "/api/v1/asistencias/{id}",
    params(("id" = i32, Path, description = "ID de la asistencia")),
    request_body = UpdateAsistenciaDto,
    responses(
        (status = 200, description = "Asistencia actualizada", body = Asistencia),
        (status = 400, description = "Datos inválidos", body = ErrorResponse),
        (status = 404, description = "No encontrada", body = ErrorResponse)
    ),
    tag = "Asistencias"
)]
#[instrument(skip(state))]
pub async fn update_asistencia(
    State(state): State<AppState>,
    Path(id): Path<AsistenciaId>,
    ValidatedJson(dto): ValidatedJson<UpdateAsistenciaDto>,
) -> Result<Json<Asistencia>, AppError> {
    let asistencia = AsistenciaService::new(state.store.as_ref())
        .actualizar(id, dto)
        .await
        .inspect_err(track_failure(Asistencia::NAME))?;

    Ok(Json(asistencia))
}

#[utoipa::path(
    delete,
    path = "/api/v1/asistencias/{id}",
    params(("id" = i32, Path, description = "ID de la asistencia")),
    responses(
        (status = 204, description = "Asistencia eliminada"),
        (status = 404, description = "No encontrada", body = ErrorResponse)
    ),
    tag = "Asistencias"
)]
#[instrument(skip(state))]
pub async fn delete_asistencia(
    State(state): State<AppState>,
    Path(id): Path<AsistenciaId>,
) -> Result<StatusCode, AppError> {
    AsistenciaService::new(state.store.as_ref())
        .eliminar(id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
