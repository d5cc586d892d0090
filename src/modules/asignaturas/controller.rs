use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use unidad_core::{AppError, Page, PaginationParams};
use unidad_models::asistencias::Asistencia;
use unidad_models::calificaciones::Calificacion;
use unidad_models::{AsignaturaId, Entity};

use crate::docs::ErrorResponse;
use crate::modules::asignaturas::model::{Asignatura, CreateAsignaturaDto, UpdateAsignaturaDto};
use crate::modules::asignaturas::service::AsignaturaService;
use crate::modules::asistencias::service::AsistenciaService;
use crate::modules::calificaciones::service::CalificacionService;
use crate::state::AppState;
use crate::utils::tracking::track_failure;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/v1/asignaturas",
    request_body = CreateAsignaturaDto,
    responses(
        (status = 201, description = "Asignatura creada", body = Asignatura),
        (status = 400, description = "Curso o docente inexistente", body = ErrorResponse),
        (status = 422, description = "Falla de validación del cuerpo", body = ErrorResponse)
    ),
    tag = "Asignaturas"
)]
#[instrument(skip(state))]
pub async fn create_asignatura(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateAsignaturaDto>,
) -> Result<(StatusCode, Json<Asignatura>), AppError> {
    let asignatura = AsignaturaService::new(state.store.as_ref())
        .crear(dto)
        .await
        .inspect_err(track_failure(Asignatura::NAME))?;

    Ok((StatusCode::CREATED, Json(asignatura)))
}

#[utoipa::path(
    get,
    path = "/api/v1/asignaturas",
    params(PaginationParams),
    responses((status = 200, description = "Página de asignaturas", body = Page<Asignatura>)),
    tag = "Asignaturas"
)]
#[instrument(skip(state))]
pub async fn get_asignaturas(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Page<Asignatura>>, AppError> {
    let page = AsignaturaService::new(state.store.as_ref())
        .listar(&params)
        .await?;

    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/v1/asignaturas/{id}",
    params(("id" = i32, Path, description = "ID de la asignatura")),
    responses(
        (status = 200, description = "Asignatura", body = Asignatura),
        (status = 404, description = "No encontrada", body = ErrorResponse)
    ),
    tag = "Asignaturas"
)]
#[instrument(skip(state))]
pub async fn get_asignatura(
    State(state): State<AppState>,
    Path(id): Path<AsignaturaId>,
) -> Result<Json<Asignatura>, AppError> {
    let asignatura = AsignaturaService::new(state.store.as_ref())
        .obtener(id)
        .await?;

    Ok(Json(asignatura))
}

#[utoipa::path(
    get,
    path = "/api/v1/asignaturas/{id}/calificaciones",
    params(("id" = i32, Path, description = "ID de la asignatura")),
    responses(
        (status = 200, description = "Calificaciones de la asignatura", body = Vec<Calificacion>),
        (status = 404, description = "No encontrada", body = ErrorResponse)
    ),
    tag = "Asignaturas"
)]
#[instrument(skip(state))]
pub async fn get_asignatura_calificaciones(
    State(state): State<AppState>,
    Path(id): Path<AsignaturaId>,
) -> Result<Json<Vec<Calificacion>>, AppError> {
    let store = state.store.as_ref();
    AsignaturaService::new(store).obtener(id).await?;
    let calificaciones = CalificacionService::new(store)
        .listar_por_asignatura(id)
        .await?;

    Ok(Json(calificaciones))
}

#[utoipa::path(
    get,
    path = "/api/v1/asignaturas/{id}/asistencias",
    params(("id" = i32, Path, description = "ID de la asignatura")),
    responses(
        (status = 200, description = "Asistencias registradas en la asignatura", body = Vec<Asistencia>),
        (status = 404, description = "No encontrada", body = ErrorResponse)
    ),
    tag = "Asignaturas"
)]
#[instrument(skip(state))]
pub async fn get_asignatura_asistencias(
    State(state): State<AppState>,
    Path(id): Path<AsignaturaId>,
) -> Result<Json<Vec<Asistencia>>, AppError> {
    let store = state.store.as_ref();
    AsignaturaService::new(store).obtener(id).await?;
    let asistencias = AsistenciaService::new(store)
        .listar_por_asignatura(id)
        .await?;

    Ok(Json(asistencias))
}

#[utoipa::path(
    put,
    path = "/api/v1/asignaturas/{id}",
    params(("id" = i32, Path, description = "ID de la asignatura")),
    request_body = UpdateAsignaturaDto,
    responses(
        (status = 200, description = "Asignatura actualizada", body = Asignatura),
        (status = 400, description = "Datos inválidos", body = ErrorResponse),
        (status = 404, description = "No encontrada", body = ErrorResponse)
    ),
    tag = "Asignaturas"
)]
#[instrument(skip(state))]
pub async fn update_asignatura(
    State(state): State<AppState>,
    Path(id): Path<AsignaturaId>,
    ValidatedJson(dto): ValidatedJson<UpdateAsignaturaDto>,
) -> Result<Json<Asignatura>, AppError> {
    let asignatura = AsignaturaService::new(state.store.as_ref())
        .actualizar(id, dto)
        .await
        .inspect_err(track_failure(Asignatura::NAME))?;

    Ok(Json(asignatura))
}

#[utoipa::path(
    delete,
    path = "/api/v1/asignaturas/{id}",
    params(("id" = i32, Path, description = "ID de la asignatura")),
    responses(
        (status = 204, description = "Asignatura eliminada"),
        (status = 404, description = "No encontrada", body = ErrorResponse)
    ),
    tag = "Asignaturas"
)]
#[instrument(skip(state))]
pub async fn delete_asignatura(
    State(state): State<AppState>,
    Path(id): Path<AsignaturaId>,
) -> Result<StatusCode, AppError> {
    AsignaturaService::new(state.store.as_ref())
        .eliminar(id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
