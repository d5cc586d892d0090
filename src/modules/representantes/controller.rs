use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use unidad_core::{AppError, Page, PaginationParams};
use unidad_models::estudiantes::Estudiante;
use unidad_models::{Entity, RepresentanteId};

use crate::docs::ErrorResponse;
use crate::modules::representantes::model::{
    CreateRepresentanteDto, Representante, UpdateRepresentanteDto,
};
use crate::modules::representantes::service::RepresentanteService;
use crate::state::AppState;
use crate::utils::tracking::track_failure;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/v1/representantes",
    request_body = CreateRepresentanteDto,
    responses(
        (status = 201, description = "Representante creado", body = Representante),
        (status = 400, description = "Datos inválidos", body = ErrorResponse),
        (status = 422, description = "Falla de validación del cuerpo", body = ErrorResponse)
    ),
    tag = "Representantes"
)]
#[instrument(skip(state))]
pub async fn create_representante(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateRepresentanteDto>,
) -> Result<(StatusCode, Json<Representante>), AppError> {
    let representante = RepresentanteService::new(state.store.as_ref())
        .crear(dto)
        .await
        .inspect_err(track_failure(Representante::NAME))?;

    Ok((StatusCode::CREATED, Json(representante)))
}

#[utoipa::path(
    get,
    path = "/api/v1/representantes",
    params(PaginationParams),
    responses(
        (status = 200, description = "Página de representantes", body = Page<Representante>)
    ),
    tag = "Representantes"
)]
#[instrument(skip(state))]
pub async fn get_representantes(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Page<Representante>>, AppError> {
    let page = RepresentanteService::new(state.store.as_ref())
        .listar(&params)
        .await?;

    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/v1/representantes/{id}",
    params(("id" = i32, Path, description = "ID del representante")),
    responses(
        (status = 200, description = "Representante", body = Representante),
        (status = 404, description = "No encontrado", body = ErrorResponse)
    ),
    tag = "Representantes"
)]
#[instrument(skip(state))]
pub async fn get_representante(
    State(state): State<AppState>,
    Path(id): Path<RepresentanteId>,
) -> Result<Json<Representante>, AppError> {
    let representante = RepresentanteService::new(state.store.as_ref())
        .obtener(id)
        .await?;

    Ok(Json(representante))
}

#[utoipa::path(
    get,
    path = "/api/v1/representantes/telefono/{telefono}",
    params(("telefono" = String, Path, description = "Teléfono del representante")),
    responses(
        (status = 200, description = "Representante", body = Representante),
        (status = 404, description = "No encontrado", body = ErrorResponse)
    ),
    tag = "Representantes"
)]
#[instrument(skip(state))]
pub async fn get_representante_by_telefono(
    State(state): State<AppState>,
    Path(telefono): Path<String>,
) -> Result<Json<Representante>, AppError> {
    let representante = RepresentanteService::new(state.store.as_ref())
        .obtener_por_telefono(&telefono)
        .await?;

    Ok(Json(representante))
}

#[utoipa::path(
    get,
    path = "/api/v1/representantes/{id}/estudiantes",
    params(("id" = i32, Path, description = "ID del representante")),
    responses(
        (status = 200, description = "Estudiantes a cargo", body = Vec<Estudiante>),
        (status = 404, description = "No encontrado", body = ErrorResponse)
    ),
    tag = "Representantes"
)]
#[instrument(skip(state))]
pub async fn get_representante_estudiantes(
    State(state): State<AppState>,
    Path(id): Path<RepresentanteId>,
) -> Result<Json<Vec<Estudiante>>, AppError> {
    let estudiantes = RepresentanteService::new(state.store.as_ref())
        .listar_estudiantes(id)
        .await?;

    Ok(Json(estudiantes))
}

#[utoipa::path(
    put,
    path = "/api/v1/representantes/{id}",
    params(("id" = i32, Path, description = "ID del representante")),
    request_body = UpdateRepresentanteDto,
    responses(
        (status = 200, description = "Representante actualizado", body = Representante),
        (status = 400, description = "Datos inválidos", body = ErrorResponse),
        (status = 404, description = "No encontrado", body = ErrorResponse)
    ),
    tag = "Representantes"
)]
#[instrument(skip(state))]
pub async fn update_representante(
    State(state): State<AppState>,
    Path(id): Path<RepresentanteId>,
    ValidatedJson(dto): ValidatedJson<UpdateRepresentanteDto>,
) -> Result<Json<Representante>, AppError> {
    let representante = RepresentanteService::new(state.store.as_ref())
        .actualizar(id, dto)
        .await
        .inspect_err(track_failure(Representante::NAME))?;

    Ok(Json(representante))
}

#[utoipa::path(
    delete,
    path = "/api/v1/representantes/{id}",
    params(("id" = i32, Path, description = "ID del representante")),
    responses(
        (status = 204, description = "Representante eliminado"),
        (status = 404, description = "No encontrado", body = ErrorResponse)
    ),
    tag = "Representantes"
)]
#[instrument(skip(state))]
pub async fn delete_representante(
    State(state): State<AppState>,
    Path(id): Path<RepresentanteId>,
) -> Result<StatusCode, AppError> {
    RepresentanteService::new(state.store.as_ref())
        .eliminar(id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
