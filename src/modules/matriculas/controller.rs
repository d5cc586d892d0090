use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use unidad_core::{AppError, Page, PaginationParams};
use unidad_models::asistencias::Asistencia;
use unidad_models::calificaciones::{Calificacion, PromedioResponse};
use unidad_models::{Entity, MatriculaId};

use crate::docs::ErrorResponse;
use crate::modules::asistencias::service::AsistenciaService;
use crate::modules::calificaciones::service::CalificacionService;
use crate::modules::matriculas::model::{
    CreateMatriculaDto, EstadoCambioDto, Matricula, UpdateMatriculaDto,
};
use crate::modules::matriculas::service::MatriculaService;
use crate::state::AppState;
use crate::utils::tracking::track_failure;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/v1/matriculas",
    request_body = CreateMatriculaDto,
    responses(
        (status = 201, description = "Matrícula creada", body = Matricula),
        (status = 400, description = "Referencias inexistentes, estudiante ya matriculado o estado inválido", body = ErrorResponse),
        (status = 422, description = "Falla de validación del cuerpo", body = ErrorResponse)
    ),
    tag = "Matrículas"
)]
#[instrument(skip(state))]
pub async fn create_matricula(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateMatriculaDto>,
) -> Result<(StatusCode, Json<Matricula>), AppError> {
    let matricula = MatriculaService::new(state.store.as_ref())
        .crear(dto)
        .await
        .inspect_err(track_failure(Matricula::NAME))?;

    Ok((StatusCode::CREATED, Json(matricula)))
}

#[utoipa::path(
    get,
    path = "/api/v1/matriculas",
    params(PaginationParams),
    responses((status = 200, description = "Página de matrículas", body = Page<Matricula>)),
    tag = "Matrículas"
)]
#[instrument(skip(state))]
pub async fn get_matriculas(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Page<Matricula>>, AppError> {
    let page = MatriculaService::new(state.store.as_ref())
        .listar(&params)
        .await?;

    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/v1/matriculas/estado/{estado}",
    params(("estado" = String, Path, description = "Estado de la matrícula, p. ej. ACTIVO")),
    responses(
        (status = 200, description = "Matrículas en ese estado", body = Vec<Matricula>),
        (status = 400, description = "Estado inválido", body = ErrorResponse)
    ),
    tag = "Matrículas"
)]
#[instrument(skip(state))]
pub async fn get_matriculas_by_estado(
    State(state): State<AppState>,
    Path(estado): Path<String>,
) -> Result<Json<Vec<Matricula>>, AppError> {
    let matriculas = MatriculaService::new(state.store.as_ref())
        .listar_por_estado(&estado)
        .await?;

    Ok(Json(matriculas))
}

#[utoipa::path(
    get,
    path = "/api/v1/matriculas/{id}",
    params(("id" = i32, Path, description = "ID de la matrícula")),
    responses(
        (status = 200, description = "Matrícula", body = Matricula),
        (status = 404, description = "No encontrada", body = ErrorResponse)
    ),
    tag = "Matrículas"
)]
#[instrument(skip(state))]
pub async fn get_matricula(
    State(state): State<AppState>,
    Path(id): Path<MatriculaId>,
) -> Result<Json<Matricula>, AppError> {
    let matricula = MatriculaService::new(state.store.as_ref())
        .obtener(id)
        .await?;

    Ok(Json(matricula))
}

#[utoipa::path(
    put,
    path = "/api/v1/matriculas/{id}",
    params(("id" = i32, Path, description = "ID de la matrícula")),
    request_body = UpdateMatriculaDto,
    responses(
        (status = 200, description = "Matrícula actualizada", body = Matricula),
        (status = 400, description = "Datos inválidos", body = ErrorResponse),
        (status = 404, description = "No encontrada", body = ErrorResponse)
    ),
    tag = "Matrículas"
)]
#[instrument(skip(state))]
pub async fn update_matricula(
    State(state): State<AppState>,
    Path(id): Path<MatriculaId>,
    ValidatedJson(dto): ValidatedJson<UpdateMatriculaDto>,
) -> Result<Json<Matricula>, AppError> {
    let matricula = MatriculaService::new(state.store.as_ref())
        .actualizar(id, dto)
        .await
        .inspect_err(track_failure(Matricula::NAME))?;

    Ok(Json(matricula))
}

#[utoipa::path(
    patch,
    path = "/api/v1/matriculas/{id}/estado",
    params(("id" = i32, Path, description = "ID de la matrícula")),
    request_body = EstadoCambioDto,
    responses(
        (status = 200, description = "Estado actualizado", body = Matricula),
        (status = 400, description = "Estado inválido", body = ErrorResponse),
        (status = 404, description = "No encontrada", body = ErrorResponse)
    ),
    tag = "Matrículas"
)]
#[instrument(skip(state))]
pub async fn change_matricula_estado(
    State(state): State<AppState>,
    Path(id): Path<MatriculaId>,
    ValidatedJson(dto): ValidatedJson<EstadoCambioDto>,
) -> Result<Json<Matricula>, AppError> {
    let matricula = MatriculaService::new(state.store.as_ref())
        .cambiar_estado(id, &dto.estado)
        .await
        .inspect_err(track_failure(Matricula::NAME))?;

    Ok(Json(matricula))
}

#[utoipa::path(
    get,
    path = "/api/v1/matriculas/{id}/calificaciones",
    params(("id" = i32, Path, description = "ID de la matrícula")),
    responses(
        (status = 200, description = "Calificaciones de la matrícula", body = Vec<Calificacion>),
        (status = 404, description = "No encontrada", body = ErrorResponse)
    ),
    tag = "Matrículas"
)]
#[instrument(skip(state))]
pub async fn get_matricula_calificaciones(
    State(state): State<AppState>,
    Path(id): Path<MatriculaId>,
) -> Result<Json<Vec<Calificacion>>, AppError> {
    let store = state.store.as_ref();
    MatriculaService::new(store).obtener(id).await?;
    let calificaciones = CalificacionService::new(store)
        .listar_por_matricula(id)
        .await?;

    Ok(Json(calificaciones))
}

#[utoipa::path(
    get,
    path = "/api/v1/matriculas/{id}/promedio",
    params(("id" = i32, Path, description = "ID de la matrícula")),
    responses(
        (status = 200, description = "Promedio de notas (0.0 sin calificaciones)", body = PromedioResponse),
        (status = 404, description = "No encontrada", body = ErrorResponse)
    ),
    tag = "Matrículas"
)]
#[instrument(skip(state))]
pub async fn get_matricula_promedio(
    State(state): State<AppState>,
    Path(id): Path<MatriculaId>,
) -> Result<Json<PromedioResponse>, AppError> {
    let store = state.store.as_ref();
    MatriculaService::new(store).obtener(id).await?;
    let promedio = CalificacionService::new(store).promedio(id).await?;

    Ok(Json(PromedioResponse {
        matricula_id: id,
        promedio,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/matriculas/{id}/asistencias",
    params(("id" = i32, Path, description = "ID de la matrícula")),
    responses(
        (status = 200, description = "Asistencias de la matrícula", body = Vec<Asistencia>),
        (status = 404, description = "No encontrada", body = ErrorResponse)
    ),
    tag = "Matrículas"
)]
#[instrument(skip(state))]
pub async fn get_matricula_asistencias(
    State(state): State<AppState>,
    Path(id): Path<MatriculaId>,
) -> Result<Json<Vec<Asistencia>>, AppError> {
    let store = state.store.as_ref();
    MatriculaService::new(store).obtener(id).await?;
    let asistencias = AsistenciaService::new(store)
        .listar_por_matricula(id)
        .await?;

    Ok(Json(asistencias))
}

#[utoipa::path(
    delete,
    path = "/api/v1/matriculas/{id}",
    params(("id" = i32, Path, description = "ID de la matrícula")),
    responses(
        (status = 204, description = "Matrícula eliminada"),
        (status = 404, description = "No encontrada", body = ErrorResponse)
    ),
    tag = "Matrículas"
)]
#[instrument(skip(state))]
pub async fn delete_matricula(
    State(state): State<AppState>,
    Path(id): Path<MatriculaId>,
) -> Result<StatusCode, AppError> {
    MatriculaService::new(state.store.as_ref())
        .eliminar(id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
