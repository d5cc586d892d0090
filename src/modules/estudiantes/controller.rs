use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use unidad_core::{AppError, Page, PaginationParams};
use unidad_models::matriculas::Matricula;
use unidad_models::{Entity, EstudianteId};

use crate::docs::ErrorResponse;
use crate::modules::estudiantes::model::{CreateEstudianteDto, Estudiante, UpdateEstudianteDto};
use crate::modules::estudiantes::service::EstudianteService;
use crate::state::AppState;
use crate::utils::tracking::track_failure;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/v1/estudiantes",
    request_body = CreateEstudianteDto,
    responses(
        (status = 201, description = "Estudiante creado", body = Estudiante),
        (status = 400, description = "Cédula duplicada o inválida, representante inexistente o edad insuficiente", body = ErrorResponse),
        (status = 422, description = "Falla de validación del cuerpo", body = ErrorResponse)
    ),
    tag = "Estudiantes"
)]
#[instrument(skip(state))]
pub async fn create_estudiante(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateEstudianteDto>,
) -> Result<(StatusCode, Json<Estudiante>), AppError> {
    let estudiante = EstudianteService::new(state.store.as_ref())
        .crear(dto)
        .await
        .inspect_err(track_failure(Estudiante::NAME))?;

    Ok((StatusCode::CREATED, Json(estudiante)))
}

#[utoipa::path(
    get,
    path = "/api/v1/estudiantes",
    params(PaginationParams),
    responses(
        (status = 200, description = "Página de estudiantes", body = Page<Estudiante>)
    ),
    tag = "Estudiantes"
)]
#[instrument(skip(state))]
pub async fn get_estudiantes(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Page<Estudiante>>, AppError> {
    let page = EstudianteService::new(state.store.as_ref())
        .listar(&params)
        .await?;

    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/v1/estudiantes/{id}",
    params(("id" = i32, Path, description = "ID del estudiante")),
    responses(
        (status = 200, description = "Estudiante", body = Estudiante),
        (status = 404, description = "No encontrado", body = ErrorResponse)
    ),
    tag = "Estudiantes"
)]
#[instrument(skip(state))]
pub async fn get_estudiante(
    State(state): State<AppState>,
    Path(id): Path<EstudianteId>,
) -> Result<Json<Estudiante>, AppError> {
    let estudiante = EstudianteService::new(state.store.as_ref())
        .obtener(id)
        .await?;

    Ok(Json(estudiante))
}

#[utoipa::path(
    get,
    path = "/api/v1/estudiantes/cedula/{cedula}",
    params(("cedula" = String, Path, description = "Cédula del estudiante")),
    responses(
        (status = 200, description = "Estudiante", body = Estudiante),
        (status = 404, description = "No encontrado", body = ErrorResponse)
    ),
    tag = "Estudiantes"
)]
#[instrument(skip(state))]
pub async fn get_estudiante_by_cedula(
    State(state): State<AppState>,
    Path(cedula): Path<String>,
) -> Result<Json<Estudiante>, AppError> {
    let estudiante = EstudianteService::new(state.store.as_ref())
        .obtener_por_cedula(&cedula)
        .await?;

    Ok(Json(estudiante))
}

#[utoipa::path(
    get,
    path = "/api/v1/estudiantes/correo/{correo}",
    params(("correo" = String, Path, description = "Correo del estudiante")),
    responses(
        (status = 200, description = "Estudiante", body = Estudiante),
        (status = 404, description = "No encontrado", body = ErrorResponse)
    ),
    tag = "Estudiantes"
)]
#[instrument(skip(state))]
pub async fn get_estudiante_by_correo(
    State(state): State<AppState>,
    Path(correo): Path<String>,
) -> Result<Json<Estudiante>, AppError> {
    let estudiante = EstudianteService::new(state.store.as_ref())
        .obtener_por_correo(&correo)
        .await?;

    Ok(Json(estudiante))
}

#[utoipa::path(
    get,
    path = "/api/v1/estudiantes/{id}/matriculas",
    params(("id" = i32, Path, description = "ID del estudiante")),
    responses(
        (status = 200, description = "Matrículas del estudiante", body = Vec<Matricula>),
        (status = 404, description = "No encontrado", body = ErrorResponse)
    ),
    tag = "Estudiantes"
)]
#[instrument(skip(state))]
pub async fn get_estudiante_matriculas(
    State(state): State<AppState>,
    Path(id): Path<EstudianteId>,
) -> Result<Json<Vec<Matricula>>, AppError> {
    let matriculas = EstudianteService::new(state.store.as_ref())
        .listar_matriculas(id)
        .await?;

    Ok(Json(matriculas))
}

#[utoipa::path(
    put,
    path = "/api/v1/estudiantes/{id}",
    params(("id" = i32, Path, description = "ID del estudiante")),
    request_body = UpdateEstudianteDto,
    responses(
        (status = 200, description = "Estudiante actualizado", body = Estudiante),
        (status = 400, description = "Datos inválidos", body = ErrorResponse),
        (status = 404, description = "No encontrado", body = ErrorResponse)
    ),
    tag = "Estudiantes"
)]
#[instrument(skip(state))]
pub async fn update_estudiante(
    State(state): State<AppState>,
    Path(id): Path<EstudianteId>,
    ValidatedJson(dto): ValidatedJson<UpdateEstudianteDto>,
) -> Result<Json<Estudiante>, AppError> {
    let estudiante = EstudianteService::new(state.store.as_ref())
        .actualizar(id, dto)
        .await
        .inspect_err(track_failure(Estudiante::NAME))?;

    Ok(Json(estudiante))
}

#[utoipa::path(
    delete,
    path = "/api/v1/estudiantes/{id}",
    params(("id" = i32, Path, description = "ID del estudiante")),
    responses(
        (status = 204, description = "Estudiante eliminado"),
        (status = 404, description = "No encontrado", body = ErrorResponse)
    ),
    tag = "Estudiantes"
)]
#[instrument(skip(state))]
pub async fn delete_estudiante(
    State(state): State<AppState>,
    Path(id): Path<EstudianteId>,
) -> Result<StatusCode, AppError> {
    EstudianteService::new(state.store.as_ref())
        .eliminar(id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
