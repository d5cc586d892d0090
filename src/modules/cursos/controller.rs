use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use unidad_core::{AppError, Page, PaginationParams};
use unidad_models::asignaturas::Asignatura;
use unidad_models::matriculas::Matricula;
use unidad_models::{CursoId, Entity};

use crate::docs::ErrorResponse;
use crate::modules::cursos::model::{CreateCursoDto, Curso, UpdateCursoDto};
use crate::modules::cursos::service::CursoService;
use crate::state::AppState;
use crate::utils::tracking::track_failure;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/v1/cursos",
    request_body = CreateCursoDto,
    responses(
        (status = 201, description = "Curso creado", body = Curso),
        (status = 400, description = "Datos inválidos", body = ErrorResponse),
        (status = 422, description = "Falla de validación del cuerpo", body = ErrorResponse)
    ),
    tag = "Cursos"
)]
#[instrument(skip(state))]
pub async fn create_curso(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateCursoDto>,
) -> Result<(StatusCode, Json<Curso>), AppError> {
    let curso = CursoService::new(state.store.as_ref())
        .crear(dto)
        .await
        .inspect_err(track_failure(Curso::NAME))?;

    Ok((StatusCode::CREATED, Json(curso)))
}

#[utoipa::path(
    get,
    path = "/api/v1/cursos",
    params(PaginationParams),
    responses((status = 200, description = "Página de cursos", body = Page<Curso>)),
    tag = "Cursos"
)]
#[instrument(skip(state))]
pub async fn get_cursos(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Page<Curso>>, AppError> {
    let page = CursoService::new(state.store.as_ref()).listar(&params).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/v1/cursos/{id}",
    params(("id" = i32, Path, description = "ID del curso")),
    responses(
        (status = 200, description = "Curso", body = Curso),
        (status = 404, description = "No encontrado", body = ErrorResponse)
    ),
    tag = "Cursos"
)]
#[instrument(skip(state))]
pub async fn get_curso(
    State(state): State<AppState>,
    Path(id): Path<CursoId>,
) -> Result<Json<Curso>, AppError> {
    let curso = CursoService::new(state.store.as_ref()).obtener(id).await?;
    Ok(Json(curso))
}

#[utoipa::path(
    get,
    path = "/api/v1/cursos/nombre/{nombre}",
    params(("nombre" = String, Path, description = "Nombre del curso")),
    responses(
        (status = 200, description = "Curso", body = Curso),
        (status = 404, description = "No encontrado", body = ErrorResponse)
    ),
    tag = "Cursos"
)]
#[instrument(skip(state))]
pub async fn get_curso_by_nombre(
    State(state): State<AppState>,
    Path(nombre): Path<String>,
) -> Result<Json<Curso>, AppError> {
    let curso = CursoService::new(state.store.as_ref())
        .obtener_por_nombre(&nombre)
        .await?;

    Ok(Json(curso))
}

#[utoipa::path(
    get,
    path = "/api/v1/cursos/nivel/{nivel}",
    params(("nivel" = String, Path, description = "Nivel educativo")),
    responses(
        (status = 200, description = "Cursos del nivel", body = Vec<Curso>)
    ),
    tag = "Cursos"
)]
#[instrument(skip(state))]
pub async fn get_cursos_by_nivel(
    State(state): State<AppState>,
    Path(nivel): Path<String>,
) -> Result<Json<Vec<Curso>>, AppError> {
    let cursos = CursoService::new(state.store.as_ref())
        .listar_por_nivel(&nivel)
        .await?;

    Ok(Json(cursos))
}

#[utoipa::path(
    get,
    path = "/api/v1/cursos/{id}/asignaturas",
    params(("id" = i32, Path, description = "ID del curso")),
    responses(
        (status = 200, description = "Asignaturas del curso", body = Vec<Asignatura>),
        (status = 404, description = "No encontrado", body = ErrorResponse)
    ),
    tag = "Cursos"
)]
#[instrument(skip(state))]
pub async fn get_curso_asignaturas(
    State(state): State<AppState>,
    Path(id): Path<CursoId>,
) -> Result<Json<Vec<Asignatura>>, AppError> {
    let asignaturas = CursoService::new(state.store.as_ref())
        .listar_asignaturas(id)
        .await?;

    Ok(Json(asignaturas))
}

#[utoipa::path(
    get,
    path = "/api/v1/cursos/{id}/matriculas",
    params(("id" = i32, Path, description = "ID del curso")),
    responses(
        (status = 200, description = "Matrículas del curso", body = Vec<Matricula>),
        (status = 404, description = "No encontrado", body = ErrorResponse)
    ),
    tag = "Cursos"
)]
#[instrument(skip(state))]
pub async fn get_curso_matriculas(
    State(state): State<AppState>,
    Path(id): Path<CursoId>,
) -> Result<Json<Vec<Matricula>>, AppError> {
    let matriculas = CursoService::new(state.store.as_ref())
        .listar_matriculas(id)
        .await?;

    Ok(Json(matriculas))
}

#[utoipa::path(
    put,
    path = "/api/v1/cursos/{id}",
    params(("id" = i32, Path, description = "ID del curso")),
    request_body = UpdateCursoDto,
    responses(
        (status = 200, description = "Curso actualizado", body = Curso),
        (status = 400, description = "Datos inválidos", body = ErrorResponse),
        (status = 404, description = "No encontrado", body = ErrorResponse)
    ),
    tag = "Cursos"
)]
#[instrument(skip(state))]
pub async fn update_curso(
    State(state): State<AppState>,
    Path(id): Path<CursoId>,
    ValidatedJson(dto): ValidatedJson<UpdateCursoDto>,
) -> Result<Json<Curso>, AppError> {
    let curso = CursoService::new(state.store.as_ref())
        .actualizar(id, dto)
        .await
        .inspect_err(track_failure(Curso::NAME))?;

    Ok(Json(curso))
}

#[utoipa::path(
    delete,
    path = "/api/v1/cursos/{id}",
    params(("id" = i32, Path, description = "ID del curso")),
    responses(
        (status = 204, description = "Curso eliminado"),
        (status = 404, description = "No encontrado", body = ErrorResponse)
    ),
    tag = "Cursos"
)]
#[instrument(skip(state))]
pub async fn delete_curso(
    State(state): State<AppState>,
    Path(id): Path<CursoId>,
) -> Result<StatusCode, AppError> {
    CursoService::new(state.store.as_ref()).eliminar(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
