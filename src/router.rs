use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use tower_http::cors::{Any, CorsLayer};
use unidad_config::CorsConfig;
use unidad_observability::{logging_middleware, metrics_middleware};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::modules::asignaturas::init_asignaturas_router;
use crate::modules::asistencias::init_asistencias_router;
use crate::modules::calificaciones::init_calificaciones_router;
use crate::modules::cursos::init_cursos_router;
use crate::modules::docentes::init_docentes_router;
use crate::modules::estudiantes::init_estudiantes_router;
use crate::modules::health::{API_PREFIX, init_health_router};
use crate::modules::matriculas::init_matriculas_router;
use crate::modules::representantes::init_representantes_router;
use crate::state::AppState;

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    if config.allows_any() {
        return layer.allow_origin(Any);
    }

    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    layer.allow_origin(allowed_origins)
}

pub fn init_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_config);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .merge(init_health_router())
        .nest(
            API_PREFIX,
            Router::new()
                .nest("/representantes", init_representantes_router())
                .nest("/estudiantes", init_estudiantes_router())
                .nest("/docentes", init_docentes_router())
                .nest("/cursos", init_cursos_router())
                .nest("/asignaturas", init_asignaturas_router())
                .nest("/matriculas", init_matriculas_router())
                .nest("/calificaciones", init_calificaciones_router())
                .nest("/asistencias", init_asistencias_router()),
        )
        .with_state(state)
        .layer(cors)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
