use axum::{Json, extract::State};
use tracing::{instrument, warn};

use crate::modules::health::model::{
    EstadoBaseDatos, HealthResponse, WelcomeResponse, endpoints_disponibles,
};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Estado del servidor y de la base de datos", body = HealthResponse)),
    tag = "Sistema"
)]
#[instrument(skip(state))]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let (base_datos, detalles) = match state.store.ping().await {
        Ok(()) => (
            EstadoBaseDatos::Conectada,
            "Conexión a la base de datos exitosa".to_string(),
        ),
        Err(e) => {
            warn!(error = %e, "Base de datos no disponible");
            (EstadoBaseDatos::Desconectada, e.to_string())
        }
    };

    Json(HealthResponse {
        servidor: "activo".to_string(),
        base_datos,
        detalles,
        endpoints_disponibles: endpoints_disponibles(),
    })
}

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Bienvenida", body = WelcomeResponse)),
    tag = "Sistema"
)]
pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        mensaje: "Bienvenido al Sistema de Gestión Educativa".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        documentacion: "/swagger-ui".to_string(),
        scalar: "/scalar".to_string(),
        health: "/health".to_string(),
    })
}
