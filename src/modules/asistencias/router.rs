use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_asistencia, delete_asistencia, get_asistencia, get_asistencias,
    get_asistencias_by_estado, update_asistencia,
};

pub fn init_asistencias_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_asistencias).post(create_asistencia))
        .route("/estado/{estado}", get(get_asistencias_by_estado))
        .route(
            "/{id}",
            get(get_asistencia)
                .put(update_asistencia)
                .delete(delete_asistencia),
        )
}
