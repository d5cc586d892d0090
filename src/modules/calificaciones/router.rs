use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_calificacion, delete_calificacion, get_calificacion, get_calificaciones,
    get_calificaciones_by_quimestre, update_calificacion,
};

pub fn init_calificaciones_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_calificaciones).post(create_calificacion))
        .route("/quimestre/{quimestre}", get(get_calificaciones_by_quimestre))
        .route(
            "/{id}",
            get(get_calificacion)
                .put(update_calificacion)
                .delete(delete_calificacion),
        )
}
