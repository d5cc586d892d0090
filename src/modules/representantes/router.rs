use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_representante, delete_representante, get_representante,
    get_representante_by_telefono, get_representante_estudiantes, get_representantes,
    update_representante,
};

pub fn init_representantes_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_representantes).post(create_representante))
        .route(
            "/{id}",
            get(get_representante)
                .put(update_representante)
                .delete(delete_representante),
        )
        .route("/telefono/{telefono}", get(get_representante_by_telefono))
        .route("/{id}/estudiantes", get(get_representante_estudiantes))
}
