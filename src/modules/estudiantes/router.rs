use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_estudiante, delete_estudiante, get_estudiante, get_estudiante_by_cedula,
    get_estudiante_by_correo, get_estudiante_matriculas, get_estudiantes, update_estudiante,
};

pub fn init_estudiantes_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_estudiantes).post(create_estudiante))
        .route("/cedula/{cedula}", get(get_estudiante_by_cedula))
        .route("/correo/{correo}", get(get_estudiante_by_correo))
        .route(
            "/{id}",
            get(get_estudiante)
                .put(update_estudiante)
                .delete(delete_estudiante),
        )
        .route("/{id}/matriculas", get(get_estudiante_matriculas))
}
