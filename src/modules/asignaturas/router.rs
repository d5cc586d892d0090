use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_asignatura, delete_asignatura, get_asignatura, get_asignatura_asistencias,
    get_asignatura_calificaciones, get_asignaturas, update_asignatura,
};

pub fn init_asignaturas_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_asignaturas).post(create_asignatura))
        .route(
            "/{id}",
            get(get_asignatura)
                .put(update_asignatura)
                .delete(delete_asignatura),
        )
        .route("/{id}/calificaciones", get(get_asignatura_calificaciones))
        .route("/{id}/asistencias", get(get_asignatura_asistencias))
}
