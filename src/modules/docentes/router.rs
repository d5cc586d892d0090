use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_docente, delete_docente, get_docente, get_docente_asignaturas, get_docentes,
    update_docente,
};

pub fn init_docentes_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_docentes).post(create_docente))
        .route(
            "/{id}",
            get(get_docente).put(update_docente).delete(delete_docente),
        )
        .route("/{id}/asignaturas", get(get_docente_asignaturas))
}
