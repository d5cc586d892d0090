use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_curso, delete_curso, get_curso, get_curso_asignaturas, get_curso_by_nombre,
    get_curso_matriculas, get_cursos, get_cursos_by_nivel, update_curso,
};

pub fn init_cursos_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_cursos).post(create_curso))
        .route("/nombre/{nombre}", get(get_curso_by_nombre))
        .route("/nivel/{nivel}", get(get_cursos_by_nivel))
        .route(
            "/{id}",
            get(get_curso).put(update_curso).delete(delete_curso),
        )
        .route("/{id}/asignaturas", get(get_curso_asignaturas))
        .route("/{id}/matriculas", get(get_curso_matriculas))
}
