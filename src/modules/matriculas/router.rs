use axum::{
    Router,
    routing::{get, patch},
};

use crate::state::AppState;

use super::controller::{
    change_matricula_estado, create_matricula, delete_matricula, get_matricula,
    get_matricula_asistencias, get_matricula_calificaciones, get_matricula_promedio,
    get_matriculas, get_matriculas_by_estado, update_matricula,
};

pub fn init_matriculas_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_matriculas).post(create_matricula))
        .route("/estado/{estado}", get(get_matriculas_by_estado))
        .route(
            "/{id}",
            get(get_matricula)
                .put(update_matricula)
                .delete(delete_matricula),
        )
        .route("/{id}/estado", patch(change_matricula_estado))
        .route("/{id}/calificaciones", get(get_matricula_calificaciones))
        .route("/{id}/promedio", get(get_matricula_promedio))
        .route("/{id}/asistencias", get(get_matricula_asistencias))
}
