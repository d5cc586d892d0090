mod common;

use axum::http::StatusCode;
use common::{enrolled, get, post, put, test_app};
use serde_json::json;

#[tokio::test]
async fn test_register_asistencia() {
    let app = test_app();
    let (matricula, asignatura) = enrolled(&app).await;

    let (status, body) = post(
        &app,
        "/api/v1/asistencias",
        json!({
            "fecha": "2026-03-02",
            "estado": "ATRASO",
            "matricula_id": matricula,
            "asignatura_id": asignatura,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["estado"], "ATRASO");
    assert_eq!(body["fecha"], "2026-03-02");

    let (_, body) = get(&app, &format!("/api/v1/matriculas/{matricula}/asistencias")).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_estado_is_rejected_before_references() {
    let app = test_app();

    let (status, body) = post(
        &app,
        "/api/v1/asistencias",
        json!({"estado": "TARDE", "matricula_id": 1, "asignatura_id": 1}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Estado inválido: TARDE");
}

#[tokio::test]
async fn test_unknown_asignatura_is_rejected() {
    let app = test_app();
    let (matricula, _) = enrolled(&app).await;

    let (status, body) = post(
        &app,
        "/api/v1/asistencias",
        json!({"estado": "PRESENTE", "matricula_id": matricula, "asignatura_id": 99}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Asignatura con ID 99 no existe");
}

#[tokio::test]
async fn test_update_estado() {
    let app = test_app();
    let (matricula, asignatura) = enrolled(&app).await;
    let (_, created) = post(
        &app,
        "/api/v1/asistencias",
        json!({"estado": "AUSENTE", "matricula_id": matricula, "asignatura_id": asignatura}),
    )
    .await;
    let uri = format!("/api/v1/asistencias/{}", created["id"]);

    let (status, body) = put(&app, &uri, json!({"estado": "JUSTIFICADO"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["estado"], "JUSTIFICADO");

    let (status, _) = get(&app, "/api/v1/asistencias/500").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_by_estado_and_asignatura() {
    let app = test_app();
    let (matricula, asignatura) = enrolled(&app).await;
    for estado in ["PRESENTE", "AUSENTE", "PRESENTE"] {
        let (status, _) = post(
            &app,
            "/api/v1/asistencias",
            json!({"estado": estado, "matricula_id": matricula, "asignatura_id": asignatura}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = get(&app, "/api/v1/asistencias/estado/PRESENTE").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = get(&app, "/api/v1/asistencias/estado/TARDE").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Estado inválido: TARDE");

    let uri = format!("/api/v1/asignaturas/{asignatura}/asistencias");
    let (status, body) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, _) = get(&app, "/api/v1/asignaturas/77/asistencias").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
