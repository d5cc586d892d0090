mod common;

use axum::http::StatusCode;
use common::{create_asignatura, create_curso, get, post, send, test_app};
use serde_json::json;

#[tokio::test]
async fn test_curso_lists_its_asignaturas() {
    let app = test_app();
    let curso = create_curso(&app, "8A").await;
    let otro = create_curso(&app, "8B").await;
    create_asignatura(&app, curso).await;
    create_asignatura(&app, curso).await;
    create_asignatura(&app, otro).await;

    let (status, body) = get(&app, &format!("/api/v1/cursos/{curso}/asignaturas")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_nested_listings_of_missing_curso_are_not_found() {
    let app = test_app();

    let (status, body) = get(&app, "/api/v1/cursos/9/asignaturas").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Curso con ID 9 no encontrado");

    let (status, _) = get(&app, "/api/v1/cursos/9/matriculas").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_asignatura_requires_existing_curso() {
    let app = test_app();

    let (status, body) = post(
        &app,
        "/api/v1/asignaturas",
        json!({"nombre": "Física", "curso_id": 12}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Curso con ID 12 no existe");
}

#[tokio::test]
async fn test_asignatura_rejects_unknown_docente() {
    let app = test_app();
    let curso = create_curso(&app, "9C").await;

    let (status, body) = post(
        &app,
        "/api/v1/asignaturas",
        json!({"nombre": "Química", "curso_id": curso, "docente_id": 4}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Docente con ID 4 no existe");
}

#[tokio::test]
async fn test_delete_missing_curso_is_not_found() {
    let app = test_app();

    let (status, _) = send(&app, "DELETE", "/api/v1/cursos/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_lookup_by_nombre() {
    let app = test_app();
    let curso = create_curso(&app, "9C").await;

    let (status, body) = get(&app, "/api/v1/cursos/nombre/9C").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], curso);

    let (status, body) = get(&app, "/api/v1/cursos/nombre/10A").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Curso con nombre 10A no encontrado");
}

#[tokio::test]
async fn test_list_by_nivel() {
    let app = test_app();
    create_curso(&app, "7A").await;
    let (status, _) = post(
        &app,
        "/api/v1/cursos",
        json!({"nombre": "1BGU", "nivel": "Bachillerato"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = get(&app, "/api/v1/cursos/nivel/Bachillerato").await;
    assert_eq!(status, StatusCode::OK);
    let cursos = body.as_array().unwrap();
    assert_eq!(cursos.len(), 1);
    assert_eq!(cursos[0]["nombre"], "1BGU");

    let (_, body) = get(&app, "/api/v1/cursos/nivel/B%C3%A1sica%20Media").await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = get(&app, "/api/v1/cursos/nivel/Inicial").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}
