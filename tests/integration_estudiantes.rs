mod common;

use axum::http::StatusCode;
use common::{create_estudiante, get, post, put, test_app, years_ago};
use serde_json::json;

fn estudiante(cedula: &str, edad: u32) -> serde_json::Value {
    json!({
        "nombre": "Carla",
        "apellido": "Mena",
        "cedula": cedula,
        "fecha_nacimiento": years_ago(edad),
    })
}

#[tokio::test]
async fn test_create_estudiante() {
    let app = test_app();

    let (status, body) = post(&app, "/api/v1/estudiantes", estudiante("1700000001", 12)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["cedula"], "1700000001");
    assert!(body["representante_id"].is_null());
}

#[tokio::test]
async fn test_duplicate_cedula_is_rejected() {
    let app = test_app();
    create_estudiante(&app, "1700000002").await;

    let (status, body) = post(&app, "/api/v1/estudiantes", estudiante("1700000002", 9)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Ya existe un estudiante con cédula 1700000002");
}

#[tokio::test]
async fn test_too_young_is_rejected() {
    let app = test_app();

    let (status, body) = post(&app, "/api/v1/estudiantes", estudiante("1700000003", 3)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "El estudiante debe tener al menos 5 años de edad"
    );

    let (status, _) = post(&app, "/api/v1/estudiantes", estudiante("1700000003", 5)).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_unknown_representante_is_rejected() {
    let app = test_app();
    let mut body = estudiante("1700000004", 10);
    body["representante_id"] = json!(42);

    let (status, body) = post(&app, "/api/v1/estudiantes", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Representante con ID 42 no existe");
}

#[tokio::test]
async fn test_lookup_by_cedula() {
    let app = test_app();
    let id = create_estudiante(&app, "1700000005").await;

    let (status, body) = get(&app, "/api/v1/estudiantes/cedula/1700000005").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);

    let (status, _) = get(&app, "/api/v1/estudiantes/cedula/0000000000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_to_taken_cedula_is_rejected() {
    let app = test_app();
    create_estudiante(&app, "1700000006").await;
    let id = create_estudiante(&app, "1700000007").await;
    let uri = format!("/api/v1/estudiantes/{id}");

    let (status, _) = put(&app, &uri, json!({"cedula": "1700000006"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Re-sending its own cedula is not a collision.
    let (status, body) = put(&app, &uri, json!({"cedula": "1700000007", "nombre": "Rosa"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nombre"], "Rosa");
}

#[tokio::test]
async fn test_missing_estudiante_is_not_found() {
    let app = test_app();

    let (status, body) = get(&app, "/api/v1/estudiantes/5").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Estudiante con ID 5 no encontrado");

    let (status, _) = get(&app, "/api/v1/estudiantes/5/matriculas").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_lookup_by_correo() {
    let app = test_app();
    let mut body = estudiante("1700000010", 11);
    body["correo"] = json!(" carla.mena@unidad.edu.ec ");
    let (status, created) = post(&app, "/api/v1/estudiantes", body).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, found) = get(&app, "/api/v1/estudiantes/correo/carla.mena@unidad.edu.ec").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found, created);

    let (status, body) = get(&app, "/api/v1/estudiantes/correo/nadie@unidad.edu.ec").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Estudiante con correo nadie@unidad.edu.ec no encontrado");
}

#[tokio::test]
async fn test_padded_names_are_measured_after_trimming() {
    let app = test_app();
    let nombre = "N".repeat(100);
    let mut body = estudiante("1700000011", 10);
    body["nombre"] = json!(format!("   {nombre}   "));

    let (status, created) = post(&app, "/api/v1/estudiantes", body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["nombre"], nombre.as_str());

    let mut body = estudiante("1700000012", 10);
    body["apellido"] = json!("A".repeat(101));
    let (status, body) = post(&app, "/api/v1/estudiantes", body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"], "El campo apellido es inválido");
}
