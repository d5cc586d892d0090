//! Shared harness for the HTTP integration tests.
//!
//! Every test builds its own router over a fresh `MemoryStore`, so tests are
//! independent and need no database.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Months, NaiveDate};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use unidad_config::CorsConfig;
use unidad_core::dates::today;
use unidad_db::MemoryStore;
use unidad_educativa::router::init_router;
use unidad_educativa::state::AppState;

pub fn test_app() -> Router {
    init_router(AppState::new(MemoryStore::new(), CorsConfig::default()))
}

/// Sends a request with an optional JSON body and returns status and parsed
/// body (`Value::Null` when the body is empty).
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

/// Sends a raw body without touching headers beyond the ones given.
pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "POST", uri, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "PUT", uri, Some(body)).await
}

/// POSTs `body` and asserts a 201, returning the created record's id.
pub async fn create(app: &Router, uri: &str, body: Value) -> i64 {
    let (status, created) = post(app, uri, body).await;
    assert_eq!(status, StatusCode::CREATED, "POST {uri}: {created}");
    created["id"].as_i64().unwrap()
}

pub fn years_ago(years: u32) -> NaiveDate {
    today() - Months::new(years * 12)
}

pub async fn create_representante(app: &Router) -> i64 {
    create(
        app,
        "/api/v1/representantes",
        json!({"nombre": "María Pérez", "telefono": "0991234567"}),
    )
    .await
}

pub async fn create_estudiante(app: &Router, cedula: &str) -> i64 {
    create(
        app,
        "/api/v1/estudiantes",
        json!({
            "nombre": "Ana",
            "apellido": "Torres",
            "cedula": cedula,
            "fecha_nacimiento": years_ago(10),
        }),
    )
    .await
}

pub async fn create_curso(app: &Router, nombre: &str) -> i64 {
    create(
        app,
        "/api/v1/cursos",
        json!({"nombre": nombre, "nivel": "Básica Media"}),
    )
    .await
}

pub async fn create_asignatura(app: &Router, curso_id: i64) -> i64 {
    create(
        app,
        "/api/v1/asignaturas",
        json!({"nombre": "Matemática", "curso_id": curso_id}),
    )
    .await
}

pub async fn create_matricula(app: &Router, estudiante_id: i64, curso_id: i64) -> i64 {
    create(
        app,
        "/api/v1/matriculas",
        json!({"estudiante_id": estudiante_id, "curso_id": curso_id}),
    )
    .await
}

/// A matricula and an asignatura of the same curso, ready for grades and
/// attendance.
pub async fn enrolled(app: &Router) -> (i64, i64) {
    let estudiante = create_estudiante(app, "0102030405").await;
    let curso = create_curso(app, "5A").await;
    let asignatura = create_asignatura(app, curso).await;
    let matricula = create_matricula(app, estudiante, curso).await;
    (matricula, asignatura)
}
