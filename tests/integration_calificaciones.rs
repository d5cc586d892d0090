mod common;

use axum::http::StatusCode;
use common::{enrolled, get, post, put, test_app};
use serde_json::{Value, json};

fn calificacion(nota: Value, quimestre: i32, matricula: i64, asignatura: i64) -> Value {
    json!({
        "nota": nota,
        "quimestre": quimestre,
        "matricula_id": matricula,
        "asignatura_id": asignatura,
    })
}

#[tokio::test]
async fn test_nota_out_of_range_is_rejected() {
    let app = test_app();
    let (matricula, asignatura) = enrolled(&app).await;

    for nota in [json!(15), json!(-5), json!(10.01)] {
        let (status, body) = post(
            &app,
            "/api/v1/calificaciones",
            calificacion(nota.clone(), 1, matricula, asignatura),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "nota {nota}");
        assert_eq!(body["detail"], "La nota debe estar entre 0 y 10");
    }
}

#[tokio::test]
async fn test_quimestre_out_of_range_is_rejected() {
    let app = test_app();
    let (matricula, asignatura) = enrolled(&app).await;

    let (status, body) = post(
        &app,
        "/api/v1/calificaciones",
        calificacion(json!(8), 4, matricula, asignatura),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "El quimestre debe estar entre 1 y 3");
}

#[tokio::test]
async fn test_boundary_notas_are_accepted() {
    let app = test_app();
    let (matricula, asignatura) = enrolled(&app).await;

    for nota in [json!(0), json!(10), json!(7.25)] {
        let (status, _) = post(
            &app,
            "/api/v1/calificaciones",
            calificacion(nota, 3, matricula, asignatura),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

#[tokio::test]
async fn test_unknown_matricula_is_rejected() {
    let app = test_app();
    let (_, asignatura) = enrolled(&app).await;

    let (status, body) = post(
        &app,
        "/api/v1/calificaciones",
        calificacion(json!(9), 1, 404, asignatura),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Matrícula con ID 404 no existe");
}

#[tokio::test]
async fn test_promedio_of_matricula() {
    let app = test_app();
    let (matricula, asignatura) = enrolled(&app).await;
    let uri = format!("/api/v1/matriculas/{matricula}/promedio");

    let (status, body) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["promedio"], 0.0);

    for (nota, quimestre) in [(8, 1), (9, 2), (10, 3)] {
        post(
            &app,
            "/api/v1/calificaciones",
            calificacion(json!(nota), quimestre, matricula, asignatura),
        )
        .await;
    }

    let (status, body) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matricula_id"], matricula);
    assert_eq!(body["promedio"], 9.0);

    let (_, body) = get(&app, &format!("/api/v1/matriculas/{matricula}/calificaciones")).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_update_revalidates_nota() {
    let app = test_app();
    let (matricula, asignatura) = enrolled(&app).await;
    let (_, created) = post(
        &app,
        "/api/v1/calificaciones",
        calificacion(json!(6.5), 1, matricula, asignatura),
    )
    .await;
    let uri = format!("/api/v1/calificaciones/{}", created["id"]);

    let (status, _) = put(&app, &uri, json!({"nota": 11})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = put(&app, &uri, json!({"nota": 7.5})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nota"], 7.5);
}

#[tokio::test]
async fn test_list_by_quimestre_and_asignatura() {
    let app = test_app();
    let (matricula, asignatura) = enrolled(&app).await;
    for (nota, quimestre) in [(7, 1), (8, 1), (9, 2)] {
        let (status, _) = post(
            &app,
            "/api/v1/calificaciones",
            calificacion(json!(nota), quimestre, matricula, asignatura),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = get(&app, "/api/v1/calificaciones/quimestre/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = get(&app, "/api/v1/calificaciones/quimestre/4").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "El quimestre debe estar entre 1 y 3");

    let uri = format!("/api/v1/asignaturas/{asignatura}/calificaciones");
    let (status, body) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, body) = get(&app, "/api/v1/asignaturas/77/calificaciones").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Asignatura con ID 77 no encontrada");
}
