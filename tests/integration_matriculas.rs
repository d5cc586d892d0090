mod common;

use axum::http::StatusCode;
use common::{
    create_curso, create_estudiante, create_matricula, enrolled, get, post, send, test_app,
};
use serde_json::json;

#[tokio::test]
async fn test_new_matricula_defaults_to_registrado_today() {
    let app = test_app();
    let estudiante = create_estudiante(&app, "0911111111").await;
    let curso = create_curso(&app, "3B").await;

    let (status, body) = post(
        &app,
        "/api/v1/matriculas",
        json!({"estudiante_id": estudiante, "curso_id": curso}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["estado"], "REGISTRADO");
    assert_eq!(body["fecha"], json!(unidad_core::dates::today()));
}

#[tokio::test]
async fn test_duplicate_matricula_is_rejected() {
    let app = test_app();
    let estudiante = create_estudiante(&app, "0922222222").await;
    let curso = create_curso(&app, "4C").await;
    create_matricula(&app, estudiante, curso).await;

    let (status, body) = post(
        &app,
        "/api/v1/matriculas",
        json!({"estudiante_id": estudiante, "curso_id": curso, "estado": "ACTIVO"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Estudiante ya está matriculado en este curso");
}

#[tokio::test]
async fn test_unknown_estado_label_is_rejected() {
    let app = test_app();
    let estudiante = create_estudiante(&app, "0933333333").await;
    let curso = create_curso(&app, "6A").await;

    let (status, body) = post(
        &app,
        "/api/v1/matriculas",
        json!({"estudiante_id": estudiante, "curso_id": curso, "estado": "activo"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Estado inválido: activo");
}

#[tokio::test]
async fn test_change_estado_in_any_direction() {
    let app = test_app();
    let (matricula, _) = enrolled(&app).await;
    let uri = format!("/api/v1/matriculas/{matricula}/estado");

    let (status, body) = send(&app, "PATCH", &uri, Some(json!({"estado": "GRADUADO"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["estado"], "GRADUADO");

    let (status, body) = send(&app, "PATCH", &uri, Some(json!({"estado": "REGISTRADO"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["estado"], "REGISTRADO");

    let (status, _) = send(&app, "PATCH", &uri, Some(json!({"estado": "EXPULSADO"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_change_estado_of_missing_matricula_is_not_found() {
    let app = test_app();

    let (status, _) = send(
        &app,
        "PATCH",
        "/api/v1/matriculas/8/estado",
        Some(json!({"estado": "ACTIVO"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_nested_listings_of_missing_matricula_are_not_found() {
    let app = test_app();

    for suffix in ["calificaciones", "promedio", "asistencias"] {
        let (status, body) = get(&app, &format!("/api/v1/matriculas/31/{suffix}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{suffix}");
        assert_eq!(body["detail"], "Matrícula con ID 31 no encontrada");
    }
}

#[tokio::test]
async fn test_curso_and_estudiante_list_their_matriculas() {
    let app = test_app();
    let estudiante = create_estudiante(&app, "0944444444").await;
    let curso_a = create_curso(&app, "7A").await;
    let curso_b = create_curso(&app, "7B").await;
    create_matricula(&app, estudiante, curso_a).await;
    create_matricula(&app, estudiante, curso_b).await;

    let (_, body) = get(&app, &format!("/api/v1/estudiantes/{estudiante}/matriculas")).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (_, body) = get(&app, &format!("/api/v1/cursos/{curso_a}/matriculas")).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_by_estado() {
    let app = test_app();
    let (matricula, _) = enrolled(&app).await;
    let otro = create_estudiante(&app, "0955555555").await;
    let curso = create_curso(&app, "6C").await;
    create_matricula(&app, otro, curso).await;
    send(
        &app,
        "PATCH",
        &format!("/api/v1/matriculas/{matricula}/estado"),
        Some(json!({"estado": "RETIRADO"})),
    )
    .await;

    let (status, body) = get(&app, "/api/v1/matriculas/estado/RETIRADO").await;
    assert_eq!(status, StatusCode::OK);
    let retiradas = body.as_array().unwrap();
    assert_eq!(retiradas.len(), 1);
    assert_eq!(retiradas[0]["id"], matricula);

    let (_, body) = get(&app, "/api/v1/matriculas/estado/REGISTRADO").await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = get(&app, "/api/v1/matriculas/estado/retirado").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Estado inválido: retirado");
}
