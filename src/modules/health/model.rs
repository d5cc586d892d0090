use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const API_PREFIX: &str = "/api/v1";

/// Collections mounted under [`API_PREFIX`].
pub const RECURSOS: [&str; 8] = [
    "representantes",
    "estudiantes",
    "docentes",
    "cursos",
    "asignaturas",
    "matriculas",
    "calificaciones",
    "asistencias",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EstadoBaseDatos {
    Conectada,
    Desconectada,
}

/// Always returned with 200; `base_datos` carries the database probe result.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "activo")]
    pub servidor: String,
    pub base_datos: EstadoBaseDatos,
    pub detalles: String,
    pub endpoints_disponibles: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WelcomeResponse {
    pub mensaje: String,
    pub version: String,
    pub documentacion: String,
    pub scalar: String,
    pub health: String,
}

pub fn endpoints_disponibles() -> BTreeMap<String, String> {
    RECURSOS
        .iter()
        .map(|recurso| (recurso.to_string(), format!("{API_PREFIX}/{recurso}")))
        .collect()
}
