//! Guardian (representante) models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::entity::{Entity, set};
use crate::ids::RepresentanteId;
use crate::rules::{max_20, max_100};

/// Legal guardian of one or more students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Representante {
    pub id: RepresentanteId,
    pub nombre: String,
    pub telefono: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRepresentante {
    pub nombre: String,
    pub telefono: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepresentantePatch {
    pub nombre: Option<String>,
    pub telefono: Option<String>,
}

impl RepresentantePatch {
    pub fn is_empty(&self) -> bool {
        self.nombre.is_none() && self.telefono.is_none()
    }
}

impl Entity for Representante {
    type Id = RepresentanteId;
    type New = NewRepresentante;
    type Patch = RepresentantePatch;

    const NAME: &'static str = "Representante";
    const TABLE: &'static str = "representantes";

    fn id(&self) -> RepresentanteId {
        self.id
    }

    fn from_new(id: RepresentanteId, new: NewRepresentante) -> Self {
        Self {
            id,
            nombre: new.nombre,
            telefono: new.telefono,
        }
    }

    fn apply(&mut self, patch: RepresentantePatch) {
        set(&mut self.nombre, patch.nombre);
        set(&mut self.telefono, patch.telefono);
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRepresentanteDto {
    #[validate(custom(function = "max_100"))]
    pub nombre: String,
    #[validate(custom(function = "max_20"))]
    pub telefono: String,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateRepresentanteDto {
    #[validate(custom(function = "max_100"))]
    pub nombre: Option<String>,
    #[validate(custom(function = "max_20"))]
    pub telefono: Option<String>,
}
