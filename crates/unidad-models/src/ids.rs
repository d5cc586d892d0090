//! Strongly-typed ID newtypes for domain entities.
//!
//! Every table uses a `SERIAL` primary key. Wrapping the raw `i32` per entity
//! prevents passing a `CursoId` where a `MatriculaId` is expected.
//!
//! # Example
//!
//! ```ignore
//! use unidad_models::ids::{CursoId, EstudianteId};
//!
//! fn enroll(estudiante: EstudianteId, curso: CursoId) { /* ... */ }
//!
//! enroll(EstudianteId::from(1), CursoId::from(2));    // OK
//! // enroll(CursoId::from(2), EstudianteId::from(1)); // Compile error
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Defines an `i32` id newtype that is transparent to serde and SQLx.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
            sqlx::Type,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        #[schema(value_type = i32)]
        pub struct $name(pub i32);

        impl $name {
            #[inline]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            #[inline]
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            #[inline]
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            #[inline]
            fn from(id: $name) -> i32 {
                id.0
            }
        }
    };
}

define_id!(
    /// Id of a [`crate::Representante`].
    RepresentanteId
);
define_id!(
    /// Id of an [`crate::Estudiante`].
    EstudianteId
);
define_id!(
    /// Id of a [`crate::Docente`].
    DocenteId
);
define_id!(
    /// Id of a [`crate::Curso`].
    CursoId
);
define_id!(
    /// Id of an [`crate::Asignatura`].
    AsignaturaId
);
define_id!(
    /// Id of a [`crate::Matricula`].
    MatriculaId
);
define_id!(
    /// Id of a [`crate::Calificacion`].
    CalificacionId
);
define_id!(
    /// Id of an [`crate::Asistencia`].
    AsistenciaId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_serializes_as_plain_integer() {
        let id = EstudianteId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");

        let parsed: CursoId = serde_json::from_str("7").unwrap();
        assert_eq!(parsed, CursoId::new(7));
    }

    #[test]
    fn test_id_debug_names_the_entity() {
        assert_eq!(format!("{:?}", MatriculaId::new(3)), "MatriculaId(3)");
        assert_eq!(MatriculaId::new(3).to_string(), "3");
    }

    #[test]
    fn test_id_roundtrips_through_i32() {
        let raw: i32 = DocenteId::from(9).into();
        assert_eq!(raw, 9);
    }
}
