pub use unidad_models::cursos::*;
