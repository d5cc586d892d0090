pub use unidad_models::asignaturas::*;
