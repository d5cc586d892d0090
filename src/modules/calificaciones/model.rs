pub use unidad_models::calificaciones::*;
