pub use unidad_models::docentes::*;
