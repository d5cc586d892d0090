pub use unidad_models::EstadoMatricula;
pub use unidad_models::matriculas::*;
