pub use unidad_models::EstadoAsistencia;
pub use unidad_models::asistencias::*;
