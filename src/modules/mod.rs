pub mod asignaturas;
pub mod asistencias;
pub mod calificaciones;
pub mod cursos;
pub mod docentes;
pub mod estudiantes;
pub mod health;
pub mod matriculas;
pub mod representantes;
