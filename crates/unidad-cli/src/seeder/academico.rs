//! Curso, asignatura, matricula, calificacion and asistencia generation.

use std::collections::HashMap;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use rand::Rng;
use rand::seq::SliceRandom;
use rayon::prelude::*;
use unidad_models::{
    AsignaturaId, CursoId, DocenteId, EstadoAsistencia, EstadoMatricula, EstudianteId,
    MatriculaId,
};

use super::models::{AsignaturaSeed, AsistenciaSeed, CalificacionSeed, CursoSeed, MatriculaSeed};

const GRADOS: [(&str, &str); 13] = [
    ("1ro EGB", "Básica Preparatoria"),
    ("2do EGB", "Básica Elemental"),
    ("3ro EGB", "Básica Elemental"),
    ("4to EGB", "Básica Elemental"),
    ("5to EGB", "Básica Media"),
    ("6to EGB", "Básica Media"),
    ("7mo EGB", "Básica Media"),
    ("8vo EGB", "Básica Superior"),
    ("9no EGB", "Básica Superior"),
    ("10mo EGB", "Básica Superior"),
    ("1ro BGU", "Bachillerato"),
    ("2do BGU", "Bachillerato"),
    ("3ro BGU", "Bachillerato"),
];

const MATERIAS: [&str; 8] = [
    "Matemática",
    "Lengua y Literatura",
    "Ciencias Naturales",
    "Estudios Sociales",
    "Inglés",
    "Educación Física",
    "Educación Cultural y Artística",
    "Informática",
];

/// Parallel letter for the n-th repetition of the grade list: A..Z, then A2..
fn paralelo(n: usize) -> String {
    let letra = char::from(b'A' + (n % 26) as u8);
    match n / 26 {
        0 => letra.to_string(),
        vuelta => format!("{}{}", letra, vuelta + 1),
    }
}

pub fn generate_cursos(count: usize) -> Vec<CursoSeed> {
    (0..count)
        .map(|idx| {
            let (grado, nivel) = GRADOS[idx % GRADOS.len()];
            CursoSeed {
                nombre: format!("{} {}", grado, paralelo(idx / GRADOS.len())),
                nivel: nivel.to_string(),
            }
        })
        .collect()
}

/// Generates `per_curso` asignaturas for every curso, each taught by a random
/// docente when any exist.
pub fn generate_asignaturas(
    curso_ids: &[CursoId],
    docente_ids: &[DocenteId],
    per_curso: usize,
) -> Vec<AsignaturaSeed> {
    curso_ids
        .par_iter()
        .flat_map(|&curso_id| {
            let mut rng = rand::thread_rng();
            (0..per_curso)
                .map(|i| {
                    let nombre = match MATERIAS.get(i) {
                        Some(materia) => materia.to_string(),
                        None => format!("Optativa {}", i + 1 - MATERIAS.len()),
                    };

                    AsignaturaSeed {
                        nombre,
                        descripcion: None,
                        curso_id,
                        docente_id: docente_ids.choose(&mut rng).copied(),
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

fn estado_matricula<R: Rng>(rng: &mut R) -> EstadoMatricula {
    match rng.gen_range(0..20) {
        0 => EstadoMatricula::Retirado,
        1 => EstadoMatricula::Suspendido,
        2 | 3 => EstadoMatricula::Matriculado,
        _ => EstadoMatricula::Activo,
    }
}

fn estado_asistencia<R: Rng>(rng: &mut R) -> EstadoAsistencia {
    match rng.gen_range(0..20) {
        0 => EstadoAsistencia::Ausente,
        1 => EstadoAsistencia::Atraso,
        2 => EstadoAsistencia::Justificado,
        _ => EstadoAsistencia::Presente,
    }
}

/// Enrolls consecutive blocks of `per_curso` estudiantes into each curso, so
/// no (estudiante, curso) pair repeats.
pub fn generate_matriculas(
    estudiante_ids: &[EstudianteId],
    curso_ids: &[CursoId],
    per_curso: usize,
    hoy: NaiveDate,
) -> Vec<MatriculaSeed> {
    if per_curso == 0 {
        return Vec::new();
    }

    estudiante_ids
        .par_chunks(per_curso)
        .zip(curso_ids.par_iter())
        .flat_map(|(bloque, &curso_id)| {
            let mut rng = rand::thread_rng();
            bloque
                .iter()
                .map(|&estudiante_id| MatriculaSeed {
                    fecha: hoy
                        .checked_sub_days(Days::new(rng.gen_range(0..90)))
                        .unwrap_or(hoy),
                    estudiante_id,
                    curso_id,
                    estado: estado_matricula(&mut rng),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Groups asignatura ids by the curso they belong to.
pub fn asignaturas_por_curso(
    asignaturas: &[AsignaturaSeed],
    ids: &[AsignaturaId],
) -> HashMap<CursoId, Vec<AsignaturaId>> {
    let mut por_curso: HashMap<CursoId, Vec<AsignaturaId>> = HashMap::new();
    for (asignatura, &id) in asignaturas.iter().zip(ids) {
        por_curso.entry(asignatura.curso_id).or_default().push(id);
    }
    por_curso
}

/// One grade per quimestre for every asignatura of the matricula's curso.
pub fn generate_calificaciones(
    matriculas: &[(MatriculaId, CursoId)],
    asignaturas: &HashMap<CursoId, Vec<AsignaturaId>>,
    quimestres: i32,
) -> Vec<CalificacionSeed> {
    matriculas
        .par_iter()
        .flat_map(|&(matricula_id, curso_id)| {
            let mut rng = rand::thread_rng();
            let materias = asignaturas.get(&curso_id).map(Vec::as_slice).unwrap_or_default();
            let mut notas = Vec::with_capacity(materias.len() * quimestres.max(0) as usize);

            for &asignatura_id in materias {
                for quimestre in 1..=quimestres {
                    let nota: f64 = rng.gen_range(4.0..=10.0);
                    notas.push(CalificacionSeed {
                        nota: (nota * 100.0).round() / 100.0,
                        quimestre,
                        matricula_id,
                        asignatura_id,
                    });
                }
            }

            notas
        })
        .collect()
}

/// The `n` most recent weekdays up to and including `hoy`, newest first.
pub fn dias_lectivos(hoy: NaiveDate, n: usize) -> Vec<NaiveDate> {
    hoy.iter_days()
        .rev()
        .filter(|fecha| !matches!(fecha.weekday(), Weekday::Sat | Weekday::Sun))
        .take(n)
        .collect()
}

pub fn generate_asistencias(
    matriculas: &[(MatriculaId, CursoId)],
    asignaturas: &HashMap<CursoId, Vec<AsignaturaId>>,
    dias: &[NaiveDate],
) -> Vec<AsistenciaSeed> {
    matriculas
        .par_iter()
        .flat_map(|&(matricula_id, curso_id)| {
            let mut rng = rand::thread_rng();
            let materias = asignaturas.get(&curso_id).map(Vec::as_slice).unwrap_or_default();
            let mut registros = Vec::with_capacity(materias.len() * dias.len());

            for &asignatura_id in materias {
                for &fecha in dias {
                    registros.push(AsistenciaSeed {
                        fecha,
                        estado: estado_asistencia(&mut rng),
                        matricula_id,
                        asignatura_id,
                    });
                }
            }

            registros
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn hoy() -> NaiveDate {
        // A Wednesday
        NaiveDate::from_ymd_opt(2026, 3, 4).unwrap()
    }

    #[test]
    fn test_cursos_cycle_grades_then_parallels() {
        let cursos = generate_cursos(15);
        assert_eq!(cursos[0].nombre, "1ro EGB A");
        assert_eq!(cursos[13].nombre, "1ro EGB B");
        assert_eq!(cursos[14].nivel, "Básica Elemental");
        assert!(cursos.iter().all(|c| c.nombre.chars().count() <= 50));
    }

    #[test]
    fn test_paralelo_wraps_after_z() {
        assert_eq!(paralelo(0), "A");
        assert_eq!(paralelo(25), "Z");
        assert_eq!(paralelo(26), "A2");
    }

    #[test]
    fn test_asignaturas_per_curso() {
        let cursos = [CursoId::new(1), CursoId::new(2)];
        let asignaturas = generate_asignaturas(&cursos, &[], 10);
        assert_eq!(asignaturas.len(), 20);
        assert!(asignaturas.iter().all(|a| a.docente_id.is_none()));
        assert!(asignaturas.iter().any(|a| a.nombre == "Optativa 2"));
    }

    #[test]
    fn test_matriculas_never_repeat_a_pair() {
        let estudiantes: Vec<_> = (1..=12).map(EstudianteId::new).collect();
        let cursos: Vec<_> = (1..=3).map(CursoId::new).collect();
        let matriculas = generate_matriculas(&estudiantes, &cursos, 4, hoy());

        assert_eq!(matriculas.len(), 12);
        let pares: HashSet<_> = matriculas
            .iter()
            .map(|m| (m.estudiante_id, m.curso_id))
            .collect();
        assert_eq!(pares.len(), 12);
        assert!(matriculas.iter().all(|m| m.fecha <= hoy()));
    }

    #[test]
    fn test_calificaciones_stay_in_range() {
        let asignaturas = HashMap::from([(
            CursoId::new(1),
            vec![AsignaturaId::new(10), AsignaturaId::new(11)],
        )]);
        let matriculas = [(MatriculaId::new(1), CursoId::new(1))];
        let notas = generate_calificaciones(&matriculas, &asignaturas, 3);

        assert_eq!(notas.len(), 6);
        assert!(notas.iter().all(|c| (0.0..=10.0).contains(&c.nota)));
        assert!(notas.iter().all(|c| (1..=3).contains(&c.quimestre)));
    }

    #[test]
    fn test_dias_lectivos_skip_weekends() {
        let dias = dias_lectivos(hoy(), 5);
        assert_eq!(dias.len(), 5);
        assert_eq!(dias[0], hoy());
        assert!(
            dias.iter()
                .all(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        );
        assert_eq!(dias[4], NaiveDate::from_ymd_opt(2026, 2, 26).unwrap());
    }

    #[test]
    fn test_asistencias_one_per_subject_and_day() {
        let asignaturas = HashMap::from([(CursoId::new(1), vec![AsignaturaId::new(10)])]);
        let matriculas = [
            (MatriculaId::new(1), CursoId::new(1)),
            (MatriculaId::new(2), CursoId::new(9)),
        ];
        let dias = dias_lectivos(hoy(), 3);
        let registros = generate_asistencias(&matriculas, &asignaturas, &dias);
        assert_eq!(registros.len(), 3);
    }
}
