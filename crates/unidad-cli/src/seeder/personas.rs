//! Representante, estudiante and docente generation.

use chrono::{Days, NaiveDate};
use fake::Fake;
use fake::faker::name::en::*;
use rand::Rng;
use rand::seq::SliceRandom;
use rayon::prelude::*;
use unidad_models::RepresentanteId;

use super::models::{DocenteSeed, EstudianteSeed, RepresentanteSeed};

const TITULOS: [&str; 5] = [
    "Licenciado en Ciencias de la Educación",
    "Magíster en Educación",
    "Ingeniero",
    "Profesor de Segunda Enseñanza",
    "Doctor en Pedagogía",
];

/// Birth dates span roughly 6 to 17 years before `hoy`.
const EDAD_MIN_DIAS: u64 = 6 * 365;
const EDAD_MAX_DIAS: u64 = 17 * 365;

/// Ten-digit cedula derived from the row index; unique within a run.
pub fn cedula(base: u64, idx: usize) -> String {
    format!("{:010}", base + idx as u64)
}

fn telefono<R: Rng>(rng: &mut R) -> String {
    format!("09{:08}", rng.gen_range(0..100_000_000u32))
}

fn slug(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

pub fn generate_representantes(count: usize) -> Vec<RepresentanteSeed> {
    (0..count)
        .into_par_iter()
        .map(|_| {
            let mut rng = rand::thread_rng();
            let first: String = FirstName().fake();
            let last: String = LastName().fake();

            RepresentanteSeed {
                nombre: format!("{} {}", first, last),
                telefono: telefono(&mut rng),
            }
        })
        .collect()
}

/// Generates `count` students, each assigned a random representante when
/// any exist. `cedula_base` keeps cedulas disjoint from earlier runs.
pub fn generate_estudiantes(
    count: usize,
    representante_ids: &[RepresentanteId],
    cedula_base: u64,
    hoy: NaiveDate,
) -> Vec<EstudianteSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let mut rng = rand::thread_rng();
            let nombre: String = FirstName().fake();
            let apellido: String = LastName().fake();
            let edad_dias = rng.gen_range(EDAD_MIN_DIAS..EDAD_MAX_DIAS);
            let fecha_nacimiento = hoy.checked_sub_days(Days::new(edad_dias)).unwrap_or(hoy);
            let correo = rng
                .gen_bool(0.5)
                .then(|| format!("{}.{}{}@estudiantes.edu.ec", slug(&nombre), slug(&apellido), idx));

            EstudianteSeed {
                cedula: cedula(cedula_base, idx),
                nombre,
                apellido,
                fecha_nacimiento,
                correo,
                representante_id: representante_ids.choose(&mut rng).copied(),
            }
        })
        .collect()
}

/// Generates `count` docentes with unique lower-case correos.
pub fn generate_docentes(count: usize, run: u64) -> Vec<DocenteSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let mut rng = rand::thread_rng();
            let nombre: String = FirstName().fake();
            let apellido: String = LastName().fake();

            DocenteSeed {
                correo: format!(
                    "{}.{}.{}{}@unidad.edu.ec",
                    slug(&nombre),
                    slug(&apellido),
                    run,
                    idx
                ),
                nombre,
                apellido,
                titulo: TITULOS.choose(&mut rng).map(|t| t.to_string()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn hoy() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    #[test]
    fn test_cedulas_are_unique_and_ten_digits() {
        let estudiantes = generate_estudiantes(200, &[], 1_700_000_000, hoy());
        let cedulas: HashSet<_> = estudiantes.iter().map(|e| e.cedula.clone()).collect();
        assert_eq!(cedulas.len(), 200);
        assert!(cedulas.iter().all(|c| c.len() == 10));
    }

    #[test]
    fn test_estudiantes_fall_in_school_age() {
        for estudiante in generate_estudiantes(100, &[], 0, hoy()) {
            let edad = hoy().years_since(estudiante.fecha_nacimiento).unwrap();
            assert!((5..=17).contains(&edad), "edad {edad}");
        }
    }

    #[test]
    fn test_estudiantes_reference_given_representantes() {
        let ids = [RepresentanteId::new(3), RepresentanteId::new(9)];
        for estudiante in generate_estudiantes(50, &ids, 0, hoy()) {
            assert!(ids.contains(&estudiante.representante_id.unwrap()));
        }
    }

    #[test]
    fn test_docente_correos_are_unique_and_lowercase() {
        let docentes = generate_docentes(100, 7);
        let correos: HashSet<_> = docentes.iter().map(|d| d.correo.clone()).collect();
        assert_eq!(correos.len(), 100);
        assert!(docentes.iter().all(|d| d.correo == d.correo.to_lowercase()));
    }

    #[test]
    fn test_telefono_fits_column() {
        for r in generate_representantes(20) {
            assert_eq!(r.telefono.len(), 10);
            assert!(r.telefono.starts_with("09"));
        }
    }
}
