//! Bulk seeding for development databases.
//!
//! Generation runs on the rayon pool; inserts are batched multi-row
//! statements executed inside a single transaction, so a failed run leaves
//! no partial data behind.

pub mod academico;
pub mod batch;
pub mod models;
pub mod personas;

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use sqlx::{PgPool, Postgres, Transaction};
use unidad_core::dates::today;
use unidad_models::{AsignaturaId, CursoId, DocenteId, EstudianteId, MatriculaId, RepresentanteId};

pub use models::{Personal, PorCurso, SeedConfig};

use batch::{SeedRow, insert_rows};

/// Tables in dependency order, parents first.
pub const TABLES: [&str; 8] = [
    "representantes",
    "docentes",
    "cursos",
    "estudiantes",
    "asignaturas",
    "matriculas",
    "calificaciones",
    "asistencias",
];

/// Row counts produced by [`seed_all`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub representantes: usize,
    pub docentes: usize,
    pub cursos: usize,
    pub asignaturas: usize,
    pub estudiantes: usize,
    pub matriculas: usize,
    pub calificaciones: usize,
    pub asistencias: usize,
}

async fn insert_logged<T: SeedRow, Id>(
    tx: &mut Transaction<'_, Postgres>,
    rows: &[T],
    to_id: fn(i32) -> Id,
) -> Result<Vec<Id>> {
    let start_time = Instant::now();
    let ids = insert_rows(tx, rows).await?;
    println!(
        "   ✓ Inserted {} {} in {:?}",
        ids.len(),
        T::TABLE,
        start_time.elapsed()
    );
    Ok(ids.into_iter().map(to_id).collect())
}

/// Seconds since the epoch; keeps cedulas and correos of separate runs apart.
fn run_marker() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Seeds every table according to `config`.
pub async fn seed_all(db: &PgPool, config: &SeedConfig) -> Result<SeedSummary> {
    let start_time = Instant::now();
    let hoy = today();
    let run = run_marker();
    let por_curso = &config.por_curso;
    let total_estudiantes = config.cursos * por_curso.estudiantes;

    println!(
        "🌱 Seeding {} cursos, {} estudiantes, {} docentes, {} representantes...",
        config.cursos, total_estudiantes, config.personal.docentes, config.personal.representantes
    );

    let mut tx = db.begin().await?;

    let representantes = personas::generate_representantes(config.personal.representantes);
    let representante_ids =
        insert_logged(&mut tx, &representantes, RepresentanteId::new).await?;

    let docentes = personas::generate_docentes(config.personal.docentes, run);
    let docente_ids = insert_logged(&mut tx, &docentes, DocenteId::new).await?;

    let cursos = academico::generate_cursos(config.cursos);
    let curso_ids = insert_logged(&mut tx, &cursos, CursoId::new).await?;

    let asignaturas =
        academico::generate_asignaturas(&curso_ids, &docente_ids, por_curso.asignaturas);
    let asignatura_ids = insert_logged(&mut tx, &asignaturas, AsignaturaId::new).await?;
    let materias = academico::asignaturas_por_curso(&asignaturas, &asignatura_ids);

    let estudiantes =
        personas::generate_estudiantes(total_estudiantes, &representante_ids, run, hoy);
    let estudiante_ids = insert_logged(&mut tx, &estudiantes, EstudianteId::new).await?;

    let matriculas =
        academico::generate_matriculas(&estudiante_ids, &curso_ids, por_curso.estudiantes, hoy);
    let matricula_ids = insert_logged(&mut tx, &matriculas, MatriculaId::new).await?;
    let matriculas_con_curso: Vec<(MatriculaId, CursoId)> = matricula_ids
        .iter()
        .zip(&matriculas)
        .map(|(&id, m)| (id, m.curso_id))
        .collect();

    let calificaciones = academico::generate_calificaciones(
        &matriculas_con_curso,
        &materias,
        por_curso.quimestres,
    );
    let calificacion_count = insert_rows(&mut tx, &calificaciones).await?.len();
    println!("   ✓ Inserted {} calificaciones", calificacion_count);

    let dias = academico::dias_lectivos(hoy, por_curso.dias_asistencia);
    let asistencias = academico::generate_asistencias(&matriculas_con_curso, &materias, &dias);
    let asistencia_count = insert_rows(&mut tx, &asistencias).await?.len();
    println!("   ✓ Inserted {} asistencias", asistencia_count);

    tx.commit().await?;

    println!("\n✅ Seeding completed in {:?}", start_time.elapsed());

    Ok(SeedSummary {
        representantes: representante_ids.len(),
        docentes: docente_ids.len(),
        cursos: curso_ids.len(),
        asignaturas: asignatura_ids.len(),
        estudiantes: estudiante_ids.len(),
        matriculas: matricula_ids.len(),
        calificaciones: calificacion_count,
        asistencias: asistencia_count,
    })
}

/// Empties every table and resets the id sequences.
pub async fn clear_all(db: &PgPool) -> Result<()> {
    let start_time = Instant::now();
    println!("🗑️  Clearing all tables...");

    let statement = format!("TRUNCATE {} RESTART IDENTITY CASCADE", TABLES.join(", "));
    sqlx::query(&statement).execute(db).await?;

    println!("   ✓ Cleared {} tables in {:?}", TABLES.len(), start_time.elapsed());
    Ok(())
}

/// Row count per table, in [`TABLES`] order.
pub async fn table_counts(db: &PgPool) -> Result<Vec<(&'static str, i64)>> {
    let mut counts = Vec::with_capacity(TABLES.len());
    for table in TABLES {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(db)
            .await?;
        counts.push((table, count));
    }
    Ok(counts)
}
