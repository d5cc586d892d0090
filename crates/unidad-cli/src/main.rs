use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use dotenvy::dotenv;
use sqlx::PgPool;
use unidad_cli::seeder::{self, Personal, PorCurso, SeedConfig};
use unidad_config::DatabaseConfig;
use unidad_db::{init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "unidad-cli")]
#[command(about = "Unidad Educativa CLI - database seeding and inspection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Seed the database with fake cursos, estudiantes and their records
    Seed {
        /// Number of cursos to create
        #[arg(short = 'c', long, default_value = "6")]
        cursos: usize,

        /// Number of representantes
        #[arg(long, default_value = "50")]
        representantes: usize,

        /// Number of docentes
        #[arg(long, default_value = "12")]
        docentes: usize,

        /// Asignaturas per curso
        #[arg(long, default_value = "5")]
        asignaturas: usize,

        /// Estudiantes enrolled per curso
        #[arg(long, default_value = "25")]
        estudiantes: usize,

        /// Graded quimestres per asignatura (1-3)
        #[arg(long, default_value = "2", value_parser = clap::value_parser!(i32).range(1..=3))]
        quimestres: i32,

        /// School days of attendance per asignatura
        #[arg(long, default_value = "10")]
        dias: usize,
    },
    /// Delete every row and reset id sequences
    Clear {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Print the row count of every table
    Show,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command).await {
        eprintln!("\n❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn connect() -> Result<PgPool> {
    let config = DatabaseConfig::from_env().context("Failed to read database configuration")?;
    init_db_pool(&config)
        .await
        .context("Failed to connect to database")
}

async fn run(command: Commands) -> Result<()> {
    let pool = connect().await?;

    match command {
        Commands::Migrate => {
            run_migrations(&pool).await?;
            println!("✅ Migrations applied");
        }
        Commands::Seed {
            cursos,
            representantes,
            docentes,
            asignaturas,
            estudiantes,
            quimestres,
            dias,
        } => {
            let config = SeedConfig::new(cursos)
                .with_personal(Personal {
                    representantes,
                    docentes,
                })
                .with_por_curso(PorCurso {
                    asignaturas,
                    estudiantes,
                    quimestres,
                    dias_asistencia: dias,
                });

            run_migrations(&pool).await?;
            let summary = seeder::seed_all(&pool, &config)
                .await
                .context("Error seeding database")?;
            println!("{:#?}", summary);
        }
        Commands::Clear { yes } => handle_clear(&pool, yes).await?,
        Commands::Show => {
            for (table, count) in seeder::table_counts(&pool).await? {
                println!("{:<16} {:>8}", table, count);
            }
        }
    }

    Ok(())
}

async fn handle_clear(pool: &PgPool, yes: bool) -> Result<()> {
    let confirmed = yes
        || Confirm::new()
            .with_prompt("This deletes every row in every table. Continue?")
            .default(false)
            .interact()?;

    if !confirmed {
        println!("Aborted");
        return Ok(());
    }

    seeder::clear_all(pool)
        .await
        .context("Error clearing database")?;
    println!("✅ Database cleared");
    Ok(())
}
