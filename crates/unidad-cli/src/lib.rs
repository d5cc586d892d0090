//! # Unidad CLI
//!
//! Database seeding utilities for development and load testing.
//!
//! This library crate provides the seeding functionality used by the CLI binary.
//!
//! ## Usage
//!
//! ```ignore
//! use unidad_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(6); // 6 cursos with defaults
//! seed_all(&pool, &config).await?;
//! ```

pub mod seeder;
