//! Multi-row `INSERT ... RETURNING id` batching shared by every table.

use sqlx::postgres::PgArguments;
use sqlx::query::QueryScalar;
use sqlx::{Postgres, Transaction};

/// Rows per statement; keeps the widest table well under the 65535
/// bind-parameter limit.
pub const BATCH_SIZE: usize = 1000;

pub type SeedQuery<'q> = QueryScalar<'q, Postgres, i32, PgArguments>;

/// A generated row that can be bound into a batched insert.
pub trait SeedRow {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    fn bind<'q>(&'q self, query: SeedQuery<'q>) -> SeedQuery<'q>;
}

/// Builds `INSERT INTO t (a, b) VALUES ($1, $2), ($3, $4) RETURNING id`.
pub fn insert_statement(table: &str, columns: &[&str], rows: usize) -> String {
    let width = columns.len();
    let mut query = format!("INSERT INTO {} ({}) VALUES ", table, columns.join(", "));

    for row in 0..rows {
        if row > 0 {
            query.push_str(", ");
        }
        let params: Vec<String> = (1..=width)
            .map(|col| format!("${}", row * width + col))
            .collect();
        query.push('(');
        query.push_str(&params.join(", "));
        query.push(')');
    }

    query.push_str(" RETURNING id");
    query
}

/// Inserts `rows` in chunks of [`BATCH_SIZE`], returning ids in input order.
pub async fn insert_rows<T: SeedRow>(
    tx: &mut Transaction<'_, Postgres>,
    rows: &[T],
) -> Result<Vec<i32>, sqlx::Error> {
    let mut all_ids = Vec::with_capacity(rows.len());

    for chunk in rows.chunks(BATCH_SIZE) {
        let query = insert_statement(T::TABLE, T::COLUMNS, chunk.len());
        let mut q = sqlx::query_scalar::<_, i32>(&query);
        for row in chunk {
            q = row.bind(q);
        }
        all_ids.extend(q.fetch_all(&mut **tx).await?);
    }

    Ok(all_ids)
}
