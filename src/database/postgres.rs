use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, Row};

use crate::database::gateway::{Gateway, Record, Table};
use crate::database::manager::DatabaseError;
use crate::filter::Filter;

/// Postgres-backed gateway over one shared connection pool.
pub struct PgGateway {
    pool: PgPool,
}

impl PgGateway {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Column types are resolved by `jsonb_populate_record`, so timestamps,
    /// arrays and jsonb columns all accept their JSON form. Columns missing
    /// from the record keep their defaults.
    fn insert_sql(table: Table, record: &Record) -> Result<String, DatabaseError> {
        if record.is_empty() {
            return Ok(format!(
                "WITH ins AS (INSERT INTO \"{}\" DEFAULT VALUES RETURNING *) SELECT row_to_json(ins) AS row FROM ins",
                table.name()
            ));
        }

        let mut columns = Vec::with_capacity(record.len());
        for column in record.keys() {
            Filter::validate_column(column)?;
            columns.push(format!("\"{}\"", column));
        }
        let columns = columns.join(", ");

        Ok(format!(
            "WITH ins AS (INSERT INTO \"{table}\" ({columns}) SELECT {columns} FROM jsonb_populate_record(NULL::\"{table}\", $1::jsonb) RETURNING *) SELECT row_to_json(ins) AS row FROM ins",
            table = table.name(),
            columns = columns,
        ))
    }

    fn decode_row(row: &sqlx::postgres::PgRow) -> Result<Record, DatabaseError> {
        match row.try_get::<Value, _>("row")? {
            Value::Object(map) => Ok(map),
            other => Err(DatabaseError::QueryError(format!("expected a JSON object row, got {}", other))),
        }
    }
}

#[async_trait]
impl Gateway for PgGateway {
    async fn insert(&self, table: Table, record: Record) -> Result<Record, DatabaseError> {
        let sql = Self::insert_sql(table, &record)?;
        let key = record
            .get(table.key_column())
            .map(|v| v.to_string())
            .unwrap_or_default();

        let result = sqlx::query(&sql)
            .bind(Value::Object(record))
            .fetch_one(&self.pool)
            .await;

        match result {
            Ok(row) => Self::decode_row(&row),
            Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some("23505") => {
                Err(DatabaseError::Conflict { table: table.name(), key })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn select_first(&self, filter: Filter) -> Result<Option<Record>, DatabaseError> {
        let sql_result = filter.limit(1)?.to_sql();

        let mut q = sqlx::query(&sql_result.query);
        for p in sql_result.params.iter() {
            q = q.bind(p);
        }

        match q.fetch_optional(&self.pool).await? {
            Some(row) => Ok(Some(Self::decode_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Closed database pool");
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
