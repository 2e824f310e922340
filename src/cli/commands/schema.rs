use anyhow::Context;
use clap::Args;
use sqlx::PgPool;
use tracing::info;

use crate::config::AppConfig;
use crate::database::DatabaseManager;

pub const SCHEMA_SQL: &str = include_str!("../../../sql/schema.sql");

#[derive(Debug, Args)]
pub struct SchemaArgs {
    #[arg(long, help = "Apply to DATABASE_URL instead of printing")]
    pub apply: bool,
}

pub async fn handle(args: SchemaArgs, config: AppConfig) -> anyhow::Result<()> {
    if !args.apply {
        print!("{}", SCHEMA_SQL);
        return Ok(());
    }

    let pool = DatabaseManager::connect(&config.database)?;
    let result = apply(&pool).await;
    pool.close().await;
    result?;

    info!("Schema applied");
    Ok(())
}

/// Runs every schema statement in order. Safe to repeat.
pub async fn apply(pool: &PgPool) -> anyhow::Result<()> {
    for statement in statements(SCHEMA_SQL) {
        sqlx::query(statement)
            .execute(pool)
            .await
            .with_context(|| format!("failed to apply statement: {}", statement))?;
    }
    Ok(())
}

/// Splits the schema into statements, dropping comment-only chunks.
fn statements(sql: &str) -> Vec<&str> {
    sql.split(';')
        .map(str::trim)
        .filter(|chunk| chunk.lines().any(|line| !line.trim().is_empty() && !line.trim_start().starts_with("--")))
        .collect()
}
