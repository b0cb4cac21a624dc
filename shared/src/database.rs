use anyhow::{Context, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::path::Path;
use tracing::{debug, info};
use url::Url;

pub type DbPool = PgPool;

/// Builds a Postgres pool for `database_url` without opening any connection.
///
/// Connections are checked before being handed out so a socket the server
/// dropped while idle is replaced instead of failing the caller. Sockets are
/// opened on first use. Outside a Tokio runtime this returns an error, since
/// the pool's maintenance task has nowhere to run.
pub fn create_connection_pool(database_url: &str) -> Result<DbPool> {
    tokio::runtime::Handle::try_current()
        .context("create_connection_pool must be called inside a Tokio runtime")?;

    let database_url = normalize_database_url(database_url);
    info!("Creating connection pool for: {}", redact_database_url(&database_url));

    let pool = PgPoolOptions::new()
        .test_before_acquire(true)
        .connect_lazy(&database_url)?;
    Ok(pool)
}

/// Executes raw SQL (DDL or DML, possibly several `;`-separated statements)
/// in one transaction. Commits on success; any driver error rolls the whole
/// text back and is returned as-is.
pub async fn run_sql(pool: &DbPool, sql: &str) -> Result<()> {
    debug!("Executing SQL ({} bytes)", sql.len());

    // Dropping an uncommitted transaction rolls it back
    let mut tx = pool.begin().await?;
    sqlx::raw_sql(sql).execute(&mut *tx).await?;
    tx.commit().await?;

    debug!("SQL committed");
    Ok(())
}

pub async fn run_sql_file(pool: &DbPool, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let sql = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read SQL file {}", path.display()))?;

    info!("Applying {}", path.display());
    run_sql(pool, &sql).await
}

/// Round-trips a `SELECT 1` to check the database is reachable.
pub async fn ping(pool: &DbPool) -> Result<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Drops a SQLAlchemy driver suffix from the scheme, so
/// `postgresql+psycopg2://...` becomes `postgresql://...`.
pub fn normalize_database_url(database_url: &str) -> String {
    match database_url.split_once("://") {
        Some((scheme, rest)) => match scheme.split_once('+') {
            Some((dialect, _driver)) => format!("{}://{}", dialect, rest),
            None => database_url.to_string(),
        },
        None => database_url.to_string(),
    }
}

/// Masks the password so the URL can go into logs.
pub fn redact_database_url(database_url: &str) -> String {
    match Url::parse(database_url) {
        Ok(mut url) => {
            if url.password().is_some() {
                let _ = url.set_password(Some("****"));
            }
            url.to_string()
        }
        Err(_) => "<unparsable url>".to_string(),
    }
}
