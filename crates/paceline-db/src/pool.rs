//! Pooled database handle.

use crate::error::{DbError, DbResult};
use crate::qb::ParamList;
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::{NoTls, Row};

/// Shared handle over a deadpool-postgres pool.
///
/// Constructed once at startup and handed to every repository; cloning is
/// cheap (the pool is internally reference-counted). One statement per call,
/// one pooled connection per statement.
#[derive(Clone)]
pub struct Db {
    pool: Pool,
}

impl Db {
    /// Build a pool from a database URL.
    pub fn connect(database_url: &str, max_size: usize) -> DbResult<Self> {
        let pg_config: tokio_postgres::Config = database_url
            .parse()
            .map_err(|e: tokio_postgres::Error| DbError::Connection(e.to_string()))?;

        let mgr = Manager::from_config(
            pg_config,
            NoTls,
            ManagerConfig {
                recycling_method: RecyclingMethod::Fast,
            },
        );
        let pool = Pool::builder(mgr)
            .max_size(max_size)
            .build()
            .map_err(|e| DbError::Pool(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Round-trip check, used at startup before accepting traffic.
    pub async fn ping(&self) -> DbResult<()> {
        let client = self.pool.get().await?;
        client.query_one("SELECT 1", &[]).await?;
        Ok(())
    }

    /// Execute a statement and return all rows.
    pub async fn query(&self, sql: &str, params: &ParamList) -> DbResult<Vec<Row>> {
        tracing::debug!(sql, params = params.len(), "query");
        let client = self.pool.get().await?;
        client
            .query(sql, &params.as_refs())
            .await
            .map_err(DbError::from_db_error)
    }

    /// Execute a statement and return the first row.
    ///
    /// Zero rows map to [`DbError::NotFound`]; callers treat that as the
    /// record not existing.
    pub async fn query_one(&self, sql: &str, params: &ParamList) -> DbResult<Row> {
        self.query_opt(sql, params)
            .await?
            .ok_or_else(|| DbError::not_found("query returned no rows"))
    }

    /// Execute a statement and return the first row, if any.
    pub async fn query_opt(&self, sql: &str, params: &ParamList) -> DbResult<Option<Row>> {
        tracing::debug!(sql, params = params.len(), "query_opt");
        let client = self.pool.get().await?;
        client
            .query_opt(sql, &params.as_refs())
            .await
            .map_err(DbError::from_db_error)
    }

    /// Execute a statement and return the affected row count.
    pub async fn execute(&self, sql: &str, params: &ParamList) -> DbResult<u64> {
        tracing::debug!(sql, params = params.len(), "execute");
        let client = self.pool.get().await?;
        client
            .execute(sql, &params.as_refs())
            .await
            .map_err(DbError::from_db_error)
    }

    /// Run embedded refinery migrations on a pooled connection.
    pub async fn run_migrations(&self, runner: refinery::Runner) -> DbResult<refinery::Report> {
        let mut client = self.pool.get().await?;
        let report = runner.run_async(&mut **client).await?;
        for applied in report.applied_migrations() {
            tracing::info!(version = %applied.version(), name = %applied.name(), "applied migration");
        }
        Ok(report)
    }
}
