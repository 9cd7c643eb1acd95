//! Database connection management

use crate::config::DatabaseConfig;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Idempotent schema bootstrap. Safe to run on every startup.
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id            TEXT PRIMARY KEY,
    name          TEXT NOT NULL,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    role          TEXT NOT NULL CHECK (role IN ('admin', 'sender', 'custodian')),
    created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS transfers (
    id              TEXT PRIMARY KEY,
    sender_id       TEXT NOT NULL REFERENCES users(id),
    custodian_id    TEXT NOT NULL REFERENCES users(id),
    declared_amount NUMERIC NOT NULL CHECK (declared_amount > 0),
    transaction_date TIMESTAMPTZ NOT NULL,
    cash_photo_url  TEXT,
    status          TEXT NOT NULL
        CHECK (status IN ('DECLARED', 'CASH_REGISTERED', 'COMPLETED', 'CANCELED')),
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS registered_bills (
    id           TEXT PRIMARY KEY,
    transfer_id  TEXT NOT NULL REFERENCES transfers(id),
    denomination NUMERIC NOT NULL CHECK (denomination > 0),
    serial_code  TEXT NOT NULL UNIQUE
);

CREATE INDEX IF NOT EXISTS idx_users_role ON users(role);
CREATE INDEX IF NOT EXISTS idx_bills_transfer ON registered_bills(transfer_id);
"#;

/// PostgreSQL connection pool, created once at startup and shared by every
/// workflow operation through `AppState`.
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool
    pub async fn connect(database_url: &str, config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(database_url)
            .await?;

        tracing::info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the schema if it does not exist yet
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::raw_sql(SCHEMA_SQL).execute(&self.pool).await?;
        tracing::info!("Database schema verified");
        Ok(())
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close the pool. Called on shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
