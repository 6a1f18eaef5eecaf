//! PostgreSQL-backed quote store.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, info};

use super::{QuoteStore, StorageError};
use crate::config::DatabaseSettings;
use crate::domain::StockRecord;

/// Quote store backed by the `stock_prices` table.
///
/// Connections are pooled and scoped per operation: each call acquires a
/// connection from the pool and returns it on every exit path, so a failed
/// batch cannot leak a connection into the next symbol's attempt.
pub struct PgQuoteStore {
    pool: PgPool,
}

impl PgQuoteStore {
    /// Connect a new pool using the given settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be reached.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&settings.connection_url())
            .await?;

        info!(
            host = %settings.host,
            database = %settings.database,
            "PostgreSQL connection pool initialized"
        );

        Ok(Self { pool })
    }

    /// Create a store from an existing pool (for testing).
    #[must_use]
    pub const fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply the embedded schema migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if a migration cannot be applied.
    pub async fn run_migrations(&self) -> Result<(), StorageError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StorageError::Migration(e.to_string()))?;

        debug!("Schema migrations applied");
        Ok(())
    }

    /// Verify the database is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the round trip fails.
    pub async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl QuoteStore for PgQuoteStore {
    async fn upsert_batch(&self, records: &[StockRecord]) -> Result<u64, StorageError> {
        if records.is_empty() {
            debug!("No records to store");
            return Ok(0);
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO stock_prices (symbol, timestamp, open, high, low, close, volume) ",
        );
        builder.push_values(records, |mut row, record| {
            row.push_bind(&record.symbol)
                .push_bind(record.timestamp)
                .push_bind(record.open)
                .push_bind(record.high)
                .push_bind(record.low)
                .push_bind(record.close)
                .push_bind(record.volume);
        });
        builder.push(
            " ON CONFLICT (symbol, timestamp) DO UPDATE SET \
             open = EXCLUDED.open, \
             high = EXCLUDED.high, \
             low = EXCLUDED.low, \
             close = EXCLUDED.close, \
             volume = EXCLUDED.volume, \
             updated_at = NOW()",
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let result = builder
            .build()
            .execute(&mut *tx)
            .await
            .map_err(|e| StorageError::Query(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| StorageError::Query(e.to_string()))?;

        let rows = result.rows_affected();
        debug!(rows, "Inserted/updated quote rows");
        Ok(rows)
    }
}
