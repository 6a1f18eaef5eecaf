//! Record persistence.
//!
//! The [`QuoteStore`] port hides the backing store from the orchestrator;
//! production runs against PostgreSQL, tests against the in-memory twin.

mod memory;
mod postgres;

pub use memory::{MemoryQuoteStore, StoredRow};
pub use postgres::PgQuoteStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::StockRecord;

/// Port for persisting a batch of records for one symbol.
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// Insert-or-update `records`, keyed on `(symbol, timestamp)`.
    ///
    /// Applying the same record set twice leaves row count and values
    /// unchanged. Empty input is a no-op returning zero. The batch is
    /// applied atomically: on failure nothing from it remains stored.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the underlying transaction cannot
    /// commit.
    async fn upsert_batch(&self, records: &[StockRecord]) -> Result<u64, StorageError>;
}

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Could not reach the database.
    #[error("database connection error: {0}")]
    Connection(String),

    /// Statement failed or the transaction could not commit.
    #[error("query error: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migration(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        Self::Connection(err.to_string())
    }
}
