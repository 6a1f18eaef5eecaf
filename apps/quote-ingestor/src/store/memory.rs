//! In-memory quote store for testing.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};

use super::{QuoteStore, StorageError};
use crate::domain::StockRecord;

/// A stored row: record fields plus the store-maintained update timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRow {
    /// The persisted record values.
    pub record: StockRecord,
    /// When the row was last inserted or updated.
    pub updated_at: DateTime<Utc>,
}

/// In-memory implementation of [`QuoteStore`].
///
/// Mirrors the PostgreSQL upsert semantics, including the rows-affected
/// count. Suitable for testing and development. Not for production use.
#[derive(Debug, Default)]
pub struct MemoryQuoteStore {
    rows: RwLock<HashMap<(String, NaiveDateTime), StoredRow>>,
}

impl MemoryQuoteStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.read().unwrap().len()
    }

    /// Check whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.read().unwrap().is_empty()
    }

    /// Look up a stored row by its key.
    #[must_use]
    pub fn get(&self, symbol: &str, timestamp: NaiveDateTime) -> Option<StoredRow> {
        self.rows
            .read()
            .unwrap()
            .get(&(symbol.to_string(), timestamp))
            .cloned()
    }

    /// All rows stored for `symbol`.
    #[must_use]
    pub fn rows_for(&self, symbol: &str) -> Vec<StoredRow> {
        self.rows
            .read()
            .unwrap()
            .values()
            .filter(|row| row.record.symbol == symbol)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl QuoteStore for MemoryQuoteStore {
    async fn upsert_batch(&self, records: &[StockRecord]) -> Result<u64, StorageError> {
        if records.is_empty() {
            return Ok(0);
        }

        let mut rows = self.rows.write().unwrap();
        for record in records {
            rows.insert(
                (record.symbol.clone(), record.timestamp),
                StoredRow {
                    record: record.clone(),
                    updated_at: Utc::now(),
                },
            );
        }

        Ok(records.len() as u64)
    }
}
