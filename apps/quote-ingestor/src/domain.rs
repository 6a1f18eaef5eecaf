//! Canonical data types shared across the ingestion pipeline.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One hourly OHLCV observation for a symbol.
///
/// The provider guarantees one entry per hour, so `(symbol, timestamp)`
/// pairs are unique within a single fetch. The persisted table enforces the
/// same pair as its primary key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    /// Ticker symbol the observation belongs to.
    pub symbol: String,
    /// Start of the hour the observation covers.
    pub timestamp: NaiveDateTime,
    /// Opening price. Non-negative.
    pub open: f64,
    /// Highest price. Non-negative.
    pub high: f64,
    /// Lowest price. Non-negative.
    pub low: f64,
    /// Closing price. Non-negative.
    pub close: f64,
    /// Traded volume. Non-negative.
    pub volume: i64,
}
