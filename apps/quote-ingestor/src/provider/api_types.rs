//! Serde models for the provider's intraday response shapes.
//!
//! These map directly to Alpha Vantage's REST format. A response is either
//! a time series under [`SERIES_KEY`] or one of the sentinel error shapes
//! (`Error Message`, `Note`), all carried in a single JSON object.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Key under which the fixed 60-minute series is returned.
pub const SERIES_KEY: &str = "Time Series (60min)";

/// Raw intraday response, before classification.
///
/// Unknown keys (metadata and friends) are ignored. The series mapping
/// keeps the provider's key order.
#[derive(Debug, Deserialize)]
pub struct IntradayResponse {
    /// Explicit provider error.
    #[serde(rename = "Error Message")]
    pub error_message: Option<String>,

    /// Rate-limit notice.
    #[serde(rename = "Note")]
    pub note: Option<String>,

    /// Timestamp string -> field object, in provider order.
    #[serde(rename = "Time Series (60min)")]
    pub time_series: Option<Map<String, Value>>,
}

/// A successfully fetched, non-empty time series for one symbol.
///
/// Owned by the client for the duration of one call and consumed
/// immediately by the parser.
#[derive(Debug, Clone)]
pub struct RawTimeSeries {
    /// Symbol the series was requested for.
    pub symbol: String,
    /// Timestamp string -> field object entries, in provider order.
    pub entries: Map<String, Value>,
}
