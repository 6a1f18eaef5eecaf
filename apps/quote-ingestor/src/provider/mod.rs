//! Quote provider integration.
//!
//! HTTP client for the Alpha Vantage intraday endpoint, serde models for
//! its response shapes, and the per-fetch failure taxonomy.

mod api_types;
mod client;
mod error;

pub use api_types::{IntradayResponse, RawTimeSeries, SERIES_KEY};
pub use client::{AlphaVantageClient, QuoteFetcher};
pub use error::FetchError;
