// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)
)]

//! Quote Ingestor - Library
//!
//! Ingestion pipeline for intraday market quotes: per-symbol fetch ->
//! parse -> idempotent persist, sequenced across a symbol list under the
//! provider's request-rate limit.
//!
//! # Components
//!
//! - [`provider`]: Alpha Vantage HTTP client and response classification
//! - [`parse`]: conversion of raw payloads into canonical records
//! - [`store`]: PostgreSQL upsert store, plus an in-memory twin for tests
//! - [`pipeline`]: batch orchestrator, pacing policy, and run reporting
//! - [`config`]: startup configuration from environment variables
//!
//! The external scheduler invokes the binary once per cadence tick and
//! inspects the per-symbol outcomes; only a configuration error or an
//! all-symbols-failed run is fatal.

#![forbid(unsafe_code)]

/// Startup configuration, loaded once and passed down by reference.
pub mod config;
/// Canonical data types shared across the pipeline.
pub mod domain;
/// Conversion of raw provider payloads into canonical records.
pub mod parse;
/// Batch orchestration: sequencing, pacing, and outcome reporting.
pub mod pipeline;
/// Quote provider integration.
pub mod provider;
/// Record persistence.
pub mod store;
/// Tracing setup.
pub mod telemetry;

pub use config::{ConfigError, Credentials, DatabaseSettings, IngestorConfig, ProviderSettings};
pub use domain::StockRecord;
pub use parse::{ParseError, parse_series};
pub use pipeline::{BatchError, BatchReport, IngestPipeline, IntervalPacer, NoopPacer, Pacer};
pub use provider::{AlphaVantageClient, FetchError, QuoteFetcher, RawTimeSeries};
pub use store::{MemoryQuoteStore, PgQuoteStore, QuoteStore, StorageError};
