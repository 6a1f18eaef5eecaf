//! Quote Ingestor Binary
//!
//! Runs one ingestion batch over the configured symbol list. The external
//! scheduler (cron, Airflow, systemd timer) invokes this on its cadence and
//! applies its own retry policy based on the exit status.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p quote-ingestor
//! ```
//!
//! # Environment Variables
//!
//! ## Required
//! - `ALPHA_VANTAGE_API_KEY`: Alpha Vantage API key
//!
//! ## Optional
//! - `STOCK_SYMBOLS`: Comma-separated symbol list (default: AAPL,GOOGL,MSFT)
//! - `ALPHA_VANTAGE_BASE_URL`: Provider endpoint override
//! - `POSTGRES_HOST`: Database host (default: postgres)
//! - `POSTGRES_PORT`: Database port (default: 5432)
//! - `POSTGRES_DB`: Database name (default: stock_data)
//! - `POSTGRES_USER`: Database user (default: airflow)
//! - `POSTGRES_PASSWORD`: Database password (default: airflow)
//! - `FETCH_TIMEOUT_SECS`: HTTP timeout (default: 30)
//! - `RATE_LIMIT_INTERVAL_SECS`: Minimum spacing between provider calls (default: 12)
//! - `RUST_LOG`: Log level (default: info)

use std::sync::Arc;

use anyhow::Context;
use quote_ingestor::pipeline::{BatchError, IngestPipeline, IntervalPacer};
use quote_ingestor::provider::AlphaVantageClient;
use quote_ingestor::store::PgQuoteStore;
use quote_ingestor::{IngestorConfig, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();
    telemetry::init();

    let config = IngestorConfig::from_env().context("configuration error")?;
    log_config(&config);

    let fetcher = Arc::new(
        AlphaVantageClient::new(&config.provider, &config.credentials)
            .context("failed to construct quote client")?,
    );

    let store = PgQuoteStore::connect(&config.database)
        .await
        .context("failed to connect to PostgreSQL")?;
    store
        .run_migrations()
        .await
        .context("failed to apply schema migrations")?;
    store.ping().await.context("database health check failed")?;
    let store = Arc::new(store);

    let pacer = Arc::new(IntervalPacer::new(config.pacing_interval));
    let pipeline = IngestPipeline::new(fetcher, store, pacer);

    tracing::info!(symbols = ?config.symbols, "Starting ingestion batch");

    let report = match pipeline.run(&config.symbols).await {
        Ok(report) => report,
        Err(err) => {
            let BatchError::AllSymbolsFailed { report } = &err;
            tracing::error!(summary = %report.summary(), "Batch failed");
            return Err(err).context("ingestion batch failed");
        }
    };

    for symbol in &config.symbols {
        let status = if report.outcome(symbol) == Some(true) {
            "SUCCESS"
        } else {
            "FAILED"
        };
        tracing::info!(symbol = %symbol, status, "Symbol outcome");
    }
    tracing::info!(summary = %report.summary(), "Batch complete");

    Ok(())
}

/// Load a `.env` file from the current directory or any ancestor directory.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Log the parsed configuration.
fn log_config(config: &IngestorConfig) {
    tracing::info!(
        symbols = config.symbols.len(),
        host = %config.database.host,
        database = %config.database.database,
        pacing_secs = config.pacing_interval.as_secs(),
        "Configuration loaded"
    );
}
