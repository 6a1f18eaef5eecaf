//! Batch orchestrator: fetch -> parse -> store per symbol.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use super::pacer::Pacer;
use super::report::BatchReport;
use crate::parse::{self, ParseError};
use crate::provider::{FetchError, QuoteFetcher};
use crate::store::{QuoteStore, StorageError};

/// A single symbol's pipeline failure, by stage.
#[derive(Debug, Error)]
enum SymbolError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Parsing yielded no records at all.
    #[error("no records parsed")]
    NoRecords,

    /// The store reported zero affected rows for a non-empty batch.
    #[error("no rows stored")]
    NoRowsStored,
}

/// Fatal batch failure.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Every symbol in the run failed to process. Partial success is a
    /// normal reportable outcome and never raises this.
    #[error("all {} symbols failed to process", report.total())]
    AllSymbolsFailed {
        /// Outcomes of the failed run.
        report: BatchReport,
    },
}

/// Sequences the per-symbol pipeline across a symbol list, spacing
/// provider calls through the injected [`Pacer`].
///
/// Symbols are processed strictly one at a time: the provider's rate limit
/// is account-wide, so there is nothing to gain from concurrency here.
pub struct IngestPipeline<F, S, P> {
    fetcher: Arc<F>,
    store: Arc<S>,
    pacer: Arc<P>,
}

impl<F, S, P> IngestPipeline<F, S, P>
where
    F: QuoteFetcher,
    S: QuoteStore,
    P: Pacer,
{
    /// Create a pipeline over the given ports.
    pub fn new(fetcher: Arc<F>, store: Arc<S>, pacer: Arc<P>) -> Self {
        Self {
            fetcher,
            store,
            pacer,
        }
    }

    /// Run one symbol through fetch -> parse -> store.
    ///
    /// Returns `true` iff the fetch succeeded, parsing produced at least
    /// one record, and storage affected at least one row. Every failure is
    /// logged with its classification; none propagates to the caller.
    pub async fn process_symbol(&self, symbol: &str) -> bool {
        match self.ingest(symbol).await {
            Ok(rows) => {
                info!(symbol, rows, "Symbol processed");
                true
            }
            Err(SymbolError::Fetch(FetchError::RateLimited(note))) => {
                warn!(symbol, note = %note, "Provider rate limit hit");
                false
            }
            Err(SymbolError::Fetch(FetchError::EmptySeries)) => {
                warn!(symbol, "No time series data returned");
                false
            }
            Err(err) => {
                error!(symbol, error = %err, "Symbol failed");
                false
            }
        }
    }

    async fn ingest(&self, symbol: &str) -> Result<u64, SymbolError> {
        let series = self.fetcher.fetch(symbol).await?;
        let records = parse::parse_series(&series)?;
        if records.is_empty() {
            return Err(SymbolError::NoRecords);
        }

        let rows = self.store.upsert_batch(&records).await?;
        if rows == 0 {
            return Err(SymbolError::NoRowsStored);
        }

        Ok(rows)
    }

    /// Process `symbols` in list order, pausing between consecutive
    /// fetches (never before the first or after the last).
    ///
    /// Failures are isolated per symbol; the batch always runs to the end
    /// of the list.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::AllSymbolsFailed`] iff no symbol succeeded.
    pub async fn run(&self, symbols: &[String]) -> Result<BatchReport, BatchError> {
        let mut outcomes = HashMap::with_capacity(symbols.len());

        for (index, symbol) in symbols.iter().enumerate() {
            if index > 0 {
                self.pacer.pause().await;
            }

            info!(
                symbol = %symbol,
                position = index + 1,
                total = symbols.len(),
                "Processing symbol"
            );
            let succeeded = self.process_symbol(symbol).await;
            outcomes.insert(symbol.clone(), succeeded);
        }

        let report = BatchReport::new(outcomes);
        if report.all_failed() {
            return Err(BatchError::AllSymbolsFailed { report });
        }

        Ok(report)
    }
}
