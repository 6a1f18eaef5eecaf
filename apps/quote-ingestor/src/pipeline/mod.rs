//! Batch orchestration: sequencing, pacing, and outcome reporting.

mod ingest;
mod pacer;
mod report;

pub use ingest::{BatchError, IngestPipeline};
pub use pacer::{IntervalPacer, NoopPacer, Pacer};
pub use report::BatchReport;
