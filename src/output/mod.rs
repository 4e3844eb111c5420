//! Output module for the crawl corpus
//!
//! The crawler's output is a single append-only text stream per run, keyed
//! by URL, consumed afterwards by the extraction step.

mod sink;

pub use sink::{CorpusSink, FileCorpusSink};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write corpus: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
