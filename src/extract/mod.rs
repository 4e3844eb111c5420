//! Extraction collaborator
//!
//! After a crawl run completes, its full corpus is handed to a hosted
//! language-model completion endpoint that returns structured grant
//! records. The crawler's only contract with this step is "the complete
//! accumulated text for exactly one run, in corpus block format".

mod client;

pub use client::GrantExtractor;

use thiserror::Error;

/// Errors raised by the extraction step
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("API key environment variable '{0}' is not set")]
    MissingApiKey(String),

    #[error("Extraction request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Extraction API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Extraction API response had no message content")]
    MalformedResponse,
}
