//! Grantscout: a bounded same-domain corpus crawler
//!
//! This crate implements a breadth-first web crawler that walks a single
//! site from a seed URL, flattens every accepted page into a text corpus,
//! and hands the corpus to an LLM extraction step that turns it into
//! structured grant records.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod links;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Grantscout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Corpus sink error: {0}")]
    Sink(#[from] output::OutputError),

    #[error("Link store error: {0}")]
    Links(#[from] links::LinkStoreError),

    #[error("Extraction error: {0}")]
    Extract(#[from] extract::ExtractError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to resolve href '{href}': {reason}")]
    Resolve { href: String, reason: String },

    #[error("URL has no host: {0}")]
    MissingHost(String),
}

/// Result type alias for Grantscout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CancelToken, CrawlOutcome, CrawlReport, Engine};
pub use crate::url::{host_scope, in_scope, resolve_href};
