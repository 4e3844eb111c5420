//! Seed link list store
//!
//! The batch driver reads its seed URLs from a newline-delimited flat file,
//! one absolute URL per line, blank lines ignored. Writes are append-only
//! with exact-match deduplication; removal is exact-match as well.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Errors raised by link store operations
#[derive(Debug, Error)]
pub enum LinkStoreError {
    #[error("Link store IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of an append operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The link was validated and written
    Added,
    /// An identical line already exists; nothing was written
    AlreadyPresent,
    /// The link failed syntax validation; nothing was written
    Invalid,
}

impl fmt::Display for AppendOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => write!(f, "link added"),
            Self::AlreadyPresent => write!(f, "link already exists"),
            Self::Invalid => write!(f, "invalid link"),
        }
    }
}

/// Result of a remove operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The link was found and removed
    Removed,
    /// No identical line exists
    NotFound,
    /// The store file does not exist
    NoStore,
}

impl fmt::Display for RemoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Removed => write!(f, "link removed"),
            Self::NotFound => write!(f, "link not in list"),
            Self::NoStore => write!(f, "links file does not exist"),
        }
    }
}

/// Flat-file store of seed URLs
pub struct LinkStore {
    path: PathBuf,
}

impl LinkStore {
    /// Creates a store over the given file path; the file itself may not
    /// exist yet
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Loads the ordered seed list
    ///
    /// A missing file is an empty list, not an error. Blank lines are
    /// ignored; lines that do not parse as URLs are skipped with a warning.
    pub fn load(&self) -> Result<Vec<Url>, LinkStoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let mut seeds = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match Url::parse(line) {
                Ok(url) => seeds.push(url),
                Err(e) => {
                    tracing::warn!("Skipping unparseable seed line '{}': {}", line, e);
                }
            }
        }

        Ok(seeds)
    }

    /// Appends a link if it is valid and not already present
    pub fn append(&self, link: &str) -> Result<AppendOutcome, LinkStoreError> {
        let link = link.trim();

        if !validate_link(link) {
            return Ok(AppendOutcome::Invalid);
        }

        let existing = if self.path.exists() {
            fs::read_to_string(&self.path)?
        } else {
            String::new()
        };

        if existing.lines().any(|line| line.trim() == link) {
            return Ok(AppendOutcome::AlreadyPresent);
        }

        let mut content = existing;
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        content.push_str(link);
        content.push('\n');
        fs::write(&self.path, content)?;

        Ok(AppendOutcome::Added)
    }

    /// Removes a link by exact match
    pub fn remove(&self, link: &str) -> Result<RemoveOutcome, LinkStoreError> {
        let link = link.trim();

        if !self.path.exists() {
            return Ok(RemoveOutcome::NoStore);
        }

        let content = fs::read_to_string(&self.path)?;
        let lines: Vec<&str> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if !lines.contains(&link) {
            return Ok(RemoveOutcome::NotFound);
        }

        let mut remaining = lines
            .into_iter()
            .filter(|line| *line != link)
            .collect::<Vec<_>>()
            .join("\n");
        if !remaining.is_empty() {
            remaining.push('\n');
        }
        fs::write(&self.path, remaining)?;

        Ok(RemoveOutcome::Removed)
    }
}

/// Checks whether a string is an acceptable seed link
///
/// Accepts absolute http/https/ftp URLs whose host is a dotted name with an
/// alphabetic top-level label of at least two characters.
pub fn validate_link(link: &str) -> bool {
    let url = match Url::parse(link.trim()) {
        Ok(url) => url,
        Err(_) => return false,
    };

    if !matches!(url.scheme(), "http" | "https" | "ftp") {
        return false;
    }

    let host = match url.host_str() {
        Some(host) => host,
        None => return false,
    };

    match host.rsplit('.').next() {
        Some(tld) if tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()) => {
            host.contains('.')
        }
        _ => false,
    }
}
