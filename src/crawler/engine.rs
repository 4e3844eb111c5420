//! Crawl engine - the bounded breadth-first crawl loop
//!
//! This module owns the per-run crawl state machine:
//! - a FIFO frontier of candidate URLs
//! - the visited set that guarantees at-most-once fetching
//! - the accepted-page budget that bounds the run
//!
//! It drives the fetcher and page parser in sequence and appends each
//! accepted page's text to the corpus sink.

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchResult};
use crate::crawler::parser::parse_page;
use crate::output::CorpusSink;
use crate::url::{host_scope, in_scope, resolve_href};
use crate::{ScoutError, UrlError};
use reqwest::Client;
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use url::Url;

/// Cooperative cancellation handle for an in-progress crawl
///
/// Clone the token, hand one clone to the engine, and call `cancel` from
/// anywhere (a Ctrl-C handler, a supervising task). The engine checks it
/// once per loop iteration, finishes nothing further, and reports
/// `CrawlOutcome::Cancelled`.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a new, untripped token
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation of the crawl holding this token
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns true once `cancel` has been called
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Why a crawl run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// The accepted-page budget was reached with candidates still queued
    BudgetReached,
    /// The frontier emptied before the budget was reached
    FrontierExhausted,
    /// The cancel token was tripped mid-run
    Cancelled,
}

/// Summary of one completed crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Pages accepted (HTML, 2xx) and written to the sink
    pub pages_accepted: u32,

    /// URLs dequeued and attempted, whatever the fetch outcome
    pub urls_visited: usize,

    /// Why the run stopped
    pub outcome: CrawlOutcome,
}

/// The crawl engine
///
/// Holds the configuration and the HTTP client; both are immutable across
/// runs, so one engine can serve a whole batch of seeds. All per-run state
/// (frontier, visited set, page counter) lives inside [`Engine::crawl`] and
/// dies with it.
pub struct Engine {
    config: CrawlerConfig,
    client: Client,
}

impl Engine {
    /// Creates an engine from explicit configuration
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration (timeout, page budget, identity)
    ///
    /// # Returns
    ///
    /// * `Ok(Engine)` - Ready to crawl
    /// * `Err(ScoutError)` - HTTP client construction failed
    pub fn new(config: CrawlerConfig) -> Result<Self, ScoutError> {
        let client = build_http_client(&config)?;
        Ok(Self { config, client })
    }

    /// Crawls one site breadth-first from the seed URL
    ///
    /// Each iteration dequeues a URL, skips it if already visited, fetches
    /// it, and on an accepted page appends `(url, text)` to the sink and
    /// enqueues the page's in-scope, unvisited links. The run ends when the
    /// frontier empties, the accepted-page budget is reached, or the cancel
    /// token trips.
    ///
    /// Per-URL fetch failures are logged and skipped; the only fatal error
    /// is a sink write failure, which aborts the run and propagates.
    ///
    /// The sink must be exclusively owned by this run. It is flushed before
    /// the report is returned.
    ///
    /// # Arguments
    ///
    /// * `seed` - The absolute URL the crawl starts from; its network
    ///   location defines the domain scope
    /// * `sink` - The corpus sink accepting `(url, text)` blocks
    /// * `cancel` - Cooperative cancellation handle
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - The run reached a terminal state
    /// * `Err(ScoutError)` - The sink failed, or the seed has no host
    pub async fn crawl<S: CorpusSink>(
        &self,
        seed: &Url,
        sink: &mut S,
        cancel: &CancelToken,
    ) -> Result<CrawlReport, ScoutError> {
        let scope = host_scope(seed)
            .ok_or_else(|| UrlError::MissingHost(seed.to_string()))?;

        let mut frontier: VecDeque<Url> = VecDeque::new();
        frontier.push_back(seed.clone());

        let mut visited: HashSet<String> = HashSet::new();
        let mut pages_accepted: u32 = 0;

        tracing::info!("Starting crawl of {} (scope: {})", seed, scope);

        let outcome = loop {
            if cancel.is_cancelled() {
                tracing::info!("Crawl cancelled after {} pages", pages_accepted);
                break CrawlOutcome::Cancelled;
            }

            // Budget is checked before dequeue, so the page that fills it
            // still contributes its links to the frontier.
            if pages_accepted >= self.config.max_pages {
                tracing::info!("Page budget of {} reached", self.config.max_pages);
                break CrawlOutcome::BudgetReached;
            }

            let url = match frontier.pop_front() {
                Some(url) => url,
                None => {
                    tracing::info!("Frontier exhausted after {} pages", pages_accepted);
                    break CrawlOutcome::FrontierExhausted;
                }
            };

            // A URL is visited once it has been dequeued, whatever the
            // fetch outcome. Duplicate enqueues are filtered here.
            if !visited.insert(url.as_str().to_string()) {
                continue;
            }

            match fetch_url(&self.client, &url).await {
                FetchResult::NetworkError { error } => {
                    tracing::warn!("Cannot fetch {}: {}", url, error);
                }

                FetchResult::HttpStatus { status_code } => {
                    tracing::debug!("Discarding {} (HTTP {})", url, status_code);
                }

                FetchResult::NotHtml { content_type, .. } => {
                    tracing::debug!("Discarding {} (content-type: {})", url, content_type);
                }

                FetchResult::Html { body, .. } => {
                    let page = parse_page(&body);

                    // Sink failure is the single fatal condition of a run
                    sink.append_page(url.as_str(), &page.text)?;
                    pages_accepted += 1;

                    tracing::debug!(
                        "Accepted {} ({}/{}), {} raw links",
                        url,
                        pages_accepted,
                        self.config.max_pages,
                        page.links.len()
                    );

                    self.enqueue_links(&url, &page.links, &scope, &visited, &mut frontier);
                }
            }
        };

        sink.finish()?;

        Ok(CrawlReport {
            pages_accepted,
            urls_visited: visited.len(),
            outcome,
        })
    }

    /// Resolves a page's raw hrefs and queues the in-scope, unvisited ones
    ///
    /// Resolution failures drop the link; they never affect the page that
    /// carried it. Enqueueing does not mark a URL visited - that happens at
    /// dequeue time, so duplicates in the frontier are tolerated.
    fn enqueue_links(
        &self,
        base: &Url,
        hrefs: &[String],
        scope: &str,
        visited: &HashSet<String>,
        frontier: &mut VecDeque<Url>,
    ) {
        for href in hrefs {
            let resolved = match resolve_href(base, href) {
                Ok(url) => url,
                Err(e) => {
                    tracing::debug!("Dropping link: {}", e);
                    continue;
                }
            };

            if in_scope(&resolved, scope) && !visited.contains(resolved.as_str()) {
                frontier.push_back(resolved);
            }
        }
    }
}
