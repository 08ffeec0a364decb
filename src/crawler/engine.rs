//! Crawl engine: frontier management and the main crawl loop
//!
//! The engine exclusively owns the frontier queue, the visited set, and the
//! two output lists for the duration of a run. Traversal is breadth-first
//! with exactly one URL in flight at a time; the visited-check at dequeue
//! time is the sole dedup guard, so a URL may be enqueued more than once
//! but is processed at most once.

use crate::config::CrawlConfig;
use crate::crawler::fetcher::build_http_client;
use crate::crawler::processor::{process, Outcome};
use crate::report::{BrokenLink, LinkStatus, PageRecord};
use crate::url::host_of;
use crate::ScoutError;
use reqwest::Client;
use std::collections::{HashSet, VecDeque};
use url::Url;

/// Final result of a crawl run
#[derive(Debug)]
pub struct CrawlOutcome {
    /// One record per broken URL encountered, in discovery order
    pub broken_links: Vec<BrokenLink>,

    /// One record per successfully fetched HTML page, only populated when
    /// metadata collection is enabled
    pub metadata_records: Vec<PageRecord>,

    /// Number of URLs dequeued and processed
    pub pages_visited: usize,
}

/// Breadth-first crawl engine
pub struct Engine {
    client: Client,
    start_url: Url,
    host_filter: String,
    collect_metadata: bool,
    frontier: VecDeque<Url>,
    visited: HashSet<String>,
}

impl Engine {
    /// Creates an engine from a validated configuration
    ///
    /// An unparsable start URL or empty bypass key is a fatal
    /// configuration error, not a broken-link case.
    pub fn new(config: &CrawlConfig) -> Result<Self, ScoutError> {
        let (start_url, host_filter) = config.resolve()?;
        let client = build_http_client(&config.bypass_key)?;

        let mut frontier = VecDeque::new();
        frontier.push_back(start_url.clone());

        Ok(Self {
            client,
            start_url,
            host_filter,
            collect_metadata: config.collect_metadata,
            frontier,
            visited: HashSet::new(),
        })
    }

    /// The normalized crawl origin
    pub fn start_url(&self) -> &Url {
        &self.start_url
    }

    /// Runs the crawl to frontier exhaustion
    ///
    /// Terminates when every reachable same-host URL has been visited or
    /// skipped. Per-URL failures are converted into broken-link records;
    /// nothing an individual link does can abort the run.
    pub async fn run(mut self) -> CrawlOutcome {
        tracing::info!("Checking links for: {}", self.start_url);

        let mut broken_links = Vec::new();
        let mut metadata_records = Vec::new();
        let mut pages_visited = 0usize;

        while let Some(current) = self.frontier.pop_front() {
            // Duplicate enqueues are tolerated; dedup happens here
            if !self.visited.insert(current.as_str().to_string()) {
                continue;
            }
            pages_visited += 1;

            tracing::info!("Checking: {}", current);
            let outcome = process(
                &self.client,
                &current,
                &self.host_filter,
                self.collect_metadata,
            )
            .await;

            match outcome {
                Outcome::Skipped => {}

                Outcome::Failed => {
                    broken_links.push(BrokenLink {
                        url: current.to_string(),
                        status: LinkStatus::FetchFailed,
                    });
                }

                Outcome::Broken { status, context } => {
                    if let Some(meta) = context {
                        tracing::debug!(
                            "Anchor context for {}: id={:?} class={:?} text={:?}",
                            current,
                            meta.id,
                            meta.class,
                            meta.text
                        );
                    }
                    broken_links.push(BrokenLink {
                        url: current.to_string(),
                        status: LinkStatus::Http(status),
                    });
                }

                Outcome::Ok {
                    status,
                    links,
                    page,
                } => {
                    for link in links {
                        let Some(url) = link.url else { continue };
                        if host_of(&url).as_deref() != Some(self.host_filter.as_str()) {
                            continue;
                        }
                        if self.visited.contains(url.as_str()) {
                            continue;
                        }
                        self.frontier.push_back(url);
                    }

                    if let Some(page_metadata) = page {
                        metadata_records.push(PageRecord {
                            url: current.to_string(),
                            status,
                            page_metadata,
                        });
                    }
                }
            }

            if pages_visited % 10 == 0 {
                tracing::info!(
                    "Progress: {} pages visited, {} queued, {} broken",
                    pages_visited,
                    self.frontier.len(),
                    broken_links.len()
                );
            }
        }

        tracing::info!(
            "Crawl complete: {} pages visited, {} broken link(s)",
            pages_visited,
            broken_links.len()
        );

        CrawlOutcome {
            broken_links,
            metadata_records,
            pages_visited,
        }
    }
}
