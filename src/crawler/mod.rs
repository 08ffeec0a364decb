//! Crawler module for fetching and classifying links
//!
//! This module contains the core crawling logic:
//! - HTTP fetching with the static bypass header
//! - HTML link and metadata extraction
//! - Per-link fetch-and-classify processing
//! - The breadth-first crawl engine

mod engine;
mod extractor;
mod fetcher;
mod processor;

pub use engine::{CrawlOutcome, Engine};
pub use extractor::{
    extract_links, extract_page_metadata, find_anchor_context, AnchorMeta, DiscoveredLink,
    PageMetadata, STRUCTURED_DATA_KEY,
};
pub use fetcher::{build_http_client, fetch_url, is_ok_status, FetchResult, BYPASS_HEADER};
pub use processor::{process, Outcome};

use crate::config::CrawlConfig;
use crate::ScoutError;

/// Runs a complete crawl for the given configuration
///
/// This is the main entry point: it validates the configuration, builds
/// the HTTP client, and drives the engine until the frontier is empty.
///
/// # Arguments
///
/// * `config` - The run configuration
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - The broken-link and metadata lists
/// * `Err(ScoutError)` - Fatal configuration error; no crawling happened
pub async fn crawl(config: &CrawlConfig) -> Result<CrawlOutcome, ScoutError> {
    let engine = Engine::new(config)?;
    Ok(engine.run().await)
}
