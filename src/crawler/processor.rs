//! Link processor: fetch one URL and classify the result
//!
//! The processor is a pure function over the network: it never touches the
//! frontier or visited set, it returns an [`Outcome`] for the engine to
//! fold in. It is also total — every internal failure folds into
//! `Outcome::Failed`, so a single bad URL can never abort the crawl.

use crate::crawler::extractor::{
    extract_links, extract_page_metadata, find_anchor_context, AnchorMeta, DiscoveredLink,
    PageMetadata,
};
use crate::crawler::fetcher::{fetch_url, is_ok_status, FetchResult};
use crate::url::host_of;
use reqwest::Client;
use scraper::Html;
use url::Url;

/// Classification of a single processed URL
#[derive(Debug)]
pub enum Outcome {
    /// The URL's host differs from the host filter; no fetch was performed.
    /// The engine avoids enqueuing cross-host links, but this re-check is
    /// the authoritative gate.
    Skipped,

    /// The fetch completed with a status outside the 200-399 range.
    /// `context` is best-effort anchor metadata located in the broken
    /// response's own HTML body; no link extraction happens on a broken
    /// response.
    Broken {
        status: u16,
        context: Option<AnchorMeta>,
    },

    /// The fetch raised a transport-level error (DNS, connection, timeout)
    Failed,

    /// The fetch succeeded. For HTML responses the body was parsed once,
    /// feeding both `links` and (when enabled) `page`; non-HTML responses
    /// yield no links and no metadata.
    Ok {
        status: u16,
        links: Vec<DiscoveredLink>,
        page: Option<PageMetadata>,
    },
}

/// Fetches `url` and classifies the result
///
/// # Arguments
///
/// * `client` - HTTP client carrying the bypass header
/// * `url` - The normalized URL to check
/// * `host_filter` - Host of the start URL; anything else is skipped
/// * `collect_metadata` - Whether to extract page metadata on success
pub async fn process(
    client: &Client,
    url: &Url,
    host_filter: &str,
    collect_metadata: bool,
) -> Outcome {
    if host_of(url).as_deref() != Some(host_filter) {
        tracing::warn!("Skipping external link: {}", url);
        return Outcome::Skipped;
    }

    let (status, content_type, body) = match fetch_url(client, url).await {
        FetchResult::Completed {
            status,
            content_type,
            body,
        } => (status, content_type, body),
        FetchResult::Failed { error } => {
            tracing::error!("Failed to fetch {}: {}", url, error);
            return Outcome::Failed;
        }
    };

    let is_html = content_type.contains("text/html");

    if !is_ok_status(status) {
        let context = if is_html {
            let document = Html::parse_document(&body);
            find_anchor_context(&document, url.as_str())
        } else {
            None
        };
        tracing::error!("Broken: {} ({})", url, status);
        return Outcome::Broken { status, context };
    }

    if !is_html {
        return Outcome::Ok {
            status,
            links: Vec::new(),
            page: None,
        };
    }

    // One parse serves both link and metadata extraction
    let document = Html::parse_document(&body);
    let links = extract_links(&document, url);
    let page = collect_metadata.then(|| extract_page_metadata(&document));

    Outcome::Ok {
        status,
        links,
        page,
    }
}
