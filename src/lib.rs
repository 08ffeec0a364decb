//! Linkscout: a broken-link crawler
//!
//! This crate crawls a website starting from a single origin URL, restricts
//! traversal to pages on the same host, follows hyperlinks transitively, and
//! reports every link that fails to resolve. It can optionally collect
//! page-level metadata (meta tags, JSON-LD structured data) for every
//! successfully fetched HTML page.

pub mod config;
pub mod crawler;
pub mod report;
pub mod url;

use thiserror::Error;

/// Main error type for Linkscout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
///
/// These are the only fatal errors of a run: they abort before any crawling
/// begins and map to a distinct process exit code.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Start URL is not a valid absolute URL: {0}")]
    InvalidStartUrl(String),

    #[error("Start URL has no host: {0}")]
    MissingHost(String),

    #[error("Bypass key must not be empty")]
    EmptyBypassKey,

    #[error("Bypass key is not a valid header value")]
    InvalidBypassKey,
}

/// URL-specific errors
///
/// A candidate href failing to parse is recovered locally by dropping that
/// single link; it is never fatal and never reported as broken.
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),
}

/// Result type alias for Linkscout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use crawler::{CrawlOutcome, Engine, Outcome};
pub use report::{BrokenLink, LinkStatus, PageRecord};
pub use self::url::{host_of, normalize_url};
