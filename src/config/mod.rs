//! Run configuration for Linkscout
//!
//! A run is fully described by the start URL, the bypass key sent on every
//! request, the metadata-collection switch, and the two output paths. The
//! configuration is constructed once, validated, and passed to the engine;
//! no state outlives a single run.

use crate::url::{host_of, normalize_url};
use crate::ConfigError;
use std::path::PathBuf;
use url::Url;

/// Configuration for a single crawl run
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// The crawl origin; its host defines the same-host filter
    pub start_url: String,

    /// Pre-shared key sent as a fixed request header on every fetch
    pub bypass_key: String,

    /// Whether to collect page metadata for every successful HTML page
    pub collect_metadata: bool,

    /// Where the broken-link report is written (always written)
    pub broken_links_path: PathBuf,

    /// Where the metadata report is written (only when collection is on)
    pub metadata_path: PathBuf,
}

impl CrawlConfig {
    /// Validates the configuration and resolves the start URL
    ///
    /// Returns the normalized start URL and the host filter derived from
    /// it. Absence or malformation of a required input is fatal: the run
    /// aborts before any crawling begins.
    pub fn resolve(&self) -> Result<(Url, String), ConfigError> {
        if self.bypass_key.is_empty() {
            return Err(ConfigError::EmptyBypassKey);
        }

        let start = normalize_url(&self.start_url)
            .map_err(|_| ConfigError::InvalidStartUrl(self.start_url.clone()))?;

        let host =
            host_of(&start).ok_or_else(|| ConfigError::MissingHost(self.start_url.clone()))?;

        Ok((start, host))
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            start_url: String::new(),
            bypass_key: String::new(),
            collect_metadata: false,
            broken_links_path: PathBuf::from("./broken-links.json"),
            metadata_path: PathBuf::from("./all-metadata.json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> CrawlConfig {
        CrawlConfig {
            start_url: "https://example.com/".to_string(),
            bypass_key: "secret".to_string(),
            ..CrawlConfig::default()
        }
    }

    #[test]
    fn test_valid_config_resolves() {
        let (start, host) = valid_config().resolve().unwrap();
        assert_eq!(start.as_str(), "https://example.com/");
        assert_eq!(host, "example.com");
    }

    #[test]
    fn test_start_url_fragment_stripped() {
        let config = CrawlConfig {
            start_url: "https://example.com/home#top".to_string(),
            ..valid_config()
        };
        let (start, _) = config.resolve().unwrap();
        assert_eq!(start.as_str(), "https://example.com/home");
    }

    #[test]
    fn test_invalid_start_url() {
        let config = CrawlConfig {
            start_url: "not a url".to_string(),
            ..valid_config()
        };
        assert!(matches!(
            config.resolve().unwrap_err(),
            ConfigError::InvalidStartUrl(_)
        ));
    }

    #[test]
    fn test_empty_bypass_key() {
        let config = CrawlConfig {
            bypass_key: String::new(),
            ..valid_config()
        };
        assert!(matches!(
            config.resolve().unwrap_err(),
            ConfigError::EmptyBypassKey
        ));
    }

    #[test]
    fn test_default_output_paths() {
        let config = CrawlConfig::default();
        assert_eq!(
            config.broken_links_path,
            PathBuf::from("./broken-links.json")
        );
        assert_eq!(config.metadata_path, PathBuf::from("./all-metadata.json"));
    }
}
