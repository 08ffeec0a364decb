//! Output records and final report serialization
//!
//! The output files are written exactly once, at the very end of a run,
//! fully formed. User-visible failure is communicated exclusively through
//! `broken-links.json` and the process exit code.

use crate::crawler::{CrawlOutcome, PageMetadata};
use crate::ScoutError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::fs;
use std::path::Path;

/// Sentinel status for transport-level failures
pub const FETCH_FAILED: &str = "Fetch Failed";

/// Status of a broken link: an HTTP code, or the transport-failure sentinel
///
/// Serializes as a bare number for HTTP codes and as the string
/// `"Fetch Failed"` for transport failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkStatus {
    Http(u16),
    FetchFailed,
}

impl Serialize for LinkStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LinkStatus::Http(code) => serializer.serialize_u16(*code),
            LinkStatus::FetchFailed => serializer.serialize_str(FETCH_FAILED),
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkStatus::Http(code) => write!(f, "{}", code),
            LinkStatus::FetchFailed => f.write_str(FETCH_FAILED),
        }
    }
}

/// One broken URL and how it failed
#[derive(Debug, Clone, Serialize)]
pub struct BrokenLink {
    pub url: String,
    pub status: LinkStatus,
}

/// Page metadata for one successfully fetched HTML page
#[derive(Debug, Clone, Serialize)]
pub struct PageRecord {
    pub url: String,
    pub status: u16,
    #[serde(rename = "pageMetadata")]
    pub page_metadata: PageMetadata,
}

/// Writes the broken-link report (always written, `[]` when empty)
pub fn write_broken_links(path: &Path, broken_links: &[BrokenLink]) -> Result<(), ScoutError> {
    let json = serde_json::to_string_pretty(broken_links)?;
    fs::write(path, json)?;
    Ok(())
}

/// Writes the metadata report (only called when collection is enabled)
pub fn write_metadata(path: &Path, records: &[PageRecord]) -> Result<(), ScoutError> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)?;
    Ok(())
}

/// Process exit code policy: 0 when no links are broken, 1 otherwise
///
/// Fatal configuration errors use a separate code (2) at the binary edge.
pub fn exit_code(broken_links: &[BrokenLink]) -> i32 {
    if broken_links.is_empty() {
        0
    } else {
        1
    }
}

/// Prints the human-readable run summary
///
/// Informational only; the data contract is the JSON files.
pub fn print_summary(outcome: &CrawlOutcome) {
    if outcome.broken_links.is_empty() {
        println!("All links checked successfully!");
        return;
    }

    eprintln!("Found {} broken link(s).", outcome.broken_links.len());
    for link in &outcome.broken_links {
        eprintln!("- {} (Status: {})", link.url, link.status);
    }
}
