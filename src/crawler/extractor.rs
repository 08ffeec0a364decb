//! HTML link and metadata extraction
//!
//! Given a parsed document, this module produces:
//! - the outbound hyperlink targets with inline anchor metadata
//! - page metadata (meta tags and JSON-LD structured data) on demand
//! - best-effort anchor context for a broken target
//!
//! A successful HTML response is parsed exactly once; the same `Html`
//! document feeds both link extraction and metadata extraction.

use crate::url::normalize_url;
use scraper::{ElementRef, Html, Selector};
use serde_json::{Map, Value};
use url::Url;

/// Reserved key under which parsed JSON-LD blocks are attached
pub const STRUCTURED_DATA_KEY: &str = "structuredData";

/// Page metadata: meta-tag name/property mapped to content value, in
/// document order, plus the optional `structuredData` array
pub type PageMetadata = Map<String, Value>;

/// Inline metadata of an anchor element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorMeta {
    /// `id` attribute, None when absent or empty
    pub id: Option<String>,
    /// `class` attribute, None when absent or empty
    pub class: Option<String>,
    /// Trimmed text content, None when empty
    pub text: Option<String>,
}

/// A hyperlink discovered on a page
///
/// `url` is None when the href could not be resolved and normalized; such
/// entries are still yielded so the caller decides how to filter.
#[derive(Debug, Clone)]
pub struct DiscoveredLink {
    pub url: Option<Url>,
    pub meta: AnchorMeta,
}

/// Extracts every anchor target from a parsed document
///
/// Each `a[href]` element yields one entry: the href is resolved against
/// `page_url`, normalized, and paired with the anchor's inline metadata.
/// Unresolvable hrefs (`javascript:`, malformed values) yield `url: None`.
pub fn extract_links(document: &Html, page_url: &Url) -> Vec<DiscoveredLink> {
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                let url = page_url
                    .join(href.trim())
                    .ok()
                    .and_then(|resolved| normalize_url(resolved.as_str()).ok());

                links.push(DiscoveredLink {
                    url,
                    meta: anchor_meta(&element),
                });
            }
        }
    }

    links
}

/// Extracts page metadata from a parsed document
///
/// Every `<meta>` under the document head contributes one entry: the key is
/// the `name` attribute when present, else `property`; the value is
/// `content`. Only entries with non-empty key and value are inserted, in
/// document order, last occurrence winning on repeats.
///
/// JSON-LD scripts are parsed separately; blocks that fail to parse are
/// logged as warnings and skipped. The parsed values, when any, are
/// attached under the reserved `structuredData` key.
pub fn extract_page_metadata(document: &Html) -> PageMetadata {
    let mut metadata = PageMetadata::new();

    if let Ok(selector) = Selector::parse("head meta") {
        for element in document.select(&selector) {
            let key = attr_non_empty(&element, "name")
                .or_else(|| attr_non_empty(&element, "property"));
            let value = attr_non_empty(&element, "content");

            if let (Some(key), Some(value)) = (key, value) {
                metadata.insert(key, Value::String(value));
            }
        }
    }

    let structured_data = extract_structured_data(document);
    if !structured_data.is_empty() {
        metadata.insert(
            STRUCTURED_DATA_KEY.to_string(),
            Value::Array(structured_data),
        );
    }

    metadata
}

/// Parses all `<script type="application/ld+json">` bodies as JSON
fn extract_structured_data(document: &Html) -> Vec<Value> {
    let mut blocks = Vec::new();

    if let Ok(selector) = Selector::parse(r#"script[type="application/ld+json"]"#) {
        for element in document.select(&selector) {
            let text = element.text().collect::<String>();
            match serde_json::from_str::<Value>(&text) {
                Ok(data) if !data.is_null() => blocks.push(data),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("Failed to parse structured data JSON: {}", e);
                }
            }
        }
    }

    blocks
}

/// Finds the anchor element whose href exactly equals `target`
///
/// Used to attach best-effort context to a broken link; a broken response
/// body rarely contains such an anchor, so None is the common case.
pub fn find_anchor_context(document: &Html, target: &str) -> Option<AnchorMeta> {
    let selector = Selector::parse("a[href]").ok()?;

    document
        .select(&selector)
        .find(|element| element.value().attr("href") == Some(target))
        .map(|element| anchor_meta(&element))
}

fn anchor_meta(element: &ElementRef) -> AnchorMeta {
    let text = element.text().collect::<String>();
    let text = text.trim();

    AnchorMeta {
        id: attr_non_empty(element, "id"),
        class: attr_non_empty(element, "class"),
        text: (!text.is_empty()).then(|| text.to_string()),
    }
}

fn attr_non_empty(element: &ElementRef, name: &str) -> Option<String> {
    element
        .value()
        .attr(name)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
