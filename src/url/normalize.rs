use crate::UrlError;
use url::Url;

/// Normalizes a URL into the canonical form used for deduplication
///
/// # Normalization Steps
///
/// 1. Parse the string as an absolute URL; reject if malformed
/// 2. Reject non-HTTP(S) schemes (`javascript:`, `mailto:`, `tel:`, ...)
/// 3. Remove the fragment (everything after `#`)
///
/// Two URLs differing only by fragment normalize to the same value and are
/// treated as the same entity by the crawl engine. Callers always pass
/// either the literal start URL or an href already resolved against its
/// page's URL; a relative reference fails to parse here and is dropped.
///
/// # Arguments
///
/// * `raw` - The URL string to normalize
///
/// # Returns
///
/// * `Ok(Url)` - Normalized URL
/// * `Err(UrlError)` - The string is not a usable absolute URL; callers
///   drop the link silently, this is never fatal
///
/// # Examples
///
/// ```
/// use linkscout::url::normalize_url;
///
/// let url = normalize_url("https://example.com/page#section").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/page");
/// ```
pub fn normalize_url(raw: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(raw).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    url.set_fragment(None);

    Ok(url)
}
