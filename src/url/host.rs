use url::Url;

/// Extracts the host of a URL for same-host comparison
///
/// The returned value is the lowercase hostname plus the explicit port when
/// one is present, so `https://example.com:8080/` and `https://example.com/`
/// compare as different hosts. URLs without a host return None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use linkscout::url::host_of;
///
/// let url = Url::parse("https://Example.COM/path").unwrap();
/// assert_eq!(host_of(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://example.com:8080/path").unwrap();
/// assert_eq!(host_of(&url), Some("example.com:8080".to_string()));
/// ```
pub fn host_of(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}
