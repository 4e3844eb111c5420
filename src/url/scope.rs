use url::Url;

/// Returns the network location a URL is scoped by
///
/// The scope string is the lowercased host, with the explicit port appended
/// when one is present. URLs without a host (`javascript:`, `mailto:`,
/// `data:` and friends after resolution) have no scope.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use grantscout::url::host_scope;
///
/// let url = Url::parse("https://Example.COM/path").unwrap();
/// assert_eq!(host_scope(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(host_scope(&url), Some("127.0.0.1:8080".to_string()));
///
/// let url = Url::parse("mailto:grants@example.com").unwrap();
/// assert_eq!(host_scope(&url), None);
/// ```
pub fn host_scope(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    })
}

/// Returns true iff the URL's network location exactly equals the scope
///
/// Exact host equality only: `www.example.com` and `example.com` are
/// different scopes, and a URL with no host is never in scope.
pub fn in_scope(url: &Url, scope: &str) -> bool {
    host_scope(url).map_or(false, |h| h == scope)
}
