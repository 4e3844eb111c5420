use crate::UrlError;
use url::Url;

/// Resolves a raw href against the URL of the page it was found on
///
/// Standard RFC 3986 resolution: absolute hrefs pass through, scheme-relative
/// and path-relative hrefs are joined against the base, and a fragment-only
/// href resolves to the base page itself. Hrefs with non-fetchable schemes
/// (`javascript:`, `mailto:`, `tel:`) still resolve successfully; they carry
/// no host, so the scope check downstream drops them.
///
/// A resolution failure means "drop this link" at the call site, never a
/// fatal error.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use grantscout::url::resolve_href;
///
/// let base = Url::parse("https://example.com/grants/index.html").unwrap();
///
/// let url = resolve_href(&base, "/apply").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/apply");
///
/// let url = resolve_href(&base, "deadline.html").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/grants/deadline.html");
/// ```
pub fn resolve_href(base: &Url, href: &str) -> Result<Url, UrlError> {
    // Browsers strip surrounding whitespace from href values before resolving
    let href = href.trim();

    base.join(href).map_err(|e| UrlError::Resolve {
        href: href.to_string(),
        reason: e.to_string(),
    })
}
