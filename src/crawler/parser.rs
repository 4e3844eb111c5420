//! HTML parser for flattening page text and collecting anchor hrefs
//!
//! Parsing never fails a page: html5ever recovers from malformed markup and
//! this module extracts whatever it can.

use scraper::{Html, Selector};

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// The page's flattened text content
    pub text: String,

    /// Raw href attribute values from anchor elements, in document order.
    /// Not yet resolved or scope-filtered; that is the url module's job.
    pub links: Vec<String>,
}

/// Parses HTML content into flattened text and raw anchor hrefs
///
/// # Text Policy
///
/// Every text node is trimmed, empty fragments are skipped, and the
/// remaining fragments are joined with a single space.
///
/// # Example
///
/// ```
/// use grantscout::crawler::parse_page;
///
/// let html = r#"<html><body><h1>Grants</h1><p>Apply <a href="/now">now</a></p></body></html>"#;
/// let page = parse_page(html);
/// assert_eq!(page.text, "Grants Apply now");
/// assert_eq!(page.links, vec!["/now".to_string()]);
/// ```
pub fn parse_page(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    let text = flatten_text(&document);
    let links = collect_hrefs(&document);

    ParsedPage { text, links }
}

/// Joins the document's text nodes into a single whitespace-collapsed string
fn flatten_text(document: &Html) -> String {
    document
        .root_element()
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collects every href attribute value on anchor elements, verbatim
fn collect_hrefs(document: &Html) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                links.push(href.to_string());
            }
        }
    }

    links
}
