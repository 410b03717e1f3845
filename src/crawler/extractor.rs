//! HTML content extractor
//!
//! This module parses fetched HTML and derives everything the traversal
//! controller needs from a page:
//! - The page title (with fallbacks)
//! - Visible text, excluding navigation chrome and scripts
//! - Outbound links, resolved, normalized, and deduplicated
//! - Inline PDF references, kept separate from crawlable links

use crate::url::normalize_url;
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

/// Element types whose entire subtree is excluded from visible text
const EXCLUDED_ELEMENTS: &[&str] = &[
    "script", "style", "noscript", "nav", "header", "footer", "aside", "button", "form", "iframe",
    "svg",
];

/// ARIA roles whose entire subtree is excluded from visible text
const EXCLUDED_ROLES: &[&str] = &[
    "navigation",
    "banner",
    "contentinfo",
    "complementary",
    "search",
];

/// Elements that terminate a text line, so the cleaner can segment
/// fragments at block boundaries
const BLOCK_ELEMENTS: &[&str] = &[
    "p", "div", "section", "article", "main", "h1", "h2", "h3", "h4", "h5", "h6", "li", "ul",
    "ol", "table", "tr", "td", "th", "blockquote", "pre",
];

/// Everything extracted from one HTML page
#[derive(Debug, Clone)]
pub struct ExtractedContent {
    /// Page title: `<title>`, else the first `<h1>`, else a URL fallback
    pub title: String,

    /// Visible text with block-level line breaks, before cleaning
    pub text: String,

    /// Crawlable outbound links in document order, normalized and
    /// deduplicated within the page; PDF targets are not included here
    pub links: Vec<String>,

    /// Inline PDF resources referenced by the page
    pub pdf_refs: Vec<PdfRef>,
}

/// A PDF resource referenced from a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfRef {
    /// Normalized absolute URL of the resource
    pub url: String,

    /// True when the reference is only reachable via an explicit download
    /// step (anchor with a `download` attribute)
    pub download_only: bool,
}

/// Parses HTML and extracts title, visible text, links, and PDF references
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The page URL, used for resolving relative links and as
///   the title fallback of last resort
pub fn extract_content(html: &str, base_url: &Url) -> ExtractedContent {
    let document = Html::parse_document(html);

    let title = extract_title(&document).unwrap_or_else(|| title_fallback(base_url));
    let text = extract_visible_text(&document);
    let (links, pdf_refs) = extract_links(&document, base_url);

    ExtractedContent {
        title,
        text,
        links,
        pdf_refs,
    }
}

/// Extracts the page title from `<title>`, falling back to the first `<h1>`
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;
    let h1_selector = Selector::parse("h1").ok()?;

    let from_title = document
        .select(&title_selector)
        .next()
        .map(element_text)
        .filter(|s| !s.is_empty());

    from_title.or_else(|| {
        document
            .select(&h1_selector)
            .next()
            .map(element_text)
            .filter(|s| !s.is_empty())
    })
}

/// Title fallback when neither `<title>` nor `<h1>` exists: the last
/// non-empty URL path segment, or the host for a root URL.
fn title_fallback(url: &Url) -> String {
    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(|s| s.to_string())
        .or_else(|| url.host_str().map(|h| h.to_string()))
        .unwrap_or_else(|| url.to_string())
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Collects visible text from the document body
///
/// The walk skips the subtrees of excluded element types and ARIA roles
/// and inserts a newline after each block-level element, so downstream
/// cleaning sees one fragment per block.
fn extract_visible_text(document: &Html) -> String {
    let body_selector = match Selector::parse("body") {
        Ok(s) => s,
        Err(_) => return String::new(),
    };

    let mut out = String::new();
    if let Some(body) = document.select(&body_selector).next() {
        collect_text(body, &mut out);
    }
    out
}

fn collect_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                out.push_str(&text.text);
            }
            Node::Element(el) => {
                let name = el.name();

                if name == "br" {
                    out.push('\n');
                    continue;
                }

                if EXCLUDED_ELEMENTS.contains(&name) {
                    continue;
                }
                if let Some(role) = el.attr("role") {
                    if EXCLUDED_ROLES.contains(&role) {
                        continue;
                    }
                }

                if let Some(child_ref) = ElementRef::wrap(child) {
                    collect_text(child_ref, out);
                }

                if BLOCK_ELEMENTS.contains(&name) {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

/// Extracts crawlable links and PDF references
///
/// Links come from `<a href>` targets in document order; PDF references
/// additionally come from `embed`/`iframe`/`object` resources. Both are
/// resolved against the page URL, normalized, and deduplicated within the
/// page. A target ending in `.pdf` is never returned as a crawlable link.
fn extract_links(document: &Html, base_url: &Url) -> (Vec<String>, Vec<PdfRef>) {
    let mut links = Vec::new();
    let mut seen_links = std::collections::HashSet::new();
    let mut pdf_refs: Vec<PdfRef> = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            let href = match element.value().attr("href") {
                Some(h) => h,
                None => continue,
            };
            let resolved = match resolve_link(href, base_url) {
                Some(u) => u,
                None => continue,
            };

            let download_only = element.value().attr("download").is_some();

            if is_pdf_url(&resolved) {
                push_pdf(&mut pdf_refs, resolved.into(), download_only);
                continue;
            }

            // Non-PDF download links are files, not pages
            if download_only {
                continue;
            }

            let url_string: String = resolved.into();
            if seen_links.insert(url_string.clone()) {
                links.push(url_string);
            }
        }
    }

    for (selector_str, attr) in [("embed[src]", "src"), ("iframe[src]", "src"), ("object[data]", "data")] {
        if let Ok(selector) = Selector::parse(selector_str) {
            for element in document.select(&selector) {
                let target = match element.value().attr(attr) {
                    Some(t) => t,
                    None => continue,
                };
                if let Some(resolved) = resolve_link(target, base_url) {
                    if is_pdf_url(&resolved) {
                        push_pdf(&mut pdf_refs, resolved.into(), false);
                    }
                }
            }
        }
    }

    (links, pdf_refs)
}

/// Resolves an href to a normalized absolute URL, or None if the link
/// should be dropped (special schemes, bare fragments, malformed input)
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let absolute = base_url.join(href).ok()?;
    normalize_url(absolute.as_str()).ok()
}

fn is_pdf_url(url: &Url) -> bool {
    url.path().to_ascii_lowercase().ends_with(".pdf")
}

fn push_pdf(pdf_refs: &mut Vec<PdfRef>, url: String, download_only: bool) {
    if let Some(existing) = pdf_refs.iter_mut().find(|p| p.url == url) {
        // An inline reference wins over a download-only one
        existing.download_only = existing.download_only && download_only;
    } else {
        pdf_refs.push(PdfRef { url, download_only });
    }
}
