//! URL handling for the crawler
//!
//! This module provides URL normalization and the domain/path-prefix check
//! that bounds the crawl to one site.

mod normalize;

pub use normalize::normalize_url;

use url::Url;

/// Checks whether a URL falls under the configured domain/path prefix
///
/// The prefix is given without a scheme (e.g.
/// `"sites.google.com/view/metropoleballard"`) and matches when the URL's
/// `host + path` starts with it. Only HTTP(S) URLs can be in-domain.
///
/// # Examples
///
/// ```
/// use metropole_crawler::url::is_in_domain;
/// use url::Url;
///
/// let prefix = "sites.google.com/view/metropoleballard";
/// let url = Url::parse("https://sites.google.com/view/metropoleballard/home").unwrap();
/// assert!(is_in_domain(&url, prefix));
///
/// let other = Url::parse("https://example.com/page").unwrap();
/// assert!(!is_in_domain(&other, prefix));
/// ```
pub fn is_in_domain(url: &Url, domain_prefix: &str) -> bool {
    if url.scheme() != "http" && url.scheme() != "https" {
        return false;
    }

    let host = match url.host_str() {
        Some(h) => h,
        None => return false,
    };

    // Prefixes may be written with or without a scheme
    let prefix = domain_prefix
        .strip_prefix("https://")
        .or_else(|| domain_prefix.strip_prefix("http://"))
        .unwrap_or(domain_prefix)
        .trim_end_matches('/');

    let host_and_path = format!("{}{}", host, url.path());
    host_and_path.starts_with(prefix)
}
