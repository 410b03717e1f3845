use crate::UrlError;
use url::Url;

/// Normalizes a URL to its canonical form for the visited set
///
/// Equivalent URLs must collapse to one entry so no page is fetched twice,
/// so normalization:
///
/// 1. Parses the URL; malformed input is rejected
/// 2. Accepts only HTTP and HTTPS schemes
/// 3. Removes the fragment (everything after `#`)
/// 4. Removes the trailing slash from the path (except the root `/`)
///
/// Host lowercasing and dot-segment removal come with the parse itself.
/// Query strings are preserved as-is.
///
/// # Examples
///
/// ```
/// use metropole_crawler::url::normalize_url;
///
/// let url = normalize_url("https://example.com/page/#section").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/page");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    url.set_fragment(None);

    let path = url.path();
    if path.len() > 1 && path.ends_with('/') {
        let trimmed = path.trim_end_matches('/').to_string();
        url.set_path(&trimmed);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_fragment() {
        let result = normalize_url("https://example.com/page#section").unwrap();
        assert_eq!(result.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_remove_trailing_slash() {
        let result = normalize_url("https://example.com/page/").unwrap();
        assert_eq!(result.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_keep_root_slash() {
        let result = normalize_url("https://example.com/").unwrap();
        assert_eq!(result.as_str(), "https://example.com/");
    }

    #[test]
    fn test_fragment_and_trailing_slash() {
        let result = normalize_url("https://example.com/page/#top").unwrap();
        assert_eq!(result.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_lowercase_host() {
        let result = normalize_url("https://EXAMPLE.COM/Page").unwrap();
        assert_eq!(result.as_str(), "https://example.com/Page");
    }

    #[test]
    fn test_dot_segments_resolved() {
        let result = normalize_url("https://example.com/a/../b/./c").unwrap();
        assert_eq!(result.as_str(), "https://example.com/b/c");
    }

    #[test]
    fn test_query_preserved() {
        let result = normalize_url("https://example.com/page?tab=docs").unwrap();
        assert_eq!(result.as_str(), "https://example.com/page?tab=docs");
    }

    #[test]
    fn test_invalid_scheme() {
        assert!(normalize_url("ftp://example.com/page").is_err());
        assert!(normalize_url("mailto:user@example.com").is_err());
    }

    #[test]
    fn test_malformed_url() {
        assert!(normalize_url("not a url").is_err());
    }

    #[test]
    fn test_idempotent() {
        let once = normalize_url("https://example.com/page/#section").unwrap();
        let twice = normalize_url(once.as_str()).unwrap();
        assert_eq!(once, twice);
    }
}
