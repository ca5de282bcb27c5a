// src/utils/url.rs

//! URL manipulation utilities.

use url::Url;

/// Parse an absolute `http`/`https` URL with a host.
///
/// Returns `None` for anything else, including relative references and
/// opaque schemes such as `mailto:`.
pub fn parse_web_url(raw: &str) -> Option<Url> {
    let parsed = Url::parse(raw.trim()).ok()?;
    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some() => Some(parsed),
        _ => None,
    }
}

/// Extract the lower-cased host from a URL.
///
/// # Examples
/// ```
/// use harvester::utils::url::get_domain;
///
/// assert_eq!(
///     get_domain("https://Docs.NVIDIA.com/cuda/"),
///     Some("docs.nvidia.com".to_string())
/// );
/// ```
pub fn get_domain(url: &str) -> Option<String> {
    parse_web_url(url).and_then(|u| u.host_str().map(|h| h.to_lowercase()))
}

/// Match a host against a configured host pattern.
///
/// - `.edu` matches any host ending in `.edu`
/// - `docs.` matches any host starting with `docs.`
/// - `nvidia.com` matches `nvidia.com` and every subdomain of it
pub fn host_matches(host: &str, pattern: &str) -> bool {
    let pattern = pattern.trim().to_lowercase();
    if pattern.is_empty() || pattern == "." {
        return false;
    }
    if pattern.starts_with('.') {
        return host.ends_with(&pattern);
    }
    if pattern.ends_with('.') {
        return host.starts_with(&pattern);
    }
    host == pattern || host.ends_with(&format!(".{pattern}"))
}

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Look up the first value of a query parameter.
pub fn query_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}
