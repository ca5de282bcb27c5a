//! URL fingerprinting for deduplication.
//!
//! Two URLs that differ only in scheme, host case, the scheme's own default
//! port, a single trailing slash, fragment, or tracking parameters share a
//! fingerprint. Paths and userinfo are compared verbatim.

use crate::utils::url::parse_web_url;

/// Query parameters that only carry attribution state.
const TRACKING_PARAMS: &[&str] = &[
    "gclid", "gclsrc", "dclid", "fbclid", "msclkid", "yclid", "igshid", "mc_cid", "mc_eid", "_ga",
    "_gl",
];

fn is_tracking_param(pair: &str) -> bool {
    let key = pair.split('=').next().unwrap_or_default().to_ascii_lowercase();
    key.starts_with("utm_") || TRACKING_PARAMS.contains(&key.as_str())
}

/// Compute the canonical identity key of a URL.
///
/// Total: anything that does not parse as an absolute web URL maps to the
/// trimmed input string.
pub fn fingerprint(url: &str) -> String {
    let raw = url.trim();
    let Some(parsed) = parse_web_url(raw) else {
        return raw.to_string();
    };
    let Some(host) = parsed.host_str() else {
        return raw.to_string();
    };

    // Scheme is folded: http and https name the same resource here.
    let mut key = String::with_capacity(raw.len());
    key.push_str("https://");
    if !parsed.username().is_empty() || parsed.password().is_some() {
        key.push_str(parsed.username());
        if let Some(password) = parsed.password() {
            key.push(':');
            key.push_str(password);
        }
        key.push('@');
    }
    key.push_str(&host.to_ascii_lowercase());

    // `Url::port` is already `None` for the scheme's own default port.
    if let Some(port) = parsed.port() {
        key.push(':');
        key.push_str(&port.to_string());
    }

    let path = parsed.path();
    key.push_str(path.strip_suffix('/').unwrap_or(path));

    if let Some(query) = parsed.query() {
        let kept: Vec<&str> = query
            .split('&')
            .filter(|pair| !pair.is_empty() && !is_tracking_param(pair))
            .collect();
        if !kept.is_empty() {
            key.push('?');
            key.push_str(&kept.join("&"));
        }
    }

    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_collapses() {
        assert_eq!(
            fingerprint("https://github.com/a/b"),
            fingerprint("https://github.com/a/b/")
        );
    }

    #[test]
    fn test_scheme_host_case_and_default_port() {
        let expected = "https://docs.nvidia.com/cuda";
        assert_eq!(fingerprint("HTTPS://Docs.NVIDIA.com/cuda/"), expected);
        assert_eq!(fingerprint("http://docs.nvidia.com:80/cuda"), expected);
        assert_eq!(fingerprint("https://docs.nvidia.com:443/cuda"), expected);
    }

    #[test]
    fn test_non_default_port_kept() {
        assert_eq!(
            fingerprint("https://example.com:8443/a"),
            "https://example.com:8443/a"
        );
    }

    #[test]
    fn test_other_schemes_default_port_kept() {
        assert_eq!(fingerprint("https://example.com:80/a"), "https://example.com:80/a");
        assert_ne!(fingerprint("https://example.com:80/a"), fingerprint("https://example.com/a"));
        assert_ne!(fingerprint("http://example.com:443/a"), fingerprint("http://example.com/a"));
    }

    #[test]
    fn test_userinfo_kept() {
        assert_eq!(
            fingerprint("https://user:pw@example.com/a"),
            "https://user:pw@example.com/a"
        );
        assert_ne!(
            fingerprint("https://user@example.com/a"),
            fingerprint("https://example.com/a")
        );
    }

    #[test]
    fn test_fragment_and_tracking_params_dropped() {
        assert_eq!(
            fingerprint("https://example.com/guide?utm_source=x&page=2&UTM_Medium=y&lang=en#intro"),
            "https://example.com/guide?page=2&lang=en"
        );
        assert_eq!(
            fingerprint("https://example.com/guide?fbclid=abc"),
            "https://example.com/guide"
        );
    }

    #[test]
    fn test_query_order_preserved() {
        assert_ne!(
            fingerprint("https://example.com/?b=2&a=1"),
            fingerprint("https://example.com/?a=1&b=2")
        );
    }

    #[test]
    fn test_root_path_forms_match() {
        assert_eq!(fingerprint("https://example.com"), fingerprint("https://example.com/"));
        assert_eq!(fingerprint("https://example.com/"), "https://example.com");
    }

    #[test]
    fn test_different_paths_never_equal() {
        assert_ne!(
            fingerprint("https://github.com/a/b"),
            fingerprint("https://github.com/a/c")
        );
        assert_ne!(
            fingerprint("https://example.com/Docs"),
            fingerprint("https://example.com/docs")
        );
    }

    #[test]
    fn test_malformed_falls_back_to_trimmed_raw() {
        assert_eq!(fingerprint("  not a url  "), "not a url");
        assert_eq!(fingerprint("mailto:a@b.c"), "mailto:a@b.c");
        assert_eq!(fingerprint(""), "");
    }
}
