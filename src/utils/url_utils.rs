// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{ParseError, Url};

/// 为形如 `clinic.com/about` 的裸主机名补全 `https://` 前缀
///
/// 其他输入（已带协议、含空白或冒号、没有点号的主机）只去掉首尾空白，
/// 交由URL校验如实报告
pub fn ensure_scheme(raw: &str) -> String {
    let trimmed = raw.trim();
    match Url::parse(trimmed) {
        Err(ParseError::RelativeUrlWithoutBase) if is_bare_host(trimmed) => {
            format!("https://{}", trimmed)
        }
        _ => trimmed.to_string(),
    }
}

fn is_bare_host(candidate: &str) -> bool {
    if candidate.contains(':') || candidate.chars().any(char::is_whitespace) {
        return false;
    }
    let host = candidate
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    host.contains('.') && !host.starts_with('.') && !host.ends_with('.')
}

/// 判断字符串是否为带主机名的 http/https 绝对URL
pub fn is_http_url(raw: &str) -> bool {
    match Url::parse(raw.trim()) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().map(|h| !h.is_empty()).unwrap_or(false)
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_scheme_adds_https() {
        assert_eq!(ensure_scheme("example.com"), "https://example.com");
        assert_eq!(ensure_scheme("  clinic.org/about "), "https://clinic.org/about");
    }

    #[test]
    fn test_ensure_scheme_keeps_existing() {
        assert_eq!(ensure_scheme("http://example.com"), "http://example.com");
        assert_eq!(ensure_scheme("HTTPS://Example.com"), "HTTPS://Example.com");
        assert_eq!(ensure_scheme("ftp://example.com"), "ftp://example.com");
    }

    #[test]
    fn test_ensure_scheme_leaves_non_hosts_alone() {
        assert_eq!(ensure_scheme("nothing"), "nothing");
        assert_eq!(ensure_scheme(" not a url "), "not a url");
        assert_eq!(ensure_scheme("mailto:info@clinic.com"), "mailto:info@clinic.com");
        assert_eq!(ensure_scheme(".example.com"), ".example.com");
        assert_eq!(ensure_scheme(""), "");
    }

    #[test]
    fn test_is_http_url() {
        assert!(is_http_url("https://example.com/path"));
        assert!(is_http_url("http://localhost:8080"));
        assert!(!is_http_url("ftp://example.com"));
        assert!(!is_http_url("not a url"));
        assert!(!is_http_url("mailto:someone@example.com"));
    }
}
