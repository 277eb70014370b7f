//! Cookie handling for the variant cookie.
//!
//! # Responsibilities
//! - Parse `Cookie` request headers into a name → value map
//! - Look up the stored variant
//! - Render the `Set-Cookie` value that persists a variant
//!
//! # Design Decisions
//! - Malformed pairs are skipped, never rejected
//! - First occurrence of a name wins (browsers send the most specific first)
//! - Values wrapped in double quotes are unquoted

use std::collections::HashMap;

use axum::http::header::{HeaderMap, HeaderValue, COOKIE};

use crate::variant::Variant;

/// Name of the cookie that stores the visitor's variant.
pub const VARIANT_COOKIE: &str = "ab_variant";

/// Variant cookie lifetime: 30 days.
pub const VARIANT_COOKIE_MAX_AGE_SECS: u64 = 30 * 24 * 60 * 60;

/// Cookies sent with a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    values: HashMap<String, String>,
}

impl CookieJar {
    /// Collect cookies from every `Cookie` header on the request.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut jar = Self::default();
        for value in headers.get_all(COOKIE) {
            if let Ok(raw) = value.to_str() {
                jar.extend_from_header(raw);
            }
        }
        jar
    }

    /// Parse a single `Cookie` header value.
    pub fn parse(raw: &str) -> Self {
        let mut jar = Self::default();
        jar.extend_from_header(raw);
        jar
    }

    fn extend_from_header(&mut self, raw: &str) {
        for pair in raw.split(';') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let value = unquote(value.trim());
            self.values
                .entry(name.to_string())
                .or_insert_with(|| value.to_string());
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The visitor's stored variant, if the cookie holds a valid id.
    pub fn variant(&self) -> Option<Variant> {
        self.get(VARIANT_COOKIE)?.parse().ok()
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// `Set-Cookie` value persisting `variant` for 30 days.
pub fn variant_cookie(variant: Variant) -> HeaderValue {
    match variant {
        Variant::A => {
            HeaderValue::from_static("ab_variant=A; Max-Age=2592000; Path=/; SameSite=Strict")
        }
        Variant::B => {
            HeaderValue::from_static("ab_variant=B; Max-Age=2592000; Path=/; SameSite=Strict")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let jar = CookieJar::parse("ab_variant=B; theme=dark");
        assert_eq!(jar.len(), 2);
        assert_eq!(jar.get("ab_variant"), Some("B"));
        assert_eq!(jar.get("theme"), Some("dark"));
        assert_eq!(jar.variant(), Some(Variant::B));
    }

    #[test]
    fn test_parse_tolerates_garbage() {
        let jar = CookieJar::parse(";;  =orphan; noequals; ab_variant = A ;x=1=2;");
        assert_eq!(jar.get("ab_variant"), Some("A"));
        assert_eq!(jar.get("x"), Some("1=2"));
        assert_eq!(jar.get("noequals"), None);
        assert_eq!(jar.len(), 2);
    }

    #[test]
    fn test_first_duplicate_wins() {
        let jar = CookieJar::parse("ab_variant=A; ab_variant=B");
        assert_eq!(jar.variant(), Some(Variant::A));
    }

    #[test]
    fn test_quoted_value() {
        let jar = CookieJar::parse("ab_variant=\"B\"");
        assert_eq!(jar.variant(), Some(Variant::B));
    }

    #[test]
    fn test_invalid_variant_reads_as_absent() {
        assert_eq!(CookieJar::parse("ab_variant=C").variant(), None);
        assert_eq!(CookieJar::parse("ab_variant=b").variant(), None);
        assert_eq!(CookieJar::parse("ab_variant=").variant(), None);
        assert_eq!(CookieJar::parse("").variant(), None);
    }

    #[test]
    fn test_from_multiple_headers() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("session=abc"));
        headers.append(COOKIE, HeaderValue::from_static("ab_variant=B"));
        headers.append(COOKIE, HeaderValue::from_bytes(b"bad=\xff").unwrap());

        let jar = CookieJar::from_headers(&headers);
        assert_eq!(jar.get("session"), Some("abc"));
        assert_eq!(jar.variant(), Some(Variant::B));
        assert_eq!(jar.get("bad"), None);
    }

    #[test]
    fn test_variant_cookie_format() {
        for variant in Variant::ALL {
            let expected = format!(
                "{VARIANT_COOKIE}={variant}; Max-Age={VARIANT_COOKIE_MAX_AGE_SECS}; Path=/; SameSite=Strict"
            );
            assert_eq!(variant_cookie(variant).to_str().unwrap(), expected);
        }
    }
}
