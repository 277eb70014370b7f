//! Homepage matching logic.
//!
//! # Responsibilities
//! - Exact mode: path equals one of the configured homepage paths
//! - Exclude mode: API routes, build assets and images are filtered out
//!   before the homepage path check, which still applies
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - Extension matching is case-insensitive
//! - Query strings never take part in matching

use std::collections::HashSet;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;

use crate::config::{MatchMode, MatcherConfig};

/// Trait for deciding whether a request targets the homepage.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the request path is subject to the experiment.
    fn matches_path(&self, path: &str) -> bool;

    /// Returns true if the request is subject to the experiment.
    fn matches(&self, req: &Request<Body>) -> bool {
        self.matches_path(req.uri().path())
    }
}

/// Matches a fixed set of paths exactly.
#[derive(Debug, Clone)]
pub struct ExactPathMatcher {
    paths: HashSet<String>,
}

impl ExactPathMatcher {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

impl Matcher for ExactPathMatcher {
    fn matches_path(&self, path: &str) -> bool {
        self.paths.contains(path)
    }
}

/// Matches every path except excluded prefixes and file extensions.
///
/// On its own this only says whether a request is eligible; combine it with
/// an [`ExactPathMatcher`] through [`FilteredMatcher`] to gate the homepage.
#[derive(Debug, Clone)]
pub struct ExcludeMatcher {
    prefixes: Vec<String>,
    /// Lowercased, without the leading dot.
    extensions: HashSet<String>,
}

impl ExcludeMatcher {
    pub fn new(prefixes: Vec<String>, extensions: Vec<String>) -> Self {
        Self {
            prefixes,
            extensions: extensions
                .into_iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    fn has_excluded_extension(&self, path: &str) -> bool {
        let file = path.rsplit('/').next().unwrap_or(path);
        match file.rsplit_once('.') {
            Some((_, ext)) => self.extensions.contains(&ext.to_ascii_lowercase()),
            None => false,
        }
    }
}

impl Matcher for ExcludeMatcher {
    fn matches_path(&self, path: &str) -> bool {
        if path == "/favicon.ico" {
            return false;
        }
        if self.prefixes.iter().any(|p| path.starts_with(p.as_str())) {
            return false;
        }
        !self.has_excluded_extension(path)
    }
}

/// Homepage paths behind an exclusion pre-filter.
#[derive(Debug, Clone)]
pub struct FilteredMatcher {
    filter: ExcludeMatcher,
    homepage: ExactPathMatcher,
}

impl FilteredMatcher {
    pub fn new(filter: ExcludeMatcher, homepage: ExactPathMatcher) -> Self {
        Self { filter, homepage }
    }
}

impl Matcher for FilteredMatcher {
    fn matches_path(&self, path: &str) -> bool {
        self.filter.matches_path(path) && self.homepage.matches_path(path)
    }
}

/// Compile the configured matcher.
pub fn build_matcher(config: &MatcherConfig) -> Arc<dyn Matcher> {
    let homepage = ExactPathMatcher::new(config.paths.iter().cloned());
    match config.mode {
        MatchMode::Exact => Arc::new(homepage),
        MatchMode::Exclude => Arc::new(FilteredMatcher::new(
            ExcludeMatcher::new(
                config.exclude_prefixes.clone(),
                config.exclude_extensions.clone(),
            ),
            homepage,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_matcher() {
        let matcher = build_matcher(&MatcherConfig::default());

        assert!(matcher.matches_path("/"));
        assert!(matcher.matches_path("/index.html"));
        assert!(!matcher.matches_path("/about"));
        assert!(!matcher.matches_path("/index-variant-b.html"));
        assert!(!matcher.matches_path("/INDEX.HTML"));
    }

    #[test]
    fn test_exact_matcher_ignores_query() {
        let matcher = ExactPathMatcher::new(["/"]);

        let req = Request::builder()
            .uri("http://example.com/?variant=B")
            .body(Body::default())
            .unwrap();
        assert!(matcher.matches(&req));

        let req = Request::builder()
            .uri("http://example.com/pricing?variant=B")
            .body(Body::default())
            .unwrap();
        assert!(!matcher.matches(&req));
    }

    #[test]
    fn test_exclude_matcher() {
        let config = MatcherConfig::default();
        let matcher = ExcludeMatcher::new(config.exclude_prefixes, config.exclude_extensions);

        assert!(matcher.matches_path("/"));
        assert!(matcher.matches_path("/pricing"));
        assert!(matcher.matches_path("/index.html"));

        assert!(!matcher.matches_path("/api/variant"));
        assert!(!matcher.matches_path("/_next/static/chunks/main.js"));
        assert!(!matcher.matches_path("/_next/image"));
        assert!(!matcher.matches_path("/favicon.ico"));
        assert!(!matcher.matches_path("/img/hero.PNG"));
        assert!(!matcher.matches_path("/logo.svg"));
    }

    #[test]
    fn test_exclude_mode_still_requires_homepage_path() {
        let config = MatcherConfig {
            mode: MatchMode::Exclude,
            ..MatcherConfig::default()
        };
        let matcher = build_matcher(&config);

        assert!(matcher.matches_path("/"));
        assert!(matcher.matches_path("/index.html"));
        assert!(!matcher.matches_path("/about"));
        assert!(!matcher.matches_path("/pricing"));
        assert!(!matcher.matches_path("/api/variant"));
    }

    #[test]
    fn test_exclusion_wins_over_homepage_path() {
        let config = MatcherConfig {
            mode: MatchMode::Exclude,
            paths: vec!["/".into(), "/api/home".into(), "/home.png".into()],
            ..MatcherConfig::default()
        };
        let matcher = build_matcher(&config);

        assert!(matcher.matches_path("/"));
        assert!(!matcher.matches_path("/api/home"));
        assert!(!matcher.matches_path("/home.png"));
    }

    #[test]
    fn test_extension_only_checks_last_segment() {
        let matcher = ExcludeMatcher::new(vec![], vec![".png".into()]);

        assert!(matcher.matches_path("/v1.png/details"));
        assert!(!matcher.matches_path("/v1/details.png"));
        assert!(matcher.matches_path("/png"));
    }
}
