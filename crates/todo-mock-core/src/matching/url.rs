//! URL pattern matching with `:param` path placeholders.

use regex::Regex;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlMatchResult {
    pub matched: bool,
    pub params: HashMap<String, String>,
}

/// Route pattern could not be compiled.
#[derive(Debug, thiserror::Error)]
#[error("Invalid route pattern '{pattern}': {source}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// Compiled URL pattern such as `/api/v1/lists/:id/tasks`.
#[derive(Clone)]
pub struct UrlPattern {
    raw: String,
    regex: Regex,
    param_names: Vec<String>,
}

impl UrlPattern {
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let raw = normalize_path(pattern);
        let (regex_str, param_names) = pattern_to_regex(&raw);
        let regex = Regex::new(&regex_str).map_err(|source| PatternError {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self {
            raw,
            regex,
            param_names,
        })
    }

    /// Compile one of the crate's own route patterns.
    pub(crate) fn from_static(pattern: &'static str) -> Self {
        Self::new(pattern).expect("built-in route patterns are valid")
    }

    /// Normalized pattern text.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Match a request URL, which may be absolute and may carry a query string.
    pub fn matches(&self, url: &str) -> UrlMatchResult {
        let path = request_path(url);

        let Some(caps) = self.regex.captures(&path) else {
            return UrlMatchResult::default();
        };

        let params = self
            .param_names
            .iter()
            .enumerate()
            .filter_map(|(i, name)| {
                caps.get(i + 1).map(|m| {
                    let value = urlencoding::decode(m.as_str())
                        .map(|v| v.into_owned())
                        .unwrap_or_else(|_| m.as_str().to_owned());
                    (name.clone(), value)
                })
            })
            .collect();

        UrlMatchResult {
            matched: true,
            params,
        }
    }
}

impl fmt::Debug for UrlPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UrlPattern").field(&self.raw).finish()
    }
}

impl PartialEq for UrlPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for UrlPattern {}

/// Path component of a request URL: scheme, host, query and trailing slash removed.
pub fn request_path(url: &str) -> String {
    let without_query = strip_query(url);
    // A scheme separator only counts before the first path slash.
    let without_origin = match without_query.find("://") {
        Some(i) if !without_query[..i].contains('/') => {
            let rest = &without_query[i + 3..];
            rest.find('/').map_or("/", |j| &rest[j..])
        }
        _ => without_query,
    };
    normalize_path(without_origin)
}

fn strip_query(url: &str) -> &str {
    url.split(['?', '#']).next().unwrap_or("")
}

fn normalize_path(url: &str) -> String {
    let trimmed = strip_query(url).trim_end_matches('/');
    if trimmed.is_empty() {
        "/".into()
    } else if trimmed.starts_with('/') {
        trimmed.into()
    } else {
        format!("/{trimmed}")
    }
}

fn pattern_to_regex(pattern: &str) -> (String, Vec<String>) {
    let mut param_names = Vec::new();
    let mut regex_str = String::from("^");

    for (i, segment) in pattern.split('/').enumerate() {
        if i > 0 {
            regex_str.push('/');
        }
        match segment.strip_prefix(':') {
            Some(name) if !name.is_empty() => {
                param_names.push(name.to_owned());
                regex_str.push_str("([^/]+)");
            }
            _ => regex_str.push_str(&regex::escape(segment)),
        }
    }

    regex_str.push_str("/?$");
    (regex_str, param_names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/api/v1/lists", "/api/v1/lists", true, &[])]
    #[case("/api/v1/lists", "/api/v1/lists/", true, &[])]
    #[case("/api/v1/lists/:id", "/api/v1/lists/1", true, &[("id", "1")])]
    #[case("/api/v1/lists/:id/tasks", "/api/v1/lists/7/tasks", true, &[("id", "7")])]
    #[case("/api/v1/tasks/:id", "/api/v1/tasks/abc-123", true, &[("id", "abc-123")])]
    #[case("/api/v1/tasks/:id", "/api/v1/tasks/a%20b", true, &[("id", "a b")])]
    #[case("/a/:x/b/:y", "/a/1/b/2", true, &[("x", "1"), ("y", "2")])]
    #[case("/api/v1/lists", "/api/v1/tasks", false, &[])]
    #[case("/api/v1/lists/:id", "/api/v1/lists", false, &[])]
    #[case("/api/v1/lists/:id", "/api/v1/lists/1/tasks", false, &[])]
    #[case("/", "/", true, &[])]
    #[case("/api/v1/tasks", "/api/v1/tasks?listId=1", true, &[])]
    #[case("/api/v1/tasks", "/api/v1/tasks?ref=http://localhost/x", true, &[])]
    #[case("/api/v1/lists", "http://localhost/api/v1/lists", true, &[])]
    #[case("/api/v1/lists/:id", "https://example.com:8080/api/v1/lists/3?x=1", true, &[("id", "3")])]
    #[case("/api/lists.json", "/api/lists.json", true, &[])]
    #[case("/api/lists.json", "/api/listsXjson", false, &[])]
    fn test_url_matches(
        #[case] pattern: &str,
        #[case] url: &str,
        #[case] expected: bool,
        #[case] params: &[(&str, &str)],
    ) {
        let pattern = UrlPattern::new(pattern).expect("Should compile");
        let result = pattern.matches(url);
        assert_eq!(result.matched, expected);
        assert_eq!(result.params.len(), params.len());
        for (k, v) in params {
            assert_eq!(result.params.get(*k), Some(&(*v).to_owned()));
        }
    }

    #[rstest]
    #[case("http://localhost", "/")]
    #[case("http://localhost/", "/")]
    #[case("api/v1/lists", "/api/v1/lists")]
    #[case("/api/v1/lists/?a=b", "/api/v1/lists")]
    #[case("/api/v1/lists#top", "/api/v1/lists")]
    #[case("/api/v1/tasks?ref=http://localhost/x", "/api/v1/tasks")]
    #[case("/api/v1/tasks#http://localhost/x", "/api/v1/tasks")]
    #[case("http://localhost/api/v1/tasks?next=https://example.com/y", "/api/v1/tasks")]
    #[case("/redirect/http://localhost/x", "/redirect/http://localhost/x")]
    fn test_request_path(#[case] url: &str, #[case] expected: &str) {
        assert_eq!(request_path(url), expected);
    }

    #[rstest]
    fn test_patterns_compare_by_normalized_text() {
        let a = UrlPattern::new("/api/v1/lists/").expect("Should compile");
        let b = UrlPattern::new("/api/v1/lists").expect("Should compile");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "/api/v1/lists");
    }
}
