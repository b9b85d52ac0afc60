//! Query string parsing.

use std::collections::HashMap;

/// Parse the query string of a URL into a map with URL decoding.
///
/// Accepts either a bare query (`a=1&b=2`) or a full URL. Repeated keys are joined with commas.
pub fn parse_query_string(input: &str) -> HashMap<String, String> {
    let query_str = match input.split_once('?') {
        Some((_, query)) => query,
        None if input.contains('/') => "",
        None => input,
    };
    let query_str = query_str.split('#').next().unwrap_or("");

    let mut result: HashMap<String, String> = HashMap::new();

    for pair in query_str.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode(key);
        let value = decode(value);

        result
            .entry(key)
            .and_modify(|existing| {
                existing.push(',');
                existing.push_str(&value);
            })
            .or_insert(value);
    }

    result
}

fn decode(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    urlencoding::decode(&raw)
        .map(|v| v.into_owned())
        .unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", &[])]
    #[case("listId=1", &[("listId", "1")])]
    #[case("listId=1&completed=true", &[("listId", "1"), ("completed", "true")])]
    #[case("/api/v1/tasks?listId=2", &[("listId", "2")])]
    #[case("http://localhost/api/v1/tasks?completed=false#x", &[("completed", "false")])]
    #[case("/api/v1/tasks", &[])]
    #[case("flag", &[("flag", "")])]
    #[case("a=1&a=2", &[("a", "1,2")])]
    #[case("name=hello%20world", &[("name", "hello world")])]
    #[case("name=hello+world", &[("name", "hello world")])]
    #[case("a=1&&b=2", &[("a", "1"), ("b", "2")])]
    fn test_parse_query_string(#[case] input: &str, #[case] expected: &[(&str, &str)]) {
        let result = parse_query_string(input);
        assert_eq!(result.len(), expected.len());
        for (k, v) in expected {
            assert_eq!(result.get(*k), Some(&(*v).to_owned()));
        }
    }
}
