//! HTTP methods and the built-in backend endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// HTTP method for route matching
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown HTTP method name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown HTTP method: {0}")]
pub struct UnknownMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            "HEAD" => Ok(HttpMethod::Head),
            "OPTIONS" => Ok(HttpMethod::Options),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

/// Endpoints of the list/task backend reproduced by the simulator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Endpoint {
    GetLists,
    CreateList,
    DeleteList,
    GetListTasks,
    CreateTask,
    GetTasks,
    UpdateTask,
    DeleteTask,
}

impl Endpoint {
    /// Every endpoint, in default registration order.
    pub const ALL: [Endpoint; 8] = [
        Endpoint::GetLists,
        Endpoint::CreateList,
        Endpoint::DeleteList,
        Endpoint::GetListTasks,
        Endpoint::CreateTask,
        Endpoint::GetTasks,
        Endpoint::UpdateTask,
        Endpoint::DeleteTask,
    ];

    pub fn method(self) -> HttpMethod {
        match self {
            Endpoint::GetLists | Endpoint::GetListTasks | Endpoint::GetTasks => HttpMethod::Get,
            Endpoint::CreateList | Endpoint::CreateTask => HttpMethod::Post,
            Endpoint::UpdateTask => HttpMethod::Patch,
            Endpoint::DeleteList | Endpoint::DeleteTask => HttpMethod::Delete,
        }
    }

    /// URL pattern with `:param` placeholders.
    pub fn pattern(self) -> &'static str {
        match self {
            Endpoint::GetLists | Endpoint::CreateList => "/api/v1/lists",
            Endpoint::DeleteList => "/api/v1/lists/:id",
            Endpoint::GetListTasks | Endpoint::CreateTask => "/api/v1/lists/:id/tasks",
            Endpoint::GetTasks => "/api/v1/tasks",
            Endpoint::UpdateTask | Endpoint::DeleteTask => "/api/v1/tasks/:id",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("GET", HttpMethod::Get)]
    #[case("post", HttpMethod::Post)]
    #[case("Patch", HttpMethod::Patch)]
    #[case("DELETE", HttpMethod::Delete)]
    fn test_http_method_from_str(#[case] input: &str, #[case] expected: HttpMethod) {
        assert_eq!(input.parse::<HttpMethod>(), Ok(expected));
    }

    #[rstest]
    fn test_http_method_from_str_unknown() {
        let err = "FETCH".parse::<HttpMethod>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown HTTP method: FETCH");
    }

    #[rstest]
    #[case(Endpoint::CreateList, HttpMethod::Post, "/api/v1/lists")]
    #[case(Endpoint::DeleteList, HttpMethod::Delete, "/api/v1/lists/:id")]
    #[case(Endpoint::CreateTask, HttpMethod::Post, "/api/v1/lists/:id/tasks")]
    #[case(Endpoint::UpdateTask, HttpMethod::Patch, "/api/v1/tasks/:id")]
    #[case(Endpoint::DeleteTask, HttpMethod::Delete, "/api/v1/tasks/:id")]
    fn test_endpoint_surface(
        #[case] endpoint: Endpoint,
        #[case] method: HttpMethod,
        #[case] pattern: &str,
    ) {
        assert_eq!(endpoint.method(), method);
        assert_eq!(endpoint.pattern(), pattern);
    }

    #[rstest]
    fn test_endpoint_keys_are_unique() {
        let keys: std::collections::HashSet<_> = Endpoint::ALL
            .iter()
            .map(|e| (e.method(), e.pattern()))
            .collect();
        assert_eq!(keys.len(), Endpoint::ALL.len());
    }
}
