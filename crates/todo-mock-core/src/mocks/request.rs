//! Simulated HTTP requests and responses.

use crate::matching::parse_query_string;
use crate::types::route::HttpMethod;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Request captured by the interceptor.
#[derive(Debug, Clone, PartialEq)]
pub struct MockRequest {
    pub method: HttpMethod,
    /// Request URL, absolute or relative, possibly with a query string
    pub url: String,
    /// JSON request body
    pub body: Option<Value>,
    /// Path parameters, filled in when a handler matches
    pub params: HashMap<String, String>,
    /// Query parameters (parsed from `url` if `None`)
    pub query: Option<HashMap<String, String>>,
}

impl MockRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method,
            url: url.into(),
            body,
            params: HashMap::new(),
            query: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url, None)
    }

    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Post, url, Some(body))
    }

    pub fn patch(url: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Patch, url, Some(body))
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, url, None)
    }

    /// Path parameter by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Path parameter parsed as an entity id.
    pub fn id_param(&self, name: &str) -> Option<u64> {
        self.param(name)?.parse().ok()
    }

    /// Query parameters, parsing the URL when they were not supplied separately.
    pub fn query_params(&self) -> HashMap<String, String> {
        match &self.query {
            Some(query) => query.clone(),
            None => parse_query_string(&self.url),
        }
    }

    /// Body field exactly as sent; a missing or `null` field yields `None`.
    pub fn field(&self, name: &str) -> Option<Value> {
        match self.body.as_ref()?.get(name)? {
            Value::Null => None,
            value => Some(value.clone()),
        }
    }

    /// Body field as a boolean; anything but a JSON boolean yields `None`.
    pub fn bool_field(&self, field: &str) -> Option<bool> {
        self.body.as_ref()?.get(field)?.as_bool()
    }
}

/// Response produced by a handler.
#[derive(Debug, Clone, PartialEq)]
pub struct MockResponse {
    pub status: u16,
    /// JSON body; `None` for an empty body
    pub body: Option<Value>,
}

impl MockResponse {
    /// Empty body with the given status.
    pub fn status(status: u16) -> Self {
        Self { status, body: None }
    }

    /// `204 No Content`.
    pub fn no_content() -> Self {
        Self::status(204)
    }

    /// JSON body with the given status.
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    /// `200 OK` with `payload` serialized as the body.
    pub fn ok<T: Serialize>(payload: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::json(200, serde_json::to_value(payload)?))
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Deserialize the body; an empty body reads as JSON `null`.
    pub fn body_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.body.clone().unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!({"text": "milk"}), Some(json!("milk")))]
    #[case(json!({"text": 42}), Some(json!(42)))]
    #[case(json!({"text": true}), Some(json!(true)))]
    #[case(json!({"text": ["a", 1]}), Some(json!(["a", 1])))]
    #[case(json!({"text": null}), None)]
    #[case(json!({}), None)]
    #[case(json!("not an object"), None)]
    fn test_field(#[case] body: Value, #[case] expected: Option<Value>) {
        let request = MockRequest::post("/api/v1/lists/1/tasks", body);
        assert_eq!(request.field("text"), expected);
    }

    #[rstest]
    #[case(json!({"completed": true}), Some(true))]
    #[case(json!({"completed": false}), Some(false))]
    #[case(json!({"completed": "yes"}), None)]
    #[case(json!({}), None)]
    fn test_bool_field(#[case] body: Value, #[case] expected: Option<bool>) {
        let request = MockRequest::patch("/api/v1/tasks/0", body);
        assert_eq!(request.bool_field("completed"), expected);
    }

    #[rstest]
    fn test_field_without_body() {
        assert_eq!(MockRequest::delete("/api/v1/tasks/0").field("text"), None);
    }

    #[rstest]
    #[case("3", Some(3))]
    #[case("abc", None)]
    #[case("-1", None)]
    fn test_id_param(#[case] raw: &str, #[case] expected: Option<u64>) {
        let mut request = MockRequest::delete("/api/v1/lists/x");
        request.params.insert("id".to_string(), raw.to_string());
        assert_eq!(request.id_param("id"), expected);
    }

    #[rstest]
    fn test_query_params_prefers_explicit_map() {
        let mut request = MockRequest::get("/api/v1/tasks?listId=1");
        assert_eq!(request.query_params().get("listId").map(String::as_str), Some("1"));

        request.query = Some(HashMap::from([("listId".to_string(), "2".to_string())]));
        assert_eq!(request.query_params().get("listId").map(String::as_str), Some("2"));
    }

    #[rstest]
    #[case(200, true)]
    #[case(204, true)]
    #[case(404, false)]
    #[case(500, false)]
    fn test_response_is_success(#[case] status: u16, #[case] expected: bool) {
        assert_eq!(MockResponse::status(status).is_success(), expected);
    }

    #[rstest]
    fn test_empty_body_reads_as_null() {
        let body: Option<u64> = MockResponse::no_content()
            .body_as()
            .expect("Should deserialize");
        assert_eq!(body, None);
    }
}
