//! Request matching utilities.

mod query;
mod url;

pub use query::parse_query_string;
pub use url::{request_path, PatternError, UrlMatchResult, UrlPattern};
