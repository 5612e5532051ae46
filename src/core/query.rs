// src/core/query.rs
//! Query-string assembly for list endpoints.
//!
//! Only "truthy" values make it into the query: absent options, empty
//! strings and a numeric zero are all dropped.

use url::form_urlencoded;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn number(mut self, key: &'static str, value: Option<u32>) -> Self {
        if let Some(value) = value.filter(|v| *v != 0) {
            self.pairs.push((key, value.to_string()));
        }
        self
    }

    pub fn text(mut self, key: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.pairs.push((key, value.to_string()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// `path` unchanged when empty, `path?query` otherwise.
    pub fn append_to(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, self.encode())
        }
    }
}

/// Parameter sets that map onto an allow-listed query.
pub trait ToQuery {
    fn to_query(&self) -> Query;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falsy_values_are_dropped() {
        let query = Query::new()
            .number("limit", Some(0))
            .number("skip", None)
            .text("status", Some(""))
            .text("keyword", None);
        assert!(query.is_empty());
        assert_eq!(query.append_to("/v1/orgs"), "/v1/orgs");
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let query = Query::new()
            .text("status", Some("open"))
            .number("limit", Some(50));
        assert_eq!(query.append_to("/v1/posts"), "/v1/posts?status=open&limit=50");
    }

    #[test]
    fn test_values_are_form_encoded() {
        let query = Query::new().text("query", Some("rust & go"));
        assert_eq!(query.encode(), "query=rust+%26+go");
    }
}
