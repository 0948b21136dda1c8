//! Wire types for the documentation search API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultDocument {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    pub documents: Vec<SearchResultDocument>,
}

impl SearchResponse {
    /// Parses a response body. `null`, empty and malformed bodies all yield `None`.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        serde_json::from_slice::<Option<Self>>(body).ok().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_documents_and_ignores_unknown_fields() {
        let body = br#"{"documents":[{"title":"Intro","url":"http://docs/intro","score":3}],"took":4}"#;
        let parsed = SearchResponse::from_body(body).expect("response");
        assert_eq!(
            parsed.documents,
            vec![SearchResultDocument {
                title: "Intro".to_string(),
                url: "http://docs/intro".to_string(),
            }]
        );
    }

    #[test]
    fn null_and_empty_bodies_are_not_usable() {
        assert_eq!(SearchResponse::from_body(b"null"), None);
        assert_eq!(SearchResponse::from_body(b""), None);
        assert_eq!(SearchResponse::from_body(b"  \n"), None);
    }

    #[test]
    fn malformed_body_is_not_usable() {
        assert_eq!(SearchResponse::from_body(b"{\"documents\": 12}"), None);
        assert_eq!(SearchResponse::from_body(b"<html>"), None);
    }
}
