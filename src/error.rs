//! Error types for fetching and parsing news.
//!
//! None of these escape the public boundary of [`crate::query`]; they are
//! logged and collapsed to an empty result there.

use thiserror::Error;

/// Everything that can go wrong between a request URL and a list of records.
#[derive(Error, Debug)]
pub enum QueryError {
    /// The request string is not a well-formed URL
    #[error("Invalid request URL {url:?}: {source}")]
    InvalidUrl {
        /// The string that failed to parse
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Connect, read or client setup failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with something other than 200
    #[error("Unexpected response code: {0}")]
    Status(u16),

    /// The body is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required part of the result path is missing
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// A value on the result path has the wrong JSON type
    #[error("Field {field} is not {expected}")]
    FieldType {
        /// Name of the offending field, or `results[]` for an element
        field: &'static str,
        /// What the field should have been
        expected: &'static str,
    },
}

/// Result type alias for query operations
pub type Result<T> = std::result::Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        assert_eq!(
            QueryError::Status(404).to_string(),
            "Unexpected response code: 404"
        );
    }

    #[test]
    fn test_field_type_display() {
        let e = QueryError::FieldType {
            field: "results",
            expected: "an array",
        };
        assert_eq!(e.to_string(), "Field results is not an array");
    }

    #[test]
    fn test_invalid_url_keeps_source() {
        use std::error::Error as _;
        let source = url::Url::parse("not a url").unwrap_err();
        let e = QueryError::InvalidUrl {
            url: "not a url".to_string(),
            source,
        };
        assert!(e.to_string().contains("not a url"));
        assert!(e.source().is_some());
    }
}
