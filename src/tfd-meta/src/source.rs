//! Metadata source abstraction
//!
//! The pipeline reads metadata through [`MetadataSource`]; the CLI plugs in
//! an HTTP client, tests plug in [`MockSource`].

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Server returned {status} for {resource}: {body}")]
    Status {
        resource: String,
        status: u16,
        body: String,
    },

    #[error("Request for {resource} failed: {message}")]
    Transport { resource: String, message: String },

    #[error("Invalid JSON in {resource}: {source}")]
    Json {
        resource: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Trait for fetching metadata documents (HTTP endpoint, fixtures, etc.)
pub trait MetadataSource {
    /// Fetch and parse the document at `resource` (e.g. "stat.json")
    fn fetch(&self, resource: &str) -> Result<Value, FetchError>;
}

#[cfg(any(test, feature = "mock"))]
pub use mock::MockSource;

#[cfg(any(test, feature = "mock"))]
mod mock {
    use super::{FetchError, MetadataSource};
    use serde_json::Value;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory source serving canned documents and recording requests
    #[derive(Default)]
    pub struct MockSource {
        pub documents: HashMap<String, Value>,
        pub failures: HashMap<String, (u16, String)>,
        pub requests: RefCell<Vec<String>>,
    }

    impl MockSource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_document(mut self, resource: &str, document: Value) -> Self {
            self.documents.insert(resource.to_string(), document);
            self
        }

        pub fn with_failure(mut self, resource: &str, status: u16, body: &str) -> Self {
            self.failures
                .insert(resource.to_string(), (status, body.to_string()));
            self
        }
    }

    impl MetadataSource for MockSource {
        fn fetch(&self, resource: &str) -> Result<Value, FetchError> {
            self.requests.borrow_mut().push(resource.to_string());

            if let Some((status, body)) = self.failures.get(resource) {
                return Err(FetchError::Status {
                    resource: resource.to_string(),
                    status: *status,
                    body: body.clone(),
                });
            }

            self.documents
                .get(resource)
                .cloned()
                .ok_or_else(|| FetchError::Status {
                    resource: resource.to_string(),
                    status: 404,
                    body: "not found".to_string(),
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mock_serves_documents() {
        let source = MockSource::new().with_document("stat.json", json!([]));
        assert_eq!(source.fetch("stat.json").unwrap(), json!([]));
        assert_eq!(*source.requests.borrow(), vec!["stat.json".to_string()]);
    }

    #[test]
    fn test_mock_failure_carries_body() {
        let source = MockSource::new().with_failure("weapon.json", 403, "bad key");
        let err = source.fetch("weapon.json").unwrap_err();
        match &err {
            FetchError::Status { status, body, .. } => {
                assert_eq!(*status, 403);
                assert_eq!(body, "bad key");
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(err.to_string().contains("bad key"));
    }
}
