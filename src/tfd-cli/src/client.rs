//! HTTP client for the static metadata endpoint

use serde_json::Value;
use tfd_meta::{FetchError, Language, MetadataSource};

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-nxopen-api-key";

/// Blocking client; one GET per resource, no retries
pub struct ApiClient {
    agent: ureq::Agent,
    base_url: String,
    language: Language,
    api_key: String,
}

impl ApiClient {
    pub fn new(base_url: &str, language: Language, api_key: &str) -> Self {
        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Self {
            agent: ureq::AgentBuilder::new()
                .user_agent(concat!("tfd/", env!("CARGO_PKG_VERSION")))
                .build(),
            base_url,
            language,
            api_key: api_key.to_string(),
        }
    }

    /// Full URL of a resource: base, language segment, resource path
    pub fn url(&self, resource: &str) -> String {
        format!("{}{}{}", self.base_url, self.language.segment(), resource)
    }
}

impl MetadataSource for ApiClient {
    fn fetch(&self, resource: &str) -> Result<Value, FetchError> {
        let url = self.url(resource);
        tracing::debug!("GET {}", url);

        let response = match self.agent.get(&url).set(API_KEY_HEADER, &self.api_key).call() {
            Ok(resp) => resp,
            Err(ureq::Error::Status(code, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                return Err(FetchError::Status {
                    resource: resource.to_string(),
                    status: code,
                    body,
                });
            }
            Err(e) => {
                return Err(FetchError::Transport {
                    resource: resource.to_string(),
                    message: e.to_string(),
                });
            }
        };

        // Only 200 carries a document; other 2xx/3xx are still failures
        let status = response.status();
        if status != 200 {
            return Err(FetchError::Status {
                resource: resource.to_string(),
                status,
                body: response.into_string().unwrap_or_default(),
            });
        }

        let body = response
            .into_string()
            .map_err(|e| FetchError::Transport {
                resource: resource.to_string(),
                message: e.to_string(),
            })?;

        serde_json::from_str(&body).map_err(|source| FetchError::Json {
            resource: resource.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};
    use tfd_meta::{Resource, DEFAULT_BASE_URL};

    #[test]
    fn test_url_includes_language_segment() {
        let client = ApiClient::new(DEFAULT_BASE_URL, Language::English, "key");
        assert_eq!(
            client.url(Resource::Stat.path()),
            "https://open.api.nexon.com/static/tfd/meta/en/stat.json"
        );
    }

    #[test]
    fn test_url_normalizes_base() {
        let client = ApiClient::new("http://localhost:8080/meta", Language::ChineseTraditional, "key");
        assert_eq!(
            client.url("weapon.json"),
            "http://localhost:8080/meta/zh-TW/weapon.json"
        );
    }

    /// Serve one canned HTTP response on a local port; the handle yields
    /// the raw request text
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}/", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });

        (base_url, handle)
    }

    #[test]
    fn test_fetch_sends_key_and_parses_document() {
        let (base_url, server) = serve_once("200 OK", r#"[{"stat_id":"1"}]"#);
        let client = ApiClient::new(&base_url, Language::Korean, "secret-key");

        let document = client.fetch("stat.json").unwrap();
        let request = server.join().unwrap();

        assert_eq!(document[0]["stat_id"], "1");
        assert!(request.starts_with("GET /ko/stat.json "));
        assert!(request
            .to_ascii_lowercase()
            .contains("x-nxopen-api-key: secret-key"));
    }

    #[test]
    fn test_error_status_carries_body() {
        let (base_url, server) = serve_once("403 Forbidden", "bad key");
        let client = ApiClient::new(&base_url, Language::English, "key");

        let err = client.fetch("weapon.json").unwrap_err();
        server.join().unwrap();

        match &err {
            FetchError::Status {
                resource,
                status,
                body,
            } => {
                assert_eq!(resource, "weapon.json");
                assert_eq!(*status, 403);
                assert_eq!(body, "bad key");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_non_200_success_is_rejected() {
        let (base_url, server) = serve_once("202 Accepted", "[]");
        let client = ApiClient::new(&base_url, Language::English, "key");

        let err = client.fetch("stat.json").unwrap_err();
        server.join().unwrap();

        assert!(matches!(
            err,
            FetchError::Status { status: 202, ref body, .. } if body == "[]"
        ));
    }

    #[test]
    fn test_invalid_json_is_json_error() {
        let (base_url, server) = serve_once("200 OK", "<html>");
        let client = ApiClient::new(&base_url, Language::English, "key");

        let err = client.fetch("stat.json").unwrap_err();
        server.join().unwrap();

        assert!(matches!(err, FetchError::Json { .. }));
    }

    #[test]
    fn test_unreachable_host_is_transport_error() {
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = ApiClient::new(&format!("http://127.0.0.1:{}/", port), Language::English, "key");

        let err = client.fetch("stat.json").unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }
}
