use super::error::IngestError;
use async_trait::async_trait;
use std::borrow::Cow;
use std::time::Duration;

/// Total request timeout in seconds.
const FETCH_TIMEOUT_SECS: u64 = 10;

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 5;

/// User agent string for feed fetching.
const USER_AGENT: &str = "feednest/0.1 (feed reader)";

/// A successfully fetched document. Only 200 responses make it this far.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    /// Lowercased Content-Type header value, empty when the server sent none.
    pub content_type: String,
    pub body: Vec<u8>,
}

impl FetchedDocument {
    pub fn is_html(&self) -> bool {
        self.content_type.contains("text/html")
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Retrieves a document over HTTP.
///
/// The trait seam lets the resolver and reconciler be exercised without a
/// network (fake fetchers in tests); [`HttpFetcher`] is the production
/// implementation.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedDocument, IngestError>;
}

/// reqwest-backed fetcher with a bounded timeout and redirect count.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedDocument, IngestError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|_| IngestError::FetchFailed)?;

        // Anything other than exactly 200 is treated as a failed fetch.
        if response.status() != reqwest::StatusCode::OK {
            return Err(IngestError::FetchFailed);
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_lowercase();

        let body = response
            .bytes()
            .await
            .map_err(|_| IngestError::FetchFailed)?
            .to_vec();

        Ok(FetchedDocument { content_type, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetches_body_and_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(b"<rss/>".to_vec(), "application/rss+xml"),
            )
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let doc = fetcher.fetch(&format!("{}/feed", server.uri())).await.unwrap();

        assert_eq!(doc.content_type, "application/rss+xml");
        assert_eq!(doc.body, b"<rss/>");
        assert!(!doc.is_html());
    }

    #[tokio::test]
    async fn non_200_status_is_a_fetch_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let result = fetcher.fetch(&format!("{}/missing", server.uri())).await;

        assert!(matches!(result, Err(IngestError::FetchFailed)));
    }

    #[tokio::test]
    async fn connection_error_is_a_fetch_failure() {
        // Start and immediately drop a server so the port refuses connections.
        let uri = {
            let server = MockServer::start().await;
            server.uri()
        };

        let fetcher = HttpFetcher::new().unwrap();
        let result = fetcher.fetch(&format!("{}/feed", uri)).await;

        assert!(matches!(result, Err(IngestError::FetchFailed)));
    }

    #[tokio::test]
    async fn missing_content_type_yields_empty_string() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(b"data".to_vec(), ""))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let doc = fetcher.fetch(&format!("{}/x", server.uri())).await.unwrap();

        assert_eq!(doc.content_type, "");
    }
}
