use super::discover::find_feeds_in_html;
use super::error::IngestError;
use super::fetcher::DocumentFetcher;
use super::parser::parse_feed_summary;
use super::store::FeedStore;
use crate::domain::feed::{Feed, FeedOption};
use std::sync::Arc;
use url::Url;

/// Outcome of resolving a user-supplied URL to a feed.
#[derive(Debug)]
pub enum Resolution {
    /// A feed is already stored under this exact URL string.
    Existing(Feed),
    /// The URL resolved to a parseable feed document; the caller persists it.
    Resolved(ResolvedFeed),
    /// The URL resolved to an HTML page advertising two or more feed links;
    /// the caller must re-invoke with one chosen URL.
    Ambiguous(Vec<FeedOption>),
}

/// Summary of a feed document ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFeed {
    pub title: String,
    pub icon_url: Option<String>,
    pub url: String,
}

/// Drives fetcher, discoverer and parser to resolve a subscription target.
///
/// Every failure path is terminal for the call: the resolver never retries,
/// it returns a typed [`IngestError`] and leaves retry policy to the caller.
pub struct FeedResolver {
    fetcher: Arc<dyn DocumentFetcher>,
    feeds: Arc<dyn FeedStore>,
}

impl FeedResolver {
    pub fn new(fetcher: Arc<dyn DocumentFetcher>, feeds: Arc<dyn FeedStore>) -> Self {
        Self { fetcher, feeds }
    }

    pub async fn resolve(&self, user_url: &str) -> Result<Resolution, IngestError> {
        validate_url(user_url)?;

        // Lookup is by the exact URL string; no fetch when the feed is known.
        if let Some(feed) = self.feeds.find_by_url(user_url).await? {
            return Ok(Resolution::Existing(feed));
        }

        let document = self.fetcher.fetch(user_url).await?;

        if document.is_html() {
            let options = find_feeds_in_html(user_url, &document.text());
            match options.len() {
                0 => Err(IngestError::NoFeedsFound),
                1 => self.resolve_candidate(&options[0]).await,
                _ => Ok(Resolution::Ambiguous(options)),
            }
        } else {
            let parsed = parse_feed_summary(&document.body)?;
            Ok(Resolution::Resolved(ResolvedFeed {
                title: parsed.title,
                icon_url: parsed.icon_url,
                url: user_url.to_string(),
            }))
        }
    }

    /// One level of recursion for the single-option HTML case: the candidate
    /// URL is fetched and parsed as a feed, never scanned as HTML again.
    async fn resolve_candidate(&self, option: &FeedOption) -> Result<Resolution, IngestError> {
        if let Some(feed) = self.feeds.find_by_url(&option.url).await? {
            return Ok(Resolution::Existing(feed));
        }

        let document = self.fetcher.fetch(&option.url).await?;
        let parsed = parse_feed_summary(&document.body)?;

        Ok(Resolution::Resolved(ResolvedFeed {
            title: parsed.title,
            icon_url: parsed.icon_url,
            url: option.url.clone(),
        }))
    }
}

fn validate_url(url: &str) -> Result<(), IngestError> {
    let parsed = Url::parse(url).map_err(|_| IngestError::InvalidUrl)?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(IngestError::InvalidUrl),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ingest::fetcher::FetchedDocument;
    use crate::error::AppResult;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    const RSS_DOC: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
  <title>Example Blog</title>
  <item><guid>1</guid><title>Post</title><link>https://example.com/1</link></item>
</channel></rss>"#;

    /// Serves canned responses by URL and counts every fetch.
    struct FakeFetcher {
        responses: HashMap<String, FetchedDocument>,
        calls: AtomicUsize,
    }

    impl FakeFetcher {
        fn new() -> Self {
            Self {
                responses: HashMap::new(),
                calls: AtomicUsize::new(0),
            }
        }

        fn with(mut self, url: &str, content_type: &str, body: &str) -> Self {
            self.responses.insert(
                url.to_string(),
                FetchedDocument {
                    content_type: content_type.to_string(),
                    body: body.as_bytes().to_vec(),
                },
            );
            self
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DocumentFetcher for FakeFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedDocument, IngestError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .get(url)
                .cloned()
                .ok_or(IngestError::FetchFailed)
        }
    }

    #[derive(Default)]
    struct FakeFeedStore {
        feeds: Mutex<Vec<Feed>>,
    }

    impl FakeFeedStore {
        fn with_feed(self, url: &str) -> Self {
            let now = Utc::now();
            self.feeds.lock().unwrap().push(Feed {
                id: 1,
                title: "Stored Feed".to_string(),
                icon_url: None,
                url: url.to_string(),
                created_at: now,
                updated_at: now,
            });
            self
        }
    }

    #[async_trait]
    impl FeedStore for FakeFeedStore {
        async fn find_by_url(&self, url: &str) -> AppResult<Option<Feed>> {
            Ok(self
                .feeds
                .lock()
                .unwrap()
                .iter()
                .find(|feed| feed.url == url)
                .cloned())
        }
    }

    fn make_resolver(fetcher: FakeFetcher, feeds: FakeFeedStore) -> (FeedResolver, Arc<FakeFetcher>) {
        let fetcher = Arc::new(fetcher);
        let resolver = FeedResolver::new(fetcher.clone(), Arc::new(feeds));
        (resolver, fetcher)
    }

    #[tokio::test]
    async fn malformed_url_is_rejected_without_a_fetch() {
        let (resolver, fetcher) = make_resolver(FakeFetcher::new(), FakeFeedStore::default());

        let result = resolver.resolve("not a url").await;

        assert!(matches!(result, Err(IngestError::InvalidUrl)));
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn non_http_scheme_is_rejected_without_a_fetch() {
        let (resolver, fetcher) = make_resolver(FakeFetcher::new(), FakeFeedStore::default());

        let result = resolver.resolve("ftp://example.com/feed.xml").await;

        assert!(matches!(result, Err(IngestError::InvalidUrl)));
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn known_url_short_circuits_without_a_fetch() {
        let store = FakeFeedStore::default().with_feed("https://example.com/feed.xml");
        let (resolver, fetcher) = make_resolver(FakeFetcher::new(), store);

        let result = resolver.resolve("https://example.com/feed.xml").await.unwrap();

        assert!(matches!(result, Resolution::Existing(feed) if feed.url == "https://example.com/feed.xml"));
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn direct_feed_document_resolves() {
        let fetcher = FakeFetcher::new().with(
            "https://example.com/feed.xml",
            "application/rss+xml",
            RSS_DOC,
        );
        let (resolver, _) = make_resolver(fetcher, FakeFeedStore::default());

        let result = resolver.resolve("https://example.com/feed.xml").await.unwrap();

        match result {
            Resolution::Resolved(resolved) => {
                assert_eq!(resolved.title, "Example Blog");
                assert_eq!(resolved.url, "https://example.com/feed.xml");
            }
            other => panic!("expected Resolved, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn fetch_failure_is_terminal() {
        let (resolver, _) = make_resolver(FakeFetcher::new(), FakeFeedStore::default());

        let result = resolver.resolve("https://example.com/").await;

        assert!(matches!(result, Err(IngestError::FetchFailed)));
    }

    #[tokio::test]
    async fn html_without_feed_links_is_unresolvable() {
        let fetcher = FakeFetcher::new().with(
            "https://example.com/",
            "text/html",
            "<html><head></head><body>Nothing here</body></html>",
        );
        let (resolver, _) = make_resolver(fetcher, FakeFeedStore::default());

        let result = resolver.resolve("https://example.com/").await;

        assert!(matches!(result, Err(IngestError::NoFeedsFound)));
    }

    #[tokio::test]
    async fn html_with_two_links_is_ambiguous_in_document_order() {
        let html = r#"<html><head>
            <link type="application/rss+xml" href="/feed.xml" title="Example Feed">
            <link type="application/atom+xml" href="/atom.xml">
        </head></html>"#;
        let fetcher = FakeFetcher::new().with("https://example.com/", "text/html; charset=utf-8", html);
        let (resolver, fetcher) = make_resolver(fetcher, FakeFeedStore::default());

        let result = resolver.resolve("https://example.com/").await.unwrap();

        match result {
            Resolution::Ambiguous(options) => {
                assert_eq!(options.len(), 2);
                assert_eq!(options[0].title.as_deref(), Some("Example Feed"));
                assert_eq!(options[0].url, "https://example.com/feed.xml");
                assert_eq!(options[1].title, None);
                assert_eq!(options[1].url, "https://example.com/atom.xml");
            }
            other => panic!("expected Ambiguous, got {:?}", other),
        }
        // Only the page itself was fetched.
        assert_eq!(fetcher.call_count(), 1);
    }

    #[tokio::test]
    async fn html_with_single_link_resolves_the_candidate() {
        let html = r#"<link type="application/rss+xml" href="/feed.xml" title="Example Feed">"#;
        let fetcher = FakeFetcher::new()
            .with("https://example.com/", "text/html", html)
            .with("https://example.com/feed.xml", "application/rss+xml", RSS_DOC);
        let (resolver, fetcher) = make_resolver(fetcher, FakeFeedStore::default());

        let result = resolver.resolve("https://example.com/").await.unwrap();

        match result {
            Resolution::Resolved(resolved) => {
                assert_eq!(resolved.url, "https://example.com/feed.xml");
                assert_eq!(resolved.title, "Example Blog");
            }
            other => panic!("expected Resolved, got {:?}", other),
        }
        assert_eq!(fetcher.call_count(), 2);
    }

    #[tokio::test]
    async fn single_link_pointing_at_known_feed_resolves_to_existing() {
        let html = r#"<link type="application/rss+xml" href="/feed.xml">"#;
        let fetcher = FakeFetcher::new().with("https://example.com/", "text/html", html);
        let store = FakeFeedStore::default().with_feed("https://example.com/feed.xml");
        let (resolver, fetcher) = make_resolver(fetcher, store);

        let result = resolver.resolve("https://example.com/").await.unwrap();

        assert!(matches!(result, Resolution::Existing(_)));
        // The candidate was found in the store, so it was never fetched.
        assert_eq!(fetcher.call_count(), 1);
    }

    #[tokio::test]
    async fn single_link_candidate_that_fails_to_parse_is_unresolvable() {
        let html = r#"<link type="application/rss+xml" href="/feed.xml">"#;
        let fetcher = FakeFetcher::new()
            .with("https://example.com/", "text/html", html)
            .with(
                "https://example.com/feed.xml",
                "text/html",
                "<html>still not a feed</html>",
            );
        let (resolver, _) = make_resolver(fetcher, FakeFeedStore::default());

        let result = resolver.resolve("https://example.com/").await;

        assert!(matches!(result, Err(IngestError::ParseFailed)));
    }

    #[tokio::test]
    async fn non_html_non_feed_body_is_a_parse_failure() {
        let fetcher = FakeFetcher::new().with(
            "https://example.com/data.json",
            "application/json",
            r#"{"not": "a feed"}"#,
        );
        let (resolver, _) = make_resolver(fetcher, FakeFeedStore::default());

        let result = resolver.resolve("https://example.com/data.json").await;

        assert!(matches!(result, Err(IngestError::ParseFailed)));
    }
}
