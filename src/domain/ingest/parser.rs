use super::error::IngestError;
use atom_syndication::Feed as AtomFeed;
use chrono::{DateTime, Utc};
use rss::Channel;

/// Feed-level summary: what gets stored on the feed row at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFeed {
    pub title: String,
    pub icon_url: Option<String>,
}

/// One normalized feed item.
///
/// `entry_id` is the deduplication key: the document-provided guid when
/// present, else the item link, else an empty string. `published` falls back
/// to parse-time now when the document carries no date.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFeedEntry {
    pub entry_id: String,
    pub title: String,
    pub url: String,
    pub author: Option<String>,
    pub published: DateTime<Utc>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFeedWithEntries {
    pub title: String,
    pub icon_url: Option<String>,
    pub entries: Vec<ParsedFeedEntry>,
}

/// Parses an RSS or Atom document into its feed-level summary.
pub fn parse_feed_summary(body: &[u8]) -> Result<ParsedFeed, IngestError> {
    let parsed = parse_feed_with_entries(body)?;
    Ok(ParsedFeed {
        title: parsed.title,
        icon_url: parsed.icon_url,
    })
}

/// Parses an RSS or Atom document into a feed summary plus its normalized
/// entries. A feed without items yields an empty entry list, not an error;
/// a document that is neither valid RSS nor valid Atom is a `ParseFailed`.
pub fn parse_feed_with_entries(body: &[u8]) -> Result<ParsedFeedWithEntries, IngestError> {
    if let Ok(channel) = Channel::read_from(body) {
        return Ok(from_rss(channel));
    }

    match AtomFeed::read_from(body) {
        Ok(feed) => Ok(from_atom(feed)),
        Err(_) => Err(IngestError::ParseFailed),
    }
}

fn from_rss(channel: Channel) -> ParsedFeedWithEntries {
    let entries = channel
        .items()
        .iter()
        .map(|item| {
            let guid = item
                .guid()
                .map(|guid| guid.value().to_string())
                .filter(|value| !value.trim().is_empty());
            let link = item.link().map(str::to_string);
            let entry_id = guid.or_else(|| link.clone()).unwrap_or_default();

            ParsedFeedEntry {
                entry_id,
                title: title_or_untitled(item.title().unwrap_or_default()),
                url: link.unwrap_or_default(),
                author: item.author().map(str::to_string),
                published: parse_rfc2822(item.pub_date()),
                summary: item
                    .description()
                    .and_then(snippet)
                    .or_else(|| item.content().and_then(snippet)),
            }
        })
        .collect();

    ParsedFeedWithEntries {
        title: title_or_untitled(channel.title()),
        icon_url: channel.image().map(|image| image.url().to_string()),
        entries,
    }
}

fn from_atom(feed: AtomFeed) -> ParsedFeedWithEntries {
    let entries = feed
        .entries()
        .iter()
        .map(|entry| {
            let link = entry.links().first().map(|link| link.href().to_string());
            let id = entry.id().trim();
            let entry_id = if !id.is_empty() {
                id.to_string()
            } else {
                link.clone().unwrap_or_default()
            };

            let published: DateTime<Utc> = entry
                .published()
                .unwrap_or_else(|| entry.updated())
                .to_owned()
                .into();

            ParsedFeedEntry {
                entry_id,
                title: title_or_untitled(&entry.title().to_string()),
                url: link.unwrap_or_default(),
                author: entry.authors().first().map(|person| person.name().to_string()),
                published,
                summary: entry
                    .summary()
                    .and_then(|text| snippet(&text.to_string()))
                    .or_else(|| entry.content().and_then(|c| c.value()).and_then(snippet)),
            }
        })
        .collect();

    ParsedFeedWithEntries {
        title: title_or_untitled(&feed.title().to_string()),
        icon_url: feed
            .icon()
            .or_else(|| feed.logo())
            .map(str::to_string),
        entries,
    }
}

fn title_or_untitled(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        "Untitled".to_string()
    } else {
        trimmed.to_string()
    }
}

/// RSS dates are RFC 2822; anything unparseable (or absent) becomes now,
/// so every stored entry has a published timestamp.
fn parse_rfc2822(value: Option<&str>) -> DateTime<Utc> {
    value
        .and_then(|value| DateTime::parse_from_rfc2822(value).ok())
        .map(Into::into)
        .unwrap_or_else(Utc::now)
}

/// Plain-text snippet of an HTML fragment: tags stripped, whitespace
/// collapsed. Empty results become None.
fn snippet(html: &str) -> Option<String> {
    let text = html2text::from_read(html.as_bytes(), usize::MAX);
    let whitespace = regex::Regex::new(r"\s+").unwrap();
    let collapsed = whitespace.replace_all(&text, " ");
    let trimmed = collapsed.trim();

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    const RSS_THREE_ITEMS: &str = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Example Blog</title>
    <link>https://example.com</link>
    <description>Posts about things</description>
    <image>
      <url>https://example.com/icon.png</url>
      <title>Example Blog</title>
      <link>https://example.com</link>
    </image>
    <item>
      <guid>post-1</guid>
      <title>First Post</title>
      <link>https://example.com/post/1</link>
      <author>alice@example.com</author>
      <pubDate>Mon, 02 Jun 2025 09:00:00 GMT</pubDate>
      <description>&lt;p&gt;Hello world&lt;/p&gt;</description>
    </item>
    <item>
      <guid>post-2</guid>
      <title>Second Post</title>
      <link>https://example.com/post/2</link>
      <pubDate>Tue, 03 Jun 2025 09:00:00 GMT</pubDate>
    </item>
    <item>
      <guid>post-3</guid>
      <title>Third Post</title>
      <link>https://example.com/post/3</link>
      <pubDate>Wed, 04 Jun 2025 09:00:00 GMT</pubDate>
    </item>
  </channel>
</rss>"#;

    const ATOM_ONE_ENTRY: &str = r#"<?xml version="1.0"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Example Atom</title>
  <id>urn:example:feed</id>
  <updated>2025-06-01T00:00:00Z</updated>
  <icon>https://example.com/atom-icon.png</icon>
  <entry>
    <id>urn:example:entry:1</id>
    <title>Atom Entry</title>
    <link href="https://example.com/atom/1"/>
    <author><name>Alice</name></author>
    <published>2025-06-01T12:00:00Z</published>
    <updated>2025-06-02T12:00:00Z</updated>
    <summary>Short summary.</summary>
  </entry>
</feed>"#;

    #[test]
    fn parses_rss_summary() {
        let parsed = parse_feed_summary(RSS_THREE_ITEMS.as_bytes()).unwrap();

        assert_eq!(parsed.title, "Example Blog");
        assert_eq!(parsed.icon_url.as_deref(), Some("https://example.com/icon.png"));
    }

    #[test]
    fn parses_rss_entries() {
        let parsed = parse_feed_with_entries(RSS_THREE_ITEMS.as_bytes()).unwrap();

        assert_eq!(parsed.entries.len(), 3);

        let first = &parsed.entries[0];
        assert_eq!(first.entry_id, "post-1");
        assert_eq!(first.title, "First Post");
        assert_eq!(first.url, "https://example.com/post/1");
        assert_eq!(first.author.as_deref(), Some("alice@example.com"));
        assert_eq!(first.summary.as_deref(), Some("Hello world"));
        assert_eq!(
            first.published,
            DateTime::parse_from_rfc2822("Mon, 02 Jun 2025 09:00:00 GMT").unwrap()
        );

        // Item without a description has no summary
        assert_eq!(parsed.entries[1].summary, None);
    }

    #[test]
    fn item_without_guid_falls_back_to_link() {
        let rss = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>T</title>
  <item>
    <title>Post</title>
    <link>https://example.com/post/9</link>
  </item>
</channel></rss>"#;

        let parsed = parse_feed_with_entries(rss.as_bytes()).unwrap();

        assert_eq!(parsed.entries[0].entry_id, "https://example.com/post/9");
    }

    #[test]
    fn item_without_guid_or_link_gets_empty_entry_id() {
        let rss = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>T</title>
  <item><title>Orphan</title></item>
</channel></rss>"#;

        let parsed = parse_feed_with_entries(rss.as_bytes()).unwrap();

        assert_eq!(parsed.entries[0].entry_id, "");
        assert_eq!(parsed.entries[0].url, "");
    }

    #[test]
    fn item_without_pub_date_defaults_to_now() {
        let rss = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>T</title>
  <item><guid>1</guid><title>Post</title></item>
</channel></rss>"#;

        let before = Utc::now();
        let parsed = parse_feed_with_entries(rss.as_bytes()).unwrap();
        let after = Utc::now();

        let published = parsed.entries[0].published;
        assert!(published >= before && published <= after);
    }

    #[test]
    fn item_without_title_defaults_to_untitled() {
        let rss = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>T</title>
  <item><guid>1</guid></item>
</channel></rss>"#;

        let parsed = parse_feed_with_entries(rss.as_bytes()).unwrap();

        assert_eq!(parsed.entries[0].title, "Untitled");
    }

    #[test]
    fn feed_without_title_defaults_to_untitled() {
        let rss = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
  <item><guid>1</guid><title>Post</title></item>
</channel></rss>"#;

        let parsed = parse_feed_summary(rss.as_bytes()).unwrap();

        assert_eq!(parsed.title, "Untitled");
        assert_eq!(parsed.icon_url, None);
    }

    #[test]
    fn feed_without_items_yields_zero_entries() {
        let rss = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>Quiet</title></channel></rss>"#;

        let parsed = parse_feed_with_entries(rss.as_bytes()).unwrap();

        assert_eq!(parsed.title, "Quiet");
        assert!(parsed.entries.is_empty());
    }

    #[test]
    fn parses_atom_document() {
        let parsed = parse_feed_with_entries(ATOM_ONE_ENTRY.as_bytes()).unwrap();

        assert_eq!(parsed.title, "Example Atom");
        assert_eq!(
            parsed.icon_url.as_deref(),
            Some("https://example.com/atom-icon.png")
        );
        assert_eq!(parsed.entries.len(), 1);

        let entry = &parsed.entries[0];
        assert_eq!(entry.entry_id, "urn:example:entry:1");
        assert_eq!(entry.title, "Atom Entry");
        assert_eq!(entry.url, "https://example.com/atom/1");
        assert_eq!(entry.author.as_deref(), Some("Alice"));
        assert_eq!(entry.summary.as_deref(), Some("Short summary."));
        assert_eq!(
            entry.published,
            DateTime::parse_from_rfc3339("2025-06-01T12:00:00Z").unwrap()
        );
    }

    #[test]
    fn html_document_is_a_parse_failure() {
        let result = parse_feed_summary(b"<html><body>Not a feed</body></html>");

        assert!(matches!(result, Err(IngestError::ParseFailed)));
    }

    #[test]
    fn garbage_is_a_parse_failure() {
        let result = parse_feed_with_entries(b"not xml at all");

        assert!(matches!(result, Err(IngestError::ParseFailed)));
    }

    #[test]
    fn summary_strips_html_and_collapses_whitespace() {
        let rss = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>T</title>
  <item>
    <guid>1</guid>
    <description>&lt;p&gt;Line one.&lt;/p&gt;

    &lt;p&gt;Line   two.&lt;/p&gt;</description>
  </item>
</channel></rss>"#;

        let parsed = parse_feed_with_entries(rss.as_bytes()).unwrap();
        let summary = parsed.entries[0].summary.as_deref().unwrap();

        assert!(!summary.contains('<'));
        assert!(!summary.contains("  "));
        assert!(summary.contains("Line one."));
        assert!(summary.contains("Line two."));
    }
}
