use crate::domain::feed::FeedOption;
use scraper::{Html, Selector};
use url::Url;

/// Scans an HTML document for `<link>` elements advertising RSS/Atom
/// alternates and returns one [`FeedOption`] per match, in document order.
///
/// Malformed HTML is tolerated (the parser recovers); a page without
/// matching links yields an empty vector. Links without an `href` are
/// skipped. Relative hrefs are resolved against `base_url` with standard
/// relative-reference resolution, so root-relative (`/feed.xml`),
/// dot-relative (`../feed.xml`) and bare (`feed.xml`) forms all come back
/// absolute. Duplicate links are not collapsed.
pub fn find_feeds_in_html(base_url: &str, html: &str) -> Vec<FeedOption> {
    let selector = match Selector::parse(
        r#"link[type="application/atom+xml"], link[type="application/rss+xml"]"#,
    ) {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };

    let base = Url::parse(base_url).ok();
    let document = Html::parse_document(html);

    document
        .select(&selector)
        .filter_map(|element| {
            let href = element.value().attr("href")?;
            let url = resolve_href(base.as_ref(), href)?;
            let title = element.value().attr("title").map(str::to_string);
            Some(FeedOption { title, url })
        })
        .collect()
}

fn resolve_href(base: Option<&Url>, href: &str) -> Option<String> {
    match base {
        Some(base) => base.join(href).ok().map(|url| url.to_string()),
        None => Url::parse(href).ok().map(|url| url.to_string()),
    }
}
