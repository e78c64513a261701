//! Feed ingestion: resolving a user-supplied URL to a feed, and merging a
//! feed's current entries into storage.
//!
//! The pipeline is built from small collaborators: a [`DocumentFetcher`]
//! retrieves documents over HTTP, the discoverer scans HTML pages for
//! advertised feed links, the parser normalizes RSS/Atom documents, the
//! [`FeedResolver`] drives the three of them to resolve a subscription
//! target, and the [`EntryReconciler`] merges newly seen entries for an
//! already-registered feed.

pub mod discover;
pub mod error;
pub mod fetcher;
pub mod parser;
pub mod reconcile;
pub mod resolver;
pub mod store;

pub use discover::find_feeds_in_html;
pub use error::IngestError;
pub use fetcher::{DocumentFetcher, FetchedDocument, HttpFetcher};
pub use parser::{parse_feed_summary, parse_feed_with_entries, ParsedFeed, ParsedFeedEntry, ParsedFeedWithEntries};
pub use reconcile::{EntryReconciler, ReconcileReport};
pub use resolver::{FeedResolver, ResolvedFeed, Resolution};
pub use store::{EntryStore, FeedStore};
