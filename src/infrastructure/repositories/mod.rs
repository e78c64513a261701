pub mod auth_token_repository;
pub mod entry_repository;
pub mod feed_repository;
pub mod user_repository;

pub use auth_token_repository::AuthTokenRepository;
pub use entry_repository::{EntryRepository, UnreadEntryRow};
pub use feed_repository::FeedRepository;
pub use user_repository::UserRepository;
