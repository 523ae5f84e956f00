pub mod config;
pub mod logging;
pub mod sources;
pub mod store;

pub use config::FeedConfig;
pub use sources::{ArticleSource, LocalSample, RemoteFeed};
pub use store::{ArticleStore, CompletedLoad, LoadTicket, PendingLoad};
