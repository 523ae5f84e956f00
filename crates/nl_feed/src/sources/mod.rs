use async_trait::async_trait;
use nl_core::{Article, LoadError};

pub mod local;
pub mod remote;

pub use local::LocalSample;
pub use remote::RemoteFeed;

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Fetches the full collection this source offers
    async fn fetch(&self) -> Result<Vec<Article>, LoadError>;
}
