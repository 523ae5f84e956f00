use nl_core::{Error, Result};
use url::Url;

pub const DEFAULT_FEED_URL: &str = "https://api.spaceflightnewsapi.net/v4/articles/";
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Where the remote feed lives and how many items one request asks for.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub endpoint: Url,
    pub limit: u32,
}

impl FeedConfig {
    pub fn new(endpoint: &str, limit: u32) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", endpoint, e)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(Error::InvalidUrl(format!(
                "{}: unsupported scheme {}",
                endpoint,
                endpoint.scheme()
            )));
        }
        Ok(Self { endpoint, limit })
    }

    /// Endpoint with the `limit` query parameter set.
    pub fn request_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(k, _)| k != "limit")
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .append_pair("limit", &self.limit.to_string());
        url
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_FEED_URL).expect("default feed URL is valid"),
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}
