use async_trait::async_trait;
use nl_core::{Article, LoadError};
use serde_json::Value;

use super::ArticleSource;
use crate::config::FeedConfig;

/// A paginated JSON feed; only the first page is ever requested.
#[derive(Debug, Clone)]
pub struct RemoteFeed {
    client: reqwest::Client,
    config: FeedConfig,
}

impl RemoteFeed {
    pub fn new(config: FeedConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ArticleSource for RemoteFeed {
    async fn fetch(&self) -> Result<Vec<Article>, LoadError> {
        let url = self.config.request_url();
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::HttpStatus(status.as_u16()));
        }

        let body: Value = response.json().await.map_err(|e| {
            if e.is_decode() {
                LoadError::Shape(e.to_string())
            } else {
                LoadError::Network(e.to_string())
            }
        })?;

        parse_feed_body(body)
    }
}

/// Accepts `{"results": [...]}` or a bare array.
pub fn parse_feed_body(body: Value) -> Result<Vec<Article>, LoadError> {
    let items = match body {
        Value::Object(mut map) => match map.remove("results") {
            Some(results @ Value::Array(_)) => results,
            Some(other) => {
                return Err(LoadError::Shape(format!(
                    "`results` is {}, expected an array",
                    kind(&other)
                )))
            }
            None => return Err(LoadError::Shape("object without `results`".to_string())),
        },
        array @ Value::Array(_) => array,
        other => return Err(LoadError::Shape(format!("top-level {}", kind(&other)))),
    };

    serde_json::from_value(items).map_err(|e| LoadError::Shape(e.to_string()))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
