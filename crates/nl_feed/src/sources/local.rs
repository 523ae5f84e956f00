use async_trait::async_trait;
use nl_core::{Article, LoadError};

use super::ArticleSource;

const SAMPLE_JSON: &str = include_str!("../../data/sample.json");

/// The sample collection compiled into the binary.
#[derive(Debug, Clone, Default)]
pub struct LocalSample;

impl LocalSample {
    pub fn new() -> Self {
        Self
    }

    pub fn articles(&self) -> Result<Vec<Article>, LoadError> {
        serde_json::from_str(SAMPLE_JSON).map_err(|e| LoadError::Shape(e.to_string()))
    }
}

#[async_trait]
impl ArticleSource for LocalSample {
    async fn fetch(&self) -> Result<Vec<Article>, LoadError> {
        self.articles()
    }
}
