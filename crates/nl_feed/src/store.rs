use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use nl_core::{Article, LoadError, SourceMode};

use crate::logging::Logger;
use crate::sources::ArticleSource;

/// Identifies one load. Only the most recently issued ticket may be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

impl fmt::Display for LoadTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A load that has been issued but not yet run.
///
/// It owns a handle to its source so it can be moved onto a task while the
/// store stays with the UI.
pub struct PendingLoad {
    ticket: LoadTicket,
    mode: SourceMode,
    source: Arc<dyn ArticleSource>,
}

impl PendingLoad {
    pub fn ticket(&self) -> LoadTicket {
        self.ticket
    }

    pub fn mode(&self) -> SourceMode {
        self.mode
    }

    pub async fn run(self) -> CompletedLoad {
        let result = self.source.fetch().await;
        CompletedLoad {
            ticket: self.ticket,
            mode: self.mode,
            result,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompletedLoad {
    pub ticket: LoadTicket,
    pub mode: SourceMode,
    pub result: Result<Vec<Article>, LoadError>,
}

/// Holds the article collection and the Local/Remote switch.
pub struct ArticleStore {
    local: Arc<dyn ArticleSource>,
    remote: Arc<dyn ArticleSource>,
    mode: SourceMode,
    articles: Vec<Article>,
    last_error: Option<LoadError>,
    issued: u64,
    applied: usize,
}

impl ArticleStore {
    pub fn new(local: Arc<dyn ArticleSource>, remote: Arc<dyn ArticleSource>) -> Self {
        Self {
            local,
            remote,
            mode: SourceMode::Local,
            articles: Vec::new(),
            last_error: None,
            issued: 0,
            applied: 0,
        }
    }

    pub fn with_mode(mut self, mode: SourceMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> SourceMode {
        self.mode
    }

    /// Flips Local/Remote without reloading.
    ///
    /// Any load still in flight belongs to the old mode and will be discarded
    /// when it completes.
    pub fn toggle_source(&mut self) -> SourceMode {
        self.mode = self.mode.toggled();
        self.issued += 1;
        self.mode
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Cause of the last applied load coming back empty-handed, if it failed.
    pub fn last_error(&self) -> Option<&LoadError> {
        self.last_error.as_ref()
    }

    /// True once at least one load has been applied.
    pub fn is_loaded(&self) -> bool {
        self.applied > 0
    }

    /// True while the only load applied so far came back with no articles.
    ///
    /// Once anything else has been applied, an empty collection is just an
    /// empty result.
    pub fn first_load_failed(&self) -> bool {
        self.applied == 1 && self.articles.is_empty()
    }

    /// Distinct `news_site` values in first-seen order.
    pub fn sources(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.articles
            .iter()
            .filter(|a| seen.insert(a.news_site.as_str()))
            .map(|a| a.news_site.clone())
            .collect()
    }

    pub fn begin_load(&mut self) -> PendingLoad {
        self.issued += 1;
        let source = match self.mode {
            SourceMode::Local => self.local.clone(),
            SourceMode::Remote => self.remote.clone(),
        };
        PendingLoad {
            ticket: LoadTicket(self.issued),
            mode: self.mode,
            source,
        }
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Installs a finished load if it is still the latest one.
    ///
    /// Failures replace the collection with nothing; the cause is logged and
    /// kept in `last_error`. Returns whether the load was applied.
    pub fn apply(&mut self, done: CompletedLoad) -> bool {
        let logger = Logger::new()
            .with_prefix(format!("[{}]", done.mode.label()))
            .with_prefix(format!("[load {}]", done.ticket));

        if !self.is_current(done.ticket) {
            logger.debug("discarding stale result");
            return false;
        }

        match done.result {
            Ok(articles) => {
                logger.info(&format!("loaded {} articles", articles.len()));
                self.articles = articles;
                self.last_error = None;
            }
            Err(e) => {
                logger.error(&format!("failed to load articles: {}", e));
                self.articles.clear();
                self.last_error = Some(e);
            }
        }
        self.applied += 1;
        true
    }

    /// Runs a load to completion and applies it.
    pub async fn load(&mut self) -> &[Article] {
        let done = self.begin_load().run().await;
        self.apply(done);
        &self.articles
    }
}
