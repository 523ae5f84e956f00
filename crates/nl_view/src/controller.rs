use nl_core::page::{clamp_page, paginate, total_pages, ARTICLES_PER_PAGE};
use nl_core::{select, Article, Query, SortOrder, SourceMode};
use nl_feed::{ArticleStore, CompletedLoad, PendingLoad};
use tracing::debug;

use crate::render::{CardView, DetailActivation, DetailView, EmptyState, Pagination, Renderer};

/// Owns the store, the query controls, the page cursor and the open detail.
///
/// The selection is recomputed whenever the collection or the query changes
/// and reused for page flips.
pub struct ViewController {
    store: ArticleStore,
    query: Query,
    current_page: usize,
    per_page: usize,
    results: Vec<Article>,
    detail: Option<Article>,
}

impl ViewController {
    pub fn new(store: ArticleStore) -> Self {
        Self {
            store,
            query: Query::default(),
            current_page: 1,
            per_page: ARTICLES_PER_PAGE,
            results: Vec::new(),
            detail: None,
        }
    }

    pub fn store(&self) -> &ArticleStore {
        &self.store
    }

    pub fn mode(&self) -> SourceMode {
        self.store.mode()
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn sources(&self) -> Vec<String> {
        self.store.sources()
    }

    pub fn begin_reload(&mut self) -> PendingLoad {
        self.store.begin_load()
    }

    /// Applies a finished load and resets every control. Stale loads are ignored.
    pub fn finish_reload(&mut self, done: CompletedLoad) -> bool {
        if !self.store.apply(done) {
            return false;
        }
        self.query = Query::default();
        self.detail = None;
        self.refresh();
        true
    }

    pub async fn load(&mut self) {
        let done = self.begin_reload().run().await;
        self.finish_reload(done);
    }

    /// Flips the data source. The caller is expected to reload right after.
    pub fn toggle_source(&mut self) -> SourceMode {
        self.store.toggle_source()
    }

    pub async fn toggle_and_reload(&mut self) -> SourceMode {
        let mode = self.toggle_source();
        self.load().await;
        mode
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
        self.refresh();
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.query.sort = sort;
        self.refresh();
    }

    /// Empty string selects every source.
    pub fn set_source(&mut self, source: impl Into<String>) {
        self.query.source = source.into();
        self.refresh();
    }

    /// Replaces the whole query at once, e.g. from command-line flags.
    pub fn set_query(&mut self, query: Query) {
        self.query = query;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.current_page = 1;
        self.results = select(self.store.articles(), &self.query);
        debug!(
            "selected {} of {} articles for {:?}",
            self.results.len(),
            self.store.articles().len(),
            self.query
        );
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.results.len(), self.per_page)
    }

    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    pub fn results(&self) -> &[Article] {
        &self.results
    }

    pub fn page_items(&self) -> &[Article] {
        paginate(&self.results, self.current_page, self.per_page)
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = clamp_page(page, self.total_pages());
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.current_page + 1);
    }

    pub fn prev_page(&mut self) {
        self.go_to_page(self.current_page.saturating_sub(1));
    }

    /// `LoadFailed` only covers the very first load; an empty collection
    /// after any later reload reads as no results.
    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.store.is_loaded() {
            Some(EmptyState::Loading)
        } else if self.store.first_load_failed() {
            Some(EmptyState::LoadFailed)
        } else if self.results.is_empty() {
            Some(EmptyState::NoResults)
        } else {
            None
        }
    }

    pub fn stats_text(&self) -> String {
        match self.empty_state() {
            Some(EmptyState::Loading) => "Loading...".to_string(),
            Some(EmptyState::LoadFailed) => "Load error.".to_string(),
            _ => format!("Found {} articles.", self.results.len()),
        }
    }

    pub fn page_info(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages())
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.current_page, self.total_pages())
    }

    pub fn cards(&self) -> Vec<(CardView<'_>, DetailActivation)> {
        self.page_items()
            .iter()
            .enumerate()
            .map(|(index, article)| {
                let activation = DetailActivation {
                    page: self.current_page,
                    index,
                };
                (CardView::new(article), activation)
            })
            .collect()
    }

    /// Opens the detail view for a card; tokens from another page are refused.
    pub fn activate(&mut self, activation: DetailActivation) -> bool {
        if activation.page != self.current_page {
            return false;
        }
        match self.page_items().get(activation.index) {
            Some(article) => {
                self.detail = Some(article.clone());
                true
            }
            None => false,
        }
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    pub fn detail(&self) -> Option<DetailView<'_>> {
        self.detail.as_ref().map(DetailView::new)
    }

    pub fn render<R: Renderer>(&self, renderer: &mut R) -> Vec<R::Card> {
        renderer.source_mode(self.mode());
        renderer.stats(&self.stats_text(), &self.page_info());

        let cards = match self.empty_state() {
            Some(state) => {
                renderer.empty_state(state);
                Vec::new()
            }
            None => self
                .cards()
                .into_iter()
                .map(|(card, activation)| renderer.card(card, activation))
                .collect(),
        };

        renderer.pagination(&self.pagination());
        if let Some(detail) = self.detail() {
            renderer.detail(detail);
        }
        cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nl_core::LoadError;
    use nl_feed::{ArticleSource, LocalSample};
    use std::sync::Arc;

    struct FixedSource(Result<Vec<Article>, LoadError>);

    #[async_trait]
    impl ArticleSource for FixedSource {
        async fn fetch(&self) -> Result<Vec<Article>, LoadError> {
            self.0.clone()
        }
    }

    fn numbered(count: usize) -> Vec<Article> {
        (0..count)
            .map(|i| Article {
                title: format!("Article {:02}", i),
                summary: if i % 2 == 0 { "even".to_string() } else { "odd".to_string() },
                news_site: if i < 10 { "NASA" } else { "ESA" }.to_string(),
                published_at: format!("2024-03-{:02}T00:00:00Z", i + 1),
                ..Default::default()
            })
            .collect()
    }

    fn controller(local: Vec<Article>, remote: Result<Vec<Article>, LoadError>) -> ViewController {
        let store = ArticleStore::new(
            Arc::new(FixedSource(Ok(local))),
            Arc::new(FixedSource(remote)),
        );
        ViewController::new(store)
    }

    #[derive(Default)]
    struct Recorder {
        empty: Option<EmptyState>,
        stats: String,
        pagination: Option<Pagination>,
        detail_title: Option<String>,
        mode: Option<SourceMode>,
    }

    impl Renderer for Recorder {
        type Card = (String, DetailActivation);

        fn card(&mut self, card: CardView<'_>, activate: DetailActivation) -> Self::Card {
            (card.title.to_string(), activate)
        }

        fn empty_state(&mut self, state: EmptyState) {
            self.empty = Some(state);
        }

        fn stats(&mut self, stats: &str, page_info: &str) {
            self.stats = format!("{} {}", stats, page_info);
        }

        fn pagination(&mut self, pagination: &Pagination) {
            self.pagination = Some(pagination.clone());
        }

        fn detail(&mut self, detail: DetailView<'_>) {
            self.detail_title = Some(detail.title.to_string());
        }

        fn source_mode(&mut self, mode: SourceMode) {
            self.mode = Some(mode);
        }
    }

    #[tokio::test]
    async fn test_twenty_results_paginate_nine_nine_two() {
        let mut view = controller(numbered(20), Ok(vec![]));
        view.load().await;

        assert_eq!(view.result_count(), 20);
        assert_eq!(view.total_pages(), 3);
        assert_eq!(view.page_items().len(), 9);
        assert_eq!(view.page_items()[0].title, "Article 19");

        view.go_to_page(3);
        assert_eq!(view.page_items().len(), 2);
        assert_eq!(view.page_info(), "Page 3 of 3");

        view.next_page();
        assert_eq!(view.current_page(), 3);
        view.go_to_page(0);
        assert_eq!(view.current_page(), 1);
        view.prev_page();
        assert_eq!(view.current_page(), 1);
    }

    #[tokio::test]
    async fn test_query_change_resets_page() {
        let mut view = controller(numbered(20), Ok(vec![]));
        view.load().await;
        view.go_to_page(2);

        view.set_search("EVEN");
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.result_count(), 10);

        view.go_to_page(2);
        view.set_sort(SortOrder::TitleAsc);
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.page_items()[0].title, "Article 00");

        view.go_to_page(2);
        view.set_source("ESA");
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.result_count(), 5);
        assert_eq!(view.total_pages(), 1);
    }

    #[tokio::test]
    async fn test_page_flip_keeps_query() {
        let mut view = controller(numbered(20), Ok(vec![]));
        view.load().await;
        view.set_sort(SortOrder::DateAsc);
        view.go_to_page(2);
        assert_eq!(view.query().sort, SortOrder::DateAsc);
        assert_eq!(view.page_items()[0].title, "Article 09");
    }

    #[tokio::test]
    async fn test_reload_replaces_collection_and_resets_controls() {
        let mut view = controller(numbered(20), Ok(numbered(3)));
        view.load().await;
        view.set_search("odd");
        view.set_sort(SortOrder::TitleDesc);
        view.set_source("NASA");
        view.go_to_page(1);

        assert_eq!(view.toggle_and_reload().await, SourceMode::Remote);
        assert_eq!(view.query(), &Query::default());
        assert_eq!(view.store().articles().len(), 3);
        assert_eq!(view.result_count(), 3);
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.sources(), vec!["NASA"]);
    }

    #[tokio::test]
    async fn test_failed_first_load_is_not_no_results() {
        let store = ArticleStore::new(
            Arc::new(FixedSource(Ok(numbered(4)))),
            Arc::new(FixedSource(Err(LoadError::HttpStatus(500)))),
        )
        .with_mode(SourceMode::Remote);
        let mut view = ViewController::new(store);
        assert_eq!(view.empty_state(), Some(EmptyState::Loading));

        view.load().await;
        assert_eq!(view.empty_state(), Some(EmptyState::LoadFailed));
        assert_eq!(view.stats_text(), "Load error.");
        assert_eq!(view.total_pages(), 0);

        view.set_search("anything");
        assert_eq!(view.empty_state(), Some(EmptyState::LoadFailed));

        view.toggle_and_reload().await;
        view.set_search("no such article");
        assert_eq!(view.empty_state(), Some(EmptyState::NoResults));
        assert_eq!(view.stats_text(), "Found 0 articles.");
    }

    #[tokio::test]
    async fn test_failed_reload_reads_as_no_results() {
        let mut view = controller(numbered(4), Err(LoadError::HttpStatus(500)));
        view.load().await;
        assert_eq!(view.empty_state(), None);

        view.toggle_and_reload().await;
        assert!(view.store().articles().is_empty());
        assert_eq!(view.empty_state(), Some(EmptyState::NoResults));
        assert_eq!(view.stats_text(), "Found 0 articles.");
        assert_eq!(view.total_pages(), 0);
    }

    #[tokio::test]
    async fn test_stale_reload_is_ignored() {
        let mut view = controller(numbered(20), Ok(numbered(3)));
        view.load().await;

        let stale = view.begin_reload();
        view.toggle_source();
        let fresh = view.begin_reload();

        let fresh = fresh.run().await;
        let stale = stale.run().await;
        assert!(view.finish_reload(fresh));
        assert!(!view.finish_reload(stale));
        assert_eq!(view.result_count(), 3);
    }

    #[tokio::test]
    async fn test_render_cards_and_detail() {
        let mut view = controller(numbered(20), Ok(vec![]));
        view.load().await;
        view.go_to_page(2);

        let mut recorder = Recorder::default();
        let cards = view.render(&mut recorder);
        assert_eq!(cards.len(), 9);
        assert_eq!(recorder.stats, "Found 20 articles. Page 2 of 3");
        assert_eq!(recorder.mode, Some(SourceMode::Local));
        assert!(recorder.empty.is_none());
        assert!(recorder.pagination.unwrap().buttons[1].active);

        let (title, activation) = cards[4].clone();
        assert!(view.activate(activation));

        let mut recorder = Recorder::default();
        view.render(&mut recorder);
        assert_eq!(recorder.detail_title, Some(title));

        view.close_detail();
        assert!(view.detail().is_none());

        view.go_to_page(1);
        assert!(!view.activate(activation));
    }

    #[tokio::test]
    async fn test_render_empty_state_has_no_page_buttons() {
        let mut view = controller(numbered(5), Ok(vec![]));
        view.load().await;
        view.set_search("zzz");

        let mut recorder = Recorder::default();
        let cards = view.render(&mut recorder);
        assert!(cards.is_empty());
        assert_eq!(recorder.empty, Some(EmptyState::NoResults));
        let pagination = recorder.pagination.unwrap();
        assert!(!pagination.visible);
        assert!(pagination.buttons.is_empty());
    }

    #[tokio::test]
    async fn test_bundled_sample_mars_scenario() {
        let store = ArticleStore::new(
            Arc::new(LocalSample::new()),
            Arc::new(FixedSource(Ok(vec![]))),
        );
        let mut view = ViewController::new(store);
        view.load().await;
        assert_eq!(view.sources(), vec!["NASA", "SpaceNews"]);

        view.set_sort(SortOrder::TitleAsc);
        view.set_search("mars");
        let titles: Vec<&str> = view.results().iter().map(|a| a.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Ingenuity Team Publishes Final Flight Analysis",
                "Mars Sample Return Architecture Under Review",
                "Perseverance Rover Cores Its Twenty-Fifth Sample on Mars",
            ]
        );
    }
}
