use nl_core::display::{format_date, truncate_text, SUMMARY_PREVIEW_CHARS};
use nl_core::{Article, SourceMode};

/// What the listing area shows instead of cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// No load has finished yet.
    Loading,
    /// The latest load left the collection empty.
    LoadFailed,
    /// Articles are loaded but none match the query.
    NoResults,
}

impl EmptyState {
    pub fn message(&self) -> &'static str {
        match self {
            EmptyState::Loading => "Loading news...",
            EmptyState::LoadFailed => "Failed to load news. Try again later.",
            EmptyState::NoResults => "No results for your query.",
        }
    }
}

/// Handed to the renderer with each card; give it back to
/// `ViewController::activate` to open that article's detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailActivation {
    pub(crate) page: usize,
    pub(crate) index: usize,
}

impl DetailActivation {
    /// Position of the card on its page.
    pub fn index(&self) -> usize {
        self.index
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView<'a> {
    pub title: &'a str,
    pub source: &'a str,
    pub date: String,
    pub summary: String,
    pub image_url: &'a str,
}

impl<'a> CardView<'a> {
    pub fn new(article: &'a Article) -> Self {
        Self {
            title: &article.title,
            source: &article.news_site,
            date: format_date(article),
            summary: truncate_text(&article.summary, SUMMARY_PREVIEW_CHARS),
            image_url: &article.image_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView<'a> {
    pub title: &'a str,
    pub source: &'a str,
    pub date: String,
    pub content: &'a str,
    pub image_url: &'a str,
    pub url: &'a str,
}

impl<'a> DetailView<'a> {
    pub fn new(article: &'a Article) -> Self {
        Self {
            title: &article.title,
            source: &article.news_site,
            date: format_date(article),
            content: &article.content,
            image_url: &article.image_url,
            url: &article.url,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
    pub number: usize,
    pub active: bool,
}

/// Previous / numbered / next buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// Hidden when everything fits on one page.
    pub visible: bool,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub buttons: Vec<PageButton>,
}

impl Pagination {
    pub fn new(current: usize, total: usize) -> Self {
        Self {
            visible: total > 1,
            prev_enabled: current > 1,
            next_enabled: current < total,
            buttons: (1..=total)
                .map(|number| PageButton {
                    number,
                    active: number == current,
                })
                .collect(),
        }
    }
}

/// A presentation backend. The controller drives it once per render.
pub trait Renderer {
    /// Opaque handle for one rendered card
    type Card;

    /// Builds the visual card for an article
    fn card(&mut self, card: CardView<'_>, activate: DetailActivation) -> Self::Card;

    /// Shown instead of cards when the listing is empty
    fn empty_state(&mut self, state: EmptyState);

    fn stats(&mut self, _stats: &str, _page_info: &str) {}

    fn pagination(&mut self, _pagination: &Pagination) {}

    fn detail(&mut self, _detail: DetailView<'_>) {}

    /// Caption for the data-source toggle
    fn source_mode(&mut self, _mode: SourceMode) {}
}
