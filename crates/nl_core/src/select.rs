use std::cmp::Ordering;

use crate::types::{Article, Query, SortOrder};

/// Filters `articles` by the query and orders the survivors.
///
/// The input is left untouched; the result holds clones in the requested
/// order. Filtering always happens before sorting, and the sort is stable so
/// articles that compare equal keep their load order.
pub fn select(articles: &[Article], query: &Query) -> Vec<Article> {
    let needle = query.search.to_lowercase();
    let mut selected: Vec<Article> = articles
        .iter()
        .filter(|article| matches_search(article, &needle) && matches_source(article, &query.source))
        .cloned()
        .collect();

    sort_articles(&mut selected, query.sort);
    selected
}

fn matches_search(article: &Article, needle: &str) -> bool {
    needle.is_empty()
        || article.title.to_lowercase().contains(needle)
        || article.summary.to_lowercase().contains(needle)
}

fn matches_source(article: &Article, source: &str) -> bool {
    source.is_empty() || article.news_site == source
}

pub fn sort_articles(articles: &mut [Article], order: SortOrder) {
    match order {
        SortOrder::DateDesc => articles.sort_by(|a, b| b.published().cmp(&a.published())),
        SortOrder::DateAsc => articles.sort_by(|a, b| a.published().cmp(&b.published())),
        SortOrder::TitleAsc => articles.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        SortOrder::TitleDesc => articles.sort_by(|a, b| compare_titles(&b.title, &a.title)),
    }
}

/// Dictionary-style comparison: letters compare case-insensitively first,
/// and only on a full tie does lowercase sort ahead of uppercase.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded.then_with(|| a.chars().map(swap_case).cmp(b.chars().map(swap_case)))
}

fn swap_case(c: char) -> char {
    if c.is_lowercase() {
        c.to_uppercase().next().unwrap_or(c)
    } else if c.is_uppercase() {
        c.to_lowercase().next().unwrap_or(c)
    } else {
        c
    }
}
