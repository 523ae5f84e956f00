use chrono::Local;

use crate::types::Article;

pub const SUMMARY_PREVIEW_CHARS: usize = 80;

/// Cuts `text` to `max_chars` characters and marks the cut with `...`.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// Short local date for cards and the detail view.
pub fn format_date(article: &Article) -> String {
    match article.published() {
        Some(dt) => dt.with_timezone(&Local).format("%d.%m.%Y").to_string(),
        None => "Invalid Date".to_string(),
    }
}
