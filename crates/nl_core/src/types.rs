use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub news_site: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub published_at: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image_url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
}

impl Article {
    /// Parsed publication instant, `None` when `published_at` is unreadable.
    ///
    /// Accepts RFC 3339, then a date-time without offset, then a bare date.
    /// The offset-less forms are taken as UTC.
    pub fn published(&self) -> Option<DateTime<Utc>> {
        let raw = self.published_at.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(Utc.from_utc_datetime(&naive));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
    }
}

/// Feeds send `null` for text they lack; keep the item and read it as empty.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    #[default]
    DateDesc,
    DateAsc,
    TitleAsc,
    TitleDesc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::DateDesc,
        SortOrder::DateAsc,
        SortOrder::TitleAsc,
        SortOrder::TitleDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::DateDesc => "date-desc",
            SortOrder::DateAsc => "date-asc",
            SortOrder::TitleAsc => "title-asc",
            SortOrder::TitleDesc => "title-desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::DateDesc => "Newest first",
            SortOrder::DateAsc => "Oldest first",
            SortOrder::TitleAsc => "Title A-Z",
            SortOrder::TitleDesc => "Title Z-A",
        }
    }

    /// The option after this one in the sort selector, wrapping around.
    pub fn next(&self) -> SortOrder {
        let idx = Self::ALL.iter().position(|s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|order| order.as_str() == s)
            .ok_or_else(|| Error::InvalidSort(s.to_string()))
    }
}

/// Query parameters read from the search box, sort selector and source selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub search: String,
    pub sort: SortOrder,
    /// Empty means every source.
    pub source: String,
}

impl Query {
    pub fn new(search: impl Into<String>, sort: SortOrder, source: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            sort,
            source: source.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceMode {
    #[default]
    Local,
    Remote,
}

impl SourceMode {
    pub fn toggled(self) -> Self {
        match self {
            SourceMode::Local => SourceMode::Remote,
            SourceMode::Remote => SourceMode::Local,
        }
    }

    /// Caption shown on the data-source toggle.
    pub fn label(&self) -> &'static str {
        match self {
            SourceMode::Local => "Local",
            SourceMode::Remote => "API",
        }
    }
}
