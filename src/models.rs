//! Data models for articles returned by the content API.
//!
//! - [`News`]: one article as shown in a list row
//! - [`NewsPage`]: the records of a single run, as written to the JSON output

use serde::{Deserialize, Serialize};

/// A single news article ready for display.
///
/// All four fields are always present. A field the API did not provide is
/// an empty string (or, within one parse, the previous article's value; see
/// [`crate::query::extract_news_from_json`]).
///
/// Values are immutable once built: the fields are private and only
/// readable through the accessors.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct News {
    title: String,
    section: String,
    date: String,
    url: String,
}

impl News {
    /// Build a record from its four display fields.
    ///
    /// # Arguments
    ///
    /// * `title` - The article headline
    /// * `section` - The section the article belongs to (e.g. "World news")
    /// * `date` - The publication date, `YYYY-MM-DD`
    /// * `url` - Link to the full article
    pub fn new(
        title: impl Into<String>,
        section: impl Into<String>,
        date: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            section: section.into(),
            date: date.into(),
            url: url.into(),
        }
    }

    /// The article headline.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The section the article is part of.
    pub fn section(&self) -> &str {
        &self.section
    }

    /// The publication date.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Link to the full article.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// The articles fetched by one run of the application.
#[derive(Debug, Deserialize, Serialize)]
pub struct NewsPage {
    /// The URL the first page was requested from.
    pub request_url: String,
    /// When the fetch completed, RFC 3339 in local time.
    pub fetched_at: String,
    /// Articles in the order the API returned them.
    pub news: Vec<News>,
}
