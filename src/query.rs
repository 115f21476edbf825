//! Requesting and decoding news from the content API.
//!
//! The pipeline is three steps, each usable on its own:
//!
//! 1. [`create_url`] / [`make_http_request`]: one GET, body as text
//! 2. [`extract_news_from_json`]: `response.results[]` into [`News`] records
//! 3. [`fetch_news_data`]: both of the above for a request URL
//!
//! Failures never cross this module's public boundary. Every error is logged
//! and turned into an empty body or an absent/partial list. The typed forms
//! ([`request_text`], [`parse_results`]) are public so callers that care can
//! still see what went wrong.
//!
//! # Expected body
//!
//! ```text
//! { "response": { "results": [
//!     { "webTitle": "...", "webPublicationDate": "2018-05-21T10:15:00Z",
//!       "webUrl": "...", "sectionName": "..." },
//!     ...
//! ] } }
//! ```

use crate::config::FetchConfig;
use crate::error::{QueryError, Result};
use crate::models::News;
use crate::utils::truncate_for_log;
use futures::stream::{self, StreamExt};
use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// Number of characters of `webPublicationDate` kept as the date.
const DATE_LEN: usize = 10;

/// Source of response bodies.
///
/// [`HttpFetcher`] is the real implementation. The trait lets the rest of
/// the pipeline run against canned bodies.
pub trait FetchText {
    /// Fetch `url` and return the whole body as text.
    fn fetch_text(&self, url: &Url) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// Fetches over HTTP with one short-lived client per request.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    connect_timeout: Duration,
    read_timeout: Duration,
    use_system_proxy: bool,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Self {
        Self {
            connect_timeout: config.connect_timeout(),
            read_timeout: config.read_timeout(),
            use_system_proxy: config.use_system_proxy,
        }
    }

    fn client(&self) -> Result<Client> {
        let mut builder = Client::builder()
            .connect_timeout(self.connect_timeout)
            .read_timeout(self.read_timeout)
            .pool_max_idle_per_host(0);
        if !self.use_system_proxy {
            builder = builder.no_proxy();
        }
        Ok(builder.build()?)
    }
}

impl FetchText for HttpFetcher {
    /// Only a 200 response counts; its body is read in full. The client and
    /// the response are dropped on every return path, which closes the
    /// connection since nothing is pooled.
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch_text(&self, url: &Url) -> Result<String> {
        let client = self.client()?;
        let response = client.get(url.clone()).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(QueryError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        info!(bytes = body.len(), "Read response body");
        Ok(body)
    }
}

/// Parse a request string into a URL.
pub fn create_url(request_url: &str) -> Result<Url> {
    Url::parse(request_url).map_err(|source| QueryError::InvalidUrl {
        url: request_url.to_string(),
        source,
    })
}

/// Validate `request_url` and fetch it with `fetcher`.
///
/// No request is made when the URL does not parse.
pub async fn request_text<F: FetchText>(fetcher: &F, request_url: &str) -> Result<String> {
    let url = create_url(request_url)?;
    fetcher.fetch_text(&url).await
}

fn body_or_empty(result: Result<String>, request_url: &str) -> String {
    match result {
        Ok(body) => body,
        Err(QueryError::Status(code)) => {
            error!(code, %request_url, "Error response code");
            String::new()
        }
        Err(e @ QueryError::InvalidUrl { .. }) => {
            error!(error = %e, "Problem building the URL");
            String::new()
        }
        Err(e) => {
            error!(error = %e, %request_url, "Problem retrieving the JSON results");
            String::new()
        }
    }
}

/// Perform a single GET and return the body, or `""` on any failure.
///
/// # Arguments
///
/// * `config` - Timeouts and proxy settings for the request
/// * `request_url` - The URL to fetch
pub async fn make_http_request(config: &FetchConfig, request_url: &str) -> String {
    let fetcher = HttpFetcher::new(config);
    body_or_empty(request_text(&fetcher, request_url).await, request_url)
}

/// Decode a response body into records.
///
/// Returns `None` for an empty body ("no data"). Otherwise returns every
/// record decoded before the first structural problem, which is logged.
///
/// A key missing from an article keeps the value the previous article had
/// for it (empty for the first article). Callers depend on this, so it is
/// not reset per article.
pub fn extract_news_from_json(news_json: &str) -> Option<Vec<News>> {
    if news_json.is_empty() {
        debug!("Empty response body; no news to parse");
        return None;
    }

    let mut news = Vec::new();
    if let Err(e) = parse_results(news_json, &mut news) {
        error!(
            error = %e,
            parsed = news.len(),
            body_preview = %truncate_for_log(news_json, 300),
            "Problem parsing the news JSON results"
        );
    }
    Some(news)
}

/// Decode `response.results[]` from `news_json`, appending to `news`.
///
/// On error, `news` holds the records decoded up to the failing element.
pub fn parse_results(news_json: &str, news: &mut Vec<News>) -> Result<()> {
    let root: Value = serde_json::from_str(news_json)?;
    let root = root.as_object().ok_or(QueryError::FieldType {
        field: "(root)",
        expected: "an object",
    })?;
    let response = object_field(root, "response")?;
    let results = response
        .get("results")
        .ok_or(QueryError::MissingField("results"))?
        .as_array()
        .ok_or(QueryError::FieldType {
            field: "results",
            expected: "an array",
        })?;

    // Carried across iterations on purpose.
    let mut title = String::new();
    let mut date = String::new();
    let mut url = String::new();
    let mut section = String::new();

    for element in results {
        let element = element.as_object().ok_or(QueryError::FieldType {
            field: "results[]",
            expected: "an object",
        })?;

        if let Some(value) = string_field(element, "webTitle") {
            title = value;
        }
        if let Some(value) = string_field(element, "webPublicationDate") {
            date = date_part(&value);
        }
        if let Some(value) = string_field(element, "webUrl") {
            url = value;
        }
        if let Some(value) = string_field(element, "sectionName") {
            section = value;
        }

        news.push(News::new(
            title.clone(),
            section.clone(),
            date.clone(),
            url.clone(),
        ));
    }

    debug!(count = news.len(), "Parsed news results");
    Ok(())
}

fn object_field<'a>(
    object: &'a Map<String, Value>,
    key: &'static str,
) -> Result<&'a Map<String, Value>> {
    object
        .get(key)
        .ok_or(QueryError::MissingField(key))?
        .as_object()
        .ok_or(QueryError::FieldType {
            field: key,
            expected: "an object",
        })
}

/// Read an optional field as text. Strings are taken verbatim; any other
/// value (`null`, numbers, booleans, objects, arrays) as its JSON text.
fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// The `YYYY-MM-DD` prefix of a timestamp. Shorter values are kept whole.
fn date_part(timestamp: &str) -> String {
    match timestamp.char_indices().nth(DATE_LEN) {
        Some((end, _)) => timestamp[..end].to_string(),
        None => {
            if timestamp.chars().count() < DATE_LEN {
                warn!(%timestamp, "Publication date shorter than YYYY-MM-DD; keeping it whole");
            }
            timestamp.to_string()
        }
    }
}

/// Fetch `request_url` with `fetcher` and decode the body.
#[instrument(level = "info", skip(fetcher))]
pub async fn fetch_news_with<F: FetchText>(fetcher: &F, request_url: &str) -> Option<Vec<News>> {
    let body = body_or_empty(request_text(fetcher, request_url).await, request_url);
    let news = extract_news_from_json(&body);
    match &news {
        Some(list) => info!(count = list.len(), "Fetched news"),
        None => warn!("No news data returned"),
    }
    news
}

/// Query the content API and return its articles.
///
/// `None` means nothing usable came back, whatever the reason.
pub async fn fetch_news_data(config: &FetchConfig, request_url: &str) -> Option<Vec<News>> {
    fetch_news_with(&HttpFetcher::new(config), request_url).await
}

/// Set (or replace) the `page` query parameter of `base_url`.
pub fn page_url(base_url: &str, page: u32) -> Result<Url> {
    let mut url = create_url(base_url)?;
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "page")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("page", &page.to_string());
    Ok(url)
}

/// Fetch pages `1..=pages` of `base_url` one after another and concatenate
/// their articles in page order.
///
/// The walk stops at the first page with no data. Returns `None` only when
/// the first page had none.
#[instrument(level = "info", skip(fetcher))]
pub async fn fetch_news_pages_with<F: FetchText + Sync>(
    fetcher: &F,
    base_url: &str,
    pages: u32,
) -> Option<Vec<News>> {
    let batches: Vec<Vec<News>> = stream::iter(1..=pages)
        .then(move |page| async move {
            match page_url(base_url, page) {
                Ok(url) => fetch_news_with(fetcher, url.as_str()).await,
                Err(e) => {
                    error!(error = %e, page, "Problem building the page URL");
                    None
                }
            }
        })
        .take_while(|batch| std::future::ready(batch.is_some()))
        .map(Option::unwrap_or_default)
        .boxed()
        .collect()
        .await;

    info!(pages = batches.len(), "Fetched news pages");
    if batches.is_empty() {
        None
    } else {
        Some(batches.concat())
    }
}

/// [`fetch_news_pages_with`] over HTTP.
pub async fn fetch_news_pages(
    config: &FetchConfig,
    base_url: &str,
    pages: u32,
) -> Option<Vec<News>> {
    fetch_news_pages_with(&HttpFetcher::new(config), base_url, pages).await
}

/// Fetch `pages` pages starting at `request_url`.
///
/// A single page is requested exactly as given; only a multi-page walk
/// rewrites the `page` parameter.
pub async fn fetch_news_for<F: FetchText + Sync>(
    fetcher: &F,
    request_url: &str,
    pages: u32,
) -> Option<Vec<News>> {
    if pages <= 1 {
        fetch_news_with(fetcher, request_url).await
    } else {
        fetch_news_pages_with(fetcher, request_url, pages).await
    }
}

/// [`fetch_news_for`] over HTTP, starting at the configured request URL.
pub async fn fetch_news(config: &FetchConfig, pages: u32) -> Option<Vec<News>> {
    fetch_news_for(&HttpFetcher::new(config), &config.request_url, pages).await
}
