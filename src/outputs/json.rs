//! JSON copy of the fetched list.
//!
//! Written to `{json_output_dir}/news.json` and replaced on every run; the
//! file only mirrors what is currently on screen.

use crate::models::NewsPage;
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

/// File name used inside the output directory.
pub const NEWS_FILE: &str = "news.json";

/// Write a [`NewsPage`] as pretty-printed JSON.
///
/// # Returns
///
/// The path written, or an error if the directory cannot be created or the
/// file cannot be written.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_news_page(
    page: &NewsPage,
    json_output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(page)?;

    if let Err(e) = fs::create_dir_all(json_output_dir).await {
        error!(error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = PathBuf::from(json_output_dir).join(NEWS_FILE);
    fs::write(&path, json).await?;
    info!(path = %path.display(), count = page.news.len(), "Wrote news JSON");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::News;

    #[tokio::test]
    async fn test_write_news_page_replaces_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("json");
        let out = out.to_str().unwrap();

        let mut page = NewsPage {
            request_url: "https://content.guardianapis.com/search".to_string(),
            fetched_at: "2018-05-21T10:15:00+00:00".to_string(),
            news: vec![News::new("old", "s", "2018-05-20", "u")],
        };
        write_news_page(&page, out).await.unwrap();

        page.news = vec![News::new("new", "s", "2018-05-21", "u")];
        let path = write_news_page(&page, out).await.unwrap();

        let written: NewsPage =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written.news, page.news);
    }
}
