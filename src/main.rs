//! # Awful Guardian News
//!
//! Fetches the latest articles from the Guardian content API and lists them
//! in the terminal: headline, publication date, section and link.
//!
//! ## Usage
//!
//! ```sh
//! awful_guardian_news -u "https://content.guardianapis.com/search?q=debates&api-key=test" -p 2
//! ```
//!
//! ## Architecture
//!
//! 1. **Configuration**: defaults, optional `config.yaml`, then flags/env
//! 2. **Fetching**: one GET per result page, run as a background task
//! 3. **Parsing**: `response.results[]` into `News` records
//! 4. **Output**: rows on stdout, optionally a JSON copy on disk
//!
//! Network and parse failures are logged and show up as an empty list, never
//! as a non-zero exit.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use awful_guardian_news::cli::Cli;
use awful_guardian_news::config::FetchConfig;
use awful_guardian_news::models::NewsPage;
use awful_guardian_news::outputs::{json, list};
use awful_guardian_news::query;
use awful_guardian_news::utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("awful_guardian_news starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = match &args.config {
        Some(path) => FetchConfig::load(path).await?,
        None => FetchConfig::default(),
    }
    .with_overrides(&args);

    // Fail before fetching if the JSON copy could not be written.
    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(
                path = %dir,
                error = %e,
                "JSON output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    // ---- Fetch in the background ----
    let request_url = config.request_url.clone();
    let pages = args.pages;
    let fetch = tokio::spawn({
        let config = config.clone();
        async move { query::fetch_news(&config, pages).await }
    });
    let news = match fetch.await {
        Ok(news) => news,
        Err(e) => {
            error!(error = %e, "Fetch task failed");
            None
        }
    };

    // ---- Render ----
    print!("{}", list::render(news.as_deref()));

    if let Some(dir) = &args.json_output_dir {
        let page = NewsPage {
            request_url,
            fetched_at: Local::now().to_rfc3339(),
            news: news.unwrap_or_default(),
        };
        if let Err(e) = json::write_news_page(&page, dir).await {
            error!(error = %e, "Failed to write news JSON");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
