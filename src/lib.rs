//! Fetch, parse and list articles from the Guardian content API.
//!
//! The entry point for a presenter is [`query::fetch_news_data`]: give it a
//! request URL and it returns the articles in API order, or `None` when
//! nothing usable came back. No error ever reaches the caller; failures are
//! logged through `tracing`.
//!
//! ```ignore
//! use awful_guardian_news::{config::FetchConfig, outputs::list, query};
//!
//! let config = FetchConfig::default();
//! let news = query::fetch_news_data(&config, &config.request_url).await;
//! print!("{}", list::render(news.as_deref()));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod outputs;
pub mod query;
pub mod utils;
