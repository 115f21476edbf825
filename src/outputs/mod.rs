//! Output of fetched articles.
//!
//! # Submodules
//!
//! - [`list`]: Renders the articles as rows on the terminal
//! - [`json`]: Writes the articles to `news.json` for other tools

pub mod json;
pub mod list;
