//! Command-line interface definitions for Awful Guardian News.
//!
//! Every fetch option can also come from the environment or from the YAML
//! file given with `--config`; flags win over both.

use clap::Parser;

/// Command-line arguments for the Awful Guardian News application.
///
/// # Examples
///
/// ```sh
/// # Default search, first page only
/// awful_guardian_news
///
/// # Three pages of a custom query, saved as JSON
/// awful_guardian_news -u "https://content.guardianapis.com/search?q=brexit&api-key=test" -p 3 -j ./json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Request URL of the first page
    #[arg(short, long, env = "NEWS_REQUEST_URL")]
    pub url: Option<String>,

    /// Number of result pages to fetch
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: u32,

    /// Optional path to a config.yaml file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Connect timeout in milliseconds
    #[arg(long, env = "NEWS_CONNECT_TIMEOUT_MS")]
    pub connect_timeout_ms: Option<u64>,

    /// Read timeout in milliseconds
    #[arg(long, env = "NEWS_READ_TIMEOUT_MS")]
    pub read_timeout_ms: Option<u64>,

    /// Output directory for a JSON copy of the list
    #[arg(short, long)]
    pub json_output_dir: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["awful_guardian_news"]);
        assert_eq!(cli.pages, 1);
        assert!(cli.config.is_none());
        assert!(cli.json_output_dir.is_none());
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "awful_guardian_news",
            "-u",
            "http://localhost/search",
            "-p",
            "3",
            "-j",
            "/tmp/json",
        ]);

        assert_eq!(cli.url.as_deref(), Some("http://localhost/search"));
        assert_eq!(cli.pages, 3);
        assert_eq!(cli.json_output_dir.as_deref(), Some("/tmp/json"));
    }

    #[test]
    fn test_cli_rejects_zero_pages() {
        assert!(Cli::try_parse_from(["awful_guardian_news", "--pages", "0"]).is_err());
    }
}
