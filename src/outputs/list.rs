//! Terminal list of articles.
//!
//! Each article becomes one row:
//!
//! ```text
//!   1. Brexit talks stall
//!      2018-05-21 · Politics
//!      https://www.theguardian.com/politics/2018/may/21/brexit
//! ```
//!
//! An absent list and an empty list both render the empty state.

use crate::models::News;
use std::fmt::Write;

/// Shown when there is nothing to list.
pub const EMPTY_STATE: &str = "No news found.";

/// Render a single row. `position` is 1-based.
pub fn render_row(position: usize, news: &News) -> String {
    let mut row = String::new();
    writeln!(row, "{position:>3}. {}", news.title()).unwrap();

    let meta = match (news.date().is_empty(), news.section().is_empty()) {
        (false, false) => format!("{} · {}", news.date(), news.section()),
        (false, true) => news.date().to_string(),
        (true, false) => news.section().to_string(),
        (true, true) => String::new(),
    };
    if !meta.is_empty() {
        writeln!(row, "     {meta}").unwrap();
    }
    if !news.url().is_empty() {
        writeln!(row, "     {}", news.url()).unwrap();
    }
    row
}

/// Render the whole list, rows separated by a blank line.
pub fn render(news: Option<&[News]>) -> String {
    match news {
        Some(list) if !list.is_empty() => list
            .iter()
            .enumerate()
            .map(|(i, n)| render_row(i + 1, n))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => format!("{EMPTY_STATE}\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_row_layout() {
        let news = News::new("Brexit talks stall", "Politics", "2018-05-21", "https://g.co/1");
        assert_eq!(
            render_row(1, &news),
            "  1. Brexit talks stall\n     2018-05-21 · Politics\n     https://g.co/1\n"
        );
    }

    #[test]
    fn test_render_row_skips_empty_fields() {
        let news = News::new("Untitled section", "", "2018-05-21", "");
        assert_eq!(
            render_row(12, &news),
            " 12. Untitled section\n     2018-05-21\n"
        );
    }

    #[test]
    fn test_render_keeps_order() {
        let list = vec![News::new("A", "s", "d", "u"), News::new("B", "s", "d", "u")];
        let out = render(Some(list.as_slice()));
        let a = out.find("1. A").unwrap();
        let b = out.find("2. B").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_render_empty_state() {
        assert_eq!(render(None), "No news found.\n");
        assert_eq!(render(Some(Vec::new().as_slice())), "No news found.\n");
    }
}
