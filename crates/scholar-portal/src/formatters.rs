//! Plain-text rendering of listings and page selectors.

use crate::models::Work;
use crate::pagination::{PageItem, PageWindow, ShowingRange};

/// Render a page selector, marking the current page with brackets.
#[must_use]
pub fn format_window(window: &PageWindow, current_page: u32) -> String {
    window
        .items()
        .iter()
        .map(|item| match item {
            PageItem::Page(n) if *n == current_page => format!("[{n}]"),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render "Showing X–Y of Z", or a no-results line.
#[must_use]
pub fn format_showing(range: ShowingRange, total_items: u64) -> String {
    if range.to == 0 {
        return "No results found.".to_string();
    }
    format!("Showing {}–{} of {}", range.from, range.to, total_items)
}

/// One line per work: position, title, year and citation count.
#[must_use]
pub fn format_works(works: &[Work], first_index: u64) -> String {
    let mut output = String::new();

    for (offset, work) in works.iter().enumerate() {
        let mut line = format!("{:>4}. {}", first_index + offset as u64, work.title());
        if let Some(year) = work.publication_year {
            line.push_str(&format!(" ({year})"));
        }
        if let Some(cited) = work.cited_by_count {
            line.push_str(&format!(" · cited by {cited}"));
        }
        output.push_str(&line);
        output.push('\n');
    }

    output
}
